//! Tests for the companion dictionary.

use std::io::Write;
use storyline_core::Dictionary;
use storyline_error::ContentErrorKind;

const WORDS: &str = r#"{
    "kasteel": {
        "partOfSpeech": "noun",
        "translation": "castle",
        "definition": "A large fortified building.",
        "example": "Het kasteel staat op de heuvel."
    },
    "boek": {
        "partOfSpeech": "noun",
        "definition": "A written work.",
        "example": "Ik lees een boek."
    }
}"#;

#[test]
fn test_words_are_sorted() {
    let dictionary = Dictionary::from_json(WORDS).expect("Valid dictionary");
    assert_eq!(dictionary.words(), vec!["boek", "kasteel"]);
    assert_eq!(dictionary.len(), 2);
}

#[test]
fn test_definition_lookup_is_exact() {
    let dictionary = Dictionary::from_json(WORDS).expect("Valid dictionary");

    let entry = dictionary.definition("kasteel").expect("Known word");
    assert_eq!(entry.part_of_speech(), "noun");
    assert_eq!(entry.translation().as_deref(), Some("castle"));

    let entry = dictionary.definition("boek").expect("Known word");
    assert!(entry.translation().is_none());

    assert!(dictionary.definition("Boek").is_none());
    assert!(dictionary.definition("fiets").is_none());
}

#[test]
fn test_dutch_field_names_are_accepted() {
    let dictionary = Dictionary::from_json(
        r#"{
            "fiets": {
                "woordsoort": "zelfstandig naamwoord",
                "vertaling": "bicycle",
                "definitie": "Een vervoermiddel met twee wielen.",
                "voorbeeld": "Ik ga met de fiets naar school."
            },
            "lopen": {
                "woordsoort": "werkwoord",
                "definitie": "Zich te voet voortbewegen.",
                "voorbeeld": "Wij lopen naar huis."
            }
        }"#,
    )
    .expect("Dutch field names");

    let entry = dictionary.definition("fiets").expect("Known word");
    assert_eq!(entry.part_of_speech(), "zelfstandig naamwoord");
    assert_eq!(entry.translation().as_deref(), Some("bicycle"));
    assert_eq!(entry.definition(), "Een vervoermiddel met twee wielen.");
    assert_eq!(entry.example(), "Ik ga met de fiets naar school.");
    assert!(dictionary.definition("lopen").expect("Known word").translation().is_none());

    let served = serde_json::to_value(entry).expect("Serializable");
    assert_eq!(served["partOfSpeech"], "zelfstandig naamwoord");
    assert!(served.get("woordsoort").is_none());
}

#[test]
fn test_empty_dictionary() {
    let dictionary = Dictionary::empty();
    assert!(dictionary.is_empty());
    assert!(dictionary.words().is_empty());
}

#[test]
fn test_malformed_dictionary_is_rejected() {
    let err = Dictionary::from_json(r#"{"boek": {"definition": "no example"}}"#)
        .expect_err("Missing fields");
    assert!(matches!(err.kind(), ContentErrorKind::JsonParse(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file");
    file.write_all(WORDS.as_bytes()).expect("Write dictionary");
    let dictionary = Dictionary::load(file.path()).expect("Valid file");
    assert_eq!(dictionary.len(), 2);
}
