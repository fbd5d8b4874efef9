//! Read-only word list served alongside the books.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use storyline_error::{ContentError, ContentErrorKind};
use tracing::{info, instrument};

/// One dictionary entry.
///
/// Entries may also use the Dutch field names `woordsoort`, `vertaling`,
/// `definitie` and `voorbeeld`; they are always served in English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    /// Grammatical category, e.g. "noun"
    #[serde(alias = "woordsoort")]
    part_of_speech: String,
    /// Translation into the reader's language
    #[serde(default, alias = "vertaling", skip_serializing_if = "Option::is_none")]
    translation: Option<String>,
    /// Definition text
    #[serde(alias = "definitie")]
    definition: String,
    /// Example sentence
    #[serde(alias = "voorbeeld")]
    example: String,
}

/// Words and their entries, keyed by exact spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: BTreeMap<String, DictionaryEntry>,
}

impl Dictionary {
    /// A dictionary with no words.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a dictionary from a JSON object of word → entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let entries: BTreeMap<String, DictionaryEntry> = serde_json::from_str(json)
            .map_err(|e| ContentError::new(ContentErrorKind::JsonParse(e.to_string())))?;
        info!(words = entries.len(), "Dictionary ready");
        Ok(Self { entries })
    }

    /// Reads a dictionary from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ContentError::new(ContentErrorKind::FileRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        Self::from_json(&json)
    }

    /// All words in sorted order.
    pub fn words(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Entry for `word`, matched exactly.
    pub fn definition(&self, word: &str) -> Option<&DictionaryEntry> {
        self.entries.get(word)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
