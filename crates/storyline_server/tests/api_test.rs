//! End-to-end tests for the HTTP API.

use reqwest::StatusCode;
use serde_json::{Value, json};
use std::io::Write;
use storyline_core::{BookCatalog, ContentStore, Dictionary, FALLBACK_STORIES, NavigationEngine, PageResolver};
use storyline_error::ConfigErrorKind;
use storyline_server::{AppState, StorylineConfig, create_router, load_state, with_cors};
use tokio::net::TcpListener;

const BOOKS: &str = r#"{
    "introduction": 1,
    "books": [
        {
            "metadata": {"title": "The Cave", "level": "A2"},
            "pages": [
                {"story": "You stand at the mouth of a cave.", "type": "start",
                 "options": [{"toPage": 1, "name": "Enter"}, {"toPage": 2, "name": "Walk away"}]},
                {"story": "You wake up."},
                {"story": "The end.", "type": "ending"}
            ]
        },
        {
            "pages": [{"story": "Welcome, reader."}]
        }
    ]
}"#;

const WORDS: &str = r#"{
    "boek": {"partOfSpeech": "noun", "translation": "book", "definition": "A written work.", "example": "Ik lees een boek."}
}"#;

fn state() -> AppState {
    let store = ContentStore::from_json(BOOKS).expect("Valid books");
    let dictionary = Dictionary::from_json(WORDS).expect("Valid dictionary");
    AppState::new(
        NavigationEngine::new(PageResolver::new(store.clone())),
        BookCatalog::new(store),
        dictionary,
    )
}

/// Serves `state` on an ephemeral port and returns its base URL.
async fn spawn(state: AppState) -> String {
    let router = with_cors(create_router(state), &["http://localhost:5173".to_string()])
        .expect("Valid origins");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Bind");
    let address = listener.local_addr().expect("Local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Serve");
    });
    format!("http://{}", address)
}

async fn get(base: &str, path: &str) -> (StatusCode, Value) {
    let response = reqwest::get(format!("{}{}", base, path))
        .await
        .expect("Request succeeds");
    let status = response.status();
    let body = response.json::<Value>().await.expect("JSON body");
    (status, body)
}

#[tokio::test]
async fn test_root_index() {
    let base = spawn(state()).await;
    let (status, body) = get(&base, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 2);
    assert_eq!(body["meta"]["title"], "root index");
    assert_eq!(body["meta"]["url"], "/");
    assert_eq!(body["data"], json!(["/books", "/dictionary"]));
}

#[tokio::test]
async fn test_health() {
    let base = spawn(state()).await;
    let (status, body) = get(&base, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_list_books_and_introduction() {
    let base = spawn(state()).await;

    let (status, body) = get(&base, "/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["meta"]["url"], "/books");
    assert_eq!(body["data"], json!(["/0"]));

    let (status, body) = get(&base, "/books/introduction").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["data"], "/1");
}

#[tokio::test]
async fn test_list_pages() {
    let base = spawn(state()).await;

    let (status, body) = get(&base, "/books/0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 3);
    assert_eq!(body["data"], json!(["/0", "/1", "/2"]));

    let (status, body) = get(&base, "/books/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["message"], "Book 7 does not exist");
}

#[tokio::test]
async fn test_metadata() {
    let base = spawn(state()).await;

    let (status, body) = get(&base, "/books/0/metadata").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"title": "The Cave", "level": "A2"}));

    let (_, body) = get(&base, "/books/1/metadata").await;
    assert_eq!(body["data"], json!({}));

    let (status, body) = get(&base, "/books/5/metadata").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 1);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_story_type_and_choices() {
    let base = spawn(state()).await;

    let (status, body) = get(&base, "/books/0/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["title"], "story");
    assert_eq!(body["data"]["books"], "You wake up.");

    let (_, body) = get(&base, "/books/0/0/type").await;
    assert_eq!(body["data"]["books"], "start");

    let (_, body) = get(&base, "/books/0/0/options").await;
    assert_eq!(
        body["data"]["books"],
        json!([{"toPage": 1, "name": "Enter"}, {"toPage": 2, "name": "Walk away"}])
    );

    let (_, body) = get(&base, "/books/0/1/options").await;
    assert_eq!(body["data"]["books"], json!([{"toPage": 0, "name": "Go back"}]));
}

#[tokio::test]
async fn test_missing_page_fallbacks() {
    let base = spawn(state()).await;

    let (status, body) = get(&base, "/books/0/99").await;
    assert_eq!(status, StatusCode::OK);
    let story = body["data"]["books"].as_str().expect("Story string");
    assert!(FALLBACK_STORIES.contains(&story));

    let (_, body) = get(&base, "/books/9/0/type").await;
    assert_eq!(body["data"]["books"], "page");

    let (_, body) = get(&base, "/books/9/0/options").await;
    assert_eq!(body["data"]["books"], json!([{"toPage": 0, "name": "Go back"}]));
}

#[tokio::test]
async fn test_invalid_coordinates_are_rejected() {
    let base = spawn(state()).await;

    for path in [
        "/books/-1",
        "/books/abc/metadata",
        "/books/-1/0",
        "/books/0/-3",
        "/books/0/x/type",
        "/books/1.5/0/options",
    ] {
        let (status, body) = get(&base, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(body["meta"]["count"], 1);
        assert_eq!(body["meta"]["url"], path);
        let message = body["data"]["message"].as_str().expect("Message");
        assert!(message.contains("must be a non-negative integer"), "{}", message);
    }
}

#[tokio::test]
async fn test_dictionary() {
    let base = spawn(state()).await;

    let (status, body) = get(&base, "/dictionary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["data"], json!(["boek"]));

    let (status, body) = get(&base, "/dictionary/boek").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["translation"], "book");

    let (status, body) = get(&base, "/dictionary/fiets").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["message"], "Word not found");
}

#[tokio::test]
async fn test_unknown_route() {
    let base = spawn(state()).await;
    let (status, body) = get(&base, "/clients?page=2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["meta"]["url"], "/clients?page=2");
    assert_eq!(body["data"]["message"], "Resource not found");
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let base = spawn(state()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/books", base))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .expect("Request succeeds");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );

    let response = client
        .get(format!("{}/books", base))
        .header("Origin", "https://elsewhere.example")
        .send()
        .await
        .expect("Request succeeds");
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[test]
fn test_invalid_cors_origin_is_rejected() {
    let router = create_router(state());
    assert!(with_cors(router, &["bad\norigin".to_string()]).is_err());
}

#[test]
fn test_wildcard_cors_origin_is_rejected() {
    let config = StorylineConfig::default()
        .with_overrides(|key| (key == "CORS_ORIGIN").then(|| "*".to_string()))
        .expect("Wildcard parses as an origin list");
    assert_eq!(config.server.cors_origins, vec!["*"]);

    let err = with_cors(create_router(state()), &config.server.cors_origins)
        .expect_err("Wildcard origin");
    match err.kind() {
        ConfigErrorKind::InvalidValue { key, .. } => assert_eq!(key, "server.cors_origins"),
        other => panic!("Expected InvalidValue, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_state_from_files() {
    let mut books = tempfile::NamedTempFile::new().expect("Temp file");
    books.write_all(BOOKS.as_bytes()).expect("Write books");

    let mut config = StorylineConfig::default();
    config.content.books_path = books.path().to_path_buf();
    config.content.introduction_book = Some(0);

    let state = load_state(&config).expect("Valid content");
    assert_eq!(state.catalog.list_books(), vec!["/1"]);
    assert!(state.dictionary.is_empty());

    let base = spawn(state).await;
    let (_, body) = get(&base, "/books/introduction").await;
    assert_eq!(body["data"], "/0");
}

#[test]
fn test_load_state_fails_on_missing_content() {
    let mut config = StorylineConfig::default();
    config.content.books_path = "/nonexistent/books.json".into();
    assert!(load_state(&config).is_err());

    let mut books = tempfile::NamedTempFile::new().expect("Temp file");
    books.write_all(BOOKS.as_bytes()).expect("Write books");
    config.content.books_path = books.path().to_path_buf();
    config.content.introduction_book = Some(10);
    assert!(load_state(&config).is_err());
}
