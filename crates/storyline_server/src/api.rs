//! HTTP API for books, pages and the dictionary.

use crate::response::{ApiError, Envelope, PageData, request_url};
use axum::{
    Router,
    extract::{Path, Request, State},
    http::{HeaderValue, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use storyline_core::{BookCatalog, BookMetadata, Choice, Dictionary, DictionaryEntry, NavigationEngine};
use storyline_error::{ConfigError, ConfigErrorKind};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, instrument};

/// Routes listed by the root index.
const ROOT_ROUTES: [&str; 2] = ["/books", "/dictionary"];

tokio::task_local! {
    /// Path and query of the request being handled, for the panic envelope.
    static REQUEST_URL: String;
}

/// API server state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Page queries.
    pub engine: Arc<NavigationEngine>,
    /// Book and page listings.
    pub catalog: Arc<BookCatalog>,
    /// Companion word list.
    pub dictionary: Arc<Dictionary>,
}

impl AppState {
    /// Creates a new API state.
    pub fn new(engine: NavigationEngine, catalog: BookCatalog, dictionary: Dictionary) -> Self {
        Self {
            engine: Arc::new(engine),
            catalog: Arc::new(catalog),
            dictionary: Arc::new(dictionary),
        }
    }
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(root_index))
        .route("/health", get(health_check))
        .route("/books", get(list_books))
        .route("/books/introduction", get(introduction))
        .route("/books/:book", get(list_pages))
        .route("/books/:book/metadata", get(book_metadata))
        .route("/books/:book/:page", get(page_story))
        .route("/books/:book/:page/type", get(page_type))
        .route("/books/:book/:page/options", get(page_choices))
        .route("/dictionary", get(word_list))
        .route("/dictionary/:word", get(definition))
        .fallback(not_found)
        .with_state(state);
    with_layers(router)
}

/// Applies panic recovery and request tracing to `router`.
fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(capture_url))
        .layer(TraceLayer::new_for_http())
}

/// Runs the rest of the stack with the request URL in [`REQUEST_URL`].
async fn capture_url(request: Request, next: Next) -> Response {
    let url = request_url(request.uri());
    REQUEST_URL.scope(url, next.run(request)).await
}

/// Wraps `router` in a CORS layer allowing GET from `origins`.
///
/// # Errors
///
/// Returns error if an origin is `*` or is not a valid header value.
/// Credentialed CORS cannot be combined with a wildcard origin.
pub fn with_cors(router: Router, origins: &[String]) -> Result<Router, ConfigError> {
    let origins = origins
        .iter()
        .map(|origin| {
            if origin.trim() == "*" {
                return Err(ConfigError::new(ConfigErrorKind::InvalidValue {
                    key: "server.cors_origins".to_string(),
                    message: "wildcard origin is not allowed with credentials".to_string(),
                }));
            }
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::new(ConfigErrorKind::InvalidValue {
                    key: "server.cors_origins".to_string(),
                    message: format!("{:?}: {}", origin, e),
                })
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_credentials(true);

    Ok(router.layer(cors))
}

/// Parses a path segment as a zero-based index.
///
/// Anything other than a non-negative base-10 integer is rejected with a
/// message naming the parameter.
pub fn parse_index(name: &str, raw: &str) -> Result<usize, String> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!(
            "{} must be a non-negative integer, got {:?}",
            name, raw
        ));
    }
    raw.parse()
        .map_err(|_| format!("{} is out of range: {}", name, raw))
}

fn page_coordinates(
    title: &str,
    uri: &Uri,
    book: &str,
    page: &str,
) -> Result<(usize, usize), ApiError> {
    let book = parse_index("bookIndex", book).map_err(|m| ApiError::bad_request(title, uri, m))?;
    let page = parse_index("pageIndex", page).map_err(|m| ApiError::bad_request(title, uri, m))?;
    Ok((book, page))
}

/// Root index endpoint.
#[instrument(skip_all)]
async fn root_index(uri: Uri) -> Envelope<[&'static str; 2]> {
    Envelope::new(ROOT_ROUTES.len(), "root index", &uri, ROOT_ROUTES)
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check(uri: Uri) -> Envelope<serde_json::Value> {
    Envelope::new(1, "health", &uri, json!({ "status": "healthy" }))
}

/// List every book except the introduction.
#[instrument(skip_all)]
async fn list_books(State(state): State<AppState>, uri: Uri) -> Envelope<Vec<String>> {
    let books = state.catalog.list_books();
    Envelope::new(books.len(), "book index", &uri, books)
}

/// Route of the introduction book.
#[instrument(skip_all)]
async fn introduction(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Envelope<String>, ApiError> {
    state
        .catalog
        .introduction_route()
        .map(|route| Envelope::new(1, "introduction", &uri, route))
        .ok_or_else(|| {
            ApiError::not_found(
                "Could not get the introduction you requested",
                &uri,
                "No introduction book is configured",
            )
        })
}

/// List the pages of a book.
#[instrument(skip(state, uri))]
async fn list_pages(
    State(state): State<AppState>,
    Path(book): Path<String>,
    uri: Uri,
) -> Result<Envelope<Vec<String>>, ApiError> {
    const TITLE: &str = "Could not get the page index you requested";
    let book = parse_index("bookIndex", &book).map_err(|m| ApiError::bad_request(TITLE, &uri, m))?;
    let pages = state
        .catalog
        .list_pages(book)
        .ok_or_else(|| ApiError::not_found(TITLE, &uri, format!("Book {} does not exist", book)))?;
    Ok(Envelope::new(pages.len(), "page index", &uri, pages))
}

/// Metadata of a book, `null` when the book does not exist.
#[instrument(skip(state, uri))]
async fn book_metadata(
    State(state): State<AppState>,
    Path(book): Path<String>,
    uri: Uri,
) -> Result<Envelope<Option<BookMetadata>>, ApiError> {
    let book = parse_index("bookIndex", &book).map_err(|m| {
        ApiError::bad_request("Could not get the metadata you requested", &uri, m)
    })?;
    let metadata = state.engine.metadata_of(book).cloned();
    Ok(Envelope::new(1, "metadata", &uri, metadata))
}

/// Story text of a page.
#[instrument(skip(state, uri))]
async fn page_story(
    State(state): State<AppState>,
    Path((book, page)): Path<(String, String)>,
    uri: Uri,
) -> Result<Envelope<PageData<String>>, ApiError> {
    let (book, page) =
        page_coordinates("Could not get the story you requested", &uri, &book, &page)?;
    let story = state.engine.story_of(book, page);
    Ok(Envelope::new(1, "story", &uri, PageData { books: story }))
}

/// Type tag of a page.
#[instrument(skip(state, uri))]
async fn page_type(
    State(state): State<AppState>,
    Path((book, page)): Path<(String, String)>,
    uri: Uri,
) -> Result<Envelope<PageData<String>>, ApiError> {
    let (book, page) =
        page_coordinates("Could not get the page type you requested", &uri, &book, &page)?;
    let page_type = state.engine.type_of(book, page);
    Ok(Envelope::new(1, "page type", &uri, PageData { books: page_type }))
}

/// Choices leading away from a page.
#[instrument(skip(state, uri))]
async fn page_choices(
    State(state): State<AppState>,
    Path((book, page)): Path<(String, String)>,
    uri: Uri,
) -> Result<Envelope<PageData<Vec<Choice>>>, ApiError> {
    let (book, page) =
        page_coordinates("Could not get the choices you requested", &uri, &book, &page)?;
    let choices = state.engine.choices_of(book, page);
    Ok(Envelope::new(1, "choices", &uri, PageData { books: choices }))
}

/// Every dictionary word.
#[instrument(skip_all)]
async fn word_list(State(state): State<AppState>, uri: Uri) -> Envelope<Vec<String>> {
    let words: Vec<String> = state.dictionary.words().into_iter().map(String::from).collect();
    Envelope::new(words.len(), "word list", &uri, words)
}

/// Definition of a single word.
#[instrument(skip(state, uri))]
async fn definition(
    State(state): State<AppState>,
    Path(word): Path<String>,
    uri: Uri,
) -> Result<Envelope<DictionaryEntry>, ApiError> {
    state
        .dictionary
        .definition(&word)
        .cloned()
        .map(|entry| Envelope::new(1, "definition", &uri, entry))
        .ok_or_else(|| {
            ApiError::not_found(
                "Could not get the definition you requested",
                &uri,
                "Word not found",
            )
        })
}

/// Catch-all for unknown routes.
async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Not found", &uri, "Resource not found")
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    let url = REQUEST_URL.try_with(String::clone).unwrap_or_default();
    error!(detail = %detail, url = %url, "Handler panicked");

    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        url,
        "The server failed to handle the request",
    )
    .into_response()
}
