//! Immutable in-memory content store.

use crate::{Book, Library, Page};
use std::path::Path;
use std::sync::Arc;
use storyline_error::{ContentError, ContentErrorKind};
use tracing::{debug, info, instrument};

/// Read-only indexed access to a loaded [`Library`].
///
/// Cloning is cheap: clones share the same library.
///
/// # Examples
///
/// ```
/// use storyline_core::ContentStore;
///
/// let store = ContentStore::from_json(r#"{"books":[{"pages":[{"story":"Hi"}]}]}"#).unwrap();
/// assert!(store.page_at(0, 0).is_some());
/// assert!(store.page_at(0, 1).is_none());
/// assert!(store.book_at(1).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ContentStore {
    library: Arc<Library>,
}

impl ContentStore {
    /// Wraps an already validated library.
    pub fn new(library: Library) -> Self {
        info!(
            books = library.book_count(),
            pages = library.page_count(),
            introduction = ?library.introduction(),
            "Content store ready"
        );
        Self {
            library: Arc::new(library),
        }
    }

    /// Parses and validates a library from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the library is invalid.
    #[instrument(skip_all, fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let library: Library = serde_json::from_str(json)
            .map_err(|e| ContentError::new(ContentErrorKind::JsonParse(e.to_string())))?;
        library.validate()?;
        Ok(Self::new(library))
    }

    /// Reads, parses and validates a library from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        debug!("Reading content file");
        let json = std::fs::read_to_string(path).map_err(|e| {
            ContentError::new(ContentErrorKind::FileRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        Self::from_json(&json)
    }

    /// Replaces the library's introduction book.
    ///
    /// # Errors
    ///
    /// Returns an error if `introduction` is not a valid book index.
    pub fn with_introduction(self, introduction: usize) -> Result<Self, ContentError> {
        let library = Arc::unwrap_or_clone(self.library).with_introduction(Some(introduction))?;
        Ok(Self::new(library))
    }

    /// The underlying library.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Number of loaded books.
    pub fn book_count(&self) -> usize {
        self.library.book_count()
    }

    /// The book at `book`, or `None` when out of range.
    pub fn book_at(&self, book: usize) -> Option<&Book> {
        self.library.books().get(book)
    }

    /// The page at (`book`, `page`), or `None` when either index is out of range.
    pub fn page_at(&self, book: usize, page: usize) -> Option<&Page> {
        self.book_at(book)?.pages().get(page)
    }
}
