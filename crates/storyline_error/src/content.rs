//! Content loading error types.

/// Kinds of content loading errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ContentErrorKind {
    /// Content file could not be read
    #[display("Failed to read content file {}: {}", path, message)]
    FileRead {
        /// Path that was read
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Content is not valid JSON of the expected shape
    #[display("Failed to parse content JSON: {}", _0)]
    JsonParse(String),
    /// A book was authored without any pages
    #[display("Book {} has no pages", _0)]
    EmptyBook(usize),
    /// Introduction index does not point at a loaded book
    #[display("Introduction book {} is out of range (library has {} books)", index, count)]
    InvalidIntroduction {
        /// Configured introduction index
        index: usize,
        /// Number of books loaded
        count: usize,
    },
}

/// Content error with location tracking.
///
/// # Examples
///
/// ```
/// use storyline_error::{ContentError, ContentErrorKind};
///
/// let err = ContentError::new(ContentErrorKind::EmptyBook(3));
/// assert!(format!("{}", err).contains("Book 3 has no pages"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Content Error: {} at line {} in {}", kind, line, file)]
pub struct ContentError {
    /// The kind of error that occurred
    pub kind: ContentErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ContentError {
    /// Create a new content error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ContentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ContentErrorKind {
        &self.kind
    }
}
