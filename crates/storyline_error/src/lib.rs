//! Error types for the Storyline server.
//!
//! Each domain has a `Kind` enum describing what went wrong and a wrapper
//! struct recording where. [`StorylineError`] unifies them for callers that
//! cross domain boundaries, such as the server binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod content;
mod server;

pub use config::{ConfigError, ConfigErrorKind};
pub use content::{ContentError, ContentErrorKind};
pub use server::{ServerError, ServerErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum StorylineErrorKind {
    /// Content loading error
    #[display("{}", _0)]
    Content(ContentError),
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// HTTP server error
    #[display("{}", _0)]
    Server(ServerError),
}

/// Storyline error with kind discrimination.
#[derive(Debug)]
pub struct StorylineError(Box<StorylineErrorKind>);

impl StorylineError {
    /// Create a new error from a kind.
    pub fn new(kind: StorylineErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorylineErrorKind {
        &self.0
    }
}

impl std::fmt::Display for StorylineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Storyline Error: {}", self.0)
    }
}

impl std::error::Error for StorylineError {}

impl<T> From<T> for StorylineError
where
    T: Into<StorylineErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyline operations.
pub type StorylineResult<T> = std::result::Result<T, StorylineError>;
