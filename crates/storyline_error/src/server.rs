//! HTTP server error types.

/// Specific error conditions for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// Listener could not be bound
    #[display("Failed to bind {}: {}", address, message)]
    Bind {
        /// Address that was requested
        address: String,
        /// Underlying I/O message
        message: String,
    },
    /// Server stopped with an I/O failure
    #[display("Server failed: {}", _0)]
    Serve(String),
    /// Tracing subscriber could not be installed
    #[display("Failed to initialize tracing: {}", _0)]
    Observability(String),
}

/// HTTP server error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The specific error condition
    pub kind: ServerErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ServerErrorKind {
        &self.kind
    }
}
