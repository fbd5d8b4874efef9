//! Configuration error types.

/// Specific error conditions for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// Configuration file could not be read
    #[display("Failed to read config file: {}", _0)]
    FileRead(String),
    /// Configuration file is not valid TOML
    #[display("Failed to parse TOML: {}", _0)]
    TomlParse(String),
    /// A setting has a value that cannot be used
    #[display("Invalid value for {}: {}", key, message)]
    InvalidValue {
        /// Setting name
        key: String,
        /// Why the value was rejected
        message: String,
    },
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use storyline_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::TomlParse("expected `=`".into()));
/// assert!(err.to_string().contains("expected `=`"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The specific error condition
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
