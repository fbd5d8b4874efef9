//! Server configuration loaded from TOML and environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use storyline_error::{ConfigError, ConfigErrorKind};

/// Log output format.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorylineConfig {
    /// Listener settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Content file locations
    #[serde(default)]
    pub content: ContentSettings,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl StorylineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or TOML is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::new(ConfigErrorKind::TomlParse(e.to_string())))
    }

    /// Apply overrides from the process environment.
    ///
    /// Reads:
    /// - `PORT`
    /// - `CORS_ORIGIN` (comma-separated)
    /// - `STORYLINE_BOOKS_PATH`
    /// - `STORYLINE_DICTIONARY_PATH`
    /// - `STORYLINE_INTRODUCTION_BOOK`
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, using the same keys as [`with_env`](Self::with_env).
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_setting("PORT", &port)?;
        }
        if let Some(origins) = lookup("CORS_ORIGIN") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(path) = lookup("STORYLINE_BOOKS_PATH") {
            self.content.books_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("STORYLINE_DICTIONARY_PATH") {
            self.content.dictionary_path = Some(PathBuf::from(path));
        }
        if let Some(index) = lookup("STORYLINE_INTRODUCTION_BOOK") {
            self.content.introduction_book =
                Some(parse_setting("STORYLINE_INTRODUCTION_BOOK", &index)?);
        }
        Ok(self)
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = format!("{}:{}", self.server.host, self.server.port);
        address.parse().map_err(|e| {
            ConfigError::new(ConfigErrorKind::InvalidValue {
                key: "server.host".to_string(),
                message: format!("{}: {}", address, e),
            })
        })
    }
}

#[track_caller]
fn parse_setting<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| {
        ConfigError::new(ConfigErrorKind::InvalidValue {
            key: key.to_string(),
            message: format!("{:?}: {}", value, e),
        })
    })
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3012
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

/// Content file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSettings {
    /// Book dataset
    #[serde(default = "default_books_path")]
    pub books_path: PathBuf,
    /// Optional dictionary
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,
    /// Overrides the introduction book declared in the dataset
    #[serde(default)]
    pub introduction_book: Option<usize>,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            books_path: default_books_path(),
            dictionary_path: None,
            introduction_book: None,
        }
    }
}

fn default_books_path() -> PathBuf {
    PathBuf::from("assets/books/books.json")
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}
