//! Error types for gencache
//!
//! All modules use `GencacheResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gencache operations
pub type GencacheResult<T> = Result<T, GencacheError>;

/// All errors that can occur in gencache
#[derive(Error, Debug)]
pub enum GencacheError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Cache store errors
    #[error("Failed to open cache generation {name}: {source}")]
    GenerationOpen {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache store error: {context}")]
    Store {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt cache entry for {url}: {reason}")]
    EntryCorrupt { url: String, reason: String },

    // Network errors
    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GencacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a cache store error with context
    pub fn store(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the network transport
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Fetch { .. } => Some("Check connectivity and the [network] site_origin setting"),
            Self::ConfigInvalid { .. } => Some("Run: gencache config show"),
            _ => None,
        }
    }
}
