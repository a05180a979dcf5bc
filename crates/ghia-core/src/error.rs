//! Error types for the Ghia storefront core.
//!
//! Every failure a page can run into maps onto [`StorefrontError`]. Views only
//! ever see a single human-readable string, produced by
//! [`StorefrontError::user_message`].

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when a failure carries no usable text of its own.
pub const GENERIC_LOAD_ERROR: &str = "Failed to load data. Please try again.";

/// Main error type for the storefront core.
#[derive(Debug, Error)]
pub enum StorefrontError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// Non-success HTTP status. `message` is what the page shows.
    #[error("{message}")]
    Http { status: u16, message: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Validation errors
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Request cancelled")]
    Cancelled,

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;

impl From<std::io::Error> for StorefrontError {
    fn from(err: std::io::Error) -> Self {
        StorefrontError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        StorefrontError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for StorefrontError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StorefrontError::Timeout(std::time::Duration::from_secs(0))
        } else if err.is_decode() {
            StorefrontError::Json {
                message: err.to_string(),
                source: None,
            }
        } else {
            StorefrontError::Network {
                message: err.to_string(),
                source: Some(err),
            }
        }
    }
}

impl StorefrontError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        StorefrontError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a validation error for a form field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        StorefrontError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error only signals that the operation was superseded.
    ///
    /// Cancelled operations never surface on a view.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StorefrontError::Cancelled)
    }

    /// The single string a view renders for this failure.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_LOAD_ERROR.to_string()
        } else {
            message
        }
    }
}
