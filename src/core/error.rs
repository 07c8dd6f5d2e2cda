//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`KotobatenError`] which covers every failure mode of the
//! kotobaten commands. It uses `thiserror` for ergonomic error definitions and
//! includes constructors for the failure scenarios that carry context.
//!
//! # Public API
//! - [`KotobatenError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, KotobatenError>`
//!
//! # Error Categories
//! - **Authentication**: Missing or rejected credentials
//! - **Remote requests**: Transport failures and unexpected HTTP statuses
//! - **Results**: Empty practice batches and a missing local cache
//! - **Validation**: User input rejected before any request is made
//! - **Storage and config**: Key-value store and configuration file failures

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for kotobaten
#[derive(Error, Debug)]
pub enum KotobatenError {
    // Authentication errors
    #[error("Authentication required. Run 'kotobaten login' first.")]
    AuthRequired,

    #[error("Login failed: {reason}")]
    LoginFailed { reason: String },

    // Remote request errors
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server responded with {status} for {url}")]
    HttpStatus { status: u16, url: String },

    // Result errors
    #[error("No practice words available")]
    EmptyResult,

    #[error("No practice words loaded. Open menu bar to load.")]
    NoWordsLoaded,

    // Validation errors
    #[error("{message}")]
    Validation { message: String },

    #[error("Cancelled")]
    ConfirmationDeclined,

    // Storage errors
    #[error("Could not find data directory")]
    DataDirectoryNotFound,

    #[error("Failed to create store directory '{path}': {source}")]
    StoreDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read key '{key}' from '{path}': {source}")]
    StoreReadFailed {
        key: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write key '{key}' to '{path}': {source}")]
    StoreWriteFailed {
        key: String,
        path: PathBuf,
        source: std::io::Error,
    },

    // Config errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using KotobatenError
pub type Result<T> = std::result::Result<T, KotobatenError>;

impl KotobatenError {
    /// Create a login failed error
    pub fn login_failed(reason: impl Into<String>) -> Self {
        Self::LoginFailed {
            reason: reason.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a validation error with a user-facing message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a store directory creation failed error
    pub fn store_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::StoreDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a store read failed error
    pub fn store_read_failed(
        key: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::StoreReadFailed {
            key: key.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a store write failed error
    pub fn store_write_failed(
        key: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::StoreWriteFailed {
            key: key.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Whether the error means the user has to authenticate again
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}
