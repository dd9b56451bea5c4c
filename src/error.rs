//! Error types for quietspot.
//!
//! This module defines all error types used throughout the quietspot crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for quietspot operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Reading Errors ===
    /// A submitted reading failed validation.
    #[error("invalid reading: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    // === Storage Errors ===
    /// The durable write of the reading collection failed.
    #[error("failed to persist readings to {path}: {source}")]
    Persist {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// The configured bind address could not be parsed.
    #[error("invalid bind address '{addr}': {source}")]
    AddrParse {
        /// The offending address string.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::net::AddrParseError,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for quietspot operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Check if this error is a validation failure (maps to HTTP 400).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
