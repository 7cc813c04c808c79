//! Core error types for daykeeper-core.
//!
//! Domain errors are returned to the caller as values; the engine never
//! panics on bad input or a bad journal. An unparseable journal is a
//! recovery case handled inside the store, not an error surfaced here.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for daykeeper-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A completion report was submitted for a date that was never planned
    #[error("No plan found for {0}")]
    NoPlanForDate(NaiveDate),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the journal file
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the journal file
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the document
    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    /// The journal was written by a newer build
    #[error("Journal version {found} is newer than this build supports ({supported})")]
    FutureVersion { found: u32, supported: u32 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A date string failed calendar parsing
    #[error("Invalid date '{value}': {message}")]
    InvalidDate { value: String, message: String },

    /// A phase value outside the fixed enum
    #[error("Unknown semester phase '{value}' (expected one of: {expected})")]
    UnknownPhase { value: String, expected: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
