//! Core error types for aqualog-core.
//!
//! This module defines the error hierarchy using thiserror for error
//! handling and reporting across the library.

use thiserror::Error;

/// Core error type for aqualog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification capability errors
    #[error("Notification error: {0}")]
    Notification(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a stored value
    #[error("Failed to read key '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Failed to persist a value
    #[error("Failed to write key '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value for a named field
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Intake amounts must be strictly positive
    #[error("Intake amount must be positive, got {amount_ml} ml")]
    NonPositiveAmount { amount_ml: f64 },

    /// Weight must be strictly positive
    #[error("Weight must be positive, got {weight}")]
    NonPositiveWeight { weight: f64 },
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
