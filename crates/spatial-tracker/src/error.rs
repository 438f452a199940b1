// crates/spatial-tracker/src/error.rs
// Standardized error types for the spatial tracker

use thiserror::Error;

/// Main error type for the spatial library
#[derive(Error, Debug)]
pub enum SpatialError {
    #[error("invalid character entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Result using SpatialError
pub type Result<T> = std::result::Result<T, SpatialError>;
