//! Error types for the uibox-eval library.

use thiserror::Error;

/// Result type for uibox-eval operations.
pub type Result<T> = std::result::Result<T, UiBoxEvalError>;

/// Error types that can occur while loading or evaluating annotations.
#[derive(Error, Debug)]
pub enum UiBoxEvalError {
    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Bounding box with negative dimensions or non-finite coordinates.
    #[error("Invalid bounding box: {0}")]
    InvalidBox(String),

    /// Label name outside the fixed label set.
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// IoU threshold outside [0.0, 1.0].
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
}
