//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid image key: {0:?}")]
    InvalidKey(String),

    #[error(
        "the content types in the Accept header are not supported; \
         specify a valid content type such as {allowed}"
    )]
    Unsatisfiable { allowed: String },

    #[error(
        "the stored content type '{content_type}' does not match the \
         negotiated Accept preferences"
    )]
    ContentTypeMismatch { content_type: String },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
