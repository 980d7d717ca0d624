//! Codec error types.

use thiserror::Error;

/// Codec operation errors.
///
/// The codec has no partial-failure contract; any error here is fatal to
/// the request that triggered the transform.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("transform task failed: {0}")]
    Task(String),
}

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
