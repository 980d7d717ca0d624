//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use darkroom_core::CoreError;
use serde::Serialize;

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid image key: {0:?}")]
    InvalidKey(String),

    #[error("image not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    NotAcceptable(String),

    #[error("{0}")]
    ContentTypeMismatch(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("storage error: {0}")]
    Storage(#[from] darkroom_storage::StorageError),

    #[error("cache error: {0}")]
    Cache(#[from] darkroom_cache::CacheError),

    #[error("codec error: {0}")]
    Codec(#[from] darkroom_codec::CodecError),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidKey(_) => "invalid_key",
            Self::NotFound(_) => "not_found",
            Self::NotAcceptable(_) => "not_acceptable",
            Self::ContentTypeMismatch(_) => "content_type_mismatch",
            Self::Internal(_) => "internal_error",
            Self::Storage(_) => "storage_error",
            Self::Cache(_) => "cache_error",
            Self::Codec(_) => "codec_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            Self::ContentTypeMismatch(_) => StatusCode::NOT_ACCEPTABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(e) => match e {
                darkroom_storage::StorageError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::InvalidKey(key) => ApiError::InvalidKey(key),
            CoreError::Unsatisfiable { .. } => ApiError::NotAcceptable(message),
            CoreError::ContentTypeMismatch { .. } => ApiError::ContentTypeMismatch(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
