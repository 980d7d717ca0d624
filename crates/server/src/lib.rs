//! HTTP image-delivery gateway for darkroom.
//!
//! This crate provides the HTTP surface:
//! - Content negotiation on the `Accept` header
//! - Cache-aside delivery keyed on canonical request URLs
//! - Transcoding through the codec collaborator on cache misses
//! - Structured JSON error responses

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
