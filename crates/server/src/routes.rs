//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (intentionally unauthenticated for load balancer probes)
        .route("/v1/health", get(handlers::health_check))
        // Image delivery
        .route("/images/{key}", get(handlers::get_image))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Fallback for unmatched routes. Plain text, not the JSON error shape.
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
