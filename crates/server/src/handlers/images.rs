//! Image delivery endpoint (read path).

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, ETAG};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use darkroom_cache::CachedResponse;
use darkroom_codec::TransformRequest;
use darkroom_core::{
    CACHE_CONTROL_IMMUTABLE, CacheKeyParams, Negotiated, NegotiationPolicy, build_cache_key,
    parse_accept, validate_image_key,
};
use darkroom_storage::StorageError;
use std::collections::HashMap;

/// GET /images/{key} - Negotiate, transform, and serve an image.
///
/// Pipeline: validate key → check edge cache → fetch original → select
/// format → transform → schedule cache write → respond. A cache hit
/// short-circuits after the first two steps; the cache write never
/// blocks the response.
pub async fn get_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    // Fail closed on bad keys before any cache or storage I/O.
    validate_image_key(&key)?;

    // A missing Accept header denotes universal acceptance.
    let accept_header = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*/*");
    let accepts = parse_accept(accept_header);

    let engine = state.negotiation;
    engine.ensure_satisfiable(&accepts)?;

    // Unparseable numeric parameters are treated as unset rather than
    // failing the request.
    let quality = int_param(&query, "q");
    let width = int_param(&query, "w");
    let height = int_param(&query, "h");

    let webp = engine.prefers_webp(&accepts);
    let path = format!("/images/{key}");
    let cache_key = match engine.policy() {
        NegotiationPolicy::ResizeCapable => build_cache_key(
            &path,
            &CacheKeyParams {
                quality,
                width,
                height,
                webp,
            },
        ),
        // The bare URL is enough here: the stored content type is
        // re-validated against the Accept header on every hit.
        NegotiationPolicy::Passthrough => build_cache_key(&path, &CacheKeyParams::default()),
    };

    if let Some(cached) = state.cache.lookup(&cache_key).await? {
        if engine.policy() == NegotiationPolicy::Passthrough {
            engine.resolve(&accepts, &cached.content_type)?;
        }
        tracing::debug!(key = %key, cache_key = %cache_key, "edge cache hit");
        return Ok(into_http_response(cached));
    }

    let object = match state.storage.get(&key).await {
        Ok(object) => object,
        Err(StorageError::NotFound(_)) => return Err(ApiError::NotFound(key)),
        Err(e) => return Err(e.into()),
    };

    // An object without a recorded content type cannot be negotiated.
    let Some(content_type) = object.content_type.clone() else {
        return Err(ApiError::NotFound(key));
    };

    let outcome = engine.resolve(&accepts, &content_type)?;

    let response = match outcome {
        Negotiated::Passthrough => {
            // Unmodified source bytes keep the source ETag.
            CachedResponse {
                content_type,
                cache_control: CACHE_CONTROL_IMMUTABLE.to_string(),
                etag: Some(object.etag.clone()),
                body: object.bytes,
            }
        }
        Negotiated::Encode(format) => {
            tracing::debug!(
                key = %key,
                format = format.content_type(),
                w = ?width,
                h = ?height,
                q = ?quality,
                "transforming image"
            );
            let transformed = state
                .codec
                .transform(TransformRequest {
                    bytes: object.bytes,
                    format,
                    width,
                    height,
                    quality: quality.map(|q| q.min(100) as u8),
                })
                .await?;

            // Transformed bytes differ from the source, so no ETag.
            CachedResponse {
                content_type: format.content_type().to_string(),
                cache_control: CACHE_CONTROL_IMMUTABLE.to_string(),
                etag: None,
                body: transformed,
            }
        }
    };

    schedule_cache_store(&state, cache_key, response.clone());
    Ok(into_http_response(response))
}

/// Parse a query parameter as an integer, ignoring malformed values.
fn int_param(query: &HashMap<String, String>, name: &str) -> Option<u32> {
    query.get(name).and_then(|v| v.parse().ok())
}

/// Schedule a fire-and-forget cache write.
///
/// The response is returned to the client without waiting; failures are
/// logged and swallowed. The tracker keeps the write alive across
/// graceful shutdown.
fn schedule_cache_store(state: &AppState, cache_key: String, response: CachedResponse) {
    let cache = state.cache.clone();
    state.background.spawn(async move {
        if let Err(e) = cache.store(&cache_key, response).await {
            tracing::warn!(cache_key = %cache_key, error = %e, "edge cache store failed");
        }
    });
}

/// Turn a cached (or about-to-be-cached) response into an HTTP response.
fn into_http_response(cached: CachedResponse) -> Response {
    let mut headers = HeaderMap::new();
    // Header values are either gateway constants or stored metadata that
    // was valid when written; anything unrepresentable is skipped.
    if let Ok(value) = HeaderValue::from_str(&cached.content_type) {
        headers.insert(CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&cached.cache_control) {
        headers.insert(CACHE_CONTROL, value);
    }
    if let Some(etag) = &cached.etag
        && let Ok(value) = HeaderValue::from_str(etag)
    {
        headers.insert(ETAG, value);
    }

    (StatusCode::OK, headers, cached.body).into_response()
}
