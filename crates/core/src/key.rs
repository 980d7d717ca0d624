//! Image key validation.

use crate::error::CoreError;

/// Validate an image key before any storage I/O.
///
/// Keys are a single path segment restricted to `[A-Za-z0-9_.-]+`.
/// Anything else is rejected up front, so no request with an invalid key
/// ever reaches the cache or the origin store.
pub fn validate_image_key(key: &str) -> Result<(), CoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidKey(key.to_string()))
    }
}
