//! Canonical edge-cache keys.

/// Query parameters that affect the output bytes of a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheKeyParams {
    /// Encoding quality (`q` query parameter).
    pub quality: Option<u32>,
    /// Target width (`w` query parameter).
    pub width: Option<u32>,
    /// Target height (`h` query parameter).
    pub height: Option<u32>,
    /// Negotiated webp fast path. Encodes the Accept outcome so the
    /// header itself never has to be part of the key.
    pub webp: bool,
}

/// Build the canonical cache key for a request path.
///
/// Recognized parameters are re-assembled in a fixed order so the order
/// they appeared in the request never splits the cache; everything else
/// is dropped. Pure and idempotent.
pub fn build_cache_key(path: &str, params: &CacheKeyParams) -> String {
    let mut query = Vec::new();
    if let Some(q) = params.quality {
        query.push(format!("q={q}"));
    }
    if let Some(h) = params.height {
        query.push(format!("h={h}"));
    }
    if let Some(w) = params.width {
        query.push(format!("w={w}"));
    }
    if params.webp {
        query.push("webp=true".to_string());
    }

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_when_no_params() {
        let key = build_cache_key("/images/cat.png", &CacheKeyParams::default());
        assert_eq!(key, "/images/cat.png");
    }

    #[test]
    fn params_assemble_in_fixed_order() {
        let params = CacheKeyParams {
            quality: Some(80),
            width: Some(640),
            height: Some(480),
            webp: true,
        };
        let key = build_cache_key("/images/cat.png", &params);
        assert_eq!(key, "/images/cat.png?q=80&h=480&w=640&webp=true");
    }

    #[test]
    fn absent_params_are_omitted() {
        let params = CacheKeyParams {
            width: Some(100),
            ..Default::default()
        };
        assert_eq!(
            build_cache_key("/images/a.jpg", &params),
            "/images/a.jpg?w=100"
        );
    }

    #[test]
    fn identical_inputs_yield_identical_keys() {
        let params = CacheKeyParams {
            quality: Some(75),
            width: None,
            height: Some(200),
            webp: false,
        };
        let first = build_cache_key("/images/a.jpg", &params);
        let second = build_cache_key("/images/a.jpg", &params);
        assert_eq!(first, second);
    }

    #[test]
    fn differing_params_yield_differing_keys() {
        let small = CacheKeyParams {
            width: Some(100),
            ..Default::default()
        };
        let large = CacheKeyParams {
            width: Some(200),
            ..Default::default()
        };
        assert_ne!(
            build_cache_key("/images/a.jpg", &small),
            build_cache_key("/images/a.jpg", &large)
        );
    }
}
