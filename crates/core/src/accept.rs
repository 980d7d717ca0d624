//! Accept header parsing.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A single media-type preference parsed from an `Accept` header.
#[derive(Clone, Debug, PartialEq)]
pub struct AcceptEntry {
    /// The media type, e.g. `image/webp` or `*/*`.
    pub media_type: String,
    /// Parameters attached to the entry, e.g. `q=0.8`.
    pub params: BTreeMap<String, String>,
    /// Quality weight in [0, 1]. Entries without a `q` parameter get 1.0.
    pub q: f32,
}

/// Parse a raw `Accept` header into entries ranked by descending `q`.
///
/// The sort is stable, so entries with equal `q` keep the order in which
/// they appeared in the header. A malformed `q` value falls back to `1.0`
/// for that entry rather than failing the whole header; an empty header
/// parses to an empty list, which callers treat as universal acceptance.
pub fn parse_accept(header: &str) -> Vec<AcceptEntry> {
    let mut entries: Vec<AcceptEntry> = header.split(',').filter_map(parse_entry).collect();
    entries.sort_by(|a, b| b.q.partial_cmp(&a.q).unwrap_or(Ordering::Equal));
    entries
}

/// Parse one comma-separated header segment, e.g. `image/webp;q=0.9`.
fn parse_entry(segment: &str) -> Option<AcceptEntry> {
    let mut parts = segment.trim().split(';');
    let media_type = parts.next()?.trim();
    if media_type.is_empty() {
        return None;
    }

    let mut params = BTreeMap::new();
    for param in parts {
        // Parameters without '=' carry no information; skip them.
        if let Some((key, value)) = param.split_once('=') {
            params.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    let q = params
        .get("q")
        .and_then(|v| v.parse::<f32>().ok())
        .map(|q| q.clamp(0.0, 1.0))
        .unwrap_or(1.0);

    Some(AcceptEntry {
        media_type: media_type.to_string(),
        params,
        q,
    })
}
