//! Content negotiation against the gateway's producible formats.

use crate::accept::AcceptEntry;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Media types the gateway is willing to negotiate, in preference order.
pub const ALLOWED_ACCEPTS: &[&str] = &[
    "*/*",
    "image/*",
    "image/webp",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/avif",
];

/// Entry types that resolve to the webp fast path when ranked first.
const WEBP_EQUIVALENTS: &[&str] = &["*/*", "image/*", "image/webp"];

/// Output encoding the codec can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetFormat {
    Webp,
    Jpeg,
    Png,
    Avif,
}

impl TargetFormat {
    /// Content type for responses carrying this encoding.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Webp => "image/webp",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Avif => "image/avif",
        }
    }
}

/// Outcome of format selection for a fetched source object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Negotiated {
    /// Serve the stored bytes unmodified.
    Passthrough,
    /// Re-encode through the codec.
    Encode(TargetFormat),
}

/// Which negotiation behavior the gateway runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NegotiationPolicy {
    /// Transcode to the negotiated format, resizing on request.
    ResizeCapable,
    /// Serve stored bytes unmodified; negotiation only confirms the
    /// stored content type is acceptable.
    Passthrough,
}

/// Content negotiation engine, configured with one of the two policies.
#[derive(Clone, Copy, Debug)]
pub struct NegotiationEngine {
    policy: NegotiationPolicy,
}

impl NegotiationEngine {
    /// Create an engine for the given policy.
    pub fn new(policy: NegotiationPolicy) -> Self {
        Self { policy }
    }

    /// The configured policy.
    pub fn policy(&self) -> NegotiationPolicy {
        self.policy
    }

    /// Whether any entry intersects the allowed set.
    ///
    /// An empty entry list means the client accepts everything.
    pub fn is_satisfiable(&self, accepts: &[AcceptEntry]) -> bool {
        accepts.is_empty()
            || accepts
                .iter()
                .any(|a| ALLOWED_ACCEPTS.contains(&a.media_type.as_str()))
    }

    /// Like [`is_satisfiable`](Self::is_satisfiable), but produces the
    /// client-facing error carrying the allowed list.
    pub fn ensure_satisfiable(&self, accepts: &[AcceptEntry]) -> Result<(), CoreError> {
        if self.is_satisfiable(accepts) {
            Ok(())
        } else {
            Err(CoreError::Unsatisfiable {
                allowed: allowed_accepts_list(),
            })
        }
    }

    /// Whether the ranked preferences resolve to the webp fast path.
    ///
    /// Always false under the passthrough policy, which never encodes.
    pub fn prefers_webp(&self, accepts: &[AcceptEntry]) -> bool {
        match self.policy {
            NegotiationPolicy::Passthrough => false,
            NegotiationPolicy::ResizeCapable => {
                accepts.is_empty() || WEBP_EQUIVALENTS.contains(&accepts[0].media_type.as_str())
            }
        }
    }

    /// Whether the preferences accept the given content type, by exact
    /// match or the `*/*` / `image/*` wildcards.
    pub fn accepts_content_type(&self, accepts: &[AcceptEntry], content_type: &str) -> bool {
        accepts.iter().any(|a| {
            matches!(a.media_type.as_str(), "*/*" | "image/*") || a.media_type == content_type
        })
    }

    /// Decide how to serve a fetched object with the given stored type.
    ///
    /// Callers run [`ensure_satisfiable`](Self::ensure_satisfiable) before
    /// any I/O; this re-confirms the negotiated outcome against the
    /// object's actual content type.
    pub fn resolve(
        &self,
        accepts: &[AcceptEntry],
        content_type: &str,
    ) -> Result<Negotiated, CoreError> {
        match self.policy {
            NegotiationPolicy::Passthrough => {
                if accepts.is_empty() || self.accepts_content_type(accepts, content_type) {
                    Ok(Negotiated::Passthrough)
                } else {
                    Err(CoreError::ContentTypeMismatch {
                        content_type: content_type.to_string(),
                    })
                }
            }
            NegotiationPolicy::ResizeCapable => self.resolve_resize(accepts, content_type),
        }
    }

    fn resolve_resize(
        &self,
        accepts: &[AcceptEntry],
        content_type: &str,
    ) -> Result<Negotiated, CoreError> {
        // Stored GIFs bypass the codec to preserve animation whenever the
        // negotiated set admits image/gif, exactly or via wildcard. An
        // explicit webp-first preference still transcodes them.
        if content_type == "image/gif"
            && (accepts.is_empty() || self.accepts_content_type(accepts, content_type))
        {
            return Ok(Negotiated::Passthrough);
        }

        let webp = self.prefers_webp(accepts);

        let rest: Vec<&AcceptEntry> = accepts
            .iter()
            .filter(|a| !WEBP_EQUIVALENTS.contains(&a.media_type.as_str()))
            .collect();

        if !webp && (rest.is_empty() || rest[0].media_type == "image/gif") {
            // The client only offered types this object cannot be served as
            // (e.g. image/gif preferences for a non-GIF object).
            return Err(CoreError::ContentTypeMismatch {
                content_type: content_type.to_string(),
            });
        }

        let format = if webp {
            TargetFormat::Webp
        } else {
            match rest[0].media_type.as_str() {
                "image/jpeg" => TargetFormat::Jpeg,
                "image/png" => TargetFormat::Png,
                "image/avif" => TargetFormat::Avif,
                _ => TargetFormat::Webp,
            }
        };

        Ok(Negotiated::Encode(format))
    }
}

/// The allowed media types quoted and comma-joined for error messages.
pub fn allowed_accepts_list() -> String {
    ALLOWED_ACCEPTS
        .iter()
        .map(|a| format!("'{a}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
