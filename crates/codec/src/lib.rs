//! Pixel codec abstraction for darkroom.
//!
//! The gateway treats re-encoding as an opaque transform behind the
//! [`ImageCodec`] trait; [`ImageRsCodec`] is the in-process
//! implementation backed by the `image` crate.

pub mod error;
pub mod image_rs;

pub use error::{CodecError, CodecResult};
pub use image_rs::ImageRsCodec;

use async_trait::async_trait;
use bytes::Bytes;
use darkroom_core::TargetFormat;

/// A single transform invocation.
///
/// `width`/`height`/`quality` are left unset when the request did not
/// specify them; the codec chooses its defaults.
#[derive(Clone, Debug)]
pub struct TransformRequest {
    /// Source image bytes in their stored encoding.
    pub bytes: Bytes,
    /// Output encoding to produce.
    pub format: TargetFormat,
    /// Bounding width in pixels.
    pub width: Option<u32>,
    /// Bounding height in pixels.
    pub height: Option<u32>,
    /// Encoding quality in [1, 100], for formats that have one.
    pub quality: Option<u8>,
}

/// Opaque image transform collaborator.
#[async_trait]
pub trait ImageCodec: Send + Sync + 'static {
    /// Decode, optionally resize, and re-encode an image.
    async fn transform(&self, request: TransformRequest) -> CodecResult<Bytes>;

    /// Get the name of this codec, used for logging.
    fn codec_name(&self) -> &'static str;
}
