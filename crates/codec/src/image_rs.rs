//! In-process codec backed by the `image` crate.

use crate::error::{CodecError, CodecResult};
use crate::{ImageCodec, TransformRequest};
use async_trait::async_trait;
use bytes::Bytes;
use darkroom_core::TargetFormat;
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Encoding quality used when the request does not specify one.
const DEFAULT_QUALITY: u8 = 80;

/// AVIF encoder speed. 1 is slowest/best; 10 is fastest.
const AVIF_SPEED: u8 = 4;

/// Codec that decodes, resizes, and re-encodes with the `image` crate.
///
/// Pixel work is CPU-bound, so every transform runs on the blocking
/// thread pool; the calling task only awaits the join handle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageRsCodec;

impl ImageRsCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageCodec for ImageRsCodec {
    async fn transform(&self, request: TransformRequest) -> CodecResult<Bytes> {
        let output = tokio::task::spawn_blocking(move || transform_sync(&request))
            .await
            .map_err(|e| CodecError::Task(e.to_string()))??;
        Ok(Bytes::from(output))
    }

    fn codec_name(&self) -> &'static str {
        "image-rs"
    }
}

fn transform_sync(request: &TransformRequest) -> CodecResult<Vec<u8>> {
    let decoded = image::load_from_memory(&request.bytes)
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    let resized = resize(decoded, request.width, request.height);
    encode(&resized, request.format, request.quality)
}

/// Fit the image within the requested bounds, preserving aspect ratio.
/// With no bounds the image passes through untouched.
fn resize(image: DynamicImage, width: Option<u32>, height: Option<u32>) -> DynamicImage {
    if width.is_none() && height.is_none() {
        return image;
    }
    image.resize(
        width.unwrap_or(u32::MAX),
        height.unwrap_or(u32::MAX),
        FilterType::Lanczos3,
    )
}

fn encode(
    image: &DynamicImage,
    format: TargetFormat,
    quality: Option<u8>,
) -> CodecResult<Vec<u8>> {
    let quality = quality.unwrap_or(DEFAULT_QUALITY).clamp(1, 100);
    let mut output = Cursor::new(Vec::new());

    let result = match format {
        TargetFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut output, quality);
            image.write_with_encoder(encoder)
        }
        // The image crate ships lossless webp encoding only; quality is
        // not applicable.
        TargetFormat::Webp => image.write_to(&mut output, ImageFormat::WebP),
        // PNG is lossless; quality is not applicable.
        TargetFormat::Png => image.write_to(&mut output, ImageFormat::Png),
        TargetFormat::Avif => {
            let encoder = AvifEncoder::new_with_speed_quality(&mut output, AVIF_SPEED, quality);
            image.write_with_encoder(encoder)
        }
    };

    result.map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(output.into_inner())
}
