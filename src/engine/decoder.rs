// src/engine/decoder.rs
//
// Decoder operations: detect the format by magic bytes, check dimensions from
// the header, then decode with the image crate.

use crate::engine::bitmap::Bitmap;
use crate::engine::common::{run_with_panic_policy, EngineResult};
use crate::engine::limits::LoadLimits;
use crate::error::PlaiceholderError;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// Detect input format using magic bytes. Returns None if unknown.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Check if image dimensions are within the given limits.
/// Returns an error if the image is too large (potential decompression bomb).
pub fn check_dimensions(width: u32, height: u32, limits: &LoadLimits) -> EngineResult<()> {
    limits.enforce_dimensions(width, height)
}

/// Unified decode entrypoint:
/// - Detect format once (magic bytes)
/// - Read the header and reject oversized images before allocating pixels
/// - Decode and pair the pixels with the detected format
pub fn decode_image(bytes: &[u8], limits: &LoadLimits) -> EngineResult<Bitmap> {
    let format = detect_format(bytes)
        .ok_or_else(|| PlaiceholderError::source_undecodable("unrecognized image format"))?;

    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| PlaiceholderError::source_undecodable(format!("failed to read header: {e}")))?;
    check_dimensions(width, height, limits)?;

    let image = run_with_panic_policy("decode:image", || {
        image::load_from_memory_with_format(bytes, format)
            .map_err(|e| PlaiceholderError::source_undecodable(format!("decode failed: {e}")))
    })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(PlaiceholderError::source_undecodable("image has no pixels"));
    }

    tracing::debug!(
        format = ?format,
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded source"
    );

    Ok(Bitmap::new(image, format))
}
