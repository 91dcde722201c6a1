// src/engine/encoder.rs
//
// Encoder operations: serialize a bitmap in the format it was decoded from.
// PNG output is recompressed losslessly with oxipng.

use crate::engine::bitmap::Bitmap;
use crate::engine::common::{run_with_panic_policy, EngineResult};
use crate::error::PlaiceholderError;
use image::ImageFormat;
use std::io::Cursor;

/// Lowercase format name as used in MIME subtypes (`png`, `jpeg`, `webp`).
pub fn format_name(format: ImageFormat) -> String {
    format!("{:?}", format).to_lowercase()
}

/// Encode `bitmap` in its own format.
pub fn encode_bitmap(bitmap: &Bitmap) -> EngineResult<Vec<u8>> {
    let format = bitmap.format();
    let name = format_name(format);

    let encoded = run_with_panic_policy("encode:image", || {
        let mut buf = Vec::new();
        bitmap
            .image()
            .write_to(&mut Cursor::new(&mut buf), format)
            .map_err(|e| PlaiceholderError::encode_failed(name.clone(), e.to_string()))?;
        Ok(buf)
    })?;

    if format == ImageFormat::Png {
        return optimize_png(encoded);
    }
    Ok(encoded)
}

fn optimize_png(png: Vec<u8>) -> EngineResult<Vec<u8>> {
    run_with_panic_policy("encode:oxipng", || {
        let mut options = oxipng::Options::from_preset(4);
        // Placeholders never need ancillary chunks
        options.strip = oxipng::StripChunks::Safe;

        oxipng::optimize_from_memory(&png, &options).map_err(|e| {
            PlaiceholderError::encode_failed("png", format!("oxipng optimization failed: {e}"))
        })
    })
}
