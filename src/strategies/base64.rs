// src/strategies/base64.rs
//
// Base64 strategy: the downsampled bitmap itself, encoded as a data URI.

use crate::engine::{encode_bitmap, format_name, Bitmap};
use crate::error::Result;
use base64::{engine::general_purpose, Engine as _};

/// Encode `bitmap` as `data:image/<format>;base64,<payload>`.
///
/// Alpha is composited over white before encoding; the payload is always opaque.
pub fn encode(bitmap: Bitmap) -> Result<String> {
    let flat = bitmap.without_alpha();
    let bytes = encode_bitmap(&flat)?;
    Ok(format!(
        "data:image/{};base64,{}",
        format_name(flat.format()),
        general_purpose::STANDARD.encode(bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    fn decode_payload(uri: &str) -> DynamicImage {
        let (_, payload) = uri.split_once(";base64,").unwrap();
        let bytes = general_purpose::STANDARD.decode(payload).unwrap();
        image::load_from_memory(&bytes).unwrap()
    }

    #[test]
    fn png_bitmap_becomes_png_data_uri() {
        let bitmap = Bitmap::new(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 2, Rgba([250, 0, 0, 255]))),
            ImageFormat::Png,
        );
        let uri = encode(bitmap).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        let decoded = decode_payload(&uri);
        assert_eq!((decoded.width(), decoded.height()), (4, 2));
        assert!(!decoded.color().has_alpha());
        assert_eq!(decoded.to_rgb8().get_pixel(3, 1).0, [250, 0, 0]);
    }

    #[test]
    fn jpeg_bitmap_uses_jpeg_subtype() {
        let bitmap = Bitmap::new(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]))),
            ImageFormat::Jpeg,
        );
        let uri = encode(bitmap).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        let decoded = decode_payload(&uri);
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }
}
