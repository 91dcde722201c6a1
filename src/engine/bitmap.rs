// src/engine/bitmap.rs
//
// Bitmap: a decoded image together with the encoded format it came from.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// A decoded image plus the format it was (and will again be) encoded in.
///
/// Cloning is a deep copy. Strategies either read a bitmap or consume their own
/// clone, so the working bitmap owned by a [`Placeholder`](crate::Placeholder)
/// is never mutated.
#[derive(Clone, Debug)]
pub struct Bitmap {
    image: DynamicImage,
    format: ImageFormat,
}

impl Bitmap {
    pub fn new(image: DynamicImage, format: ImageFormat) -> Self {
        Self { image, format }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    /// Composite over a white background and drop the alpha channel.
    ///
    /// Transparent pixels become white, not the (usually black) color stored
    /// under zero alpha.
    pub fn without_alpha(self) -> Self {
        if !self.has_alpha() {
            return self;
        }
        let rgba = self.image.to_rgba8();
        let flat = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
        });
        Self {
            image: DynamicImage::ImageRgb8(flat),
            format: self.format,
        }
    }

    /// Replace the pixels while keeping the encoded format.
    pub(crate) fn with_image(self, image: DynamicImage) -> Self {
        Self {
            image,
            format: self.format,
        }
    }
}

/// `c·a + 255·(1 − a)` in 8-bit fixed point, rounded.
fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (channel as u32, alpha as u32);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn without_alpha_composites_over_white_and_keeps_format() {
        let rgba = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 40]));
        let bitmap = Bitmap::new(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
        assert!(bitmap.has_alpha());

        let flat = bitmap.without_alpha();
        assert!(!flat.has_alpha());
        assert_eq!(flat.format(), ImageFormat::Png);
        assert_eq!(flat.dimensions(), (3, 2));
        assert_eq!(flat.image().to_rgb8().get_pixel(0, 0).0, [217, 218, 220]);
    }

    #[test]
    fn without_alpha_turns_transparent_white_and_keeps_opaque() {
        let rgba = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([12, 34, 56, 255])
            }
        });
        let flat = Bitmap::new(DynamicImage::ImageRgba8(rgba), ImageFormat::Png).without_alpha();
        let rgb = flat.image().to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(1, 0).0, [12, 34, 56]);
    }

    #[test]
    fn clones_do_not_alias() {
        let rgba = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255]));
        let original = Bitmap::new(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
        let mut copy = original.clone().into_image();
        if let DynamicImage::ImageRgba8(buf) = &mut copy {
            buf.put_pixel(0, 0, Rgba([9, 9, 9, 9]));
        }
        assert_eq!(original.image().to_rgba8().get_pixel(0, 0).0, [1, 2, 3, 255]);
    }
}
