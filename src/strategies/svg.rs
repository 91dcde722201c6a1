// src/strategies/svg.rs
//
// SVG strategy: one 1×1 rect per pixel inside a viewBox the size of the grid.

use crate::engine::{extract, format_decimal, Bitmap, PixelGrid};
use crate::error::Result;
use crate::options::ColorMode;
use std::fmt::Write;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Declarations added when the SVG is meant to sit centered over its container.
pub const INLINE_STYLE: &str = "position:absolute;top:50%;left:50%;transform-origin:top left;\
                                transform:translate(-50%, -50%);right:0;bottom:0";

/// The rect body of an SVG placeholder, independent of the wrapper styling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SvgDocument {
    width: usize,
    height: usize,
    rects: String,
}

impl SvgDocument {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Wrap the rects in an `<svg>` element.
    pub fn render(&self, inline_styles: bool) -> String {
        let style = if inline_styles {
            format!(" style=\"{INLINE_STYLE}\"")
        } else {
            String::new()
        };
        format!(
            "<svg xmlns=\"{SVG_NS}\"{style} width=\"100%\" height=\"100%\" \
             shapeRendering=\"crispEdges\" preserveAspectRatio=\"none\" \
             viewBox=\"0 0 {} {}\">{}</svg>",
            self.width, self.height, self.rects
        )
    }
}

/// Encode `bitmap` as a complete SVG string.
pub fn encode(bitmap: &Bitmap, inline_styles: bool) -> Result<String> {
    Ok(document(bitmap)?.render(inline_styles))
}

/// Build the rect body for `bitmap`, alpha preserved.
pub fn document(bitmap: &Bitmap) -> Result<SvgDocument> {
    let grid = extract(bitmap, ColorMode::Rgba)?;
    Ok(from_grid(&grid))
}

pub(crate) fn from_grid(grid: &PixelGrid) -> SvgDocument {
    let mut rects = String::with_capacity(grid.width() * grid.height() * 96);
    for (x, y, sample) in grid.iter() {
        // Writing into a String cannot fail.
        let _ = write!(
            rects,
            "<rect fill=\"{}\" fill-opacity=\"{}\" x=\"{x}\" y=\"{y}\" width=\"1\" height=\"1\"/>",
            sample.css_rgb(),
            format_decimal(sample.opacity()),
        );
    }
    SvgDocument {
        width: grid.width(),
        height: grid.height(),
        rects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::collections::HashSet;

    fn rgb_bitmap(width: u32, height: u32) -> Bitmap {
        Bitmap::new(
            DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
                Rgb([(x * 40) as u8, (y * 40) as u8, 200])
            })),
            ImageFormat::Png,
        )
    }

    fn rect_coords(svg: &str) -> Vec<(usize, usize)> {
        svg.split("<rect ")
            .skip(1)
            .map(|rect| {
                let attr = |name: &str| -> usize {
                    let start = rect.find(&format!(" {name}=\"")).unwrap() + name.len() + 3;
                    let end = start + rect[start..].find('"').unwrap();
                    rect[start..end].parse().unwrap()
                };
                (attr("x"), attr("y"))
            })
            .collect()
    }

    #[test]
    fn wrapper_without_inline_styles() {
        let svg = encode(&rgb_bitmap(1, 1), false).unwrap();
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"100%\" \
             shapeRendering=\"crispEdges\" preserveAspectRatio=\"none\" viewBox=\"0 0 1 1\">\
             <rect fill=\"rgb(0,0,200)\" fill-opacity=\"1\" x=\"0\" y=\"0\" width=\"1\" height=\"1\"/>\
             </svg>"
        );
    }

    #[test]
    fn inline_styles_add_style_attribute() {
        let svg = encode(&rgb_bitmap(2, 1), true).unwrap();
        assert!(svg.starts_with(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" style=\"position:absolute;top:50%;left:50%;\
             transform-origin:top left;transform:translate(-50%, -50%);right:0;bottom:0\" width=\"100%\""
        ));
        assert!(svg.contains("viewBox=\"0 0 2 1\""));
    }

    #[test]
    fn one_rect_per_pixel() {
        let svg = encode(&rgb_bitmap(4, 3), false).unwrap();
        let coords = rect_coords(&svg);
        assert_eq!(coords.len(), 12);

        let unique: HashSet<_> = coords.iter().copied().collect();
        assert_eq!(unique.len(), 12);
        assert!(coords.iter().all(|&(x, y)| x < 4 && y < 3));
    }

    #[test]
    fn transparency_is_kept_in_fill_opacity() {
        let bitmap = Bitmap::new(
            DynamicImage::ImageRgba8(RgbaImage::from_fn(3, 1, |x, _| {
                Rgba([5, 6, 7, [0, 128, 255][x as usize]])
            })),
            ImageFormat::Png,
        );
        let svg = encode(&bitmap, false).unwrap();
        assert!(svg.contains("fill=\"rgb(5,6,7)\" fill-opacity=\"0\" x=\"0\""));
        assert!(svg.contains("fill-opacity=\"0.5\" x=\"1\""));
        assert!(svg.contains("fill-opacity=\"1\" x=\"2\""));
    }

    #[test]
    fn document_renders_both_variants_from_one_body() {
        let doc = document(&rgb_bitmap(2, 2)).unwrap();
        assert_eq!((doc.width(), doc.height()), (2, 2));
        let plain = doc.render(false);
        let styled = doc.render(true);
        assert_ne!(plain, styled);
        assert_eq!(styled.replace(&format!(" style=\"{INLINE_STYLE}\""), ""), plain);
    }
}
