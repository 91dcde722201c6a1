#![no_main]

use arbitrary::Arbitrary;
use image::{DynamicImage, ImageFormat, RgbaImage};
use libfuzzer_sys::fuzz_target;
use plaiceholder::engine::{extract, Bitmap};
use plaiceholder::strategies::{blurhash, css, svg};
use plaiceholder::ColorMode;

#[derive(Arbitrary, Debug)]
struct Input {
    width: u8,
    height: u8,
    components_x: u8,
    components_y: u8,
    pixels: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let width = (input.width % 16) as u32 + 1;
    let height = (input.height % 16) as u32 + 1;
    let needed = (width * height * 4) as usize;
    if input.pixels.len() < needed {
        return;
    }

    let Some(img) = RgbaImage::from_raw(width, height, input.pixels[..needed].to_vec()) else {
        return;
    };
    let bitmap = Bitmap::new(DynamicImage::ImageRgba8(img), ImageFormat::Png);

    let grid = extract(&bitmap, ColorMode::Rgb).unwrap();
    let cx = (input.components_x % 9) as u32 + 1;
    let cy = (input.components_y % 9) as u32 + 1;
    let hash = blurhash::encode_with_components(&grid, cx, cy).unwrap();
    assert_eq!(hash.len() as u32, 6 + 2 * (cx * cy - 1));

    let props = css::encode(&bitmap).unwrap();
    assert_eq!(props.position.split(',').count() as u32, height);

    let doc = svg::document(&bitmap).unwrap();
    assert_eq!(doc.render(true).matches("<rect ").count() as u32, width * height);
});
