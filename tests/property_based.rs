use image::{DynamicImage, ImageFormat, RgbaImage};
use plaiceholder::engine::{calc_fit_dimensions, extract, Bitmap, ColorSample, PixelGrid};
use plaiceholder::strategies::{blurhash, css, svg};
use plaiceholder::{ColorMode, PlaceholderOptions};
use proptest::prelude::*;
use std::collections::HashSet;

fn bitmap_strategy() -> impl Strategy<Value = Bitmap> {
    (1u32..=12, 1u32..=12)
        .prop_flat_map(|(w, h)| {
            (
                Just(w),
                Just(h),
                prop::collection::vec(any::<u8>(), (w * h * 4) as usize),
            )
        })
        .prop_map(|(w, h, pixels)| {
            let img = RgbaImage::from_raw(w, h, pixels).unwrap();
            Bitmap::new(DynamicImage::ImageRgba8(img), ImageFormat::Png)
        })
}

fn grid_strategy() -> impl Strategy<Value = PixelGrid> {
    (1usize..=8, 1usize..=8)
        .prop_flat_map(|(w, h)| prop::collection::vec(any::<(u8, u8, u8)>(), w * h).prop_map(move |px| (w, px)))
        .prop_map(|(w, px)| {
            let rows = px
                .chunks(w)
                .map(|row| row.iter().map(|&(r, g, b)| ColorSample::rgb(r, g, b)).collect())
                .collect();
            PixelGrid::from_rows(rows).unwrap()
        })
}

proptest! {
    #[test]
    fn prop_fit_never_exceeds_size_or_enlarges(
        w in 1u32..=10_000,
        h in 1u32..=10_000,
        size in 4u32..=64,
    ) {
        let (fw, fh) = calc_fit_dimensions(w, h, size);
        prop_assert!(fw >= 1 && fh >= 1);
        prop_assert!(fw <= size && fh <= size);
        prop_assert!(fw <= w && fh <= h);
        prop_assert!(fw == size || fh == size || (fw, fh) == (w, h));
    }

    #[test]
    fn prop_effective_size_in_range(size in any::<u32>()) {
        let effective = PlaceholderOptions::new().with_size(size).effective_size();
        prop_assert!((4..=64).contains(&effective));
    }

    #[test]
    fn prop_grid_matches_bitmap(bitmap in bitmap_strategy()) {
        let grid = extract(&bitmap, ColorMode::Rgba).unwrap();
        prop_assert_eq!(grid.width() as u32, bitmap.width());
        prop_assert_eq!(grid.height() as u32, bitmap.height());
        for (_, _, sample) in grid.iter() {
            let a = sample.a.unwrap();
            prop_assert!((0.0..=1.0).contains(&a));
        }
    }

    #[test]
    fn prop_css_has_one_gradient_and_stop_per_pixel(bitmap in bitmap_strategy()) {
        let props = css::encode(&bitmap).unwrap();
        let (w, h) = bitmap.dimensions();
        prop_assert_eq!(props.image.matches("linear-gradient(").count() as u32, h);
        prop_assert_eq!(props.image.matches("rgba(").count() as u32, w * h);
        prop_assert_eq!(props.image.matches(" 100%)").count() as u32, h);
        prop_assert_eq!(props.position.split(',').count() as u32, h);
        prop_assert!(props.position.starts_with("0 0"));
        if h > 1 {
            prop_assert!(props.position.ends_with("0 100%"));
        }
        prop_assert_eq!(props.repeat.as_str(), "no-repeat");
    }

    #[test]
    fn prop_svg_covers_grid_exactly_once(bitmap in bitmap_strategy()) {
        let doc = svg::document(&bitmap).unwrap();
        let rendered = doc.render(false);
        let (w, h) = bitmap.dimensions();

        let coords: HashSet<(String, String)> = rendered
            .split("<rect ")
            .skip(1)
            .map(|rect| {
                let x = rect.split(" x=\"").nth(1).unwrap().split('"').next().unwrap().to_string();
                let y = rect.split(" y=\"").nth(1).unwrap().split('"').next().unwrap().to_string();
                (x, y)
            })
            .collect();
        prop_assert_eq!(coords.len() as u32, w * h);
        prop_assert_eq!(rendered.matches("<rect ").count() as u32, w * h);
    }

    #[test]
    fn prop_blurhash_length_and_alphabet(
        grid in grid_strategy(),
        cx in 1u32..=9,
        cy in 1u32..=9,
    ) {
        let hash = blurhash::encode_with_components(&grid, cx, cy).unwrap();
        prop_assert_eq!(hash.len() as u32, 6 + 2 * (cx * cy - 1));
        prop_assert!(hash.is_ascii());
    }
}
