// src/strategies/blurhash.rs
//
// Blurhash strategy: DCT components of the pixel grid packed into base 83.
// See https://blurha.sh/ for the format.

use crate::engine::PixelGrid;
use crate::error::{PlaiceholderError, Result};
use std::f64::consts::PI;

/// Components used by [`encode`] on each axis.
pub const DEFAULT_COMPONENTS: (u32, u32) = (4, 4);

const BASE83_CHARS: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz#$%*+,-.:;=?@[]^_{|}~";

/// Encode a grid with 4×4 components.
pub fn encode(grid: &PixelGrid) -> Result<String> {
    encode_with_components(grid, DEFAULT_COMPONENTS.0, DEFAULT_COMPONENTS.1)
}

/// Encode a grid with `components_x`×`components_y` components (1–9 each).
/// Alpha is ignored.
pub fn encode_with_components(
    grid: &PixelGrid,
    components_x: u32,
    components_y: u32,
) -> Result<String> {
    for (name, value) in [("components_x", components_x), ("components_y", components_y)] {
        if !(1..=9).contains(&value) {
            return Err(PlaiceholderError::invalid_argument(
                name,
                value.to_string(),
                "must be between 1 and 9",
            ));
        }
    }

    let width = grid.width();
    let height = grid.height();
    let linear: Vec<[f64; 3]> = grid
        .iter()
        .map(|(_, _, sample)| sample.channels().map(srgb_to_linear))
        .collect();

    let cos_x = cosine_table(components_x as usize, width);
    let cos_y = cosine_table(components_y as usize, height);
    let scale = 1.0 / (width * height) as f64;

    let mut factors = Vec::with_capacity((components_x * components_y) as usize);
    for j in 0..components_y as usize {
        for i in 0..components_x as usize {
            let normalisation = if i == 0 && j == 0 { 1.0 } else { 2.0 };
            let mut sum = [0.0f64; 3];
            for y in 0..height {
                for x in 0..width {
                    let basis = normalisation * cos_x[i][x] * cos_y[j][y];
                    let pixel = linear[y * width + x];
                    for c in 0..3 {
                        sum[c] += basis * pixel[c];
                    }
                }
            }
            factors.push(sum.map(|v| v * scale));
        }
    }

    let (dc, ac) = factors.split_at(1);
    let mut hash = String::with_capacity(4 + 2 * ac.len() + 2);

    let size_flag = (components_x - 1) + (components_y - 1) * 9;
    encode_base83(size_flag, 1, &mut hash);

    let maximum_value = if ac.is_empty() {
        encode_base83(0, 1, &mut hash);
        1.0
    } else {
        let actual_max = ac
            .iter()
            .flat_map(|f| f.iter())
            .fold(0.0f64, |acc, v| acc.max(v.abs()));
        let quantised_max = (actual_max * 166.0 - 0.5).floor().clamp(0.0, 82.0) as u32;
        encode_base83(quantised_max, 1, &mut hash);
        (quantised_max + 1) as f64 / 166.0
    };

    encode_base83(encode_dc(dc[0]), 4, &mut hash);
    for factor in ac {
        encode_base83(encode_ac(*factor, maximum_value), 2, &mut hash);
    }

    tracing::trace!(components_x, components_y, hash = %hash, "encoded blurhash");
    Ok(hash)
}

/// `table[component][position] = cos(π · component · position / len)`
fn cosine_table(components: usize, len: usize) -> Vec<Vec<f64>> {
    (0..components)
        .map(|c| {
            (0..len)
                .map(|p| (PI * c as f64 * p as f64 / len as f64).cos())
                .collect()
        })
        .collect()
}

fn encode_dc([r, g, b]: [f64; 3]) -> u32 {
    (linear_to_srgb(r) << 16) + (linear_to_srgb(g) << 8) + linear_to_srgb(b)
}

fn encode_ac(factor: [f64; 3], maximum_value: f64) -> u32 {
    let [r, g, b] = factor.map(|v| {
        (sign_pow(v / maximum_value, 0.5) * 9.0 + 9.5)
            .floor()
            .clamp(0.0, 18.0) as u32
    });
    r * 19 * 19 + g * 19 + b
}

fn srgb_to_linear(value: u8) -> f64 {
    let v = value as f64 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(value: f64) -> u32 {
    let v = value.clamp(0.0, 1.0);
    if v <= 0.003_130_8 {
        (v * 12.92 * 255.0 + 0.5) as u32
    } else {
        ((1.055 * v.powf(1.0 / 2.4) - 0.055) * 255.0 + 0.5) as u32
    }
}

fn sign_pow(value: f64, exp: f64) -> f64 {
    value.abs().powf(exp).copysign(value)
}

fn encode_base83(value: u32, length: u32, out: &mut String) {
    for i in 1..=length {
        let digit = (value / 83u32.pow(length - i)) % 83;
        out.push(BASE83_CHARS[digit as usize] as char);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ColorSample;

    fn solid_grid(width: usize, height: usize, r: u8, g: u8, b: u8) -> PixelGrid {
        PixelGrid::from_rows(vec![vec![ColorSample::rgb(r, g, b); width]; height]).unwrap()
    }

    fn gradient_grid(width: usize, height: usize) -> PixelGrid {
        let rows = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| ColorSample::rgb((x * 60) as u8, (y * 60) as u8, 120))
                    .collect()
            })
            .collect();
        PixelGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn base83_alphabet_has_83_symbols() {
        assert_eq!(BASE83_CHARS.len(), 83);
        let mut out = String::new();
        encode_base83(82, 1, &mut out);
        encode_base83(83, 2, &mut out);
        assert_eq!(out, "~10");
    }

    #[test]
    fn black_image_has_known_hash() {
        let hash = encode(&solid_grid(4, 4, 0, 0, 0)).unwrap();
        assert_eq!(hash, format!("U00000{}", "fQ".repeat(15)));
    }

    #[test]
    fn solid_color_round_trips_through_dc() {
        let hash = encode(&solid_grid(4, 3, 255, 255, 255)).unwrap();
        assert_eq!(&hash[2..6], "TSUA");
    }

    #[test]
    fn length_and_header_follow_component_count() {
        let grid = gradient_grid(4, 4);

        let hash = encode(&grid).unwrap();
        assert_eq!(hash.len(), 6 + 2 * 15);
        assert!(hash.starts_with('U'));

        let hash = encode_with_components(&grid, 4, 3).unwrap();
        assert_eq!(hash.len(), 6 + 2 * 11);
        assert!(hash.starts_with('L'));

        let hash = encode_with_components(&grid, 1, 1).unwrap();
        assert_eq!(hash.len(), 6);
        assert!(hash.starts_with("00"));
    }

    #[test]
    fn output_uses_only_base83_symbols() {
        let hash = encode(&gradient_grid(5, 3)).unwrap();
        assert!(hash.bytes().all(|b| BASE83_CHARS.contains(&b)));
    }

    #[test]
    fn encoding_is_deterministic() {
        let grid = gradient_grid(4, 2);
        assert_eq!(encode(&grid).unwrap(), encode(&grid).unwrap());
    }

    #[test]
    fn alpha_is_ignored() {
        let opaque = solid_grid(2, 2, 10, 20, 30);
        let translucent =
            PixelGrid::from_rows(vec![vec![ColorSample::rgba(10, 20, 30, 0.3); 2]; 2]).unwrap();
        assert_eq!(encode(&opaque).unwrap(), encode(&translucent).unwrap());
    }

    #[test]
    fn rejects_out_of_range_components() {
        let grid = solid_grid(2, 2, 0, 0, 0);
        for (x, y) in [(0, 4), (4, 0), (10, 4), (4, 10)] {
            let err = encode_with_components(&grid, x, y).unwrap_err();
            assert!(matches!(err, PlaiceholderError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn srgb_conversion_round_trips_every_byte() {
        for value in 0..=255u8 {
            assert_eq!(linear_to_srgb(srgb_to_linear(value)), value as u32);
        }
    }
}
