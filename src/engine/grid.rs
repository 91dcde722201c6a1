// src/engine/grid.rs
//
// PixelGrid: the row-major color samples every grid-based strategy consumes.

use crate::engine::bitmap::Bitmap;
use crate::engine::common::{format_decimal, EngineResult};
use crate::error::PlaiceholderError;
use crate::options::ColorMode;
use image::GenericImageView;
use std::fmt;

/// One sampled pixel.
///
/// `a` is `None` when the sample carries no alpha (the bitmap has no alpha
/// channel, or the grid was extracted with [`ColorMode::Rgb`]). `Some(0.0)` is
/// a fully transparent pixel, not a missing channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<f64>,
}

impl ColorSample {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: Some(a.clamp(0.0, 1.0)),
        }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// CSS functional notation ignoring alpha: `rgb(r,g,b)`.
    pub fn css_rgb(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// `rgba(r,g,b,a)` when alpha is present, otherwise `rgb(r,g,b)`.
    ///
    /// Alpha is rounded to two decimals through [`format_decimal`], so an 8-bit
    /// alpha of 128 prints as `0.5` rather than `0.50196…`.
    pub fn css_color(&self) -> String {
        match self.a {
            Some(a) => format!("rgba({},{},{},{})", self.r, self.g, self.b, format_decimal(a)),
            None => self.css_rgb(),
        }
    }

    /// Opacity to render; samples without alpha are opaque.
    pub fn opacity(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }
}

impl fmt::Display for ColorSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_color())
    }
}

/// Row-major grid of samples, origin top-left. All rows have the same,
/// non-zero length.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    rows: Vec<Vec<ColorSample>>,
}

impl PixelGrid {
    /// Build a grid from rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<ColorSample>>) -> EngineResult<Self> {
        let Some(first) = rows.first() else {
            return Err(PlaiceholderError::malformed_grid("grid has no rows"));
        };
        let width = first.len();
        if width == 0 {
            return Err(PlaiceholderError::malformed_grid("grid rows are empty"));
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(PlaiceholderError::malformed_grid(format!(
                "row {index} has {} samples, expected {width}",
                row.len()
            )));
        }
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<ColorSample>] {
        &self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&ColorSample> {
        self.rows.get(y).and_then(|row| row.get(x))
    }

    /// Samples in row-major order with their `(x, y)` coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &ColorSample)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, sample)| (x, y, sample)))
    }
}

/// Sample every pixel of `bitmap` once, row by row.
pub fn extract(bitmap: &Bitmap, mode: ColorMode) -> EngineResult<PixelGrid> {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(PlaiceholderError::malformed_grid(format!(
            "bitmap is {width}x{height}"
        )));
    }

    let keep_alpha = mode == ColorMode::Rgba && bitmap.has_alpha();
    let image = bitmap.image();

    let rows = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let [r, g, b, a] = image.get_pixel(x, y).0;
                    if keep_alpha {
                        ColorSample::rgba(r, g, b, a as f64 / 255.0)
                    } else {
                        ColorSample::rgb(r, g, b)
                    }
                })
                .collect()
        })
        .collect();

    let grid = PixelGrid::from_rows(rows)?;
    tracing::trace!(
        width = grid.width(),
        height = grid.height(),
        alpha = keep_alpha,
        "extracted pixel grid"
    );
    Ok(grid)
}
