// src/strategies/css.rs
//
// CSS strategy: one horizontal linear-gradient per pixel row, stacked with
// background-position/background-size so every row covers its own band.
// The first stop of a row has no start position and is written `<color> <end>%`
// with a single separating space.

use crate::engine::{extract, format_decimal, Bitmap, ColorSample, PixelGrid};
use crate::error::Result;
use crate::options::{ColorMode, CssFormat};

/// The four background properties of a CSS placeholder, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssProperties {
    pub image: String,
    pub position: String,
    pub size: String,
    pub repeat: String,
}

/// A CSS placeholder rendered in one [`CssFormat`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CssPlaceholder {
    /// `background-image:…;background-position:…;…;`
    Style(String),
    /// Custom properties: `--plaice-image:…;--plaice-position:…;…;`
    Properties(String),
    Array(CssProperties),
}

impl CssPlaceholder {
    /// The rendered string, or `None` for [`CssPlaceholder::Array`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CssPlaceholder::Style(s) | CssPlaceholder::Properties(s) => Some(s.as_str()),
            CssPlaceholder::Array(_) => None,
        }
    }

    pub fn as_properties(&self) -> Option<&CssProperties> {
        match self {
            CssPlaceholder::Array(props) => Some(props),
            _ => None,
        }
    }
}

impl CssProperties {
    /// `(property name, value)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("background-image", self.image.as_str()),
            ("background-position", self.position.as_str()),
            ("background-size", self.size.as_str()),
            ("background-repeat", self.repeat.as_str()),
        ]
    }

    pub fn render(&self, format: CssFormat) -> CssPlaceholder {
        match format {
            CssFormat::Style => CssPlaceholder::Style(self.declarations(|name| name.to_string())),
            CssFormat::Properties => CssPlaceholder::Properties(self.declarations(|name| {
                format!("--plaice-{}", name.trim_start_matches("background-"))
            })),
            CssFormat::Array => CssPlaceholder::Array(self.clone()),
        }
    }

    fn declarations(&self, rename: impl Fn(&str) -> String) -> String {
        self.entries()
            .into_iter()
            .map(|(name, value)| format!("{}:{};", rename(name), value))
            .collect()
    }
}

/// Build the background properties for `bitmap`, alpha preserved.
pub fn encode(bitmap: &Bitmap) -> Result<CssProperties> {
    let grid = extract(bitmap, ColorMode::Rgba)?;
    Ok(from_grid(&grid))
}

pub(crate) fn from_grid(grid: &PixelGrid) -> CssProperties {
    let rows = grid.height();

    let image = grid
        .rows()
        .iter()
        .map(|row| format!("linear-gradient(90deg, {})", gradient_stops(row)))
        .collect::<Vec<_>>()
        .join(",");

    let position = (0..rows)
        .map(|i| {
            if i == 0 {
                "0 0".to_string()
            } else {
                format!("0 {}%", percent(i, rows - 1))
            }
        })
        .collect::<Vec<_>>()
        .join(",");

    CssProperties {
        image,
        position,
        size: format!("100% {}%", percent(1, rows)),
        repeat: "no-repeat".to_string(),
    }
}

fn gradient_stops(row: &[ColorSample]) -> String {
    let count = row.len();
    row.iter()
        .enumerate()
        .map(|(i, sample)| {
            let end = percent(i + 1, count);
            if i == 0 {
                // No start position, and no doubled space in its place.
                format!("{} {end}%", sample.css_color())
            } else {
                format!("{} {}% {end}%", sample.css_color(), percent(i, count))
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// `numerator / denominator` as a percentage with at most two decimals.
fn percent(numerator: usize, denominator: usize) -> String {
    format_decimal(numerator as f64 / denominator as f64 * 100.0)
}
