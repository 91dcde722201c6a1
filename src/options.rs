// src/options.rs
//
// Placeholder options and the small closed enums that select strategy behaviour.
// These are cheap to create and copy - the expensive work happens in the strategies.

use crate::engine::{DEFAULT_SIZE, SIZE_MAX, SIZE_MIN};
use crate::error::PlaiceholderError;
use std::fmt;
use std::str::FromStr;

/// Options accepted when creating a [`Placeholder`](crate::Placeholder).
///
/// `size` is the edge of the square the source is fitted into before any
/// strategy runs. Out-of-range values are clamped to `4..=64`; `None` means 4.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaceholderOptions {
    pub size: Option<u32>,
}

impl PlaceholderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Requested size clamped to `[SIZE_MIN, SIZE_MAX]`.
    pub fn effective_size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_SIZE).clamp(SIZE_MIN, SIZE_MAX)
    }
}

/// How the CSS strategy renders its four background properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CssFormat {
    /// `background-image:…;background-position:…;…` for a `style` attribute
    #[default]
    Style,
    /// `--plaice-image:…;--plaice-position:…;…` custom properties
    Properties,
    /// The four properties as structured data
    Array,
}

impl CssFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Properties => "properties",
            Self::Array => "array",
        }
    }
}

impl FromStr for CssFormat {
    type Err = PlaiceholderError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode.trim().to_lowercase().as_str() {
            "style" => Ok(Self::Style),
            "properties" => Ok(Self::Properties),
            "array" => Ok(Self::Array),
            other => Err(PlaiceholderError::invalid_output_mode(other.to_string())),
        }
    }
}

impl fmt::Display for CssFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which channels the pixel grid keeps for each sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// r, g, b plus alpha when the bitmap carries an alpha channel
    #[default]
    Rgba,
    /// r, g, b only
    Rgb,
}

/// The four placeholder strategies; used to address cache slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Base64,
    Blurhash,
    Css,
    Svg,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Self::Base64, Self::Blurhash, Self::Css, Self::Svg];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Blurhash => "blurhash",
            Self::Css => "css",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
