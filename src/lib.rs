// lib.rs
//
// plaiceholder: tiny image placeholders for lazy loading.
//
// A source image is decoded once, fitted into a small square and turned into
// any of four artifacts on demand:
// - base64 data URI of the downsampled image
// - Blurhash string
// - CSS layered linear-gradients
// - SVG of 1×1 rects

pub mod engine;
pub mod error;
pub mod options;
pub mod strategies;

pub use engine::{LoadLimits, Placeholder, Source};
pub use error::{ErrorCategory, PlaiceholderError, Result};
pub use options::{ColorMode, CssFormat, PlaceholderOptions, Strategy};
pub use strategies::{CssPlaceholder, CssProperties, SvgDocument};

/// Get library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Image formats the decoder is built with.
pub fn supported_input_formats() -> Vec<String> {
    vec![
        "jpeg".to_string(),
        "jpg".to_string(),
        "png".to_string(),
        "webp".to_string(),
    ]
}
