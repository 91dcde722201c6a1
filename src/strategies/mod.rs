// src/strategies/mod.rs
//
// The four placeholder strategies. Each one takes a bitmap (or the pixel grid
// extracted from it) and returns a compact textual artifact.

pub mod base64;
pub mod blurhash;
pub mod css;
pub mod svg;

pub use css::{CssPlaceholder, CssProperties};
pub use svg::SvgDocument;
