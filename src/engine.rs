// src/engine.rs
//
// The core of plaiceholder. A placeholder pipeline that:
// 1. Loads and decodes the source exactly once
// 2. Fits it into a tiny square working bitmap
// 3. Runs each strategy lazily on a private clone of that bitmap
//
// This file is a facade that delegates to the decomposed modules in engine/

// =============================================================================
// SIZE LIMITS
// =============================================================================

/// Smallest working size a placeholder is downsampled to.
pub const SIZE_MIN: u32 = 4;

/// Largest working size a placeholder is downsampled to.
pub const SIZE_MAX: u32 = 64;

/// Working size used when the caller does not ask for one.
pub const DEFAULT_SIZE: u32 = SIZE_MIN;

/// Maximum allowed source dimension (width or height).
/// Larger sources are rejected before decoding to prevent decompression bombs.
pub const MAX_DIMENSION: u32 = 32768;

/// Maximum allowed total source pixels (width * height).
pub const MAX_PIXELS: u64 = 100_000_000;

// =============================================================================
// MODULE DECOMPOSITION
// =============================================================================

mod api;
mod bitmap;
mod common;
mod decoder;
mod encoder;
mod grid;
mod io;
mod limits;
mod pipeline;

pub use api::Placeholder;
pub use bitmap::Bitmap;
pub use common::format_decimal;
pub use decoder::{check_dimensions, decode_image, detect_format};
pub use encoder::{encode_bitmap, format_name};
pub use grid::{extract, ColorSample, PixelGrid};
pub use io::Source;
pub use limits::LoadLimits;
pub use pipeline::{calc_fit_dimensions, fast_resize, thumbnail};
