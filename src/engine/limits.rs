// src/engine/limits.rs
//
// Load limits: how many bytes and pixels a source may have, and how long a
// remote fetch may block.

use crate::engine::{MAX_DIMENSION, MAX_PIXELS};
use crate::error::PlaiceholderError;
use std::time::Duration;

const DEFAULT_MAX_BYTES: u64 = 64 * 1024 * 1024; // 64MB input cap
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const STRICT_MAX_BYTES: u64 = 16 * 1024 * 1024; // 16MB input cap
const STRICT_MAX_PIXELS: u64 = 40_000_000; // ~8K x 5K
const STRICT_TIMEOUT: Duration = Duration::from_secs(2);
const LENIENT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadLimits {
    /// Largest accepted encoded source, in bytes
    pub max_bytes: u64,
    /// Largest accepted decoded pixel count; never above `MAX_PIXELS`
    pub max_pixels: u64,
    /// Upper bound for a single remote fetch (connect + body)
    pub timeout: Duration,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_pixels: MAX_PIXELS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LoadLimits {
    pub fn strict() -> Self {
        Self {
            max_bytes: STRICT_MAX_BYTES,
            max_pixels: STRICT_MAX_PIXELS,
            timeout: STRICT_TIMEOUT,
        }
    }

    pub fn lenient() -> Self {
        Self {
            max_bytes: u64::MAX,
            max_pixels: MAX_PIXELS,
            timeout: LENIENT_TIMEOUT,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels.min(MAX_PIXELS);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn enforce_source_len(&self, len: u64) -> Result<(), PlaiceholderError> {
        if len > self.max_bytes {
            return Err(PlaiceholderError::source_too_large(len, self.max_bytes));
        }
        Ok(())
    }

    pub fn enforce_dimensions(&self, width: u32, height: u32) -> Result<(), PlaiceholderError> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(PlaiceholderError::dimension_exceeds_limit(
                width.max(height),
                MAX_DIMENSION,
            ));
        }
        let pixels = width as u64 * height as u64;
        let limit = self.max_pixels.min(MAX_PIXELS);
        if pixels > limit {
            return Err(PlaiceholderError::pixel_count_exceeds_limit(pixels, limit));
        }
        Ok(())
    }
}
