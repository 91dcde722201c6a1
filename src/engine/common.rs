// src/engine/common.rs
//
// Common utilities shared across engine modules.
// Provides the engine result alias, codec panic containment and number formatting.

use crate::error::PlaiceholderError;
use std::panic::{self, AssertUnwindSafe};

pub type EngineResult<T> = std::result::Result<T, PlaiceholderError>;

/// Run a codec call, turning a panic inside third-party decode/encode code into
/// `InternalPanic` instead of unwinding through the caller.
pub fn run_with_panic_policy<T, F>(stage: &'static str, f: F) -> EngineResult<T>
where
    F: FnOnce() -> EngineResult<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            tracing::error!(stage, %detail, "codec panicked");
            Err(PlaiceholderError::internal_panic(format!("{stage}: {detail}")))
        }
    }
}

/// Round to two decimals and print without trailing zeros (`50`, `33.33`, `0.5`).
///
/// Both the CSS and SVG strategies render percentages and opacities through
/// this so equal inputs always produce byte-identical output.
pub fn format_decimal(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}
