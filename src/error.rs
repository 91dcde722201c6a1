// src/error.rs
//
// Unified error handling for plaiceholder
// Uses thiserror for simple, type-safe error handling
//
// Error Taxonomy:
// - UserError: Invalid argument or output mode, recoverable
// - SourceError: The image could not be located or fetched
// - CodecError: Decode/resize/encode issues
// - ResourceLimit: Byte/dimension/pixel limits
// - InternalBug: Library bugs (should not happen)

use std::borrow::Cow;
use thiserror::Error;

/// Error taxonomy so callers can branch without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Invalid input, recoverable by the caller
    UserError,
    /// Missing, unreadable or unreachable source
    SourceError,
    /// Format/encoding issues
    CodecError,
    /// Byte/dimension/pixel limits
    ResourceLimit,
    /// Library bugs (should not happen)
    InternalBug,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::UserError => "UserError",
            ErrorCategory::SourceError => "SourceError",
            ErrorCategory::CodecError => "CodecError",
            ErrorCategory::ResourceLimit => "ResourceLimit",
            ErrorCategory::InternalBug => "InternalBug",
        }
    }
}

/// plaiceholder error types
#[derive(Debug, Error)]
pub enum PlaiceholderError {
    // Source Errors
    #[error("Source not found: {path}")]
    SourceNotFound { path: Cow<'static, str> },

    #[error("Failed to read source '{path}': {source}")]
    SourceReadFailed {
        path: Cow<'static, str>,
        #[source]
        source: std::io::Error,
    },

    #[error("Source unreachable '{url}': {message}")]
    SourceUnreachable {
        url: Cow<'static, str>,
        message: Cow<'static, str>,
    },

    #[error("Source is not a decodable image: {message}")]
    SourceUndecodable { message: Cow<'static, str> },

    // Size Limit Errors
    #[error("Source is {bytes} bytes, exceeding the limit of {max}")]
    SourceTooLarge { bytes: u64, max: u64 },

    #[error("Image dimension {dimension} exceeds maximum {max}")]
    DimensionExceedsLimit { dimension: u32, max: u32 },

    #[error("Image pixel count {pixels} exceeds maximum {max}")]
    PixelCountExceedsLimit { pixels: u64, max: u64 },

    // Argument Errors
    #[error("Unknown CSS output mode: '{mode}'. Expected style, properties, or array")]
    InvalidOutputMode { mode: Cow<'static, str> },

    #[error("Invalid value for {name}: {value}. {reason}")]
    InvalidArgument {
        name: Cow<'static, str>,
        value: Cow<'static, str>,
        reason: Cow<'static, str>,
    },

    // Codec Errors
    #[error("Resize failed ({source_width}x{source_height} -> {target_width}x{target_height}): {message}")]
    ResizeFailed {
        source_width: u32,
        source_height: u32,
        target_width: u32,
        target_height: u32,
        message: Cow<'static, str>,
    },

    #[error("Failed to encode as {format}: {message}")]
    EncodeFailed {
        format: Cow<'static, str>,
        message: Cow<'static, str>,
    },

    // Internal Errors
    #[error("Malformed pixel grid: {message}")]
    MalformedGrid { message: Cow<'static, str> },

    #[error("Internal error: {message}")]
    InternalPanic { message: Cow<'static, str> },
}

impl Clone for PlaiceholderError {
    fn clone(&self) -> Self {
        match self {
            Self::SourceNotFound { path } => Self::SourceNotFound { path: path.clone() },
            Self::SourceReadFailed { path, source } => Self::SourceReadFailed {
                path: path.clone(),
                source: std::io::Error::new(source.kind(), source.to_string()),
            },
            Self::SourceUnreachable { url, message } => Self::SourceUnreachable {
                url: url.clone(),
                message: message.clone(),
            },
            Self::SourceUndecodable { message } => Self::SourceUndecodable {
                message: message.clone(),
            },
            Self::SourceTooLarge { bytes, max } => Self::SourceTooLarge {
                bytes: *bytes,
                max: *max,
            },
            Self::DimensionExceedsLimit { dimension, max } => Self::DimensionExceedsLimit {
                dimension: *dimension,
                max: *max,
            },
            Self::PixelCountExceedsLimit { pixels, max } => Self::PixelCountExceedsLimit {
                pixels: *pixels,
                max: *max,
            },
            Self::InvalidOutputMode { mode } => Self::InvalidOutputMode { mode: mode.clone() },
            Self::InvalidArgument {
                name,
                value,
                reason,
            } => Self::InvalidArgument {
                name: name.clone(),
                value: value.clone(),
                reason: reason.clone(),
            },
            Self::ResizeFailed {
                source_width,
                source_height,
                target_width,
                target_height,
                message,
            } => Self::ResizeFailed {
                source_width: *source_width,
                source_height: *source_height,
                target_width: *target_width,
                target_height: *target_height,
                message: message.clone(),
            },
            Self::EncodeFailed { format, message } => Self::EncodeFailed {
                format: format.clone(),
                message: message.clone(),
            },
            Self::MalformedGrid { message } => Self::MalformedGrid {
                message: message.clone(),
            },
            Self::InternalPanic { message } => Self::InternalPanic {
                message: message.clone(),
            },
        }
    }
}

// Constructor Helpers
impl PlaiceholderError {
    pub fn source_not_found(path: impl Into<Cow<'static, str>>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    pub fn source_read_failed(path: impl Into<Cow<'static, str>>, source: std::io::Error) -> Self {
        Self::SourceReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn source_unreachable(
        url: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::SourceUnreachable {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn source_undecodable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::SourceUndecodable {
            message: message.into(),
        }
    }

    pub fn source_too_large(bytes: u64, max: u64) -> Self {
        Self::SourceTooLarge { bytes, max }
    }

    pub fn dimension_exceeds_limit(dimension: u32, max: u32) -> Self {
        Self::DimensionExceedsLimit { dimension, max }
    }

    pub fn pixel_count_exceeds_limit(pixels: u64, max: u64) -> Self {
        Self::PixelCountExceedsLimit { pixels, max }
    }

    pub fn invalid_output_mode(mode: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidOutputMode { mode: mode.into() }
    }

    pub fn invalid_argument(
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn resize_failed(
        source_dims: (u32, u32),
        target_dims: (u32, u32),
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::ResizeFailed {
            source_width: source_dims.0,
            source_height: source_dims.1,
            target_width: target_dims.0,
            target_height: target_dims.1,
            message: message.into(),
        }
    }

    pub fn encode_failed(
        format: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::EncodeFailed {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn malformed_grid(message: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedGrid {
            message: message.into(),
        }
    }

    pub fn internal_panic(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InternalPanic {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (caller can fix it)
    ///
    /// Consistent with category():
    /// - UserError, SourceError and ResourceLimit are recoverable
    /// - CodecError and InternalBug are not
    pub fn is_recoverable(&self) -> bool {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::SourceError | ErrorCategory::ResourceLimit => {
                true
            }
            ErrorCategory::CodecError | ErrorCategory::InternalBug => false,
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOutputMode { .. } | Self::InvalidArgument { .. } => {
                ErrorCategory::UserError
            }

            Self::SourceNotFound { .. }
            | Self::SourceReadFailed { .. }
            | Self::SourceUnreachable { .. } => ErrorCategory::SourceError,

            // An undecodable source is a codec failure: retrying the same bytes cannot help.
            Self::SourceUndecodable { .. }
            | Self::ResizeFailed { .. }
            | Self::EncodeFailed { .. } => ErrorCategory::CodecError,

            Self::SourceTooLarge { .. }
            | Self::DimensionExceedsLimit { .. }
            | Self::PixelCountExceedsLimit { .. } => ErrorCategory::ResourceLimit,

            Self::MalformedGrid { .. } | Self::InternalPanic { .. } => ErrorCategory::InternalBug,
        }
    }
}

// Result type alias
pub type Result<T> = std::result::Result<T, PlaiceholderError>;
