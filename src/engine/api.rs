// src/engine/api.rs
//
// Placeholder structure: the public entry point that ties loading, downsampling
// and the four strategies together.

use crate::engine::bitmap::Bitmap;
use crate::engine::decoder::decode_image;
use crate::engine::grid::extract;
use crate::engine::io::Source;
use crate::engine::limits::LoadLimits;
use crate::engine::pipeline::thumbnail;
use crate::error::Result;
use crate::options::{ColorMode, CssFormat, PlaceholderOptions, Strategy};
use crate::strategies::{self, CssPlaceholder, CssProperties, SvgDocument};
use image::ImageFormat;

/// A decoded image plus lazily computed placeholders.
///
/// Usage:
/// ```no_run
/// use plaiceholder::{CssFormat, Placeholder, PlaceholderOptions};
///
/// let mut placeholder = Placeholder::new("hero.jpg", PlaceholderOptions::new().with_size(8))?;
/// let hash = placeholder.blurhash()?.to_string();
/// let css = placeholder.css(CssFormat::Style)?;
/// # Ok::<(), plaiceholder::PlaiceholderError>(())
/// ```
///
/// Each strategy runs at most once per instance; later calls reuse the cached
/// artifact. Construction fails as a whole: there is no half-loaded placeholder.
#[derive(Debug)]
pub struct Placeholder {
    /// Decoded source, kept for introspection
    source: Bitmap,
    /// Source fitted into `size`×`size`; strategies only read it
    working: Bitmap,
    /// Clamped working size
    size: u32,
    base64: Option<String>,
    blurhash: Option<String>,
    /// Format-independent CSS; rendered per call
    css: Option<CssProperties>,
    /// Rect body; wrapped per call
    svg: Option<SvgDocument>,
}

impl Placeholder {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Load from a local path or an `http(s)` URL with default [`LoadLimits`].
    pub fn new(location: &str, options: PlaceholderOptions) -> Result<Self> {
        Self::from_source(Source::parse(location), options, LoadLimits::default())
    }

    /// Load from encoded image bytes already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, options: PlaceholderOptions) -> Result<Self> {
        Self::from_source(Source::from(bytes.into()), options, LoadLimits::default())
    }

    pub fn from_source(source: Source, options: PlaceholderOptions, limits: LoadLimits) -> Result<Self> {
        let size = options.effective_size();
        tracing::debug!(
            source = %source.describe(),
            remote = source.is_remote(),
            size,
            "creating placeholder"
        );

        let bytes = source.load(&limits)?;
        let decoded = decode_image(bytes.as_ref(), &limits)?;
        // The encoded bytes (possibly a file mapping) are not needed past decode.
        drop(bytes);

        let working = thumbnail(&decoded, size)?;
        Ok(Self {
            source: decoded,
            working,
            size,
            base64: None,
            blurhash: None,
            css: None,
            svg: None,
        })
    }

    // =========================================================================
    // STRATEGIES
    // =========================================================================

    /// `data:image/<format>;base64,…` of the working bitmap.
    pub fn base64(&mut self) -> Result<&str> {
        let uri = match self.base64.take() {
            Some(uri) => {
                trace_cache_hit(Strategy::Base64);
                uri
            }
            None => {
                let uri = strategies::base64::encode(self.working.clone())?;
                tracing::debug!(strategy = "base64", len = uri.len(), "computed placeholder");
                uri
            }
        };
        Ok(self.base64.insert(uri).as_str())
    }

    /// Blurhash of the working bitmap with 4×4 components.
    pub fn blurhash(&mut self) -> Result<&str> {
        let hash = match self.blurhash.take() {
            Some(hash) => {
                trace_cache_hit(Strategy::Blurhash);
                hash
            }
            None => {
                let grid = extract(&self.working, ColorMode::Rgb)?;
                let hash = strategies::blurhash::encode(&grid)?;
                tracing::debug!(strategy = "blurhash", len = hash.len(), "computed placeholder");
                hash
            }
        };
        Ok(self.blurhash.insert(hash).as_str())
    }

    /// Layered-gradient CSS rendered in `format`.
    pub fn css(&mut self, format: CssFormat) -> Result<CssPlaceholder> {
        let properties = match self.css.take() {
            Some(properties) => {
                trace_cache_hit(Strategy::Css);
                properties
            }
            None => {
                let properties = strategies::css::encode(&self.working)?;
                tracing::debug!(
                    strategy = "css",
                    len = properties.image.len(),
                    "computed placeholder"
                );
                properties
            }
        };
        Ok(self.css.insert(properties).render(format))
    }

    /// SVG of 1×1 rects, optionally with centering inline styles.
    pub fn svg(&mut self, inline_styles: bool) -> Result<String> {
        let document = match self.svg.take() {
            Some(document) => {
                trace_cache_hit(Strategy::Svg);
                document
            }
            None => {
                let document = strategies::svg::document(&self.working)?;
                tracing::debug!(
                    strategy = "svg",
                    rects = document.width() * document.height(),
                    "computed placeholder"
                );
                document
            }
        };
        Ok(self.svg.insert(document).render(inline_styles))
    }

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    /// Clamped working size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Dimensions of the working bitmap.
    pub fn dimensions(&self) -> (u32, u32) {
        self.working.dimensions()
    }

    pub fn source_dimensions(&self) -> (u32, u32) {
        self.source.dimensions()
    }

    pub fn format(&self) -> ImageFormat {
        self.source.format()
    }

    /// Whether `strategy` has already been computed.
    pub fn is_cached(&self, strategy: Strategy) -> bool {
        match strategy {
            Strategy::Base64 => self.base64.is_some(),
            Strategy::Blurhash => self.blurhash.is_some(),
            Strategy::Css => self.css.is_some(),
            Strategy::Svg => self.svg.is_some(),
        }
    }
}

fn trace_cache_hit(strategy: Strategy) {
    tracing::trace!(strategy = %strategy, "placeholder cache hit");
}
