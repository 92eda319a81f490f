//! Font sources: where glyph outlines and metrics come from
//!
//! The meshing core never parses font files itself. It asks an
//! [`OutlineSource`] for a glyph's flattened outline and its metrics;
//! [`UfoSource`] is the implementation backed by norad.

pub mod metrics;
pub mod outline;
pub mod ufo;

use crate::error::SourceResult;

pub use metrics::{FontMetrics, GlyphMetrics};
pub use outline::{GlyphOutline, DEFAULT_FLATTEN_TOLERANCE};
pub use ufo::{contour_to_bezpath, UfoSource};

/// A glyph as delivered by a source, outline in design units
#[derive(Debug, Clone, PartialEq)]
pub struct SourceGlyph {
    pub outline: GlyphOutline,
    pub metrics: GlyphMetrics,
}

/// Supplies glyph outlines and metrics per code point and size
pub trait OutlineSource {
    /// Identity of the font, used in glyph cache keys
    fn font_id(&self) -> &str;

    fn font_metrics(&self, font_size: f32) -> FontMetrics;

    /// `Ok(None)` when the font has no glyph for `code_point`
    fn glyph(&self, code_point: char, font_size: f32) -> SourceResult<Option<SourceGlyph>>;
}
