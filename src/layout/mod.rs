//! Text block layout
//!
//! Turns lines of glyph meshes into draw-ready snippets with five UV
//! channels, honouring the 16-bit index limit.

pub mod alignment;
pub mod assembler;
pub mod channels;
pub mod line_metrics;
pub mod snippet;

use crate::glyph::GlyphMesh;
use std::sync::Arc;

/// One line of shared glyph meshes
pub type GlyphLine = Vec<Arc<GlyphMesh>>;

pub use alignment::{HAlign, VAlign};
pub use assembler::{LayoutOptions, MeshSnippet, TextBlockMesh, TextLayout};
pub use channels::{block_uv, character_uv, line_uv, BlockFrame};
pub use line_metrics::{BlockMetrics, LineMetrics};
pub use snippet::{plan_snippets, GlyphPosition, TextSnippet, MAX_SNIPPET_VERTICES};
