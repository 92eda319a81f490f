//! Per-glyph triangle meshes and their cache

pub mod cache;
pub mod mesh;

pub use cache::{FontStyle, GlyphCache, GlyphKey};
pub use mesh::{GlyphMesh, TriangleMesh, MAX_GLYPH_VERTICES};
