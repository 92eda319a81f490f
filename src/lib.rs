//! Meshtext
//!
//! Constrained Delaunay triangulation of glyph outlines and assembly of
//! text blocks into 16-bit indexed meshes with five UV channels.
pub mod core;
pub mod error;
pub mod font_source;
pub mod geometry;
pub mod glyph;
pub mod layout;
pub mod logging;
pub mod rendering;
