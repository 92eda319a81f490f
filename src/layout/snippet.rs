//! Splitting a text block into draw meshes that fit 16-bit indices
//!
//! Glyphs are never split. A snippet closes before the glyph that would
//! bring its vertex count to 65535 or more, so every snippet indexes at
//! most 65534 vertices.

use super::GlyphLine;
use crate::error::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Vertices one snippet may hold
pub const MAX_SNIPPET_VERTICES: usize = u16::MAX as usize - 1;

/// A glyph's place in the block: line number, then index within the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlyphPosition {
    pub line: usize,
    pub index: usize,
}

impl GlyphPosition {
    pub fn new(line: usize, index: usize) -> Self {
        Self { line, index }
    }
}

impl Ord for GlyphPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for GlyphPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A contiguous glyph range packed into one draw mesh.
/// `start` is inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSnippet {
    pub start: GlyphPosition,
    pub end: GlyphPosition,
    pub vertex_count: usize,
    pub index_count: usize,
    /// Vertices of all earlier snippets
    pub vertex_offset: usize,
}

impl TextSnippet {
    pub fn contains(&self, position: GlyphPosition) -> bool {
        self.start <= position && position < self.end
    }

    /// Every glyph position in the snippet, in text order
    pub fn positions<'a>(&self, lines: &'a [GlyphLine]) -> impl Iterator<Item = GlyphPosition> + 'a {
        let snippet = *self;
        lines
            .iter()
            .enumerate()
            .skip(snippet.start.line)
            .take_while(move |(line, _)| *line <= snippet.end.line)
            .flat_map(|(line, glyphs)| (0..glyphs.len()).map(move |index| GlyphPosition::new(line, index)))
            .filter(move |p| snippet.contains(*p))
    }
}

/// Plan the fewest snippets that keep every one within
/// [`MAX_SNIPPET_VERTICES`]. Blank glyphs count no vertices.
///
/// There is always at least one snippet; the last one ends one line past
/// the final line so trailing blank glyphs and empty lines are covered.
pub fn plan_snippets(lines: &[GlyphLine]) -> LayoutResult<Vec<TextSnippet>> {
    let mut snippets = Vec::new();
    let mut start = GlyphPosition::new(0, 0);
    let mut vertices = 0;
    let mut indices = 0;
    let mut offset = 0;

    for (line, glyphs) in lines.iter().enumerate() {
        for (index, glyph) in glyphs.iter().enumerate() {
            if glyph.is_blank() {
                continue;
            }
            let count = glyph.vertex_count();
            if count > MAX_SNIPPET_VERTICES {
                return Err(LayoutError::CapacityExceeded {
                    code_point: glyph.code_point(),
                    line,
                    index,
                    vertices: count,
                    limit: MAX_SNIPPET_VERTICES,
                });
            }
            if vertices + count > MAX_SNIPPET_VERTICES {
                let here = GlyphPosition::new(line, index);
                snippets.push(TextSnippet {
                    start,
                    end: here,
                    vertex_count: vertices,
                    index_count: indices,
                    vertex_offset: offset,
                });
                offset += vertices;
                start = here;
                vertices = 0;
                indices = 0;
            }
            vertices += count;
            indices += glyph.index_count();
        }
    }

    snippets.push(TextSnippet {
        start,
        end: GlyphPosition::new(lines.len(), 0),
        vertex_count: vertices,
        index_count: indices,
        vertex_offset: offset,
    });
    Ok(snippets)
}
