//! Text block assembly
//!
//! Walks the glyph lines once per snippet, translating each glyph's
//! vertices by the pen position and the alignment offsets and deriving the
//! per-character, per-line and per-block texture channels. The pen carries
//! over from one snippet to the next. Buffers are sized from the snippet
//! plan up front and never grow while they are filled.

use super::alignment::{HAlign, VAlign};
use super::channels::{block_uv, character_uv, line_uv, BlockFrame};
use super::line_metrics::BlockMetrics;
use super::snippet::{plan_snippets, GlyphPosition, TextSnippet, MAX_SNIPPET_VERTICES};
use super::GlyphLine;
use crate::error::{LayoutError, LayoutResult};
use crate::font_source::FontMetrics;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Alignment and spacing applied to a text block
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Added to every glyph's advance, in design units
    pub kerning: f32,
}

/// One draw mesh of a text block
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSnippet {
    /// Position of this mesh among the block's meshes
    pub draw_order: usize,
    pub range: TextSnippet,
    pub positions: Vec<[f32; 3]>,
    /// Raw outline coordinates, copied from the glyph
    pub uv1: Vec<[f32; 2]>,
    /// Contour and curve markers, copied from the glyph
    pub uv2: Vec<[f32; 2]>,
    /// Position within the glyph's ink box
    pub uv3: Vec<[f32; 2]>,
    /// Position within the line
    pub uv4: Vec<[f32; 2]>,
    /// Position within the block
    pub uv5: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl MeshSnippet {
    fn with_capacity(draw_order: usize, range: TextSnippet) -> Self {
        let vertices = range.vertex_count;
        Self {
            draw_order,
            range,
            positions: Vec::with_capacity(vertices),
            uv1: Vec::with_capacity(vertices),
            uv2: Vec::with_capacity(vertices),
            uv3: Vec::with_capacity(vertices),
            uv4: Vec::with_capacity(vertices),
            uv5: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(range.index_count),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// A laid out text block
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlockMesh {
    pub snippets: Vec<MeshSnippet>,
    pub width: f32,
    pub height: f32,
    pub line_widths: Vec<f32>,
}

impl TextBlockMesh {
    pub fn vertex_count(&self) -> usize {
        self.snippets.iter().map(MeshSnippet::vertex_count).sum()
    }
}

/// Glyph lines plus everything needed to lay them out.
///
/// Layout is pure: change the lines or options and call
/// [`TextLayout::assemble`] again for a fresh result.
#[derive(Debug, Clone)]
pub struct TextLayout {
    lines: Vec<GlyphLine>,
    font: FontMetrics,
    options: LayoutOptions,
}

/// Pen state carried across glyphs and snippets
#[derive(Debug, Clone, Copy)]
struct Pen {
    line: usize,
    /// Horizontal advance so far on the line, design units
    x: f32,
    /// Distance of the line's baseline below the block top, pixels
    y: f32,
}

impl TextLayout {
    pub fn new(lines: Vec<GlyphLine>, font: FontMetrics, options: LayoutOptions) -> Self {
        Self {
            lines,
            font,
            options,
        }
    }

    pub fn lines(&self) -> &[GlyphLine] {
        &self.lines
    }

    pub fn font(&self) -> &FontMetrics {
        &self.font
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn set_lines(&mut self, lines: Vec<GlyphLine>) {
        self.lines = lines;
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
    }

    pub fn set_font(&mut self, font: FontMetrics) {
        self.font = font;
    }

    pub fn measure(&self) -> BlockMetrics {
        BlockMetrics::measure(&self.lines, &self.font, self.options.kerning)
    }

    /// Measure, plan snippets and build every snippet's mesh
    pub fn assemble(&self) -> LayoutResult<TextBlockMesh> {
        let block = self.measure();
        let snippets = plan_snippets(&self.lines)?;
        self.assemble_snippets(&block, &snippets)
    }

    /// Build meshes for an explicit snippet plan. The plan must cover the
    /// lines in order; any range outside them is a layout inconsistency.
    pub fn assemble_snippets(&self, block: &BlockMetrics, snippets: &[TextSnippet]) -> LayoutResult<TextBlockMesh> {
        if block.lines.len() != self.lines.len() {
            return Err(LayoutError::inconsistency(
                block.lines.len().min(self.lines.len()),
                0,
                format!(
                    "{} measured lines for {} glyph lines",
                    block.lines.len(),
                    self.lines.len()
                ),
            ));
        }

        let mut pen = Pen {
            line: 0,
            x: 0.0,
            y: self.font.scaled_ascender(),
        };
        let mut meshes = Vec::with_capacity(snippets.len());
        for (draw_order, snippet) in snippets.iter().enumerate() {
            self.check_range(snippet)?;
            meshes.push(self.build_snippet(draw_order, snippet, block, &mut pen)?);
        }

        debug!(
            "Assembled {} lines into {} snippets, block {}x{}",
            self.lines.len(),
            meshes.len(),
            block.width,
            block.height
        );
        Ok(TextBlockMesh {
            snippets: meshes,
            width: block.width,
            height: block.height,
            line_widths: block.lines.iter().map(|l| l.width).collect(),
        })
    }

    fn check_range(&self, snippet: &TextSnippet) -> LayoutResult<()> {
        let TextSnippet {
            start,
            end,
            vertex_count,
            ..
        } = *snippet;
        if vertex_count > MAX_SNIPPET_VERTICES {
            return Err(LayoutError::inconsistency(
                start.line,
                start.index,
                format!("snippet holds {vertex_count} vertices, more than {MAX_SNIPPET_VERTICES}"),
            ));
        }
        if start > end {
            return Err(LayoutError::inconsistency(
                start.line,
                start.index,
                format!("snippet ends before it starts at line {}, index {}", end.line, end.index),
            ));
        }
        let valid = |p: GlyphPosition, exclusive: bool| match self.lines.get(p.line) {
            Some(line) => {
                p.index < line.len() || ((exclusive || line.is_empty()) && p.index <= line.len())
            }
            // one line past the end closes the final snippet; empty text starts at the origin
            None => {
                (exclusive && p == GlyphPosition::new(self.lines.len(), 0))
                    || p == GlyphPosition::new(0, 0)
            }
        };
        if !valid(start, false) {
            return Err(LayoutError::inconsistency(
                start.line,
                start.index,
                "snippet starts outside the text",
            ));
        }
        if !valid(end, true) {
            return Err(LayoutError::inconsistency(
                end.line,
                end.index,
                "snippet ends outside the text",
            ));
        }
        Ok(())
    }

    fn build_snippet(
        &self,
        draw_order: usize,
        snippet: &TextSnippet,
        block: &BlockMetrics,
        pen: &mut Pen,
    ) -> LayoutResult<MeshSnippet> {
        let scale = self.font.scale;
        let kerning = self.options.kerning;
        let h_align = self.options.h_align;
        let v_offset = self.options.v_align.offset(block.height);
        let frame = BlockFrame {
            width: block.width,
            height: block.height,
            h_align,
        };

        let mut out = MeshSnippet::with_capacity(draw_order, *snippet);
        for position in snippet.positions(&self.lines) {
            self.advance_to_line(pen, position.line);

            let line = &block.lines[position.line];
            let glyph = &self.lines[position.line][position.index];
            let metrics = glyph.metrics();
            if glyph.is_blank() {
                pen.x += metrics.advance + kerning;
                continue;
            }

            let h_offset = h_align.offset(line.width, block.width);
            let base = out.positions.len();
            if base + glyph.vertex_count() > snippet.vertex_count {
                return Err(LayoutError::inconsistency(
                    position.line,
                    position.index,
                    format!(
                        "glyph needs {} vertices but the snippet has {} left",
                        glyph.vertex_count(),
                        snippet.vertex_count - base
                    ),
                ));
            }

            let mesh = glyph.mesh();
            for (i, &[x, y, z]) in mesh.positions.iter().enumerate() {
                let line_x = x + pen.x * scale;
                let block_y = y - pen.y;
                out.positions.push([line_x + h_offset, block_y + v_offset, z]);
                out.uv1.push(mesh.uv1[i]);
                out.uv2.push(mesh.uv2[i]);
                out.uv3.push(character_uv(x, y, metrics));
                out.uv4.push(line_uv(line_x, y, line));
                out.uv5.push(block_uv(line_x, block_y, line.width, h_offset, &frame));
            }
            // base + vertex_count stays within the snippet, which is below u16::MAX
            out.indices
                .extend(mesh.indices.iter().map(|&i| i + base as u16));
            pen.x += metrics.advance + kerning;
        }

        if out.positions.len() != snippet.vertex_count || out.indices.len() != snippet.index_count {
            return Err(LayoutError::inconsistency(
                snippet.start.line,
                snippet.start.index,
                format!(
                    "snippet planned {} vertices / {} indices, built {} / {}",
                    snippet.vertex_count,
                    snippet.index_count,
                    out.positions.len(),
                    out.indices.len()
                ),
            ));
        }
        Ok(out)
    }

    /// Move the pen down to the start of `line`
    fn advance_to_line(&self, pen: &mut Pen, line: usize) {
        while pen.line < line {
            pen.line += 1;
            pen.x = 0.0;
            pen.y += self.font.scaled_line_height();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::GlyphMetrics;
    use crate::glyph::{GlyphMesh, TriangleMesh};
    use kurbo::Rect;
    use std::sync::Arc;

    /// A glyph made of `quads` unit squares side by side, ink from 0 to
    /// `quads` design units, advance one unit wider
    fn block_glyph(code_point: char, quads: usize) -> Arc<GlyphMesh> {
        let mut mesh = TriangleMesh::default();
        for q in 0..quads {
            let base = mesh.positions.len() as u16;
            let x = q as f32;
            for (px, py) in [(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0)] {
                mesh.positions.push([px, py, 0.0]);
                mesh.uv1.push([px, py]);
                mesh.uv2.push([1.0, 0.0]);
            }
            mesh.indices
                .extend([0, 1, 2, 0, 2, 3].map(|i| base + i));
        }
        let metrics = GlyphMetrics::from_bounds(
            quads as f32 + 1.0,
            Rect::new(0.0, 0.0, quads as f64, 1.0),
            1.0,
        );
        Arc::new(GlyphMesh::from_parts(code_point, mesh, metrics).unwrap())
    }

    fn space() -> Arc<GlyphMesh> {
        Arc::new(GlyphMesh::space(' ', GlyphMetrics::advance_only(2.0, 1.0)))
    }

    fn unit_font() -> FontMetrics {
        FontMetrics {
            units_per_em: 1.0,
            scale: 1.0,
            ascender: 1.0,
            descender: 0.0,
            line_height: 2.0,
        }
    }

    #[test]
    fn pen_moves_right_then_down() {
        let lines = vec![
            vec![block_glyph('a', 1), space(), block_glyph('b', 1)],
            vec![block_glyph('c', 1)],
        ];
        let layout = TextLayout::new(lines, unit_font(), LayoutOptions::default());
        let block = layout.assemble().unwrap();
        let snippet = &block.snippets[0];

        // 'a' at x 0, then advance 2 plus a space of 2
        assert_eq!(snippet.positions[0], [0.0, -1.0, 0.0]);
        assert_eq!(snippet.positions[4], [4.0, -1.0, 0.0]);
        // second line one line height lower
        assert_eq!(snippet.positions[8], [0.0, -3.0, 0.0]);
        assert_eq!(block.line_widths, vec![5.0, 1.0]);
        assert_eq!(block.height, 3.0);
    }

    #[test]
    fn indices_are_rebased_per_glyph() {
        let lines = vec![vec![block_glyph('A', 1), block_glyph('B', 1)]];
        let layout = TextLayout::new(lines, unit_font(), LayoutOptions::default());
        let block = layout.assemble().unwrap();
        assert_eq!(block.snippets.len(), 1);
        assert_eq!(
            block.snippets[0].indices,
            vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]
        );
    }

    #[test]
    fn kerning_widens_every_advance() {
        let lines = vec![vec![block_glyph('a', 1), block_glyph('b', 1)]];
        let options = LayoutOptions {
            kerning: 0.5,
            ..Default::default()
        };
        let block = TextLayout::new(lines, unit_font(), options).assemble().unwrap();
        assert_eq!(block.snippets[0].positions[4][0], 2.5);
        assert_eq!(block.width, 3.5);
    }

    #[test]
    fn channels_are_filled_for_every_vertex() {
        let lines = vec![vec![block_glyph('a', 2)], vec![block_glyph('b', 1)]];
        let options = LayoutOptions {
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            kerning: 0.0,
        };
        let block = TextLayout::new(lines, unit_font(), options).assemble().unwrap();
        let s = &block.snippets[0];
        let n = s.vertex_count();
        for channel in [&s.uv1, &s.uv2, &s.uv3, &s.uv4, &s.uv5] {
            assert_eq!(channel.len(), n);
        }
        // top-left corner of the first glyph
        assert_eq!(s.uv3[3], [0.0, 1.0]);
        assert_eq!(s.uv4[3], [0.0, 1.0]);
        assert_eq!(s.uv5[3], [0.0, 1.0]);
        // the narrower second line starts half a unit in
        assert_eq!(s.uv5[8][0], 0.25);
        assert_eq!(s.positions[0], [-1.0, -1.0 + 1.5, 0.0]);
    }

    #[test]
    fn snippet_outside_the_text_is_inconsistent() {
        let lines = vec![vec![block_glyph('a', 1)]];
        let layout = TextLayout::new(lines, unit_font(), LayoutOptions::default());
        let block = layout.measure();
        let bogus = TextSnippet {
            start: GlyphPosition::new(3, 0),
            end: GlyphPosition::new(4, 0),
            vertex_count: 4,
            index_count: 6,
            vertex_offset: 0,
        };
        let err = layout.assemble_snippets(&block, &[bogus]).unwrap_err();
        assert!(matches!(err, LayoutError::LayoutInconsistency { line: 3, .. }));
    }

    #[test]
    fn miscounted_snippet_is_inconsistent() {
        let lines = vec![vec![block_glyph('a', 1), block_glyph('b', 1)]];
        let layout = TextLayout::new(lines, unit_font(), LayoutOptions::default());
        let block = layout.measure();
        let short = TextSnippet {
            start: GlyphPosition::new(0, 0),
            end: GlyphPosition::new(1, 0),
            vertex_count: 4,
            index_count: 6,
            vertex_offset: 0,
        };
        let err = layout.assemble_snippets(&block, &[short]).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::LayoutInconsistency { line: 0, index: 1, .. }
        ));
    }

    #[test]
    fn edited_layout_matches_a_fresh_one() {
        let mut layout = TextLayout::new(
            vec![vec![block_glyph('a', 1)]],
            unit_font(),
            LayoutOptions::default(),
        );
        let before = layout.assemble().unwrap();

        let lines = vec![vec![block_glyph('b', 2), space(), block_glyph('c', 1)], vec![block_glyph('d', 3)]];
        let options = LayoutOptions {
            h_align: HAlign::Center,
            v_align: VAlign::Bottom,
            kerning: 0.5,
        };
        let font = FontMetrics {
            scale: 2.0,
            ..unit_font()
        };
        layout.set_lines(lines.clone());
        layout.set_options(options);
        layout.set_font(font);

        let after = layout.assemble().unwrap();
        assert_ne!(after, before);
        assert_eq!(after, TextLayout::new(lines, font, options).assemble().unwrap());
        assert_eq!(after.line_widths.len(), 2);
    }
}
