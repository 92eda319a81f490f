//! Line and block extents in pixels

use super::GlyphLine;
use crate::font_source::FontMetrics;
use serde::{Deserialize, Serialize};

/// Extents of one laid out line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineMetrics {
    /// Pen advance up to the last glyph plus that glyph's ink extent
    pub width: f32,
    /// Highest glyph ascender on the line, scaled
    pub ascender: f32,
    /// Lowest glyph descender on the line, scaled
    pub descender: f32,
    pub glyphs: usize,
}

impl LineMetrics {
    /// Metrics of a line without glyphs
    pub fn empty() -> Self {
        Self {
            width: 0.0,
            ascender: f32::NEG_INFINITY,
            descender: f32::INFINITY,
            glyphs: 0,
        }
    }

    pub fn measure(line: &GlyphLine, font: &FontMetrics, kerning: f32) -> Self {
        let Some(last) = line.last() else {
            return Self::empty();
        };
        let scale = font.scale;

        let mut metrics = Self::empty();
        let mut pen = 0.0;
        for glyph in line {
            let m = glyph.metrics();
            pen += (m.advance + kerning) * scale;
            metrics.ascender = metrics.ascender.max(m.ascender * scale);
            metrics.descender = metrics.descender.min(m.descender * scale);
        }
        let last = last.metrics();
        pen -= (last.advance + kerning) * scale;
        pen += last.right * scale;

        metrics.width = pen;
        metrics.glyphs = line.len();
        metrics
    }

    /// Ascender to descender distance, zero for an empty line
    pub fn span(&self) -> f32 {
        let span = self.ascender - self.descender;
        if span.is_finite() {
            span
        } else {
            0.0
        }
    }
}

/// Extents of a whole text block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockMetrics {
    pub width: f32,
    pub height: f32,
    pub lines: Vec<LineMetrics>,
}

impl BlockMetrics {
    pub fn measure(lines: &[GlyphLine], font: &FontMetrics, kerning: f32) -> Self {
        let lines: Vec<LineMetrics> = lines
            .iter()
            .map(|line| LineMetrics::measure(line, font, kerning))
            .collect();
        let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);

        let mut height = font.scaled_ascender() + font.scaled_descender();
        if lines.len() > 1 {
            height += (lines.len() - 1) as f32 * font.scaled_line_height();
        }
        Self {
            width,
            height,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::GlyphMetrics;
    use crate::glyph::GlyphMesh;
    use kurbo::Rect;
    use std::sync::Arc;

    fn glyph(code_point: char, advance: f32, ink: Rect) -> Arc<GlyphMesh> {
        Arc::new(GlyphMesh::space(
            code_point,
            GlyphMetrics::from_bounds(advance, ink, 0.1),
        ))
    }

    #[test]
    fn width_ends_at_the_last_glyph_ink() {
        let font = FontMetrics::from_units_per_em(1000.0, 100.0);
        let line = vec![
            glyph('A', 600.0, Rect::new(10.0, 0.0, 590.0, 700.0)),
            glyph('g', 500.0, Rect::new(20.0, -200.0, 450.0, 500.0)),
        ];
        let metrics = LineMetrics::measure(&line, &font, 10.0);
        // (600 + 10) * 0.1 for 'A', then 'g' ink up to 450
        assert!((metrics.width - (61.0 + 45.0)).abs() < 1e-4);
        assert!((metrics.ascender - 70.0).abs() < 1e-4);
        assert!((metrics.descender + 20.0).abs() < 1e-4);
        assert!((metrics.span() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn block_height_counts_lines() {
        let font = FontMetrics::from_units_per_em(1000.0, 10.0);
        let a = glyph('a', 500.0, Rect::new(0.0, 0.0, 400.0, 500.0));
        let lines = vec![vec![a.clone(), a.clone()], Vec::new(), vec![a]];
        let block = BlockMetrics::measure(&lines, &font, 0.0);

        assert_eq!(block.lines.len(), 3);
        assert_eq!(block.lines[1], LineMetrics::empty());
        assert_eq!(block.lines[1].span(), 0.0);
        assert!((block.width - 9.0).abs() < 1e-5);
        // ascender 8 + descender 2 + two more lines of 10
        assert!((block.height - 30.0).abs() < 1e-5);
    }
}
