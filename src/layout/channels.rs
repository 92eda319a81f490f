//! Derived texture coordinate channels
//!
//! Channels 3 to 5 place a vertex inside its glyph, its line and its block,
//! each normalised to 0..1. They are pure functions of the vertex and the
//! extents it belongs to. A zero extent yields 0 for that component.

use super::alignment::HAlign;
use super::line_metrics::LineMetrics;
use crate::font_source::GlyphMetrics;

fn ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// Channel 3: position within the glyph's own ink box. `x`, `y` are the
/// glyph-local vertex position in pixels.
pub fn character_uv(x: f32, y: f32, glyph: &GlyphMetrics) -> [f32; 2] {
    [
        ratio(x - glyph.left * glyph.scale, glyph.width),
        ratio(y - glyph.descender * glyph.scale, glyph.height),
    ]
}

/// Channel 4: position within the line. `line_x` is the vertex x after the
/// pen translation but before alignment; `y` is glyph-local.
pub fn line_uv(line_x: f32, y: f32, line: &LineMetrics) -> [f32; 2] {
    [
        ratio(line_x, line.width),
        ratio(y - line.descender, line.span()),
    ]
}

/// Extents the block channel is computed against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockFrame {
    pub width: f32,
    pub height: f32,
    pub h_align: HAlign,
}

/// Channel 5: position within the whole block. `block_y` is the vertex y
/// after the line translation but before vertical alignment, so it runs
/// from 0 at the top down to `-height`.
///
/// Centered lines are measured from the block's left edge rather than from
/// the centre line the geometry hangs on.
pub fn block_uv(line_x: f32, block_y: f32, line_width: f32, h_offset: f32, frame: &BlockFrame) -> [f32; 2] {
    let u = match frame.h_align {
        HAlign::Center => ratio(line_x + frame.width / 2.0 - line_width / 2.0, frame.width),
        HAlign::Left | HAlign::Right => ratio(line_x + h_offset, frame.width),
    };
    let v = if frame.height == 0.0 {
        0.0
    } else {
        1.0 + ratio(block_y, frame.height)
    };
    [u, v]
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    #[test]
    fn character_channel_spans_the_ink_box() {
        let glyph = GlyphMetrics::from_bounds(600.0, Rect::new(100.0, -100.0, 500.0, 700.0), 0.1);
        assert_eq!(character_uv(10.0, -10.0, &glyph), [0.0, 0.0]);
        let [u, v] = character_uv(50.0, 70.0, &glyph);
        assert!((u - 1.0).abs() < 1e-5);
        assert!((v - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_extents_give_zero() {
        let glyph = GlyphMetrics::advance_only(250.0, 1.0);
        assert_eq!(character_uv(3.0, 4.0, &glyph), [0.0, 0.0]);
        assert_eq!(line_uv(3.0, 4.0, &LineMetrics::empty()), [0.0, 0.0]);

        let frame = BlockFrame {
            width: 0.0,
            height: 0.0,
            h_align: HAlign::Left,
        };
        assert_eq!(block_uv(3.0, -4.0, 0.0, 0.0, &frame), [0.0, 0.0]);
    }

    #[test]
    fn line_channel_uses_the_envelope() {
        let line = LineMetrics {
            width: 200.0,
            ascender: 80.0,
            descender: -20.0,
            glyphs: 3,
        };
        assert_eq!(line_uv(100.0, 30.0, &line), [0.5, 0.5]);
    }

    #[test]
    fn centered_block_channel_ignores_line_centering() {
        let frame = BlockFrame {
            width: 100.0,
            height: 50.0,
            h_align: HAlign::Center,
        };
        // a 40 wide line: its left edge maps to 0.3 of the block
        let [u, v] = block_uv(0.0, -25.0, 40.0, HAlign::Center.offset(40.0, 100.0), &frame);
        assert!((u - 0.3).abs() < 1e-6);
        assert!((v - 0.5).abs() < 1e-6);

        let right = BlockFrame {
            h_align: HAlign::Right,
            ..frame
        };
        let [u, _] = block_uv(0.0, 0.0, 40.0, HAlign::Right.offset(40.0, 100.0), &right);
        assert!((u - 0.6).abs() < 1e-6);
    }
}
