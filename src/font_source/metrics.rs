//! Font and glyph metrics
//!
//! Metrics are kept in design units (the font's own coordinate space) next
//! to the scale that converts them to output pixels at the requested size.
//! Layout multiplies by that scale wherever it mixes metrics with glyph
//! mesh positions, which are already in pixels.

use kurbo::Rect;
use norad::Font;
use serde::{Deserialize, Serialize};

/// Font-wide metrics for spacing and positioning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub units_per_em: f32,
    /// Design units to pixels at the requested size
    pub scale: f32,
    /// Distance from the baseline to the top of the line, positive up
    pub ascender: f32,
    /// Distance from the baseline to the bottom of the line, positive down
    pub descender: f32,
    /// Baseline-to-baseline distance between consecutive lines
    pub line_height: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::from_units_per_em(1000.0, 1000.0)
    }
}

impl FontMetrics {
    /// Metrics with conventional proportions for a font without its own
    pub fn from_units_per_em(units_per_em: f32, font_size: f32) -> Self {
        let ascender = units_per_em * 0.8;
        let descender = units_per_em * 0.2;
        Self {
            units_per_em,
            scale: font_size / units_per_em,
            ascender,
            descender,
            line_height: ascender + descender,
        }
    }

    /// Extract metrics from a UFO, sized to `font_size` pixels per em
    pub fn from_ufo(ufo: &Font, font_size: f32) -> Self {
        let font_info = &ufo.font_info;

        let units_per_em = font_info
            .units_per_em
            .map(|v| v.to_string().parse().unwrap_or(1000.0))
            .filter(|v: &f64| *v > 0.0)
            .unwrap_or(1000.0);

        // Load metrics from UFO, using reasonable defaults based on units_per_em if missing
        let ascender = font_info.ascender.unwrap_or(units_per_em * 0.8); // 80% of UPM
        let descender = font_info.descender.unwrap_or(-(units_per_em * 0.2)); // -20% of UPM
        let line_gap = font_info.open_type_hhea_line_gap.unwrap_or(0) as f64;

        Self {
            units_per_em: units_per_em as f32,
            scale: font_size / units_per_em as f32,
            ascender: ascender as f32,
            descender: (-descender) as f32,
            line_height: (ascender - descender + line_gap) as f32,
        }
    }

    pub fn font_size(&self) -> f32 {
        self.units_per_em * self.scale
    }

    pub fn scaled_ascender(&self) -> f32 {
        self.ascender * self.scale
    }

    pub fn scaled_descender(&self) -> f32 {
        self.descender * self.scale
    }

    pub fn scaled_line_height(&self) -> f32 {
        self.line_height * self.scale
    }
}

/// Per-glyph metrics. Everything but `width`, `height` and `scale` is in
/// design units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlyphMetrics {
    /// Horizontal advance to the next glyph origin
    pub advance: f32,
    /// Left edge of the ink (left side bearing)
    pub left: f32,
    /// Right edge of the ink
    pub right: f32,
    /// Top of the ink above the baseline
    pub ascender: f32,
    /// Bottom of the ink, negative below the baseline
    pub descender: f32,
    /// Ink width in pixels
    pub width: f32,
    /// Ink height in pixels
    pub height: f32,
    /// Design units to pixels
    pub scale: f32,
}

impl GlyphMetrics {
    /// Metrics for a glyph whose ink covers `bounds` (design units)
    pub fn from_bounds(advance: f32, bounds: Rect, scale: f32) -> Self {
        Self {
            advance,
            left: bounds.x0 as f32,
            right: bounds.x1 as f32,
            ascender: bounds.y1 as f32,
            descender: bounds.y0 as f32,
            width: (bounds.width() as f32) * scale,
            height: (bounds.height() as f32) * scale,
            scale,
        }
    }

    /// Metrics for a glyph without ink, such as a space
    pub fn advance_only(advance: f32, scale: f32) -> Self {
        Self {
            advance,
            scale,
            ..Default::default()
        }
    }

    pub fn right_side_bearing(&self) -> f32 {
        self.advance - self.right
    }
}
