//! Built-in defaults and the resolved layout settings

use crate::font_source::DEFAULT_FLATTEN_TOLERANCE;
use crate::layout::{HAlign, LayoutOptions, VAlign};
use serde::{Deserialize, Serialize};

/// Pixels per em when neither CLI nor config give a size
pub const DEFAULT_FONT_SIZE: f32 = 64.0;

/// Text laid out when none is given
pub const DEFAULT_TEXT: &str = "Hello\nWorld";

/// Settings for one layout run after CLI, config file and defaults are merged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Extra advance per glyph, design units
    pub kerning: f32,
    pub font_size: f32,
    /// Curve flattening tolerance, design units
    pub flatten_tolerance: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            h_align: HAlign::Left,
            v_align: VAlign::Top,
            kerning: 0.0,
            font_size: DEFAULT_FONT_SIZE,
            flatten_tolerance: DEFAULT_FLATTEN_TOLERANCE,
        }
    }
}

impl LayoutSettings {
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            h_align: self.h_align,
            v_align: self.v_align,
            kerning: self.kerning,
        }
    }
}
