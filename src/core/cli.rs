//! Command line interface for meshtext
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Many CLI options are documented with
//! examples to help users understand the expected format.

use crate::core::config::{ConfigFile, LayoutSettings, DEFAULT_TEXT};
use crate::layout::{HAlign, VAlign};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// meshtext CLI arguments
///
/// Examples:
///   meshtext --font MyFont.ufo                        # Mesh the default text
///   meshtext --font MyFont.ufo --text "Hello"         # Mesh specific text
///   meshtext --font MyFont.ufo --align center --json  # Centered, JSON report
///   meshtext --new-config                             # Write ~/.config/meshtext/settings.json
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "meshtext",
    version,
    about = "Triangulate UFO glyphs and assemble text block meshes",
    long_about = "meshtext reads glyph outlines from a UFO (Unified Font Object), triangulates every glyph with a constrained Delaunay triangulation and packs a text block into draw meshes with 16-bit indices and five UV channels. It prints a report of the resulting meshes."
)]
pub struct CliArgs {
    /// Path to the UFO font source
    ///
    /// The source should be a valid UFO version 3 directory structure.
    #[clap(
        long = "font",
        short = 'f',
        help = "UFO font source to read glyphs from",
        long_help = "Path to a UFO directory (.ufo). Glyphs are looked up by their Unicode code points in the default layer."
    )]
    pub font_source: Option<PathBuf>,

    /// Text to lay out; `\n` starts a new line
    #[clap(
        long = "text",
        short = 't',
        help = "Text to lay out (use \\n for line breaks)"
    )]
    pub text: Option<String>,

    /// Font size in pixels per em
    #[clap(long = "size", short = 's', help = "Font size in pixels per em")]
    pub size: Option<f32>,

    /// Horizontal alignment: left, center or right
    #[clap(long = "align", help = "Horizontal alignment: left, center, right")]
    pub align: Option<String>,

    /// Vertical alignment: top, center or bottom
    #[clap(long = "valign", help = "Vertical alignment: top, center, bottom")]
    pub valign: Option<String>,

    /// Extra advance added to every glyph, in font units
    #[clap(
        long = "kerning",
        allow_negative_numbers = true,
        help = "Extra advance per glyph in font units"
    )]
    pub kerning: Option<f32>,

    /// Curve flattening tolerance in font units
    #[clap(long = "tolerance", help = "Curve flattening tolerance in font units")]
    pub tolerance: Option<f64>,

    /// Print the report as JSON
    #[clap(long = "json", help = "Print the mesh report as JSON")]
    pub json: bool,

    /// Also write logs to ~/.config/meshtext/logs/
    #[clap(
        long = "log-file",
        help = "Also write logs to ~/.config/meshtext/logs/",
        long_help = "Write log output to a dated file in ~/.config/meshtext/logs/ in addition to stderr. The log level follows RUST_LOG and defaults to info."
    )]
    pub log_file: bool,

    /// Initialize user configuration directory with settings
    ///
    /// This creates the ~/.config/meshtext directory with:
    /// - settings.json: layout defaults (alignment, kerning, size, tolerance)
    /// - logs/: destination for --log-file
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings",
        long_help = "Initialize the ~/.config/meshtext directory with a settings.json file holding the built-in layout defaults, so they can be changed without command line arguments."
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and values are usable before any
    /// work starts, providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if self.new_config {
            return Ok(());
        }

        let Some(path) = &self.font_source else {
            return Err("No font source given.\nPass a UFO directory with --font.".to_string());
        };
        if !path.exists() {
            return Err(format!(
                "Font source does not exist: {}\nMake sure the path is correct and the file exists.",
                path.display()
            ));
        }
        if !path.is_dir() || !path.join("metainfo.plist").exists() {
            return Err(format!(
                "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
                path.display()
            ));
        }

        if let Some(align) = &self.align {
            align.parse::<HAlign>()?;
        }
        if let Some(valign) = &self.valign {
            valign.parse::<VAlign>()?;
        }
        if let Some(size) = self.size {
            if !(size.is_finite() && size > 0.0) {
                return Err(format!("Font size must be a positive number, got {size}"));
            }
        }
        if let Some(tolerance) = self.tolerance {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(format!(
                    "Flattening tolerance must be a positive number, got {tolerance}"
                ));
            }
        }
        if let Some(kerning) = self.kerning {
            if !kerning.is_finite() {
                return Err(format!("Kerning must be a finite number, got {kerning}"));
            }
        }
        Ok(())
    }

    /// The text to lay out, with `\n` escapes turned into line breaks
    pub fn text(&self) -> String {
        self.text
            .as_deref()
            .unwrap_or(DEFAULT_TEXT)
            .replace("\\n", "\n")
    }

    /// Get the layout settings from CLI args, config file, or defaults
    ///
    /// Priority order:
    /// 1. CLI arguments
    /// 2. Config file setting (~/.config/meshtext/settings.json)
    /// 3. Built-in defaults
    pub fn layout_settings(&self, config: Option<&ConfigFile>) -> LayoutSettings {
        let mut settings = LayoutSettings::default();
        if let Some(config) = config {
            debug!("Applying layout settings from config file");
            settings = config.apply(settings);
        }

        if let Some(align) = self.align.as_deref().and_then(|a| a.parse().ok()) {
            settings.h_align = align;
        }
        if let Some(valign) = self.valign.as_deref().and_then(|v| v.parse().ok()) {
            settings.v_align = valign;
        }
        if let Some(kerning) = self.kerning {
            settings.kerning = kerning;
        }
        if let Some(size) = self.size {
            settings.font_size = size;
        }
        if let Some(tolerance) = self.tolerance {
            settings.flatten_tolerance = tolerance;
        }
        settings
    }
}
