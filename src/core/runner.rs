//! Application runner logic
//!
//! Loads the font source, meshes every glyph of the text through the glyph
//! cache, lays the block out and reports the resulting draw meshes.

use crate::core::cli::CliArgs;
use crate::core::config::{ConfigFile, LayoutSettings};
use crate::error::MeshError;
use crate::font_source::{OutlineSource, UfoSource};
use crate::glyph::{FontStyle, GlyphCache, GlyphKey, GlyphMesh};
use crate::layout::{GlyphLine, GlyphPosition, TextBlockMesh, TextLayout};
use crate::logging;
use crate::rendering::text_block_meshes;
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Glyph lines for a text, plus the characters that could not be meshed
#[derive(Debug, Clone, Default)]
pub struct GlyphRun {
    pub lines: Vec<GlyphLine>,
    /// Characters the font has no glyph for, left out of the layout
    pub missing: Vec<char>,
    /// Characters whose outline was rejected, laid out as advance only
    pub invalid: Vec<char>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnippetReport {
    pub draw_order: usize,
    pub start: GlyphPosition,
    pub end: GlyphPosition,
    pub vertices: usize,
    pub triangles: usize,
}

/// Summary of one layout run, printed by the binary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshReport {
    pub font: String,
    pub lines: usize,
    pub glyphs: usize,
    pub settings: LayoutSettings,
    pub width: f32,
    pub height: f32,
    pub line_widths: Vec<f32>,
    pub snippets: Vec<SnippetReport>,
    pub render_meshes: usize,
    pub cached_glyphs: usize,
    pub missing: Vec<char>,
    pub invalid: Vec<char>,
}

/// Create and run the application with the given CLI arguments.
/// Handles special CLI flags and delegates to the mesher.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    cli_args.validate().map_err(anyhow::Error::msg)?;
    let _log_guard = logging::init(cli_args.log_file)?;

    let settings = cli_args.layout_settings(ConfigFile::load().as_ref());
    let Some(path) = &cli_args.font_source else {
        anyhow::bail!("No font source given");
    };
    let source = UfoSource::load(path)
        .with_context(|| format!("Could not open {}", path.display()))?
        .with_tolerance(settings.flatten_tolerance);

    let cache = GlyphCache::new();
    let (_, report) = mesh_text(&source, &cache, &cli_args.text(), &settings)?;

    if cli_args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Resolve every character of `text` to a cached glyph mesh. Lines are
/// split on `\n`.
pub fn glyph_run(source: &dyn OutlineSource, cache: &GlyphCache, text: &str, font_size: f32) -> Result<GlyphRun> {
    let mut run = GlyphRun::default();
    for line_text in text.split('\n') {
        let mut line = GlyphLine::new();
        for code_point in line_text.chars() {
            let key = GlyphKey::new(source.font_id(), code_point, font_size, FontStyle::Regular);
            if let Some(mesh) = cache.get(&key) {
                line.push(mesh);
                continue;
            }

            let Some(glyph) = source
                .glyph(code_point, font_size)
                .with_context(|| format!("Could not read glyph {code_point:?}"))?
            else {
                warn!("No glyph for {:?} in {}, skipping", code_point, source.font_id());
                if !run.missing.contains(&code_point) {
                    run.missing.push(code_point);
                }
                continue;
            };

            match cache.get_or_build(key, || GlyphMesh::build(&glyph.outline, glyph.metrics)) {
                Ok(mesh) => line.push(mesh),
                Err(MeshError::InvalidContour { reason, .. }) => {
                    warn!(
                        "Glyph {:?} has an invalid outline ({}), laying it out as blank",
                        code_point, reason
                    );
                    if !run.invalid.contains(&code_point) {
                        run.invalid.push(code_point);
                    }
                    line.push(Arc::new(GlyphMesh::space(code_point, glyph.metrics)));
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Could not mesh glyph {code_point:?}"))
                }
            }
        }
        run.lines.push(line);
    }
    Ok(run)
}

/// Mesh and lay out `text`, returning the block and its report
pub fn mesh_text(
    source: &dyn OutlineSource,
    cache: &GlyphCache,
    text: &str,
    settings: &LayoutSettings,
) -> Result<(TextBlockMesh, MeshReport)> {
    let run = glyph_run(source, cache, text, settings.font_size)?;
    let font = source.font_metrics(settings.font_size);
    let layout = TextLayout::new(run.lines, font, settings.layout_options());
    let block = layout.assemble().context("Text layout failed")?;
    let render_meshes = text_block_meshes(&block);

    let report = MeshReport {
        font: source.font_id().to_string(),
        lines: layout.lines().len(),
        glyphs: layout.lines().iter().map(Vec::len).sum(),
        settings: *settings,
        width: block.width,
        height: block.height,
        line_widths: block.line_widths.clone(),
        snippets: block
            .snippets
            .iter()
            .map(|s| SnippetReport {
                draw_order: s.draw_order,
                start: s.range.start,
                end: s.range.end,
                vertices: s.vertex_count(),
                triangles: s.indices.len() / 3,
            })
            .collect(),
        render_meshes: render_meshes.len(),
        cached_glyphs: cache.len(),
        missing: run.missing,
        invalid: run.invalid,
    };
    info!(
        "Laid out {} glyphs on {} lines into {} snippets",
        report.glyphs,
        report.lines,
        report.snippets.len()
    );
    Ok((block, report))
}

fn print_report(report: &MeshReport) {
    println!("Font: {}", report.font);
    println!(
        "Text: {} lines, {} glyphs ({} missing, {} invalid)",
        report.lines,
        report.glyphs,
        report.missing.len(),
        report.invalid.len()
    );
    println!(
        "Layout: {} / {}, size {}px, kerning {}",
        report.settings.h_align,
        report.settings.v_align,
        report.settings.font_size,
        report.settings.kerning
    );
    println!("Block: {:.2} x {:.2} px", report.width, report.height);
    for (line, width) in report.line_widths.iter().enumerate() {
        println!("  line {line}: {width:.2} px");
    }
    for snippet in &report.snippets {
        println!(
            "Snippet {}: {}:{} .. {}:{}, {} vertices, {} triangles",
            snippet.draw_order,
            snippet.start.line,
            snippet.start.index,
            snippet.end.line,
            snippet.end.index,
            snippet.vertices,
            snippet.triangles
        );
    }
    if !report.missing.is_empty() {
        println!("Missing glyphs: {:?}", report.missing);
    }
    if !report.invalid.is_empty() {
        println!("Invalid outlines: {:?}", report.invalid);
    }
}
