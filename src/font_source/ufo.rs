//! UFO outline source
//!
//! Reads glyph outlines and metrics from a UFO with norad. Contours are
//! converted to kurbo paths, components are resolved into their base
//! glyph's contours, and the result is flattened into a [`GlyphOutline`].

use super::metrics::{FontMetrics, GlyphMetrics};
use super::outline::{GlyphOutline, DEFAULT_FLATTEN_TOLERANCE};
use super::{OutlineSource, SourceGlyph};
use crate::error::{SourceError, SourceResult};
use kurbo::{Affine, BezPath, Point};
use norad::{Font, Glyph, PointType};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Components nested deeper than this are treated as a cycle
const MAX_COMPONENT_DEPTH: usize = 16;

/// A UFO font opened for outline extraction
pub struct UfoSource {
    id: Arc<str>,
    font: Font,
    code_points: HashMap<char, String>,
    tolerance: f64,
}

impl UfoSource {
    /// Load a UFO directory from disk
    pub fn load(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let font = Font::load(path).map_err(|e| SourceError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let source = Self::from_font(path.display().to_string(), font);
        info!(
            "Loaded UFO {} with {} mapped code points",
            path.display(),
            source.code_points.len()
        );
        Ok(source)
    }

    /// Wrap an in-memory font. `id` identifies it in glyph cache keys.
    pub fn from_font(id: impl Into<Arc<str>>, font: Font) -> Self {
        let mut code_points = HashMap::new();
        for glyph in font.default_layer().iter() {
            for code_point in glyph.codepoints.iter() {
                code_points
                    .entry(code_point)
                    .or_insert_with(|| glyph.name().to_string());
            }
        }
        Self {
            id: id.into(),
            font,
            code_points,
            tolerance: DEFAULT_FLATTEN_TOLERANCE,
        }
    }

    /// Curve flattening tolerance in design units
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn glyph_name(&self, code_point: char) -> Option<&str> {
        self.code_points.get(&code_point).map(String::as_str)
    }

    /// All contours of `glyph` as paths, components included
    fn glyph_paths(&self, glyph: &Glyph, transform: Affine, depth: usize) -> SourceResult<Vec<BezPath>> {
        if depth > MAX_COMPONENT_DEPTH {
            return Err(SourceError::ComponentCycle {
                glyph: glyph.name().to_string(),
            });
        }

        let mut paths: Vec<BezPath> = glyph
            .contours
            .iter()
            .map(|contour| transform * contour_to_bezpath(contour))
            .collect();

        for component in &glyph.components {
            let Some(base) = self.font.default_layer().get_glyph(&component.base) else {
                warn!(
                    "Glyph {} references missing component base {}",
                    glyph.name(),
                    component.base
                );
                continue;
            };
            let t = &component.transform;
            let local = Affine::new([
                t.x_scale, t.xy_scale, t.yx_scale, t.y_scale, t.x_offset, t.y_offset,
            ]);
            paths.extend(self.glyph_paths(base, transform * local, depth + 1)?);
        }
        Ok(paths)
    }
}

impl OutlineSource for UfoSource {
    fn font_id(&self) -> &str {
        &self.id
    }

    fn font_metrics(&self, font_size: f32) -> FontMetrics {
        FontMetrics::from_ufo(&self.font, font_size)
    }

    fn glyph(&self, code_point: char, font_size: f32) -> SourceResult<Option<SourceGlyph>> {
        let Some(name) = self.glyph_name(code_point) else {
            return Ok(None);
        };
        let Some(glyph) = self.font.default_layer().get_glyph(name) else {
            return Ok(None);
        };

        let paths = self.glyph_paths(glyph, Affine::IDENTITY, 0)?;
        let outline = GlyphOutline::from_bezpaths(code_point, &paths, self.tolerance);

        let scale = self.font_metrics(font_size).scale;
        let advance = glyph.width as f32;
        let metrics = match outline.bounds() {
            Some(bounds) => GlyphMetrics::from_bounds(advance, bounds, scale),
            None => GlyphMetrics::advance_only(advance, scale),
        };
        debug!(
            "Outline for {:?} ({}): {} contours, {} points",
            code_point,
            name,
            outline.contours().len(),
            outline.point_count()
        );
        Ok(Some(SourceGlyph { outline, metrics }))
    }
}

/// Convert a UFO contour into a closed path.
///
/// The path starts at the first on-curve point; the segment that reaches
/// it again closes the contour. A contour made only of off-curve points is
/// a TrueType-style closed quadratic and starts at an implied midpoint.
pub fn contour_to_bezpath(contour: &norad::Contour) -> BezPath {
    let points = &contour.points;
    let mut path = BezPath::new();
    if points.is_empty() {
        return path;
    }

    let mut pending: Vec<Point> = Vec::new();
    let start = points.iter().position(|p| p.typ != PointType::OffCurve);

    match start {
        Some(start) => {
            let first = &points[start];
            let first_pt = Point::new(first.x, first.y);
            path.move_to(first_pt);
            let rest = points[start + 1..].iter().chain(&points[..start]);
            for point in rest {
                push_point(&mut path, &mut pending, &point.typ, Point::new(point.x, point.y));
            }
            // the first point's type says how the last segment reaches it
            push_point(&mut path, &mut pending, &first.typ, first_pt);
        }
        None => {
            let last = &points[points.len() - 1];
            let implied = Point::new((last.x + points[0].x) / 2.0, (last.y + points[0].y) / 2.0);
            path.move_to(implied);
            pending.extend(points.iter().map(|p| Point::new(p.x, p.y)));
            push_point(&mut path, &mut pending, &PointType::QCurve, implied);
        }
    }

    path.close_path();
    path
}

fn push_point(path: &mut BezPath, pending: &mut Vec<Point>, typ: &PointType, pt: Point) {
    match typ {
        PointType::OffCurve => {
            pending.push(pt);
            return;
        }
        PointType::Move | PointType::Line => {
            path.line_to(pt);
        }
        PointType::Curve => match pending.as_slice() {
            [.., cp1, cp2] => path.curve_to(*cp1, *cp2, pt),
            [cp] => path.quad_to(*cp, pt),
            [] => path.line_to(pt),
        },
        PointType::QCurve => match pending.len() {
            0 => path.line_to(pt),
            n => {
                for i in 0..n {
                    let cp = pending[i];
                    let end = if i == n - 1 {
                        pt
                    } else {
                        cp.midpoint(pending[i + 1])
                    };
                    path.quad_to(cp, end);
                }
            }
        },
    }
    pending.clear();
}
