//! Glyph outlines as closed polylines
//!
//! Outline sources hand over kurbo paths in design units. Curves are
//! flattened here, so everything downstream works with straight segments
//! only. Points produced inside a curve are flagged as curve points; the
//! on-curve endpoints are not.

use crate::geometry::{Contour, Point, PointFlag};
use kurbo::{BezPath, PathEl, Point as KPoint, Rect};

/// Default flattening tolerance in design units
pub const DEFAULT_FLATTEN_TOLERANCE: f64 = 1.0;

/// One glyph's contours, ready for triangulation
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphOutline {
    code_point: char,
    contours: Vec<Contour>,
    steiner: Vec<KPoint>,
}

impl GlyphOutline {
    pub fn new(code_point: char, contours: Vec<Contour>) -> Self {
        Self {
            code_point,
            contours,
            steiner: Vec::new(),
        }
    }

    /// An outline without ink, such as a space
    pub fn empty(code_point: char) -> Self {
        Self::new(code_point, Vec::new())
    }

    /// Add interior points the triangulation should use as extra vertices
    pub fn with_steiner(mut self, points: impl IntoIterator<Item = KPoint>) -> Self {
        self.steiner.extend(points);
        self
    }

    /// Flatten `paths` into closed contours. Every subpath becomes one
    /// contour, whether or not it ends with an explicit close.
    pub fn from_bezpaths(code_point: char, paths: &[BezPath], tolerance: f64) -> Self {
        let mut contours = Vec::new();
        for path in paths {
            flatten_path(path, tolerance, &mut contours);
        }
        Self::new(code_point, contours)
    }

    pub fn code_point(&self) -> char {
        self.code_point
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn steiner(&self) -> &[KPoint] {
        &self.steiner
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Number of points the triangulation will insert
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum::<usize>() + self.steiner.len()
    }

    /// Bounding box of the contour points, `None` without contours
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self
            .contours
            .iter()
            .flat_map(|c| c.points().iter().map(|p| p.position));
        let first = points.next()?;
        Some(points.fold(Rect::from_points(first, first), |rect, p| {
            rect.union_pt(p)
        }))
    }
}

fn flatten_path(path: &BezPath, tolerance: f64, contours: &mut Vec<Contour>) {
    let mut current: Vec<Point> = Vec::new();
    let mut last = KPoint::ZERO;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                finish_contour(&mut current, contours);
                current.push(Point::contour(p, false));
                last = p;
            }
            PathEl::LineTo(p) => {
                current.push(Point::contour(p, false));
                last = p;
            }
            PathEl::QuadTo(_, end) | PathEl::CurveTo(_, _, end) => {
                let mut flat = Vec::new();
                kurbo::flatten([PathEl::MoveTo(last), *el], tolerance, |seg| {
                    if let PathEl::LineTo(p) = seg {
                        flat.push(p);
                    }
                });
                // the final flattened point is the on-curve endpoint
                flat.pop();
                current.extend(flat.into_iter().map(|p| Point::contour(p, true)));
                current.push(Point::contour(end, false));
                last = end;
            }
            PathEl::ClosePath => finish_contour(&mut current, contours),
        }
    }
    finish_contour(&mut current, contours);
}

/// Drop repeated points and the closing duplicate, then keep the contour.
/// Short contours are kept so triangulation can reject them by name.
fn finish_contour(points: &mut Vec<Point>, contours: &mut Vec<Contour>) {
    points.dedup_by(|later, kept| {
        if later.position != kept.position {
            return false;
        }
        if !later.is_curve_control() {
            kept.flags.remove(PointFlag::CurveControl);
        }
        true
    });
    if points.len() > 1 && points.first().map(|p| p.position) == points.last().map(|p| p.position)
    {
        if let Some(closing) = points.pop() {
            if !closing.is_curve_control() {
                points[0].flags.remove(PointFlag::CurveControl);
            }
        }
    }
    if points.len() > 1 {
        contours.push(Contour::new(std::mem::take(points)));
    } else {
        // a lone move-to draws nothing
        points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_path() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.line_to((100.0, 100.0));
        path.line_to((0.0, 100.0));
        path.line_to((0.0, 0.0));
        path.close_path();
        path
    }

    #[test]
    fn closing_duplicate_is_removed() {
        let outline = GlyphOutline::from_bezpaths('o', &[square_path()], 1.0);
        assert_eq!(outline.contours().len(), 1);
        assert_eq!(outline.contours()[0].len(), 4);
        assert!(outline.contours()[0]
            .points()
            .iter()
            .all(|p| p.is_contour_vertex() && !p.is_curve_control()));
        assert_eq!(outline.bounds(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn curves_are_flattened_with_flagged_points() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((200.0, 0.0));
        path.quad_to((200.0, 200.0), (0.0, 200.0));
        path.close_path();

        let outline = GlyphOutline::from_bezpaths('D', &[path], 0.5);
        let points = outline.contours()[0].points();
        assert!(points.len() > 4);
        assert!(points.iter().any(|p| p.is_curve_control()));

        let on_curve: Vec<KPoint> = points
            .iter()
            .filter(|p| !p.is_curve_control())
            .map(|p| p.position)
            .collect();
        assert_eq!(
            on_curve,
            vec![
                KPoint::new(0.0, 0.0),
                KPoint::new(200.0, 0.0),
                KPoint::new(0.0, 200.0)
            ]
        );
    }

    #[test]
    fn every_subpath_is_a_contour() {
        let mut path = square_path();
        path.move_to((25.0, 25.0));
        path.line_to((25.0, 75.0));
        path.line_to((75.0, 75.0));
        path.line_to((75.0, 25.0));
        path.close_path();

        let outline = GlyphOutline::from_bezpaths('o', &[path], 1.0);
        assert_eq!(outline.contours().len(), 2);
        assert_eq!(outline.point_count(), 8);
    }

    #[test]
    fn empty_paths_give_an_empty_outline() {
        let outline = GlyphOutline::from_bezpaths(' ', &[BezPath::new()], 1.0);
        assert!(outline.is_empty());
        assert_eq!(outline.bounds(), None);
    }
}
