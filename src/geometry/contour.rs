//! Closed polylines fed to the triangulation

use super::point::Point;
use kurbo::Point as KPoint;

/// A closed contour of a glyph outline, curves already flattened to line
/// segments. The last point connects back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Contour made of plain on-curve points
    pub fn from_positions(positions: impl IntoIterator<Item = KPoint>) -> Self {
        Self {
            points: positions
                .into_iter()
                .map(|p| Point::contour(p, false))
                .collect(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Segments `(i, start, end)` in contour order, including the closing one
    pub fn segments(&self) -> impl Iterator<Item = (usize, KPoint, KPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| {
            (
                i,
                self.points[i].position,
                self.points[(i + 1) % n].position,
            )
        })
    }

    /// Shoelace area, positive for counter-clockwise contours
    pub fn signed_area(&self) -> f64 {
        self.segments()
            .map(|(_, a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_area_and_winding() {
        let ccw = Contour::from_positions([
            KPoint::new(0.0, 0.0),
            KPoint::new(2.0, 0.0),
            KPoint::new(2.0, 2.0),
            KPoint::new(0.0, 2.0),
        ]);
        assert_eq!(ccw.signed_area(), 4.0);
        assert_eq!(ccw.segments().count(), 4);

        let cw = Contour::new(ccw.points().iter().rev().copied().collect());
        assert_eq!(cw.signed_area(), -4.0);
    }
}
