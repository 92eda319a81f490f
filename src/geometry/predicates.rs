//! Geometric predicates used by the triangulation
//!
//! Results within a small, magnitude-relative tolerance of zero are reported
//! as zero, so nearly collinear or cocircular input never flips back and
//! forth on rounding noise.

use kurbo::Point;

const ORIENT_EPSILON: f64 = 1e-12;
const INCIRCLE_EPSILON: f64 = 1e-10;

/// Which side of the directed line `a -> b` the point `c` is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `c` is to the left, `a, b, c` wind counter-clockwise
    CounterClockwise,
    /// `c` is to the right, `a, b, c` wind clockwise
    Clockwise,
    Collinear,
}

pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let ab = b - a;
    let ac = c - a;
    let det = ab.cross(ac);
    let bound = ORIENT_EPSILON * (ab.x * ac.y).abs().max((ab.y * ac.x).abs());
    if det > bound {
        Orientation::CounterClockwise
    } else if det < -bound {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether `d` lies strictly inside the circumcircle of the counter-clockwise
/// triangle `a, b, c`. Points on the circle are not inside.
pub fn in_circumcircle(a: Point, b: Point, c: Point, d: Point) -> bool {
    let (adx, ady) = (a.x - d.x, a.y - d.y);
    let (bdx, bdy) = (b.x - d.x, b.y - d.y);
    let (cdx, cdy) = (c.x - d.x, c.y - d.y);

    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;

    let det = adx * (bdy * cd - bd * cdy) - ady * (bdx * cd - bd * cdx)
        + ad * (bdx * cdy - bdy * cdx);
    let permanent = (adx.abs() * ((bdy * cd).abs() + (bd * cdy).abs()))
        + (ady.abs() * ((bdx * cd).abs() + (bd * cdx).abs()))
        + (ad * ((bdx * cdy).abs() + (bdy * cdx).abs()));

    det > INCIRCLE_EPSILON * permanent
}

/// Whether segments `p1-p2` and `q1-q2` cross at a single interior point
pub fn segments_cross(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    use Orientation::*;
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);
    o1 != Collinear && o2 != Collinear && o3 != Collinear && o4 != Collinear && o1 != o2 && o3 != o4
}

/// Whether `p` lies on the closed segment `a-b`
pub fn on_segment(a: Point, b: Point, p: Point) -> bool {
    orientation(a, b, p) == Orientation::Collinear
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

/// Whether segments `p1-p2` and `q1-q2` share any point, including touching
/// and collinear overlap
pub fn segments_touch(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    segments_cross(p1, p2, q1, q2)
        || on_segment(p1, p2, q1)
        || on_segment(p1, p2, q2)
        || on_segment(q1, q2, p1)
        || on_segment(q1, q2, p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn orientation_of_unit_triangle() {
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert_eq!(orientation(a, b, c), Orientation::CounterClockwise);
        assert_eq!(orientation(a, c, b), Orientation::Clockwise);
        assert_eq!(orientation(a, b, p(2.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn circumcircle_excludes_cocircular_points() {
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0));
        assert!(in_circumcircle(a, b, c, p(0.5, 0.5)));
        // the fourth corner of the square sits exactly on the circle
        assert!(!in_circumcircle(a, b, c, p(0.0, 1.0)));
        assert!(!in_circumcircle(a, b, c, p(3.0, 3.0)));
    }

    #[test]
    fn crossing_requires_interior_intersection() {
        assert!(segments_cross(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0)));
        // sharing an endpoint is not a crossing
        assert!(!segments_cross(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)));
        assert!(segments_touch(p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)));
    }
}
