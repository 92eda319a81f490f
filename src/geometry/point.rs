//! Mesh vertices for glyph triangulation
//!
//! A point is shared by every half-edge that starts at it. Its position is
//! fixed once inserted; only its flags may change afterwards.

use kurbo::Point as KPoint;

/// Independent markers carried by a mesh point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointFlag {
    /// Lies on one of the glyph's contours
    Contour,
    /// Produced while flattening a curve segment (not an on-curve point)
    CurveControl,
    /// Interior point added to improve the triangulation
    Steiner,
    /// Vertex of the enclosing seed triangle, never part of the glyph
    Auxiliary,
}

impl PointFlag {
    const fn bit(self) -> u8 {
        match self {
            PointFlag::Contour => 1 << 0,
            PointFlag::CurveControl => 1 << 1,
            PointFlag::Steiner => 1 << 2,
            PointFlag::Auxiliary => 1 << 3,
        }
    }
}

/// Fixed-size set of [`PointFlag`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointFlags(u8);

impl PointFlags {
    pub const EMPTY: PointFlags = PointFlags(0);

    pub const fn with(self, flag: PointFlag) -> Self {
        PointFlags(self.0 | flag.bit())
    }

    pub fn contains(self, flag: PointFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn insert(&mut self, flag: PointFlag) {
        self.0 |= flag.bit();
    }

    pub fn remove(&mut self, flag: PointFlag) {
        self.0 &= !flag.bit();
    }
}

/// A vertex of the triangulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: KPoint,
    pub flags: PointFlags,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: KPoint::new(x, y),
            flags: PointFlags::EMPTY,
        }
    }

    /// A point on a glyph contour, optionally produced by curve flattening
    pub fn contour(position: KPoint, curve_control: bool) -> Self {
        let mut flags = PointFlags::EMPTY.with(PointFlag::Contour);
        if curve_control {
            flags.insert(PointFlag::CurveControl);
        }
        Self { position, flags }
    }

    pub fn steiner(position: KPoint) -> Self {
        Self {
            position,
            flags: PointFlags::EMPTY.with(PointFlag::Steiner),
        }
    }

    pub(crate) fn auxiliary(x: f64, y: f64) -> Self {
        Self {
            position: KPoint::new(x, y),
            flags: PointFlags::EMPTY.with(PointFlag::Auxiliary),
        }
    }

    pub fn is_contour_vertex(&self) -> bool {
        self.flags.contains(PointFlag::Contour)
    }

    pub fn is_curve_control(&self) -> bool {
        self.flags.contains(PointFlag::CurveControl)
    }

    pub fn is_auxiliary(&self) -> bool {
        self.flags.contains(PointFlag::Auxiliary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_independent() {
        let mut p = Point::contour(KPoint::new(1.0, 2.0), true);
        assert!(p.is_contour_vertex());
        assert!(p.is_curve_control());
        assert!(!p.is_auxiliary());

        p.flags.remove(PointFlag::CurveControl);
        assert!(p.is_contour_vertex());
        assert!(!p.is_curve_control());
    }

    #[test]
    fn steiner_points_are_not_on_the_contour() {
        let p = Point::steiner(KPoint::new(0.0, 0.0));
        assert!(!p.is_contour_vertex());
        assert!(p.flags.contains(PointFlag::Steiner));
    }
}
