//! Constrained Delaunay triangulation of glyph contours
//!
//! The mesh is seeded with a large auxiliary triangle enclosing the glyph.
//! Contour and Steiner points are inserted one at a time, each insertion
//! followed by Lawson flips that restore the empty-circumcircle property.
//! Contour segments are then forced into the mesh by flipping the edges
//! that cross them, marked as constraints, and the faces inside the glyph
//! are found by flooding outward from the seed triangle and counting
//! constraint crossings (even-odd fill).

use super::contour::Contour;
use super::half_edge::{EdgeFlag, EdgeType, HalfEdgeId, HalfEdgeMesh, PointId};
use super::point::Point;
use super::predicates::{
    in_circumcircle, on_segment, orientation, segments_cross, segments_touch, Orientation,
};
use crate::error::{InvalidContourReason, MeshError, MeshResult};
use kurbo::Point as KPoint;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Number of auxiliary points seeding every triangulation. They always
/// occupy the first point ids.
pub const AUXILIARY_POINTS: usize = 3;

/// How far the seed triangle reaches beyond the glyph's bounding box, in
/// multiples of the box size
const SEED_MARGIN: f64 = 32.0;

/// Where a point falls in the current mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Face(HalfEdgeId),
    Edge(HalfEdgeId),
    Vertex(PointId),
}

/// A finished constrained Delaunay triangulation
#[derive(Debug, Clone)]
pub struct Triangulation {
    mesh: HalfEdgeMesh,
    interior: Vec<[PointId; 3]>,
    last_face: HalfEdgeId,
}

impl Triangulation {
    /// Triangulate the region enclosed by `contours` (even-odd rule),
    /// inserting `steiner` points as extra interior vertices.
    ///
    /// Input is validated before any half-edge is allocated; degenerate
    /// contours fail with [`MeshError::InvalidContour`].
    pub fn build(code_point: char, contours: &[Contour], steiner: &[KPoint]) -> MeshResult<Self> {
        validate_input(contours, steiner)
            .map_err(|reason| MeshError::InvalidContour { code_point, reason })?;

        let mut triangulation = Self::seeded(contours, steiner);

        let mut contour_ids = Vec::with_capacity(contours.len());
        for contour in contours {
            let mut ids = Vec::with_capacity(contour.len());
            for point in contour.points() {
                ids.push(triangulation.insert_point(*point, code_point)?);
            }
            contour_ids.push(ids);
        }
        for &position in steiner {
            triangulation.insert_point(Point::steiner(position), code_point)?;
        }

        for ids in &contour_ids {
            let n = ids.len();
            for i in 0..n {
                triangulation.insert_constraint(ids[i], ids[(i + 1) % n])?;
            }
        }

        triangulation.classify_interior()?;
        triangulation.mesh.validate()?;

        debug!(
            "Triangulated {:?}: {} points, {} half-edges, {} interior triangles",
            code_point,
            triangulation.mesh.points().len() - AUXILIARY_POINTS,
            triangulation.mesh.len(),
            triangulation.interior.len()
        );
        Ok(triangulation)
    }

    fn seeded(contours: &[Contour], steiner: &[KPoint]) -> Self {
        let positions = contours
            .iter()
            .flat_map(|c| c.points().iter().map(|p| p.position))
            .chain(steiner.iter().copied());
        let (mut min, mut max) = (
            KPoint::new(f64::INFINITY, f64::INFINITY),
            KPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        );
        for p in positions {
            min = KPoint::new(min.x.min(p.x), min.y.min(p.y));
            max = KPoint::new(max.x.max(p.x), max.y.max(p.y));
        }
        let center = min.midpoint(max);
        let size = (max.x - min.x).max(max.y - min.y).max(1.0);
        let reach = size * SEED_MARGIN;

        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_point(Point::auxiliary(center.x - reach, center.y - reach));
        let b = mesh.add_point(Point::auxiliary(center.x + reach, center.y - reach));
        let c = mesh.add_point(Point::auxiliary(center.x, center.y + reach));
        let first = mesh.add_triangle(a, b, c);
        for e in [first, mesh.next(first), mesh.next(mesh.next(first))] {
            mesh.set_type(e, EdgeType::Boundary);
        }
        Self {
            mesh,
            interior: Vec::new(),
            last_face: first,
        }
    }

    pub fn mesh(&self) -> &HalfEdgeMesh {
        &self.mesh
    }

    /// Counter-clockwise triangles inside the glyph, as point ids
    pub fn interior_triangles(&self) -> &[[PointId; 3]] {
        &self.interior
    }

    /// Every constrained edge once, as `(origin, destination)` point ids
    /// oriented the way the contour runs
    pub fn constraint_edges(&self) -> Vec<(PointId, PointId)> {
        let mut edges = Vec::new();
        for e in 0..self.mesh.len() {
            if self.mesh.edge_type(e) == EdgeType::Constraint
                && self.mesh.is_flagged(e, EdgeFlag::Contour)
            {
                edges.push((self.mesh.origin(e), self.mesh.destination(e)));
            }
        }
        edges
    }

    fn insert_point(&mut self, point: Point, code_point: char) -> MeshResult<PointId> {
        match self.locate(point.position)? {
            Location::Vertex(_) => Err(MeshError::InvalidContour {
                code_point,
                reason: InvalidContourReason::DuplicatePoint {
                    x: point.position.x,
                    y: point.position.y,
                },
            }),
            Location::Face(e) => {
                let p = self.mesh.add_point(point);
                let outer = self.mesh.split_face(e, p)?;
                self.last_face = outer[0];
                for edge in outer {
                    self.legalize(edge)?;
                }
                Ok(p)
            }
            Location::Edge(e) => {
                if self.mesh.edge_type(e) != EdgeType::Auxiliary {
                    return Err(MeshError::topology(format!(
                        "point ({}, {}) falls on {:?} edge {e}",
                        point.position.x,
                        point.position.y,
                        self.mesh.edge_type(e)
                    )));
                }
                let p = self.mesh.add_point(point);
                let outer = self.mesh.split_edge(e, p)?;
                self.last_face = outer[0];
                for edge in outer {
                    self.legalize(edge)?;
                }
                Ok(p)
            }
        }
    }

    /// Walk from the last touched face towards `target`, crossing any edge
    /// that has the target strictly on its right.
    fn locate(&self, target: KPoint) -> MeshResult<Location> {
        let mut e = self.last_face;
        for _ in 0..self.mesh.len() + 3 {
            match self.classify_in_face(e, target) {
                Ok(location) => return Ok(location),
                Err(outside) => match self.mesh.sibling(outside) {
                    Some(s) => e = s,
                    None => {
                        return Err(MeshError::topology(format!(
                            "point ({}, {}) lies outside the seed triangle",
                            target.x, target.y
                        )))
                    }
                },
            }
        }
        trace!("Point walk did not settle, scanning all faces");
        for [e, _, _] in self.mesh.triangles()? {
            if let Ok(location) = self.classify_in_face(e, target) {
                return Ok(location);
            }
        }
        Err(MeshError::topology(format!(
            "no face contains point ({}, {})",
            target.x, target.y
        )))
    }

    /// Locate `target` relative to the face of `e`, or return the first edge
    /// of the face that has it strictly on the outside.
    fn classify_in_face(&self, e: HalfEdgeId, target: KPoint) -> Result<Location, HalfEdgeId> {
        let edges = [e, self.mesh.next(e), self.mesh.next(self.mesh.next(e))];
        let mut on_edge = Vec::with_capacity(2);
        for edge in edges {
            let a = self.mesh.position(self.mesh.origin(edge));
            let b = self.mesh.position(self.mesh.destination(edge));
            match orientation(a, b, target) {
                Orientation::Clockwise => return Err(edge),
                Orientation::Collinear => on_edge.push(edge),
                Orientation::CounterClockwise => {}
            }
        }
        Ok(match on_edge.as_slice() {
            [] => Location::Face(e),
            [edge] => Location::Edge(*edge),
            [first, second, ..] => {
                // two collinear edges meet at the shared corner
                if self.mesh.destination(*first) == self.mesh.origin(*second) {
                    Location::Vertex(self.mesh.origin(*second))
                } else {
                    Location::Vertex(self.mesh.origin(*first))
                }
            }
        })
    }

    /// Whether the edge of `e` violates the empty-circumcircle property
    fn is_illegal(&self, e: HalfEdgeId) -> bool {
        let Some(s) = self.mesh.sibling(e) else {
            return false;
        };
        let a = self.mesh.position(self.mesh.origin(e));
        let b = self.mesh.position(self.mesh.destination(e));
        let c = self.mesh.position(self.mesh.apex(e));
        let d = self.mesh.position(self.mesh.apex(s));
        in_circumcircle(a, b, c, d) && is_strictly_convex(a, b, c, d)
    }

    /// Restore the Delaunay property around a freshly inserted point. `e`
    /// faces the new point; after a flip the two edges beyond the flipped
    /// one face it and are checked in turn.
    fn legalize(&mut self, e: HalfEdgeId) -> MeshResult<()> {
        let mut stack = vec![e];
        let cap = 64 * (self.mesh.len() + 16);
        let mut steps = 0;
        while let Some(e) = stack.pop() {
            steps += 1;
            if steps > cap {
                return Err(MeshError::topology("edge legalisation did not terminate"));
            }
            if !self.mesh.is_flippable(e) || !self.is_illegal(e) {
                continue;
            }
            let Some(s) = self.mesh.sibling(e) else {
                continue;
            };
            let s1 = self.mesh.next(s);
            let s2 = self.mesh.next(s1);
            self.mesh.flip(e)?;
            stack.push(s1);
            stack.push(s2);
        }
        Ok(())
    }

    /// Lawson's flip loop over an arbitrary set of edges
    fn restore_delaunay(&mut self, edges: Vec<HalfEdgeId>) -> MeshResult<()> {
        let mut stack = edges;
        let cap = 64 * (self.mesh.len() + 16);
        let mut steps = 0;
        while let Some(e) = stack.pop() {
            steps += 1;
            if steps > cap {
                return Err(MeshError::topology("Delaunay restoration did not terminate"));
            }
            if !self.mesh.is_flippable(e) || !self.is_illegal(e) {
                continue;
            }
            let Some(s) = self.mesh.sibling(e) else {
                continue;
            };
            let outer = [
                self.mesh.next(e),
                self.mesh.next(self.mesh.next(e)),
                self.mesh.next(s),
                self.mesh.next(self.mesh.next(s)),
            ];
            self.mesh.flip(e)?;
            stack.extend(outer);
        }
        Ok(())
    }

    /// Force the segment `a -> b` into the mesh and mark it as a constraint.
    fn insert_constraint(&mut self, a: PointId, b: PointId) -> MeshResult<()> {
        if let Some(e) = self.mesh.find_edge(a, b) {
            self.constrain(e);
            return Ok(());
        }

        let pa = self.mesh.position(a);
        let pb = self.mesh.position(b);
        let mut crossing: VecDeque<HalfEdgeId> = self.crossing_edges(a, b, pa, pb)?.into();

        let cap = 64 * (crossing.len() + 1) * (crossing.len() + 1) + self.mesh.len();
        let mut steps = 0;
        let mut created = Vec::new();
        while let Some(e) = crossing.pop_front() {
            steps += 1;
            if steps > cap {
                return Err(MeshError::topology(format!(
                    "could not recover contour segment {a}->{b}"
                )));
            }
            let Some(s) = self.mesh.sibling(e) else {
                return Err(MeshError::topology(format!("crossing edge {e} lost its sibling")));
            };
            let u = self.mesh.position(self.mesh.origin(e));
            let v = self.mesh.position(self.mesh.destination(e));
            let c = self.mesh.position(self.mesh.apex(e));
            let d = self.mesh.position(self.mesh.apex(s));
            if !is_strictly_convex(u, v, c, d) {
                crossing.push_back(e);
                continue;
            }
            self.mesh.flip(e)?;
            if self.crosses(e, a, b, pa, pb) {
                crossing.push_back(e);
            } else {
                created.push(e);
            }
        }

        let Some(e) = self.mesh.find_edge(a, b) else {
            return Err(MeshError::topology(format!(
                "contour segment {a}->{b} missing after edge flips"
            )));
        };
        self.constrain(e);

        // the faces around every new edge, the cavity rim included
        let mut suspects = Vec::with_capacity(6 * (created.len() + 1));
        for edge in created.into_iter().chain([e]) {
            for side in [Some(edge), self.mesh.sibling(edge)].into_iter().flatten() {
                let next = self.mesh.next(side);
                suspects.extend([side, next, self.mesh.next(next)]);
            }
        }
        self.restore_delaunay(suspects)
    }

    /// Edges the segment `a -> b` crosses, in order from `a`. Starts in
    /// the face around `a` the segment leaves through and steps from face
    /// to face until it reaches `b`.
    fn crossing_edges(&self, a: PointId, b: PointId, pa: KPoint, pb: KPoint) -> MeshResult<Vec<HalfEdgeId>> {
        let first = self
            .mesh
            .outgoing_edges(a)
            .into_iter()
            .map(|e| self.mesh.next(e))
            .find(|&opposite| self.crosses(opposite, a, b, pa, pb));
        let Some(mut e) = first else {
            return Err(MeshError::topology(format!(
                "contour segment {a}->{b} leaves no face around {a}"
            )));
        };

        let mut crossing = Vec::new();
        for _ in 0..self.mesh.len() {
            if self.mesh.edge_type(e) != EdgeType::Auxiliary {
                return Err(MeshError::topology(format!(
                    "contour segment {a}->{b} crosses {:?} edge {e}",
                    self.mesh.edge_type(e)
                )));
            }
            crossing.push(e);
            let Some(s) = self.mesh.sibling(e) else {
                return Err(MeshError::topology(format!(
                    "contour segment {a}->{b} leaves the mesh through edge {e}"
                )));
            };
            let s1 = self.mesh.next(s);
            let s2 = self.mesh.next(s1);
            if self.mesh.origin(s2) == b {
                return Ok(crossing);
            }
            e = if self.crosses(s1, a, b, pa, pb) {
                s1
            } else if self.crosses(s2, a, b, pa, pb) {
                s2
            } else {
                return Err(MeshError::topology(format!(
                    "contour segment {a}->{b} ends inside the face of edge {s}"
                )));
            };
        }
        Err(MeshError::topology(format!(
            "walk along contour segment {a}->{b} did not reach {b}"
        )))
    }

    fn crosses(&self, e: HalfEdgeId, a: PointId, b: PointId, pa: KPoint, pb: KPoint) -> bool {
        let (o, d) = (self.mesh.origin(e), self.mesh.destination(e));
        if o == a || o == b || d == a || d == b {
            return false;
        }
        segments_cross(pa, pb, self.mesh.position(o), self.mesh.position(d))
    }

    /// Mark the contour edge `e` (running along the contour) as a constraint
    fn constrain(&mut self, e: HalfEdgeId) {
        self.mesh.set_type(e, EdgeType::Constraint);
        self.mesh.set_flag(e, EdgeFlag::Contour);
        let curve = self.mesh.point(self.mesh.origin(e)).is_curve_control()
            || self.mesh.point(self.mesh.destination(e)).is_curve_control();
        if curve {
            self.mesh.flag_edge(e, EdgeFlag::Bezier);
        }
    }

    /// Flood the faces from the seed triangle's corners, toggling inside /
    /// outside at every constraint. Faces inside get the Draw flag on all
    /// three of their half-edges.
    fn classify_interior(&mut self) -> MeshResult<()> {
        let triangles = self.mesh.triangles()?;
        let mut face_of = vec![0usize; self.mesh.len()];
        for (t, tri) in triangles.iter().enumerate() {
            for &e in tri {
                face_of[e] = t;
            }
        }

        self.mesh.clear_all(EdgeFlag::Read);
        self.mesh.clear_all(EdgeFlag::Draw);

        let mut inside = vec![false; triangles.len()];
        let mut queue = VecDeque::new();
        for (t, tri) in triangles.iter().enumerate() {
            if tri
                .iter()
                .any(|&e| self.mesh.point(self.mesh.origin(e)).is_auxiliary())
            {
                for &e in tri {
                    self.mesh.set_flag(e, EdgeFlag::Read);
                }
                queue.push_back(t);
            }
        }

        while let Some(t) = queue.pop_front() {
            for &e in &triangles[t] {
                let Some(s) = self.mesh.sibling(e) else {
                    continue;
                };
                if self.mesh.is_flagged(s, EdgeFlag::Read) {
                    continue;
                }
                let n = face_of[s];
                inside[n] = if self.mesh.edge_type(e) == EdgeType::Constraint {
                    !inside[t]
                } else {
                    inside[t]
                };
                for &f in &triangles[n] {
                    self.mesh.set_flag(f, EdgeFlag::Read);
                }
                queue.push_back(n);
            }
        }

        self.interior.clear();
        for (t, tri) in triangles.iter().enumerate() {
            if !self.mesh.is_flagged(tri[0], EdgeFlag::Read) {
                return Err(MeshError::topology(format!(
                    "face of half-edge {} is unreachable",
                    tri[0]
                )));
            }
            if inside[t] {
                for &e in tri {
                    self.mesh.set_flag(e, EdgeFlag::Draw);
                }
                self.interior.push(tri.map(|e| self.mesh.origin(e)));
            }
        }
        Ok(())
    }
}

/// Whether the quadrilateral formed by edge `u-v` and its two apexes `c`
/// and `d` is strictly convex, so the diagonal may be swapped.
fn is_strictly_convex(u: KPoint, v: KPoint, c: KPoint, d: KPoint) -> bool {
    let side_u = orientation(c, d, u);
    let side_v = orientation(c, d, v);
    side_u != Orientation::Collinear && side_v != Orientation::Collinear && side_u != side_v
}

/// Points closer than this, relative to the extent of the input, count as
/// one point. Point location would merge them anyway.
const DUPLICATE_EPSILON: f64 = 1e-9;

/// First point that coincides with its neighbour, up to
/// [`DUPLICATE_EPSILON`]. `sorted` is ordered by x.
fn near_duplicate(sorted: &[KPoint]) -> Option<KPoint> {
    let (first, last) = (sorted.first()?, sorted.last()?);
    let (low, high) = sorted.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.y), hi.max(p.y))
    });
    let extent = (last.x - first.x).max(high - low).max(1.0);
    let tolerance = DUPLICATE_EPSILON * extent;

    for (i, p) in sorted.iter().enumerate() {
        for q in &sorted[i + 1..] {
            if q.x - p.x > tolerance {
                break;
            }
            if (q.y - p.y).abs() <= tolerance {
                return Some(*p);
            }
        }
    }
    None
}

/// Reject input the triangulation cannot represent
fn validate_input(contours: &[Contour], steiner: &[KPoint]) -> Result<(), InvalidContourReason> {
    if contours.is_empty() {
        return Err(InvalidContourReason::Empty);
    }

    let mut positions = Vec::new();
    for (index, contour) in contours.iter().enumerate() {
        if contour.len() < 3 {
            return Err(InvalidContourReason::TooFewPoints {
                contour: index,
                points: contour.len(),
            });
        }
        positions.extend(contour.points().iter().map(|p| p.position));
    }
    positions.extend_from_slice(steiner);

    if let Some(p) = positions.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(InvalidContourReason::NonFinite { x: p.x, y: p.y });
    }

    positions.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    if let Some(p) = near_duplicate(&positions) {
        return Err(InvalidContourReason::DuplicatePoint { x: p.x, y: p.y });
    }

    for (index, contour) in contours.iter().enumerate() {
        if contour.signed_area() == 0.0 {
            return Err(InvalidContourReason::ZeroArea { contour: index });
        }
    }

    let segments: Vec<(usize, usize, usize, KPoint, KPoint)> = contours
        .iter()
        .enumerate()
        .flat_map(|(c, contour)| {
            let n = contour.len();
            contour.segments().map(move |(i, a, b)| (c, i, n, a, b))
        })
        .collect();

    // sweep in x: only segments whose x ranges overlap can touch
    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by(|&i, &j| {
        let (a, b) = (segments[i], segments[j]);
        a.3.x.min(a.4.x).total_cmp(&b.3.x.min(b.4.x))
    });
    for (k, &i) in order.iter().enumerate() {
        let (c1, s1, n, a1, b1) = segments[i];
        let right = a1.x.max(b1.x);
        for &j in &order[k + 1..] {
            let (c2, s2, _, a2, b2) = segments[j];
            if a2.x.min(b2.x) > right {
                break;
            }
            let adjacent = c1 == c2 && ((s1 + 1) % n == s2 || (s2 + 1) % n == s1);
            let hit = if adjacent {
                // consecutive segments may only share their common endpoint
                on_segment(a1, b1, a2) && a2 != b1 && a2 != a1
                    || on_segment(a1, b1, b2) && b2 != a1 && b2 != b1
                    || on_segment(a2, b2, a1) && a1 != b2 && a1 != a2
                    || on_segment(a2, b2, b1) && b1 != a2 && b1 != b2
            } else {
                segments_touch(a1, b1, a2, b2)
            };
            if hit {
                let (first, second) = if i < j {
                    ((c1, s1), (c2, s2))
                } else {
                    ((c2, s2), (c1, s1))
                };
                return Err(InvalidContourReason::SelfIntersection { first, second });
            }
        }
    }

    for &p in steiner {
        if segments.iter().any(|&(_, _, _, a, b)| on_segment(a, b, p)) {
            return Err(InvalidContourReason::SteinerOnConstraint { x: p.x, y: p.y });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contour(points: &[(f64, f64)]) -> Contour {
        Contour::from_positions(points.iter().map(|&(x, y)| KPoint::new(x, y)))
    }

    fn assert_locally_delaunay(t: &Triangulation) {
        let mesh = t.mesh();
        for e in 0..mesh.len() {
            let Some(s) = mesh.sibling(e) else { continue };
            if mesh.edge_type(e) != EdgeType::Auxiliary {
                continue;
            }
            let a = mesh.position(mesh.origin(e));
            let b = mesh.position(mesh.destination(e));
            let c = mesh.position(mesh.apex(e));
            let d = mesh.position(mesh.apex(s));
            assert!(
                !in_circumcircle(a, b, c, d),
                "edge {e} is not locally Delaunay"
            );
        }
    }

    #[test]
    fn triangle_is_one_face() {
        let t = Triangulation::build('t', &[contour(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)])], &[])
            .unwrap();
        assert_eq!(t.interior_triangles().len(), 1);
        assert_eq!(t.constraint_edges().len(), 3);
    }

    #[test]
    fn square_has_two_triangles() {
        let square = contour(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let t = Triangulation::build('o', &[square], &[]).unwrap();
        assert_eq!(t.interior_triangles().len(), 2);
        assert!(t.mesh().validate().is_ok());
        assert_locally_delaunay(&t);
    }

    #[test]
    fn concave_polygon_keeps_its_contour() {
        // an L shape, clockwise
        let points = [
            (0.0, 0.0),
            (0.0, 30.0),
            (10.0, 30.0),
            (10.0, 10.0),
            (30.0, 10.0),
            (30.0, 0.0),
        ];
        let t = Triangulation::build('L', &[contour(&points)], &[]).unwrap();
        assert_eq!(t.interior_triangles().len(), points.len() - 2);

        let mut expected: Vec<(PointId, PointId)> = (0..points.len())
            .map(|i| {
                (
                    AUXILIARY_POINTS + i,
                    AUXILIARY_POINTS + (i + 1) % points.len(),
                )
            })
            .collect();
        let mut edges = t.constraint_edges();
        expected.sort();
        edges.sort();
        assert_eq!(edges, expected);
        assert_locally_delaunay(&t);
    }

    #[test]
    fn hole_is_left_empty() {
        let outer = contour(&[(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (0.0, 30.0)]);
        let inner = contour(&[(10.0, 10.0), (10.0, 20.0), (20.0, 20.0), (20.0, 10.0)]);
        let t = Triangulation::build('o', &[outer, inner], &[]).unwrap();
        // n + 2h - 2 triangles for n vertices and h holes
        assert_eq!(t.interior_triangles().len(), 8);
        for tri in t.interior_triangles() {
            let centroid = tri
                .iter()
                .map(|&p| t.mesh().position(p).to_vec2())
                .fold(kurbo::Vec2::ZERO, |acc, v| acc + v)
                / 3.0;
            let inside_hole =
                centroid.x > 10.0 && centroid.x < 20.0 && centroid.y > 10.0 && centroid.y < 20.0;
            assert!(!inside_hole, "triangle {tri:?} covers the hole");
        }
    }

    #[test]
    fn steiner_point_adds_faces() {
        let square = contour(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let t = Triangulation::build('o', &[square], &[KPoint::new(4.0, 6.0)]).unwrap();
        assert_eq!(t.interior_triangles().len(), 4);
    }

    #[test]
    fn collinear_contour_points_are_split_edges() {
        let points = [(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let t = Triangulation::build('o', &[contour(&points)], &[]).unwrap();
        assert_eq!(t.interior_triangles().len(), 3);
        assert!(t.mesh().validate().is_ok());
    }

    #[test]
    fn rejects_too_few_points() {
        let err = Triangulation::build('x', &[contour(&[(0.0, 0.0), (1.0, 0.0)])], &[]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidContour {
                reason: InvalidContourReason::TooFewPoints { .. },
                ..
            }
        ));
    }

    #[test]
    fn rejects_bow_tie() {
        let bow_tie = contour(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        let err = Triangulation::build('x', &[bow_tie], &[]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidContour {
                reason: InvalidContourReason::SelfIntersection { .. },
                ..
            }
        ));
    }

    #[test]
    fn rejects_duplicate_points() {
        let a = contour(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
        let b = contour(&[(0.0, 0.0), (-10.0, 0.0), (0.0, -10.0)]);
        let err = Triangulation::build('x', &[a, b], &[]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidContour {
                reason: InvalidContourReason::DuplicatePoint { .. },
                ..
            }
        ));
    }

    #[test]
    fn rejects_steiner_on_contour() {
        let square = contour(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let err = Triangulation::build('x', &[square], &[KPoint::new(5.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidContour {
                reason: InvalidContourReason::SteinerOnConstraint { .. },
                ..
            }
        ));
    }

    #[test]
    fn near_coincident_points_fail_validation() {
        let a = contour(&[(0.0, 0.0), (1000.0, 0.0), (0.0, 1000.0)]);
        let b = contour(&[(1e-10, 1e-10), (-1000.0, 0.0), (0.0, -1000.0)]);
        assert!(matches!(
            validate_input(&[a, b], &[]),
            Err(InvalidContourReason::DuplicatePoint { .. })
        ));
    }

    #[test]
    fn close_but_distinct_points_pass_validation() {
        let square = contour(&[(0.0, 0.0), (1000.0, 0.0), (1000.0, 1000.0), (0.0, 1000.0)]);
        let steiner = [KPoint::new(500.0, 500.0), KPoint::new(500.0, 500.01)];
        assert_eq!(validate_input(&[square], &steiner), Ok(()));
    }

    #[test]
    fn crossing_far_apart_in_contour_order_is_found() {
        // segments 0 and 4 cross; the sweep meets them out of order
        let zigzag = contour(&[
            (0.0, 0.0),
            (100.0, 100.0),
            (100.0, 40.0),
            (60.0, 40.0),
            (60.0, -20.0),
            (0.0, 50.0),
        ]);
        assert!(matches!(
            validate_input(&[zigzag], &[]),
            Err(InvalidContourReason::SelfIntersection { .. })
        ));
    }

    #[test]
    fn many_sided_polygon_keeps_every_side() {
        let n = 2000;
        let points: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / n as f64;
                (1e5 * angle.cos(), 1e5 * angle.sin())
            })
            .collect();
        let t = Triangulation::build('o', &[contour(&points)], &[]).unwrap();
        assert_eq!(t.interior_triangles().len(), n - 2);
        assert_eq!(t.constraint_edges().len(), n);
    }
}
