//! Half-edge mesh with index-based arena storage
//!
//! Faces are not stored. Every triangle is the 3-cycle of `next` links that
//! starts at any of its half-edges. Interior edges are sibling pairs of
//! half-edges pointing in opposite directions; an edge on the hull of the
//! mesh is a single half-edge of type [`EdgeType::Boundary`] with no sibling.
//!
//! Points and half-edges live in plain vectors and refer to each other by
//! index, so a finished mesh is a cheap-to-share immutable value.

use super::point::Point;
use crate::error::{MeshError, MeshResult};

/// Index into the half-edge arena
pub type HalfEdgeId = usize;
/// Index into the point arena
pub type PointId = usize;

/// Role of an edge in the triangulation. Both half-edges of an edge always
/// share the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeType {
    /// Free interior edge, may be flipped
    #[default]
    Auxiliary,
    /// Hull edge without a sibling
    Boundary,
    /// Edge of the input contour, never flipped or removed
    Constraint,
}

/// Per-half-edge processing markers. Flags are independent of each other
/// and of the sibling's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeFlag {
    /// Scratch marker for traversals
    Algorithm,
    /// The face on this side is part of the filled glyph
    Draw,
    /// The face on this side has been visited by the interior classifier
    Read,
    /// The edge belongs to a flattened curve segment
    Bezier,
    /// The half-edge runs along an input contour, in the contour's direction
    Contour,
}

impl EdgeFlag {
    pub const COUNT: usize = 5;

    const fn index(self) -> usize {
        match self {
            EdgeFlag::Algorithm => 0,
            EdgeFlag::Draw => 1,
            EdgeFlag::Read => 2,
            EdgeFlag::Bezier => 3,
            EdgeFlag::Contour => 4,
        }
    }
}

/// One directed side of a mesh edge
#[derive(Debug, Clone, PartialEq)]
pub struct HalfEdge {
    origin: PointId,
    next: HalfEdgeId,
    sibling: Option<HalfEdgeId>,
    edge_type: EdgeType,
    flags: [bool; EdgeFlag::COUNT],
}

impl HalfEdge {
    fn new(origin: PointId, next: HalfEdgeId) -> Self {
        Self {
            origin,
            next,
            sibling: None,
            edge_type: EdgeType::Auxiliary,
            flags: [false; EdgeFlag::COUNT],
        }
    }

    pub fn origin(&self) -> PointId {
        self.origin
    }

    pub fn next(&self) -> HalfEdgeId {
        self.next
    }

    pub fn sibling(&self) -> Option<HalfEdgeId> {
        self.sibling
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    pub fn is_flagged(&self, flag: EdgeFlag) -> bool {
        self.flags[flag.index()]
    }
}

/// Arena of points and half-edges forming a triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalfEdgeMesh {
    points: Vec<Point>,
    half_edges: Vec<HalfEdge>,
    /// Some half-edge leaving each point, the entry point for fan walks
    outgoing: Vec<Option<HalfEdgeId>>,
}

impl HalfEdgeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, id: PointId) -> &Point {
        &self.points[id]
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id]
    }

    pub fn len(&self) -> usize {
        self.half_edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.half_edges.is_empty()
    }

    pub fn add_point(&mut self, point: Point) -> PointId {
        self.points.push(point);
        self.outgoing.push(None);
        self.points.len() - 1
    }

    fn push_half_edge(&mut self, origin: PointId, next: HalfEdgeId) -> HalfEdgeId {
        let id = self.half_edges.len();
        self.half_edges.push(HalfEdge::new(origin, next));
        self.outgoing[origin] = Some(id);
        id
    }

    pub fn origin(&self, e: HalfEdgeId) -> PointId {
        self.half_edges[e].origin
    }

    /// Point the half-edge points at (origin of its successor)
    pub fn destination(&self, e: HalfEdgeId) -> PointId {
        self.half_edges[self.half_edges[e].next].origin
    }

    pub fn next(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[e].next
    }

    pub fn sibling(&self, e: HalfEdgeId) -> Option<HalfEdgeId> {
        self.half_edges[e].sibling
    }

    pub fn edge_type(&self, e: HalfEdgeId) -> EdgeType {
        self.half_edges[e].edge_type
    }

    /// Point opposite `e` in its triangle
    pub fn apex(&self, e: HalfEdgeId) -> PointId {
        self.origin(self.next(self.next(e)))
    }

    /// Position of a point in the arena
    pub fn position(&self, p: PointId) -> kurbo::Point {
        self.points[p].position
    }

    /// Create a triangle `a -> b -> c` as a closed 3-cycle with no siblings.
    /// Returns the half-edge starting at `a`.
    pub fn add_triangle(&mut self, a: PointId, b: PointId, c: PointId) -> HalfEdgeId {
        let base = self.half_edges.len();
        self.push_half_edge(a, base + 1);
        self.push_half_edge(b, base + 2);
        self.push_half_edge(c, base);
        base
    }

    /// Pair two half-edges as siblings. `a` must run opposite to `b`.
    pub fn set_siblings(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        debug_assert_eq!(self.origin(a), self.destination(b));
        debug_assert_eq!(self.destination(a), self.origin(b));
        self.half_edges[a].sibling = Some(b);
        self.half_edges[b].sibling = Some(a);
    }

    pub fn set_next(&mut self, e: HalfEdgeId, next: HalfEdgeId) {
        self.half_edges[e].next = next;
    }

    /// Set the type of the edge `e` belongs to. The sibling, when present,
    /// receives the same type: both sides of an edge always agree.
    pub fn set_type(&mut self, e: HalfEdgeId, edge_type: EdgeType) {
        self.half_edges[e].edge_type = edge_type;
        if let Some(s) = self.half_edges[e].sibling {
            self.half_edges[s].edge_type = edge_type;
        }
    }

    /// Set `flag` on this half-edge only. The sibling is left untouched.
    pub fn set_flag(&mut self, e: HalfEdgeId, flag: EdgeFlag) {
        self.half_edges[e].flags[flag.index()] = true;
    }

    /// Clear `flag` on this half-edge only. The sibling is left untouched.
    pub fn clear_flag(&mut self, e: HalfEdgeId, flag: EdgeFlag) {
        self.half_edges[e].flags[flag.index()] = false;
    }

    /// Set `flag` on both half-edges of the edge `e` belongs to.
    pub fn flag_edge(&mut self, e: HalfEdgeId, flag: EdgeFlag) {
        self.set_flag(e, flag);
        if let Some(s) = self.half_edges[e].sibling {
            self.set_flag(s, flag);
        }
    }

    pub fn is_flagged(&self, e: HalfEdgeId, flag: EdgeFlag) -> bool {
        self.half_edges[e].is_flagged(flag)
    }

    /// Clear `flag` on every half-edge in the mesh
    pub fn clear_all(&mut self, flag: EdgeFlag) {
        for he in &mut self.half_edges {
            he.flags[flag.index()] = false;
        }
    }

    /// Find the half-edge whose successor is `e` by walking the successor
    /// chain. The walk is capped at the mesh size, so an open cycle is
    /// reported instead of looping forever.
    pub fn prev(&self, e: HalfEdgeId) -> MeshResult<HalfEdgeId> {
        let mut current = self.next(e);
        for _ in 0..self.half_edges.len() {
            if self.next(current) == e {
                return Ok(current);
            }
            current = self.next(current);
        }
        Err(MeshError::topology(format!(
            "successor cycle through half-edge {e} never returns to it"
        )))
    }

    /// Whether `e` may be flipped: it has a sibling and is neither a hull
    /// edge nor a constraint
    pub fn is_flippable(&self, e: HalfEdgeId) -> bool {
        self.sibling(e).is_some() && self.edge_type(e) == EdgeType::Auxiliary
    }

    /// Replace the diagonal `e` of the quadrilateral formed by its two
    /// triangles with the other diagonal.
    ///
    /// With `e = a -> b` in triangle `a b c` and its sibling in `b a d`, the
    /// result is `e = c -> d` in `c d b` and the sibling `d -> c` in `d c a`.
    /// The four outer half-edges keep their identity. The flipped pair is
    /// recycled in place and comes back with all flags cleared.
    pub fn flip(&mut self, e: HalfEdgeId) -> MeshResult<()> {
        let Some(s) = self.sibling(e) else {
            return Err(MeshError::topology(format!(
                "cannot flip half-edge {e} without a sibling"
            )));
        };
        if self.edge_type(e) != EdgeType::Auxiliary {
            return Err(MeshError::topology(format!(
                "cannot flip {:?} half-edge {e}",
                self.edge_type(e)
            )));
        }

        let e1 = self.next(e);
        let e2 = self.next(e1);
        let s1 = self.next(s);
        let s2 = self.next(s1);
        if self.next(e2) != e || self.next(s2) != s {
            return Err(MeshError::topology(format!(
                "half-edge {e} or its sibling {s} is not on a closed 3-cycle"
            )));
        }

        let (a, b) = (self.origin(e), self.origin(s));
        let c = self.origin(e2);
        let d = self.origin(s2);

        self.half_edges[e].origin = c;
        self.half_edges[e].next = s2;
        self.half_edges[s2].next = e1;
        self.half_edges[e1].next = e;

        self.half_edges[s].origin = d;
        self.half_edges[s].next = e2;
        self.half_edges[e2].next = s1;
        self.half_edges[s1].next = s;

        self.half_edges[e].flags = [false; EdgeFlag::COUNT];
        self.half_edges[s].flags = [false; EdgeFlag::COUNT];

        // a and b may have lost their recorded outgoing edge
        self.outgoing[a] = Some(s1);
        self.outgoing[b] = Some(e1);
        self.outgoing[c] = Some(e);
        self.outgoing[d] = Some(s);
        Ok(())
    }

    /// Insert point `p` inside the triangle of `e`, splitting it into three.
    /// Returns the three original half-edges, which now face `p`.
    pub fn split_face(&mut self, e: HalfEdgeId, p: PointId) -> MeshResult<[HalfEdgeId; 3]> {
        let e0 = e;
        let e1 = self.next(e0);
        let e2 = self.next(e1);
        if self.next(e2) != e0 {
            return Err(MeshError::topology(format!(
                "face of half-edge {e} is not a 3-cycle"
            )));
        }
        let (a, b, c) = (self.origin(e0), self.origin(e1), self.origin(e2));

        // a b p, b c p, c a p
        let base = self.half_edges.len();
        let (bp, pa) = (base, base + 1);
        let (cp, pb) = (base + 2, base + 3);
        let (ap, pc) = (base + 4, base + 5);
        self.push_half_edge(b, pa);
        self.push_half_edge(p, e0);
        self.push_half_edge(c, pb);
        self.push_half_edge(p, e1);
        self.push_half_edge(a, pc);
        self.push_half_edge(p, e2);

        self.half_edges[e0].next = bp;
        self.half_edges[e1].next = cp;
        self.half_edges[e2].next = ap;

        self.set_siblings(bp, pb);
        self.set_siblings(cp, pc);
        self.set_siblings(ap, pa);
        Ok([e0, e1, e2])
    }

    /// Insert point `p` on the edge of `e`, splitting both adjacent
    /// triangles in two. The two halves of the split edge keep its type.
    /// Returns the four outer half-edges, which now face `p`.
    pub fn split_edge(&mut self, e: HalfEdgeId, p: PointId) -> MeshResult<[HalfEdgeId; 4]> {
        let Some(s) = self.sibling(e) else {
            return Err(MeshError::topology(format!(
                "cannot split boundary half-edge {e}"
            )));
        };
        let e1 = self.next(e);
        let e2 = self.next(e1);
        let s1 = self.next(s);
        let s2 = self.next(s1);
        if self.next(e2) != e || self.next(s2) != s {
            return Err(MeshError::topology(format!(
                "half-edge {e} or its sibling {s} is not on a closed 3-cycle"
            )));
        }
        let edge_type = self.edge_type(e);
        let c = self.origin(e2);
        let d = self.origin(s2);

        // e: a -> p, pc, e2        (a p c)
        // pb, e1, cp               (p b c)
        // s: b -> p, pd, s2        (b p d)
        // pa, s1, dp               (p a d)
        let base = self.half_edges.len();
        let (pc, cp, pb) = (base, base + 1, base + 2);
        let (pa, pd, dp) = (base + 3, base + 4, base + 5);
        self.push_half_edge(p, e2);
        self.push_half_edge(c, pb);
        self.push_half_edge(p, e1);
        self.push_half_edge(p, s1);
        self.push_half_edge(p, s2);
        self.push_half_edge(d, pa);

        self.half_edges[e].next = pc;
        self.half_edges[e1].next = cp;
        self.half_edges[s].next = pd;
        self.half_edges[s1].next = dp;

        // e keeps origin a, s keeps origin b; both now end at p
        self.half_edges[e].sibling = Some(pa);
        self.half_edges[pa].sibling = Some(e);
        self.half_edges[s].sibling = Some(pb);
        self.half_edges[pb].sibling = Some(s);
        self.set_siblings(pc, cp);
        self.set_siblings(pd, dp);

        self.half_edges[pa].edge_type = edge_type;
        self.half_edges[pb].edge_type = edge_type;
        self.half_edges[pa].flags = self.half_edges[e].flags;
        self.half_edges[pb].flags = self.half_edges[s].flags;
        Ok([e1, e2, s1, s2])
    }

    /// Every half-edge leaving `p`, found by rotating around it.
    ///
    /// The fan is walked counter-clockwise until it closes; around a hull
    /// point it is open, so the walk continues clockwise from the start.
    /// Faces must be triangles.
    pub fn outgoing_edges(&self, p: PointId) -> Vec<HalfEdgeId> {
        let Some(start) = self.outgoing.get(p).copied().flatten() else {
            return Vec::new();
        };
        let mut fan = vec![start];
        let mut e = start;
        let mut closed = false;
        for _ in 0..self.half_edges.len() {
            // the edge closing the face runs into p, its sibling leaves p
            match self.sibling(self.next(self.next(e))) {
                Some(s) if s == start => {
                    closed = true;
                    break;
                }
                Some(s) => {
                    fan.push(s);
                    e = s;
                }
                None => break,
            }
        }
        if !closed {
            let mut e = start;
            for _ in 0..self.half_edges.len() {
                let Some(s) = self.sibling(e) else { break };
                e = self.next(s);
                if e == start {
                    break;
                }
                fan.push(e);
            }
        }
        fan
    }

    /// Half-edge from `a` to `b`, if the mesh has one
    pub fn find_edge(&self, a: PointId, b: PointId) -> Option<HalfEdgeId> {
        self.outgoing_edges(a)
            .into_iter()
            .find(|&e| self.destination(e) == b)
    }

    /// Enumerate all triangles as the 3-cycles of the successor links.
    /// Each triangle is reported once, starting from its lowest half-edge.
    pub fn triangles(&self) -> MeshResult<Vec<[HalfEdgeId; 3]>> {
        let mut seen = vec![false; self.half_edges.len()];
        let mut triangles = Vec::with_capacity(self.half_edges.len() / 3);
        for start in 0..self.half_edges.len() {
            if seen[start] {
                continue;
            }
            let e1 = self.next(start);
            let e2 = self.next(e1);
            if self.next(e2) != start || start == e1 || e1 == e2 {
                return Err(MeshError::topology(format!(
                    "half-edge {start} is not on a closed 3-cycle"
                )));
            }
            for e in [start, e1, e2] {
                if seen[e] {
                    return Err(MeshError::topology(format!(
                        "half-edge {e} belongs to more than one face"
                    )));
                }
                seen[e] = true;
            }
            triangles.push([start, e1, e2]);
        }
        Ok(triangles)
    }

    /// Check every structural invariant of the mesh: closed 3-cycles,
    /// sibling symmetry, siblings running opposite and sharing a type, and
    /// hull edges being exactly the half-edges without a sibling.
    pub fn validate(&self) -> MeshResult<()> {
        self.triangles()?;
        for (e, he) in self.half_edges.iter().enumerate() {
            match he.sibling {
                Some(s) => {
                    let sib = &self.half_edges[s];
                    if sib.sibling != Some(e) {
                        return Err(MeshError::topology(format!(
                            "sibling of {s} is not {e}"
                        )));
                    }
                    if sib.edge_type != he.edge_type {
                        return Err(MeshError::topology(format!(
                            "siblings {e} and {s} disagree on type"
                        )));
                    }
                    if he.origin != self.destination(s) || sib.origin != self.destination(e) {
                        return Err(MeshError::topology(format!(
                            "siblings {e} and {s} do not run opposite"
                        )));
                    }
                    if he.edge_type == EdgeType::Boundary {
                        return Err(MeshError::topology(format!(
                            "boundary half-edge {e} has a sibling"
                        )));
                    }
                }
                None => {
                    if he.edge_type != EdgeType::Boundary {
                        return Err(MeshError::topology(format!(
                            "{:?} half-edge {e} has no sibling",
                            he.edge_type
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
