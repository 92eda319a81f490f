//! Geometric Primitives and Glyph Triangulation

pub mod contour;
pub mod half_edge;
pub mod point;
pub mod predicates;
pub mod triangulation;

// Re-export commonly used items
pub use contour::Contour;
pub use half_edge::{EdgeFlag, EdgeType, HalfEdge, HalfEdgeId, HalfEdgeMesh, PointId};
pub use point::{Point, PointFlag, PointFlags};
pub use triangulation::Triangulation;
