//! Triangle meshes for single glyphs
//!
//! A [`GlyphMesh`] is built once per glyph, font and size, then shared
//! read-only by every text that shows the glyph. Vertex positions are in
//! pixels at the requested size. UV channel 1 carries the raw outline
//! coordinates in design units, channel 2 marks each vertex as
//! `(on contour, produced by a curve)` with 0.0 or 1.0.

use crate::error::{MeshError, MeshResult};
use crate::font_source::{GlyphMetrics, GlyphOutline};
use crate::geometry::{Contour, PointId, Triangulation};
use tracing::debug;

/// Vertices a single glyph may use, the range of a 16-bit index
pub const MAX_GLYPH_VERTICES: usize = 1 << 16;

/// Indexed triangle buffers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<[f32; 3]>,
    pub uv1: Vec<[f32; 2]>,
    pub uv2: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// An immutable triangulated glyph with its metrics
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMesh {
    code_point: char,
    mesh: TriangleMesh,
    metrics: GlyphMetrics,
}

impl GlyphMesh {
    /// Triangulate `outline` and scale it to pixels with `metrics.scale`.
    ///
    /// An outline without contours gives a glyph without geometry that
    /// only advances the cursor.
    pub fn build(outline: &GlyphOutline, metrics: GlyphMetrics) -> MeshResult<Self> {
        let code_point = outline.code_point();
        if outline.is_empty() {
            return Ok(Self::space(code_point, metrics));
        }

        // every contour point ends up in the mesh, so this many is a floor
        let contour_points: usize = outline.contours().iter().map(Contour::len).sum();
        if contour_points > MAX_GLYPH_VERTICES {
            return Err(MeshError::CapacityExceeded {
                code_point,
                vertices: contour_points,
                limit: MAX_GLYPH_VERTICES,
            });
        }

        let triangulation = Triangulation::build(code_point, outline.contours(), outline.steiner())?;
        let points = triangulation.mesh().points();

        // keep only points referenced by interior triangles, numbered in first use order
        let mut remap: Vec<Option<usize>> = vec![None; points.len()];
        let mut used: Vec<PointId> = Vec::new();
        let mut corners = Vec::with_capacity(triangulation.interior_triangles().len() * 3);
        for triangle in triangulation.interior_triangles() {
            for &p in triangle {
                let index = *remap[p].get_or_insert_with(|| {
                    used.push(p);
                    used.len() - 1
                });
                corners.push(index);
            }
        }
        if used.len() > MAX_GLYPH_VERTICES {
            return Err(MeshError::CapacityExceeded {
                code_point,
                vertices: used.len(),
                limit: MAX_GLYPH_VERTICES,
            });
        }
        let indices = corners.into_iter().map(|i| i as u16).collect();

        let scale = metrics.scale;
        let mut mesh = TriangleMesh {
            positions: Vec::with_capacity(used.len()),
            uv1: Vec::with_capacity(used.len()),
            uv2: Vec::with_capacity(used.len()),
            indices,
        };
        for &p in &used {
            let point = &points[p];
            let (x, y) = (point.position.x as f32, point.position.y as f32);
            mesh.positions.push([x * scale, y * scale, 0.0]);
            mesh.uv1.push([x, y]);
            mesh.uv2.push([
                flag_value(point.is_contour_vertex()),
                flag_value(point.is_curve_control()),
            ]);
        }

        debug!(
            "Built mesh for {:?}: {} vertices, {} triangles",
            code_point,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(Self {
            code_point,
            mesh,
            metrics,
        })
    }

    /// Assemble a glyph from ready buffers, checking they fit together
    pub fn from_parts(code_point: char, mesh: TriangleMesh, metrics: GlyphMetrics) -> MeshResult<Self> {
        let vertices = mesh.vertex_count();
        if vertices > MAX_GLYPH_VERTICES {
            return Err(MeshError::CapacityExceeded {
                code_point,
                vertices,
                limit: MAX_GLYPH_VERTICES,
            });
        }
        if mesh.uv1.len() != vertices || mesh.uv2.len() != vertices {
            return Err(MeshError::topology(format!(
                "glyph {code_point:?} has {vertices} positions but {} / {} uvs",
                mesh.uv1.len(),
                mesh.uv2.len()
            )));
        }
        if mesh.indices.len() % 3 != 0 {
            return Err(MeshError::topology(format!(
                "glyph {code_point:?} index count {} is not a multiple of 3",
                mesh.indices.len()
            )));
        }
        if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= vertices) {
            return Err(MeshError::topology(format!(
                "glyph {code_point:?} index {index} is out of range for {vertices} vertices"
            )));
        }
        Ok(Self {
            code_point,
            mesh,
            metrics,
        })
    }

    /// A glyph without geometry
    pub fn space(code_point: char, metrics: GlyphMetrics) -> Self {
        Self {
            code_point,
            mesh: TriangleMesh::default(),
            metrics,
        }
    }

    pub fn code_point(&self) -> char {
        self.code_point
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn metrics(&self) -> &GlyphMetrics {
        &self.metrics
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.mesh.indices.len()
    }

    /// Whether layout only advances the cursor for this glyph
    pub fn is_blank(&self) -> bool {
        self.code_point == ' ' || self.mesh.is_empty()
    }
}

fn flag_value(set: bool) -> f32 {
    if set {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{BezPath, Point, Rect};

    fn square_outline(size: f64) -> GlyphOutline {
        GlyphOutline::new(
            'o',
            vec![Contour::from_positions([
                Point::new(0.0, 0.0),
                Point::new(size, 0.0),
                Point::new(size, size),
                Point::new(0.0, size),
            ])],
        )
    }

    fn metrics_for(outline: &GlyphOutline, scale: f32) -> GlyphMetrics {
        let bounds = outline.bounds().unwrap_or(Rect::ZERO);
        GlyphMetrics::from_bounds(bounds.x1 as f32, bounds, scale)
    }

    #[test]
    fn square_glyph_has_two_triangles() {
        let outline = square_outline(100.0);
        let glyph = GlyphMesh::build(&outline, metrics_for(&outline, 0.5)).unwrap();

        assert_eq!(glyph.vertex_count(), 4);
        assert_eq!(glyph.index_count(), 6);
        assert!(glyph.mesh().indices.iter().all(|&i| i < 4));
        for (position, uv1) in glyph.mesh().positions.iter().zip(&glyph.mesh().uv1) {
            assert_eq!(position[0], uv1[0] * 0.5);
            assert_eq!(position[1], uv1[1] * 0.5);
            assert_eq!(position[2], 0.0);
        }
        assert!(glyph.mesh().uv2.iter().all(|uv| *uv == [1.0, 0.0]));
    }

    #[test]
    fn curve_points_are_marked_in_channel_two() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.quad_to((100.0, 100.0), (0.0, 100.0));
        path.close_path();
        let outline = GlyphOutline::from_bezpaths('D', &[path], 1.0);

        let glyph = GlyphMesh::build(&outline, metrics_for(&outline, 1.0)).unwrap();
        assert!(glyph.mesh().uv2.iter().any(|uv| *uv == [1.0, 1.0]));
        assert!(glyph.mesh().uv2.iter().any(|uv| *uv == [1.0, 0.0]));
    }

    #[test]
    fn steiner_points_outside_the_glyph_are_dropped() {
        let outline = square_outline(10.0)
            .with_steiner([Point::new(5.0, 5.0), Point::new(50.0, 50.0)]);
        let glyph = GlyphMesh::build(&outline, metrics_for(&outline, 1.0)).unwrap();

        assert_eq!(glyph.vertex_count(), 5);
        assert_eq!(glyph.mesh().triangle_count(), 4);
        assert!(glyph.mesh().uv2.iter().any(|uv| *uv == [0.0, 0.0]));
    }

    #[test]
    fn empty_outline_is_blank() {
        let outline = GlyphOutline::empty(' ');
        let glyph = GlyphMesh::build(&outline, GlyphMetrics::advance_only(250.0, 1.0)).unwrap();
        assert!(glyph.is_blank());
        assert_eq!(glyph.vertex_count(), 0);
        assert_eq!(glyph.metrics().advance, 250.0);
    }

    #[test]
    fn building_is_deterministic() {
        let outline = square_outline(64.0).with_steiner([Point::new(20.0, 30.0)]);
        let metrics = metrics_for(&outline, 0.25);
        assert_eq!(
            GlyphMesh::build(&outline, metrics).unwrap(),
            GlyphMesh::build(&outline, metrics).unwrap()
        );
    }

    #[test]
    fn from_parts_checks_buffers() {
        let mesh = TriangleMesh {
            positions: vec![[0.0; 3]; 3],
            uv1: vec![[0.0; 2]; 3],
            uv2: vec![[0.0; 2]; 3],
            indices: vec![0, 1, 3],
        };
        let err = GlyphMesh::from_parts('x', mesh, GlyphMetrics::default()).unwrap_err();
        assert!(matches!(err, MeshError::TopologyInvariantViolation { .. }));

        let oversized = TriangleMesh {
            positions: vec![[0.0; 3]; MAX_GLYPH_VERTICES + 1],
            uv1: vec![[0.0; 2]; MAX_GLYPH_VERTICES + 1],
            uv2: vec![[0.0; 2]; MAX_GLYPH_VERTICES + 1],
            indices: Vec::new(),
        };
        let err = GlyphMesh::from_parts('x', oversized, GlyphMetrics::default()).unwrap_err();
        assert!(matches!(
            err,
            MeshError::CapacityExceeded {
                vertices,
                limit: MAX_GLYPH_VERTICES,
                ..
            } if vertices == MAX_GLYPH_VERTICES + 1
        ));
    }

    #[test]
    fn oversized_outline_is_rejected_before_triangulation() {
        // collinear points would fail validation; the size check must come first
        let points = (0..=MAX_GLYPH_VERTICES).map(|i| Point::new(i as f64, 0.0));
        let outline = GlyphOutline::new('w', vec![Contour::from_positions(points)]);
        let err = GlyphMesh::build(&outline, GlyphMetrics::default()).unwrap_err();
        assert!(matches!(
            err,
            MeshError::CapacityExceeded {
                code_point: 'w',
                vertices,
                limit: MAX_GLYPH_VERTICES,
            } if vertices == MAX_GLYPH_VERTICES + 1
        ));
    }

    #[test]
    fn outline_at_the_limit_is_not_rejected_for_size() {
        let points = (0..MAX_GLYPH_VERTICES).map(|i| Point::new(i as f64, 0.0));
        let outline = GlyphOutline::new('w', vec![Contour::from_positions(points)]);
        let err = GlyphMesh::build(&outline, GlyphMetrics::default()).unwrap_err();
        assert!(matches!(err, MeshError::InvalidContour { .. }));
    }
}
