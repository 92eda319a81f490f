//! Error types for glyph meshing and text layout
//!
//! Bad input (degenerate contours, oversized glyphs) is reported as a typed
//! error the caller can handle. Topology and layout inconsistencies are
//! defects in the mesh bookkeeping; they are surfaced as errors too so a
//! host never receives a corrupt mesh, but they are never expected.

use std::path::PathBuf;
use thiserror::Error;

/// Why a glyph contour was rejected before triangulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidContourReason {
    /// The outline has no contours at all
    #[error("outline has no contours")]
    Empty,
    /// A contour has fewer than three distinct points
    #[error("contour {contour} has {points} points, need at least 3")]
    TooFewPoints { contour: usize, points: usize },
    /// A coordinate is NaN or infinite
    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
    /// Two points share the same position, up to rounding
    #[error("duplicate point at ({x}, {y})")]
    DuplicatePoint { x: f64, y: f64 },
    /// Two contour segments cross or touch away from a shared endpoint
    #[error(
        "segment {} of contour {} intersects segment {} of contour {}",
        .first.1, .first.0, .second.1, .second.0
    )]
    SelfIntersection {
        first: (usize, usize),
        second: (usize, usize),
    },
    /// A contour encloses no area
    #[error("contour {contour} encloses no area")]
    ZeroArea { contour: usize },
    /// An interior Steiner point lies on a contour segment
    #[error("steiner point ({x}, {y}) lies on a contour segment")]
    SteinerOnConstraint { x: f64, y: f64 },
}

/// Failures while turning a glyph outline into a triangle mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("invalid contour for {code_point:?}: {reason}")]
    InvalidContour {
        code_point: char,
        reason: InvalidContourReason,
    },

    #[error("half-edge topology invariant violated: {message}")]
    TopologyInvariantViolation { message: String },

    #[error("glyph {code_point:?} needs {vertices} vertices, limit is {limit}")]
    CapacityExceeded {
        code_point: char,
        vertices: usize,
        limit: usize,
    },
}

impl MeshError {
    pub(crate) fn topology(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("Topology invariant violated: {}", message);
        Self::TopologyInvariantViolation { message }
    }
}

/// Failures while assembling a text block into draw meshes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("glyph {code_point:?} at line {line}, index {index} has {vertices} vertices, a snippet holds at most {limit}")]
    CapacityExceeded {
        code_point: char,
        line: usize,
        index: usize,
        vertices: usize,
        limit: usize,
    },

    #[error("layout inconsistency at line {line}, index {index}: {message}")]
    LayoutInconsistency {
        line: usize,
        index: usize,
        message: String,
    },
}

impl LayoutError {
    pub(crate) fn inconsistency(line: usize, index: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(
            "Layout inconsistency at line {}, index {}: {}",
            line,
            index,
            message
        );
        Self::LayoutInconsistency {
            line,
            index,
            message,
        }
    }
}

/// Failures while reading glyph outlines from a font source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("failed to load font source {path:?}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("component cycle through glyph {glyph}")]
    ComponentCycle { glyph: String },
}

pub type MeshResult<T> = Result<T, MeshError>;
pub type LayoutResult<T> = Result<T, LayoutError>;
pub type SourceResult<T> = Result<T, SourceError>;
