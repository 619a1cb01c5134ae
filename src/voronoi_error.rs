//! VoronoiError: unified error type for planar-voronoi public APIs
//!
//! Geometric degeneracies (parallel lines, coincident generators, offsets
//! outside a bisector's real domain) are ordinary, recoverable values the
//! builder inspects before trying another candidate. Structural violations
//! (broken twin/next closure, dangling ids) indicate a builder bug; see
//! [`VoronoiError::is_structural`].

use crate::geometry::site::SiteKind;
use crate::topology::ids::{EdgeId, FaceId, VertexId};
use thiserror::Error;

/// Unified error type for planar-voronoi operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VoronoiError {
    // ----- degenerate input -------------------------------------------------
    /// Line–line bisector requested for two parallel lines (`delta == 0`).
    #[error("Degenerate input: parallel lines have no line-line bisector (delta = {delta})")]
    ParallelLines { delta: f64 },
    /// Two circle-like generators share their center (coincident points or
    /// concentric arcs).
    #[error("Degenerate input: coincident {first:?} and {second:?} generators")]
    CoincidentSites { first: SiteKind, second: SiteKind },
    /// A generator could not be constructed from the given geometry.
    #[error("Degenerate site: {0}")]
    DegenerateSite(String),
    /// Pairing of generator kinds the bisector model cannot express.
    #[error("Unsupported generator pair: {first:?}-{second:?}")]
    UnsupportedSitePair { first: SiteKind, second: SiteKind },

    // ----- invalid evaluation -----------------------------------------------
    /// `point(t)` was asked for an offset outside the curve's real domain.
    #[error("Bisector is not real at t = {t} (discriminant {discriminant})")]
    InvalidEvaluation { t: f64, discriminant: f64 },
    /// The offset circle of a generator has shrunk past zero at `t`.
    #[error("Offset radius of a circular generator is negative at t = {t} (radius {radius})")]
    NegativeOffsetRadius { t: f64, radius: f64 },

    // ----- solver contract --------------------------------------------------
    /// A solver variant received a generator triple it does not handle.
    #[error("Solver {solver} cannot handle sites ({kinds:?})")]
    SiteKindMismatch {
        solver: &'static str,
        kinds: [SiteKind; 3],
    },
    /// The unsigned entry point was used for a solver that needs offset directions.
    #[error("Solver {0} requires offset directions k1, k2, k3")]
    MissingOffsetDirections(&'static str),
    /// `set_type` received a sub-case index the solver does not define.
    #[error("Invalid solver sub-type {0}")]
    InvalidSolverType(u8),

    // ----- structural violations --------------------------------------------
    /// Vertex id does not name a live vertex.
    #[error("Topology error: unknown vertex {0}")]
    UnknownVertex(VertexId),
    /// Edge id does not name a live edge.
    #[error("Topology error: unknown edge {0}")]
    UnknownEdge(EdgeId),
    /// Face id does not name a face.
    #[error("Topology error: unknown face {0}")]
    UnknownFace(FaceId),
    /// `twin(twin(e)) != e`, or a twin runs in the wrong direction.
    #[error("Topology error: edge {edge} has inconsistent twin {twin}")]
    TwinMismatch { edge: EdgeId, twin: EdgeId },
    /// `next(e)` does not start where `e` ends.
    #[error("Topology error: next {next} of edge {edge} does not start at {expected}")]
    NextMismatch {
        edge: EdgeId,
        next: EdgeId,
        expected: VertexId,
    },
    /// `next(e)` bounds a different face than `e`.
    #[error("Topology error: edge {edge} on {face} is followed by {next} on {next_face}")]
    FaceMismatch {
        edge: EdgeId,
        face: FaceId,
        next: EdgeId,
        next_face: FaceId,
    },
    /// A face's representative edge bounds another face.
    #[error("Topology error: edge {edge} does not bound {face}")]
    EdgeNotOnFace { edge: EdgeId, face: FaceId },
    /// Bisector parameters requested across a face with no generator.
    #[error("Topology error: {0} has no generator site")]
    MissingSite(FaceId),
    /// An edge has no successor yet.
    #[error("Topology error: edge {0} has no next edge (open boundary)")]
    OpenBoundary(EdgeId),
    /// Walking `next` from the face edge never returned to it.
    #[error("Topology error: boundary of {face} does not close after {steps} steps")]
    BrokenFaceCycle { face: FaceId, steps: usize },
    /// A vertex still has incident edges and cannot be removed.
    #[error("Topology error: vertex {vertex} still has {edges} incident edges")]
    VertexHasEdges { vertex: VertexId, edges: usize },
    /// A record refers to a removed vertex/edge.
    #[error("Topology error: {0} refers to a removed element")]
    DanglingReference(String),
    /// An edge endpoint does not lie on the edge's bisector.
    #[error("Geometry error: endpoint {vertex} of edge {edge} is {distance} away from its bisector")]
    EdgeOffCurve {
        edge: EdgeId,
        vertex: VertexId,
        distance: f64,
    },
}

impl VoronoiError {
    /// True for topology contract violations; these are builder bugs, not
    /// geometric outcomes.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            VoronoiError::UnknownVertex(_)
                | VoronoiError::UnknownEdge(_)
                | VoronoiError::UnknownFace(_)
                | VoronoiError::TwinMismatch { .. }
                | VoronoiError::NextMismatch { .. }
                | VoronoiError::FaceMismatch { .. }
                | VoronoiError::EdgeNotOnFace { .. }
                | VoronoiError::MissingSite(_)
                | VoronoiError::OpenBoundary(_)
                | VoronoiError::BrokenFaceCycle { .. }
                | VoronoiError::VertexHasEdges { .. }
                | VoronoiError::DanglingReference(_)
                | VoronoiError::EdgeOffCurve { .. }
        )
    }

    /// True for degenerate generator configurations the builder may recover
    /// from by trying another ordering.
    pub fn is_degenerate_input(&self) -> bool {
        matches!(
            self,
            VoronoiError::ParallelLines { .. }
                | VoronoiError::CoincidentSites { .. }
                | VoronoiError::DegenerateSite(_)
                | VoronoiError::UnsupportedSitePair { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_disjoint() {
        let structural = VoronoiError::OpenBoundary(EdgeId::new(3));
        assert!(structural.is_structural());
        assert!(!structural.is_degenerate_input());

        let degenerate = VoronoiError::ParallelLines { delta: 0.0 };
        assert!(degenerate.is_degenerate_input());
        assert!(!degenerate.is_structural());

        let eval = VoronoiError::InvalidEvaluation {
            t: 0.0,
            discriminant: -1.0,
        };
        assert!(!eval.is_structural());
        assert!(!eval.is_degenerate_input());

        let shrunk = VoronoiError::NegativeOffsetRadius {
            t: 2.0,
            radius: -1.0,
        };
        assert!(!shrunk.is_structural());
        assert!(!shrunk.is_degenerate_input());
    }

    #[test]
    fn messages_name_the_element() {
        let err = VoronoiError::VertexHasEdges {
            vertex: VertexId::new(7),
            edges: 2,
        };
        assert_eq!(
            err.to_string(),
            "Topology error: vertex v7 still has 2 incident edges"
        );
    }
}
