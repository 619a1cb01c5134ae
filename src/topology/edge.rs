//! Directed half-edges.
//!
//! Every undirected diagram edge is stored as two half-edges running in
//! opposite directions, one per adjacent face. The connectivity fields are
//! private to the crate so that only [`HalfEdgeGraph`](super::graph::HalfEdgeGraph)
//! can change them, always a twin pair at a time.

use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, FaceId, VertexId};
use crate::geometry::bisector::{Bisector, EdgeType};
use crate::geometry::point::Point;
use crate::geometry::site::Sign;
use crate::voronoi_error::VoronoiError;

/// The face a new half-edge bounds, and the offset direction of that face's
/// generator along the edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HalfEdgeSide {
    pub face: FaceId,
    pub k: Sign,
}

impl HalfEdgeSide {
    #[inline]
    pub fn new(face: FaceId, k: Sign) -> Self {
        HalfEdgeSide { face, k }
    }
}

/// A half-edge record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub(crate) source: VertexId,
    pub(crate) target: VertexId,
    pub(crate) next: Option<EdgeId>,
    pub(crate) twin: EdgeId,
    pub(crate) face: FaceId,
    pub(crate) k: Sign,
    pub(crate) bisector: Bisector,
}

impl Edge {
    #[inline]
    pub fn source(&self) -> VertexId {
        self.source
    }
    #[inline]
    pub fn target(&self) -> VertexId {
        self.target
    }
    /// Successor around the face, `None` while the face boundary is being edited.
    #[inline]
    pub fn next(&self) -> Option<EdgeId> {
        self.next
    }
    #[inline]
    pub fn twin(&self) -> EdgeId {
        self.twin
    }
    #[inline]
    pub fn face(&self) -> FaceId {
        self.face
    }
    /// Offset direction of this face's generator.
    #[inline]
    pub fn k(&self) -> Sign {
        self.k
    }
    #[inline]
    pub fn bisector(&self) -> &Bisector {
        &self.bisector
    }
    #[inline]
    pub fn edge_type(&self) -> EdgeType {
        self.bisector.edge_type
    }

    /// Position on the edge's curve at offset `t`.
    #[inline]
    pub fn point(&self, t: f64) -> Result<Point, VoronoiError> {
        self.bisector.point(t)
    }
}
