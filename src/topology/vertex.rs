//! Diagram vertices.

use serde::{Deserialize, Serialize};

use super::ids::EdgeId;
use crate::geometry::point::Point;

/// Classification of a vertex during an incremental insertion step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VertexStatus {
    /// Kept: closer to its old generators than to the new one.
    Out,
    /// Removed at the end of the step: inside the new generator's region.
    In,
    /// Not classified yet.
    #[default]
    Undecided,
    /// Created during the current step.
    New,
}

/// Role of a vertex in the diagram.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VertexKind {
    /// Sentinel vertex of the outer bounding region.
    Outer,
    /// Ordinary Voronoi vertex equidistant from three generators.
    #[default]
    Normal,
    /// Vertex coinciding with a point generator.
    PointSite,
    /// Endpoint of a line or arc generator.
    Endpoint,
    /// Start of a separator edge on a segment endpoint.
    SepPoint,
    /// Apex (minimum-clearance point) of a curved edge.
    Apex,
    /// Vertex splitting an edge with no change in adjacency.
    Split,
}

/// A vertex record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point,
    /// Offset at which the vertex was found: its distance to the adjacent generators.
    pub clearance: f64,
    pub status: VertexStatus,
    pub kind: VertexKind,
    pub(crate) out_edges: Vec<EdgeId>,
}

impl Vertex {
    pub(crate) fn new(position: Point, kind: VertexKind) -> Self {
        Vertex {
            position,
            clearance: 0.0,
            status: VertexStatus::Undecided,
            kind,
            out_edges: Vec::new(),
        }
    }

    /// Half-edges starting at this vertex, in insertion order.
    #[inline]
    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.out_edges.len()
    }

    #[inline]
    pub fn is_in(&self) -> bool {
        self.status == VertexStatus::In
    }
}
