//! Diagram topology: a half-edge graph whose faces are generator regions.
//!
//! The graph is edited by an external incremental builder through the
//! primitive operations of [`HalfEdgeGraph`]; [`validation`] checks the
//! resulting structure.

pub mod edge;
pub mod face;
pub mod graph;
pub mod ids;
pub mod validation;
pub mod vertex;

pub use edge::{Edge, HalfEdgeSide};
pub use face::{Face, FaceStatus};
pub use graph::HalfEdgeGraph;
pub use ids::{EdgeId, FaceId, VertexId};
pub use validation::{GraphValidationOptions, NonConformingHandling, validate_graph};
pub use vertex::{Vertex, VertexKind, VertexStatus};

#[cfg(test)]
mod tests;
