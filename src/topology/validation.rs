//! Structural and geometric validation of a [`HalfEdgeGraph`].

use std::collections::HashSet;

use super::graph::HalfEdgeGraph;
use super::ids::{EdgeId, VertexId};
use super::vertex::VertexKind;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::bisector::EdgeType;
use crate::voronoi_error::VoronoiError;

/// Optional validation toggles for half-edge graph checks.
///
/// Twin closure, `next` consistency and dangling ids are always checked.
#[derive(Debug, Clone, Copy)]
pub struct GraphValidationOptions {
    /// Ensure every `next` orbit closes and every face edge bounds its face.
    pub check_face_cycles: bool,
    /// How to handle edge endpoints that are off the edge's bisector curve.
    pub non_conforming: NonConformingHandling,
}

impl GraphValidationOptions {
    /// Enable all checks; off-curve endpoints are errors.
    pub fn all() -> Self {
        Self {
            check_face_cycles: true,
            non_conforming: NonConformingHandling::Error,
        }
    }
}

impl Default for GraphValidationOptions {
    /// Topology only; geometry is not inspected.
    fn default() -> Self {
        Self {
            check_face_cycles: true,
            non_conforming: NonConformingHandling::Ignore,
        }
    }
}

/// Behavior for edges whose endpoints do not lie on their bisector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonConformingHandling {
    /// Skip the geometric check.
    Ignore,
    /// Log a warning on each non-conforming endpoint.
    Warn,
    /// Return an error on the first non-conforming endpoint.
    Error,
}

/// Validate `graph` and return the first violation found.
pub fn validate_graph(
    graph: &HalfEdgeGraph<'_>,
    options: GraphValidationOptions,
) -> Result<(), VoronoiError> {
    validate_edges(graph)?;
    validate_vertices(graph)?;
    if options.check_face_cycles {
        validate_faces(graph)?;
        validate_cycles(graph)?;
    }
    if options.non_conforming != NonConformingHandling::Ignore {
        validate_geometry(graph, options.non_conforming)?;
    }
    Ok(())
}

fn validate_edges(graph: &HalfEdgeGraph<'_>) -> Result<(), VoronoiError> {
    for (e, edge) in graph.edges() {
        let twin = graph
            .edge(edge.twin())
            .map_err(|_| VoronoiError::DanglingReference(format!("twin of edge {e}")))?;
        if twin.twin() != e || twin.source() != edge.target() || twin.target() != edge.source() {
            return Err(VoronoiError::TwinMismatch {
                edge: e,
                twin: edge.twin(),
            });
        }
        for v in [edge.source(), edge.target()] {
            if !graph.contains_vertex(v) {
                return Err(VoronoiError::DanglingReference(format!(
                    "edge {e} endpoint {v}"
                )));
            }
        }
        graph.face(edge.face())?;
        let next = edge.next().ok_or(VoronoiError::OpenBoundary(e))?;
        let succ = graph
            .edge(next)
            .map_err(|_| VoronoiError::DanglingReference(format!("next of edge {e}")))?;
        if succ.source() != edge.target() {
            return Err(VoronoiError::NextMismatch {
                edge: e,
                next,
                expected: edge.target(),
            });
        }
        if succ.face() != edge.face() {
            return Err(VoronoiError::FaceMismatch {
                edge: e,
                face: edge.face(),
                next,
                next_face: succ.face(),
            });
        }
        if !graph.vertex(edge.source())?.out_edges().contains(&e) {
            return Err(VoronoiError::DanglingReference(format!(
                "edge {e} missing from out-edges of {}",
                edge.source()
            )));
        }
    }
    Ok(())
}

fn validate_vertices(graph: &HalfEdgeGraph<'_>) -> Result<(), VoronoiError> {
    for (v, vertex) in graph.vertices() {
        for &e in vertex.out_edges() {
            let edge = graph.edge(e).map_err(|_| {
                VoronoiError::DanglingReference(format!("out-edge {e} of vertex {v}"))
            })?;
            if edge.source() != v {
                return Err(VoronoiError::DanglingReference(format!(
                    "out-edge {e} of vertex {v} starts at {}",
                    edge.source()
                )));
            }
        }
    }
    Ok(())
}

fn validate_faces(graph: &HalfEdgeGraph<'_>) -> Result<(), VoronoiError> {
    for face in graph.faces() {
        let Some(e) = face.edge() else { continue };
        let edge = graph
            .edge(e)
            .map_err(|_| VoronoiError::DanglingReference(format!("edge of face {}", face.idx())))?;
        if edge.face() != face.idx() {
            return Err(VoronoiError::EdgeNotOnFace {
                edge: e,
                face: face.idx(),
            });
        }
        graph.face_edges(face.idx())?;
    }
    Ok(())
}

/// Every `next` orbit must return to its start; an edge reached twice from
/// different predecessors makes some walk run forever.
fn validate_cycles(graph: &HalfEdgeGraph<'_>) -> Result<(), VoronoiError> {
    let limit = graph.edge_count();
    let mut visited: HashSet<EdgeId> = HashSet::with_capacity(limit);
    for (start, edge) in graph.edges() {
        if visited.contains(&start) {
            continue;
        }
        let mut current = start;
        let mut steps = 0;
        loop {
            if !visited.insert(current) && current != start {
                return Err(VoronoiError::BrokenFaceCycle {
                    face: edge.face(),
                    steps,
                });
            }
            steps += 1;
            current = graph.next(current)?;
            if current == start {
                break;
            }
            if steps > limit {
                return Err(VoronoiError::BrokenFaceCycle {
                    face: edge.face(),
                    steps,
                });
            }
        }
    }
    Ok(())
}

fn validate_geometry(
    graph: &HalfEdgeGraph<'_>,
    handling: NonConformingHandling,
) -> Result<(), VoronoiError> {
    let tol = graph.tolerance().on_curve;
    for (e, edge) in graph.edges() {
        if matches!(edge.edge_type(), EdgeType::LineSite) {
            continue;
        }
        for v in [edge.source(), edge.target()] {
            let distance = off_curve_distance(graph, e, v)?;
            if distance <= tol {
                continue;
            }
            match handling {
                NonConformingHandling::Ignore => {}
                NonConformingHandling::Warn => {
                    log::warn!("Endpoint {v} of edge {e} is {distance} away from its bisector");
                }
                NonConformingHandling::Error => {
                    return Err(VoronoiError::EdgeOffCurve {
                        edge: e,
                        vertex: v,
                        distance,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Distance between vertex `v` and the point of `e`'s curve at the vertex
/// clearance, on the nearer square-root branch. Outer sentinels are exempt.
fn off_curve_distance(
    graph: &HalfEdgeGraph<'_>,
    e: EdgeId,
    v: VertexId,
) -> Result<f64, VoronoiError> {
    let vertex = graph.vertex(v)?;
    if vertex.kind == VertexKind::Outer {
        return Ok(0.0);
    }
    let bisector = graph.edge(e)?.bisector();
    let distance = [*bisector, bisector.flipped()]
        .iter()
        .filter_map(|b| b.point(vertex.clearance).ok())
        .map(|p| p.dist(vertex.position))
        .fold(f64::INFINITY, f64::min);
    Ok(distance)
}

impl DebugInvariants for HalfEdgeGraph<'_> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "HalfEdgeGraph");
    }

    fn validate_invariants(&self) -> Result<(), VoronoiError> {
        validate_graph(self, GraphValidationOptions::default())
    }
}
