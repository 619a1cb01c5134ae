//! Arena-backed half-edge graph holding the diagram topology.
//!
//! The graph owns three arenas: `Vec<Option<Vertex>>`, `Vec<Option<Edge>>` and
//! `Vec<Face>`. Removing a vertex or an edge empties its slot; ids are never
//! handed out twice, so every lookup through a stale id fails with
//! [`VoronoiError::UnknownVertex`] / [`VoronoiError::UnknownEdge`].
//!
//! Mutations are primitive edits meant to be composed by an incremental
//! builder. A sequence of edits can pass through states where a `next` cycle
//! is open; such states are representable (`next == None`) and flagged by
//! [`validate_invariants`](crate::debug_invariants::DebugInvariants::validate_invariants),
//! which the builder runs once its step is complete.

use itertools::Itertools;

use super::edge::{Edge, HalfEdgeSide};
use super::face::{Face, FaceStatus};
use super::ids::{EdgeId, FaceId, VertexId};
use super::vertex::{Vertex, VertexKind, VertexStatus};
use crate::geometry::bisector::Bisector;
use crate::geometry::point::Point;
use crate::geometry::site::Site;
use crate::geometry::tolerance::Tolerance;
use crate::voronoi_error::VoronoiError;

/// Half-edge (doubly-connected edge list) representation of a planar diagram.
///
/// The lifetime `'s` is that of the caller's generator list: faces hold
/// non-owning references to their sites.
#[derive(Clone, Debug, Default)]
pub struct HalfEdgeGraph<'s> {
    vertices: Vec<Option<Vertex>>,
    edges: Vec<Option<Edge>>,
    faces: Vec<Face<'s>>,
    live_vertices: usize,
    live_edges: usize,
    tolerance: Tolerance,
}

static_assertions::assert_impl_all!(HalfEdgeGraph<'static>: Send, Sync);

impl<'s> HalfEdgeGraph<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph whose bisector computations and geometric checks use `tolerance`.
    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        HalfEdgeGraph {
            tolerance,
            ..Self::default()
        }
    }

    #[inline]
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    pub fn vertex(&self, v: VertexId) -> Result<&Vertex, VoronoiError> {
        self.vertices
            .get(v.index())
            .and_then(Option::as_ref)
            .ok_or(VoronoiError::UnknownVertex(v))
    }

    fn vertex_mut(&mut self, v: VertexId) -> Result<&mut Vertex, VoronoiError> {
        self.vertices
            .get_mut(v.index())
            .and_then(Option::as_mut)
            .ok_or(VoronoiError::UnknownVertex(v))
    }

    pub fn edge(&self, e: EdgeId) -> Result<&Edge, VoronoiError> {
        self.edges
            .get(e.index())
            .and_then(Option::as_ref)
            .ok_or(VoronoiError::UnknownEdge(e))
    }

    pub(crate) fn edge_mut(&mut self, e: EdgeId) -> Result<&mut Edge, VoronoiError> {
        self.edges
            .get_mut(e.index())
            .and_then(Option::as_mut)
            .ok_or(VoronoiError::UnknownEdge(e))
    }

    pub fn face(&self, f: FaceId) -> Result<&Face<'s>, VoronoiError> {
        self.faces.get(f.index()).ok_or(VoronoiError::UnknownFace(f))
    }

    fn face_mut(&mut self, f: FaceId) -> Result<&mut Face<'s>, VoronoiError> {
        self.faces
            .get_mut(f.index())
            .ok_or(VoronoiError::UnknownFace(f))
    }

    #[inline]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.vertex(v).is_ok()
    }

    #[inline]
    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.edge(e).is_ok()
    }

    /// Number of live vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.live_vertices
    }

    /// Number of live half-edges (twice the number of diagram edges).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Live vertices in id order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (VertexId::new(i), v)))
    }

    /// Live half-edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeId::new(i), e)))
    }

    pub fn faces(&self) -> impl Iterator<Item = &Face<'s>> + '_ {
        self.faces.iter()
    }

    #[inline]
    pub fn source(&self, e: EdgeId) -> Result<VertexId, VoronoiError> {
        Ok(self.edge(e)?.source)
    }

    #[inline]
    pub fn target(&self, e: EdgeId) -> Result<VertexId, VoronoiError> {
        Ok(self.edge(e)?.target)
    }

    #[inline]
    pub fn twin(&self, e: EdgeId) -> Result<EdgeId, VoronoiError> {
        Ok(self.edge(e)?.twin)
    }

    /// Successor of `e`, failing with [`VoronoiError::OpenBoundary`] while unset.
    #[inline]
    pub fn next(&self, e: EdgeId) -> Result<EdgeId, VoronoiError> {
        self.edge(e)?.next.ok_or(VoronoiError::OpenBoundary(e))
    }

    /// Generator of face `f`, `None` for auxiliary faces.
    pub fn site(&self, f: FaceId) -> Result<Option<&'s Site>, VoronoiError> {
        Ok(self.face(f)?.site)
    }

    // ---------------------------------------------------------------------
    // Vertices
    // ---------------------------------------------------------------------

    /// Adds an isolated vertex with status `Undecided` and clearance `0`.
    pub fn add_vertex(&mut self, position: Point, kind: VertexKind) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Some(Vertex::new(position, kind)));
        self.live_vertices += 1;
        id
    }

    pub fn set_vertex_status(
        &mut self,
        v: VertexId,
        status: VertexStatus,
    ) -> Result<(), VoronoiError> {
        self.vertex_mut(v)?.status = status;
        Ok(())
    }

    pub fn set_vertex_clearance(&mut self, v: VertexId, t: f64) -> Result<(), VoronoiError> {
        self.vertex_mut(v)?.clearance = t;
        Ok(())
    }

    /// Marks every live vertex `Undecided` again; run at the end of an
    /// insertion step.
    pub fn reset_vertex_status(&mut self) {
        for v in self.vertices.iter_mut().flatten() {
            v.status = VertexStatus::Undecided;
        }
    }

    /// Live vertices whose status is `status`.
    pub fn vertices_with_status(&self, status: VertexStatus) -> Vec<VertexId> {
        self.vertices()
            .filter(|(_, v)| v.status == status)
            .map(|(id, _)| id)
            .collect()
    }

    /// Removes every edge pair incident to `v`; returns how many pairs went.
    pub fn clear_vertex(&mut self, v: VertexId) -> Result<usize, VoronoiError> {
        let mut removed = 0;
        while let Some(&e) = self.vertex(v)?.out_edges.first() {
            self.remove_edge_pair(e)?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Removes an isolated vertex and returns its record.
    ///
    /// Fails with [`VoronoiError::VertexHasEdges`] while edges are still
    /// attached; call [`clear_vertex`](Self::clear_vertex) first.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<Vertex, VoronoiError> {
        let degree = self.vertex(v)?.degree();
        if degree > 0 {
            return Err(VoronoiError::VertexHasEdges {
                vertex: v,
                edges: degree,
            });
        }
        let record = self.vertices[v.index()]
            .take()
            .ok_or(VoronoiError::UnknownVertex(v))?;
        self.live_vertices -= 1;
        Ok(record)
    }

    // ---------------------------------------------------------------------
    // Faces
    // ---------------------------------------------------------------------

    /// Adds a face for `site`, or an auxiliary face when `site` is `None`.
    pub fn add_face(&mut self, site: Option<&'s Site>) -> FaceId {
        let idx = FaceId::new(self.faces.len());
        self.faces.push(Face {
            idx,
            edge: None,
            site,
        });
        idx
    }

    /// Sets the representative boundary edge of `f`; `e` must bound `f`.
    pub fn set_face_edge(&mut self, f: FaceId, e: EdgeId) -> Result<(), VoronoiError> {
        let face = self.edge(e)?.face;
        if face != f {
            return Err(VoronoiError::EdgeNotOnFace { edge: e, face: f });
        }
        self.face_mut(f)?.edge = Some(e);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Edges
    // ---------------------------------------------------------------------

    /// Creates the half-edge `source → target` bounding `side.face` together
    /// with its twin `target → source` bounding `twin_side.face`.
    ///
    /// Both halves carry `bisector`; `next` is left unset on both.
    pub fn add_edge_pair(
        &mut self,
        source: VertexId,
        target: VertexId,
        side: HalfEdgeSide,
        twin_side: HalfEdgeSide,
        bisector: Bisector,
    ) -> Result<(EdgeId, EdgeId), VoronoiError> {
        self.vertex(source)?;
        self.vertex(target)?;
        self.face(side.face)?;
        self.face(twin_side.face)?;

        let e = EdgeId::new(self.edges.len());
        let tw = EdgeId::new(self.edges.len() + 1);
        self.edges.push(Some(Edge {
            source,
            target,
            next: None,
            twin: tw,
            face: side.face,
            k: side.k,
            bisector,
        }));
        self.edges.push(Some(Edge {
            source: target,
            target: source,
            next: None,
            twin: e,
            face: twin_side.face,
            k: twin_side.k,
            bisector,
        }));
        self.live_edges += 2;
        self.vertex_mut(source)?.out_edges.push(e);
        self.vertex_mut(target)?.out_edges.push(tw);
        Ok((e, tw))
    }

    /// Recomputes the bisector of `e` and its twin from the generators of the
    /// two faces they bound and their offset directions.
    pub fn set_parameters(&mut self, e: EdgeId) -> Result<(), VoronoiError> {
        let edge = self.edge(e)?;
        let twin = self.edge(edge.twin)?;
        let s1 = self.site(edge.face)?.ok_or(VoronoiError::MissingSite(edge.face))?;
        let s2 = self.site(twin.face)?.ok_or(VoronoiError::MissingSite(twin.face))?;
        let bisector = Bisector::with_tolerance(s1, edge.k, s2, twin.k, &self.tolerance)?;
        let tw = edge.twin;
        self.edge_mut(e)?.bisector = bisector;
        self.edge_mut(tw)?.bisector = bisector;
        Ok(())
    }

    /// Sets the bisector of `e` and its twin explicitly; used for separators,
    /// line-site edges and edges of auxiliary faces.
    pub fn set_bisector(&mut self, e: EdgeId, bisector: Bisector) -> Result<(), VoronoiError> {
        let tw = self.twin(e)?;
        self.edge_mut(e)?.bisector = bisector;
        self.edge_mut(tw)?.bisector = bisector;
        Ok(())
    }

    /// Links `n` as the successor of `e` around their common face.
    pub fn set_next(&mut self, e: EdgeId, n: EdgeId) -> Result<(), VoronoiError> {
        let (target, face) = {
            let edge = self.edge(e)?;
            (edge.target, edge.face)
        };
        let succ = self.edge(n)?;
        if succ.source != target {
            return Err(VoronoiError::NextMismatch {
                edge: e,
                next: n,
                expected: target,
            });
        }
        if succ.face != face {
            return Err(VoronoiError::FaceMismatch {
                edge: e,
                face,
                next: n,
                next_face: succ.face,
            });
        }
        self.edge_mut(e)?.next = Some(n);
        Ok(())
    }

    /// Removes `e` and its twin.
    ///
    /// Any half-edge whose successor was one of the pair is left with an open
    /// `next`, and a face represented by one of the pair falls back to the
    /// removed edge's successor.
    pub fn remove_edge_pair(&mut self, e: EdgeId) -> Result<(), VoronoiError> {
        let tw = self.twin(e)?;
        self.edge(tw)?;

        for x in [e, tw] {
            let source = self.source(x)?;
            for p in self.in_edges(source)? {
                if p == e || p == tw {
                    continue;
                }
                let pred = self.edge_mut(p)?;
                if pred.next == Some(x) {
                    pred.next = None;
                }
            }
        }

        for x in [e, tw] {
            let (source, face, next) = {
                let edge = self.edge(x)?;
                (edge.source, edge.face, edge.next)
            };
            self.vertex_mut(source)?.out_edges.retain(|&o| o != x);
            let fallback = next.filter(|&n| n != e && n != tw);
            let f = self.face_mut(face)?;
            if f.edge == Some(x) {
                f.edge = fallback;
            }
        }

        self.edges[e.index()] = None;
        self.edges[tw.index()] = None;
        self.live_edges -= 2;
        Ok(())
    }

    /// Inserts the isolated vertex `v` into edge `e = a → b`.
    ///
    /// Afterwards `e` runs `a → v` and is followed by a new half-edge `v → b`;
    /// on the other face a new half-edge `b → v` is followed by the old twin,
    /// which now runs `v → a`. Both new halves copy face, offset direction and
    /// bisector from the half they were cut from. Returns `(v → b, b → v)`.
    pub fn split_edge(&mut self, e: EdgeId, v: VertexId) -> Result<(EdgeId, EdgeId), VoronoiError> {
        let edge = self.edge(e)?.clone();
        let tw = edge.twin;
        let twin = self.edge(tw)?.clone();
        let degree = self.vertex(v)?.degree();
        if degree > 0 {
            return Err(VoronoiError::VertexHasEdges {
                vertex: v,
                edges: degree,
            });
        }
        let b = edge.target;
        // on a spike `e` itself turns back into its twin; it keeps `e2` below
        let twin_pred = self
            .in_edges(b)?
            .into_iter()
            .filter(|&p| p != e)
            .find(|&p| self.edge(p).map(|x| x.next == Some(tw)).unwrap_or(false));

        let e2 = EdgeId::new(self.edges.len());
        let tw2 = EdgeId::new(self.edges.len() + 1);
        let e2_next = if edge.next == Some(tw) {
            Some(tw2)
        } else {
            edge.next
        };
        self.edges.push(Some(Edge {
            source: v,
            target: b,
            next: e2_next,
            twin: tw2,
            face: edge.face,
            k: edge.k,
            bisector: edge.bisector,
        }));
        self.edges.push(Some(Edge {
            source: b,
            target: v,
            next: Some(tw),
            twin: e2,
            face: twin.face,
            k: twin.k,
            bisector: twin.bisector,
        }));
        self.live_edges += 2;

        {
            let first = self.edge_mut(e)?;
            first.target = v;
            first.next = Some(e2);
        }
        self.edge_mut(tw)?.source = v;
        if let Some(p) = twin_pred {
            self.edge_mut(p)?.next = Some(tw2);
        }

        let out_b = &mut self.vertex_mut(b)?.out_edges;
        if let Some(slot) = out_b.iter_mut().find(|o| **o == tw) {
            *slot = tw2;
        }
        let out_v = &mut self.vertex_mut(v)?.out_edges;
        out_v.push(e2);
        out_v.push(tw);

        log::trace!("split {e} at {v}: new pair ({e2}, {tw2})");
        Ok((e2, tw2))
    }

    // ---------------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------------

    /// Boundary half-edges of `f` in `next` order, starting at the face edge.
    ///
    /// Fails with [`VoronoiError::OpenBoundary`] on an unset successor and with
    /// [`VoronoiError::BrokenFaceCycle`] if the walk does not return to its
    /// start within the number of live half-edges.
    pub fn face_edges(&self, f: FaceId) -> Result<Vec<EdgeId>, VoronoiError> {
        let Some(start) = self.face(f)?.edge else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        let mut current = start;
        loop {
            out.push(current);
            if out.len() > self.live_edges {
                return Err(VoronoiError::BrokenFaceCycle {
                    face: f,
                    steps: out.len(),
                });
            }
            current = self.next(current)?;
            self.edge(current)?;
            if current == start {
                return Ok(out);
            }
        }
    }

    /// Source vertices of [`face_edges`](Self::face_edges).
    pub fn face_vertices(&self, f: FaceId) -> Result<Vec<VertexId>, VoronoiError> {
        self.face_edges(f)?
            .into_iter()
            .map(|e| self.source(e))
            .collect()
    }

    pub fn out_edges(&self, v: VertexId) -> Result<&[EdgeId], VoronoiError> {
        Ok(self.vertex(v)?.out_edges())
    }

    /// Half-edges ending at `v`: the twins of its outgoing edges.
    pub fn in_edges(&self, v: VertexId) -> Result<Vec<EdgeId>, VoronoiError> {
        self.vertex(v)?
            .out_edges
            .iter()
            .map(|&e| self.twin(e))
            .collect()
    }

    /// Neighbours of `v`, one per outgoing edge.
    pub fn adjacent_vertices(&self, v: VertexId) -> Result<Vec<VertexId>, VoronoiError> {
        self.vertex(v)?
            .out_edges
            .iter()
            .map(|&e| self.target(e))
            .collect()
    }

    /// Faces meeting at `v`, each listed once, in order of first appearance.
    pub fn adjacent_faces(&self, v: VertexId) -> Result<Vec<FaceId>, VoronoiError> {
        let faces: Vec<FaceId> = self
            .vertex(v)?
            .out_edges
            .iter()
            .map(|&e| self.edge(e).map(Edge::face))
            .collect::<Result<_, _>>()?;
        Ok(faces.into_iter().unique().collect())
    }

    /// All face ids in index order.
    pub fn sorted_faces(&self) -> Vec<FaceId> {
        self.faces.iter().sorted().map(Face::idx).collect()
    }

    /// Point on edge `e` at offset `t`.
    pub fn edge_point(&self, e: EdgeId, t: f64) -> Result<Point, VoronoiError> {
        self.edge(e)?.point(t)
    }

    /// The half-edge `a → b`, if any.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        let vertex = self.vertex(a).ok()?;
        vertex
            .out_edges
            .iter()
            .copied()
            .find(|&e| self.target(e).map(|t| t == b).unwrap_or(false))
    }

    // ---------------------------------------------------------------------
    // Face status
    // ---------------------------------------------------------------------

    /// `Incident` iff some boundary vertex of `f` is `In`; recomputed on every
    /// call. A face without a boundary yet is `Nonincident`.
    pub fn face_status(&self, f: FaceId) -> Result<FaceStatus, VoronoiError> {
        for v in self.face_vertices(f)? {
            if self.vertex(v)?.is_in() {
                return Ok(FaceStatus::Incident);
            }
        }
        Ok(FaceStatus::Nonincident)
    }

    /// Faces currently `Incident`, in index order.
    pub fn incident_faces(&self) -> Result<Vec<FaceId>, VoronoiError> {
        let mut out = Vec::new();
        for f in self.sorted_faces() {
            if self.face_status(f)? == FaceStatus::Incident {
                out.push(f);
            }
        }
        Ok(out)
    }
}
