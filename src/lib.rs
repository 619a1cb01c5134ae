#![cfg_attr(docsrs, feature(doc_cfg))]
//! # planar-voronoi
//!
//! Core of a generalized planar Voronoi diagram for point, line-segment and
//! circular-arc generators. The crate provides the pieces an incremental
//! diagram builder is made of:
//!
//! - [`geometry`]: generators ([`Site`](geometry::Site)) and the closed-form
//!   bisector curves ([`Bisector`](geometry::Bisector)) that diagram edges lie on.
//! - [`solvers`]: vertex-position solvers that find points equidistant from
//!   three generators at a common offset `t`.
//! - [`topology`]: an arena-backed half-edge graph
//!   ([`HalfEdgeGraph`](topology::HalfEdgeGraph)) holding vertices, edges and
//!   generator faces, with structural validation.
//!
//! The builder's insertion algorithm itself (classifying vertices, choosing
//! which edges to split) lives outside this crate; see
//! `tests/incremental_insertion.rs` for a minimal driver.
//!
//! ## Features
//! - `rayon`: solve independent triples in parallel with
//!   [`solvers::solve_all`].
//! - `strict-invariants` / `check-invariants`: keep
//!   [`DebugInvariants::debug_assert_invariants`] active in release builds.
//!
//! ## Logging
//! Diagnostics go through the [`log`] facade: `trace` for bisector
//! parameters, `debug` for solver output when enabled with
//! [`Solver::set_debug`](solvers::Solver::set_debug), `warn` for
//! non-conforming geometry found by validation. No logger is installed.

pub mod debug_invariants;
pub mod geometry;
pub mod solvers;
pub mod topology;
pub mod voronoi_error;

pub use debug_invariants::DebugInvariants;
pub use voronoi_error::VoronoiError;

#[doc(hidden)]
pub use log as __log;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{
        ArcSite, Bisector, EdgeType, LineSite, Point, PointSite, Sign, Site, SiteKind, Tolerance,
    };
    pub use crate::solvers::{
        SeparatorCase, Solution, SolveJob, Solver, SolverKind, solve_all,
    };
    pub use crate::topology::{
        Edge, EdgeId, Face, FaceId, FaceStatus, GraphValidationOptions, HalfEdgeGraph,
        HalfEdgeSide, NonConformingHandling, Vertex, VertexId, VertexKind, VertexStatus,
        validate_graph,
    };
    pub use crate::voronoi_error::VoronoiError;
}
