//! Invariant checking shared by the topology structures.
//!
//! The half-edge graph is edited by an external builder through sequences of
//! operations that are only consistent once the whole sequence has run. The
//! builder therefore validates at the end of each step instead of after every
//! single edit.

use crate::voronoi_error::VoronoiError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), VoronoiError>;
}

/// Run a fallible invariant check and, when invariant checking is enabled,
/// log and panic on the first violation; compiles to nothing otherwise.
///
/// The context is a format string with arguments. The panic message says
/// whether the violation is structural (a builder bug in the half-edge
/// links) or geometric.
///
/// ```ignore
/// debug_invariants!(graph.validate_invariants(), "after inserting site {}", idx);
/// ```
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $($ctx:tt)+) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(err) = $check {
            let err: $crate::VoronoiError = err;
            let kind = if err.is_structural() { "structural" } else { "geometric" };
            let context = format!($($ctx)+);
            $crate::__log::error!("[invariants] {context}: {kind} violation: {err}");
            panic!("[invariants] {context}: {kind} violation: {err}");
        }
    };
}
