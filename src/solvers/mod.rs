//! Vertex-position solvers.
//!
//! A Voronoi vertex is equidistant from three generators. Each generator
//! contributes one offset equation `q·(x² + y² − t²) + a·x + b·y + k·t + c = 0`
//! (see [`Site::equation`]) and a solution is a common root `(x, y, t)` with
//! `t >= 0`. Which elimination is cheapest depends on the generator kinds:
//!
//! | variant                      | generators                          | method                                |
//! |------------------------------|-------------------------------------|---------------------------------------|
//! | [`SolverKind::Ppp`]          | three points                        | circumcenter                          |
//! | [`SolverKind::Lll`]          | three lines                         | 3×3 linear system                     |
//! | [`SolverKind::Qll`]          | anything with a point or an arc     | plane intersection, then one quadratic|
//! | [`SolverKind::Separator`]    | segment, its endpoint, third site   | vertex on the separator, linear in `t`|
//!
//! Solvers append candidates to a caller-owned vector and return how many
//! they appended. No candidate (a degenerate triple) is `Ok(0)`; errors are
//! reserved for calling a variant with generators it does not handle.

pub mod batch;
mod lll;
mod ppp;
mod qll;
mod separator;

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;
use crate::geometry::site::{Sign, Site, SiteKind};
use crate::geometry::tolerance::Tolerance;
use crate::voronoi_error::VoronoiError;

pub use batch::{SolveJob, solve_all};

/// Candidate vertex position.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub p: Point,
    /// Offset (clearance) of `p` from all three generators.
    pub t: f64,
    /// Offset direction of the third generator.
    pub k3: Sign,
}

impl Solution {
    pub fn new(p: Point, t: f64, k3: Sign) -> Self {
        Solution { p, t, k3 }
    }

    /// Largest deviation between `t` and the offset distance of `p` from each
    /// `(site, k)` pair.
    pub fn residual(&self, sites: [(&Site, Sign); 3]) -> f64 {
        sites
            .iter()
            .map(|(s, k)| (s.offset_distance(self.p, *k) - self.t).abs())
            .fold(0.0, f64::max)
    }

    /// `t` is non-negative and `p` is at offset `t` from every generator,
    /// both within `tol.equidistance` (relative to `max(1, t)`).
    pub fn is_feasible(&self, sites: [(&Site, Sign); 3], tol: &Tolerance) -> bool {
        let eps = tol.equidistance * self.t.abs().max(1.0);
        self.t.is_finite() && self.t >= -eps && self.residual(sites) <= eps
    }
}

/// Which generator of a separator triple is the free one; the other two are
/// a segment and one of its endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SeparatorCase {
    FreeFirst,
    FreeSecond,
    #[default]
    FreeThird,
}

impl SeparatorCase {
    #[inline]
    pub fn free_index(self) -> usize {
        match self {
            SeparatorCase::FreeFirst => 0,
            SeparatorCase::FreeSecond => 1,
            SeparatorCase::FreeThird => 2,
        }
    }
}

impl TryFrom<u8> for SeparatorCase {
    type Error = VoronoiError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(SeparatorCase::FreeFirst),
            1 => Ok(SeparatorCase::FreeSecond),
            2 => Ok(SeparatorCase::FreeThird),
            other => Err(VoronoiError::InvalidSolverType(other)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Ppp,
    Lll,
    Qll,
    Separator(SeparatorCase),
}

impl SolverKind {
    pub fn name(self) -> &'static str {
        match self {
            SolverKind::Ppp => "ppp",
            SolverKind::Lll => "lll",
            SolverKind::Qll => "qll",
            SolverKind::Separator(_) => "separator",
        }
    }
}

/// A configured vertex-position solver.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Solver {
    kind: SolverKind,
    tolerance: Tolerance,
    debug: bool,
}

impl Solver {
    pub fn new(kind: SolverKind) -> Self {
        Solver {
            kind,
            tolerance: Tolerance::default(),
            debug: false,
        }
    }

    pub fn ppp() -> Self {
        Self::new(SolverKind::Ppp)
    }

    pub fn lll() -> Self {
        Self::new(SolverKind::Lll)
    }

    pub fn qll() -> Self {
        Self::new(SolverKind::Qll)
    }

    pub fn separator(case: SeparatorCase) -> Self {
        Self::new(SolverKind::Separator(case))
    }

    /// Picks the variant for a generator triple: separator when a segment and
    /// one of its own endpoints meet, the specialised point/line variants for
    /// homogeneous triples, and the general quadratic solver otherwise.
    pub fn for_sites(s1: &Site, s2: &Site, s3: &Site) -> Self {
        let sites = [s1, s2, s3];
        let tol = Tolerance::default();
        if let Some(free) = separator::free_position(sites, &tol) {
            let case = match free {
                0 => SeparatorCase::FreeFirst,
                1 => SeparatorCase::FreeSecond,
                _ => SeparatorCase::FreeThird,
            };
            return Self::separator(case);
        }
        match sites.map(Site::kind) {
            [SiteKind::Point, SiteKind::Point, SiteKind::Point] => Self::ppp(),
            [SiteKind::Line, SiteKind::Line, SiteKind::Line] => Self::lll(),
            _ => Self::qll(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    #[inline]
    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// Selects the separator sub-case `n` (index of the free generator).
    /// Other variants have no sub-cases and ignore the call.
    pub fn set_type(&mut self, n: u8) -> Result<(), VoronoiError> {
        if let SolverKind::Separator(case) = &mut self.kind {
            *case = SeparatorCase::try_from(n)?;
        }
        Ok(())
    }

    /// Logs every solve at `debug` level; results are unaffected.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Solves for vertices at offset direction `ki` from site `si` and
    /// appends them to `out`. Returns the number appended.
    #[allow(clippy::too_many_arguments)]
    pub fn solve(
        &self,
        s1: &Site,
        k1: Sign,
        s2: &Site,
        k2: Sign,
        s3: &Site,
        k3: Sign,
        out: &mut Vec<Solution>,
    ) -> Result<usize, VoronoiError> {
        let sites = [s1, s2, s3];
        let k = [k1, k2, k3];
        let before = out.len();
        let n = match self.kind {
            SolverKind::Ppp => ppp::solve(sites, &self.tolerance, out)?,
            SolverKind::Lll => lll::solve(sites, k, &self.tolerance, out)?,
            SolverKind::Qll => qll::solve(sites, k, &self.tolerance, out)?,
            SolverKind::Separator(case) => {
                separator::solve(case, sites, k, &self.tolerance, out)?
            }
        };
        if self.debug {
            log::debug!(
                "{} solver: {:?} k={:?} -> {} solution(s) {:?}",
                self.kind.name(),
                sites.map(Site::kind),
                k.map(Sign::value),
                n,
                &out[before..]
            );
        }
        Ok(n)
    }

    /// Entry point for solvers that need no offset directions.
    ///
    /// Only the point–point–point variant qualifies; the others fail with
    /// [`VoronoiError::MissingOffsetDirections`].
    pub fn solve_unsigned(
        &self,
        s1: &Site,
        s2: &Site,
        s3: &Site,
        out: &mut Vec<Solution>,
    ) -> Result<usize, VoronoiError> {
        match self.kind {
            SolverKind::Ppp => self.solve(s1, Sign::Plus, s2, Sign::Plus, s3, Sign::Plus, out),
            other => Err(VoronoiError::MissingOffsetDirections(other.name())),
        }
    }
}

pub(crate) fn kind_mismatch(solver: &'static str, sites: [&Site; 3]) -> VoronoiError {
    VoronoiError::SiteKindMismatch {
        solver,
        kinds: sites.map(Site::kind),
    }
}

/// A circle generator whose offset radius `r + k·t` went negative is not a
/// real solution.
pub(crate) fn radii_valid(sites: [&Site; 3], k: [Sign; 3], t: f64, tol: &Tolerance) -> bool {
    sites.iter().zip(k).all(|(s, k)| match s {
        Site::Arc(a) => a.radius() + k.value() * t >= -tol.equidistance,
        _ => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Site {
        Site::point(x, y).unwrap()
    }

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Site {
        Site::line(Point::new(x0, y0), Point::new(x1, y1)).unwrap()
    }

    #[test]
    fn for_sites_picks_variant() {
        let p = pt(0.0, 0.0);
        let l = seg(0.0, 0.0, 2.0, 0.0);
        let far = pt(5.0, 5.0);
        assert_eq!(Solver::for_sites(&p, &far, &pt(1.0, 2.0)).kind(), SolverKind::Ppp);
        assert_eq!(
            Solver::for_sites(&l, &seg(0.0, 1.0, 0.0, 3.0), &seg(3.0, 3.0, 4.0, 1.0)).kind(),
            SolverKind::Lll
        );
        assert_eq!(Solver::for_sites(&l, &far, &pt(1.0, 2.0)).kind(), SolverKind::Qll);
        assert_eq!(
            Solver::for_sites(&far, &l, &p).kind(),
            SolverKind::Separator(SeparatorCase::FreeFirst)
        );
    }

    #[test]
    fn set_type_validates_index() {
        let mut s = Solver::separator(SeparatorCase::default());
        s.set_type(1).unwrap();
        assert_eq!(s.kind(), SolverKind::Separator(SeparatorCase::FreeSecond));
        assert_eq!(s.set_type(3), Err(VoronoiError::InvalidSolverType(3)));
        assert_eq!(s.kind(), SolverKind::Separator(SeparatorCase::FreeSecond));

        let mut q = Solver::qll();
        q.set_type(7).unwrap();
        assert_eq!(q.kind(), SolverKind::Qll);
    }

    #[test]
    fn unsigned_entry_needs_points() {
        let mut out = Vec::new();
        let (a, b, c) = (pt(0.0, 0.0), pt(2.0, 0.0), pt(1.0, 2.0));
        assert_eq!(Solver::ppp().solve_unsigned(&a, &b, &c, &mut out), Ok(1));
        assert_eq!(
            Solver::qll().solve_unsigned(&a, &b, &c, &mut out),
            Err(VoronoiError::MissingOffsetDirections("qll"))
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn debug_flag_does_not_change_results() {
        let (a, b, c) = (pt(0.0, 0.0), pt(2.0, 0.0), pt(1.0, 2.0));
        let mut quiet = Vec::new();
        let mut loud = Vec::new();
        let mut solver = Solver::qll();
        solver
            .solve(&a, Sign::Plus, &b, Sign::Plus, &c, Sign::Plus, &mut quiet)
            .unwrap();
        solver.set_debug(true);
        solver
            .solve(&a, Sign::Plus, &b, Sign::Plus, &c, Sign::Plus, &mut loud)
            .unwrap();
        assert_eq!(quiet, loud);
    }

    #[test]
    fn residual_measures_equidistance() {
        let (a, b, c) = (pt(0.0, 0.0), pt(2.0, 0.0), pt(1.0, 2.0));
        let sites = [(&a, Sign::Plus), (&b, Sign::Plus), (&c, Sign::Plus)];
        let good = Solution::new(Point::new(1.0, 0.75), 1.25, Sign::Plus);
        assert!(good.residual(sites) < 1e-12);
        assert!(good.is_feasible(sites, &Tolerance::default()));
        let bad = Solution::new(Point::new(1.0, 1.0), 1.0, Sign::Plus);
        assert!((bad.residual(sites) - (2f64.sqrt() - 1.0)).abs() < 1e-12);
        assert!(!bad.is_feasible(sites, &Tolerance::default()));
    }
}
