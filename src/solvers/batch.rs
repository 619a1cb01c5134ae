//! Solving many independent generator triples at once.
//!
//! Each job writes into its own output vector, so jobs never share mutable
//! state. With the `rayon` feature the jobs run on the global thread pool;
//! without it they run in order on the calling thread.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::{Solution, Solver};
use crate::geometry::site::{Sign, Site};
use crate::voronoi_error::VoronoiError;

/// One generator triple with offset directions and the solver to use.
#[derive(Copy, Clone, Debug)]
pub struct SolveJob<'a> {
    pub solver: Solver,
    pub sites: [&'a Site; 3],
    pub k: [Sign; 3],
}

impl<'a> SolveJob<'a> {
    /// Job whose solver is chosen by [`Solver::for_sites`].
    pub fn new(sites: [&'a Site; 3], k: [Sign; 3]) -> Self {
        SolveJob {
            solver: Solver::for_sites(sites[0], sites[1], sites[2]),
            sites,
            k,
        }
    }

    pub fn run(&self) -> Result<Vec<Solution>, VoronoiError> {
        let mut out = Vec::new();
        let [s1, s2, s3] = self.sites;
        let [k1, k2, k3] = self.k;
        self.solver.solve(s1, k1, s2, k2, s3, k3, &mut out)?;
        Ok(out)
    }
}

/// Solves every job; the result at index `i` belongs to `jobs[i]`.
pub fn solve_all(jobs: &[SolveJob<'_>]) -> Vec<Result<Vec<Solution>, VoronoiError>> {
    #[cfg(feature = "rayon")]
    {
        jobs.par_iter().map(SolveJob::run).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        jobs.iter().map(SolveJob::run).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point::Point;

    #[test]
    fn results_keep_job_order() {
        let a = Site::point(0.0, 0.0).unwrap();
        let b = Site::point(2.0, 0.0).unwrap();
        let c = Site::point(1.0, 2.0).unwrap();
        let d = Site::point(3.0, 0.0).unwrap();
        let jobs: Vec<SolveJob<'_>> = (0..32)
            .map(|i| {
                let third = if i % 2 == 0 { &c } else { &d };
                SolveJob::new([&a, &b, third], [Sign::Plus; 3])
            })
            .collect();
        let results = solve_all(&jobs);
        assert_eq!(results.len(), 32);
        for (i, r) in results.iter().enumerate() {
            let sols = r.as_ref().unwrap();
            if i % 2 == 0 {
                assert_eq!(sols.len(), 1);
                assert!((sols[0].p - Point::new(1.0, 0.75)).norm() < 1e-12);
            } else {
                // collinear
                assert!(sols.is_empty());
            }
        }
    }

    #[test]
    fn contract_errors_stay_per_job() {
        let a = Site::point(0.0, 0.0).unwrap();
        let l = Site::line(Point::new(0.0, 1.0), Point::new(1.0, 1.0)).unwrap();
        let bad = SolveJob {
            solver: Solver::ppp(),
            sites: [&a, &l, &a],
            k: [Sign::Plus; 3],
        };
        let b = Site::point(2.0, 0.0).unwrap();
        let c = Site::point(1.0, 2.0).unwrap();
        let good = SolveJob::new([&a, &b, &c], [Sign::Plus; 3]);
        let results = solve_all(&[bad, good]);
        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().map(Vec::len), Ok(1));
    }
}
