//! Three line generators: every offset equation is linear in `(x, y, t)`.

use super::{Solution, kind_mismatch};
use crate::geometry::numeric::solve3;
use crate::geometry::point::Point;
use crate::geometry::site::{Sign, Site};
use crate::geometry::tolerance::Tolerance;
use crate::voronoi_error::VoronoiError;

pub(super) fn solve(
    sites: [&Site; 3],
    k: [Sign; 3],
    tol: &Tolerance,
    out: &mut Vec<Solution>,
) -> Result<usize, VoronoiError> {
    if !sites.iter().all(|s| s.is_line()) {
        return Err(kind_mismatch("lll", sites));
    }
    let mut m = [[0.0; 3]; 3];
    let mut rhs = [0.0; 3];
    for (i, (site, ki)) in sites.iter().zip(k).enumerate() {
        let (row, b) = site.equation(ki).linear_row();
        m[i] = row;
        rhs[i] = b;
    }
    let Some([x, y, t]) = solve3(&m, rhs, tol) else {
        // two of the lines are parallel (or all three concurrent)
        return Ok(0);
    };
    if t < -tol.equidistance {
        return Ok(0);
    }
    out.push(Solution::new(Point::new(x, y), t, k[2]));
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Site {
        Site::line(Point::new(x0, y0), Point::new(x1, y1)).unwrap()
    }

    #[test]
    fn incircle_of_right_triangle() {
        // counter-clockwise boundary: every left normal points inside
        let sites = [
            seg(0.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 0.0, 4.0),
            seg(0.0, 4.0, 0.0, 0.0),
        ];
        let mut out = Vec::new();
        let n = solve(
            [&sites[0], &sites[1], &sites[2]],
            [Sign::Plus; 3],
            &Tolerance::default(),
            &mut out,
        )
        .unwrap();
        assert_eq!(n, 1);
        let r = 4.0 - 2.0 * 2f64.sqrt();
        assert!((out[0].t - r).abs() < 1e-12);
        assert!((out[0].p.x - r).abs() < 1e-12);
        assert!((out[0].p.y - r).abs() < 1e-12);
    }

    #[test]
    fn parallel_pair_gives_nothing() {
        // same normal: their offsets never meet
        let sites = [
            seg(0.0, 0.0, 1.0, 0.0),
            seg(0.0, 2.0, 1.0, 2.0),
            seg(5.0, 0.0, 5.0, 1.0),
        ];
        let mut out = Vec::new();
        let n = solve(
            [&sites[0], &sites[1], &sites[2]],
            [Sign::Plus; 3],
            &Tolerance::default(),
            &mut out,
        )
        .unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn negative_offset_is_dropped() {
        // every side offset outward meets at a negative clearance
        let sites = [
            seg(0.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 0.0, 4.0),
            seg(0.0, 4.0, 0.0, 0.0),
        ];
        let mut out = Vec::new();
        let n = solve(
            [&sites[0], &sites[1], &sites[2]],
            [Sign::Minus; 3],
            &Tolerance::default(),
            &mut out,
        )
        .unwrap();
        assert_eq!(n, 0);
    }
}
