//! General solver for triples containing at least one point or arc.
//!
//! All circle equations share the quadratic part `x² + y² − t²`, so
//! subtracting one of them (the reference) from the others leaves linear
//! equations, as do the line equations. The two linear equations are planes
//! in `(x, y, t)` meeting in a line `X(s) = P0 + s·D`; substituting that line
//! into the reference equation gives a quadratic in `s`.

use super::{Solution, kind_mismatch, radii_valid};
use crate::geometry::numeric::{add3, cross3, dot3, quadratic_roots, scale3};
use crate::geometry::point::Point;
use crate::geometry::site::{Sign, Site, SiteEquation};
use crate::geometry::tolerance::Tolerance;
use crate::voronoi_error::VoronoiError;

pub(super) fn solve(
    sites: [&Site; 3],
    k: [Sign; 3],
    tol: &Tolerance,
    out: &mut Vec<Solution>,
) -> Result<usize, VoronoiError> {
    let eqs: Vec<SiteEquation> = sites.iter().zip(k).map(|(s, k)| s.equation(k)).collect();
    let Some(reference) = eqs.iter().position(|e| !e.is_linear()) else {
        return Err(kind_mismatch("qll", sites));
    };
    let q0 = eqs[reference];

    let mut planes = eqs
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != reference)
        .map(|(_, e)| {
            let row = if e.is_linear() { *e } else { e.minus(&q0) };
            row.linear_row()
        });
    let (Some((n1, d1)), Some((n2, d2))) = (planes.next(), planes.next()) else {
        return Ok(0);
    };

    let dir = cross3(n1, n2);
    let dir_sq = dot3(dir, dir);
    let scale = (dot3(n1, n1) * dot3(n2, n2)).max(1.0);
    if !dir_sq.is_finite() || dir_sq <= tol.zero * scale {
        // parallel planes: either no common line or a whole family of them
        return Ok(0);
    }
    let n12 = dot3(n1, n2);
    let p0 = scale3(
        add3(
            scale3(n1, d1 * dot3(n2, n2) - d2 * n12),
            scale3(n2, d2 * dot3(n1, n1) - d1 * n12),
        ),
        1.0 / dir_sq,
    );

    // q0 on the line: (P0 + sD)ᵀ M (P0 + sD) + w·(P0 + sD) + c with M = diag(1, 1, −1)
    let minkowski = |u: [f64; 3], v: [f64; 3]| u[0] * v[0] + u[1] * v[1] - u[2] * v[2];
    let w = [q0.a, q0.b, q0.k];
    let a = minkowski(dir, dir);
    let b = 2.0 * minkowski(p0, dir) + dot3(w, dir);
    let c = minkowski(p0, p0) + dot3(w, p0) + q0.c;

    let mut count = 0;
    for s in quadratic_roots(a, b, c, tol) {
        let [x, y, t] = add3(p0, scale3(dir, s));
        if !(x.is_finite() && y.is_finite() && t.is_finite()) {
            continue;
        }
        if t < -tol.equidistance || !radii_valid(sites, k, t, tol) {
            continue;
        }
        out.push(Solution::new(Point::new(x, y), t, k[2]));
        count += 1;
    }
    Ok(count)
}
