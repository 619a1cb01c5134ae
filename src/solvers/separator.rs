//! Vertices on a separator: the straight edge leaving a segment endpoint
//! perpendicular to the segment.
//!
//! With `e` the endpoint, `n` the segment's unit normal and `k` the segment's
//! offset direction, the vertex is `p(t) = e + k·t·n`, which is at offset `t`
//! from both the segment and its endpoint. Substituting `p(t)` into the free
//! generator's equation cancels the quadratic terms (`|n| = 1`), leaving a
//! linear equation in `t`.

use super::{SeparatorCase, Solution, kind_mismatch, radii_valid};
use crate::geometry::point::Point;
use crate::geometry::site::{LineSite, Sign, Site};
use crate::geometry::tolerance::Tolerance;
use crate::voronoi_error::VoronoiError;

/// Position of the free generator when two of `sites` are a segment and one
/// of its own endpoints.
pub(super) fn free_position(sites: [&Site; 3], tol: &Tolerance) -> Option<usize> {
    endpoint_pair(sites, tol).map(|(line, point)| 3 - line - point)
}

/// Indices `(segment, endpoint)` of the first segment/endpoint pair.
fn endpoint_pair(sites: [&Site; 3], tol: &Tolerance) -> Option<(usize, usize)> {
    for (i, s) in sites.iter().enumerate() {
        let Some(line) = s.as_line() else { continue };
        for (j, other) in sites.iter().enumerate() {
            if let Some(p) = other.as_point() {
                if line.has_endpoint(p.position(), tol) {
                    return Some((i, j));
                }
            }
        }
    }
    None
}

fn separated<'a>(
    sites: [&'a Site; 3],
    free: usize,
    tol: &Tolerance,
) -> Option<(usize, &'a LineSite, Point)> {
    let others: Vec<usize> = (0..3).filter(|&i| i != free).collect();
    let (i, j) = (others[0], others[1]);
    let pick = |li: usize, pi: usize| {
        let line = sites[li].as_line()?;
        let point = sites[pi].as_point()?.position();
        line.has_endpoint(point, tol).then_some((li, line, point))
    };
    pick(i, j).or_else(|| pick(j, i))
}

pub(super) fn solve(
    case: SeparatorCase,
    sites: [&Site; 3],
    k: [Sign; 3],
    tol: &Tolerance,
    out: &mut Vec<Solution>,
) -> Result<usize, VoronoiError> {
    let free = case.free_index();
    let Some((line_idx, line, endpoint)) = separated(sites, free, tol) else {
        return Err(kind_mismatch("separator", sites));
    };
    let m = line.normal() * k[line_idx].value();

    let eq = sites[free].equation(k[free]);
    let c0 = eq.q * endpoint.norm_sq() + eq.a * endpoint.x + eq.b * endpoint.y + eq.c;
    let c1 = 2.0 * eq.q * endpoint.dot(m) + eq.a * m.x + eq.b * m.y + eq.k;
    let scale = c0.abs().max(1.0);
    if !c1.is_finite() || c1.abs() <= tol.zero * scale {
        // the free generator's offset runs parallel to the separator
        return Ok(0);
    }
    let t = -c0 / c1;
    if t < -tol.equidistance || !radii_valid(sites, k, t, tol) {
        return Ok(0);
    }
    out.push(Solution::new(endpoint + m * t, t, k[2]));
    Ok(1)
}
