//! Three point generators: the vertex is their circumcenter.

use super::{Solution, kind_mismatch};
use crate::geometry::point::Point;
use crate::geometry::site::{Sign, Site};
use crate::geometry::tolerance::Tolerance;
use crate::voronoi_error::VoronoiError;

pub(super) fn solve(
    sites: [&Site; 3],
    tol: &Tolerance,
    out: &mut Vec<Solution>,
) -> Result<usize, VoronoiError> {
    let [Some(p1), Some(p2), Some(p3)] = sites.map(Site::as_point) else {
        return Err(kind_mismatch("ppp", sites));
    };
    let (a, b, c) = (p1.position(), p2.position(), p3.position());

    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    // relative to the triangle's own size, so tiny triangles still count
    let scale = (b - a).norm_sq().max((c - a).norm_sq());
    if !d.is_finite() || d.abs() <= tol.zero * scale {
        // collinear: the circumcenter is at infinity
        return Ok(0);
    }
    let (na, nb, nc) = (a.norm_sq(), b.norm_sq(), c.norm_sq());
    let center = Point::new(
        (na * (b.y - c.y) + nb * (c.y - a.y) + nc * (a.y - b.y)) / d,
        (na * (c.x - b.x) + nb * (a.x - c.x) + nc * (b.x - a.x)) / d,
    );
    out.push(Solution::new(center, center.dist(a), Sign::Plus));
    Ok(1)
}
