//! Closed-form bisector curves between two generators.
//!
//! Every Voronoi edge lies on the locus of points equidistant from the two
//! generators on either side of it. Parameterized by the offset amount `t`
//! (the common clearance), all bisectors of points, lines and circles share one
//! formula with eight coefficients per axis:
//!
//! ```text
//! x(t) = x0 − x1 − x2·t + x3·√((x4 + x5·t)² − (x6 + x7·t)²)
//! y(t) = y0 − y1 − y2·t + y3·√((y4 + y5·t)² − (y6 + y7·t)²)
//! ```
//!
//! | sites           | curve                          | [`EdgeType`]            |
//! |-----------------|--------------------------------|-------------------------|
//! | point–point     | perpendicular bisector         | `Line`                  |
//! | point–line      | parabola (line through point)  | `Parabola` (`Separator`)|
//! | line–line       | angle bisector                 | `Line`                  |
//! | circle–point/circle | conic, `k1 == k2`          | `Hyperbola`             |
//! | circle–point/circle | conic, `k1 != k2`          | `Ellipse`               |
//! | circle–line     | parabola                       | `Parabola`              |
//!
//! The curve kind is metadata only: evaluation always goes through
//! [`Bisector::point`], and the kind is encoded entirely by which slots are
//! zero.
//!
//! Squaring hides the sign of an offset radius `r + k·t`, so the formula alone
//! also traces points where a shrinking circle has passed through zero. Each
//! bisector therefore keeps the radii of its circular generators and refuses
//! offsets at which one of them is negative.
//!
//! # Derivation
//! For two circles `(c1, r1)`, `(c2, r2)` with offset directions `k1`, `k2`,
//! a point at clearance `t` lies at distance `Ri = ri + ki·t` from `ci`. With
//! `d = |c2 − c1|`, `u = (c2 − c1)/d` and `n` the left normal of `u`, the two
//! circles intersect at `c1 + (α + β·t)·u ± √(R1² − (α + β·t)²)·n` where
//! `α = (r1² − r2² + d²)/2d` and `β = (k1·r1 − k2·r2)/d`. A circle and a line
//! follow the same pattern along the line's normal.

use serde::{Deserialize, Serialize};

use super::numeric::quadratic_roots;
use super::point::Point;
use super::site::{LineSite, Sign, Site};
use super::tolerance::Tolerance;
use crate::voronoi_error::VoronoiError;

/// Geometric kind of a diagram edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeType {
    #[default]
    Line,
    Parabola,
    Ellipse,
    Hyperbola,
    /// Straight edge through a segment endpoint, perpendicular to the segment.
    Separator,
    /// Edge lying on a line site itself.
    LineSite,
}

/// Parametric bisector curve attached to a diagram edge.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Bisector {
    pub edge_type: EdgeType,
    pub x: [f64; 8],
    pub y: [f64; 8],
    /// Offset radii `[r, k]` of the circular generators, read as `r + k·t`.
    /// Lines contribute `[0, 0]`, which never constrains `t`.
    #[serde(default)]
    pub radii: [[f64; 2]; 2],
}

impl Bisector {
    /// Bisector between `s1` and `s2` with default offset directions.
    ///
    /// Points and arcs default to `+` (growing). A line paired with a point or
    /// arc defaults to the side holding the point/arc center, and to `+` when
    /// paired with another line.
    pub fn new(s1: &Site, s2: &Site) -> Result<Self, VoronoiError> {
        Self::with_offsets(s1, default_sign(s1, s2), s2, default_sign(s2, s1))
    }

    /// Bisector between `s1` offset in direction `k1` and `s2` offset in
    /// direction `k2`.
    pub fn with_offsets(s1: &Site, k1: Sign, s2: &Site, k2: Sign) -> Result<Self, VoronoiError> {
        Self::with_tolerance(s1, k1, s2, k2, &Tolerance::default())
    }

    pub fn with_tolerance(
        s1: &Site,
        k1: Sign,
        s2: &Site,
        k2: Sign,
        tol: &Tolerance,
    ) -> Result<Self, VoronoiError> {
        let bisector = match (s1, s2) {
            (Site::Line(l1), Site::Line(l2)) => line_line(l1, k1, l2, k2, tol)?,
            (Site::Line(l), other) => {
                let (c, r, kc) = circle_of(other, k2).ok_or_else(|| unsupported(s1, s2))?;
                circle_line(c, r, kc, l, k1, tol)
            }
            (other, Site::Line(l)) => {
                let (c, r, kc) = circle_of(other, k1).ok_or_else(|| unsupported(s1, s2))?;
                circle_line(c, r, kc, l, k2, tol)
            }
            (first, second) => {
                let (c1, r1, kc1) = circle_of(first, k1).ok_or_else(|| unsupported(s1, s2))?;
                let (c2, r2, kc2) = circle_of(second, k2).ok_or_else(|| unsupported(s1, s2))?;
                circle_circle(c1, r1, kc1, c2, r2, kc2, tol).map_err(|_| {
                    VoronoiError::CoincidentSites {
                        first: first.kind(),
                        second: second.kind(),
                    }
                })?
            }
        };
        log::trace!(
            "bisector {:?}-{:?} ({:?}): x={:?} y={:?}",
            s1.kind(),
            s2.kind(),
            bisector.edge_type,
            bisector.x,
            bisector.y
        );
        Ok(bisector)
    }

    /// Separator edge starting at `endpoint` of `line`, running perpendicular
    /// to it on side `k`: `p(t) = endpoint + k·t·n`.
    pub fn separator(line: &LineSite, endpoint: Point, k: Sign) -> Self {
        let n = line.normal() * k.value();
        let mut x = [0.0; 8];
        let mut y = [0.0; 8];
        x[0] = endpoint.x;
        x[2] = -n.x;
        y[0] = endpoint.y;
        y[2] = -n.y;
        Bisector {
            edge_type: EdgeType::Separator,
            x,
            y,
            radii: [[0.0; 2]; 2],
        }
    }

    /// Record for an edge lying on `line` itself.
    ///
    /// Such edges are at clearance zero everywhere; the curve evaluates to the
    /// segment start and consumers read the segment from the edge's vertices.
    pub fn line_site(line: &LineSite) -> Self {
        let mut x = [0.0; 8];
        let mut y = [0.0; 8];
        x[0] = line.start().x;
        y[0] = line.start().y;
        Bisector {
            edge_type: EdgeType::LineSite,
            x,
            y,
            radii: [[0.0; 2]; 2],
        }
    }

    /// The same locus traced on the opposite square-root branch.
    pub fn flipped(&self) -> Self {
        let mut out = *self;
        out.x[3] = -out.x[3];
        out.y[3] = -out.y[3];
        out
    }

    /// Discriminants `(Dx(t), Dy(t))` under the square roots.
    #[inline]
    pub fn discriminants(&self, t: f64) -> (f64, f64) {
        (discriminant(&self.x, t), discriminant(&self.y, t))
    }

    /// Smallest offset radius `r + k·t` among the generators at `t`. Lines
    /// count as `0`.
    #[inline]
    pub fn min_radius(&self, t: f64) -> f64 {
        self.radii
            .iter()
            .map(|[r, k]| r + k * t)
            .fold(f64::INFINITY, f64::min)
    }

    /// Evaluate the curve at offset `t`.
    ///
    /// Returns [`VoronoiError::NegativeOffsetRadius`] when a shrinking circle
    /// has passed through zero, and [`VoronoiError::InvalidEvaluation`] when
    /// either discriminant is negative (or not a number): the curve has not
    /// been reached at `t`.
    pub fn point(&self, t: f64) -> Result<Point, VoronoiError> {
        let radius = self.min_radius(t);
        if radius < -RADIUS_EPS * t.abs().max(1.0) {
            return Err(VoronoiError::NegativeOffsetRadius { t, radius });
        }
        let (dx, dy) = self.discriminants(t);
        if !(dx >= 0.0 && dy >= 0.0) {
            return Err(VoronoiError::InvalidEvaluation {
                t,
                discriminant: if dx >= 0.0 { dy } else { dx },
            });
        }
        Ok(Point::new(
            axis(&self.x, t, dx.sqrt()),
            axis(&self.y, t, dy.sqrt()),
        ))
    }

    /// Smallest `t >= 0` at which [`point`](Self::point) succeeds, or `None`
    /// when the curve is never real for non-negative offsets with every
    /// offset radius non-negative.
    ///
    /// For a point–line parabola this is the apex, half way between the point
    /// and the line; for a point–point bisector it is half the point distance.
    pub fn min_offset(&self) -> Option<f64> {
        let tol = Tolerance::default();
        let mut candidates = vec![0.0];
        for coeffs in [&self.x, &self.y] {
            let (a, b, c) = discriminant_polynomial(coeffs);
            candidates.extend(
                quadratic_roots(a, b, c, &tol)
                    .into_iter()
                    .filter(|r| r.is_finite() && *r > 0.0),
            );
        }
        candidates.sort_by(f64::total_cmp);
        candidates.into_iter().find_map(|t| self.settle(t))
    }

    /// Step `t` up by a few ulps until both discriminants are non-negative.
    /// Radii only shrink as `t` grows, so a negative one ends the search.
    fn settle(&self, t: f64) -> Option<f64> {
        let mut t = t;
        for _ in 0..32 {
            if self.min_radius(t) < -RADIUS_EPS * t.abs().max(1.0) {
                return None;
            }
            let (dx, dy) = self.discriminants(t);
            if dx >= 0.0 && dy >= 0.0 {
                return Some(t);
            }
            t += t.abs().max(1.0) * 4.0 * f64::EPSILON;
        }
        None
    }
}

/// Relative slack on offset radii, matching the solvers' equidistance check.
const RADIUS_EPS: f64 = 1e-7;

#[inline]
fn sq(v: f64) -> f64 {
    v * v
}

#[inline]
fn discriminant(c: &[f64; 8], t: f64) -> f64 {
    sq(c[4] + c[5] * t) - sq(c[6] + c[7] * t)
}

#[inline]
fn axis(c: &[f64; 8], t: f64, root: f64) -> f64 {
    c[0] - c[1] - c[2] * t + c[3] * root
}

/// Coefficients `(A, B, C)` of `D(t) = A·t² + B·t + C`.
fn discriminant_polynomial(c: &[f64; 8]) -> (f64, f64, f64) {
    (
        sq(c[5]) - sq(c[7]),
        2.0 * (c[4] * c[5] - c[6] * c[7]),
        sq(c[4]) - sq(c[6]),
    )
}

/// Center, radius and effective direction of a point or arc site.
/// Points only grow, so their direction is always `+`.
fn circle_of(site: &Site, k: Sign) -> Option<(Point, f64, Sign)> {
    match site {
        Site::Point(p) => Some((p.position(), 0.0, Sign::Plus)),
        Site::Arc(a) => Some((a.center(), a.radius(), k)),
        Site::Line(_) => None,
    }
}

fn unsupported(s1: &Site, s2: &Site) -> VoronoiError {
    VoronoiError::UnsupportedSitePair {
        first: s1.kind(),
        second: s2.kind(),
    }
}

fn default_sign(site: &Site, other: &Site) -> Sign {
    match (site, other) {
        (Site::Line(_), Site::Line(_)) => Sign::Plus,
        (Site::Line(l), o) => o
            .center()
            .map(|c| Sign::of(l.signed_distance(c)))
            .unwrap_or(Sign::Plus),
        _ => Sign::Plus,
    }
}

/// Bisector of two circles (points are circles with `r = 0`).
fn circle_circle(
    c1: Point,
    r1: f64,
    k1: Sign,
    c2: Point,
    r2: f64,
    k2: Sign,
    tol: &Tolerance,
) -> Result<Bisector, VoronoiError> {
    let d = c1.dist(c2);
    if d <= tol.zero {
        return Err(VoronoiError::DegenerateSite(format!(
            "concentric generators at {c1}"
        )));
    }
    let u = (c2 - c1) / d;
    let n = u.xy_perp();
    let alpha = (sq(r1) - sq(r2) + sq(d)) / (2.0 * d);
    let beta = (k1.value() * r1 - k2.value() * r2) / d;

    let x = [
        c1.x + u.x * alpha,
        0.0,
        -u.x * beta,
        n.x,
        r1,
        k1.value(),
        alpha,
        beta,
    ];
    let y = [
        c1.y + u.y * alpha,
        0.0,
        -u.y * beta,
        n.y,
        r1,
        k1.value(),
        alpha,
        beta,
    ];
    let edge_type = if k1 != k2 {
        EdgeType::Ellipse
    } else if (r1 - r2).abs() <= tol.zero {
        EdgeType::Line
    } else {
        EdgeType::Hyperbola
    };
    Ok(Bisector {
        edge_type,
        x,
        y,
        radii: [[r1, k1.value()], [r2, k2.value()]],
    })
}

/// Bisector of a circle (or point) and a line.
///
/// With `alfa3` the signed distance of the center from the line and `q` its
/// projection, the curve is `q + kl·t·n ± √((r + kc·t)² − (alfa3 − kl·t)²)·d`
/// where `n`, `d` are the line's unit normal and direction.
fn circle_line(c: Point, r: f64, kc: Sign, line: &LineSite, kl: Sign, tol: &Tolerance) -> Bisector {
    let (a, b) = (line.a(), line.b());
    let alfa3 = line.signed_distance(c);
    let dir = line.direction();
    let kl = kl.value();
    let x = [c.x, a * alfa3, -kl * a, dir.x, r, kc.value(), alfa3, -kl];
    let y = [c.y, b * alfa3, -kl * b, dir.y, r, kc.value(), alfa3, -kl];
    let edge_type = if r == 0.0 && tol.is_zero(alfa3) {
        EdgeType::Separator
    } else {
        EdgeType::Parabola
    };
    Bisector {
        edge_type,
        x,
        y,
        radii: [[r, kc.value()], [0.0; 2]],
    }
}

/// Bisector of two lines: the solution of both offset equations,
/// linear in `t`. Parallel lines have none.
fn line_line(
    l1: &LineSite,
    k1: Sign,
    l2: &LineSite,
    k2: Sign,
    tol: &Tolerance,
) -> Result<Bisector, VoronoiError> {
    let (a1, b1, c1) = (l1.a(), l1.b(), l1.c());
    let (a2, b2, c2) = (l2.a(), l2.b(), l2.c());
    let (k1, k2) = (k1.value(), k2.value());
    let delta = a1 * b2 - b1 * a2;
    if tol.is_zero(delta) {
        return Err(VoronoiError::ParallelLines { delta });
    }
    let mut x = [0.0; 8];
    let mut y = [0.0; 8];
    x[0] = (b1 * c2 - b2 * c1) / delta;
    x[2] = -(k1 * b2 - k2 * b1) / delta;
    y[0] = (a2 * c1 - a1 * c2) / delta;
    y[2] = -(a1 * k2 - a2 * k1) / delta;
    Ok(Bisector {
        edge_type: EdgeType::Line,
        x,
        y,
        radii: [[0.0; 2]; 2],
    })
}
