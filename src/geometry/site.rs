//! Generators ("sites") of the Voronoi diagram.
//!
//! A [`Site`] is one of three closed variants: a point, a line (the supporting
//! line of a segment) or a circular arc. Segment endpoints are separate point
//! sites, so the distance functions here measure to the supporting line or
//! circle only.
//!
//! # Offsets
//! Every site has a family of offset curves parameterized by the offset
//! amount `t >= 0` and a direction [`Sign`] `k`:
//!
//! * line: `a·x + b·y + c − k·t = 0`, where `(a, b)` is the unit left normal;
//!   `k = +1` offsets to the left of `start → end`.
//! * circle (arc or point): `(x − xc)² + (y − yc)² = (r + k·t)²`; `k = +1`
//!   enlarges the circle, `k = −1` shrinks it. Points are zero-radius circles
//!   and always use `k = +1`.

use serde::{Deserialize, Serialize};
use std::ops::Neg;

use super::point::Point;
use super::tolerance::Tolerance;
use crate::voronoi_error::VoronoiError;

/// Offset direction `k ∈ {−1, +1}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    /// `+1.0` or `−1.0`.
    #[inline]
    pub const fn value(self) -> f64 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }

    /// Sign of `v`; zero maps to [`Sign::Plus`].
    #[inline]
    pub fn of(v: f64) -> Sign {
        if v < 0.0 { Sign::Minus } else { Sign::Plus }
    }

    #[inline]
    pub const fn flip(self) -> Sign {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

impl Neg for Sign {
    type Output = Sign;
    #[inline]
    fn neg(self) -> Sign {
        self.flip()
    }
}

/// Discriminant of [`Site`] used in error reports and solver dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteKind {
    Point,
    Line,
    Arc,
}

/// A point generator.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointSite {
    p: Point,
}

impl PointSite {
    pub fn new(p: Point) -> Result<Self, VoronoiError> {
        if !p.is_finite() {
            return Err(VoronoiError::DegenerateSite(format!(
                "point site {p} is not finite"
            )));
        }
        Ok(Self { p })
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.p
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.p.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.p.y
    }
}

/// A line generator `a·x + b·y + c = 0` with `a² + b² = 1`.
///
/// `(a, b)` is the left normal of the direction `start → end`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSite {
    start: Point,
    end: Point,
    a: f64,
    b: f64,
    c: f64,
}

impl LineSite {
    /// Line through the segment `start → end`.
    pub fn new(start: Point, end: Point) -> Result<Self, VoronoiError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(VoronoiError::DegenerateSite(format!(
                "line site {start} -> {end} is not finite"
            )));
        }
        let dir = (end - start).normalize().map_err(|_| {
            VoronoiError::DegenerateSite(format!("zero-length line site at {start}"))
        })?;
        let n = dir.xy_perp();
        Ok(Self {
            start,
            end,
            a: n.x,
            b: n.y,
            c: -n.dot(start),
        })
    }

    /// Line from implicit coefficients, normalised so that `a² + b² = 1`.
    ///
    /// The stored endpoints are a unit chord starting at the foot of the
    /// perpendicular from the origin, oriented so that `(a, b)` is its left
    /// normal.
    pub fn from_coefficients(a: f64, b: f64, c: f64) -> Result<Self, VoronoiError> {
        let len = (a * a + b * b).sqrt();
        if !len.is_finite() || !c.is_finite() || len == 0.0 {
            return Err(VoronoiError::DegenerateSite(format!(
                "invalid line coefficients ({a}, {b}, {c})"
            )));
        }
        let (a, b, c) = (a / len, b / len, c / len);
        let start = Point::new(-a * c, -b * c);
        let end = start + Point::new(b, -a);
        Ok(Self { start, end, a, b, c })
    }

    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }
    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Unit left normal `(a, b)`.
    #[inline]
    pub fn normal(&self) -> Point {
        Point::new(self.a, self.b)
    }

    /// Unit direction `start → end`.
    #[inline]
    pub fn direction(&self) -> Point {
        Point::new(self.b, -self.a)
    }

    /// `a·x + b·y + c`; positive left of the line.
    #[inline]
    pub fn signed_distance(&self, p: Point) -> f64 {
        self.a * p.x + self.b * p.y + self.c
    }

    /// Orthogonal projection of `p` onto the line.
    #[inline]
    pub fn project(&self, p: Point) -> Point {
        p - self.normal() * self.signed_distance(p)
    }

    /// True when `p` is one of the segment endpoints.
    pub fn has_endpoint(&self, p: Point, tol: &Tolerance) -> bool {
        p.dist(self.start) <= tol.equidistance || p.dist(self.end) <= tol.equidistance
    }
}

/// A circular-arc generator.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcSite {
    start: Point,
    end: Point,
    center: Point,
    radius: f64,
    cw: bool,
}

impl ArcSite {
    /// Arc from `start` to `end` around `center`, clockwise when `cw`.
    pub fn new(start: Point, end: Point, center: Point, cw: bool) -> Result<Self, VoronoiError> {
        Self::with_tolerance(start, end, center, cw, &Tolerance::default())
    }

    pub fn with_tolerance(
        start: Point,
        end: Point,
        center: Point,
        cw: bool,
        tol: &Tolerance,
    ) -> Result<Self, VoronoiError> {
        if !start.is_finite() || !end.is_finite() || !center.is_finite() {
            return Err(VoronoiError::DegenerateSite(
                "arc site coordinates are not finite".into(),
            ));
        }
        let radius = start.dist(center);
        if radius <= tol.zero {
            return Err(VoronoiError::DegenerateSite(format!(
                "arc around {center} has zero radius"
            )));
        }
        let end_radius = end.dist(center);
        if (end_radius - radius).abs() > tol.equidistance * radius.max(1.0) {
            return Err(VoronoiError::DegenerateSite(format!(
                "arc endpoints are not equidistant from {center}: {radius} vs {end_radius}"
            )));
        }
        Ok(Self {
            start,
            end,
            center,
            radius,
            cw,
        })
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
    #[inline]
    pub fn is_cw(&self) -> bool {
        self.cw
    }
}

/// A generator of the diagram.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Site {
    Point(PointSite),
    Line(LineSite),
    Arc(ArcSite),
}

/// Offset equation `q·(x² + y² − t²) + a·x + b·y + k·t + c = 0` of a site.
///
/// Lines have `q = 0`; circles and points have `q = 1`. Because `k² = 1` the
/// quadratic part is identical for every circle, which lets solvers cancel it
/// by subtraction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SiteEquation {
    pub q: f64,
    pub a: f64,
    pub b: f64,
    pub k: f64,
    pub c: f64,
}

impl SiteEquation {
    #[inline]
    pub fn is_linear(&self) -> bool {
        self.q == 0.0
    }

    #[inline]
    pub fn eval(&self, x: f64, y: f64, t: f64) -> f64 {
        self.q * (x * x + y * y - t * t) + self.a * x + self.b * y + self.k * t + self.c
    }

    /// Coefficients of the linear part as `(a, b, k)` with right-hand side `−c`.
    #[inline]
    pub(crate) fn linear_row(&self) -> ([f64; 3], f64) {
        ([self.a, self.b, self.k], -self.c)
    }

    /// `self − other`; cancels the quadratic part when both have `q = 1`.
    #[inline]
    pub(crate) fn minus(&self, other: &SiteEquation) -> SiteEquation {
        SiteEquation {
            q: self.q - other.q,
            a: self.a - other.a,
            b: self.b - other.b,
            k: self.k - other.k,
            c: self.c - other.c,
        }
    }
}

impl Site {
    /// Point site at `(x, y)`.
    pub fn point(x: f64, y: f64) -> Result<Site, VoronoiError> {
        Ok(Site::Point(PointSite::new(Point::new(x, y))?))
    }

    /// Line site through `start → end`.
    pub fn line(start: Point, end: Point) -> Result<Site, VoronoiError> {
        Ok(Site::Line(LineSite::new(start, end)?))
    }

    /// Arc site; see [`ArcSite::new`].
    pub fn arc(start: Point, end: Point, center: Point, cw: bool) -> Result<Site, VoronoiError> {
        Ok(Site::Arc(ArcSite::new(start, end, center, cw)?))
    }

    #[inline]
    pub fn kind(&self) -> SiteKind {
        match self {
            Site::Point(_) => SiteKind::Point,
            Site::Line(_) => SiteKind::Line,
            Site::Arc(_) => SiteKind::Arc,
        }
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        matches!(self, Site::Point(_))
    }
    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Site::Line(_))
    }
    #[inline]
    pub fn is_arc(&self) -> bool {
        matches!(self, Site::Arc(_))
    }

    pub fn as_point(&self) -> Option<&PointSite> {
        match self {
            Site::Point(p) => Some(p),
            _ => None,
        }
    }
    pub fn as_line(&self) -> Option<&LineSite> {
        match self {
            Site::Line(l) => Some(l),
            _ => None,
        }
    }
    pub fn as_arc(&self) -> Option<&ArcSite> {
        match self {
            Site::Arc(a) => Some(a),
            _ => None,
        }
    }

    /// Center of the site's circle; points are zero-radius circles.
    pub fn center(&self) -> Option<Point> {
        match self {
            Site::Point(p) => Some(p.position()),
            Site::Arc(a) => Some(a.center()),
            Site::Line(_) => None,
        }
    }

    /// Radius of the site's circle; `0` for points.
    pub fn radius(&self) -> Option<f64> {
        match self {
            Site::Point(_) => Some(0.0),
            Site::Arc(a) => Some(a.radius()),
            Site::Line(_) => None,
        }
    }

    /// Euclidean distance from `p` to the site (supporting line/circle).
    pub fn distance(&self, p: Point) -> f64 {
        match self {
            Site::Point(s) => p.dist(s.position()),
            Site::Line(l) => l.signed_distance(p).abs(),
            Site::Arc(a) => (p.dist(a.center()) - a.radius()).abs(),
        }
    }

    /// The offset `t` at which the `k`-offset of this site passes through `p`.
    ///
    /// Negative values mean `p` is on the opposite side of the requested
    /// direction.
    pub fn offset_distance(&self, p: Point, k: Sign) -> f64 {
        match self {
            Site::Point(s) => p.dist(s.position()),
            Site::Line(l) => k.value() * l.signed_distance(p),
            Site::Arc(a) => k.value() * (p.dist(a.center()) - a.radius()),
        }
    }

    /// The offset equation of this site in direction `k`.
    pub fn equation(&self, k: Sign) -> SiteEquation {
        match self {
            Site::Line(l) => SiteEquation {
                q: 0.0,
                a: l.a(),
                b: l.b(),
                k: -k.value(),
                c: l.c(),
            },
            Site::Point(s) => circle_equation(s.position(), 0.0, Sign::Plus),
            Site::Arc(a) => circle_equation(a.center(), a.radius(), k),
        }
    }
}

fn circle_equation(center: Point, r: f64, k: Sign) -> SiteEquation {
    SiteEquation {
        q: 1.0,
        a: -2.0 * center.x,
        b: -2.0 * center.y,
        k: -2.0 * r * k.value(),
        c: center.norm_sq() - r * r,
    }
}

impl From<PointSite> for Site {
    fn from(p: PointSite) -> Self {
        Site::Point(p)
    }
}
impl From<LineSite> for Site {
    fn from(l: LineSite) -> Self {
        Site::Line(l)
    }
}
impl From<ArcSite> for Site {
    fn from(a: ArcSite) -> Self {
        Site::Arc(a)
    }
}


#[cfg(test)]
mod serde_tests {
    use super::*;
    #[test]
    fn bincode_roundtrip() {
        let s = Site::line(Point::new(-1.0, 0.5), Point::new(3.0, 2.0)).unwrap();
        let bytes = bincode::serialize(&s).unwrap();
        let back: Site = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, s);
    }
}
