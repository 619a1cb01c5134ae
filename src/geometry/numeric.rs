//! Small dense-algebra helpers for the bisector model and the solvers.

use super::tolerance::Tolerance;

/// Real roots of `a·s² + b·s + c = 0` in ascending order.
///
/// Degrades to the linear equation when `|a|` is below `tol.zero`. A slightly
/// negative discriminant (relative to the coefficients) is treated as a double
/// root.
pub fn quadratic_roots(a: f64, b: f64, c: f64, tol: &Tolerance) -> Vec<f64> {
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Vec::new();
    }
    if tol.is_zero(a) {
        if tol.is_zero(b) {
            return Vec::new();
        }
        return vec![-c / b];
    }
    let disc = b * b - 4.0 * a * c;
    let scale = (b * b).max((4.0 * a * c).abs()).max(1.0);
    if disc < -tol.zero * scale {
        return Vec::new();
    }
    if disc <= tol.zero * scale {
        return vec![-b / (2.0 * a)];
    }
    // q = -(b + sign(b)·√disc)/2 avoids cancellation in one of the roots
    let sq = disc.sqrt();
    let q = if b >= 0.0 {
        -0.5 * (b + sq)
    } else {
        -0.5 * (b - sq)
    };
    let r1 = q / a;
    let r2 = if q != 0.0 { c / q } else { -r1 };
    if r1 <= r2 { vec![r1, r2] } else { vec![r2, r1] }
}

#[inline]
pub fn det2(a: f64, b: f64, c: f64, d: f64) -> f64 {
    a * d - b * c
}

#[inline]
pub fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * det2(m[1][1], m[1][2], m[2][1], m[2][2])
        - m[0][1] * det2(m[1][0], m[1][2], m[2][0], m[2][2])
        + m[0][2] * det2(m[1][0], m[1][1], m[2][0], m[2][1])
}

/// Solve `m · v = rhs` by Cramer's rule; `None` when `|det(m)| <= tol.zero`.
pub fn solve3(m: &[[f64; 3]; 3], rhs: [f64; 3], tol: &Tolerance) -> Option<[f64; 3]> {
    let det = det3(m);
    if !det.is_finite() || tol.is_zero(det) {
        return None;
    }
    let mut out = [0.0; 3];
    for (col, slot) in out.iter_mut().enumerate() {
        let mut mc = *m;
        for row in 0..3 {
            mc[row][col] = rhs[row];
        }
        *slot = det3(&mc) / det;
    }
    Some(out)
}

#[inline]
pub fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn scale3(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn add3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}
