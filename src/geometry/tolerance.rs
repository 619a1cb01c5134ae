//! Numeric tolerances shared by the bisector model, the solvers and the
//! topology validation.

use serde::{Deserialize, Serialize};

/// Tolerances for floating-point comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Magnitude below which determinants, denominators and leading
    /// coefficients are treated as zero.
    pub zero: f64,
    /// Allowed deviation between the offset `t` of a solution and its
    /// distance to each of the three generators.
    pub equidistance: f64,
    /// Allowed distance between an edge endpoint and the edge's bisector
    /// curve during geometric validation.
    pub on_curve: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            zero: 1e-12,
            equidistance: 1e-7,
            on_curve: 1e-6,
        }
    }
}

impl Tolerance {
    /// Tolerances scaled for coordinates of magnitude `scale`.
    pub fn scaled(scale: f64) -> Self {
        let s = scale.abs().max(1.0);
        let base = Self::default();
        Self {
            zero: base.zero * s * s,
            equidistance: base.equidistance * s,
            on_curve: base.on_curve * s,
        }
    }

    #[inline]
    pub fn is_zero(&self, v: f64) -> bool {
        v.abs() <= self.zero
    }
}
