// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Mul;

use crate::d2::Vector;

/// Symmetric positive definite 2×2 matrix, upper triangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpdMatrix2 {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

/// Lower triangular 2×2 factor `[[xx, 0], [xy, yy]]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TriMatrix2 {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

impl SpdMatrix2 {
    pub const ZERO: SpdMatrix2 = SpdMatrix2::new(0.0, 0.0, 0.0);
    pub const UNIT: SpdMatrix2 = SpdMatrix2::new(1.0, 0.0, 1.0);

    pub const fn new(xx: f64, xy: f64, yy: f64) -> Self {
        Self { xx, xy, yy }
    }

    pub fn diag(d: f64) -> Self {
        Self::new(d, 0.0, d)
    }

    pub fn diag_vector(v: &Vector) -> Self {
        Self::new(v.x, 0.0, v.y)
    }

    /// Diagonal as a vector
    pub fn diagonal(&self) -> Vector {
        Vector::new(self.xx, self.yy)
    }

    /// Standard deviations
    pub fn diagonal_sqrt(&self) -> Vector {
        Vector::new(self.xx.sqrt(), self.yy.sqrt())
    }

    /// Add the outer product `v·vᵀ`.
    #[must_use]
    pub fn add_cov(&self, v: &Vector) -> SpdMatrix2 {
        Self::new(self.xx + v.x * v.x, self.xy + v.y * v.x, self.yy + v.y * v.y)
    }

    #[must_use]
    pub fn add(&self, b: &SpdMatrix2) -> SpdMatrix2 {
        Self::new(self.xx + b.xx, self.xy + b.xy, self.yy + b.yy)
    }

    #[must_use]
    pub fn scale(&self, s: f64) -> SpdMatrix2 {
        Self::new(s * self.xx, s * self.xy, s * self.yy)
    }

    pub fn mul_vec(&self, v: &Vector) -> Vector {
        Vector::new(
            self.xx * v.x + self.xy * v.y,
            self.xy * v.x + self.yy * v.y,
        )
    }

    /// `vᵀ·M·v`
    pub fn row_mul_sym_mul_col(&self, v: &Vector) -> f64 {
        v.dot(&self.mul_vec(v))
    }

    pub fn cholesky(&self) -> TriMatrix2 {
        let xx = self.xx.sqrt();
        let xy = self.xy / xx;
        let yy = (self.yy - xy * xy).sqrt();
        TriMatrix2 { xx, xy, yy }
    }

    /// Inverse through the Cholesky factor, stable for large entries
    pub fn cholesky_inv(&self) -> SpdMatrix2 {
        self.cholesky().inv().self_mul()
    }

    /// Closed-form inverse
    pub fn inv(&self) -> SpdMatrix2 {
        let r = 1.0 / (self.xx * self.yy - self.xy * self.xy);
        Self::new(self.yy * r, -self.xy * r, self.xx * r)
    }

    pub fn to_array_string(&self) -> String {
        format!("{} {} {}", self.xx, self.xy, self.yy)
    }
}

impl TriMatrix2 {
    pub fn inv(&self) -> TriMatrix2 {
        let xx = 1.0 / self.xx;
        let yy = 1.0 / self.yy;
        TriMatrix2 {
            xx,
            xy: -self.xy * yy * xx,
            yy,
        }
    }

    /// `Lᵀ·L`
    pub fn self_mul(&self) -> SpdMatrix2 {
        SpdMatrix2::new(
            self.xx * self.xx + self.xy * self.xy,
            self.xy * self.yy,
            self.yy * self.yy,
        )
    }
}

impl Mul<f64> for SpdMatrix2 {
    type Output = SpdMatrix2;

    fn mul(self, rhs: f64) -> SpdMatrix2 {
        self.scale(rhs)
    }
}

impl Mul<Vector> for SpdMatrix2 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        self.mul_vec(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cholesky_reconstructs() {
        let m = SpdMatrix2::new(4.0, 2.0, 3.0);
        let l = m.cholesky();
        assert_abs_diff_eq!(l.xx * l.xx, m.xx, epsilon = 1e-12);
        assert_abs_diff_eq!(l.xx * l.xy, m.xy, epsilon = 1e-12);
        assert_abs_diff_eq!(l.xy * l.xy + l.yy * l.yy, m.yy, epsilon = 1e-12);
    }

    #[test]
    fn test_cholesky_inv_matches_inv() {
        let m = SpdMatrix2::new(4.0, 2.0, 3.0);
        let a = m.cholesky_inv();
        let b = m.inv();
        assert_abs_diff_eq!(a.xx, b.xx, epsilon = 1e-12);
        assert_abs_diff_eq!(a.xy, b.xy, epsilon = 1e-12);
        assert_abs_diff_eq!(a.yy, b.yy, epsilon = 1e-12);
        let v = Vector::new(0.5, -2.0);
        let back = m.mul_vec(&a.mul_vec(&v));
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-12);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-12);
    }

    #[test]
    fn test_add_cov_and_quadratic_form() {
        let m = SpdMatrix2::ZERO.add_cov(&Vector::new(1.0, 2.0));
        assert_eq!(m, Vector::new(1.0, 2.0).outer());
        assert_eq!(SpdMatrix2::UNIT.row_mul_sym_mul_col(&Vector::new(3.0, 4.0)), 25.0);
        assert_eq!((SpdMatrix2::diag(2.0) * 0.5), SpdMatrix2::UNIT);
    }
}
