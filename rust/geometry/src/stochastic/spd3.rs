// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use nalgebra::Matrix3;
use std::ops::Mul;

use super::SpdMatrix2;
use crate::d3::Vector;

/// Symmetric positive definite 3×3 matrix, upper triangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpdMatrix3 {
    pub xx: f64,
    pub xy: f64,
    pub xz: f64,
    pub yy: f64,
    pub yz: f64,
    pub zz: f64,
}

/// Lower triangular 3×3 factor
///
/// ```text
/// [xx  0  0]
/// [xy yy  0]
/// [xz yz zz]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TriMatrix3 {
    pub xx: f64,
    pub xy: f64,
    pub xz: f64,
    pub yy: f64,
    pub yz: f64,
    pub zz: f64,
}

impl SpdMatrix3 {
    pub const ZERO: SpdMatrix3 = SpdMatrix3::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    pub const UNIT: SpdMatrix3 = SpdMatrix3::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0);

    pub const fn new(xx: f64, xy: f64, xz: f64, yy: f64, yz: f64, zz: f64) -> Self {
        Self {
            xx,
            xy,
            xz,
            yy,
            yz,
            zz,
        }
    }

    pub fn diag(d: f64) -> Self {
        Self::new(d, 0.0, 0.0, d, 0.0, d)
    }

    pub fn diag_vector(v: &Vector) -> Self {
        Self::new(v.x, 0.0, 0.0, v.y, 0.0, v.z)
    }

    pub fn diagonal(&self) -> Vector {
        Vector::new(self.xx, self.yy, self.zz)
    }

    /// Standard deviations
    pub fn diagonal_sqrt(&self) -> Vector {
        Vector::new(self.xx.sqrt(), self.yy.sqrt(), self.zz.sqrt())
    }

    /// Upper left 2×2 block
    pub fn xy_block(&self) -> SpdMatrix2 {
        SpdMatrix2::new(self.xx, self.xy, self.yy)
    }

    pub fn from_matrix3(m: &Matrix3<f64>) -> Self {
        Self::new(m[(0, 0)], m[(0, 1)], m[(0, 2)], m[(1, 1)], m[(1, 2)], m[(2, 2)])
    }

    pub fn to_matrix3(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.xx, self.xy, self.xz, //
            self.xy, self.yy, self.yz, //
            self.xz, self.yz, self.zz,
        )
    }

    #[must_use]
    pub fn add_cov(&self, v: &Vector) -> SpdMatrix3 {
        self.add(&v.outer())
    }

    #[must_use]
    pub fn add(&self, b: &SpdMatrix3) -> SpdMatrix3 {
        Self::new(
            self.xx + b.xx,
            self.xy + b.xy,
            self.xz + b.xz,
            self.yy + b.yy,
            self.yz + b.yz,
            self.zz + b.zz,
        )
    }

    #[must_use]
    pub fn scale(&self, s: f64) -> SpdMatrix3 {
        Self::new(
            s * self.xx,
            s * self.xy,
            s * self.xz,
            s * self.yy,
            s * self.yz,
            s * self.zz,
        )
    }

    pub fn mul_vec(&self, v: &Vector) -> Vector {
        Vector::new(
            self.xx * v.x + self.xy * v.y + self.xz * v.z,
            self.xy * v.x + self.yy * v.y + self.yz * v.z,
            self.xz * v.x + self.yz * v.y + self.zz * v.z,
        )
    }

    /// `vᵀ·M·v`
    pub fn row_mul_sym_mul_col(&self, v: &Vector) -> f64 {
        v.dot(&self.mul_vec(v))
    }

    /// `A·M·Aᵀ`
    pub fn mat_mul_sym_mul_mat_trans(&self, a: &Matrix3<f64>) -> SpdMatrix3 {
        Self::from_matrix3(&(a * self.to_matrix3() * a.transpose()))
    }

    pub fn cholesky(&self) -> TriMatrix3 {
        let xx = self.xx.sqrt();
        let xy = self.xy / xx;
        let xz = self.xz / xx;
        let yy = (self.yy - xy * xy).sqrt();
        let yz = (self.yz - xy * xz) / yy;
        let zz = (self.zz - xz * xz - yz * yz).sqrt();
        TriMatrix3 {
            xx,
            xy,
            xz,
            yy,
            yz,
            zz,
        }
    }

    /// Inverse through the Cholesky factor, stable for large entries
    pub fn cholesky_inv(&self) -> SpdMatrix3 {
        self.cholesky().inv().self_mul()
    }

    /// Closed-form inverse (adjugate over determinant)
    pub fn inv(&self) -> SpdMatrix3 {
        let (a, b, c, d, e, f) = (self.xx, self.xy, self.xz, self.yy, self.yz, self.zz);
        let adbb = a * d - b * b;
        let bcae = b * c - a * e;
        let becd = b * e - c * d;
        let r = 1.0 / (bcae * e + adbb * f + becd * c);
        Self::new(
            (d * f - e * e) * r,
            (c * e - b * f) * r,
            becd * r,
            (a * f - c * c) * r,
            bcae * r,
            adbb * r,
        )
    }

    pub fn to_array_string(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.xx, self.xy, self.xz, self.yy, self.yz, self.zz
        )
    }
}

impl TriMatrix3 {
    pub fn inv(&self) -> TriMatrix3 {
        let zz = 1.0 / self.zz;
        let yy = 1.0 / self.yy;
        let yz = -self.yz * zz * yy;
        let xx = 1.0 / self.xx;
        let xz = -(self.xy * yz + self.xz * zz) * xx;
        let xy = -self.xy * yy * xx;
        TriMatrix3 {
            xx,
            xy,
            xz,
            yy,
            yz,
            zz,
        }
    }

    /// `Lᵀ·L`
    pub fn self_mul(&self) -> SpdMatrix3 {
        SpdMatrix3::new(
            self.xx * self.xx + self.xy * self.xy + self.xz * self.xz,
            self.xy * self.yy + self.xz * self.yz,
            self.xz * self.zz,
            self.yy * self.yy + self.yz * self.yz,
            self.yz * self.zz,
            self.zz * self.zz,
        )
    }
}

impl Mul<f64> for SpdMatrix3 {
    type Output = SpdMatrix3;

    fn mul(self, rhs: f64) -> SpdMatrix3 {
        self.scale(rhs)
    }
}

impl Mul<Vector> for SpdMatrix3 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        self.mul_vec(&rhs)
    }
}
