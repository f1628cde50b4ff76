// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bimscan_core::float::normalize4;

use super::{Direction, RotMatrix, Vector};

/// Unit quaternion `w + xi + yj + zk` representing a rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    x: f64,
    y: f64,
    z: f64,
    w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Normalizing constructor
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        let [x, y, z, w] = normalize4(x, y, z, w);
        Self { x, y, z, w }
    }

    pub const fn new_unchecked(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation by `angle` (radians, right hand rule) about `axis`
    pub fn from_axis_angle(axis: &Direction, angle: f64) -> Self {
        let (sin, cos) = (0.5 * angle).sin_cos();
        Self::new(axis.x() * sin, axis.y() * sin, axis.z() * sin, cos)
    }

    pub fn from_rot_matrix(r: &RotMatrix) -> Self {
        let (ax, ay, az) = (r.axis_x(), r.axis_y(), r.axis_z());
        // m[row][col], columns are the axes
        let (m00, m10, m20) = (ax.x(), ax.y(), ax.z());
        let (m01, m11, m21) = (ay.x(), ay.y(), ay.z());
        let (m02, m12, m22) = (az.x(), az.y(), az.z());
        let w = 0.5 * (1.0 + m00 + m11 + m22).max(0.0).sqrt();
        let x = 0.5 * (1.0 + m00 - m11 - m22).max(0.0).sqrt();
        let y = 0.5 * (1.0 - m00 + m11 - m22).max(0.0).sqrt();
        let z = 0.5 * (1.0 - m00 - m11 + m22).max(0.0).sqrt();
        Self::new(
            x.copysign(m21 - m12),
            y.copysign(m02 - m20),
            z.copysign(m10 - m01),
            w,
        )
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Inverse rotation
    pub fn conj(&self) -> Quaternion {
        Self::new_unchecked(-self.x, -self.y, -self.z, self.w)
    }

    /// Hamilton product, rotation `other` first then `self`
    pub fn mul(&self, other: &Quaternion) -> Quaternion {
        let (a, b) = (self, other);
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }

    pub fn to_rot_matrix(&self) -> RotMatrix {
        RotMatrix::from_quaternion(self)
    }

    /// Rotate `v`.
    pub fn transform(&self, v: &Vector) -> Vector {
        self.to_rot_matrix().mul_vector(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_eq(a: &Vector, b: &Vector) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn test_axis_angle() {
        let q = Quaternion::from_axis_angle(&Direction::UNIT_Z, FRAC_PI_2);
        assert_vec_eq(&q.transform(&Vector::new(1.0, 0.0, 0.0)), &Vector::new(0.0, 1.0, 0.0));
        let back = q.conj().transform(&Vector::new(0.0, 1.0, 0.0));
        assert_vec_eq(&back, &Vector::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_matrix_round_trip() {
        for (axis, angle) in [
            (Direction::new(1.0, 2.0, 3.0), 0.7),
            (Direction::UNIT_X, 3.0),
            (Direction::new(-1.0, 0.5, 0.0), -2.2),
        ] {
            let q = Quaternion::from_axis_angle(&axis, angle);
            let r = q.to_rot_matrix();
            let q2 = Quaternion::from_rot_matrix(&r);
            let v = Vector::new(0.3, -1.2, 2.5);
            assert_vec_eq(&q.transform(&v), &q2.transform(&v));
        }
    }

    #[test]
    fn test_product_composes() {
        let a = Quaternion::from_axis_angle(&Direction::UNIT_Z, 0.4);
        let b = Quaternion::from_axis_angle(&Direction::UNIT_X, 1.1);
        let v = Vector::new(1.0, 2.0, 3.0);
        assert_vec_eq(&a.mul(&b).transform(&v), &a.transform(&b.transform(&v)));
        let m = a.to_rot_matrix().mul(&b.to_rot_matrix());
        assert_vec_eq(&m.mul_vector(&v), &a.mul(&b).transform(&v));
    }
}
