// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use nalgebra::Matrix3;

use super::{Direction, Quaternion, Vector};

/// Coordinate axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation matrix stored as its three (orthonormal) columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotMatrix {
    axis_x: Direction,
    axis_y: Direction,
    axis_z: Direction,
}

impl Default for RotMatrix {
    fn default() -> Self {
        RotMatrix::IDENTITY
    }
}

impl RotMatrix {
    pub const IDENTITY: RotMatrix = RotMatrix {
        axis_x: Direction::UNIT_X,
        axis_y: Direction::UNIT_Y,
        axis_z: Direction::UNIT_Z,
    };

    /// Rotation whose `axis` column is `reference`.
    ///
    /// The remaining columns follow the cyclic order after `axis`; the first
    /// of them is aligned with `next` if given (and not parallel to
    /// `reference`), otherwise chosen by [`Direction::perp_pair`].
    pub fn new(reference: Direction, axis: Axis, next: Option<&Vector>) -> Self {
        let (second, third) = match next {
            Some(next) => {
                let pair = reference.make_perp(next);
                if pair.0.is_nan() || pair.1.is_nan() {
                    reference.perp_pair()
                } else {
                    pair
                }
            }
            None => reference.perp_pair(),
        };
        match axis {
            Axis::X => Self::from_axes_unchecked(reference, second, third),
            Axis::Y => Self::from_axes_unchecked(third, reference, second),
            Axis::Z => Self::from_axes_unchecked(second, third, reference),
        }
    }

    /// Caller guarantees an orthonormal right handed triple.
    pub const fn from_axes_unchecked(axis_x: Direction, axis_y: Direction, axis_z: Direction) -> Self {
        Self {
            axis_x,
            axis_y,
            axis_z,
        }
    }

    pub fn from_quaternion(q: &Quaternion) -> Self {
        let (x, y, z, w) = (q.x(), q.y(), q.z(), q.w());
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Self {
            axis_x: Direction::new_unchecked(1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy)),
            axis_y: Direction::new_unchecked(2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx)),
            axis_z: Direction::new_unchecked(2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy)),
        }
    }

    #[inline]
    pub fn axis_x(&self) -> Direction {
        self.axis_x
    }

    #[inline]
    pub fn axis_y(&self) -> Direction {
        self.axis_y
    }

    #[inline]
    pub fn axis_z(&self) -> Direction {
        self.axis_z
    }

    /// `R · v`
    pub fn mul_vector(&self, v: &Vector) -> Vector {
        self.axis_x.scale(v.x) + self.axis_y.scale(v.y) + self.axis_z.scale(v.z)
    }

    /// `Rᵀ · v`
    pub fn right_mul(&self, v: &Vector) -> Vector {
        Vector::new(
            self.axis_x.dot_vector(v),
            self.axis_y.dot_vector(v),
            self.axis_z.dot_vector(v),
        )
    }

    pub fn mul_direction(&self, d: &Direction) -> Direction {
        let v = self.mul_vector(&d.to_vector());
        Direction::new_unchecked(v.x, v.y, v.z)
    }

    pub fn right_mul_direction(&self, d: &Direction) -> Direction {
        let v = self.right_mul(&d.to_vector());
        Direction::new_unchecked(v.x, v.y, v.z)
    }

    /// Composition `self · other`
    pub fn mul(&self, other: &RotMatrix) -> RotMatrix {
        Self::from_axes_unchecked(
            self.mul_direction(&other.axis_x),
            self.mul_direction(&other.axis_y),
            self.mul_direction(&other.axis_z),
        )
    }

    pub fn transpose(&self) -> RotMatrix {
        let (x, y, z) = (self.axis_x, self.axis_y, self.axis_z);
        Self::from_axes_unchecked(
            Direction::new_unchecked(x.x(), y.x(), z.x()),
            Direction::new_unchecked(x.y(), y.y(), z.y()),
            Direction::new_unchecked(x.z(), y.z(), z.z()),
        )
    }

    pub fn to_matrix3(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[
            self.axis_x.to_vector().to_array().into(),
            self.axis_y.to_vector().to_array().into(),
            self.axis_z.to_vector().to_array().into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_orthonormal(r: &RotMatrix) {
        let m = r.to_matrix3();
        let id = m.transpose() * m;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(id[(i, j)], expected, epsilon = 1e-12);
            }
        }
        assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axis_cycle() {
        let n = Direction::new(0.2, -0.4, 0.9);
        let hint = Vector::new(1.0, 0.0, 0.0);
        let rz = RotMatrix::new(n, Axis::Z, Some(&hint));
        let rx = RotMatrix::new(n, Axis::X, Some(&hint.cross(&n.to_vector())));
        let ry = RotMatrix::new(n, Axis::Y, None);
        assert_eq!(rz.axis_z(), n);
        assert_eq!(rx.axis_x(), n);
        assert_eq!(ry.axis_y(), n);
        assert_orthonormal(&rz);
        assert_orthonormal(&rx);
        assert_orthonormal(&ry);
        assert!(rz.axis_x().dot_vector(&hint) > 0.0);
    }

    #[test]
    fn test_parallel_hint_falls_back() {
        let r = RotMatrix::new(Direction::UNIT_Z, Axis::Z, Some(&Vector::new(0.0, 0.0, 2.0)));
        assert_orthonormal(&r);
    }

    #[test]
    fn test_transpose_inverts() {
        let r = RotMatrix::new(Direction::new(1.0, 2.0, 3.0), Axis::Z, None);
        let v = Vector::new(0.5, -1.5, 2.0);
        let back = r.right_mul(&r.mul_vector(&v));
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-14);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-14);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-14);
        assert_orthonormal(&r.mul(&r.transpose()));
    }
}
