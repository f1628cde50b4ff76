// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bimscan_core::consts::TRIGTOL;
use bimscan_core::float::{det2, dot2, hypot2, normalize2};
use std::fmt;

use super::Vector;

/// Unit vector in the plane, equivalently an angle stored as `(cos, sin)`
///
/// Components are private so that the unit length invariant can only be
/// broken through [`Direction::new_unchecked`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    x: f64,
    y: f64,
}

impl Direction {
    pub const UNIT_X: Direction = Direction { x: 1.0, y: 0.0 };
    pub const UNIT_Y: Direction = Direction { x: 0.0, y: 1.0 };
    pub const NEG_UNIT_X: Direction = Direction { x: -1.0, y: 0.0 };
    pub const NEG_UNIT_Y: Direction = Direction { x: 0.0, y: -1.0 };
    pub const NAN: Direction = Direction {
        x: f64::NAN,
        y: f64::NAN,
    };

    /// Normalize `(x, y)`; a zero vector gives [`Direction::NAN`].
    pub fn new(x: f64, y: f64) -> Self {
        let ([x, y], _) = normalize2(x, y);
        Self { x, y }
    }

    /// Normalize `(x, y)` and report the length before normalization.
    pub fn create(x: f64, y: f64) -> (Self, f64) {
        let ([x, y], length) = normalize2(x, y);
        (Self { x, y }, length)
    }

    /// Caller guarantees `x² + y² == 1`.
    #[inline]
    pub const fn new_unchecked(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_vector(v: &Vector) -> Self {
        Self::new(v.x, v.y)
    }

    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    pub fn to_vector(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Angle from the x axis in `(-π, π]`
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Reflection at the x axis, `2π - angle`
    pub fn conjugate(&self) -> Direction {
        Direction::new_unchecked(self.x, -self.y)
    }

    /// `π/2 - angle`
    pub fn complementary(&self) -> Direction {
        Direction::new_unchecked(self.y, self.x)
    }

    /// `π - angle`
    pub fn supplementary(&self) -> Direction {
        Direction::new_unchecked(-self.x, self.y)
    }

    pub fn add_half_pi(&self) -> Direction {
        Direction::new_unchecked(-self.y, self.x)
    }

    pub fn sub_half_pi(&self) -> Direction {
        Direction::new_unchecked(self.y, -self.x)
    }

    pub fn add_pi(&self) -> Direction {
        Direction::new_unchecked(-self.x, -self.y)
    }

    /// Normalize again after accumulated rounding.
    pub fn renormalize(&self) -> Direction {
        let inv = 1.0 / hypot2(self.x, self.y);
        Direction::new_unchecked(self.x * inv, self.y * inv)
    }

    pub fn dot(&self, other: &Direction) -> f64 {
        dot2(self.to_array(), other.to_array())
    }

    pub fn det(&self, other: &Direction) -> f64 {
        det2(self.to_array(), other.to_array())
    }

    /// Direction of angle `self + other`
    pub fn rotate_add(&self, other: &Direction) -> Direction {
        Direction::new(
            self.x * other.x - self.y * other.y,
            self.y * other.x + self.x * other.y,
        )
    }

    /// Direction of angle `self - other`
    pub fn rotate_sub(&self, other: &Direction) -> Direction {
        Direction::new(self.dot(other), other.det(self))
    }

    /// Rotate `v` by this angle.
    pub fn rotate_vector(&self, v: &Vector) -> Vector {
        Vector::new(self.x * v.x - self.y * v.y, self.y * v.x + self.x * v.y)
    }

    /// Rotate `v` back by this angle.
    pub fn unrotate_vector(&self, v: &Vector) -> Vector {
        Vector::new(
            dot2(self.to_array(), v.to_array()),
            det2(self.to_array(), v.to_array()),
        )
    }

    /// Direction halfway between `self` and `other`; opposite directions
    /// give the left perpendicular of `self`.
    pub fn bisector(&self, other: &Direction) -> Direction {
        let (x, y) = (self.x + other.x, self.y + other.y);
        let len = hypot2(x, y);
        if len > TRIGTOL {
            Direction::new_unchecked(x / len, y / len)
        } else {
            self.add_half_pi()
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Direction;
    fn neg(self) -> Direction {
        self.add_pi()
    }
}

impl From<Direction> for Vector {
    fn from(d: Direction) -> Self {
        d.to_vector()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_create_reports_length() {
        let (d, len) = Direction::create(3.0, 4.0);
        assert_eq!(len, 5.0);
        assert_abs_diff_eq!(d.x(), 0.6, epsilon = 1e-15);
        assert_abs_diff_eq!(d.y(), 0.8, epsilon = 1e-15);
        assert!(Direction::new(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_quadrant_operations() {
        let d = Direction::from_angle(0.3);
        assert_abs_diff_eq!(d.add_half_pi().angle(), 0.3 + FRAC_PI_2, epsilon = 1e-14);
        assert_abs_diff_eq!(d.sub_half_pi().angle(), 0.3 - FRAC_PI_2, epsilon = 1e-14);
        assert_abs_diff_eq!(d.supplementary().angle(), PI - 0.3, epsilon = 1e-14);
        assert_abs_diff_eq!(d.complementary().angle(), FRAC_PI_2 - 0.3, epsilon = 1e-14);
        assert_abs_diff_eq!(d.conjugate().angle(), -0.3, epsilon = 1e-14);
        assert_abs_diff_eq!((-d).angle(), 0.3 - PI, epsilon = 1e-14);
    }

    #[test]
    fn test_angle_arithmetic() {
        let a = Direction::from_angle(0.5);
        let b = Direction::from_angle(0.2);
        assert_abs_diff_eq!(a.rotate_add(&b).angle(), 0.7, epsilon = 1e-14);
        assert_abs_diff_eq!(a.rotate_sub(&b).angle(), 0.3, epsilon = 1e-14);
        let v = Vector::new(2.0, 0.0);
        let r = a.rotate_vector(&v);
        assert_abs_diff_eq!(r.angle(), 0.5, epsilon = 1e-14);
        let back = a.unrotate_vector(&r);
        assert_abs_diff_eq!(back.x, 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(back.y, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_bisector() {
        let b = Direction::UNIT_X.bisector(&Direction::UNIT_Y);
        assert_abs_diff_eq!(b.angle(), FRAC_PI_4, epsilon = 1e-15);
        assert_eq!(Direction::UNIT_X.bisector(&Direction::NEG_UNIT_X), Direction::UNIT_Y);
    }
}
