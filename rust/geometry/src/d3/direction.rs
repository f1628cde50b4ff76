// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bimscan_core::consts::TRIGTOL;
use bimscan_core::float::{cross3, dot3, hypot3, normalize3};
use std::fmt;

use super::Vector;
use crate::error::Result;
use crate::wkt;

/// Unit vector in space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    x: f64,
    y: f64,
    z: f64,
}

impl Direction {
    pub const UNIT_X: Direction = Direction::new_unchecked(1.0, 0.0, 0.0);
    pub const UNIT_Y: Direction = Direction::new_unchecked(0.0, 1.0, 0.0);
    pub const UNIT_Z: Direction = Direction::new_unchecked(0.0, 0.0, 1.0);
    pub const NEG_UNIT_X: Direction = Direction::new_unchecked(-1.0, 0.0, 0.0);
    pub const NEG_UNIT_Y: Direction = Direction::new_unchecked(0.0, -1.0, 0.0);
    pub const NEG_UNIT_Z: Direction = Direction::new_unchecked(0.0, 0.0, -1.0);
    pub const NAN: Direction = Direction::new_unchecked(f64::NAN, f64::NAN, f64::NAN);

    /// Normalize `(x, y, z)`; a zero vector gives [`Direction::NAN`].
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        let ([x, y, z], _) = normalize3(x, y, z);
        Self { x, y, z }
    }

    /// Normalize and report the length before normalization.
    pub fn create(x: f64, y: f64, z: f64) -> (Self, f64) {
        let ([x, y, z], length) = normalize3(x, y, z);
        (Self { x, y, z }, length)
    }

    /// Caller guarantees unit length.
    #[inline]
    pub const fn new_unchecked(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_vector(v: &Vector) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Direction from polar angles: azimuth in the xy plane, inclination
    /// measured from the z axis.
    pub fn from_angles(azimuth: f64, inclination: f64) -> Self {
        let (sin_a, cos_a) = azimuth.sin_cos();
        let (sin_i, cos_i) = inclination.sin_cos();
        Self::new(sin_i * cos_a, sin_i * sin_a, cos_i)
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

    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub fn to_vector(&self) -> Vector {
        Vector::new(self.x, self.y, self.z)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn azimuth(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn inclination(&self) -> f64 {
        self.z.clamp(-1.0, 1.0).acos()
    }

    /// Opposite direction
    pub fn turn(&self) -> Direction {
        Direction::new_unchecked(-self.x, -self.y, -self.z)
    }

    pub fn scale(&self, length: f64) -> Vector {
        Vector::new(self.x * length, self.y * length, self.z * length)
    }

    pub fn dot(&self, other: &Direction) -> f64 {
        dot3(self.to_array(), other.to_array())
    }

    pub fn dot_vector(&self, v: &Vector) -> f64 {
        dot3(self.to_array(), v.to_array())
    }

    pub fn cross(&self, other: &Direction) -> Vector {
        cross3(self.to_array(), other.to_array()).into()
    }

    pub fn cross_vector(&self, v: &Vector) -> Vector {
        cross3(self.to_array(), v.to_array()).into()
    }

    /// Cosine of the enclosed angle
    pub fn diff_cos(&self, other: &Direction) -> f64 {
        self.dot(other)
    }

    /// Sine of the enclosed angle
    pub fn diff_sin(&self, other: &Direction) -> f64 {
        let [x, y, z] = cross3(other.to_array(), self.to_array());
        hypot3(x, y, z)
    }

    /// A perpendicular unit direction.
    ///
    /// Built from `(y² - zx, z² - xy, x² - yz)`, which is orthogonal to
    /// `self` unless all components are equal, then orthogonalized once
    /// more to remove rounding.
    pub fn perp(&self) -> Direction {
        let (x, y, z) = (self.x, self.y, self.z);
        let raw = Vector::new(y * y - z * x, z * z - x * y, x * x - y * z);
        let side = self.cross_vector(&raw);
        Direction::from_vector(&side.cross(&self.to_vector()))
    }

    /// Two directions completing `self` to a right handed system
    pub fn perp_pair(&self) -> (Direction, Direction) {
        let second = self.perp();
        let third = Direction::from_vector(&self.cross(&second));
        (second, third)
    }

    /// Like [`perp_pair`](Self::perp_pair), but the second direction is
    /// taken from the part of `next` orthogonal to `self`.
    pub fn make_perp(&self, next: &Vector) -> (Direction, Direction) {
        let third = Direction::from_vector(&self.cross_vector(next));
        let second = Direction::from_vector(&third.cross(self));
        (second, third)
    }

    /// Direction halfway between `self` and `other`; opposite directions
    /// give a perpendicular of `self`.
    pub fn bisector(&self, other: &Direction) -> Direction {
        let (x, y, z) = (self.x + other.x, self.y + other.y, self.z + other.z);
        let len = hypot3(x, y, z);
        if len > TRIGTOL {
            Direction::new_unchecked(x / len, y / len, z / len)
        } else {
            self.perp()
        }
    }

    /// Parse `"x y z"`, normalizing the result.
    pub fn parse(input: &str) -> Result<Direction> {
        let [x, y, z] = wkt::parse_coords::<3>(input)?;
        Ok(Direction::new(x, y, z))
    }
}

impl std::ops::Neg for Direction {
    type Output = Direction;
    fn neg(self) -> Direction {
        self.turn()
    }
}

impl From<Direction> for Vector {
    fn from(d: Direction) -> Self {
        d.to_vector()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_unit(d: &Direction) {
        assert_abs_diff_eq!(d.to_vector().length(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_perp_is_orthogonal() {
        for d in [
            Direction::UNIT_X,
            Direction::UNIT_Z,
            Direction::new(1.0, 1.0, 1.0),
            Direction::new(0.3, -2.0, 0.7),
            Direction::new(-1.0, -1.0, -1.0),
        ] {
            let (second, third) = d.perp_pair();
            assert_unit(&second);
            assert_unit(&third);
            assert_abs_diff_eq!(d.dot(&second), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(d.dot(&third), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(second.dot(&third), 0.0, epsilon = 1e-12);
            // right handed
            assert_abs_diff_eq!(d.cross(&second).dot(&third.to_vector()), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_make_perp_keeps_hint() {
        let (second, third) = Direction::UNIT_Z.make_perp(&Vector::new(2.0, 0.0, 0.5));
        assert_eq!(second, Direction::UNIT_X);
        assert_eq!(third, Direction::UNIT_Y);
    }

    #[test]
    fn test_angles() {
        let d = Direction::from_angles(0.4, 1.1);
        assert_abs_diff_eq!(d.azimuth(), 0.4, epsilon = 1e-14);
        assert_abs_diff_eq!(d.inclination(), 1.1, epsilon = 1e-14);
        assert_abs_diff_eq!(Direction::UNIT_X.diff_sin(&Direction::UNIT_Y), 1.0);
        assert_abs_diff_eq!(Direction::UNIT_X.diff_cos(&Direction::UNIT_Y), 0.0);
    }

    #[test]
    fn test_bisector_of_opposites() {
        let b = Direction::UNIT_Z.bisector(&Direction::NEG_UNIT_Z);
        assert_abs_diff_eq!(b.dot(&Direction::UNIT_Z), 0.0);
        let (d, len) = Direction::create(0.0, 0.0, -4.0);
        assert_eq!((d, len), (Direction::NEG_UNIT_Z, 4.0));
    }
}
