// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::{Error, Result};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Integer 2-D point, ordered lexicographically by `x` then `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

/// Difference `b - a` widened to 64 bits (never overflows)
#[inline]
pub(crate) fn diff(a: &Vector, b: &Vector) -> (i64, i64) {
    (b.x as i64 - a.x as i64, b.y as i64 - a.y as i64)
}

#[inline]
pub(crate) fn cross(u: (i64, i64), v: (i64, i64)) -> i128 {
    (u.0 as i128 * v.1 as i128) - (u.1 as i128 * v.0 as i128)
}

#[inline]
pub(crate) fn dot(u: (i64, i64), v: (i64, i64)) -> i128 {
    (u.0 as i128 * v.0 as i128) + (u.1 as i128 * v.1 as i128)
}

/// Twice the signed area of triangle `abc`: `(b - a) × (c - a)`.
///
/// Exact for the full `i32` domain.
#[inline]
pub fn det(a: &Vector, b: &Vector, c: &Vector) -> i128 {
    cross(diff(a, b), diff(a, c))
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn sum(&self) -> i64 {
        self.x as i64 + self.y as i64
    }

    pub fn abs_sum(&self) -> i64 {
        (self.x as i64).abs() + (self.y as i64).abs()
    }

    /// Squared length
    pub fn sum_sq(&self) -> i128 {
        let v = (self.x as i64, self.y as i64);
        dot(v, v)
    }

    pub fn dot(&self, other: &Vector) -> i128 {
        dot(
            (self.x as i64, self.y as i64),
            (other.x as i64, other.y as i64),
        )
    }

    /// Cross product `self × other`; two 32-bit products always fit 64 bits
    pub fn det(&self, other: &Vector) -> i64 {
        (self.x as i64 * other.y as i64) - (self.y as i64 * other.x as i64)
    }

    pub fn min(&self, other: &Vector) -> Vector {
        Vector::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(&self, other: &Vector) -> Vector {
        Vector::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// `true` if `self` lies on the open segment `a`–`b`
    pub fn is_between(&self, a: &Vector, b: &Vector) -> bool {
        let ab = diff(a, b);
        let ap = diff(a, self);
        if cross(ab, ap) != 0 {
            return false;
        }
        let lnum = dot(ab, ap);
        lnum > 0 && lnum < dot(ab, ab)
    }

    /// `true` if `self` lies on the ray from `orig` through `dest`
    /// (excluding `orig`); also returns the side determinant.
    pub fn is_on_ray(&self, orig: &Vector, dest: &Vector) -> (bool, i128) {
        let ab = diff(orig, dest);
        let ap = diff(orig, self);
        let det = cross(ab, ap);
        (det == 0 && dot(ab, ap) > 0, det)
    }

    /// Strictly inside the counter-clockwise triangle `abc`
    pub fn is_inside(&self, a: &Vector, b: &Vector, c: &Vector) -> bool {
        det(a, b, self) > 0 && det(b, c, self) > 0 && det(c, a, self) > 0
    }

    /// Strictly outside the counter-clockwise triangle `abc`
    pub fn is_disjoint(&self, a: &Vector, b: &Vector, c: &Vector) -> bool {
        det(a, b, self) < 0 || det(b, c, self) < 0 || det(c, a, self) < 0
    }

    /// `true` only if `self` lies on the line through the edge, in the
    /// direction from `edge_a` towards `edge_b`
    pub fn in_direction(&self, edge_a: &Vector, edge_b: &Vector) -> bool {
        let (bx, by) = diff(edge_a, edge_b);
        let (tx, ty) = diff(edge_a, self);
        if cross((bx, by), (tx, ty)) != 0 {
            return false;
        }
        let dotx = bx as i128 * tx as i128;
        let doty = by as i128 * ty as i128;
        let sx = dotx.signum();
        let sy = doty.signum();
        (sx + sy) > 0 || (sx < 0 && sy > 0 && doty > dotx) || (sy < 0 && sx > 0 && dotx > doty)
    }

    pub fn collinear(&self, a: &Vector, b: &Vector) -> bool {
        det(a, b, self) == 0
    }

    /// `POINT(x y)`
    pub fn to_wkt_string(&self) -> String {
        format!("POINT({})", self)
    }

    /// Parse `"x y"` (any whitespace separated, extra tokens ignored)
    pub fn parse(input: &str) -> Result<Vector> {
        let mut parts = input.split_whitespace();
        let mut next = |axis: &str| -> Result<i32> {
            parts
                .next()
                .ok_or_else(|| Error::Parse(format!("missing {} in '{}'", axis, input)))?
                .parse::<i32>()
                .map_err(|e| Error::Parse(format!("{} in '{}': {}", axis, input, e)))
        };
        let x = next("x")?;
        let y = next("y")?;
        Ok(Vector::new(x, y))
    }

    /// Parse `POINT(x y)`, case insensitive
    pub fn parse_wkt(input: &str) -> Result<Vector> {
        let upper = input.to_ascii_uppercase();
        let start = upper
            .find("POINT")
            .and_then(|i| input[i..].find('(').map(|j| i + j + 1))
            .ok_or_else(|| Error::Parse(format!("not a POINT: '{}'", input)))?;
        let end = input
            .rfind(')')
            .filter(|&e| e > start)
            .ok_or_else(|| Error::Parse(format!("unterminated POINT: '{}'", input)))?;
        Vector::parse(&input[start..end])
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl FromStr for Vector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Vector::parse(s)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i32) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}
