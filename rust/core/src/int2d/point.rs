// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::vector::Vector;
use crate::numbers::Fraction;
use std::fmt;

fn gcd(a: u64, b: u64) -> u64 {
    let (mut q, mut r) = (b, a);
    while r > 0 {
        (q, r) = (r, q % r);
    }
    q.max(1)
}

/// Point with integer part `(x, y)` plus exact fractional offsets
/// `num_x / den`, `num_y / den` in `[0, 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FractionVector {
    pub x: i32,
    pub y: i32,
    num_x: u64,
    num_y: u64,
    den: u64,
}

impl FractionVector {
    pub fn num_x(&self) -> u64 {
        self.num_x
    }

    pub fn num_y(&self) -> u64 {
        self.num_y
    }

    pub fn den(&self) -> u64 {
        self.den
    }

    pub fn x_f64(&self) -> f64 {
        self.x as f64 + self.num_x as f64 / self.den as f64
    }

    pub fn y_f64(&self) -> f64 {
        self.y as f64 + self.num_y as f64 / self.den as f64
    }

    pub fn round_x(&self) -> i32 {
        self.x + if self.den - self.num_x > self.num_x { 0 } else { 1 }
    }

    pub fn round_y(&self) -> i32 {
        self.y + if self.den - self.num_y > self.num_y { 0 } else { 1 }
    }

    /// Smallest integer point not below this one in either axis
    pub fn ceiling(&self) -> Vector {
        Vector::new(
            self.x + i32::from(self.num_x != 0),
            self.y + i32::from(self.num_y != 0),
        )
    }
}

/// Exact point on an integer grid, either a grid point or a point between
/// grid points (typically a segment intersection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerPoint {
    Exact(Vector),
    Fractional(FractionVector),
}

/// Integer part (floor) and remainder of `start + (dest - start) * pos`
/// along one axis
fn axis_position(start: i32, dest: i32, pos: &Fraction) -> (i32, u64) {
    let delta = dest as i64 - start as i64;
    let magnitude = delta.unsigned_abs() as u128 * pos.num() as u128;
    let den = pos.den() as u128;
    // pos <= 1, so the quotient never exceeds |delta| < 2^32
    let mut quotient = (magnitude / den) as i64;
    let mut rem = (magnitude % den) as u64;
    if delta < 0 {
        if rem != 0 {
            quotient += 1;
            rem = pos.den() - rem;
        }
        quotient = -quotient;
    }
    ((start as i64 + quotient) as i32, rem)
}

impl IntegerPoint {
    /// Exact point at parameter `pos` on the segment `start`–`dest`
    pub fn on_segment(start: &Vector, dest: &Vector, pos: &Fraction) -> Self {
        let (x, rem_x) = axis_position(start.x, dest.x, pos);
        let (y, rem_y) = axis_position(start.y, dest.y, pos);
        if rem_x == 0 && rem_y == 0 {
            return IntegerPoint::Exact(Vector::new(x, y));
        }
        let r = gcd(rem_x, gcd(rem_y, pos.den()));
        IntegerPoint::Fractional(FractionVector {
            x,
            y,
            num_x: rem_x / r,
            num_y: rem_y / r,
            den: pos.den() / r,
        })
    }

    /// Integer part (floor) of the point
    pub fn floor(&self) -> Vector {
        match self {
            IntegerPoint::Exact(v) => *v,
            IntegerPoint::Fractional(f) => Vector::new(f.x, f.y),
        }
    }

    pub fn to_f64(&self) -> (f64, f64) {
        match self {
            IntegerPoint::Exact(v) => (v.x as f64, v.y as f64),
            IntegerPoint::Fractional(f) => (f.x_f64(), f.y_f64()),
        }
    }

    /// `POINT(x y)` with the floating point approximation
    pub fn to_wkt_string(&self) -> String {
        format!("POINT({})", self)
    }
}

impl From<Vector> for IntegerPoint {
    fn from(v: Vector) -> Self {
        IntegerPoint::Exact(v)
    }
}

impl fmt::Display for IntegerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegerPoint::Exact(v) => write!(f, "{}", v),
            IntegerPoint::Fractional(_) => {
                let (x, y) = self.to_f64();
                write!(f, "{} {}", x, y)
            }
        }
    }
}
