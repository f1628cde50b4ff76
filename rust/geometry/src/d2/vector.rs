// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bimscan_core::consts::EPS;
use bimscan_core::float::{det2, dot2, hypot2};
use bimscan_core::int2d;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::Result;
use crate::stochastic::SpdMatrix2;
use crate::wkt;

/// Point or free vector in the plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };
    pub const NAN: Vector = Vector { x: f64::NAN, y: f64::NAN };
    pub const POSITIVE_INFINITY: Vector = Vector {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };
    pub const NEGATIVE_INFINITY: Vector = Vector {
        x: f64::NEG_INFINITY,
        y: f64::NEG_INFINITY,
    };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Midpoint between `self` and `other`
    #[inline]
    pub fn mid(&self, other: &Vector) -> Vector {
        Vector::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Componentwise minimum
    pub fn min(&self, other: &Vector) -> Vector {
        Vector::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Componentwise maximum
    pub fn max(&self, other: &Vector) -> Vector {
        Vector::new(self.x.max(other.x), self.y.max(other.y))
    }

    pub fn abs(&self) -> Vector {
        Vector::new(self.x.abs(), self.y.abs())
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        dot2(self.to_array(), other.to_array())
    }

    /// 2-D cross product `self × other`
    #[inline]
    pub fn det(&self, other: &Vector) -> f64 {
        det2(self.to_array(), other.to_array())
    }

    /// `(b - self) × (c - self)`, twice the signed area of the triangle
    pub fn det3(&self, b: &Vector, c: &Vector) -> f64 {
        (*b - *self).det(&(*c - *self))
    }

    pub fn sum_sq(&self) -> f64 {
        self.dot(self)
    }

    pub fn abs_sum(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    pub fn length(&self) -> f64 {
        hypot2(self.x, self.y)
    }

    pub fn distance(&self, other: &Vector) -> f64 {
        hypot2(self.x - other.x, self.y - other.y)
    }

    /// Angle from the x axis in `(-π, π]`
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Outer product `v vᵀ`
    pub fn outer(&self) -> SpdMatrix2 {
        SpdMatrix2::new(self.x * self.x, self.x * self.y, self.y * self.y)
    }

    /// Both components within `tol` of `other`
    pub fn approx_equals(&self, other: &Vector, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
    }

    /// [`approx_equals`](Self::approx_equals) at machine epsilon
    pub fn approx_equals_eps(&self, other: &Vector) -> bool {
        self.approx_equals(other, EPS)
    }

    /// Sum of all vectors (skipping the closing duplicate of a ring), added
    /// per axis in ascending order of magnitude.
    pub fn sum_of(vectors: &[Vector], is_ring: bool) -> Vector {
        let n = if is_ring {
            vectors.len().saturating_sub(1)
        } else {
            vectors.len()
        };
        let mut xs: Vec<f64> = vectors[..n].iter().map(|v| v.x).collect();
        let mut ys: Vec<f64> = vectors[..n].iter().map(|v| v.y).collect();
        Vector::new(sorted_sum(&mut xs), sorted_sum(&mut ys))
    }

    /// Arithmetic mean; rings ignore their closing duplicate
    pub fn mean_of(vectors: &[Vector], is_ring: bool) -> Vector {
        match vectors.len() {
            0 => Vector::ZERO,
            1 => vectors[0],
            2 if is_ring => vectors[0],
            2 => vectors[0].mid(&vectors[1]),
            3 if is_ring => vectors[0].mid(&vectors[1]),
            n => {
                let count = if is_ring { n - 1 } else { n };
                Vector::sum_of(vectors, is_ring) * (1.0 / count as f64)
            }
        }
    }

    /// `POINT(x y)`
    pub fn to_wkt_string(&self) -> String {
        format!("POINT({})", self)
    }

    /// Parse `"x y"`.
    pub fn parse(input: &str) -> Result<Vector> {
        let [x, y] = wkt::parse_coords::<2>(input)?;
        Ok(Vector::new(x, y))
    }

    /// Parse `POINT(x y)`.
    pub fn parse_wkt(input: &str) -> Result<Vector> {
        let [x, y] = wkt::parse_point::<2>(input)?;
        Ok(Vector::new(x, y))
    }
}

/// Sum in ascending order of magnitude
fn sorted_sum(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.abs().total_cmp(&b.abs()));
    values.iter().sum()
}

impl From<int2d::Vector> for Vector {
    fn from(v: int2d::Vector) -> Self {
        Vector::new(v.x as f64, v.y as f64)
    }
}

impl From<[f64; 2]> for Vector {
    fn from([x, y]: [f64; 2]) -> Self {
        Vector::new(x, y)
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

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;
    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        let v = Vector::new(0.1, -1.0 / 3.0);
        assert_eq!(Vector::parse(&v.to_string()).unwrap(), v);
        assert_eq!(Vector::parse_wkt(&v.to_wkt_string()).unwrap(), v);
        assert_eq!(Vector::new(1.0, -2.5).to_wkt_string(), "POINT(1 -2.5)");
    }

    #[test]
    fn test_products() {
        let a = Vector::new(3.0, 4.0);
        let b = Vector::new(-4.0, 3.0);
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!(a.det(&b), 25.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(Vector::ZERO.det3(&Vector::new(4.0, 0.0), &Vector::new(0.0, 3.0)), 12.0);
    }

    #[test]
    fn test_mean_of_ring_ignores_closing_vertex() {
        let ring = [
            Vector::new(0.0, 0.0),
            Vector::new(4.0, 0.0),
            Vector::new(4.0, 2.0),
            Vector::new(0.0, 2.0),
            Vector::new(0.0, 0.0),
        ];
        assert_eq!(Vector::mean_of(&ring, true), Vector::new(2.0, 1.0));
        assert_eq!(Vector::mean_of(&ring[..2], false), Vector::new(2.0, 0.0));
        assert_eq!(Vector::mean_of(&[], false), Vector::ZERO);
    }

    #[test]
    fn test_approx_equals() {
        let a = Vector::new(1.0, 1.0);
        assert!(a.approx_equals(&Vector::new(1.0 + 1e-9, 1.0), 1e-8));
        assert!(!a.approx_equals(&Vector::new(1.0 + 1e-7, 1.0), 1e-8));
    }
}
