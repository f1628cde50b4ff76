// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bimscan_core::consts::{EPS, THIRD, TRIGTOL_SQUARED};
use bimscan_core::float::{cross3, det3, dot3, hypot3, sum3};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::PlaneLike;
use crate::error::Result;
use crate::stochastic::SpdMatrix3;
use crate::wkt;

/// Point or free vector in space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0.0, 0.0, 0.0);
    pub const NAN: Vector = Vector::new(f64::NAN, f64::NAN, f64::NAN);
    pub const POSITIVE_INFINITY: Vector = Vector::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    pub const NEGATIVE_INFINITY: Vector =
        Vector::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn mid(&self, other: &Vector) -> Vector {
        Vector::new(
            0.5 * (self.x + other.x),
            0.5 * (self.y + other.y),
            0.5 * (self.z + other.z),
        )
    }

    pub fn min(&self, other: &Vector) -> Vector {
        Vector::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max(&self, other: &Vector) -> Vector {
        Vector::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    pub fn abs(&self) -> Vector {
        Vector::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Dot product, summed in ascending order of magnitude
    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        dot3(self.to_array(), other.to_array())
    }

    #[inline]
    pub fn cross(&self, other: &Vector) -> Vector {
        cross3(self.to_array(), other.to_array()).into()
    }

    /// Triple product `a · (b × c)`
    pub fn det3(a: &Vector, b: &Vector, c: &Vector) -> f64 {
        det3(a.to_array(), b.to_array(), c.to_array())
    }

    pub fn sum_sq(&self) -> f64 {
        self.dot(self)
    }

    /// Component sum
    pub fn sum(&self) -> f64 {
        sum3(self.x, self.y, self.z)
    }

    pub fn abs_sum(&self) -> f64 {
        sum3(self.x.abs(), self.y.abs(), self.z.abs())
    }

    pub fn length(&self) -> f64 {
        hypot3(self.x, self.y, self.z)
    }

    pub fn distance(&self, other: &Vector) -> f64 {
        hypot3(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Outer product `v vᵀ`
    pub fn outer(&self) -> SpdMatrix3 {
        SpdMatrix3::new(
            self.x * self.x,
            self.x * self.y,
            self.x * self.z,
            self.y * self.y,
            self.y * self.z,
            self.z * self.z,
        )
    }

    /// Every component within `tol` of `other`
    pub fn approx_equals(&self, other: &Vector, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }

    pub fn approx_equals_eps(&self, other: &Vector) -> bool {
        self.approx_equals(other, EPS)
    }

    pub fn mean2(a: &Vector, b: &Vector) -> Vector {
        a.mid(b)
    }

    pub fn mean3(a: &Vector, b: &Vector, c: &Vector) -> Vector {
        Vector::new(
            sum3(a.x, b.x, c.x) * THIRD,
            sum3(a.y, b.y, c.y) * THIRD,
            sum3(a.z, b.z, c.z) * THIRD,
        )
    }

    /// Sum of all vectors (skipping the closing duplicate of a ring), added
    /// per axis in ascending order of magnitude.
    pub fn sum_of(vectors: &[Vector], is_ring: bool) -> Vector {
        let n = if is_ring {
            vectors.len().saturating_sub(1)
        } else {
            vectors.len()
        };
        let items = &vectors[..n];
        let mut xs: Vec<f64> = items.iter().map(|v| v.x).collect();
        let mut ys: Vec<f64> = items.iter().map(|v| v.y).collect();
        let mut zs: Vec<f64> = items.iter().map(|v| v.z).collect();
        Vector::new(sorted_sum(&mut xs), sorted_sum(&mut ys), sorted_sum(&mut zs))
    }

    /// Arithmetic mean; rings ignore their closing duplicate
    pub fn mean_of(vectors: &[Vector], is_ring: bool) -> Vector {
        match vectors.len() {
            0 => Vector::ZERO,
            1 => vectors[0],
            2 if is_ring => vectors[0],
            2 => vectors[0].mid(&vectors[1]),
            3 if is_ring => vectors[0].mid(&vectors[1]),
            3 => Vector::mean3(&vectors[0], &vectors[1], &vectors[2]),
            n => {
                let count = if is_ring { n - 1 } else { n };
                Vector::sum_of(vectors, is_ring) * (1.0 / count as f64)
            }
        }
    }

    /// Common point of three planes; `None` when two of them are
    /// (nearly) parallel.
    pub fn from_planes<A, B, C>(a: &A, b: &B, c: &C) -> Option<Vector>
    where
        A: PlaneLike + ?Sized,
        B: PlaneLike + ?Sized,
        C: PlaneLike + ?Sized,
    {
        let (na, nb, nc) = (
            a.normal().to_vector(),
            b.normal().to_vector(),
            c.normal().to_vector(),
        );
        let ab = na.cross(&nb);
        let bc = nb.cross(&nc);
        let ca = nc.cross(&na);
        if ab.sum_sq() <= TRIGTOL_SQUARED
            || bc.sum_sq() <= TRIGTOL_SQUARED
            || ca.sum_sq() <= TRIGTOL_SQUARED
        {
            return None;
        }
        let det = ab.dot(&nc) + bc.dot(&na) + ca.dot(&nb);
        if det.abs() <= TRIGTOL_SQUARED {
            return None;
        }
        let v = bc * a.d() + ca * b.d() + ab * c.d();
        Some(v * (-3.0 / det))
    }

    /// `POINT Z(x y z)`
    pub fn to_wkt_string(&self) -> String {
        format!("POINT Z({})", self)
    }

    /// Wavefront OBJ vertex line `v x y z`
    pub fn to_obj_string(&self) -> String {
        format!("v {}", self)
    }

    /// Parse `"x y z"`.
    pub fn parse(input: &str) -> Result<Vector> {
        Ok(wkt::parse_coords::<3>(input)?.into())
    }

    /// Parse `POINT Z(x y z)`.
    pub fn parse_wkt(input: &str) -> Result<Vector> {
        Ok(wkt::parse_point::<3>(input)?.into())
    }
}

fn sorted_sum(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.abs().total_cmp(&b.abs()));
    values.iter().sum()
}

impl From<[f64; 3]> for Vector {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vector::new(x, y, z)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;
    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}
