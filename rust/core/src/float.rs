// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Robust floating point helpers
//!
//! Multi-argument `hypot`, `sum` and `normalize` routines sort their operands
//! by magnitude and factor out the largest one before combining. This keeps
//! intermediate results in range when components differ by many orders of
//! magnitude, and makes the results independent of argument order.
//!
//! Edge cases (shared by all routines):
//! - all components zero ⇒ `NaN` for normalization, `0` for `hypot`
//! - largest component `+∞` ⇒ unit axis / `+∞`
//! - `NaN` anywhere propagates

use crate::consts::{RSQRT3, TRIGTOL};

#[inline]
fn swap_if_greater(idx: &mut [usize], vals: &mut [f64], i: usize, j: usize) {
    if vals[i] > vals[j] {
        vals.swap(i, j);
        idx.swap(i, j);
    }
}

/// Sorting network over 3 values (ascending), carrying the original indices
fn sort3(idx: &mut [usize; 3], vals: &mut [f64; 3]) {
    swap_if_greater(idx, vals, 0, 1);
    swap_if_greater(idx, vals, 1, 2);
    swap_if_greater(idx, vals, 0, 1);
}

/// Sorting network over 4 values (ascending), carrying the original indices
fn sort4(idx: &mut [usize; 4], vals: &mut [f64; 4]) {
    swap_if_greater(idx, vals, 0, 2);
    swap_if_greater(idx, vals, 1, 3);
    swap_if_greater(idx, vals, 0, 1);
    swap_if_greater(idx, vals, 2, 3);
    swap_if_greater(idx, vals, 1, 2);
}

/// Sort three values ascending by absolute value
fn sort_by_abs3(values: [f64; 3]) -> [f64; 3] {
    let mut idx = [0usize, 1, 2];
    let mut vals = values.map(f64::abs);
    sort3(&mut idx, &mut vals);
    idx.map(|i| values[i])
}

/// Sort four values ascending by absolute value
fn sort_by_abs4(values: [f64; 4]) -> [f64; 4] {
    let mut idx = [0usize, 1, 2, 3];
    let mut vals = values.map(f64::abs);
    sort4(&mut idx, &mut vals);
    idx.map(|i| values[i])
}

/// `sqrt(a² + b²)` without premature overflow or underflow
pub fn hypot2(a: f64, b: f64) -> f64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }
    hypot2_sorted(a, b)
}

fn hypot2_sorted(a: f64, b: f64) -> f64 {
    if a == 0.0 {
        b
    } else if b == f64::INFINITY && !a.is_nan() {
        f64::INFINITY
    } else {
        let a = a / b;
        b * (a * a + 1.0).sqrt()
    }
}

/// `sqrt(a² + b² + c²)` without premature overflow or underflow
pub fn hypot3(a: f64, b: f64, c: f64) -> f64 {
    let [a, b, c] = sort_by_abs3([a, b, c]).map(f64::abs);
    hypot3_sorted(a, b, c)
}

fn hypot3_sorted(a: f64, b: f64, c: f64) -> f64 {
    if a == 0.0 {
        if b == 0.0 {
            c
        } else {
            hypot2_sorted(b, c)
        }
    } else if c == f64::INFINITY && !a.is_nan() && !b.is_nan() {
        f64::INFINITY
    } else {
        let a = a / c;
        let b = b / c;
        c * ((a * a + b * b) + 1.0).sqrt()
    }
}

/// `sqrt(a² + b² + c² + d²)` without premature overflow or underflow
pub fn hypot4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    let [a, b, c, d] = sort_by_abs4([a, b, c, d]).map(f64::abs);
    if a == 0.0 {
        if b == 0.0 {
            hypot2_sorted(c, d)
        } else {
            hypot3_sorted(b, c, d)
        }
    } else if d == f64::INFINITY && !a.is_nan() && !b.is_nan() && !c.is_nan() {
        f64::INFINITY
    } else {
        let a = a / d;
        let b = b / d;
        let c = c / d;
        d * (((a * a + b * b) + c * c) + 1.0).sqrt()
    }
}

/// Sum of three values, smallest magnitude first
pub fn sum3(a: f64, b: f64, c: f64) -> f64 {
    let [a, b, c] = sort_by_abs3([a, b, c]);
    a + b + c
}

/// Sum of four values, smallest magnitude first
pub fn sum4(a: f64, b: f64, c: f64, d: f64) -> f64 {
    let [a, b, c, d] = sort_by_abs4([a, b, c, d]);
    a + b + c + d
}

/// Scales the sorted magnitudes in `vals` to unit length.
///
/// Returns the length factor applied to the largest magnitude.
fn normalize_sorted<const N: usize>(vals: &mut [f64; N]) -> f64 {
    let last = N - 1;
    let largest = vals[last];
    if vals[last - 1] == 0.0 {
        if largest == 0.0 || largest.is_nan() {
            vals.iter_mut().for_each(|v| *v = f64::NAN);
        } else {
            vals[last] = 1.0;
        }
        1.0
    } else if largest == f64::INFINITY {
        vals.iter_mut().for_each(|v| *v = 0.0);
        vals[last] = 1.0;
        1.0
    } else {
        let mut sum = 0.0;
        for v in vals[..last].iter_mut() {
            *v /= largest;
            sum += *v * *v;
        }
        let sq = (sum + 1.0).sqrt();
        let inv = 1.0 / sq;
        vals[last] = inv;
        for v in vals[..last].iter_mut() {
            *v *= inv;
        }
        sq
    }
}

fn restore_signs<const N: usize>(idx: [usize; N], vals: [f64; N], original: [f64; N]) -> [f64; N] {
    let mut out = [0.0; N];
    for k in 0..N {
        out[idx[k]] = vals[k];
    }
    for k in 0..N {
        if original[k] < 0.0 {
            out[k] = -out[k];
        }
    }
    out
}

/// Normalizes `(a, b)` to unit length, returning the components and the
/// original length.
///
/// Both components zero (or the larger one `NaN`) gives `NaN` components.
/// A single non-zero or infinite component snaps to its unit axis.
pub fn normalize2(a: f64, b: f64) -> ([f64; 2], f64) {
    let mut idx = [0usize, 1];
    let mut vals = [a.abs(), b.abs()];
    swap_if_greater(&mut idx, &mut vals, 0, 1);
    let largest = vals[1];
    let length = largest * normalize_sorted(&mut vals);
    (restore_signs(idx, vals, [a, b]), length)
}

/// Normalizes `(a, b, c)` to unit length, returning the components and the
/// original length.
///
/// Three (nearly) equal components are mapped onto a slightly skewed
/// diagonal so that a perpendicular direction stays well defined.
pub fn normalize3(a: f64, b: f64, c: f64) -> ([f64; 3], f64) {
    let s = a + b + c;
    if s != 0.0
        && (a * 3.0 / s - 1.0).abs() < TRIGTOL
        && (b * 3.0 / s - 1.0).abs() < TRIGTOL
        && (c * 3.0 / s - 1.0).abs() < TRIGTOL
    {
        let length = hypot3(a, b, c);
        // the diagonal keeps the sign of the input; an all-negative vector
        // must not normalize onto the positive octant
        let sign = s.signum();
        return (
            [sign * (RSQRT3 - TRIGTOL), sign * RSQRT3, sign * (RSQRT3 + TRIGTOL)],
            length,
        );
    }

    let mut idx = [0usize, 1, 2];
    let mut vals = [a.abs(), b.abs(), c.abs()];
    sort3(&mut idx, &mut vals);
    let largest = vals[2];
    let length = largest * normalize_sorted(&mut vals);
    (restore_signs(idx, vals, [a, b, c]), length)
}

/// Normalizes four components (quaternions) to unit length.
pub fn normalize4(a: f64, b: f64, c: f64, d: f64) -> [f64; 4] {
    let mut idx = [0usize, 1, 2, 3];
    let mut vals = [a.abs(), b.abs(), c.abs(), d.abs()];
    sort4(&mut idx, &mut vals);
    normalize_sorted(&mut vals);
    restore_signs(idx, vals, [a, b, c, d])
}

#[inline]
pub fn det2(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] * b[1]) - (b[0] * a[1])
}

#[inline]
pub fn dot2(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] * b[0]) + (a[1] * b[1])
}

/// Dot product with magnitude-sorted summation
#[inline]
pub fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    sum3(a[0] * b[0], a[1] * b[1], a[2] * b[2])
}

#[inline]
pub fn cross3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        det2([a[1], a[2]], [b[1], b[2]]),
        det2([a[2], a[0]], [b[2], b[0]]),
        det2([a[0], a[1]], [b[0], b[1]]),
    ]
}

#[inline]
pub fn det3(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    dot3(a, cross3(b, c))
}
