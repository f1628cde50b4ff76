// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exact orientation, in-circle and segment intersection predicates.
//!
//! All intermediate values are widened far enough that the result is exact
//! over the complete `i32` coordinate domain:
//!
//! | quantity              | bits | type     |
//! |-----------------------|------|----------|
//! | coordinate difference | 33   | `i64`    |
//! | 2×2 determinant       | 67   | `i128`   |
//! | in-circle term        | 135  | 256 bit  |
//!
//! Intersection parameters are reported as reduced [`Fraction`]s. Their parts
//! fit 64 bits whenever coordinates stay within [`MAX_COORD`]; beyond that a
//! parameter that does not reduce into 64 bits is reported as no intersection.

use super::vector::{cross, det, diff, dot, Vector};
use crate::numbers::Fraction;
use crate::wide::sign_of_sum_of_products;
use std::cmp::Ordering;

/// Largest coordinate magnitude for which intersection fractions always fit
pub const MAX_COORD: i32 = 1 << 30;

/// Sign of the signed area of triangle `abc`.
///
/// `Greater` for counter-clockwise, `Less` for clockwise, `Equal` when collinear.
pub fn orientation(a: &Vector, b: &Vector, c: &Vector) -> Ordering {
    det(a, b, c).cmp(&0)
}

pub fn collinear(a: &Vector, b: &Vector, c: &Vector) -> bool {
    det(a, b, c) == 0
}

/// `true` iff `p` lies strictly inside the circle through the
/// counter-clockwise triangle `abc`.
pub fn in_circle(a: &Vector, b: &Vector, c: &Vector, p: &Vector) -> bool {
    let (adx, ady) = diff(p, a);
    let (bdx, bdy) = diff(p, b);
    let (cdx, cdy) = diff(p, c);

    let abdet = cross((adx, ady), (bdx, bdy));
    let bcdet = cross((bdx, bdy), (cdx, cdy));
    let cadet = cross((cdx, cdy), (adx, ady));

    let alift = dot((adx, ady), (adx, ady));
    let blift = dot((bdx, bdy), (bdx, bdy));
    let clift = dot((cdx, cdy), (cdx, cdy));

    sign_of_sum_of_products(&[(alift, bcdet), (blift, cadet), (clift, abdet)]) == Ordering::Greater
}

/// Raw intersection parameters with a positive denominator
fn intersect_parts(a1: &Vector, b1: &Vector, a2: &Vector, b2: &Vector) -> Option<(u128, u128, u128)> {
    let ac = diff(a1, a2);
    let ab = diff(a1, b1);
    let cd = diff(a2, b2);
    let mut num1 = cross(cd, ac);
    let mut num2 = cross(ab, ac);
    let mut den = cross(cd, ab);
    if den < 0 {
        num1 = -num1;
        num2 = -num2;
        den = -den;
    }
    if num1 < 0 || num2 < 0 || den == 0 || num1 > den || num2 > den {
        return None;
    }
    Some((num1 as u128, num2 as u128, den as u128))
}

/// Intersection of segments `a1`–`b1` and `a2`–`b2`.
///
/// Returns the exact parameter of the intersection point on the first and on
/// the second segment. Parallel segments and intersections outside either
/// segment give `None`.
pub fn segment_intersect(
    a1: &Vector,
    b1: &Vector,
    a2: &Vector,
    b2: &Vector,
) -> Option<(Fraction, Fraction)> {
    let (num1, num2, den) = intersect_parts(a1, b1, a2, b2)?;
    Some((Fraction::from_u128(num1, den)?, Fraction::from_u128(num2, den)?))
}

/// Parameter of the intersection point on the first segment only.
///
/// Unlike [`segment_intersect`] the intersection may lie beyond the second
/// segment's end points.
pub fn segment_intersect_first(a1: &Vector, b1: &Vector, a2: &Vector, b2: &Vector) -> Option<Fraction> {
    let aa = diff(a1, a2);
    let ab1 = diff(a1, b1);
    let ab2 = diff(a2, b2);
    let mut num = cross(ab2, aa);
    let mut den = cross(ab2, ab1);
    if den < 0 {
        num = -num;
        den = -den;
    }
    if num < 0 || den == 0 || num > den {
        return None;
    }
    Fraction::from_u128(num as u128, den as u128)
}

/// Parameter of the orthogonal projection of `point` onto segment `a`–`b`,
/// `None` if the projection falls outside the segment.
pub fn position_of(a: &Vector, b: &Vector, point: &Vector) -> Option<Fraction> {
    let ap = diff(a, point);
    let ab = diff(a, b);
    let num = dot(ab, ap);
    let den = dot(ab, ab);
    if num < 0 || den == 0 || num > den {
        return None;
    }
    Fraction::from_u128(num as u128, den as u128)
}
