// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::Rational128;
use crate::error::{Error, Result};
use crate::wide::U256;
use std::cmp::Ordering;
use std::fmt;

/// Reduced fraction `num / den` in `[0, 1]` over `i128`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction128 {
    num: i128,
    den: i128,
}

fn gcd(num: i128, den: i128) -> i128 {
    let (mut q, mut r) = (den, num);
    while r > 0 {
        (q, r) = (r, q % r);
    }
    if q > 0 {
        q
    } else {
        1
    }
}

/// Least common multiple of `a` and `b`, together with the factors that
/// bring `a`'s and `b`'s fractions onto it.
fn lcm(a: i128, b: i128) -> Option<(i128, i128, i128)> {
    let g = gcd(a, b);
    let a_mul = b / g;
    let b_mul = a / g;
    let lcm = a.checked_mul(a_mul)?;
    Some((lcm, a_mul, b_mul))
}

impl Fraction128 {
    pub const ZERO: Fraction128 = Fraction128 { num: 0, den: 1 };
    pub const ONE: Fraction128 = Fraction128 { num: 1, den: 1 };

    pub fn new(num: i128, den: i128) -> Result<Self> {
        if den <= 0 || num < 0 || num > den {
            return Err(Error::InvalidFraction(format!("{}/{}", num, den)));
        }
        Ok(Self::reduced(num, den))
    }

    fn reduced(num: i128, den: i128) -> Self {
        if num == 0 {
            Self::ZERO
        } else if num == den {
            Self::ONE
        } else {
            let g = gcd(num, den);
            Self {
                num: num / g,
                den: den / g,
            }
        }
    }

    #[inline]
    pub fn num(&self) -> i128 {
        self.num
    }

    #[inline]
    pub fn den(&self) -> i128 {
        self.den
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.num == self.den
    }

    pub fn reverse(&self) -> Self {
        Self::reduced(self.den - self.num, self.den)
    }

    /// Rounds to the nearest integer: `0` below one half, `1` from one half on
    pub fn rounded(&self) -> i32 {
        if (self.den - self.num) > self.num {
            0
        } else {
            1
        }
    }

    pub fn value(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Sum of two fractions, `None` on overflow.
    ///
    /// The sum may exceed one; it is returned as the pair `(carry, rest)`.
    pub fn add(&self, other: &Self) -> Option<(i128, Self)> {
        let (lcm, a_mul, b_mul) = lcm(self.den, other.den)?;
        let num = self
            .num
            .checked_mul(a_mul)?
            .checked_add(other.num.checked_mul(b_mul)?)?;
        if num > lcm {
            Some((1, Self::reduced(num - lcm, lcm)))
        } else {
            Some((0, Self::reduced(num, lcm)))
        }
    }

    /// Difference of two fractions, `None` on overflow or negative result
    pub fn sub(&self, other: &Self) -> Option<Self> {
        let (lcm, a_mul, b_mul) = lcm(self.den, other.den)?;
        let num = self
            .num
            .checked_mul(a_mul)?
            .checked_sub(other.num.checked_mul(b_mul)?)?;
        if num < 0 {
            return None;
        }
        Some(Self::reduced(num, lcm))
    }

    /// Exact product with an integer, split into integer and fractional part.
    ///
    /// The fractional part is always non-negative (floor semantics).
    pub fn mul(&self, other: i128) -> Option<Rational128> {
        let full = U256::mul_u128(other.unsigned_abs(), self.num as u128);
        let (quotient, rem) = full.div_rem_u128(self.den as u128)?;
        let mut integer = i128::try_from(quotient.to_u128()?).ok()?;
        let mut num = rem as i128;
        if other < 0 {
            integer = -integer;
            if num != 0 {
                num = self.den - num;
                integer = integer.checked_sub(1)?;
            }
        }
        Some(Rational128::new(integer, Self::reduced(num, self.den)))
    }

    /// Decimal expansion with exactly `decimals` digits, truncated
    pub fn decimal_string(&self, decimals: usize) -> String {
        if decimals == 0 {
            return (self.num / self.den).to_string();
        }
        let mut s = String::from(if self.is_one() { "1." } else { "0." });
        if self.is_zero() || self.is_one() {
            s.extend(std::iter::repeat('0').take(decimals));
            return s;
        }
        let den = self.den as u128;
        let mut n = self.num as u128;
        for _ in 0..decimals {
            // n < den < 2^127, ten times that needs the wide type
            let Some((digit, rem)) = U256::mul_u128(n, 10).div_rem_u128(den) else {
                break;
            };
            s.push(char::from(b'0' + digit.lo as u8));
            n = rem;
        }
        s
    }

    fn compare_expansion(mut an: i128, mut ad: i128, mut bn: i128, mut bd: i128) -> Ordering {
        let mut ord = Ordering::Less;
        loop {
            let qa = ad / an;
            let qb = bd / bn;
            if qa != qb {
                return if qa < qb { ord.reverse() } else { ord };
            }
            ord = ord.reverse();
            (ad, an) = (an, ad % an);
            (bd, bn) = (bn, bd % bn);
            if an == 0 || bn == 0 {
                break;
            }
        }
        if an == bn {
            Ordering::Equal
        } else if an == 0 {
            ord
        } else {
            ord.reverse()
        }
    }
}

impl Ord for Fraction128 {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.den == other.den {
            self.num.cmp(&other.num)
        } else if self.num == other.num {
            other.den.cmp(&self.den)
        } else if self.is_zero() {
            Ordering::Less
        } else if self.is_one() {
            Ordering::Greater
        } else if other.is_zero() {
            Ordering::Greater
        } else if other.is_one() {
            Ordering::Less
        } else {
            Self::compare_expansion(self.num, self.den, other.num, other.den)
        }
    }
}

impl PartialOrd for Fraction128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Fraction128 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Fraction128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.decimal_string(3), self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_reduce() {
        let f = Fraction128::new(10, 15).unwrap();
        assert_eq!((f.num(), f.den()), (2, 3));
        assert!(Fraction128::new(4, 3).is_err());
        assert!(Fraction128::new(1, 0).is_err());
        assert!(Fraction128::new(-1, 3).is_err());
    }

    #[test]
    fn test_add_sub() {
        let a = Fraction128::new(1, 3).unwrap();
        let b = Fraction128::new(1, 6).unwrap();
        let (carry, sum) = a.add(&b).unwrap();
        assert_eq!(carry, 0);
        assert_eq!(sum, Fraction128::new(1, 2).unwrap());
        assert_eq!(a.sub(&b).unwrap(), Fraction128::new(1, 6).unwrap());
        assert!(b.sub(&a).is_none());

        let (carry, rest) = Fraction128::new(3, 4)
            .unwrap()
            .add(&Fraction128::new(1, 2).unwrap())
            .unwrap();
        assert_eq!(carry, 1);
        assert_eq!(rest, Fraction128::new(1, 4).unwrap());
    }

    #[test]
    fn test_mul_positive_and_negative() {
        let third = Fraction128::new(1, 3).unwrap();
        let r = third.mul(7).unwrap();
        assert_eq!(r.int(), 2);
        assert_eq!(r.frac(), Fraction128::new(1, 3).unwrap());

        // -7/3 = -3 + 2/3
        let r = third.mul(-7).unwrap();
        assert_eq!(r.int(), -3);
        assert_eq!(r.frac(), Fraction128::new(2, 3).unwrap());
    }

    #[test]
    fn test_mul_wide() {
        let half = Fraction128::new(1, 2).unwrap();
        let r = half.mul(i128::MAX).unwrap();
        assert_eq!(r.int(), i128::MAX / 2);
        assert_eq!(r.frac(), half);
    }

    #[test]
    fn test_rounded() {
        assert_eq!(Fraction128::new(1, 3).unwrap().rounded(), 0);
        assert_eq!(Fraction128::new(1, 2).unwrap().rounded(), 1);
        assert_eq!(Fraction128::new(2, 3).unwrap().rounded(), 1);
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Fraction128::new(1, 8).unwrap().decimal_string(4), "0.1250");
        assert_eq!(Fraction128::new(2, 3).unwrap().decimal_string(3), "0.666");
        assert_eq!(Fraction128::ONE.decimal_string(2), "1.00");
    }

    #[test]
    fn test_ordering() {
        let a = Fraction128::new(3, 8).unwrap();
        let b = Fraction128::new(2, 5).unwrap();
        assert!(a < b);
        assert!(Fraction128::ZERO < a);
        assert!(Fraction128::ONE > b);
    }
}
