// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exact fractions in `[0, 1]` with 64-bit numerator and denominator.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// Reduced fraction `num / den` with `0 <= num <= den`, `den > 0`
///
/// Zero is always `0/1` and one is always `1/1`, so structural equality is
/// value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: u64,
    den: u64,
}

fn gcd_u64(num: u64, den: u64) -> u64 {
    let (mut q, mut r) = (den, num);
    while r > 0 {
        (q, r) = (r, q % r);
    }
    q.max(1)
}

fn gcd_u128(num: u128, den: u128) -> u128 {
    let (mut q, mut r) = (den, num);
    while r > 0 {
        (q, r) = (r, q % r);
    }
    q.max(1)
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { num: 0, den: 1 };
    pub const ONE: Fraction = Fraction { num: 1, den: 1 };

    /// Create a reduced fraction.
    ///
    /// Fails for a zero denominator or a numerator larger than the denominator.
    pub fn new(num: u64, den: u64) -> Result<Self> {
        if den == 0 || num > den {
            return Err(Error::InvalidFraction(format!("{}/{}", num, den)));
        }
        Ok(Self::reduced(num, den))
    }

    fn reduced(num: u64, den: u64) -> Self {
        if num == 0 {
            Self::ZERO
        } else if num == den {
            Self::ONE
        } else {
            let g = gcd_u64(num, den);
            Self {
                num: num / g,
                den: den / g,
            }
        }
    }

    /// Create a fraction from wide parts, reducing before narrowing to 64 bits.
    ///
    /// Returns `None` for an invalid fraction or when the reduced parts do not
    /// fit into 64 bits.
    pub fn from_u128(num: u128, den: u128) -> Option<Self> {
        if den == 0 || num > den {
            return None;
        }
        let g = gcd_u128(num, den);
        let num = u64::try_from(num / g).ok()?;
        let den = u64::try_from(den / g).ok()?;
        Some(Self::reduced(num, den))
    }

    #[inline]
    pub fn num(&self) -> u64 {
        self.num
    }

    #[inline]
    pub fn den(&self) -> u64 {
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

    /// `1 - self`
    pub fn reverse(&self) -> Self {
        Self::reduced(self.den - self.num, self.den)
    }

    /// Nearest `f64` value
    pub fn value(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Compare `an/ad` against `bn/bd` through their continued fraction
    /// expansions; never multiplies so it cannot overflow.
    fn compare_expansion(mut an: u64, mut ad: u64, mut bn: u64, mut bd: u64) -> Ordering {
        // expansions of the reciprocals, so every step flips the direction
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

impl Ord for Fraction {
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

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} ({}/{})", self.value(), self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reduction() {
        let f = Fraction::new(6, 8).unwrap();
        assert_eq!((f.num(), f.den()), (3, 4));
        assert_eq!(Fraction::new(0, 9).unwrap(), Fraction::ZERO);
        assert_eq!(Fraction::new(9, 9).unwrap(), Fraction::ONE);
    }

    #[test]
    fn test_invalid() {
        assert!(Fraction::new(1, 0).is_err());
        assert!(Fraction::new(5, 4).is_err());
        assert!(Fraction::from_u128(5, 4).is_none());
    }

    #[test]
    fn test_from_wide_reduces_first() {
        let big = 1u128 << 70;
        let f = Fraction::from_u128(big, big * 2).unwrap();
        assert_eq!((f.num(), f.den()), (1, 2));
        assert!(Fraction::from_u128(1, (1u128 << 70) + 1).is_none());
    }

    #[test]
    fn test_reverse() {
        let f = Fraction::new(1, 4).unwrap().reverse();
        assert_eq!((f.num(), f.den()), (3, 4));
        assert_eq!(Fraction::ZERO.reverse(), Fraction::ONE);
    }

    #[test]
    fn test_ordering_examples() {
        let half = Fraction::new(1, 2).unwrap();
        let two_fifths = Fraction::new(2, 5).unwrap();
        let third = Fraction::new(1, 3).unwrap();
        let two_sevenths = Fraction::new(2, 7).unwrap();
        let three_eighths = Fraction::new(3, 8).unwrap();
        assert!(half > two_fifths);
        assert!(third > two_sevenths);
        assert!(two_sevenths < third);
        assert!(three_eighths < two_fifths);
        assert!(Fraction::ZERO < third);
        assert!(Fraction::ONE > half);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fraction::new(1, 4).unwrap().to_string(), "0.250 (1/4)");
    }

    proptest! {
        #[test]
        fn prop_ordering_matches_cross_multiplication(
            (an, ad) in (1u64..u64::MAX).prop_flat_map(|d| (0..=d, Just(d))),
            (bn, bd) in (1u64..u64::MAX).prop_flat_map(|d| (0..=d, Just(d))),
        ) {
            let a = Fraction::new(an, ad).unwrap();
            let b = Fraction::new(bn, bd).unwrap();
            let expected = (an as u128 * bd as u128).cmp(&(bn as u128 * ad as u128));
            prop_assert_eq!(a.cmp(&b), expected);
        }
    }
}
