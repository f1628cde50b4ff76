// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::Fraction128;
use std::fmt;

/// Mixed number `int + frac` with a non-negative fractional part below one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational128 {
    int: i128,
    frac: Fraction128,
}

impl Rational128 {
    pub const ZERO: Rational128 = Rational128 {
        int: 0,
        frac: Fraction128::ZERO,
    };

    /// A fractional part of exactly one is carried into the integer part.
    pub fn new(int: i128, frac: Fraction128) -> Self {
        if frac.is_one() {
            if let Some(int) = int.checked_add(1) {
                return Self {
                    int,
                    frac: Fraction128::ZERO,
                };
            }
        }
        Self { int, frac }
    }

    pub fn from_int(int: i128) -> Self {
        Self {
            int,
            frac: Fraction128::ZERO,
        }
    }

    #[inline]
    pub fn int(&self) -> i128 {
        self.int
    }

    #[inline]
    pub fn frac(&self) -> Fraction128 {
        self.frac
    }

    pub fn value(&self) -> f64 {
        self.int as f64 + self.frac.value()
    }

    /// Checked addition of an integer
    pub fn add_int(&self, other: i128) -> Option<Self> {
        Some(Self::new(self.int.checked_add(other)?, self.frac))
    }

    /// Checked addition, carrying fractional overflow into the integer part
    pub fn add(&self, other: &Self) -> Option<Self> {
        let (carry, frac) = self.frac.add(&other.frac)?;
        let int = self.int.checked_add(other.int)?.checked_add(carry)?;
        Some(Self::new(int, frac))
    }
}

impl fmt::Display for Rational128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}/{}", self.int, self.frac.num(), self.frac.den())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_is_carried() {
        let r = Rational128::new(-2, Fraction128::ONE);
        assert_eq!(r.int(), -1);
        assert!(r.frac().is_zero());
    }

    #[test]
    fn test_add_with_carry() {
        let a = Rational128::new(1, Fraction128::new(2, 3).unwrap());
        let b = Rational128::new(-4, Fraction128::new(2, 3).unwrap());
        let s = a.add(&b).unwrap();
        assert_eq!(s.int(), -2);
        assert_eq!(s.frac(), Fraction128::new(1, 3).unwrap());
        assert!((s.value() - (-5.0 / 3.0)).abs() < 1e-15);
    }

    #[test]
    fn test_add_overflow() {
        let a = Rational128::from_int(i128::MAX);
        assert!(a.add_int(1).is_none());
        assert!(a.add(&Rational128::from_int(1)).is_none());
    }
}
