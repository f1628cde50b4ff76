// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal unsigned 256-bit arithmetic.
//!
//! Only the handful of operations the exact kernel needs: full 128×128
//! products, addition, comparison and division by a 128-bit divisor.

use std::cmp::Ordering;

const LOW64: u128 = u64::MAX as u128;

/// Unsigned 256-bit integer stored as two 128-bit limbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct U256 {
    pub hi: u128,
    pub lo: u128,
}

impl U256 {
    pub const ZERO: U256 = U256 { hi: 0, lo: 0 };

    pub const fn from_u128(value: u128) -> Self {
        Self { hi: 0, lo: value }
    }

    /// Full product of two 128-bit values
    pub fn mul_u128(a: u128, b: u128) -> Self {
        let (a1, a0) = (a >> 64, a & LOW64);
        let (b1, b0) = (b >> 64, b & LOW64);

        let p00 = a0 * b0;
        let p01 = a0 * b1;
        let p10 = a1 * b0;
        let p11 = a1 * b1;

        let mid = (p00 >> 64) + (p01 & LOW64) + (p10 & LOW64);
        let lo = (p00 & LOW64) | (mid << 64);
        let hi = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
        Self { hi, lo }
    }

    /// Checked addition, `None` on overflow past 2^256
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let (lo, carry) = self.lo.overflowing_add(other.lo);
        let hi = self.hi.checked_add(other.hi)?.checked_add(carry as u128)?;
        Some(Self { hi, lo })
    }

    /// Value as `u128` if it fits
    pub fn to_u128(self) -> Option<u128> {
        (self.hi == 0).then_some(self.lo)
    }

    /// Long division by a 128-bit divisor below 2^127.
    ///
    /// Returns `(quotient, remainder)`, or `None` for a zero or too large divisor.
    pub fn div_rem_u128(self, divisor: u128) -> Option<(U256, u128)> {
        if divisor == 0 || divisor > i128::MAX as u128 {
            return None;
        }
        let mut quotient = U256::ZERO;
        let mut rem: u128 = 0;
        for bit in (0..256).rev() {
            let next = if bit >= 128 {
                (self.hi >> (bit - 128)) & 1
            } else {
                (self.lo >> bit) & 1
            };
            // rem < divisor < 2^127, so the shift cannot overflow
            rem = (rem << 1) | next;
            if rem >= divisor {
                rem -= divisor;
                if bit >= 128 {
                    quotient.hi |= 1 << (bit - 128);
                } else {
                    quotient.lo |= 1 << bit;
                }
            }
        }
        Some((quotient, rem))
    }
}

/// Exact sign of `Σ a_i · b_i` over signed 128-bit factors.
///
/// Positive and negative products are accumulated separately as 256-bit
/// magnitudes and compared at the end, so no term can overflow.
pub fn sign_of_sum_of_products(terms: &[(i128, i128)]) -> Ordering {
    let mut positive = U256::ZERO;
    let mut negative = U256::ZERO;
    for &(a, b) in terms {
        if a == 0 || b == 0 {
            continue;
        }
        let product = U256::mul_u128(a.unsigned_abs(), b.unsigned_abs());
        // at most a few terms of < 2^254 each, the sums stay below 2^256
        if (a < 0) == (b < 0) {
            positive = positive.checked_add(product).unwrap_or(U256 {
                hi: u128::MAX,
                lo: u128::MAX,
            });
        } else {
            negative = negative.checked_add(product).unwrap_or(U256 {
                hi: u128::MAX,
                lo: u128::MAX,
            });
        }
    }
    positive.cmp(&negative)
}
