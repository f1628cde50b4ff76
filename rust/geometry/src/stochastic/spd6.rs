// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use nalgebra::{Matrix3x6, Matrix6};
use std::fmt;

use super::{SpdMatrix2, SpdMatrix3};
use crate::error::{Error, Result};

/// Symmetric positive definite 6×6 matrix
///
/// Stores the 21 upper triangle coefficients row by row:
/// `s00 s01 .. s05 s11 .. s15 s22 .. s55`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpdMatrix6 {
    coeffs: [f64; SpdMatrix6::LEN],
}

/// Position of `(row, col)` in the packed upper triangle, `row <= col`
const fn packed(row: usize, col: usize) -> usize {
    row * (11 - row) / 2 + col
}

impl Default for SpdMatrix6 {
    fn default() -> Self {
        SpdMatrix6::ZERO
    }
}

impl SpdMatrix6 {
    pub const LEN: usize = 21;

    pub const ZERO: SpdMatrix6 = SpdMatrix6 {
        coeffs: [0.0; SpdMatrix6::LEN],
    };

    pub const UNIT: SpdMatrix6 = {
        let mut coeffs = [0.0; SpdMatrix6::LEN];
        let mut i = 0;
        while i < 6 {
            coeffs[packed(i, i)] = 1.0;
            i += 1;
        }
        SpdMatrix6 { coeffs }
    };

    pub const fn from_array(coeffs: [f64; SpdMatrix6::LEN]) -> Self {
        Self { coeffs }
    }

    pub fn to_array(&self) -> [f64; SpdMatrix6::LEN] {
        self.coeffs
    }

    /// Coefficient at `(row, col)`, either triangle
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row <= col {
            self.coeffs[packed(row, col)]
        } else {
            self.coeffs[packed(col, row)]
        }
    }

    pub fn from_matrix6(m: &Matrix6<f64>) -> Self {
        let mut coeffs = [0.0; Self::LEN];
        for row in 0..6 {
            for col in row..6 {
                coeffs[packed(row, col)] = m[(row, col)];
            }
        }
        Self { coeffs }
    }

    pub fn to_matrix6(&self) -> Matrix6<f64> {
        Matrix6::from_fn(|row, col| self.get(row, col))
    }

    /// 3×3 diagonal block starting at `first` (0..=3)
    pub fn get_3x3_sym(&self, first: usize) -> Option<SpdMatrix3> {
        if first > 3 {
            return None;
        }
        let g = |r: usize, c: usize| self.get(first + r, first + c);
        Some(SpdMatrix3::new(g(0, 0), g(0, 1), g(0, 2), g(1, 1), g(1, 2), g(2, 2)))
    }

    /// 2×2 diagonal block starting at `first` (0..=4)
    pub fn get_2x2_sym(&self, first: usize) -> Option<SpdMatrix2> {
        if first > 4 {
            return None;
        }
        Some(SpdMatrix2::new(
            self.get(first, first),
            self.get(first, first + 1),
            self.get(first + 1, first + 1),
        ))
    }

    /// `F·M·Fᵀ` for a 3×6 Jacobian `F`
    pub fn mat_mul_sym_mul_mat_trans(&self, f: &Matrix3x6<f64>) -> SpdMatrix3 {
        SpdMatrix3::from_matrix3(&(f * self.to_matrix6() * f.transpose()))
    }

    /// Coefficients separated by single spaces
    pub fn to_array_string(&self) -> String {
        self.to_string()
    }

    /// Parse 21 whitespace separated numbers.
    pub fn parse_array(input: &str) -> Result<SpdMatrix6> {
        let mut coeffs = [0.0; Self::LEN];
        let mut count = 0;
        for token in input.split_whitespace() {
            if count == Self::LEN {
                count += 1;
                break;
            }
            coeffs[count] = fast_float::parse(token)
                .map_err(|_| Error::InvalidNumber(token.to_string()))?;
            count += 1;
        }
        if count != Self::LEN {
            return Err(Error::InvalidGeometry(format!(
                "covariance needs {} values: {}",
                Self::LEN,
                input
            )));
        }
        Ok(Self { coeffs })
    }
}

impl fmt::Display for SpdMatrix6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.coeffs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting() -> SpdMatrix6 {
        let mut coeffs = [0.0; SpdMatrix6::LEN];
        for (i, c) in coeffs.iter_mut().enumerate() {
            *c = i as f64;
        }
        SpdMatrix6::from_array(coeffs)
    }

    #[test]
    fn test_packed_layout() {
        let m = counting();
        assert_eq!(m.get(0, 5), 5.0);
        assert_eq!(m.get(1, 1), 6.0);
        assert_eq!(m.get(2, 2), 11.0);
        assert_eq!(m.get(3, 3), 15.0);
        assert_eq!(m.get(5, 5), 20.0);
        assert_eq!(m.get(4, 2), m.get(2, 4));
        assert_eq!(SpdMatrix6::from_matrix6(&m.to_matrix6()), m);
        assert_eq!(SpdMatrix6::UNIT.to_matrix6(), Matrix6::identity());
    }

    #[test]
    fn test_blocks() {
        let m = counting();
        assert_eq!(
            m.get_3x3_sym(1),
            Some(SpdMatrix3::new(6.0, 7.0, 8.0, 11.0, 12.0, 15.0))
        );
        assert_eq!(m.get_2x2_sym(4), Some(SpdMatrix2::new(18.0, 19.0, 20.0)));
        assert!(m.get_3x3_sym(4).is_none());
        assert!(m.get_2x2_sym(5).is_none());
    }

    #[test]
    fn test_array_string_round_trip() {
        let mut coeffs = SpdMatrix6::UNIT.to_array();
        coeffs[1] = 0.1;
        coeffs[20] = 1e-7;
        let m = SpdMatrix6::from_array(coeffs);
        let s = m.to_array_string();
        assert_eq!(s.split(' ').count(), SpdMatrix6::LEN);
        assert_eq!(SpdMatrix6::parse_array(&s).unwrap(), m);
        assert!(SpdMatrix6::parse_array("1 2 3").is_err());
        assert!(SpdMatrix6::parse_array(&format!("{} 1", s)).is_err());
        assert!(SpdMatrix6::parse_array(&s.replace("0.1", "x")).is_err());
    }
}
