// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric tolerances and frequently used constants.

/// Machine epsilon of `f64` (2^-52)
pub const EPS: f64 = 1.0 / (1u64 << 52) as f64;

pub const SMALL: f64 = 1.0e-14;

pub const THIRD: f64 = 1.0 / 3.0;

pub const SQRT2: f64 = std::f64::consts::SQRT_2;

pub const SQRT3: f64 = 1.732_050_807_568_877_2;

/// Smallest meaningful trigonometric / determinant value
pub const TRIGTOL: f64 = 1.0e-11;

pub const TRIGTOL_SQUARED: f64 = TRIGTOL * TRIGTOL;

/// Smallest intersection angle accepted between two planes
pub const PLANETOL: f64 = 1.0e-3;

/// Default distance tolerance in metres
pub const DISTTOL: f64 = 1.0e-4;

pub const DISTTOL_SQUARED: f64 = DISTTOL * DISTTOL;

pub const HALFPI: f64 = std::f64::consts::FRAC_PI_2;

pub const TWOPI: f64 = std::f64::consts::TAU;

pub const RSQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

pub const RSQRT3: f64 = 0.577_350_269_189_625_8;
