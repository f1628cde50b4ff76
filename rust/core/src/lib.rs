// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BIMSCAN Core
//!
//! Numerical foundation of the BIMSCAN planar geometry kernel.
//!
//! ## Overview
//!
//! - **Exact predicates**: orientation, in-circle and segment intersection on
//!   integer grid points, exact over the full `i32` domain ([`int2d`])
//! - **Exact numbers**: reduced fractions reporting intersection parameters
//!   without rounding ([`Fraction`], [`Fraction128`], [`Rational128`])
//! - **Robust float helpers**: magnitude-sorted `hypot`, `sum` and
//!   normalization routines shared by the floating geometry types ([`float`])
//! - **Tolerances**: the numeric constants used throughout ([`consts`])
//!
//! ## Quick Start
//!
//! ```rust
//! use bimscan_core::int2d::{in_circle, orientation, segment_intersect, Vector};
//! use std::cmp::Ordering;
//!
//! let a = Vector::new(0, 0);
//! let b = Vector::new(4, 0);
//! let c = Vector::new(0, 4);
//! assert_eq!(orientation(&a, &b, &c), Ordering::Greater);
//! assert!(in_circle(&a, &b, &c, &Vector::new(1, 1)));
//!
//! let (t, s) = segment_intersect(&a, &Vector::new(4, 4), &b, &c).unwrap();
//! assert_eq!((t.num(), t.den()), (1, 2));
//! assert_eq!((s.num(), s.den()), (1, 2));
//! ```

pub mod consts;
pub mod error;
pub mod float;
pub mod int2d;
pub mod numbers;
pub mod wide;

pub use error::{Error, Result};
pub use numbers::{Fraction, Fraction128, Rational128};
