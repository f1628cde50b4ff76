// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integer 2-D kernel: points on a quantized grid and exact predicates.
//!
//! Quantization of floating input onto the grid is left to the caller.

mod hull;
mod point;
mod predicates;
mod vector;

pub use hull::convex_hull;
pub use point::{FractionVector, IntegerPoint};
pub use predicates::{
    collinear, in_circle, orientation, position_of, segment_intersect, segment_intersect_first,
    MAX_COORD,
};
pub use vector::{det, Vector};
