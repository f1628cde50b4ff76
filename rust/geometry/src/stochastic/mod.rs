// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Covariance carrying geometry: SPD matrices, Cholesky inversion and
//! information weighted fusion of independent estimates.

mod plane;
mod spd2;
mod spd3;
mod spd6;
mod vector;

pub use plane::StochasticPlane;
pub use spd2::{SpdMatrix2, TriMatrix2};
pub use spd3::{SpdMatrix3, TriMatrix3};
pub use spd6::SpdMatrix6;
pub use vector::{StochasticVector2, StochasticVector3};
