// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{SpdMatrix2, SpdMatrix3};
use crate::{d2, d3};

/// Planar point estimate with covariance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticVector2 {
    pub vector: d2::Vector,
    pub cxx: SpdMatrix2,
}

/// Spatial point estimate with covariance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticVector3 {
    pub vector: d3::Vector,
    pub cxx: SpdMatrix3,
}

impl StochasticVector2 {
    pub fn new(vector: d2::Vector, cxx: SpdMatrix2) -> Self {
        Self { vector, cxx }
    }

    /// Drop the z component.
    pub fn from_3d(v: &StochasticVector3) -> Self {
        Self::new(
            d2::Vector::new(v.vector.x, v.vector.y),
            v.cxx.xy_block(),
        )
    }

    /// Fuse two independent estimates of the same point.
    ///
    /// Weights are the inverse covariances; the fused covariance is
    /// rescaled by the weighted squared residuals over 2.
    pub fn mean(&self, other: &StochasticVector2) -> StochasticVector2 {
        let tp = self.cxx.cholesky_inv();
        let op = other.cxx.cholesky_inv();
        let qxx = tp.add(&op).cholesky_inv();
        let vector = qxx.mul_vec(&(tp.mul_vec(&self.vector) + op.mul_vec(&other.vector)));
        let vpv = tp.row_mul_sym_mul_col(&(vector - self.vector))
            + op.row_mul_sym_mul_col(&(vector - other.vector));
        Self::new(vector, qxx.scale(vpv / 2.0))
    }
}

impl StochasticVector3 {
    pub fn new(vector: d3::Vector, cxx: SpdMatrix3) -> Self {
        Self { vector, cxx }
    }

    /// Fuse two independent estimates of the same point.
    ///
    /// As [`StochasticVector2::mean`] with the residual sum divided by 3.
    pub fn mean(&self, other: &StochasticVector3) -> StochasticVector3 {
        let tp = self.cxx.cholesky_inv();
        let op = other.cxx.cholesky_inv();
        let qxx = tp.add(&op).cholesky_inv();
        let vector = qxx.mul_vec(&(tp.mul_vec(&self.vector) + op.mul_vec(&other.vector)));
        let vpv = tp.row_mul_sym_mul_col(&(vector - self.vector))
            + op.row_mul_sym_mul_col(&(vector - other.vector));
        Self::new(vector, qxx.scale(vpv / 3.0))
    }
}
