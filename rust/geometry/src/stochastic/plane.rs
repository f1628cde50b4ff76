// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use nalgebra::Matrix3x6;

use super::{SpdMatrix6, StochasticVector3};
use crate::d2;
use crate::d3::{self, Axis, Direction, Plane, PlaneLike, RotMatrix, Vector};

/// Plane estimated from observations, with a 6×6 covariance
///
/// The covariance parameters are three rotation angles followed by the
/// three position components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticPlane {
    rotation: RotMatrix,
    position: Vector,
    d: f64,
    cxx: SpdMatrix6,
}

impl StochasticPlane {
    pub fn new(position: Vector, normal: Direction, plane_x: Option<Direction>, cxx: SpdMatrix6) -> Self {
        let hint = plane_x.map(|d| d.to_vector());
        let rotation = RotMatrix::new(normal, Axis::Z, hint.as_ref());
        Self {
            rotation,
            position,
            d: -rotation.axis_z().dot_vector(&position),
            cxx,
        }
    }

    pub fn rotation(&self) -> &RotMatrix {
        &self.rotation
    }

    pub fn cxx(&self) -> &SpdMatrix6 {
        &self.cxx
    }

    /// Lift in-plane coordinates into space, propagating the plane
    /// covariance to first order.
    pub fn from_system_with_cxx(&self, v: &d2::Vector) -> StochasticVector3 {
        let (vx, vy) = (v.x, v.y);
        let plane_x = self.plane_x();
        let (xx, xy, xz) = (plane_x.x(), plane_x.y(), plane_x.z());
        let n = self.normal().scale(vx);
        let (nx, ny, nz) = (n.x, n.y, n.z);

        let (nxxx, nxxy, nxxz) = (nx * xx, nx * xy, nx * xz);
        let (nyxx, nyxy, nyxz) = (ny * xx, ny * xy, ny * xz);
        let (nzxx, nzxy, nzxz) = (nz * xx, nz * xy, nz * xz);
        let (vyxx, vyxy, vyxz) = (vy * xx, vy * xy, vy * xz);

        #[rustfmt::skip]
        let f = Matrix3x6::from_row_slice(&[
            -nzxz - nyxy,             vyxz + 2.0 * nyxx - nxxy, 2.0 * nzxx - nxxz - vyxy, 1.0, 0.0, 0.0,
            2.0 * nxxy - nyxx - vyxz, -nzxz - nxxx,             2.0 * nzxy - nyxz + vyxx, 0.0, 1.0, 0.0,
            2.0 * nxxz - nzxx + vyxy, 2.0 * nyxz - nzxy - vyxx, -nyxy - nxxx,             0.0, 0.0, 1.0,
        ]);

        StochasticVector3::new(self.from_plane_system(v), self.cxx.mat_mul_sym_mul_mat_trans(&f))
    }

    /// Project a point into the plane and lift it back with covariance.
    pub fn add_cxx(&self, v: &Vector) -> StochasticVector3 {
        self.from_system_with_cxx(&self.to_plane_system(v).0)
    }

    /// Intersection with the ray `origin + t·dir`; `None` when parallel.
    pub fn intersect_ray(&self, origin: &Vector, dir: &Direction) -> Option<(Vector, f64)> {
        d3::intersect_ray(self, origin, dir)
    }
}

impl PlaneLike for StochasticPlane {
    fn position(&self) -> Vector {
        self.position
    }

    fn normal(&self) -> Direction {
        self.rotation.axis_z()
    }

    fn plane_x(&self) -> Direction {
        self.rotation.axis_x()
    }

    fn plane_y(&self) -> Direction {
        self.rotation.axis_y()
    }

    fn d(&self) -> f64 {
        self.d
    }

    fn to_plane_system(&self, v: &Vector) -> (d2::Vector, f64) {
        let p = *v - self.position;
        (
            d2::Vector::new(self.plane_x().dot_vector(&p), self.plane_y().dot_vector(&p)),
            self.normal().dot_vector(&p),
        )
    }

    fn from_plane_system(&self, v: &d2::Vector) -> Vector {
        self.plane_x().scale(v.x) + self.plane_y().scale(v.y) + self.position
    }

    fn get_plane(&self) -> Plane {
        Plane::new(self.position, self.normal(), Some(self.plane_x()))
    }
}
