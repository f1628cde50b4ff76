// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Axis, Direction, Plane, PlaneLike, Quaternion, RotMatrix, Vector};
use crate::d2;

/// Local right handed system: origin plus rotation
///
/// As a plane, the system's z axis is the normal and its xy plane the
/// plane's 2-D system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateSystem {
    position: Vector,
    rotation: RotMatrix,
}

impl CoordinateSystem {
    pub const IDENTITY: CoordinateSystem = CoordinateSystem {
        position: Vector::ZERO,
        rotation: RotMatrix::IDENTITY,
    };

    pub fn new(position: Vector, rotation: RotMatrix) -> Self {
        Self { position, rotation }
    }

    /// System at `position` whose `axis` points along `reference`
    pub fn from_reference(position: Vector, reference: Direction, axis: Axis, next: Option<&Vector>) -> Self {
        Self::new(position, RotMatrix::new(reference, axis, next))
    }

    pub fn from_quaternion(position: Vector, rotation: &Quaternion) -> Self {
        Self::new(position, rotation.to_rot_matrix())
    }

    pub fn rotation(&self) -> &RotMatrix {
        &self.rotation
    }

    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_rot_matrix(&self.rotation)
    }

    /// World → local
    pub fn to_system(&self, v: &Vector) -> Vector {
        self.rotation.right_mul(&(*v - self.position))
    }

    pub fn to_system_direction(&self, d: &Direction) -> Direction {
        self.rotation.right_mul_direction(d)
    }

    /// Local → world
    pub fn from_system(&self, v: &Vector) -> Vector {
        self.rotation.mul_vector(v) + self.position
    }

    pub fn from_system_direction(&self, d: &Direction) -> Direction {
        self.rotation.mul_direction(d)
    }

    /// Project all points, returning the in-plane coordinates and the
    /// out-of-plane distances.
    pub fn to_plane_system_all(&self, vectors: &[Vector]) -> (Vec<d2::Vector>, Vec<f64>) {
        vectors.iter().map(|v| self.to_plane_system(v)).unzip()
    }

    /// Express `other` (given in world coordinates) relative to this system.
    pub fn to_system_of(&self, other: &CoordinateSystem) -> CoordinateSystem {
        CoordinateSystem::new(
            self.to_system(&other.position),
            self.rotation.transpose().mul(&other.rotation),
        )
    }
}

impl PlaneLike for CoordinateSystem {
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
        -self.normal().dot_vector(&self.position)
    }

    fn to_plane_system(&self, v: &Vector) -> (d2::Vector, f64) {
        let p = *v - self.position;
        (
            d2::Vector::new(
                self.rotation.axis_x().dot_vector(&p),
                self.rotation.axis_y().dot_vector(&p),
            ),
            self.rotation.axis_z().dot_vector(&p),
        )
    }

    fn from_plane_system(&self, v: &d2::Vector) -> Vector {
        self.rotation.axis_x().scale(v.x) + self.rotation.axis_y().scale(v.y) + self.position
    }

    fn get_plane(&self) -> Plane {
        Plane::from_system(*self)
    }

    fn system(&self) -> CoordinateSystem {
        *self
    }
}
