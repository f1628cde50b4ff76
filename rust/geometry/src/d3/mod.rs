// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial floating point primitives: vectors, rotations, coordinate
//! systems and planes.

mod bbox;
mod coordinate_system;
mod direction;
mod line_string;
mod plane;
mod polygon;
mod quaternion;
mod rot_matrix;
mod vector;

pub use bbox::BBox;
pub use coordinate_system::CoordinateSystem;
pub use direction::Direction;
pub use line_string::LineString;
pub use plane::{Plane, PlaneLike};
pub(crate) use plane::intersect_ray;
pub use polygon::Polygon;
pub use quaternion::Quaternion;
pub use rot_matrix::{Axis, RotMatrix};
pub use vector::Vector;
