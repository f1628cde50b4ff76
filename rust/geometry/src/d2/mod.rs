// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar floating point primitives, usually expressed in the local 2-D
//! system of a reference plane.

mod bbox;
mod direction;
mod line_string;
mod linear_ring_collection;
mod polygon;
mod vector;

pub use bbox::BBox;
pub use direction::Direction;
pub use line_string::{LineString, Vertices};
pub use linear_ring_collection::LinearRingCollection;
pub use polygon::Polygon;
pub use vector::Vector;
