// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIMSCAN Geometry
//!
//! Floating point planar geometry for BIM and point cloud surfaces:
//! 2D and 3D primitives, planes with local coordinate systems, covariance
//! propagation, WKT text forms and i_overlay based polygon assembly.
//!
//! ## Quick Start
//!
//! ```rust
//! use bimscan_geometry::d2::{LineString, Polygon, Vector};
//!
//! let ring = LineString::new_ring([
//!     Vector::new(0.0, 0.0),
//!     Vector::new(4.0, 0.0),
//!     Vector::new(4.0, 3.0),
//!     Vector::new(0.0, 3.0),
//! ]);
//! assert_eq!(ring.area(), 12.0);
//!
//! let polygon = Polygon::from_ring(ring.reverse()).unwrap();
//! assert_eq!(polygon.area(), 12.0);
//! assert_eq!(polygon.to_wkt_string(), "POLYGON((0 0,4 0,4 3,0 3,0 0))");
//! ```

pub mod bool2d;
pub mod d2;
pub mod d3;
pub mod error;
pub mod stochastic;
pub mod wkt;

pub use error::{Error, Result};
pub use stochastic::{SpdMatrix2, SpdMatrix3, SpdMatrix6, StochasticPlane, StochasticVector2, StochasticVector3};
