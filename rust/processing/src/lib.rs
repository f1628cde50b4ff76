// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BIMSCAN Processing
//!
//! Domain layer on top of [`bimscan_geometry`]: planar faces of building
//! objects referring to shared reference planes.
//!
//! ## Overview
//!
//! - **Identity**: [`Id`] keys faces by object, face and part
//! - **Reference planes**: [`ReferencePlane`] derives a deterministic id
//!   from its geometry
//! - **Faces**: [`PlanarFace`] holds a polygon in its plane's system
//! - **Merging**: [`combine_and_map`] folds near-duplicate planes into
//!   the earliest match and moves the faces along
//! - **Interchange**: `;` separated CSV files and Wavefront OBJ
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bimscan_processing::{combine_and_map, MergeConfig, PlanarFace, ReferencePlane};
//!
//! let planes = ReferencePlane::read_csv("planes.csv")?;
//! let faces = PlanarFace::read_csv("faces.csv")?;
//! let outcome = combine_and_map(&planes.items, faces.items, &MergeConfig::from_env());
//! println!("{}", outcome.report.to_json()?);
//! # Ok::<(), bimscan_processing::Error>(())
//! ```

mod config;
pub mod csv;
mod error;
mod id;
pub mod merge;
mod planar_face;
mod planar_face_stochastic;
mod reference_plane;

pub use config::MergeConfig;
pub use csv::CsvBatch;
pub use error::{Error, Result};
pub use id::Id;
pub use merge::{combine_and_map, group_by_plane, MergeOutcome, MergeReport};
pub use planar_face::{DerivedFace, PlanarFace};
pub use planar_face_stochastic::PlanarFaceStochastic;
pub use reference_plane::{ReferencePlane, ReferencePlaneKind};
