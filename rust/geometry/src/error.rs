// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or building geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("WKT parse error: {0}")]
    Wkt(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Core error: {0}")]
    CoreError(#[from] bimscan_core::Error),
}
