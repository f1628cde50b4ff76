// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}: Input string is empty")]
    EmptyLine(&'static str),

    #[error("{source_name}: Line: {line} is not readable")]
    UnreadableLine {
        source_name: &'static str,
        line: String,
    },

    #[error("{0}: CSV-File has no data lines")]
    NoData(&'static str),

    #[error("Unknown reference plane: {0}")]
    UnknownPlane(String),

    #[error("Geometry error: {0}")]
    Geometry(#[from] bimscan_geometry::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
