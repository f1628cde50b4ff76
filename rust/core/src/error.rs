// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for exact arithmetic
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the exact number types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid fraction: {0}")]
    InvalidFraction(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
