// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merge tolerances loaded from environment variables.

use bimscan_core::consts::TRIGTOL;
use serde::{Deserialize, Serialize};

/// Tolerances for plane deduplication and identity derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Largest difference of the origin distances `d` (metres).
    pub max_dist: f64,
    /// Largest `|1 - cos|` between two normals.
    pub max_cos_one: f64,
    /// Decimals of the distance in derived plane ids.
    pub id_digits: usize,
}

impl MergeConfig {
    pub const DEFAULT_MAX_DIST: f64 = 0.0005;
    pub const DEFAULT_MAX_COS_ONE: f64 = TRIGTOL;
    pub const DEFAULT_ID_DIGITS: usize = 3;

    /// Load configuration from environment variables.
    ///
    /// `BIMSCAN_MAX_DIST`, `BIMSCAN_MAX_COS_ONE` and `BIMSCAN_ID_DIGITS`;
    /// missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            max_dist: env_or("BIMSCAN_MAX_DIST", Self::DEFAULT_MAX_DIST),
            max_cos_one: env_or("BIMSCAN_MAX_COS_ONE", Self::DEFAULT_MAX_COS_ONE),
            id_digits: env_or("BIMSCAN_ID_DIGITS", Self::DEFAULT_ID_DIGITS),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_dist: Self::DEFAULT_MAX_DIST,
            max_cos_one: Self::DEFAULT_MAX_COS_ONE,
            id_digits: Self::DEFAULT_ID_DIGITS,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
