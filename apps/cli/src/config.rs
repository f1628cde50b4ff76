// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tool configuration loaded from environment variables.

use bimscan_processing::MergeConfig;

/// Tool configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads for parallel processing.
    pub worker_threads: usize,
    /// Emit log lines as JSON.
    pub log_json: bool,
    /// Plane merge tolerances.
    pub merge: MergeConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            worker_threads: std::env::var("BIMSCAN_WORKER_THREADS")
                .unwrap_or_else(|_| num_cpus::get().to_string())
                .parse()
                .unwrap_or_else(|_| num_cpus::get()),
            log_json: std::env::var("BIMSCAN_LOG_JSON")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            merge: MergeConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
