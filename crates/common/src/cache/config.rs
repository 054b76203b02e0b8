// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Configuration for [`LruCache`](super::LruCache).

use std::env::{self, VarError};

use serde::{Deserialize, Serialize};

/// Capacity used when none is configured.
pub const DEFAULT_LRU_CAPACITY: usize = 1_000;

/// Environment variable holding an LRU cache capacity.
pub const LRU_CAPACITY_ENV_VAR: &str = "RECENCY_LRU_CAPACITY";

/// Configuration for an [`LruCache`](super::LruCache).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LruCacheConfig {
    /// Maximum number of entries held. Zero means the cache never retains anything.
    pub capacity: usize,
}

impl Default for LruCacheConfig {
    /// Creates a new default [`LruCacheConfig`] instance.
    fn default() -> Self {
        Self {
            capacity: DEFAULT_LRU_CAPACITY,
        }
    }
}

impl LruCacheConfig {
    /// Creates a new [`LruCacheConfig`] instance.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Parses a configuration from a JSON object, e.g. `{"capacity": 128}`.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is malformed or contains unknown fields.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).map_err(|e| anyhow::anyhow!("Invalid LRU cache config: {e}"))
    }

    /// Reads the capacity from the `RECENCY_LRU_CAPACITY` environment variable.
    ///
    /// Falls back to the default configuration when the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but is not a valid capacity.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_value(env::var(LRU_CAPACITY_ENV_VAR))
    }

    fn from_env_value(value: Result<String, VarError>) -> anyhow::Result<Self> {
        match value {
            Ok(value) => parse_capacity(&value).map(Self::new),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Parses a capacity string, allowing `_` digit separators.
///
/// # Errors
///
/// Returns an error if `s` is not a non-negative integer.
pub fn parse_capacity(s: &str) -> anyhow::Result<usize> {
    s.trim()
        .replace('_', "")
        .parse::<usize>()
        .map_err(|e| anyhow::anyhow!("Invalid capacity '{s}': {e}"))
}
