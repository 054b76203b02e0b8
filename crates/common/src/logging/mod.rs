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

//! The logging framework for recency caches.
//!
//! Records emitted through the `log` facade are written synchronously by a [`Logger`]
//! installed as the global logger. Output is filtered by a stdout level plus optional
//! per-module overrides, configured from a [`LoggerConfig`] or the `RECENCY_LOG`
//! environment variable.

pub mod config;
pub mod logger;

use std::{
    str::FromStr,
    sync::{
        OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

use log::LevelFilter;

pub use self::{config::LoggerConfig, logger::Logger};

/// Environment variable holding the logger spec string.
pub const LOG_ENV_VAR: &str = "RECENCY_LOG";

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);
static LOGGING_COLORED: AtomicBool = AtomicBool::new(true);
static LAZY_INIT: OnceLock<bool> = OnceLock::new();

/// Returns whether the logger is enabled.
pub fn logging_is_initialized() -> bool {
    LOGGING_INITIALIZED.load(Ordering::Relaxed)
}

/// Returns whether the logger is using ANSI colors.
pub fn logging_is_colored() -> bool {
    LOGGING_COLORED.load(Ordering::Relaxed)
}

/// Ensures logging is initialized on first use.
///
/// If `RECENCY_LOG` is set, initializes the logger with the specified config.
/// Otherwise, initializes with INFO level to stdout.
///
/// Returns `true` if logging is available (either already initialized or
/// successfully lazy-initialized), `false` otherwise.
pub fn ensure_logging_initialized() -> bool {
    if LOGGING_INITIALIZED.load(Ordering::SeqCst) {
        return true;
    }

    LAZY_INIT.get_or_init(|| {
        let config = LoggerConfig::from_env().unwrap_or_default();
        init_logging(config).is_ok()
    });

    LOGGING_INITIALIZED.load(Ordering::SeqCst)
}

/// Installs a [`Logger`] built from `config` as the global `log` logger.
///
/// # Errors
///
/// Returns an error if a global logger has already been set.
pub fn init_logging(config: LoggerConfig) -> anyhow::Result<()> {
    let max_level = config.max_level();
    let is_colored = config.is_colored;

    if config.print_config {
        println!("Logging config: {config:?}");
    }

    log::set_boxed_logger(Box::new(Logger::new(config)))
        .map_err(|e| anyhow::anyhow!("Failed to set logger: {e}"))?;
    log::set_max_level(max_level);

    LOGGING_COLORED.store(is_colored, Ordering::Relaxed);
    LOGGING_INITIALIZED.store(true, Ordering::SeqCst);
    Ok(())
}

/// Parses a string into a [`LevelFilter`], accepting `WARNING` as an alias for `WARN`.
///
/// # Errors
///
/// Returns an error if the provided string is not a valid `LevelFilter`.
pub fn parse_level_filter_str(s: &str) -> anyhow::Result<LevelFilter> {
    let mut log_level_str = s.to_string().to_uppercase();
    if log_level_str == "WARNING" {
        log_level_str = "WARN".to_string();
    }
    LevelFilter::from_str(&log_level_str)
        .map_err(|_| anyhow::anyhow!("Invalid log level string: '{s}'"))
}
