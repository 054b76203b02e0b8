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

//! A synchronous [`log::Log`] implementation writing formatted lines to stdout and stderr.

use std::io::{self, Write};

use log::{Level, LevelFilter, Metadata, Record};
use ustr::Ustr;

use super::LoggerConfig;

/// Timestamp format for log lines (RFC 3339, nanosecond precision, UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9fZ";

/// Returns the ANSI color prefix used for `level`.
#[must_use]
pub const fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[1;31m",
        Level::Warn => "\x1b[1;33m",
        Level::Info => "",
        Level::Debug | Level::Trace => "\x1b[94m",
    }
}

/// Writes log records to stdout, with errors going to stderr.
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
    /// Module filters sorted by descending path length, so the first match is the most specific.
    module_filters: Vec<(Ustr, LevelFilter)>,
}

impl Logger {
    /// Creates a new [`Logger`] instance.
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        let mut module_filters: Vec<(Ustr, LevelFilter)> = config
            .module_level
            .iter()
            .map(|(path, level)| (*path, *level))
            .collect();
        module_filters.sort_by_key(|(path, _)| std::cmp::Reverse(path.len()));

        Self {
            config,
            module_filters,
        }
    }

    /// Returns the configuration this logger was built from.
    #[must_use]
    pub const fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Returns the effective level filter for `target`.
    ///
    /// The longest configured module path that prefixes `target` wins, otherwise the
    /// stdout level applies.
    #[must_use]
    pub fn level_for(&self, target: &str) -> LevelFilter {
        self.module_filters
            .iter()
            .find(|(path, _)| target.starts_with(path.as_str()))
            .map_or(self.config.stdout_level, |(_, level)| *level)
    }

    /// Formats a single log line (without the trailing newline).
    #[must_use]
    pub fn format_line(&self, timestamp: &str, level: Level, target: &str, message: &str) -> String {
        if self.config.is_colored {
            format!(
                "\x1b[1m{timestamp}\x1b[0m {}[{level}] {target}: {message}\x1b[0m",
                level_color(level),
            )
        } else {
            format!("{timestamp} [{level}] {target}: {message}")
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let message = record.args().to_string();
        let line = self.format_line(&timestamp, record.level(), record.target(), &message);

        // Write failures cannot be reported through the logger itself
        let _ = if record.level() == Level::Error {
            writeln!(io::stderr().lock(), "{line}")
        } else {
            writeln!(io::stdout().lock(), "{line}")
        };
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}
