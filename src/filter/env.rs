// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides [`env_filter`](https://crates.io/crates/env_filter) based filter for log records.

use log::Metadata;

use crate::record::Level;

/// A filter consists of one or more comma-separated directives which match on logger names.
///
/// Each directive may have a corresponding maximum verbosity level which enables records of
/// loggers whose name starts with the directive's name. A directive without a name applies to
/// every logger. `dpanic`, `panic` and `fatal` records are matched as `error`.
///
/// The directive syntax is that of [`env_logger`](https://crates.io/crates/env_logger), e.g.,
/// `info,payments=debug,payments.gateway=off`.
#[derive(Debug)]
pub struct EnvFilter(env_filter::Filter);

impl EnvFilter {
    /// Build a filter from a directive string.
    ///
    /// Malformed directives are reported to stderr and ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use logrota::filter::EnvFilter;
    ///
    /// let filter = EnvFilter::from_directives("warn,payments=debug");
    /// ```
    pub fn from_directives(directives: &str) -> Self {
        let mut builder = env_filter::Builder::new();
        builder.parse(directives);
        EnvFilter(builder.build())
    }

    /// Whether a record of `level` from the logger named `name` passes the filter.
    pub fn enabled(&self, name: &str, level: Level) -> bool {
        let metadata = Metadata::builder()
            .level(level.to_log_level())
            .target(name)
            .build();
        self.0.enabled(&metadata)
    }
}

impl From<&str> for EnvFilter {
    fn from(directives: &str) -> Self {
        EnvFilter::from_directives(directives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_match_logger_names() {
        let filter = EnvFilter::from_directives("warn,payments=debug,payments.gateway=off");

        assert!(filter.enabled("payments", Level::Debug));
        assert!(filter.enabled("payments.ledger", Level::Info));
        assert!(!filter.enabled("payments.gateway", Level::Fatal));
        assert!(!filter.enabled("auth", Level::Info));
        assert!(filter.enabled("auth", Level::Warn));
        assert!(filter.enabled("", Level::Panic));
    }
}
