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

use std::path::PathBuf;

use serde::Deserialize;

use crate::append::rolling_file::RotationConfig;
use crate::record::Level;

/// Options for [`Logger::new`](crate::Logger::new).
///
/// All fields have defaults, so a partial configuration can be deserialized:
///
/// ```
/// use logrota::Level;
/// use logrota::Options;
///
/// let options: Options = serde_json::from_str(
///     r#"{"filename": "logs/app.log", "max_size_mb": 100, "max_backups": 7, "level": "warn"}"#,
/// )
/// .unwrap();
/// assert_eq!(options.level, Level::Warn);
/// assert!(options.local_time);
/// ```
///
/// Or built with the setters:
///
/// ```
/// use logrota::Options;
///
/// let options = Options::default()
///     .filename("logs/app.log")
///     .max_size_mb(100)
///     .max_age_days(30)
///     .console_mode(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// The active log file. Archives are kept in the same directory.
    pub filename: PathBuf,
    /// Rotate the log file once it reaches this many megabytes. `0` disables rotation.
    pub max_size_mb: u64,
    /// Delete archives older than this many days. `0` keeps them regardless of age.
    pub max_age_days: u32,
    /// Keep at most this many archives. `0` keeps all of them.
    pub max_backups: usize,
    /// Name archives after the local time instead of UTC.
    pub local_time: bool,
    /// Write to stdout instead of the log file.
    pub stdout: bool,
    /// Use the human-readable text layout instead of JSON.
    pub console_mode: bool,
    /// The minimum enabled level.
    pub level: Level,
    /// `RUST_LOG`-style directives matched against logger names. Overrides `level`.
    pub filter: Option<String>,
    /// Make [`Level::DPanic`] records ask the caller to panic.
    pub development: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            filename: PathBuf::new(),
            max_size_mb: 0,
            max_age_days: 0,
            max_backups: 0,
            local_time: true,
            stdout: false,
            console_mode: false,
            level: Level::Info,
            filter: None,
            development: false,
        }
    }
}

impl Options {
    /// Set [`filename`](Options::filename).
    pub fn filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Set [`max_size_mb`](Options::max_size_mb).
    pub fn max_size_mb(mut self, max_size_mb: u64) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }

    /// Set [`max_age_days`](Options::max_age_days).
    pub fn max_age_days(mut self, max_age_days: u32) -> Self {
        self.max_age_days = max_age_days;
        self
    }

    /// Set [`max_backups`](Options::max_backups).
    pub fn max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    /// Set [`local_time`](Options::local_time).
    pub fn local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }

    /// Set [`stdout`](Options::stdout).
    pub fn stdout(mut self, stdout: bool) -> Self {
        self.stdout = stdout;
        self
    }

    /// Set [`console_mode`](Options::console_mode).
    pub fn console_mode(mut self, console_mode: bool) -> Self {
        self.console_mode = console_mode;
        self
    }

    /// Set [`level`](Options::level).
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set [`filter`](Options::filter).
    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    /// Set [`development`](Options::development).
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    pub(crate) fn rotation_config(&self) -> RotationConfig {
        RotationConfig {
            path: self.filename.clone(),
            max_size_bytes: self.max_size_mb.saturating_mul(1024 * 1024),
            max_age_days: self.max_age_days,
            max_backups: self.max_backups,
            use_local_time: self.local_time,
            ..RotationConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_config_converts_megabytes() {
        let config = Options::default()
            .filename("logs/app.log")
            .max_size_mb(3)
            .max_backups(2)
            .local_time(false)
            .rotation_config();

        assert_eq!(config.path, PathBuf::from("logs/app.log"));
        assert_eq!(config.max_size_bytes, 3 * 1024 * 1024);
        assert_eq!(config.max_backups, 2);
        assert!(!config.use_local_time);
    }
}
