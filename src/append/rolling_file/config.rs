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

use crate::append::rolling_file::Rotation;

/// Configuration of a [`RollingFileWriter`](crate::append::rolling_file::RollingFileWriter).
///
/// A zero limit disables the corresponding rule.
///
/// # Examples
///
/// ```
/// use logrota::append::rolling_file::RotationConfig;
///
/// let config: RotationConfig = serde_json::from_str(
///     r#"{"path": "logs/app.log", "max_size_bytes": 1048576, "max_backups": 3}"#,
/// )
/// .unwrap();
/// assert_eq!(config.max_age_days, 0);
/// assert!(config.use_local_time);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// The active log file. Archives are written next to it.
    pub path: PathBuf,
    /// Rotate once the active file holds at least this many bytes. `0` disables size rotation.
    pub max_size_bytes: u64,
    /// Delete archives older than this many days. `0` keeps archives regardless of age.
    pub max_age_days: u32,
    /// Keep at most this many archives. `0` keeps all of them.
    pub max_backups: usize,
    /// Render archive timestamps in the system time zone instead of UTC.
    pub use_local_time: bool,
    /// Optional time-interval rotation on top of the size limit.
    pub rotation: Rotation,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            max_size_bytes: 0,
            max_age_days: 0,
            max_backups: 0,
            use_local_time: true,
            rotation: Rotation::Never,
        }
    }
}
