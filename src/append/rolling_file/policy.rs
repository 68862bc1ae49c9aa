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

use std::cmp::Ordering;

use jiff::SignedDuration;
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::append::rolling_file::ArchiveEntry;
use crate::append::rolling_file::Rotation;
use crate::append::rolling_file::RotationConfig;

/// Pure rotation and retention decisions.
#[derive(Debug, Clone)]
pub struct RotationPolicy {
    max_size: u64,
    max_age_days: u32,
    max_backups: usize,
    rotation: Rotation,
    tz: TimeZone,
}

impl RotationPolicy {
    /// Create a policy from the limits of a [`RotationConfig`].
    pub fn new(config: &RotationConfig) -> Self {
        let tz = if config.use_local_time {
            TimeZone::system()
        } else {
            TimeZone::UTC
        };

        Self {
            max_size: config.max_size_bytes,
            max_age_days: config.max_age_days,
            max_backups: config.max_backups,
            rotation: config.rotation,
            tz,
        }
    }

    /// Whether the active file must be rotated before the next append.
    ///
    /// Returns `true` once `current_size` reaches the size limit. With a time interval other
    /// than [`Rotation::Never`], also returns `true` once `now` crosses the first interval
    /// boundary after `opened_at`.
    pub fn should_rotate(&self, current_size: u64, opened_at: Timestamp, now: Timestamp) -> bool {
        if self.max_size > 0 && current_size >= self.max_size {
            return true;
        }

        self.rotation
            .next_boundary(&opened_at.to_zoned(self.tz.clone()))
            .is_some_and(|next| now >= next)
    }

    /// Whether any retention limit is configured. Without one, sweeping never deletes.
    pub fn has_retention_limits(&self) -> bool {
        self.max_age_days > 0 || self.max_backups > 0
    }

    /// Select the archives to delete.
    ///
    /// An archive is selected if it is older than `now - max_age_days * 24h`, or if it is not
    /// among the `max_backups` newest archives. Archives are ordered by timestamp, newest first,
    /// with ties broken by filename. The selection is returned in that order.
    pub fn select_for_deletion(
        &self,
        mut archives: Vec<ArchiveEntry>,
        now: Timestamp,
    ) -> Vec<ArchiveEntry> {
        if !self.has_retention_limits() {
            return vec![];
        }

        archives.sort_by(compare_newest_first);

        let cutoff = if self.max_age_days > 0 {
            let max_age = SignedDuration::from_hours(24 * i64::from(self.max_age_days));
            now.checked_sub(max_age).ok()
        } else {
            None
        };

        archives
            .into_iter()
            .enumerate()
            .filter(|(i, entry)| {
                let beyond_backups = self.max_backups > 0 && *i >= self.max_backups;
                let expired = cutoff.is_some_and(|cutoff| entry.timestamp() < cutoff);
                beyond_backups || expired
            })
            .map(|(_, entry)| entry)
            .collect()
    }
}

fn compare_newest_first(a: &ArchiveEntry, b: &ArchiveEntry) -> Ordering {
    match b.timestamp().cmp(&a.timestamp()) {
        Ordering::Equal => a.filename().cmp(b.filename()),
        ord => ord,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::str::FromStr;

    use super::*;

    fn policy(max_size_bytes: u64, max_age_days: u32, max_backups: usize) -> RotationPolicy {
        RotationPolicy::new(&RotationConfig {
            path: PathBuf::from("app.log"),
            max_size_bytes,
            max_age_days,
            max_backups,
            use_local_time: false,
            rotation: Rotation::Never,
        })
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::from_str(s).unwrap()
    }

    fn entry(filename: &str, timestamp: &str) -> ArchiveEntry {
        ArchiveEntry::new(PathBuf::from(filename), filename, ts(timestamp))
    }

    fn names(entries: &[ArchiveEntry]) -> Vec<&str> {
        entries.iter().map(ArchiveEntry::filename).collect()
    }

    #[test]
    fn test_should_rotate_on_size() {
        let opened_at = ts("2024-08-10T00:00:00Z");
        let now = ts("2024-08-12T00:00:00Z");

        let p = policy(100, 0, 0);
        assert!(!p.should_rotate(0, opened_at, now));
        assert!(!p.should_rotate(99, opened_at, now));
        assert!(p.should_rotate(100, opened_at, now));
        assert!(p.should_rotate(1000, opened_at, now));

        // zero disables size rotation, and elapsed time alone never triggers it
        let p = policy(0, 7, 3);
        assert!(!p.should_rotate(u64::MAX, opened_at, now));
    }

    #[test]
    fn test_should_rotate_on_interval() {
        let mut p = policy(0, 0, 0);
        p.rotation = Rotation::Hourly;
        let opened_at = ts("2024-08-10T10:30:00Z");
        assert!(!p.should_rotate(0, opened_at, ts("2024-08-10T10:59:59Z")));
        assert!(p.should_rotate(0, opened_at, ts("2024-08-10T11:00:00Z")));
    }

    #[test]
    fn test_no_limits_retains_all() {
        let p = policy(100, 0, 0);
        let archives = vec![
            entry("a", "2020-01-01T00:00:00Z"),
            entry("b", "2021-01-01T00:00:00Z"),
        ];
        assert!(p.select_for_deletion(archives, ts("2024-01-01T00:00:00Z")).is_empty());
    }

    #[test]
    fn test_max_backups_keeps_newest() {
        let p = policy(0, 0, 2);
        let archives = vec![
            entry("t2", "2024-08-10T02:00:00Z"),
            entry("t1", "2024-08-10T01:00:00Z"),
            entry("t3", "2024-08-10T03:00:00Z"),
        ];
        let deleted = p.select_for_deletion(archives, ts("2024-08-10T04:00:00Z"));
        assert_eq!(names(&deleted), vec!["t1"]);
    }

    #[test]
    fn test_max_age_deletes_expired() {
        let p = policy(0, 1, 0);
        let now = ts("2024-08-10T12:00:00Z");
        let archives = vec![
            entry("fresh", "2024-08-10T00:00:00Z"),
            entry("edge", "2024-08-09T12:00:00Z"),
            entry("stale", "2024-08-09T11:59:59Z"),
            entry("ancient", "2023-01-01T00:00:00Z"),
        ];
        let deleted = p.select_for_deletion(archives, now);
        assert_eq!(names(&deleted), vec!["stale", "ancient"]);
    }

    #[test]
    fn test_union_of_age_and_count() {
        let p = policy(0, 2, 2);
        let now = ts("2024-08-10T00:00:00Z");
        let archives = vec![
            entry("d0", "2024-08-09T23:00:00Z"),
            entry("d1", "2024-08-09T00:00:00Z"),
            entry("d2", "2024-08-08T12:00:00Z"),
            entry("d5", "2024-08-05T00:00:00Z"),
        ];
        let deleted = p.select_for_deletion(archives, now);
        assert_eq!(names(&deleted), vec!["d2", "d5"]);

        // the age rule applies even when under the count limit
        let p = policy(0, 2, 10);
        let archives = vec![
            entry("d0", "2024-08-09T23:00:00Z"),
            entry("d5", "2024-08-05T00:00:00Z"),
        ];
        let deleted = p.select_for_deletion(archives, now);
        assert_eq!(names(&deleted), vec!["d5"]);
    }

    #[test]
    fn test_ties_break_by_filename() {
        let p = policy(0, 0, 1);
        let archives = vec![
            entry("b", "2024-08-10T00:00:00Z"),
            entry("c", "2024-08-10T00:00:00Z"),
            entry("a", "2024-08-10T00:00:00Z"),
        ];
        let deleted = p.select_for_deletion(archives, ts("2024-08-11T00:00:00Z"));
        assert_eq!(names(&deleted), vec!["b", "c"]);
    }
}
