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

use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;

use jiff::SignedDuration;
use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

use crate::Error;
use crate::ErrorKind;

// colons are avoided so that archive names are valid on every filesystem
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Maps rotation timestamps to archive filenames and back.
///
/// For a base path `logs/app.log`, an archive rotated at `2024-08-10 17:12:52.123` is named
/// `logs/app-2024-08-10T17-12-52.123.log`. A base path without extension yields
/// `logs/app-2024-08-10T17-12-52.123`.
#[derive(Debug, Clone)]
pub struct ArchiveNamer {
    dir: PathBuf,
    filename: String,
    stem: String,
    ext: Option<String>,
    tz: TimeZone,
}

impl ArchiveNamer {
    /// Create a namer for the given active file path.
    ///
    /// Timestamps are rendered in the system time zone if `use_local_time` is set, otherwise in
    /// UTC.
    ///
    /// # Errors
    ///
    /// Return an error if the path does not end with a UTF-8 filename.
    pub fn new(path: &Path, use_local_time: bool) -> Result<Self, Error> {
        let tz = if use_local_time {
            TimeZone::system()
        } else {
            TimeZone::UTC
        };
        Self::with_timezone(path, tz)
    }

    /// Create a namer that renders timestamps in the given time zone.
    pub fn with_timezone(path: &Path, tz: TimeZone) -> Result<Self, Error> {
        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::Config,
                    "log file path must end with a UTF-8 filename",
                )
                .with_context("path", path.display())
            })?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (stem, ext) = match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), Some(ext.to_string())),
            _ => (filename.to_string(), None),
        };

        Ok(Self {
            dir,
            filename: filename.to_string(),
            stem,
            ext,
            tz,
        })
    }

    /// The directory holding the active file and its archives.
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    /// The filename of the active log file.
    pub fn active_filename(&self) -> &str {
        &self.filename
    }

    /// The time zone timestamps are rendered in.
    pub fn timezone(&self) -> &TimeZone {
        &self.tz
    }

    /// Return the archive path for the given rotation timestamp.
    ///
    /// The timestamp is rendered with millisecond precision.
    pub fn archive_name(&self, timestamp: Timestamp) -> PathBuf {
        self.dir.join(self.archive_filename(timestamp))
    }

    fn archive_filename(&self, timestamp: Timestamp) -> String {
        let zoned = timestamp.to_zoned(self.tz.clone());
        let stamp = format!(
            "{}.{:03}",
            zoned.strftime(DATETIME_FORMAT),
            zoned.millisecond()
        );
        match &self.ext {
            Some(ext) => format!("{}-{stamp}.{ext}", self.stem),
            None => format!("{}-{stamp}", self.stem),
        }
    }

    /// Parse the rotation timestamp out of an archive filename.
    ///
    /// This is the inverse of [`ArchiveNamer::archive_name`] for millisecond-precision
    /// timestamps.
    ///
    /// # Errors
    ///
    /// Return a [`ErrorKind::Parse`] error if the filename is not an archive of this log file.
    pub fn parse_timestamp(&self, filename: &str) -> Result<Timestamp, Error> {
        let malformed = || {
            Error::new(ErrorKind::Parse, "not an archive of this log file")
                .with_context("filename", filename)
        };

        let rest = filename
            .strip_prefix(self.stem.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .ok_or_else(malformed)?;
        let stamp = match &self.ext {
            Some(ext) => rest
                .strip_suffix(ext.as_str())
                .and_then(|rest| rest.strip_suffix('.'))
                .ok_or_else(malformed)?,
            None => rest,
        };

        let (datetime, millis) = stamp.rsplit_once('.').ok_or_else(malformed)?;
        if millis.len() != 3 || !millis.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let millis = millis
            .parse::<i16>()
            .map_err(|err| malformed().with_source(err))?;

        let datetime = DateTime::strptime(DATETIME_FORMAT, datetime)
            .and_then(|dt| dt.with().millisecond(millis).build())
            .map_err(|err| malformed().with_source(err))?;
        let zoned = datetime
            .to_zoned(self.tz.clone())
            .map_err(|err| malformed().with_source(err))?;

        // strptime accepts unpadded fields and signed years
        let timestamp = zoned.timestamp();
        if self.archive_filename(timestamp) != filename {
            return Err(malformed());
        }
        Ok(timestamp)
    }

    /// Return an archive path that does not exist yet, along with the timestamp it encodes.
    ///
    /// The timestamp is truncated to milliseconds and, if needed, advanced one millisecond at a
    /// time until it is strictly after `after` and the path is free.
    pub fn unique_archive_name(
        &self,
        timestamp: Timestamp,
        after: Option<Timestamp>,
    ) -> Result<(PathBuf, Timestamp), Error> {
        let overflow = |err: jiff::Error| {
            Error::new(ErrorKind::Io, "failed to compute archive timestamp").with_source(err)
        };

        let mut stamp = Timestamp::from_millisecond(timestamp.as_millisecond()).map_err(overflow)?;
        if let Some(after) = after {
            if stamp <= after {
                stamp = after
                    .checked_add(SignedDuration::from_millis(1))
                    .map_err(overflow)?;
            }
        }

        loop {
            let path = self.archive_name(stamp);
            if !path.exists() {
                return Ok((path, stamp));
            }
            stamp = stamp
                .checked_add(SignedDuration::from_millis(1))
                .map_err(overflow)?;
        }
    }
}

/// An archived log file, as found in the log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    path: PathBuf,
    filename: String,
    timestamp: Timestamp,
}

impl ArchiveEntry {
    /// Create an archive entry.
    pub fn new(path: PathBuf, filename: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            path,
            filename: filename.into(),
            timestamp,
        }
    }

    /// The full path of the archive.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The filename of the archive.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The rotation timestamp encoded in the filename.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::str::FromStr;

    use rand::Rng;
    use tempfile::TempDir;

    use super::*;

    fn utc_namer(path: &str) -> ArchiveNamer {
        ArchiveNamer::new(Path::new(path), false).unwrap()
    }

    #[test]
    fn test_archive_name_format() {
        let namer = utc_namer("logs/app.log");
        let ts = Timestamp::from_str("2024-08-10T17:12:52.123Z").unwrap();
        assert_eq!(
            namer.archive_name(ts),
            Path::new("logs/app-2024-08-10T17-12-52.123.log")
        );

        let namer = utc_namer("logs/app");
        assert_eq!(
            namer.archive_name(ts),
            Path::new("logs/app-2024-08-10T17-12-52.123")
        );

        let namer = utc_namer("server.2024.log");
        assert_eq!(namer.directory(), Path::new("."));
        assert_eq!(
            namer.archive_name(ts),
            Path::new("./server.2024-2024-08-10T17-12-52.123.log")
        );
    }

    #[test]
    fn test_fixed_offset_rendering() {
        let tz = TimeZone::fixed(jiff::tz::offset(8));
        let namer = ArchiveNamer::with_timezone(Path::new("app.log"), tz).unwrap();
        let ts = Timestamp::from_str("2024-08-10T17:12:52.007Z").unwrap();
        let name = namer.archive_name(ts);
        assert_eq!(name, Path::new("./app-2024-08-11T01-12-52.007.log"));

        let filename = name.file_name().unwrap().to_str().unwrap();
        assert_eq!(namer.parse_timestamp(filename).unwrap(), ts);
    }

    #[test]
    fn test_round_trip() {
        let namer = utc_namer("logs/app.log");
        let mut rng = rand::rng();
        for _ in 0..1000 {
            // between 1970 and 2100, millisecond precision
            let millis = rng.random_range(0..4_102_444_800_000i64);
            let ts = Timestamp::from_millisecond(millis).unwrap();
            let name = namer.archive_name(ts);
            let filename = name.file_name().unwrap().to_str().unwrap();
            assert_eq!(namer.parse_timestamp(filename).unwrap(), ts, "{filename}");
        }
    }

    #[test]
    fn test_parse_rejects_foreign_names() {
        let namer = utc_namer("logs/app.log");
        for filename in [
            "app.log",
            "app-.log",
            "other-2024-08-10T17-12-52.123.log",
            "app-2024-08-10T17-12-52.123.txt",
            "app-2024-08-10T17-12-52.log",
            "app-2024-08-10T17-12-52.12.log",
            "app-2024-08-10 17:12:52.123.log",
            "app-2024-13-10T17-12-52.123.log",
            "app-2024-08-10T17-12-52.123.log.gz",
            "app-2024-8-1T1-2-3.000.log",
            "app-+2024-08-10T17-12-52.123.log",
        ] {
            let err = namer.parse_timestamp(filename).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{filename}");
        }
    }

    #[test]
    fn test_unique_archive_name() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let namer = ArchiveNamer::new(&temp_dir.path().join("app.log"), false).unwrap();
        let ts = Timestamp::from_str("2024-08-10T17:12:52.123456Z").unwrap();
        let truncated = Timestamp::from_str("2024-08-10T17:12:52.123Z").unwrap();

        let (path, stamp) = namer.unique_archive_name(ts, None).unwrap();
        assert_eq!(stamp, truncated);
        assert_eq!(path, namer.archive_name(truncated));

        // an existing archive with the same name is never overwritten
        fs::write(&path, b"taken").unwrap();
        let (next, next_stamp) = namer.unique_archive_name(ts, None).unwrap();
        assert_ne!(next, path);
        assert_eq!(next_stamp.as_millisecond(), truncated.as_millisecond() + 1);

        // names are strictly increasing after the previous archive
        let (_, after) = namer.unique_archive_name(ts, Some(next_stamp)).unwrap();
        assert!(after > next_stamp);
    }
}
