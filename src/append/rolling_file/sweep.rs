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

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use jiff::Timestamp;

use crate::Error;
use crate::ErrorKind;
use crate::append::rolling_file::ArchiveEntry;
use crate::append::rolling_file::ArchiveNamer;
use crate::append::rolling_file::RotationPolicy;

/// The outcome of a retention sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    deleted: Vec<PathBuf>,
    skipped: usize,
    errors: Vec<Error>,
}

impl SweepReport {
    /// Archives that were removed.
    pub fn deleted(&self) -> &[PathBuf] {
        &self.deleted
    }

    /// Number of directory entries that are not archives of the log file.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Failures met during the sweep. None of them aborted the sweep.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Whether the sweep completed without any failure.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Deletes archives that fall outside the retention limits.
///
/// The directory listing is the only source of truth: archives are recognized by name and
/// their age is taken from the timestamp in the name, not from filesystem metadata.
#[derive(Debug, Clone, Copy)]
pub struct RetentionSweeper<'a> {
    namer: &'a ArchiveNamer,
    policy: &'a RotationPolicy,

    // archive filename whose removal fails with the given kind
    #[cfg(test)]
    delete_fault: Option<(&'a str, io::ErrorKind)>,
}

impl<'a> RetentionSweeper<'a> {
    /// Create a sweeper for the archives of `namer`'s log file.
    pub fn new(namer: &'a ArchiveNamer, policy: &'a RotationPolicy) -> Self {
        Self {
            namer,
            policy,
            #[cfg(test)]
            delete_fault: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn delete_fault(mut self, fault: Option<(&'a str, io::ErrorKind)>) -> Self {
        self.delete_fault = fault;
        self
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        #[cfg(test)]
        {
            if let Some((filename, kind)) = self.delete_fault {
                if path.file_name().is_some_and(|name| name == filename) {
                    return Err(io::Error::from(kind));
                }
            }
        }

        fs::remove_file(path)
    }

    /// List the archives of the log file.
    ///
    /// Entries that are not regular files, the active file, and names that do not parse as an
    /// archive are skipped; the number of skipped entries is returned along with the archives.
    pub fn list_archives(&self) -> Result<(Vec<ArchiveEntry>, usize), Error> {
        let dir = self.namer.directory();
        let read_dir = fs::read_dir(dir).map_err(|err| {
            Error::new(ErrorKind::Io, "failed to read log dir")
                .with_context("dir", dir.display())
                .with_source(err)
        })?;

        let mut skipped = 0;
        let mut archives = vec![];
        for entry in read_dir {
            let Ok(entry) = entry else {
                skipped += 1;
                continue;
            };

            // the writer only creates files, so never touch a dir or symlink
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                skipped += 1;
                continue;
            }

            let filename = entry.file_name();
            let Some(filename) = filename.to_str() else {
                skipped += 1;
                continue;
            };
            if filename == self.namer.active_filename() {
                continue;
            }

            match self.namer.parse_timestamp(filename) {
                Ok(timestamp) => archives.push(ArchiveEntry::new(entry.path(), filename, timestamp)),
                Err(_) => skipped += 1,
            }
        }

        Ok((archives, skipped))
    }

    /// Delete every archive selected by the policy.
    ///
    /// Each deletion is attempted independently. Failures are collected in the report and never
    /// abort the sweep; an archive that is already gone counts as deleted.
    pub fn sweep(&self, now: Timestamp) -> SweepReport {
        let mut report = SweepReport::default();

        let archives = match self.list_archives() {
            Ok((archives, skipped)) => {
                report.skipped = skipped;
                archives
            }
            Err(err) => {
                report.errors.push(err);
                return report;
            }
        };

        for archive in self.policy.select_for_deletion(archives, now) {
            match self.remove(archive.path()) {
                Ok(()) => report.deleted.push(archive.path().to_path_buf()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    report.deleted.push(archive.path().to_path_buf())
                }
                Err(err) => report.errors.push(
                    Error::new(ErrorKind::Delete, "failed to remove old log file")
                        .with_context("path", archive.path().display())
                        .with_source(err),
                ),
            }
        }

        report
    }
}
