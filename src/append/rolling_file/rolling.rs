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
use std::fs::File;
use std::fs::OpenOptions;
use std::fs::Permissions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

use jiff::Timestamp;

use crate::Error;
use crate::ErrorKind;
use crate::Trap;
use crate::append::rolling_file::ArchiveNamer;
use crate::append::rolling_file::RetentionSweeper;
use crate::append::rolling_file::Rotation;
use crate::append::rolling_file::RotationConfig;
use crate::append::rolling_file::RotationPolicy;
use crate::append::rolling_file::SweepReport;
use crate::append::rolling_file::clock::Clock;
use crate::trap::DefaultTrap;

/// A writer for rolling files.
///
/// All operations take `&self` and are serialized by one internal lock, held for the whole
/// write-or-rotate. Rotation (close, rename, sweep, reopen) blocks concurrent writers until it
/// completes, and a buffer passed to [`write`](RollingFileWriter::write) always lands entirely in
/// one file.
///
/// Running two writers against the same path, in one process or across processes, is not
/// supported.
///
/// # Examples
///
/// ```
/// use logrota::append::rolling_file::RollingFileWriter;
///
/// let dir = tempfile::tempdir().unwrap();
/// let writer = RollingFileWriter::builder(dir.path().join("app.log"))
///     .max_file_size(10 * 1024 * 1024)
///     .max_backups(5)
///     .build()
///     .unwrap();
///
/// writer.write(b"hello world\n").unwrap();
/// writer.close().unwrap();
/// ```
#[derive(Debug)]
pub struct RollingFileWriter {
    path: PathBuf,
    state: Mutex<State>,
}

impl RollingFileWriter {
    /// Creates a new [`RollingFileWriterBuilder`] for the given active file path.
    #[must_use]
    pub fn builder(path: impl Into<PathBuf>) -> RollingFileWriterBuilder {
        RollingFileWriterBuilder::new(path)
    }

    /// Creates a writer from a [`RotationConfig`].
    ///
    /// # Errors
    ///
    /// See [`RollingFileWriterBuilder::build`].
    pub fn new(config: RotationConfig) -> Result<Self, Error> {
        RollingFileWriterBuilder::from_config(config).build()
    }

    /// The path of the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes appended to the active file since it was opened.
    pub fn current_size(&self) -> u64 {
        self.state().current_size
    }

    /// Append `buf` to the active file, rotating first if the policy requires it.
    ///
    /// Opens the active file if it has been closed.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::Io`] error if opening, rotating or writing fails. The writer stays
    /// usable; a failed rotation is retried on the next write.
    pub fn write(&self, buf: &[u8]) -> Result<usize, Error> {
        self.state().write(buf)
    }

    /// Archive the active file and start a fresh one.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::Io`] error if the active file cannot be synced, renamed or
    /// recreated. On a rename failure the active file keeps growing.
    pub fn rotate(&self) -> Result<(), Error> {
        let mut state = self.state();
        let now = state.clock.now();
        state.rotate(now)
    }

    /// Flush and close the active file. Idempotent.
    ///
    /// A later [`write`](RollingFileWriter::write) reopens the file.
    pub fn close(&self) -> Result<(), Error> {
        self.state().close()
    }

    /// Flush buffered data of the active file.
    pub fn flush(&self) -> Result<(), Error> {
        self.state().flush()
    }

    /// Apply the retention limits to the existing archives now.
    pub fn sweep(&self) -> SweepReport {
        let state = self.state();
        state.sweep(state.clock.now())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Write for &RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RollingFileWriter::write(*self, buf).map_err(io::Error::other)
    }

    fn flush(&mut self) -> io::Result<()> {
        RollingFileWriter::flush(*self).map_err(io::Error::other)
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut &*self)
    }
}

impl Drop for RollingFileWriter {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Err(err) = state.close() {
            state.trap.trap(&err);
        }
    }
}

/// A builder for configuring [`RollingFileWriter`].
#[derive(Debug)]
pub struct RollingFileWriterBuilder {
    config: RotationConfig,
    clock: Clock,
    trap: Box<dyn Trap>,
}

impl RollingFileWriterBuilder {
    /// Creates a new [`RollingFileWriterBuilder`].
    ///
    /// Defaults to no size limit, no retention limit, archive timestamps in local time and no
    /// interval rotation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_config(RotationConfig {
            path: path.into(),
            ..RotationConfig::default()
        })
    }

    /// Creates a new [`RollingFileWriterBuilder`] from a [`RotationConfig`].
    #[must_use]
    pub fn from_config(config: RotationConfig) -> Self {
        Self {
            config,
            clock: Clock::DefaultClock,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the maximum size of the active file in bytes. `0` disables size rotation.
    #[must_use]
    pub fn max_file_size(mut self, n: u64) -> Self {
        self.config.max_size_bytes = n;
        self
    }

    /// Set the maximum age of archives in days. `0` disables age-based deletion.
    #[must_use]
    pub fn max_age_days(mut self, n: u32) -> Self {
        self.config.max_age_days = n;
        self
    }

    /// Set the maximum number of archives to keep. `0` keeps all of them.
    #[must_use]
    pub fn max_backups(mut self, n: usize) -> Self {
        self.config.max_backups = n;
        self
    }

    /// Render archive timestamps in local time (`true`) or UTC (`false`).
    #[must_use]
    pub fn local_time(mut self, local: bool) -> Self {
        self.config.use_local_time = local;
        self
    }

    /// Set the time-interval rotation.
    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Set the trap that receives retention sweep failures.
    #[must_use]
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the [`RollingFileWriter`].
    ///
    /// Creates the log directory if needed, opens the active file (an existing file is appended
    /// to and its size recovered), and applies the retention limits once.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::Config`] error if either:
    ///
    /// * The path is empty or does not end with a UTF-8 filename.
    /// * The log directory cannot be created.
    /// * The active file cannot be opened.
    pub fn build(self) -> Result<RollingFileWriter, Error> {
        let Self {
            config,
            clock,
            trap,
        } = self;

        if config.path.as_os_str().is_empty() {
            return Err(Error::new(
                ErrorKind::Config,
                "log file path must not be empty",
            ));
        }

        let namer = ArchiveNamer::new(&config.path, config.use_local_time)?;
        let policy = RotationPolicy::new(&config);

        let dir = namer.directory();
        fs::create_dir_all(dir).map_err(|err| {
            Error::new(ErrorKind::Config, "failed to create log directory")
                .with_context("dir", dir.display())
                .with_source(err)
        })?;

        let now = clock.now();
        let mut state = State {
            path: config.path.clone(),
            namer,
            policy,
            clock,
            trap,
            file: None,
            current_size: 0,
            opened_at: now,
            last_archive: None,
            #[cfg(test)]
            rename_fault: None,
            #[cfg(test)]
            delete_fault: None,
        };

        state.open(now).map_err(|err| {
            Error::new(ErrorKind::Config, "failed to open log file")
                .with_context("path", config.path.display())
                .with_source(err)
        })?;
        state.sweep_and_trap(now);

        Ok(RollingFileWriter {
            path: config.path,
            state: Mutex::new(state),
        })
    }
}

#[derive(Debug)]
struct State {
    path: PathBuf,
    namer: ArchiveNamer,
    policy: RotationPolicy,
    clock: Clock,
    trap: Box<dyn Trap>,
    file: Option<File>,
    current_size: u64,
    opened_at: Timestamp,
    last_archive: Option<Timestamp>,
    #[cfg(test)]
    rename_fault: Option<io::ErrorKind>,
    #[cfg(test)]
    delete_fault: Option<(String, io::ErrorKind)>,
}

impl State {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        let now = self.clock.now();

        if self.file.is_none() {
            self.open(now)?;
        }

        if self.policy.should_rotate(self.current_size, self.opened_at, now) {
            self.rotate(now)?;
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| Error::new(ErrorKind::Io, "log file is not open"))?;
        file.write_all(buf).map_err(|err| {
            Error::new(ErrorKind::Io, "failed to write log file")
                .with_context("path", self.path.display())
                .with_source(err)
        })?;

        self.current_size += buf.len() as u64;
        Ok(buf.len())
    }

    /// Open the active file, continuing an existing one.
    fn open(&mut self, now: Timestamp) -> Result<(), Error> {
        match fs::metadata(&self.path) {
            Ok(metadata) => {
                let file = OpenOptions::new()
                    .append(true)
                    .open(&self.path)
                    .map_err(|err| self.io_error("failed to open current log", err))?;

                self.file = Some(file);
                self.current_size = metadata.len();
                self.opened_at = metadata
                    .modified()
                    .ok()
                    .and_then(|mtime| Timestamp::try_from(mtime).ok())
                    .unwrap_or(now);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => self.create(now, None),
            Err(err) => Err(self.io_error("failed to stat current log", err)),
        }
    }

    /// Truncate or create the active file.
    fn create(&mut self, now: Timestamp, permissions: Option<Permissions>) -> Result<(), Error> {
        if let Err(err) = fs::create_dir_all(self.namer.directory()) {
            return Err(self.io_error("failed to create log directory", err));
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|err| self.io_error("failed to create log file", err))?;
        if let Some(permissions) = permissions {
            file.set_permissions(permissions)
                .map_err(|err| self.io_error("failed to set log file permissions", err))?;
        }

        self.file = Some(file);
        self.current_size = 0;
        self.opened_at = now;
        Ok(())
    }

    fn rotate(&mut self, now: Timestamp) -> Result<(), Error> {
        self.close()?;

        let permissions = match self.archive(now) {
            Ok(permissions) => permissions,
            Err(err) => {
                // keep appending to the active file; the next write retries the rotation
                self.file = OpenOptions::new().append(true).open(&self.path).ok();
                return Err(err);
            }
        };

        self.sweep_and_trap(now);
        self.create(now, permissions)
    }

    /// Rename the active file to a fresh archive name. Return the permissions of the archived
    /// file, or `None` if there was no active file to archive.
    fn archive(&mut self, now: Timestamp) -> Result<Option<Permissions>, Error> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error("failed to stat current log", err)),
        };

        let (archive, stamp) = self.namer.unique_archive_name(now, self.last_archive)?;
        self.rename(&archive).map_err(|err| {
            Error::new(ErrorKind::Io, "failed to rename log file")
                .with_context("from", self.path.display())
                .with_context("to", archive.display())
                .with_source(err)
        })?;

        self.last_archive = Some(stamp);
        Ok(Some(metadata.permissions()))
    }

    fn rename(&self, to: &Path) -> io::Result<()> {
        #[cfg(test)]
        {
            if let Some(kind) = self.rename_fault {
                return Err(io::Error::from(kind));
            }
        }

        fs::rename(&self.path, to)
    }

    fn close(&mut self) -> Result<(), Error> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .and_then(|()| file.sync_all())
                .map_err(|err| self.io_error("failed to sync log file", err))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        if let Some(file) = self.file.as_mut() {
            file.flush()
                .map_err(|err| Error::from_io_error(err).with_context("path", self.path.display()))?;
        }
        Ok(())
    }

    fn sweep(&self, now: Timestamp) -> SweepReport {
        let sweeper = RetentionSweeper::new(&self.namer, &self.policy);
        #[cfg(test)]
        let sweeper = sweeper.delete_fault(
            self.delete_fault
                .as_ref()
                .map(|(filename, kind)| (filename.as_str(), *kind)),
        );
        sweeper.sweep(now)
    }

    fn sweep_and_trap(&self, now: Timestamp) {
        if !self.policy.has_retention_limits() {
            return;
        }

        let report = self.sweep(now);
        for err in report.errors() {
            self.trap.trap(err);
        }
    }

    fn io_error(&self, message: &'static str, err: io::Error) -> Error {
        Error::new(ErrorKind::Io, message)
            .with_context("path", self.path.display())
            .with_source(err)
    }
}
