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

use std::panic::Location;
use std::sync::Arc;
use std::time::SystemTime;

use crate::Append;
use crate::Error;
use crate::Trap;
use crate::append::RollingFile;
use crate::append::Stdout;
use crate::append::rolling_file::RollingFileWriter;
use crate::filter::EnvFilter;
use crate::kv::Fields;
use crate::kv::Value;
use crate::layout::JsonLayout;
use crate::layout::TextLayout;
use crate::logger::LoggerBuilder;
use crate::logger::Options;
use crate::record::Action;
use crate::record::Level;
use crate::record::Record;

/// A leveled, structured logger.
///
/// Cloning a logger is cheap: clones, named children and children with extra context fields
/// all share the same appender.
///
/// # Examples
///
/// ```
/// use logrota::Logger;
///
/// let logger = Logger::stdout().named("payments");
/// logger
///     .info("charge accepted", &[("amount", 42.into())])
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    core: Arc<Core>,
    name: String,
    fields: Fields,
}

#[derive(Debug)]
pub(super) struct Core {
    pub(super) level: Level,
    pub(super) filter: Option<EnvFilter>,
    pub(super) append: Box<dyn Append>,
    pub(super) trap: Box<dyn Trap>,
    pub(super) development: bool,
}

impl Logger {
    /// Create a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Create a logger from [`Options`].
    ///
    /// With `stdout` set, records go to the standard output. Otherwise they go to a
    /// [`RollingFileWriter`] at `filename` with the configured limits. `console_mode` selects
    /// the text layout instead of JSON.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::Config`](crate::ErrorKind::Config) error if the log file cannot
    /// be set up.
    pub fn new(options: Options) -> Result<Logger, Error> {
        let mut builder = Logger::builder()
            .level(options.level)
            .development(options.development);
        if let Some(filter) = options.filter.as_deref() {
            builder = builder.filter(filter);
        }

        let builder = if options.stdout {
            let stdout = if options.console_mode {
                Stdout::default().with_layout(TextLayout::default())
            } else {
                Stdout::default().with_layout(JsonLayout::default())
            };
            builder.append(stdout)
        } else {
            let writer = RollingFileWriter::new(options.rotation_config())?;
            let rolling = if options.console_mode {
                RollingFile::new(writer).with_layout(TextLayout::default().no_color())
            } else {
                RollingFile::new(writer).with_layout(JsonLayout::default())
            };
            builder.append(rolling)
        };

        Ok(builder.build())
    }

    /// A logger writing JSON records of [`Level::Info`] and above to stdout.
    pub fn stdout() -> Logger {
        Logger::builder().build()
    }

    pub(super) fn from_parts(core: Arc<Core>, name: String, fields: Fields) -> Logger {
        Logger { core, name, fields }
    }

    /// The dotted name of this logger. Empty for a root logger.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return a child logger whose name is this logger's name joined with `name` by a dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use logrota::Logger;
    ///
    /// let logger = Logger::stdout().named("payments").named("gateway");
    /// assert_eq!(logger.name(), "payments.gateway");
    /// ```
    pub fn named(&self, name: &str) -> Logger {
        let name = match (self.name.is_empty(), name.is_empty()) {
            (_, true) => self.name.clone(),
            (true, false) => name.to_string(),
            (false, false) => format!("{}.{name}", self.name),
        };
        Logger::from_parts(self.core.clone(), name, self.fields.clone())
    }

    /// Return a child logger that attaches the given key-values to every record.
    pub fn with(&self, kvs: &[(&str, Value<'_>)]) -> Logger {
        Logger::from_parts(self.core.clone(), self.name.clone(), self.fields.extend(kvs))
    }

    /// Whether records of `level` from this logger are written.
    pub fn enabled(&self, level: Level) -> bool {
        self.enabled_for(&self.name, level)
    }

    /// Write a record of `level` if it is enabled, and return the action the caller must take.
    ///
    /// The action is determined by the level alone: [`Level::Panic`] and [`Level::Fatal`]
    /// report it even when the record itself is filtered out.
    ///
    /// # Errors
    ///
    /// Return an error if the record cannot be formatted or written.
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<Action, Error> {
        let location = Location::caller();
        if self.enabled(level) {
            self.emit(level, &self.name, location.file(), location.line(), msg, kvs)?;
        }
        Ok(level.action(self.core.development))
    }

    pub(crate) fn emit(
        &self,
        level: Level,
        target: &str,
        file: &str,
        line: u32,
        msg: &str,
        kvs: &[(&str, Value<'_>)],
    ) -> Result<(), Error> {
        let record = Record::builder()
            .time(SystemTime::now())
            .level(level)
            .target(target)
            .file(file)
            .line(line)
            .payload(msg)
            .fields(&self.fields)
            .key_values(kvs)
            .build();
        self.core.append.append(&record)
    }

    pub(crate) fn enabled_for(&self, target: &str, level: Level) -> bool {
        match &self.core.filter {
            Some(filter) => filter.enabled(target, level),
            None => level >= self.core.level,
        }
    }

    pub(crate) fn trap(&self, err: &Error) {
        self.core.trap.trap(err);
    }

    /// Log a message at [`Level::Debug`].
    #[track_caller]
    pub fn debug(&self, msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<(), Error> {
        self.log(Level::Debug, msg, kvs).map(|_| ())
    }

    /// Log a message at [`Level::Info`].
    #[track_caller]
    pub fn info(&self, msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<(), Error> {
        self.log(Level::Info, msg, kvs).map(|_| ())
    }

    /// Log a message at [`Level::Warn`].
    #[track_caller]
    pub fn warn(&self, msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<(), Error> {
        self.log(Level::Warn, msg, kvs).map(|_| ())
    }

    /// Log a message at [`Level::Error`].
    #[track_caller]
    pub fn error(&self, msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<(), Error> {
        self.log(Level::Error, msg, kvs).map(|_| ())
    }

    /// Log a message at [`Level::DPanic`]. In development mode the returned action is
    /// [`Action::Panic`].
    #[track_caller]
    pub fn dpanic(&self, msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<Action, Error> {
        self.log(Level::DPanic, msg, kvs)
    }

    /// Log a message at [`Level::Panic`]. The returned action is [`Action::Panic`].
    #[track_caller]
    pub fn panic(&self, msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<Action, Error> {
        self.log(Level::Panic, msg, kvs)
    }

    /// Log a message at [`Level::Fatal`]. The returned action is [`Action::Exit`].
    #[track_caller]
    pub fn fatal(&self, msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<Action, Error> {
        self.log(Level::Fatal, msg, kvs)
    }

    /// Flush buffered records of the appender.
    pub fn flush(&self) -> Result<(), Error> {
        self.core.append.flush()
    }

    /// Flush and sync the appender to durable storage.
    pub fn sync(&self) -> Result<(), Error> {
        self.core.append.sync()
    }
}
