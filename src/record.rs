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

//! Log record, levels and post-log actions.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::Deserialize;
use serde::Deserializer;

use crate::Error;
use crate::ErrorKind;
use crate::kv::Fields;
use crate::kv::Key;
use crate::kv::Value;
use crate::kv::Visitor;

/// An enum representing the available severity levels of the logger.
///
/// Levels are ordered by severity: `Debug` is the least severe, `Fatal` the most.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Designates voluminous diagnostics, usually disabled in production.
    Debug,
    /// Designates useful information. The default level.
    #[default]
    Info,
    /// Designates hazardous situations that do not need individual human review.
    Warn,
    /// Designates high-priority errors.
    Error,
    /// Designates particularly important errors. In development mode the caller is asked to
    /// panic after the record is written.
    DPanic,
    /// The caller is asked to panic after the record is written.
    Panic,
    /// The caller is asked to terminate the process after the record is written.
    Fatal,
}

impl Level {
    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::DPanic => "DPANIC",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /// The action the caller must take after a record of this level is written.
    pub fn action(&self, development: bool) -> Action {
        match self {
            Level::DPanic if development => Action::Panic,
            Level::Panic => Action::Panic,
            Level::Fatal => Action::Exit,
            _ => Action::Continue,
        }
    }

    pub(crate) fn to_log_level(self) -> log::Level {
        match self {
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error | Level::DPanic | Level::Panic | Level::Fatal => log::Level::Error,
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;
    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for (name, level) in [
            ("debug", Level::Debug),
            ("info", Level::Info),
            ("warn", Level::Warn),
            ("error", Level::Error),
            ("dpanic", Level::DPanic),
            ("panic", Level::Panic),
            ("fatal", Level::Fatal),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(level);
            }
        }

        Err(Error::new(ErrorKind::Config, format!("malformed level: {s:?}")))
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Cow::<'de, str>::deserialize(deserializer)?;
        Level::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// What the caller must do after a record has been written.
///
/// Logging never transfers control by itself. Panic and fatal levels hand back an action that
/// the caller applies, usually with [`Action::perform`].
#[must_use = "panic and fatal records require the caller to act"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do.
    Continue,
    /// The caller must panic.
    Panic,
    /// The caller must terminate the process.
    Exit,
}

impl Action {
    /// Apply the action: return for [`Action::Continue`], panic with `message` for
    /// [`Action::Panic`], and exit the process with status 1 for [`Action::Exit`].
    pub fn perform(self, message: &str) {
        match self {
            Action::Continue => {}
            Action::Panic => panic!("{message}"),
            Action::Exit => std::process::exit(1),
        }
    }
}

/// The payload of a log message.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    // the observed time
    now: SystemTime,

    // the metadata
    level: Level,
    target: &'a str,
    file: &'a str,
    line: u32,

    // the payload
    payload: &'a str,

    // structural logging
    fields: Option<&'a Fields>,
    kvs: &'a [(&'a str, Value<'a>)],
}

impl<'a> Record<'a> {
    /// Returns a new builder.
    pub fn builder() -> RecordBuilder<'a> {
        RecordBuilder::default()
    }

    /// The observed time.
    pub fn time(&self) -> SystemTime {
        self.now
    }

    /// The severity level of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The name of the logger that produced the record. Empty for the root logger.
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// The source file of the call site.
    pub fn file(&self) -> &'a str {
        self.file
    }

    /// The line of the call site.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The message body.
    pub fn payload(&self) -> &'a str {
        self.payload
    }

    /// Visit the logger's context fields followed by the call-site key-values.
    pub fn visit_kvs(&self, visitor: &mut dyn Visitor) -> Result<(), Error> {
        if let Some(fields) = self.fields {
            fields.visit(visitor)?;
        }
        for (k, v) in self.kvs {
            visitor.visit(Key::new(k), v.by_ref())?;
        }
        Ok(())
    }

    /// Return `true` if the record carries any context field or key-value.
    pub fn has_kvs(&self) -> bool {
        self.fields.is_some_and(|f| !f.is_empty()) || !self.kvs.is_empty()
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
}

impl Default for RecordBuilder<'_> {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                now: SystemTime::now(),
                level: Level::Info,
                target: "",
                file: "",
                line: 0,
                payload: "",
                fields: None,
                kvs: &[],
            },
        }
    }
}

impl<'a> RecordBuilder<'a> {
    /// Set [`time`](Record::time).
    pub fn time(mut self, now: SystemTime) -> Self {
        self.record.now = now;
        self
    }

    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`target`](Record::target).
    pub fn target(mut self, target: &'a str) -> Self {
        self.record.target = target;
        self
    }

    /// Set [`file`](Record::file).
    pub fn file(mut self, file: &'a str) -> Self {
        self.record.file = file;
        self
    }

    /// Set [`line`](Record::line).
    pub fn line(mut self, line: u32) -> Self {
        self.record.line = line;
        self
    }

    /// Set [`payload`](Record::payload).
    pub fn payload(mut self, payload: &'a str) -> Self {
        self.record.payload = payload;
        self
    }

    /// Set the context fields.
    pub fn fields(mut self, fields: &'a Fields) -> Self {
        self.record.fields = Some(fields);
        self
    }

    /// Set the call-site key-values.
    pub fn key_values(mut self, kvs: &'a [(&'a str, Value<'a>)]) -> Self {
        self.record.kvs = kvs;
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record<'a> {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering_and_parse() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::DPanic);
        assert!(Level::Panic < Level::Fatal);
        assert_eq!(Level::default(), Level::Info);

        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("dpanic".parse::<Level>().unwrap(), Level::DPanic);
        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_level_actions() {
        assert_eq!(Level::Error.action(false), Action::Continue);
        assert_eq!(Level::DPanic.action(false), Action::Continue);
        assert_eq!(Level::DPanic.action(true), Action::Panic);
        assert_eq!(Level::Panic.action(false), Action::Panic);
        assert_eq!(Level::Fatal.action(false), Action::Exit);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_perform_panic() {
        Action::Panic.perform("boom");
    }

    #[test]
    fn test_record_visits_fields_then_kvs() {
        struct Keys(Vec<String>);
        impl Visitor for Keys {
            fn visit(&mut self, key: Key<'_>, _: Value<'_>) -> Result<(), Error> {
                self.0.push(key.to_string());
                Ok(())
            }
        }

        let fields = Fields::default().extend(&[("service", "billing".into())]);
        let kvs = [("user", Value::from("alice"))];
        let record = Record::builder()
            .payload("login")
            .fields(&fields)
            .key_values(&kvs)
            .build();

        let mut keys = Keys(vec![]);
        record.visit_kvs(&mut keys).unwrap();
        assert_eq!(keys.0, vec!["service", "user"]);
        assert!(record.has_kvs());
        assert!(!Record::builder().build().has_kvs());
    }
}
