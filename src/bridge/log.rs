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

//! Bridge the [`log`] crate facade to the default logger.

use crate::Error;
use crate::ErrorKind;
use crate::default_logger;
use crate::kv::Value;
use crate::record::Level;

struct LogCrateLogger(());

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        default_logger().enabled_for(metadata.target(), metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let logger = default_logger();
        let level = Level::from(record.level());
        if !logger.enabled_for(record.target(), level) {
            return;
        }

        // key-values
        let mut kvs = Vec::new();

        struct KeyValueVisitor<'a, 'b> {
            kvs: &'b mut Vec<(log::kv::Key<'a>, log::kv::Value<'a>)>,
        }

        impl<'a> log::kv::VisitSource<'a> for KeyValueVisitor<'a, '_> {
            fn visit_pair(
                &mut self,
                key: log::kv::Key<'a>,
                value: log::kv::Value<'a>,
            ) -> Result<(), log::kv::Error> {
                self.kvs.push((key, value));
                Ok(())
            }
        }

        let mut visitor = KeyValueVisitor { kvs: &mut kvs };
        if let Err(err) = record.key_values().visit(&mut visitor) {
            logger.trap(
                &Error::new(ErrorKind::Format, "failed to collect key-values").with_source(err),
            );
        }

        let new_kvs = kvs
            .iter()
            .map(|(k, v)| (k.as_str(), to_value(v)))
            .collect::<Vec<_>>();

        let message = record.args().to_string();
        let result = logger.emit(
            level,
            record.target(),
            record.file().unwrap_or_default(),
            record.line().unwrap_or_default(),
            &message,
            &new_kvs,
        );
        if let Err(err) = result {
            logger.trap(&err);
        }
    }

    fn flush(&self) {
        let logger = default_logger();
        if let Err(err) = logger.flush() {
            logger.trap(&err);
        }
    }
}

// keep primitive values typed so that they stay numbers and booleans in JSON output
fn to_value<'v>(value: &'v log::kv::Value<'_>) -> Value<'v> {
    if let Some(v) = value.to_bool() {
        Value::from(v)
    } else if let Some(v) = value.to_i64() {
        Value::from(v)
    } else if let Some(v) = value.to_u64() {
        Value::from(v)
    } else if let Some(v) = value.to_f64() {
        Value::from(v)
    } else if let Some(v) = value.to_borrowed_str() {
        Value::from(v)
    } else {
        Value::from_dyn_display(value)
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_logger`] to set up a `LogCrateProxy` and all logs from log
/// crate will be forwarded to the [default logger](crate::default_logger). Records keep their
/// `log` target as logger name, and `trace` records are written as debug.
///
/// This function will set the global maximum log level to `Trace`. To override this, call
/// [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// if logrota::bridge::try_setup_log_crate().is_err() {
///     eprintln!("failed to set up the log crate");
/// }
/// log::info!("forwarded to the default logger");
/// ```
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    static LOGGER: LogCrateLogger = LogCrateLogger(());
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// logrota::bridge::setup_log_crate();
/// ```
pub fn setup_log_crate() {
    try_setup_log_crate().expect(
        "logrota::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
