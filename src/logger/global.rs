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

//! The process-wide default logger.
//!
//! It starts as [`Logger::stdout`] and can be replaced at any time. Every call loads the
//! current logger once, so replacing it never disrupts a write in flight.

use std::sync::Arc;
use std::sync::LazyLock;

use arc_swap::ArcSwap;

use crate::Error;
use crate::Logger;
use crate::kv::Value;
use crate::logger::Options;
use crate::record::Action;

static DEFAULT_LOGGER: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(Logger::stdout()));

/// Return the current default logger.
pub fn default_logger() -> Arc<Logger> {
    DEFAULT_LOGGER.load_full()
}

/// Replace the default logger.
///
/// # Examples
///
/// ```
/// use logrota::Level;
/// use logrota::Logger;
///
/// logrota::set_default_logger(Logger::builder().level(Level::Warn).build());
/// logrota::info("not written", &[]).unwrap();
/// ```
pub fn set_default_logger(logger: Logger) {
    DEFAULT_LOGGER.store(Arc::new(logger));
}

/// Replace the default logger with one built from `options`.
///
/// # Errors
///
/// Return an error if the logger cannot be built; the default logger is then left unchanged.
pub fn set_options(options: Options) -> Result<(), Error> {
    set_default_logger(Logger::new(options)?);
    Ok(())
}

/// Return a child of the default logger with the given context fields.
pub fn with(kvs: &[(&str, Value<'_>)]) -> Logger {
    DEFAULT_LOGGER.load().with(kvs)
}

/// Log a message at debug level with the default logger.
#[track_caller]
pub fn debug(msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<(), Error> {
    DEFAULT_LOGGER.load().debug(msg, kvs)
}

/// Log a message at info level with the default logger.
#[track_caller]
pub fn info(msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<(), Error> {
    DEFAULT_LOGGER.load().info(msg, kvs)
}

/// Log a message at warn level with the default logger.
#[track_caller]
pub fn warn(msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<(), Error> {
    DEFAULT_LOGGER.load().warn(msg, kvs)
}

/// Log a message at error level with the default logger.
#[track_caller]
pub fn error(msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<(), Error> {
    DEFAULT_LOGGER.load().error(msg, kvs)
}

/// Log a message at dpanic level with the default logger.
#[track_caller]
pub fn dpanic(msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<Action, Error> {
    DEFAULT_LOGGER.load().dpanic(msg, kvs)
}

/// Log a message at panic level with the default logger.
#[track_caller]
pub fn panic(msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<Action, Error> {
    DEFAULT_LOGGER.load().panic(msg, kvs)
}

/// Log a message at fatal level with the default logger.
#[track_caller]
pub fn fatal(msg: &str, kvs: &[(&str, Value<'_>)]) -> Result<Action, Error> {
    DEFAULT_LOGGER.load().fatal(msg, kvs)
}
