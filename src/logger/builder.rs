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

use std::sync::Arc;

use crate::Append;
use crate::Logger;
use crate::Trap;
use crate::append::Stdout;
use crate::filter::EnvFilter;
use crate::kv::Fields;
use crate::logger::log_impl::Core;
use crate::record::Level;
use crate::trap::DefaultTrap;

/// A builder for configuring a [`Logger`].
///
/// # Examples
///
/// ```
/// use logrota::Level;
/// use logrota::Logger;
/// use logrota::append::Stdout;
/// use logrota::layout::TextLayout;
///
/// let logger = Logger::builder()
///     .level(Level::Debug)
///     .append(Stdout::default().with_layout(TextLayout::default()))
///     .build();
/// ```
#[must_use = "call `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    level: Level,
    filter: Option<EnvFilter>,
    append: Option<Box<dyn Append>>,
    trap: Box<dyn Trap>,
    development: bool,
    name: String,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            level: Level::Info,
            filter: None,
            append: None,
            trap: Box::new(DefaultTrap::default()),
            development: false,
            name: String::new(),
        }
    }
}

impl LoggerBuilder {
    /// Set the minimum enabled level.
    ///
    /// Default to [`Level::Info`]. Ignored when a [`filter`](LoggerBuilder::filter) is set.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Filter records by logger name with `RUST_LOG`-style directives.
    pub fn filter(mut self, filter: impl Into<EnvFilter>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the appender that receives the records.
    ///
    /// Default to [`Stdout`] with a JSON layout.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.append = Some(append.into());
        self
    }

    /// Set the trap for errors that cannot be returned to a caller, e.g., records forwarded
    /// from the `log` crate.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// In development mode, [`Level::DPanic`] records ask the caller to panic.
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Set the name of the logger.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        let LoggerBuilder {
            level,
            filter,
            append,
            trap,
            development,
            name,
        } = self;

        let append = append.unwrap_or_else(|| Box::new(Stdout::default()));
        Logger::from_parts(
            Arc::new(Core {
                level,
                filter,
                append,
                trap,
                development,
            }),
            name,
            Fields::default(),
        )
    }
}
