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

//! Leveled, structured logging with size-based log file rotation and retention.
//!
//! # Overview
//!
//! A [`Logger`] formats records with a [`Layout`](layout::Layout) and hands them to an
//! [`Append`]. The [`RollingFileWriter`](append::rolling_file::RollingFileWriter) at the heart
//! of the file appender archives the active log file once it reaches its size limit, and
//! deletes archives beyond the configured count or age.
//!
//! # Examples
//!
//! Log to stdout with the default logger:
//!
//! ```
//! logrota::info("service started", &[("port", 8080.into())]).unwrap();
//! ```
//!
//! Log to a rotating file:
//!
//! ```
//! use logrota::Logger;
//! use logrota::Options;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::new(
//!     Options::default()
//!         .filename(dir.path().join("app.log"))
//!         .max_size_mb(100)
//!         .max_backups(7),
//! )
//! .unwrap();
//!
//! let logger = logger.named("payments").with(&[("region", "eu".into())]);
//! logger.warn("retrying charge", &[("attempt", 2.into())]).unwrap();
//! logger.sync().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod filter;
pub mod kv;
pub mod layout;
pub mod record;
pub mod trap;

mod error;
mod logger;

pub use self::append::Append;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::layout::Layout;
pub use self::logger::*;
pub use self::record::Action;
pub use self::record::Level;
pub use self::trap::Trap;
