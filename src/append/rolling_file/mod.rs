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

//! Appender for writing log records to rolling files.
//!
//! The active file keeps its configured name. Once it reaches the size limit, it is renamed to a
//! timestamped archive next to it and a fresh file takes its place. Archives beyond the
//! configured count or age are deleted after each rotation.
//!
//! # Example
//!
//!```
//! use logrota::append::rolling_file::RollingFile;
//! use logrota::append::rolling_file::RollingFileWriter;
//! use logrota::layout::TextLayout;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let writer = RollingFileWriter::builder(dir.path().join("app.log"))
//!     .max_file_size(100 * 1024 * 1024)
//!     .max_age_days(7)
//!     .max_backups(10)
//!     .build()
//!     .unwrap();
//!
//! let appender = RollingFile::new(writer).with_layout(TextLayout::default().no_color());
//! ```

pub use append::RollingFile;
pub use config::RotationConfig;
pub use namer::ArchiveEntry;
pub use namer::ArchiveNamer;
pub use policy::RotationPolicy;
pub use rolling::RollingFileWriter;
pub use rolling::RollingFileWriterBuilder;
pub use rotation::Rotation;
pub use sweep::RetentionSweeper;
pub use sweep::SweepReport;

mod append;
mod clock;
mod config;
mod namer;
mod policy;
mod rolling;
mod rotation;
mod sweep;
