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

//! Layouts for formatting log records.

use std::fmt;
use std::time::SystemTime;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Error;
use crate::ErrorKind;
use crate::record::Record;

mod json;
mod text;

pub use self::json::JsonLayout;
#[cfg(feature = "colored")]
pub use self::text::LevelColor;
pub use self::text::TextLayout;

/// A layout for formatting log records.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Formats a log record into one line, without the trailing newline.
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Render the record time as `YYYY-MM-DD HH:MM:SS.mmm` in `tz`, or the system time zone.
fn format_time(time: SystemTime, tz: Option<&TimeZone>) -> Result<String, Error> {
    let ts = Timestamp::try_from(time).map_err(|err| {
        Error::new(ErrorKind::Format, "record time is out of range").with_source(err)
    })?;
    let zoned = match tz {
        Some(tz) => ts.to_zoned(tz.clone()),
        None => ts.to_zoned(TimeZone::system()),
    };
    Ok(format!(
        "{}.{:03}",
        zoned.strftime("%Y-%m-%d %H:%M:%S"),
        zoned.millisecond()
    ))
}

fn format_caller(record: &Record) -> String {
    format!("{}:{}", record.file(), record.line())
}
