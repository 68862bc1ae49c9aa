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

use std::fmt::Write;

#[cfg(feature = "colored")]
use colored::Color;
#[cfg(feature = "colored")]
use colored::Colorize;
use jiff::tz::TimeZone;

use crate::Error;
use crate::ErrorKind;
use crate::layout::Layout;
use crate::layout::format_caller;
use crate::layout::format_time;
use crate::layout::json::KvCollector;
use crate::layout::json::KvObject;
use crate::record::Level;
use crate::record::Record;

/// A layout that formats log records as human-readable, tab-separated text.
///
/// Output format:
///
/// ```text
/// 2024-08-11 22:44:57.172	INFO	payments	src/main.rs:51	charged	{"amount":42}
/// 2024-08-11 22:44:57.172	WARN	src/main.rs:52	retrying
/// ```
///
/// The logger name is omitted for the root logger, and the trailing JSON object only appears
/// when the record carries fields.
///
/// With the `colored` feature (on by default), levels are colored unless
/// [`no_color`](TextLayout::no_color) is set.
#[derive(Default, Debug, Clone)]
pub struct TextLayout {
    #[cfg(feature = "colored")]
    colors: LevelColor,
    no_color: bool,
    tz: Option<TimeZone>,
}

impl TextLayout {
    /// Customize the color of each log level.
    #[cfg(feature = "colored")]
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logrota::layout::TextLayout;
    ///
    /// let layout = TextLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    fn format_level(&self, level: Level) -> String {
        #[cfg(feature = "colored")]
        {
            if !self.no_color {
                return level.as_str().color(self.colors.color(level)).to_string();
            }
        }

        level.as_str().to_string()
    }
}

/// Customize the color of each log level.
#[cfg(feature = "colored")]
#[derive(Debug, Clone)]
pub struct LevelColor {
    /// Color for debug level logs.
    pub debug: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for warn level logs.
    pub warn: Color,
    /// Color for error level logs.
    pub error: Color,
    /// Color for dpanic, panic and fatal level logs.
    pub fatal: Color,
}

#[cfg(feature = "colored")]
impl Default for LevelColor {
    fn default() -> Self {
        Self {
            debug: Color::Blue,
            info: Color::Green,
            warn: Color::Yellow,
            error: Color::Red,
            fatal: Color::Magenta,
        }
    }
}

#[cfg(feature = "colored")]
impl LevelColor {
    fn color(&self, level: Level) -> Color {
        match level {
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Warn => self.warn,
            Level::Error => self.error,
            Level::DPanic | Level::Panic | Level::Fatal => self.fatal,
        }
    }
}

impl Layout for TextLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut text = format_time(record.time(), self.tz.as_ref())?;
        text.push('\t');
        text.push_str(&self.format_level(record.level()));
        if !record.target().is_empty() {
            text.push('\t');
            text.push_str(record.target());
        }
        write!(text, "\t{}\t{}", format_caller(record), record.payload())
            .map_err(Error::from_fmt_error)?;

        if record.has_kvs() {
            let mut kvs = Vec::new();
            record.visit_kvs(&mut KvCollector { kvs: &mut kvs })?;
            let object = serde_json::to_string(&KvObject(&kvs)).map_err(|err| {
                Error::new(ErrorKind::Format, "failed to serialize fields").with_source(err)
            })?;
            text.push('\t');
            text.push_str(&object);
        }

        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::time::SystemTime;

    use jiff::Timestamp;

    use super::*;
    use crate::kv::Fields;
    use crate::kv::Value;

    #[test]
    fn test_text_layout() {
        let kvs = [("attempt", Value::from(2))];
        let record = Record::builder()
            .time(SystemTime::from(
                Timestamp::from_str("2024-08-10T17:12:52.5Z").unwrap(),
            ))
            .level(Level::Warn)
            .target("payments")
            .file("src/main.rs")
            .line(52)
            .payload("retrying")
            .key_values(&kvs)
            .build();

        let layout = TextLayout::default().no_color().timezone(TimeZone::UTC);
        let line = String::from_utf8(layout.format(&record).unwrap()).unwrap();
        assert_eq!(
            line,
            "2024-08-10 17:12:52.500\tWARN\tpayments\tsrc/main.rs:52\tretrying\t{\"attempt\":2}"
        );

        let record = Record::builder()
            .time(SystemTime::from(
                Timestamp::from_str("2024-08-10T17:12:52Z").unwrap(),
            ))
            .file("src/main.rs")
            .line(1)
            .payload("plain")
            .build();
        let line = String::from_utf8(layout.format(&record).unwrap()).unwrap();
        assert_eq!(line, "2024-08-10 17:12:52.000\tINFO\tsrc/main.rs:1\tplain");
    }

    #[test]
    fn test_text_layout_keeps_field_order() {
        let fields = Fields::default().extend(&[("zeta", Value::from(1))]);
        let kvs = [("alpha", Value::from(2)), ("zeta", Value::from(3))];
        let record = Record::builder()
            .time(SystemTime::from(
                Timestamp::from_str("2024-08-10T17:12:52Z").unwrap(),
            ))
            .file("src/main.rs")
            .line(9)
            .payload("ordered")
            .fields(&fields)
            .key_values(&kvs)
            .build();

        let layout = TextLayout::default().no_color().timezone(TimeZone::UTC);
        let line = String::from_utf8(layout.format(&record).unwrap()).unwrap();
        assert_eq!(
            line,
            "2024-08-10 17:12:52.000\tINFO\tsrc/main.rs:9\tordered\t{\"zeta\":1,\"alpha\":2,\"zeta\":3}"
        );
    }
}
