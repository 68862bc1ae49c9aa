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

use jiff::tz::TimeZone;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::Error;
use crate::ErrorKind;
use crate::kv::Key;
use crate::kv::Value;
use crate::kv::Visitor;
use crate::layout::Layout;
use crate::layout::format_caller;
use crate::layout::format_time;
use crate::record::Record;

/// A JSON layout for formatting log records.
///
/// Output format:
///
/// ```json
/// {"level":"INFO","ts":"2024-08-11 22:44:57.172","logger":"payments","caller":"src/main.rs:51","msg":"charged","amount":42}
/// {"level":"WARN","ts":"2024-08-11 22:44:57.172","caller":"src/main.rs:52","msg":"retrying"}
/// ```
///
/// `logger` is omitted for the root logger. Context fields and call-site key-values follow
/// `msg` as top-level keys, in the order they were attached.
///
/// # Examples
///
/// ```
/// use logrota::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default();
/// ```
#[derive(Default, Debug, Clone)]
pub struct JsonLayout {
    tz: Option<TimeZone>,
}

impl JsonLayout {
    /// Set the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logrota::layout::JsonLayout;
    ///
    /// let layout = JsonLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

pub(crate) struct KvCollector<'a> {
    pub(crate) kvs: &'a mut Vec<(String, serde_json::Value)>,
}

impl Visitor for KvCollector<'_> {
    fn visit(&mut self, key: Key<'_>, value: Value<'_>) -> Result<(), Error> {
        let key = key.to_string();
        match serde_json::to_value(&value) {
            Ok(value) => self.kvs.push((key, value)),
            Err(_) => self.kvs.push((key, value.to_string().into())),
        };
        Ok(())
    }
}

/// Collected key-values serialized as one JSON object, in the order they were visited.
pub(crate) struct KvObject<'a>(pub(crate) &'a [(String, serde_json::Value)]);

impl Serialize for KvObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct RecordLine<'a> {
    level: &'a str,
    ts: String,
    logger: &'a str,
    caller: String,
    msg: &'a str,
    kvs: Vec<(String, serde_json::Value)>,
}

impl Serialize for RecordLine<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("level", self.level)?;
        map.serialize_entry("ts", &self.ts)?;
        if !self.logger.is_empty() {
            map.serialize_entry("logger", self.logger)?;
        }
        map.serialize_entry("caller", &self.caller)?;
        map.serialize_entry("msg", self.msg)?;
        for (k, v) in &self.kvs {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Layout for JsonLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut kvs = Vec::new();
        record.visit_kvs(&mut KvCollector { kvs: &mut kvs })?;

        let record_line = RecordLine {
            level: record.level().as_str(),
            ts: format_time(record.time(), self.tz.as_ref())?,
            logger: record.target(),
            caller: format_caller(record),
            msg: record.payload(),
            kvs,
        };

        serde_json::to_vec(&record_line).map_err(|err| {
            Error::new(ErrorKind::Format, "failed to serialize log record").with_source(err)
        })
    }
}
