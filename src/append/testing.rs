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
use std::sync::Mutex;

use jiff::tz::TimeZone;

use crate::Error;
use crate::Layout;
use crate::append::Append;
use crate::layout::JsonLayout;
use crate::record::Record;

/// An appender that keeps formatted records in memory, for assertions in tests.
#[derive(Debug, Clone, Default)]
pub(crate) struct Testing {
    records: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl Testing {
    /// The records appended so far, as parsed JSON objects.
    pub(crate) fn records(&self) -> Vec<serde_json::Value> {
        self.records.lock().unwrap().clone()
    }
}

impl Append for Testing {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let line = JsonLayout::default()
            .timezone(TimeZone::UTC)
            .format(record)?;
        let value = serde_json::from_slice(&line).unwrap();
        self.records.lock().unwrap().push(value);
        Ok(())
    }
}
