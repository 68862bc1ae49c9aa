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

//! The module for key-value pairs in a log record.

use std::fmt;
use std::sync::Arc;

use value_bag::OwnedValueBag;
use value_bag::ValueBag;

use crate::Error;

/// Represents a value in a key-value pair.
pub type Value<'a> = ValueBag<'a>;

/// Represents an owned value, as stored in a logger's context fields.
pub type ValueOwned = OwnedValueBag;

/// Represents a key in a key-value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key<'a>(&'a str);

impl<'a> Key<'a> {
    /// Create a key from a string.
    pub fn new(key: &'a str) -> Self {
        Key(key)
    }

    /// Gets the key string.
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A visitor to walk through key-value pairs.
pub trait Visitor {
    /// Visits a key-value pair.
    fn visit(&mut self, key: Key<'_>, value: Value<'_>) -> Result<(), Error>;
}

/// Context fields attached to a logger with `with`, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Fields(Arc<Vec<(String, ValueOwned)>>);

impl Fields {
    /// Return a copy of these fields extended with the given pairs.
    pub(crate) fn extend(&self, kvs: &[(&str, Value<'_>)]) -> Fields {
        let mut fields = Vec::with_capacity(self.0.len() + kvs.len());
        fields.extend(self.0.iter().map(|(k, v)| (k.clone(), v.by_ref().to_owned())));
        fields.extend(kvs.iter().map(|(k, v)| (k.to_string(), v.to_owned())));
        Fields(Arc::new(fields))
    }

    /// Return the number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if there is no field.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Visit each field in insertion order.
    pub fn visit(&self, visitor: &mut dyn Visitor) -> Result<(), Error> {
        for (k, v) in self.0.iter() {
            visitor.visit(Key::new(k), v.by_ref())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collect(Vec<String>);

    impl Visitor for Collect {
        fn visit(&mut self, key: Key<'_>, value: Value<'_>) -> Result<(), Error> {
            self.0.push(format!("{key}={value}"));
            Ok(())
        }
    }

    #[test]
    fn test_fields_extend_keeps_order() {
        let base = Fields::default().extend(&[("service", "billing".into())]);
        let child = base.extend(&[("attempt", 3.into()), ("ok", true.into())]);

        assert_eq!(base.len(), 1);
        assert_eq!(child.len(), 3);

        let mut collect = Collect(vec![]);
        child.visit(&mut collect).unwrap();
        assert_eq!(collect.0, vec!["service=billing", "attempt=3", "ok=true"]);
    }
}
