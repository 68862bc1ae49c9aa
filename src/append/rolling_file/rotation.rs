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

use jiff::Span;
use jiff::Timestamp;
use jiff::Zoned;
use serde::Deserialize;

/// Time-interval rotation.
///
/// Rotation is size-only by default ([`Rotation::Never`]). An interval additionally rotates the
/// active file once the wall clock crosses the next minute, hour or day boundary after the file
/// was opened.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    /// Minutely Rotation
    Minutely,
    /// Hourly Rotation
    Hourly,
    /// Daily Rotation
    Daily,
    /// No Time Rotation
    #[default]
    Never,
}

impl Rotation {
    /// Return the first interval boundary strictly after `opened_at`, or `None` for
    /// [`Rotation::Never`].
    pub fn next_boundary(&self, opened_at: &Zoned) -> Option<Timestamp> {
        let (rounded, span) = match *self {
            Rotation::Minutely => (
                opened_at.with().second(0).subsec_nanosecond(0).build().ok()?,
                Span::new().minutes(1),
            ),
            Rotation::Hourly => (
                opened_at
                    .with()
                    .minute(0)
                    .second(0)
                    .subsec_nanosecond(0)
                    .build()
                    .ok()?,
                Span::new().hours(1),
            ),
            Rotation::Daily => (opened_at.start_of_day().ok()?, Span::new().days(1)),
            Rotation::Never => return None,
        };

        rounded.checked_add(span).ok().map(|next| next.timestamp())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_next_boundary() {
        let opened_at = Zoned::from_str("2024-08-10T17:12:52+08:00[+08:00]").unwrap();

        assert_eq!(
            Rotation::Minutely.next_boundary(&opened_at),
            Some(Timestamp::from_str("2024-08-10T17:13:00+08:00").unwrap())
        );
        assert_eq!(
            Rotation::Hourly.next_boundary(&opened_at),
            Some(Timestamp::from_str("2024-08-10T18:00:00+08:00").unwrap())
        );
        assert_eq!(
            Rotation::Daily.next_boundary(&opened_at),
            Some(Timestamp::from_str("2024-08-11T00:00:00+08:00").unwrap())
        );
        assert_eq!(Rotation::Never.next_boundary(&opened_at), None);
    }
}
