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

use jiff::Timestamp;

#[derive(Debug, Clone)]
pub(crate) enum Clock {
    DefaultClock,
    #[cfg(test)]
    ManualClock(ManualClock),
}

impl Clock {
    pub(crate) fn now(&self) -> Timestamp {
        match self {
            Clock::DefaultClock => Timestamp::now(),
            #[cfg(test)]
            Clock::ManualClock(clock) => clock.now(),
        }
    }
}

/// A clock shared between a test and the writer under test.
#[derive(Debug, Clone)]
#[cfg(test)]
pub(crate) struct ManualClock {
    now: std::sync::Arc<std::sync::Mutex<Timestamp>>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new(now: Timestamp) -> ManualClock {
        ManualClock {
            now: std::sync::Arc::new(std::sync::Mutex::new(now)),
        }
    }

    pub(crate) fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }

    pub(crate) fn set_now(&self, now: Timestamp) {
        *self.now.lock().unwrap() = now;
    }

    pub(crate) fn advance(&self, span: jiff::SignedDuration) {
        let mut now = self.now.lock().unwrap();
        *now = now.checked_add(span).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_manual_clock_adjusting() {
        let now = Timestamp::from_str("2023-01-01T12:00:00Z").unwrap();
        let clock = ManualClock::new(now);
        let shared = Clock::ManualClock(clock.clone());
        assert_eq!(shared.now(), now);

        let now = Timestamp::from_str("2024-01-01T12:00:00Z").unwrap();
        clock.set_now(now);
        assert_eq!(shared.now(), now);

        clock.advance(jiff::SignedDuration::from_secs(1));
        assert_eq!(
            shared.now(),
            Timestamp::from_str("2024-01-01T12:00:01Z").unwrap()
        );
    }
}
