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

//! An example of logging to rolling files in JSON format.

use logrota::Options;

fn main() {
    logrota::set_options(
        Options::default()
            .filename("logs/my_app.log")
            .max_size_mb(1)
            .max_age_days(7)
            .max_backups(3),
    )
    .unwrap();

    let repeat = 10_000;

    for i in 0..repeat {
        logrota::error("Hello error!", &[("i", i.into())]).unwrap();
        logrota::warn("Hello warn!", &[("i", i.into())]).unwrap();
        logrota::info("Hello info!", &[("i", i.into())]).unwrap();
        logrota::debug("Hello debug!", &[("i", i.into())]).unwrap();
    }

    logrota::default_logger().sync().unwrap();
}
