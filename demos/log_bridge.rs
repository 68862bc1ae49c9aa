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

//! An example of routing records of the `log` crate to a rolling file.

use logrota::Options;

fn main() {
    logrota::set_options(
        Options::default()
            .filename("logs/bridge.log")
            .max_size_mb(10)
            .filter("info,log_bridge=trace"),
    )
    .unwrap();
    logrota::bridge::setup_log_crate();

    log::error!("Hello error!");
    log::warn!(attempt = 3; "Hello warn!");
    log::info!("Hello info!");
    log::debug!("Hello debug!");
    log::trace!("Hello trace!");

    log::logger().flush();
}
