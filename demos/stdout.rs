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

//! An example of logging to stdout in console mode.

use logrota::Level;
use logrota::Logger;
use logrota::Options;

fn main() {
    let logger = Logger::new(
        Options::default()
            .stdout(true)
            .console_mode(true)
            .level(Level::Debug),
    )
    .unwrap();

    let logger = logger.named("stdout").with(&[("pid", std::process::id().into())]);
    logger.error("Hello error!", &[]).unwrap();
    logger.warn("Hello warn!", &[("retry", true.into())]).unwrap();
    logger.info("Hello info!", &[]).unwrap();
    logger.debug("Hello debug!", &[("elapsed_ms", 1.5.into())]).unwrap();

    let action = logger.dpanic("Hello dpanic!", &[]).unwrap();
    action.perform("Hello dpanic!");
}
