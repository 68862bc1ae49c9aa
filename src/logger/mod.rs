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

//! The leveled logger, its options and the process-wide default logger.

mod builder;
mod global;
mod log_impl;
mod options;

pub use self::builder::LoggerBuilder;
pub use self::global::debug;
pub use self::global::default_logger;
pub use self::global::dpanic;
pub use self::global::error;
pub use self::global::fatal;
pub use self::global::info;
pub use self::global::panic;
pub use self::global::set_default_logger;
pub use self::global::set_options;
pub use self::global::warn;
pub use self::global::with;
pub use self::log_impl::Logger;
pub use self::options::Options;
