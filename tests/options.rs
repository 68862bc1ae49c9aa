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

use std::fs;

use logrota::ErrorKind;
use logrota::Level;
use logrota::Logger;
use logrota::Options;
use tempfile::TempDir;

#[test]
fn test_options_from_json() {
    let options: Options = serde_json::from_str(
        r#"{
            "filename": "logs/app.log",
            "max_size_mb": 100,
            "max_age_days": 30,
            "max_backups": 7,
            "console_mode": true,
            "level": "DEBUG",
            "filter": "info,payments=debug"
        }"#,
    )
    .unwrap();

    assert_eq!(options.max_size_mb, 100);
    assert_eq!(options.max_backups, 7);
    assert_eq!(options.level, Level::Debug);
    assert_eq!(options.filter.as_deref(), Some("info,payments=debug"));
    assert!(options.local_time);
    assert!(!options.stdout);
}

#[test]
fn test_invalid_level_is_rejected() {
    let result = serde_json::from_str::<Options>(r#"{"level": "verbose"}"#);
    assert!(result.is_err());
}

#[test]
fn test_console_mode_writes_text_lines() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("console.log");

    let logger = Logger::new(Options::default().filename(&path).console_mode(true)).unwrap();
    logger
        .named("payments")
        .info("charged", &[("amount", 42.into())])
        .unwrap();
    logger.debug("below the default level", &[]).unwrap();
    logger.sync().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 1);

    let columns = lines[0].split('\t').collect::<Vec<_>>();
    assert_eq!(columns.len(), 6, "{columns:?}");
    assert_eq!(columns[1], "INFO");
    assert_eq!(columns[2], "payments");
    assert!(columns[3].starts_with("tests/options.rs:"));
    assert_eq!(columns[4], "charged");
    assert_eq!(columns[5], r#"{"amount":42}"#);
}

#[test]
fn test_empty_filename_is_a_config_error() {
    let err = Logger::new(Options::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);

    // stdout bypasses the file entirely
    assert!(Logger::new(Options::default().stdout(true)).is_ok());
}
