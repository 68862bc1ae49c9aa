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

//! Rotation and retention through the public writer API.

use std::fs;
use std::io::Write;
use std::path::Path;

use logrota::append::rolling_file::ArchiveNamer;
use logrota::append::rolling_file::RollingFileWriter;
use logrota::append::rolling_file::RotationConfig;
use tempfile::TempDir;

fn archive_names(dir: &Path) -> Vec<String> {
    let namer = ArchiveNamer::new(&dir.join("app.log"), false).unwrap();
    let mut names = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| {
            let filename = entry.ok()?.file_name().to_str()?.to_string();
            namer.parse_timestamp(&filename).ok()?;
            Some(filename)
        })
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn test_max_backups_limits_archive_count() {
    // Create a temporary directory for our test
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let max_backups = 3;

    let mut writer = RollingFileWriter::builder(temp_dir.path().join("app.log"))
        .local_time(false)
        .max_file_size(100)
        .max_backups(max_backups)
        .build()
        .unwrap();

    // Write enough data to rotate many times
    for i in 0..50 {
        let data = format!("Log entry {i:02}: {}\n", "A".repeat(50));
        writer.write_all(data.as_bytes()).unwrap();
        writer.flush().unwrap();
    }
    writer.close().unwrap();

    let archives = archive_names(temp_dir.path());
    assert_eq!(archives.len(), max_backups, "archives: {archives:?}");

    // the newest archives survive
    let last = fs::read_to_string(temp_dir.path().join(&archives[max_backups - 1])).unwrap();
    assert!(last.contains("Log entry 47"), "{last}");
}

#[test]
fn test_foreign_files_survive_retention() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    fs::write(temp_dir.path().join("notes.txt"), b"keep me").unwrap();
    fs::write(temp_dir.path().join("app-backup.log"), b"keep me too").unwrap();

    let writer = RollingFileWriter::new(RotationConfig {
        path: temp_dir.path().join("app.log"),
        max_size_bytes: 10,
        max_backups: 1,
        use_local_time: false,
        ..RotationConfig::default()
    })
    .unwrap();

    for _ in 0..5 {
        writer.write(b"0123456789").unwrap();
    }
    writer.close().unwrap();

    assert_eq!(archive_names(temp_dir.path()).len(), 1);
    assert!(temp_dir.path().join("notes.txt").exists());
    assert!(temp_dir.path().join("app-backup.log").exists());
}

#[test]
fn test_missing_directory_is_created() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("nested").join("logs").join("app.log");

    let writer = RollingFileWriter::builder(&path).build().unwrap();
    writer.write(b"hello\n").unwrap();
    writer.close().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
}

#[test]
fn test_active_file_removed_externally() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("app.log");

    let writer = RollingFileWriter::builder(&path)
        .local_time(false)
        .build()
        .unwrap();
    writer.write(b"gone").unwrap();
    writer.close().unwrap();
    fs::remove_file(&path).unwrap();

    writer.rotate().unwrap();
    writer.write(b"fresh").unwrap();
    writer.close().unwrap();

    assert!(archive_names(temp_dir.path()).is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
}

#[test]
fn test_unusable_directory_fails_construction() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let file = temp_dir.path().join("not-a-dir");
    fs::write(&file, b"").unwrap();

    // a regular file cannot act as the log directory
    let err = RollingFileWriter::builder(file.join("app.log"))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), logrota::ErrorKind::Config);
}
