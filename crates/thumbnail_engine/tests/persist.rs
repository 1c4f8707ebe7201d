use std::fs;

use tempfile::TempDir;
use thumbnail_core::{FailureKind, FailureRecord, FetchMode, FetchTier, ImageHost};
use thumbnail_engine::{FailureReport, OutputDir, PersistError};

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    OutputDir::new(&new_dir).prepare().unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = OutputDir::new(temp.path());

    let first = writer.write_atomic("Favorites.zip", b"first").unwrap();
    assert_eq!(first.file_name().unwrap(), "Favorites.zip");
    assert_eq!(fs::read(&first).unwrap(), b"first");

    let second = writer.write_atomic("Favorites.zip", b"second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"second");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = OutputDir::new(&file_path);
    let result = writer.write_atomic("AllGames.zip", b"data");
    assert!(matches!(result, Err(PersistError::OutputDir { .. })));
    assert!(!file_path.with_file_name("AllGames.zip").exists());
}

#[test]
fn rejects_filenames_with_separators() {
    let temp = TempDir::new().unwrap();
    let writer = OutputDir::new(temp.path());
    for name in ["../escape.zip", "nested/AllGames.zip", ""] {
        let result = writer.write_atomic(name, b"data");
        assert!(
            matches!(result, Err(PersistError::InvalidFilename(_))),
            "{name:?} should be rejected"
        );
    }
}

#[test]
fn failure_report_lists_records() {
    let temp = TempDir::new().unwrap();
    let failures = vec![FailureRecord {
        kind: FailureKind::AllNotFound,
        id: 70,
        name: "Half-Life".into(),
        filename: "Half-Life.jpg".into(),
        requested: FetchTier::Library,
        obtained: None,
        candidate_urls: ImageHost::default().candidate_urls(70),
    }];
    let mode = FetchMode::fallback(FetchTier::Library);
    let report = FailureReport {
        archive_filename: "Favorites.zip",
        mode: &mode,
        packaged: 4,
        generated_utc: "2024-01-01T00:00:00Z",
        failures: &failures,
    };

    let path = report.write(&OutputDir::new(temp.path())).unwrap();
    assert_eq!(path.file_name().unwrap(), "Favorites.failures.json");

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["mode"], "library-fallback");
    assert_eq!(json["packaged"], 4);
    assert_eq!(json["failure_count"], 1);
    assert_eq!(json["failures"][0]["kind"], "all_not_found");
    assert_eq!(json["failures"][0]["obtained"], serde_json::Value::Null);
    assert_eq!(
        json["failures"][0]["candidate_urls"]["header"],
        "https://cdn.akamai.steamstatic.com/steam/apps/70/header.jpg"
    );
}
