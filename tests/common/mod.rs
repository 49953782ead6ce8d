//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Base directory for JSON test fixtures.
pub fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases")
}

/// Load a JSON fixture and deserialize it.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> T {
    let file =
        File::open(path).unwrap_or_else(|e| panic!("failed to open {}: {e}", path.display()));
    serde_json::from_reader(file)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

/// Write a serializable artifact into a directory, returning its path.
pub fn write_artifact<T: Serialize>(dir: &Path, file_name: &str, artifact: &T) -> PathBuf {
    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(artifact).expect("artifact serializes");
    std::fs::write(&path, json).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    path
}
