//! Shared helpers for unit tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, content).expect("write test file");
    path
}
