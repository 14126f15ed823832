//! Shared test helpers

use std::path::PathBuf;

use tempfile::TempDir;

/// A disposable project directory for CLI tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory, kept alive for the test's duration
    pub temp: TempDir,
    /// Path to the project root
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp workspace");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }
}
