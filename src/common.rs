//! Shared helpers for file enumeration and size reporting

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Format a byte count as a human-readable string
///
/// Bytes below 1024 are printed as-is; 1024 and above switch to KB,
/// 1024*1024 and above to MB.
pub fn human_size(bytes: u64) -> String {
    let size = bytes as f64;
    if size < 1024.0 {
        format!("{} B", bytes)
    } else if size < 1024.0 * 1024.0 {
        format!("{:.1} KB", size / 1024.0)
    } else {
        format!("{:.1} MB", size / (1024.0 * 1024.0))
    }
}

/// A file under a directory tree, with its path relative to the tree root
#[derive(Debug, Clone)]
pub struct TreeFile {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub size: u64,
}

/// Enumerate every file under `root`, sorted by relative path
///
/// Directories themselves are not listed. Unreadable entries are skipped.
pub fn collect_files(root: &Path) -> Vec<TreeFile> {
    let mut files: Vec<TreeFile> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let relative = e.path().strip_prefix(root).ok()?.to_path_buf();
            let size = e.metadata().ok()?.len();
            Some(TreeFile {
                path: e.path().to_path_buf(),
                relative,
                size,
            })
        })
        .collect();
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_human_size_bytes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
    }

    #[test]
    fn test_human_size_kilobytes() {
        assert_eq!(human_size(1024), "1.0 KB");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(1024 * 1024 - 1), "1024.0 KB");
    }

    #[test]
    fn test_human_size_megabytes() {
        assert_eq!(human_size(1024 * 1024), "1.0 MB");
        assert_eq!(human_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }

    #[test]
    fn test_collect_files_sorted_with_relative_paths() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("assets")).unwrap();
        std::fs::write(temp.path().join("index.html"), "<html>").unwrap();
        std::fs::write(temp.path().join("assets/app.js"), "console.log(1)").unwrap();

        let files = collect_files(temp.path());
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].relative, PathBuf::from("assets/app.js"));
        assert_eq!(files[1].relative, PathBuf::from("index.html"));
        assert_eq!(files[1].size, 6);
    }

    #[test]
    fn test_collect_files_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let files = collect_files(&temp.path().join("nope"));
        assert!(files.is_empty());
    }
}
