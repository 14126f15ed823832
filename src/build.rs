//! Frontend build orchestration
//!
//! Builds are never incremental: stale artifacts are removed first so that
//! content-hashed output files cannot accumulate across builds. Cleanup is
//! best-effort; the build itself is not.

use std::path::{Path, PathBuf};
use std::process::Command;

use console::style;
use walkdir::WalkDir;

use crate::common;
use crate::error::{Result, SitectlError};
use crate::system::SystemProfile;
use crate::venv;

/// Build output directory produced by the frontend build tool
pub const DIST_DIR: &str = "dist";

/// Legacy derived-asset directory left behind by earlier builds
pub const LEGACY_ASSETS_DIR: &str = "server/static/assets";

/// Verify the frontend build tool is reachable, returning its version
pub fn check_build_tool(profile: &SystemProfile) -> Result<String> {
    let output = Command::new(profile.npm_program())
        .arg("--version")
        .output()
        .map_err(|e| SitectlError::BuildToolMissing {
            reason: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(SitectlError::BuildToolMissing {
            reason: format!("npm --version exited with {}", output.status),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Remove stale build artifacts
///
/// Deletes the build output directory, the legacy derived-asset directory
/// and cached-bytecode directories outside the runtime environment. Each
/// removal is independently guarded: a failure is reported and skipped, the
/// remaining removals still run.
pub fn clean_artifacts(root: &Path) {
    println!("Cleaning up old build artifacts...");

    remove_dir_reported(&root.join(DIST_DIR));
    remove_dir_reported(&root.join(LEGACY_ASSETS_DIR));

    for dir in bytecode_cache_dirs(root) {
        remove_dir_reported(&dir);
    }

    println!("{} Cleanup completed", style("ok:").green().bold());
}

/// Cached-bytecode directories under the project tree, excluding the
/// runtime environment's own tree
fn bytecode_cache_dirs(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.file_name() != venv::VENV_DIR)
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == "__pycache__")
        .map(|e| e.path().to_path_buf())
        .collect()
}

fn remove_dir_reported(dir: &Path) {
    if !dir.exists() {
        return;
    }
    match std::fs::remove_dir_all(dir) {
        Ok(()) => println!("  Removed {}", dir.display()),
        Err(e) => eprintln!(
            "{} could not remove {}: {}",
            style("warning:").yellow().bold(),
            dir.display(),
            e
        ),
    }
}

/// Clean stale artifacts and run the frontend build
///
/// The build tool is invoked synchronously with captured output; a nonzero
/// exit raises a build failure carrying the captured diagnostics. On success
/// the generated files are reported with human-readable sizes.
pub fn build(root: &Path, profile: &SystemProfile) -> Result<()> {
    clean_artifacts(root);

    println!("Building frontend...");
    let output = Command::new(profile.npm_program())
        .args(["run", "build"])
        .current_dir(root)
        .output()
        .map_err(|e| SitectlError::BuildToolMissing {
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        if diagnostics.trim().is_empty() {
            diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
        }
        eprintln!("{} frontend build failed:", style("error:").red().bold());
        eprintln!("{}", diagnostics);
        return Err(SitectlError::BuildFailed {
            output: diagnostics,
        });
    }

    println!("{} Frontend built", style("ok:").green().bold());
    report_artifacts(root);
    Ok(())
}

/// Print every generated file with its human-readable size
pub fn report_artifacts(root: &Path) {
    let dist = root.join(DIST_DIR);
    if !dist.exists() {
        return;
    }
    let files = common::collect_files(&dist);
    println!("Generated {} file(s) under {}:", files.len(), dist.display());
    for file in &files {
        println!(
            "  {} ({})",
            file.relative.display(),
            common::human_size(file.size)
        );
    }
}
