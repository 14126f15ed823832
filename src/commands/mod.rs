//! Command implementations

pub mod build;
pub mod clean;
pub mod deploy;
pub mod run;
pub mod serve;
pub mod version;

use std::path::PathBuf;

use crate::error::{Result, SitectlError};

/// Resolve the project root a command operates on
pub(crate) fn resolve_root(project: Option<PathBuf>) -> Result<PathBuf> {
    match project {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| SitectlError::ProjectDirFailed {
            reason: e.to_string(),
        }),
    }
}
