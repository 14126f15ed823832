//! Runtime environment provisioning
//!
//! The backend runs from an isolated Python environment under `venv/` in the
//! project root. Creation is a fatal precondition: there is no fallback when
//! the environment cannot be provisioned.

use std::path::{Path, PathBuf};
use std::process::Command;

use console::style;

use crate::error::{Result, SitectlError};
use crate::system::SystemProfile;

/// Directory name of the isolated runtime environment
pub const VENV_DIR: &str = "venv";

/// Path of the runtime environment for a project root
pub fn venv_dir(root: &Path) -> PathBuf {
    root.join(VENV_DIR)
}

/// Ensure the isolated runtime environment exists
///
/// Creates `venv/` with the system interpreter and upgrades its package
/// installer. Idempotent: an existing environment short-circuits without
/// issuing any subprocess call.
pub fn ensure_runtime_environment(root: &Path, profile: &SystemProfile) -> Result<()> {
    let venv = venv_dir(root);
    if venv.exists() {
        return Ok(());
    }

    println!("Creating runtime environment at {}...", venv.display());
    let status = Command::new(profile.system_python())
        .args(["-m", "venv", VENV_DIR])
        .current_dir(root)
        .status()
        .map_err(|e| SitectlError::VenvCreateFailed {
            path: venv.display().to_string(),
            reason: e.to_string(),
        })?;
    if !status.success() {
        return Err(SitectlError::VenvCreateFailed {
            path: venv.display().to_string(),
            reason: format!("{} -m venv exited with {}", profile.system_python(), status),
        });
    }
    println!("{} Runtime environment created", style("ok:").green().bold());

    println!("Upgrading pip in the runtime environment...");
    let interpreter = profile.venv_interpreter(&venv);
    let status = Command::new(&interpreter)
        .args(["-m", "pip", "install", "--upgrade", "pip"])
        .current_dir(root)
        .status()
        .map_err(|e| SitectlError::PipUpgradeFailed {
            reason: e.to_string(),
        })?;
    if !status.success() {
        return Err(SitectlError::PipUpgradeFailed {
            reason: format!("pip upgrade exited with {}", status),
        });
    }
    println!("{} pip upgraded", style("ok:").green().bold());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::OsFamily;
    use tempfile::TempDir;

    #[test]
    fn test_existing_environment_is_left_untouched() {
        let temp = TempDir::new().unwrap();
        let venv = venv_dir(temp.path());
        std::fs::create_dir(&venv).unwrap();

        let profile = SystemProfile::for_os(OsFamily::Linux);
        ensure_runtime_environment(temp.path(), &profile).unwrap();

        // A creation call would have populated the directory; the no-op
        // branch leaves it empty.
        assert_eq!(std::fs::read_dir(&venv).unwrap().count(), 0);
    }

    #[test]
    fn test_idempotent_on_repeated_calls() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(venv_dir(temp.path())).unwrap();

        let profile = SystemProfile::for_os(OsFamily::Linux);
        ensure_runtime_environment(temp.path(), &profile).unwrap();
        ensure_runtime_environment(temp.path(), &profile).unwrap();
        assert_eq!(std::fs::read_dir(venv_dir(temp.path())).unwrap().count(), 0);
    }

    #[test]
    fn test_venv_dir_location() {
        assert_eq!(venv_dir(Path::new("/project")), PathBuf::from("/project/venv"));
    }
}
