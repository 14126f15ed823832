//! Backend and frontend dependency installation
//!
//! Either manifest may be absent; absence skips that install. A failing
//! install command is fatal because the dependency state must be assumed
//! inconsistent afterwards.

use std::path::Path;
use std::process::Command;

use console::style;

use crate::error::{Result, SitectlError};
use crate::system::SystemProfile;
use crate::venv;

/// Backend dependency manifest
pub const BACKEND_MANIFEST: &str = "requirements.txt";

/// Frontend dependency manifest
pub const FRONTEND_MANIFEST: &str = "package.json";

/// Install declared backend and frontend dependencies
pub fn install(root: &Path, profile: &SystemProfile) -> Result<()> {
    println!("Installing dependencies...");

    let requirements = root.join(BACKEND_MANIFEST);
    if requirements.exists() {
        println!("Installing backend dependencies into the runtime environment...");
        let interpreter = profile.venv_interpreter(&venv::venv_dir(root));
        run_install(
            Command::new(&interpreter)
                .args(["-m", "pip", "install", "-r", BACKEND_MANIFEST])
                .current_dir(root),
            BACKEND_MANIFEST,
        )?;
        println!("{} Backend dependencies installed", style("ok:").green().bold());
    }

    let package_json = root.join(FRONTEND_MANIFEST);
    if package_json.exists() {
        println!("Installing frontend dependencies...");
        run_install(
            Command::new(profile.npm_program())
                .arg("install")
                .current_dir(root),
            FRONTEND_MANIFEST,
        )?;
        println!("{} Frontend dependencies installed", style("ok:").green().bold());
    }

    Ok(())
}

fn run_install(command: &mut Command, manifest: &str) -> Result<()> {
    let status = command
        .status()
        .map_err(|e| SitectlError::DependencyInstallFailed {
            manifest: manifest.to_string(),
            reason: e.to_string(),
        })?;
    if !status.success() {
        return Err(SitectlError::DependencyInstallFailed {
            manifest: manifest.to_string(),
            reason: format!("install command exited with {}", status),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::OsFamily;
    use tempfile::TempDir;

    #[test]
    fn test_absent_manifests_are_skipped() {
        let temp = TempDir::new().unwrap();
        let profile = SystemProfile::for_os(OsFamily::Linux);
        // No requirements.txt, no package.json: nothing to do, no error.
        install(temp.path(), &profile).unwrap();
    }
}
