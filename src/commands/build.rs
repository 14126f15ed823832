//! Build command implementation

use std::path::PathBuf;

use crate::build;
use crate::error::Result;
use crate::system::SystemProfile;

/// Clean stale artifacts and build the frontend
pub fn run(project: Option<PathBuf>) -> Result<()> {
    let root = super::resolve_root(project)?;
    let profile = SystemProfile::detect();
    build::build(&root, &profile)?;
    println!("Build completed. Run 'sitectl' without arguments to start the server.");
    Ok(())
}
