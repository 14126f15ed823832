//! Clean command implementation

use std::path::PathBuf;

use crate::build;
use crate::error::Result;

/// Run artifact cleanup only
pub fn run(project: Option<PathBuf>) -> Result<()> {
    let root = super::resolve_root(project)?;
    build::clean_artifacts(&root);
    println!("Run 'sitectl' without arguments to start the server.");
    Ok(())
}
