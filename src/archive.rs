//! Manual-deployment packaging
//!
//! When automated transfer is unavailable the build output is packaged into
//! a single gzip-compressed tarball, preserving relative paths, so it can be
//! uploaded and extracted by hand.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::build::DIST_DIR;
use crate::common;
use crate::error::{Result, SitectlError};

/// Archive file written to the project root
pub const PACKAGE_NAME: &str = "site-deploy.tar.gz";

/// Package every file of the build output into the deployment archive
///
/// Returns the archive path. Fails when the build output directory is
/// missing or the archive cannot be written.
pub fn create_deploy_package(root: &Path) -> Result<PathBuf> {
    let dist = root.join(DIST_DIR);
    if !dist.exists() {
        return Err(SitectlError::BuildOutputMissing {
            path: dist.display().to_string(),
        });
    }

    let package_path = root.join(PACKAGE_NAME);
    let package_error = |e: &dyn std::fmt::Display| SitectlError::PackageFailed {
        path: package_path.display().to_string(),
        reason: e.to_string(),
    };

    println!("Creating deployment package...");
    let file = File::create(&package_path).map_err(|e| package_error(&e))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for entry in common::collect_files(&dist) {
        builder
            .append_path_with_name(&entry.path, &entry.relative)
            .map_err(|e| package_error(&e))?;
        println!("  Added: {}", entry.relative.display());
    }

    builder
        .into_inner()
        .and_then(|encoder| encoder.finish())
        .map_err(|e| package_error(&e))?;

    println!("Deployment package created: {}", package_path.display());
    Ok(package_path)
}
