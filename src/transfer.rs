//! Automated file-transfer deployment
//!
//! Mirrors the build output tree onto the hosting provider's web root over
//! FTP. Any failure inside the attempt is caught at the attempt boundary by
//! the dispatcher and degrades to manual packaging; nothing in here aborts
//! the process.

use std::fs::File;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use suppaftp::FtpStream;

use crate::build::DIST_DIR;
use crate::common;
use crate::config::TransferCredentials;
use crate::error::{Result, SitectlError};

/// Conventional web root on the remote host
const WEB_ROOT: &str = "/public_html";

/// Alternate web root used by some hosts
const WEB_ROOT_FALLBACK: &str = "/htdocs";

fn transfer_error(e: &dyn std::fmt::Display) -> SitectlError {
    SitectlError::TransferFailed {
        reason: e.to_string(),
    }
}

/// Mirror the build output onto the remote web root
///
/// Connects, authenticates, selects the web root (falling back to the
/// alternate convention), then uploads the tree recursively. Remote
/// directories are created as needed; an already-existing directory is not
/// an error.
pub fn deploy_via_ftp(root: &Path, credentials: &TransferCredentials) -> Result<()> {
    let dist = root.join(DIST_DIR);
    if !dist.exists() {
        return Err(SitectlError::BuildOutputMissing {
            path: dist.display().to_string(),
        });
    }

    println!("Connecting to {}...", credentials.host);
    let address = if credentials.host.contains(':') {
        credentials.host.clone()
    } else {
        format!("{}:21", credentials.host)
    };
    let mut ftp = FtpStream::connect(&address).map_err(|e| transfer_error(&e))?;
    ftp.login(&credentials.username, &credentials.password)
        .map_err(|e| transfer_error(&e))?;

    if ftp.cwd(WEB_ROOT).is_err() {
        ftp.cwd(WEB_ROOT_FALLBACK).map_err(|e| transfer_error(&e))?;
    }
    println!("Connected to the transfer server");

    let total = common::collect_files(&dist).len() as u64;
    let progress = upload_progress(total);
    let result = mirror_tree(&mut ftp, &dist, &progress);
    match &result {
        Ok(()) => progress.finish_with_message("uploaded"),
        Err(_) => progress.abandon(),
    }
    result?;

    let _ = ftp.quit();
    println!("Transfer deployment completed");
    Ok(())
}

fn upload_progress(total: u64) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    let progress = ProgressBar::new(total);
    progress.set_style(style);
    progress
}

/// Recursively upload a local directory into the remote working directory
///
/// Files are uploaded in place; for each subdirectory the remote directory
/// is created (already-exists swallowed), entered, mirrored and left again
/// so the remote working directory matches the local one throughout.
fn mirror_tree(ftp: &mut FtpStream, local: &Path, progress: &ProgressBar) -> Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(local)
        .map_err(|e| transfer_error(&e))?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();

        if path.is_file() {
            progress.set_message(name.clone());
            let mut reader = File::open(&path).map_err(|e| transfer_error(&e))?;
            ftp.put_file(&name, &mut reader)
                .map_err(|e| transfer_error(&e))?;
            progress.inc(1);
        } else if path.is_dir() {
            // The directory may already exist remotely from a prior deploy
            let _ = ftp.mkdir(&name);
            ftp.cwd(&name).map_err(|e| transfer_error(&e))?;
            mirror_tree(ftp, &path, progress)?;
            ftp.cdup().map_err(|e| transfer_error(&e))?;
        }
    }

    Ok(())
}

/// Print the `.env` keys required to enable automated transfer
pub fn print_credentials_guidance() {
    println!();
    println!("Transfer configuration");
    println!("======================");
    println!("To enable automatic deployment, add these to your .env file:");
    println!();
    for key in TransferCredentials::REQUIRED_KEYS {
        println!("{}=...", key);
    }
    println!("DEPLOY_DOMAIN=https://yourdomain.com");
    println!();
    println!("Your hosting provider's control panel lists these under FTP accounts.");
}
