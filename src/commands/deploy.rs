//! Deploy command implementation
//!
//! Build-then-deploy dispatcher: after a successful build the transfer
//! deployment is attempted, and every transfer-related failure (including
//! absent credentials) degrades to the manual packaging fallback. Only a
//! missing build tool or a failed build exits nonzero.

use std::path::{Path, PathBuf};

use console::style;

use crate::archive;
use crate::build;
use crate::config::{self, TransferCredentials};
use crate::error::Result;
use crate::supervisor;
use crate::system::SystemProfile;
use crate::transfer;

/// Run the build-then-deploy flow
pub fn run(project: Option<PathBuf>) -> Result<()> {
    let root = super::resolve_root(project)?;

    println!("{}", style("Site deployment started").bold());
    let profile = SystemProfile::detect();
    println!("Detected OS: {} ({})", profile.os.name(), profile.arch);
    println!("{}", "=".repeat(60));

    // Fatal preconditions: the build tool and the build itself
    let npm_version = build::check_build_tool(&profile)?;
    println!(
        "{} npm found (version {})",
        style("ok:").green().bold(),
        npm_version
    );
    build::build(&root, &profile)?;

    let _ = dotenvy::from_path(root.join(config::CONFIG_FILE));

    println!();
    println!("Attempting automatic transfer deployment...");
    let transferred = attempt_transfer(&root);

    if !transferred {
        match archive::create_deploy_package(&root) {
            Ok(package) => print_manual_instructions(&package),
            Err(e) => eprintln!(
                "{} could not create the deployment package: {}",
                style("warning:").yellow().bold(),
                e
            ),
        }
    }

    println!();
    build::report_artifacts(&root);
    println!("{}", "=".repeat(60));
    println!("Deployment finished");
    Ok(())
}

/// Try the automated transfer; false means "fall back to manual packaging"
fn attempt_transfer(root: &Path) -> bool {
    let Some(credentials) = TransferCredentials::from_env() else {
        transfer::print_credentials_guidance();
        println!("Transfer not attempted.");
        return false;
    };

    match transfer::deploy_via_ftp(root, &credentials) {
        Ok(()) => {
            println!(
                "{} Automatic deployment completed",
                style("ok:").green().bold()
            );
            match &credentials.domain {
                Some(domain) => {
                    println!("Opening {}", domain);
                    supervisor::open_browser(domain);
                }
                None => {
                    println!("Add DEPLOY_DOMAIN=https://yourdomain.com to .env to open the site automatically");
                }
            }
            true
        }
        Err(e) => {
            eprintln!(
                "{} transfer deployment failed: {}",
                style("warning:").yellow().bold(),
                e
            );
            false
        }
    }
}

fn print_manual_instructions(package: &Path) {
    let name = package
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| package.display().to_string());

    println!();
    println!("Manual deployment instructions");
    println!("==============================");
    println!("1. Log in to your hosting provider's control panel");
    println!("2. Open the file manager and navigate to the web root (public_html)");
    println!("3. Remove any existing site files");
    println!("4. Upload and extract: {}", name);
    println!("5. Make sure the files sit at the web root, then visit your domain");
}
