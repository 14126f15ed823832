//! Run command implementation
//!
//! The full development flow: detect the platform, verify the build tool,
//! provision the runtime environment and configuration, install
//! dependencies, then start the content server under supervision and block
//! until it exits or a shutdown signal arrives.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use console::style;

use crate::build;
use crate::config::{self, AppConfig};
use crate::deps;
use crate::error::{Result, SitectlError};
use crate::supervisor::{self, ProcessSupervisor};
use crate::system::SystemProfile;
use crate::venv;

/// Run the full development flow
pub fn run(project: Option<PathBuf>) -> Result<()> {
    let root = super::resolve_root(project)?;

    println!("{}", style("Site orchestration started").bold());
    let profile = SystemProfile::detect();
    println!("Detected OS: {} ({})", profile.os.name(), profile.arch);
    println!("{}", "=".repeat(60));

    // The supervisor is shared with the signal handler; registering before
    // the provisioning phases means an interrupt received mid-install still
    // converges on the same shutdown routine (a no-op until a child runs).
    let shared = Arc::new(Mutex::new(ProcessSupervisor::new()));
    register_shutdown_handler(&shared)?;

    // Build tool availability is the first required capability
    let npm_version = build::check_build_tool(&profile)?;
    println!(
        "{} npm found (version {})",
        style("ok:").green().bold(),
        npm_version
    );

    venv::ensure_runtime_environment(&root, &profile)?;
    config::ensure_configuration(&root)?;
    let app_config = AppConfig::load(&root);
    deps::install(&root, &profile)?;

    println!("Skipping frontend build - serving live sources in development mode");

    let command = supervisor::server_command(&root, &profile, &app_config)?;
    lock(&shared)?.start(command)?;
    println!("Server starting at {}", app_config.app_url);
    println!("Press Ctrl+C to stop the server gracefully");
    supervisor::open_browser(&app_config.app_url);

    let status = wait_for_exit(&shared)?;
    lock(&shared)?.shutdown();

    println!("{}", "=".repeat(60));
    println!("Server exited with {}", status);
    Ok(())
}

/// Route interrupt and termination signals into the shutdown routine
fn register_shutdown_handler(shared: &Arc<Mutex<ProcessSupervisor>>) -> Result<()> {
    let weak = Arc::downgrade(shared);
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("Received shutdown signal");
        if let Some(shared) = weak.upgrade() {
            if let Ok(mut guard) = shared.lock() {
                guard.shutdown();
            }
        }
        std::process::exit(0);
    })
    .map_err(|e| SitectlError::SignalHandlerFailed {
        reason: e.to_string(),
    })
}

/// Block until the supervised child exits
///
/// Polls instead of holding the lock through a blocking wait so the signal
/// handler can always reach the supervisor.
fn wait_for_exit(shared: &Arc<Mutex<ProcessSupervisor>>) -> Result<ExitStatus> {
    loop {
        {
            let mut guard = lock(shared)?;
            if let Some(status) = guard.poll()? {
                return Ok(status);
            }
        }
        std::thread::sleep(Duration::from_millis(200));
    }
}

fn lock(shared: &Arc<Mutex<ProcessSupervisor>>) -> Result<MutexGuard<'_, ProcessSupervisor>> {
    shared.lock().map_err(|_| SitectlError::SupervisorUnavailable)
}
