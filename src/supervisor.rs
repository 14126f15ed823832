//! Content server process supervision
//!
//! Owns the single child-process handle for the content server. The
//! supervisor is shared with the signal handler behind `Arc<Mutex<..>>`, and
//! its `Drop` impl funnels normal exit and error unwinds into the same
//! guarded shutdown routine, so the interrupt path, the termination path and
//! the exit path all converge without leaving an orphaned child.

use std::path::Path;
use std::process::{Child, Command, ExitStatus};
use std::time::{Duration, Instant};

use console::style;

use crate::config::AppConfig;
use crate::error::{Result, SitectlError};
use crate::system::SystemProfile;
use crate::venv;

/// Bounded wait for graceful termination before force-killing
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Lifecycle of the supervised child
///
/// `NotStarted -> Running -> {TerminatedGracefully | ForceKilled | Reaped}`.
/// The terminal states are absorbing: `shutdown` is a no-op in any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    NotStarted,
    Running,
    /// Exited within the grace period after the termination request
    TerminatedGracefully,
    /// Had to be force-killed after the grace period elapsed
    ForceKilled,
    /// Exited on its own and was reaped
    Reaped,
}

/// Supervisor holding the single content-server child handle
pub struct ProcessSupervisor {
    child: Option<Child>,
    state: SupervisorState,
    grace: Duration,
}

impl ProcessSupervisor {
    pub fn new() -> Self {
        Self {
            child: None,
            state: SupervisorState::NotStarted,
            grace: SHUTDOWN_GRACE,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Launch the content server, recording the handle
    ///
    /// At most one live child is allowed per supervisor.
    pub fn start(&mut self, mut command: Command) -> Result<()> {
        if self.child.is_some() {
            return Err(SitectlError::ServerSpawnFailed {
                reason: "a content server is already running".to_string(),
            });
        }
        let child = command.spawn().map_err(|e| SitectlError::ServerSpawnFailed {
            reason: e.to_string(),
        })?;
        self.child = Some(child);
        self.state = SupervisorState::Running;
        Ok(())
    }

    /// Check whether the child has exited, reaping it if so
    pub fn poll(&mut self) -> Result<Option<ExitStatus>> {
        let Some(child) = self.child.as_mut() else {
            return Ok(None);
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                self.child = None;
                self.state = SupervisorState::Reaped;
                Ok(Some(status))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(SitectlError::ServerWaitFailed {
                reason: e.to_string(),
            }),
        }
    }

    /// Shut the content server down
    ///
    /// No-op unless the child is currently running. Requests graceful
    /// termination, waits up to the grace period, then force-kills. Safe to
    /// call any number of times from any trigger path.
    pub fn shutdown(&mut self) {
        if self.state != SupervisorState::Running {
            return;
        }
        let Some(mut child) = self.child.take() else {
            self.state = SupervisorState::Reaped;
            return;
        };

        // Already exited on its own: just reap
        if let Ok(Some(_)) = child.try_wait() {
            self.state = SupervisorState::Reaped;
            return;
        }

        println!("Shutting down the content server...");
        request_terminate(&mut child);

        let deadline = Instant::now() + self.grace;
        loop {
            if let Ok(Some(_)) = child.try_wait() {
                self.state = SupervisorState::TerminatedGracefully;
                println!("{} Server shutdown complete", style("ok:").green().bold());
                return;
            }
            if Instant::now() >= deadline {
                eprintln!(
                    "{} server did not stop in time, force killing...",
                    style("warning:").yellow().bold()
                );
                let _ = child.kill();
                let _ = child.wait();
                self.state = SupervisorState::ForceKilled;
                println!("{} Server force stopped", style("ok:").green().bold());
                return;
            }
            std::thread::sleep(Duration::from_millis(100));
        }
    }
}

impl Default for ProcessSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProcessSupervisor {
    // Exit hook: runs on normal scope exit and on error unwinds alike
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Ask the child to terminate gracefully
#[cfg(unix)]
fn request_terminate(child: &mut Child) {
    // SAFETY: plain kill(2) on the recorded child pid
    unsafe {
        libc::kill(child.id() as i32, libc::SIGTERM);
    }
}

#[cfg(not(unix))]
fn request_terminate(child: &mut Child) {
    let _ = child.kill();
}

/// Resolve the command that runs the content server
///
/// Projects carrying a backend entry script get it launched through the
/// runtime environment's interpreter; otherwise the built-in server is run
/// by re-invoking this executable with the `serve` subcommand.
pub fn server_command(root: &Path, profile: &SystemProfile, config: &AppConfig) -> Result<Command> {
    let entry = root.join(&config.backend_entry);
    if entry.exists() {
        let interpreter = profile.venv_interpreter(&venv::venv_dir(root));
        let mut command = Command::new(interpreter);
        command.arg(&config.backend_entry).current_dir(root);
        Ok(command)
    } else {
        let exe = std::env::current_exe().map_err(|e| SitectlError::ServerSpawnFailed {
            reason: format!("cannot locate own executable: {}", e),
        })?;
        let mut command = Command::new(exe);
        command.arg("serve").current_dir(root);
        Ok(command)
    }
}

/// Best-effort browser open; failure only prints a note
pub fn open_browser(url: &str) {
    if webbrowser::open(url).is_err() {
        println!("Open {} in your browser", url);
    }
}
