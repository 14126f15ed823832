//! Error types and handling for sitectl
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sitectl operations
#[derive(Error, Diagnostic, Debug)]
pub enum SitectlError {
    // Fatal preconditions
    #[error("npm not found: {reason}")]
    #[diagnostic(
        code(sitectl::build::tool_missing),
        help(
            "Install Node.js from https://nodejs.org/ (npm ships with it), \
             restart your terminal and run this command again"
        )
    )]
    BuildToolMissing { reason: String },

    #[error("Frontend build failed")]
    #[diagnostic(
        code(sitectl::build::failed),
        help("Inspect the build output above, fix the reported errors and rebuild")
    )]
    BuildFailed { output: String },

    #[error("Failed to create runtime environment at '{path}': {reason}")]
    #[diagnostic(
        code(sitectl::venv::create_failed),
        help("Check that a Python 3 interpreter with the venv module is on your PATH")
    )]
    VenvCreateFailed { path: String, reason: String },

    #[error("Failed to upgrade pip in the runtime environment: {reason}")]
    #[diagnostic(code(sitectl::venv::pip_upgrade_failed))]
    PipUpgradeFailed { reason: String },

    #[error("Failed to install dependencies from {manifest}: {reason}")]
    #[diagnostic(
        code(sitectl::deps::install_failed),
        help("The dependency state may be inconsistent; fix the error and rerun")
    )]
    DependencyInstallFailed { manifest: String, reason: String },

    // Process supervision
    #[error("Failed to launch the content server: {reason}")]
    #[diagnostic(code(sitectl::server::spawn_failed))]
    ServerSpawnFailed { reason: String },

    #[error("Failed while waiting for the content server: {reason}")]
    #[diagnostic(code(sitectl::server::wait_failed))]
    ServerWaitFailed { reason: String },

    #[error("Server supervisor is unavailable")]
    #[diagnostic(code(sitectl::server::supervisor_unavailable))]
    SupervisorUnavailable,

    #[error("Failed to register shutdown signal handler: {reason}")]
    #[diagnostic(code(sitectl::server::signal_handler_failed))]
    SignalHandlerFailed { reason: String },

    // Content server
    #[error("Content server error: {reason}")]
    #[diagnostic(code(sitectl::serve::failed))]
    ServeFailed { reason: String },

    // Configuration
    #[error("Failed to write configuration file '{path}': {reason}")]
    #[diagnostic(code(sitectl::config::write_failed))]
    ConfigWriteFailed { path: String, reason: String },

    // Deployment
    #[error("Transfer failed: {reason}")]
    #[diagnostic(code(sitectl::transfer::failed))]
    TransferFailed { reason: String },

    #[error("Failed to create deployment package '{path}': {reason}")]
    #[diagnostic(code(sitectl::package::create_failed))]
    PackageFailed { path: String, reason: String },

    #[error("Build output directory not found: {path}")]
    #[diagnostic(
        code(sitectl::package::no_build_output),
        help("Run 'sitectl build' first to produce the build output")
    )]
    BuildOutputMissing { path: String },

    #[error("Failed to resolve project directory: {reason}")]
    #[diagnostic(code(sitectl::fs::project_dir_failed))]
    ProjectDirFailed { reason: String },
}

/// Convenience result type for sitectl operations
pub type Result<T> = std::result::Result<T, SitectlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_build_tool_missing() {
        let err = SitectlError::BuildToolMissing {
            reason: "command not found".to_string(),
        };
        assert!(err.to_string().contains("npm not found"));
    }

    #[test]
    fn test_error_display_names_manifest() {
        let err = SitectlError::DependencyInstallFailed {
            manifest: "requirements.txt".to_string(),
            reason: "exit status 1".to_string(),
        };
        assert!(err.to_string().contains("requirements.txt"));
    }

    #[test]
    fn test_transfer_error_display() {
        let err = SitectlError::TransferFailed {
            reason: "login refused".to_string(),
        };
        assert!(err.to_string().contains("login refused"));
    }
}
