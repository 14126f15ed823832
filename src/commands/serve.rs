//! Serve command implementation

use std::path::PathBuf;

use crate::cli::ServeArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::server;

/// Run the built-in content server in the foreground
pub fn run(project: Option<PathBuf>, args: ServeArgs) -> Result<()> {
    let root = super::resolve_root(project)?;
    let config = AppConfig::load(&root);

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    server::serve(&root, &host, port)
}
