//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sitectl - marketing site automation
///
/// Provision the runtime environment, install dependencies, build the
/// frontend and run the content server under supervision.
#[derive(Parser, Debug)]
#[command(
    name = "sitectl",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Build, run and deploy automation for the marketing site",
    long_about = "sitectl automates the development loop of the marketing site: it \
                  provisions an isolated runtime environment, installs backend and \
                  frontend dependencies, builds static assets and supervises the \
                  content server with graceful shutdown.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  sitectl                 start the development server\n    \
                  sitectl clean           remove stale build artifacts\n    \
                  sitectl build           clean and rebuild the frontend\n    \
                  sitectl serve --port 8080\n\n\
                  Deployment uses the separate sitectl-deploy binary."
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'C', global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision, install and run the content server (the default)
    Run,

    /// Remove stale build artifacts only
    Clean,

    /// Clean and build the frontend assets
    Build,

    /// Run the built-in content server in the foreground
    Serve(ServeArgs),

    /// Show version information
    Version,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Bind host (overrides the HOST configuration key)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides the PORT configuration key)
    #[arg(long)]
    pub port: Option<u16>,
}
