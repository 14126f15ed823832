//! sitectl - marketing site automation
//!
//! Orchestrates the development loop of the marketing site: runtime
//! environment provisioning, dependency installation, frontend builds and
//! supervised execution of the content server.

use clap::Parser;
use clap::error::ErrorKind;

use sitectl::cli::{Cli, Commands};
use sitectl::commands;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // help/version are not errors; anything else (including an
            // unrecognized subcommand) exits with status 1
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        None | Some(Commands::Run) => commands::run::run(cli.project),
        Some(Commands::Clean) => commands::clean::run(cli.project),
        Some(Commands::Build) => commands::build::run(cli.project),
        Some(Commands::Serve(args)) => commands::serve::run(cli.project, args),
        Some(Commands::Version) => commands::version::run(),
    };

    if let Err(e) = result {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}
