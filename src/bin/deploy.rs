//! sitectl-deploy - deployment dispatcher
//!
//! Separate entry point that builds the site and ships the build output to
//! the hosting provider, falling back to a manual deployment package when
//! automated transfer is not possible.

use sitectl::commands;

fn main() {
    if let Err(e) = commands::deploy::run(None) {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}
