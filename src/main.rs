//! vpc-topology command-line entry point.

use clap::Parser;
use vpc_topology::cli::{self, Cli};
use vpc_topology::core::user_friendly_error;

fn main() {
    let cli = Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    cli::init_logging();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
