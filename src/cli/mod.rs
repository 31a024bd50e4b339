//! CLI module for arrowgate
//!
//! One job: parse flags, build an engine, run the server until the
//! process is terminated.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::serve;
pub use errors::{CliError, CliResult};

/// Parse arguments and run the server
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    commands::serve(cli)
}
