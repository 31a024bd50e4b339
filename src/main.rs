//! arrowgate entry point
//!
//! Parses arguments, hands off to the CLI module, prints errors to
//! stderr, exits non-zero on failure. No logic lives here.

use arrowgate::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
