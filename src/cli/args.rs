//! CLI argument definitions using clap
//!
//! Usage:
//! - arrowgate
//! - arrowgate --port 8080
//! - arrowgate --no-rest
//! - arrowgate --load data/flights.csv --load data/airports.csv

use clap::Parser;
use std::path::PathBuf;

/// arrowgate - serve SQL query results as JSON or Arrow over HTTP
#[derive(Parser, Debug)]
#[command(name = "arrowgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TCP port to bind
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Disable the HTTP query protocol (liveness-probe-only mode)
    #[arg(long)]
    pub no_rest: bool,

    /// Disable the WebSocket query channel
    #[arg(long)]
    pub no_socket: bool,

    /// CSV file to register as a table (name taken from the file stem);
    /// repeatable
    #[arg(long, value_name = "FILE")]
    pub load: Vec<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
