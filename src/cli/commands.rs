//! CLI commands
//!
//! `serve` is the only command: build an in-memory engine, register any
//! requested CSV tables, and run the data server on the current thread's
//! runtime until terminated.

use crate::engine::FusionEngine;
use crate::server::{DataServer, ServerConfig};

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Boot the engine and serve until externally terminated
pub fn serve(cli: Cli) -> CliResult<()> {
    let config = ServerConfig {
        rest: !cli.no_rest,
        socket: !cli.no_socket,
        port: cli.port,
        ..Default::default()
    };

    let rt = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;

    rt.block_on(async {
        let engine = FusionEngine::new();

        for path in &cli.load {
            let table = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| CliError::BadTableName(path.display().to_string()))?;
            engine
                .load_csv(table, &path.display().to_string())
                .await
                .map_err(|source| CliError::Load {
                    path: path.display().to_string(),
                    source,
                })?;
        }

        DataServer::with_config(engine, config).start().await?;
        Ok(())
    })
}
