//! mcp-audit CLI library
//!
//! Argument parsing, command handlers and output rendering for the
//! `mcp-audit` binary. Exposed as a library so the handlers can be
//! exercised from integration tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

/// Dispatch a parsed command line.
///
/// Configuration is loaded once here; `config` subcommands reload it
/// themselves so they can report failures instead of aborting.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Explain(args) => commands::explain::execute(args, &writer),
        Commands::Identify(args) => commands::identify::execute(args, &writer),
        Commands::Bom(args) => {
            let config = commands::config::load_config(config_path).await?;
            commands::bom::execute(args, &config, &writer).await
        }
        Commands::Config(args) => commands::config::execute(args, config_path, &writer).await,
    }
}
