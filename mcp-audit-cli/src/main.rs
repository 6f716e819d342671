//! mcp-audit -- command-line entry point

use clap::Parser;

use mcp_audit_cli::cli::{Cli, Commands};
use mcp_audit_cli::commands::config::load_config;
use mcp_audit_cli::logging::init_tracing;
use mcp_audit_core::config::GeneralConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // `config` subcommands report load failures themselves; log with defaults there.
    let mut general = match load_config(cli.config.as_deref()).await {
        Ok(config) => config.general,
        Err(e) => {
            if !matches!(cli.command, Commands::Config(_)) {
                eprintln!("Error: {}", e);
                std::process::exit(mcp_audit_cli::error::CliError::from(e).exit_code());
            }
            GeneralConfig::default()
        }
    };
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }

    if let Err(e) = init_tracing(&general) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }
    mcp_audit_core::metrics::describe_all();

    if let Err(e) = mcp_audit_cli::run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
