//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// mcp-audit -- MCP configuration risk explanations and AI-BOM generation.
///
/// Use `mcp-audit <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "mcp-audit", version, about, long_about = None)]
pub struct Cli {
    /// Path to the mcp-audit.toml configuration file.
    ///
    /// When omitted, `mcp-audit.toml` is used if present and defaults otherwise.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Explain what a risk flag means and how to remediate it.
    Explain(ExplainArgs),

    /// Identify an AI model from a free-text model string.
    Identify(IdentifyArgs),

    /// Generate a CycloneDX 1.6 AI-BOM from scan results.
    Bom(BomArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- explain ----

/// Explain a risk flag, or list all known flags.
#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Risk flag to explain (e.g., shell-access, filesystem-access).
    pub flag: Option<String>,

    /// List all known risk flags grouped by severity.
    #[arg(short, long)]
    pub list: bool,
}

// ---- identify ----

/// Identify a model and show inferred model-card fields.
#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Model identifier (e.g., gpt-4o-2024-08-06, llama3.1:8b).
    pub model: String,
}

// ---- bom ----

/// Build an AI-BOM from a JSON array of scan results.
#[derive(Args, Debug)]
pub struct BomArgs {
    /// Scan results JSON file.
    pub input: PathBuf,

    /// Document format (overrides `[bom] format`).
    #[arg(short, long)]
    pub format: Option<BomFormatArg>,

    /// Only emit model components (no MCP components).
    #[arg(long)]
    pub no_mcps: bool,

    /// Do not detect models from `env`/`apis` for entries without one.
    #[arg(long)]
    pub no_detect: bool,

    /// Write the document to a file instead of stdout.
    #[arg(short = 'O', long)]
    pub out: Option<PathBuf>,
}

/// BOM document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BomFormatArg {
    /// CycloneDX JSON.
    Json,
    /// Minimal CycloneDX XML.
    Xml,
}

// ---- config ----

/// Manage mcp-audit configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, bom).
        #[arg(long)]
        section: Option<String>,
    },
}
