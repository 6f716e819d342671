//! CLI-specific error types and exit code mapping

use mcp_audit_ai_bom::AiBomError;
use mcp_audit_core::error::AuditError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// AI-BOM input, validation or serialization failure.
    #[error("bom error: {0}")]
    Bom(#[from] AiBomError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file write, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from mcp-audit-core.
    #[error("{0}")]
    Core(#[from] AuditError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                           |
    /// |------|-----------------------------------|
    /// | 0    | Success                           |
    /// | 1    | General / command error           |
    /// | 2    | Configuration error               |
    /// | 4    | BOM input or validation error     |
    /// | 10   | IO error                          |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(AuditError::Config(_)) => 2,
            Self::Bom(_) | Self::Core(AuditError::Bom(_)) => 4,
            Self::Io(_) | Self::Core(AuditError::Io(_)) => 10,
            Self::Command(_) | Self::JsonSerialize(_) => 1,
        }
    }
}
