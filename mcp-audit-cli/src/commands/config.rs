//! `mcp-audit config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use mcp_audit_core::config::{AuditConfig, DEFAULT_CONFIG_FILE};
use mcp_audit_core::error::AuditError;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Load the effective configuration.
///
/// An explicit path must exist. Without one, `mcp-audit.toml` is used when
/// present and built-in defaults otherwise.
pub async fn load_config(path: Option<&Path>) -> Result<AuditConfig, AuditError> {
    match path {
        Some(path) => AuditConfig::load(path).await,
        None => AuditConfig::load_or_default(DEFAULT_CONFIG_FILE).await,
    }
}

fn source_label(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_owned())
}

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: Option<&Path>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Load and validate the configuration file, reporting any errors.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails.
async fn execute_validate(config_path: Option<&Path>, writer: &OutputWriter) -> Result<(), CliError> {
    let source = source_label(config_path);
    info!(path = %source, "validating configuration");

    let report = match load_config(config_path).await {
        Ok(_) => ConfigValidationReport {
            source,
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source,
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Display the effective configuration (file + env overrides + defaults).
///
/// # Errors
///
/// Returns `CliError::Core` if loading fails or `CliError::Command` if the section name is invalid.
async fn execute_show(
    config_path: Option<&Path>,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let source = source_label(config_path);
    info!(path = %source, "loading configuration");

    let config = load_config(config_path).await?;

    let config_toml = match section.as_deref() {
        None => to_toml(&config),
        Some("general") => to_toml(&config.general),
        Some("bom") => to_toml(&config.bom),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, bom)",
                other
            )));
        }
    };

    writer.render(&ConfigReport {
        source,
        section,
        config,
        config_toml,
    })
}

fn to_toml<T: Serialize>(value: &T) -> String {
    toml::to_string_pretty(value).unwrap_or_else(|e| format!("(serialization error: {})", e))
}

/// Configuration display report.
///
/// JSON output carries the full effective configuration; text output shows
/// the TOML of the selected section.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub config: AuditConfig,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(payload: &impl Render) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        payload
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_config_report_render_text_section() {
        let config = AuditConfig::default();
        let report = ConfigReport {
            source: "mcp-audit.toml".to_owned(),
            section: Some("bom".to_owned()),
            config_toml: to_toml(&config.bom),
            config,
        };

        let output = render(&report);
        assert!(output.contains("[bom]"), "should show section name");
        assert!(output.contains("include_mcps"), "should show config content");
    }

    #[test]
    fn test_config_report_json_skips_toml() {
        let config = AuditConfig::default();
        let report = ConfigReport {
            source: "test.toml".to_owned(),
            section: None,
            config_toml: to_toml(&config),
            config,
        };

        let parsed = serde_json::to_value(&report).expect("JSON serialization should succeed");
        assert_eq!(parsed["source"].as_str(), Some("test.toml"));
        assert!(parsed.get("section").is_none());
        assert!(parsed.get("config_toml").is_none());
        assert_eq!(parsed["config"]["bom"]["format"].as_str(), Some("json"));
    }

    #[test]
    fn test_full_config_toml_has_both_sections() {
        let toml = to_toml(&AuditConfig::default());
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[bom]"));
    }

    #[test]
    fn test_config_validation_report_valid() {
        let report = ConfigValidationReport {
            source: "mcp-audit.toml".to_owned(),
            valid: true,
            errors: Vec::new(),
        };
        let output = render(&report);
        assert!(output.contains("VALID"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_config_validation_report_invalid() {
        let report = ConfigValidationReport {
            source: "bad.toml".to_owned(),
            valid: false,
            errors: vec!["invalid value for general.log_level".to_owned()],
        };
        let output = render(&report);
        assert!(output.contains("INVALID"));
        assert!(output.contains("general.log_level"));
    }

    #[test]
    fn test_source_label_defaults() {
        assert_eq!(source_label(None), "mcp-audit.toml");
        assert_eq!(source_label(Some(Path::new("/etc/a.toml"))), "/etc/a.toml");
    }

    #[tokio::test]
    async fn test_load_config_explicit_missing_path_fails() {
        let err = load_config(Some(Path::new("/nonexistent/mcp-audit.toml")))
            .await
            .expect_err("explicit path must exist");
        assert!(matches!(err, AuditError::Config(_)));
    }
}
