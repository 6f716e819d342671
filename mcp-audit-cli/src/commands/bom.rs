//! `mcp-audit bom` command handler

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use mcp_audit_ai_bom::bom::ComponentType;
use mcp_audit_ai_bom::types::BomFormat;
use mcp_audit_ai_bom::{
    BomBuilder, BomDocument, ConfigModelDetector, attach_detected_models, load_scan_results,
};
use mcp_audit_core::config::AuditConfig;

use crate::cli::{BomArgs, BomFormatArg};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `bom` command.
///
/// Without `--out` the rendered document is written to stdout as-is,
/// regardless of `--output`. With `--out` the document goes to the file
/// and a summary is rendered through `writer`.
pub async fn execute(
    args: BomArgs,
    config: &AuditConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let format = resolve_format(args.format, config)?;
    let include_mcps = config.bom.include_mcps && !args.no_mcps;
    let detect_models = config.bom.detect_models && !args.no_detect;

    let input = args.input.clone();
    let mut results = tokio::task::spawn_blocking(move || load_scan_results(&input))
        .await
        .map_err(|e| CliError::Command(format!("input loading task failed: {}", e)))??;

    let detected = if detect_models {
        attach_detected_models(&ConfigModelDetector::builtin(), &mut results)
    } else {
        0
    };

    let document = BomBuilder::new()
        .include_mcps(include_mcps)
        .build(&results)?;
    let rendered = document.render(format)?;

    match args.out {
        Some(path) => {
            tokio::fs::write(&path, rendered.as_bytes()).await?;
            info!(path = %path.display(), format = %format, "AI-BOM written");

            let summary = BomSummary::new(&document, format, path.display().to_string(), detected);
            writer.render(&summary)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", rendered)?;
        }
    }

    Ok(())
}

/// CLI flag wins over `[bom] format`.
fn resolve_format(arg: Option<BomFormatArg>, config: &AuditConfig) -> Result<BomFormat, CliError> {
    match arg {
        Some(BomFormatArg::Json) => Ok(BomFormat::Json),
        Some(BomFormatArg::Xml) => Ok(BomFormat::Xml),
        None => BomFormat::from_str_loose(&config.bom.format).ok_or_else(|| {
            CliError::Config(format!(
                "bom.format must be json or xml, got '{}'",
                config.bom.format
            ))
        }),
    }
}

/// Summary of a BOM written to a file.
#[derive(Debug, Serialize)]
pub struct BomSummary {
    pub output: String,
    pub format: BomFormat,
    pub serial_number: String,
    pub models: usize,
    pub mcps: usize,
    pub dependencies: usize,
    /// Models newly detected from `env`/`apis`
    pub detected: usize,
}

impl BomSummary {
    pub fn new(document: &BomDocument, format: BomFormat, output: String, detected: usize) -> Self {
        let count = |kind: ComponentType| {
            document
                .components
                .iter()
                .filter(|c| c.component_type == kind)
                .count()
        };
        Self {
            output,
            format,
            serial_number: document.serial_number.clone(),
            models: count(ComponentType::MachineLearningModel),
            mcps: count(ComponentType::Application),
            dependencies: document.dependencies.len(),
            detected,
        }
    }
}

impl Render for BomSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{} {}", "AI-BOM written:".green().bold(), self.output)?;
        writeln!(w, "  Format:       CycloneDX 1.6 {}", self.format.as_str().to_uppercase())?;
        writeln!(w, "  Serial:       {}", self.serial_number)?;
        writeln!(w, "  Models:       {}", self.models)?;
        writeln!(w, "  MCP servers:  {}", self.mcps)?;
        writeln!(w, "  Dependencies: {}", self.dependencies)?;
        if self.detected > 0 {
            writeln!(w, "  Detected:     {} model(s) from env/apis", self.detected)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mcp_audit_ai_bom::ScanResult;

    use super::*;

    #[test]
    fn test_resolve_format_flag_overrides_config() {
        let mut config = AuditConfig::default();
        config.bom.format = "json".to_owned();
        let format = resolve_format(Some(BomFormatArg::Xml), &config).expect("valid");
        assert_eq!(format, BomFormat::Xml);
    }

    #[test]
    fn test_resolve_format_from_config() {
        let mut config = AuditConfig::default();
        config.bom.format = "XML".to_owned();
        assert_eq!(resolve_format(None, &config).expect("valid"), BomFormat::Xml);
    }

    #[test]
    fn test_resolve_format_invalid_config_value() {
        let mut config = AuditConfig::default();
        config.bom.format = "spdx".to_owned();
        let err = resolve_format(None, &config).expect_err("spdx is not supported");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_summary_counts_component_kinds() {
        let mut chat = ScanResult::new("chat");
        chat.env.insert("OPENAI_MODEL".to_owned(), "gpt-4o".into());
        let mut results = vec![chat, ScanResult::new("filesystem")];
        attach_detected_models(&ConfigModelDetector::builtin(), &mut results);

        let document = BomBuilder::new().build(&results).expect("valid document");
        let summary = BomSummary::new(&document, BomFormat::Json, "bom.json".to_owned(), 1);
        assert_eq!(summary.models, 1);
        assert_eq!(summary.mcps, 2);
        assert_eq!(summary.dependencies, 2);
        assert!(summary.serial_number.starts_with("urn:uuid:"));
    }

    #[test]
    fn test_summary_render_text() {
        colored::control::set_override(false);
        let document = BomBuilder::new().build(&[]).expect("empty document is valid");
        let summary = BomSummary::new(&document, BomFormat::Xml, "out.xml".to_owned(), 0);
        let mut buffer = Vec::new();
        summary.render_text(&mut buffer).expect("render");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("AI-BOM written: out.xml"));
        assert!(output.contains("CycloneDX 1.6 XML"));
        assert!(!output.contains("Detected:"));
    }
}
