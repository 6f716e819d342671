//! `mcp-audit identify` command handler

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use mcp_audit_ai_bom::bom::infer::{energy_class, extract_version, infer_architecture, infer_task};
use mcp_audit_ai_bom::{Identification, ModelIdentifier};
use mcp_audit_core::types::Hosting;

use crate::cli::IdentifyArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `identify` command.
pub fn execute(args: IdentifyArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let identifier = ModelIdentifier::builtin();
    let report = IdentifyReport::build(&identifier, &args.model)
        .ok_or_else(|| CliError::Command("model identifier is empty".to_owned()))?;
    writer.render(&report)
}

/// Identification result plus inferred model-card fields.
#[derive(Debug, Serialize)]
pub struct IdentifyReport {
    pub input: String,
    /// Matching tier that produced the result (exact, prefix, substring, keyword, generic)
    pub tier: String,
    pub name: String,
    pub provider: String,
    pub hosting: Hosting,
    pub version: String,
    pub architecture: String,
    pub task: String,
    pub energy_consumption: String,
}

impl IdentifyReport {
    /// Returns `None` for blank input.
    pub fn build(identifier: &ModelIdentifier, model: &str) -> Option<Self> {
        let Identification { info, kind } = identifier.identify_detailed(model)?;
        Some(Self {
            input: model.to_owned(),
            tier: kind.as_str().to_owned(),
            version: extract_version(model),
            architecture: infer_architecture(&info.name, &info.provider).to_owned(),
            task: infer_task(&info.name).to_owned(),
            energy_consumption: energy_class(info.hosting, &info.name).to_owned(),
            name: info.name,
            provider: info.provider,
            hosting: info.hosting,
        })
    }
}

impl Render for IdentifyReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Model: {}", self.input.bold())?;
        writeln!(w, "  Name:         {}", self.name)?;
        writeln!(w, "  Provider:     {}", self.provider)?;
        writeln!(w, "  Hosting:      {}", self.hosting.as_str())?;
        writeln!(w, "  Match:        {}", self.tier.dimmed())?;
        writeln!(w, "  Version:      {}", self.version)?;
        writeln!(w, "  Architecture: {}", self.architecture)?;
        writeln!(w, "  Task:         {}", self.task)?;
        writeln!(w, "  Energy:       {}", self.energy_consumption)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_dated_cloud_model() {
        let identifier = ModelIdentifier::builtin();
        let report = IdentifyReport::build(&identifier, "claude-3-5-sonnet-20241022")
            .expect("non-empty input");
        assert_eq!(report.provider, "Anthropic");
        assert_eq!(report.hosting, Hosting::Cloud);
        assert_eq!(report.version, "2024-10-22");
        assert_eq!(report.architecture, "Constitutional AI");
        assert_eq!(report.task, "text-generation");
    }

    #[test]
    fn test_report_for_local_code_model() {
        let identifier = ModelIdentifier::builtin();
        let report = IdentifyReport::build(&identifier, "codellama:13b").expect("non-empty input");
        assert_eq!(report.hosting, Hosting::Local);
        assert_eq!(report.task, "code-generation");
        assert_eq!(report.energy_consumption, "variable-local");
    }

    #[test]
    fn test_report_for_unrecognized_model_is_generic() {
        let identifier = ModelIdentifier::builtin();
        let report = IdentifyReport::build(&identifier, "acme-brain").expect("non-empty input");
        assert_eq!(report.tier, "generic");
        assert_eq!(report.name, "acme-brain");
        assert_eq!(report.provider, "Unknown");
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let identifier = ModelIdentifier::builtin();
        assert!(IdentifyReport::build(&identifier, "   ").is_none());
    }

    #[test]
    fn test_render_text_lists_fields() {
        colored::control::set_override(false);
        let identifier = ModelIdentifier::builtin();
        let report = IdentifyReport::build(&identifier, "gpt-4o").expect("non-empty input");
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Model: gpt-4o"));
        assert!(output.contains("Provider:     OpenAI"));
        assert!(output.contains("Hosting:      cloud"));
    }
}
