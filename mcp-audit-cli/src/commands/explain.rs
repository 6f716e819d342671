//! `mcp-audit explain` command handler

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use mcp_audit_core::risk::RiskTaxonomy;
use mcp_audit_core::types::RiskSeverity;

use crate::cli::ExplainArgs;
use crate::commands::paint;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Maximum explanation length shown per flag in `--list` output.
const LIST_PREVIEW_CHARS: usize = 60;

/// Execute the `explain` command.
pub fn execute(args: ExplainArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let taxonomy = RiskTaxonomy::builtin();

    if args.list {
        return writer.render(&FlagListReport::from_taxonomy(&taxonomy));
    }

    match args.flag {
        Some(flag) => {
            debug!(flag = %flag, "explaining risk flag");
            writer.render(&FlagExplanation::from_taxonomy(&taxonomy, &flag))
        }
        None => writer.render(&UsageHint::default()),
    }
}

/// Full explanation of a single risk flag.
#[derive(Debug, Serialize)]
pub struct FlagExplanation {
    pub flag: String,
    /// Whether the flag exists in the taxonomy
    pub known: bool,
    pub severity: RiskSeverity,
    pub explanation: String,
    pub remediation: String,
    /// Ordered remediation steps (may be empty)
    pub steps: Vec<String>,
    pub related: Vec<String>,
    #[serde(skip)]
    color: &'static str,
}

impl FlagExplanation {
    pub fn from_taxonomy(taxonomy: &RiskTaxonomy, flag: &str) -> Self {
        let def = taxonomy.lookup(flag);
        Self {
            flag: flag.to_owned(),
            known: taxonomy.is_known(flag),
            severity: def.severity,
            explanation: def.explanation.into_owned(),
            remediation: def.remediation.into_owned(),
            steps: def.detailed_steps.iter().map(|s| (*s).to_owned()).collect(),
            related: def.related.iter().map(|s| (*s).to_owned()).collect(),
            color: taxonomy.level_for(def.severity).color,
        }
    }
}

impl Render for FlagExplanation {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w)?;
        writeln!(w, "Risk Flag: {}", self.flag.bold())?;
        writeln!(
            w,
            "Severity: {}",
            paint(&self.severity.as_str().to_uppercase(), self.color).bold()
        )?;
        if !self.known {
            writeln!(w, "{}", "(not a known risk flag)".dimmed())?;
        }
        writeln!(w)?;

        writeln!(w, "{}", "Why it matters:".bold())?;
        writeln!(w, "  {}", self.explanation)?;
        writeln!(w)?;

        writeln!(w, "{}", "How to fix:".bold())?;
        if self.steps.is_empty() {
            writeln!(w, "  {}", self.remediation)?;
        } else {
            for (i, step) in self.steps.iter().enumerate() {
                writeln!(w, "  {}. {}", i + 1, step)?;
            }
        }

        if !self.related.is_empty() {
            writeln!(w)?;
            writeln!(w, "{} {}", "Related flags:".bold(), self.related.join(", "))?;
        }

        Ok(())
    }
}

/// One entry of the `--list` output.
#[derive(Debug, Serialize)]
pub struct FlagSummary {
    pub flag: String,
    pub explanation: String,
}

/// Flags sharing a severity.
#[derive(Debug, Serialize)]
pub struct SeverityGroup {
    pub severity: RiskSeverity,
    pub flags: Vec<FlagSummary>,
    #[serde(skip)]
    color: &'static str,
}

/// All known risk flags, grouped from critical down to low.
#[derive(Debug, Serialize)]
pub struct FlagListReport {
    pub groups: Vec<SeverityGroup>,
}

impl FlagListReport {
    pub fn from_taxonomy(taxonomy: &RiskTaxonomy) -> Self {
        let groups = taxonomy
            .flags_grouped_by_severity()
            .into_iter()
            .map(|(severity, flags)| SeverityGroup {
                severity,
                flags: flags
                    .into_iter()
                    .map(|flag| FlagSummary {
                        flag: flag.to_owned(),
                        explanation: taxonomy.lookup(flag).explanation.into_owned(),
                    })
                    .collect(),
                color: taxonomy.level_for(severity).color,
            })
            .collect();
        Self { groups }
    }

    /// Total number of listed flags.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.flags.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Render for FlagListReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w)?;
        writeln!(w, "{}", "Known Risk Flags".bold())?;

        for group in &self.groups {
            writeln!(w)?;
            writeln!(
                w,
                "{}",
                paint(&group.severity.as_str().to_uppercase(), group.color).bold()
            )?;
            for summary in &group.flags {
                writeln!(
                    w,
                    "  • {}: {}...",
                    summary.flag,
                    preview(&summary.explanation, LIST_PREVIEW_CHARS)
                )?;
            }
        }

        Ok(())
    }
}

/// Shown when `explain` is called without a flag.
#[derive(Debug, Serialize)]
pub struct UsageHint {
    pub usage: &'static str,
    pub example: &'static str,
    pub hint: &'static str,
}

impl Default for UsageHint {
    fn default() -> Self {
        Self {
            usage: "mcp-audit explain <flag>",
            example: "mcp-audit explain shell-access",
            hint: "Use --list to see all known risk flags.",
        }
    }
}

impl Render for UsageHint {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Usage: {}", self.usage)?;
        writeln!(w, "Example: {}", self.example)?;
        writeln!(w)?;
        writeln!(w, "{}", self.hint)?;
        Ok(())
    }
}

/// First `max` characters of `text` (char boundary safe).
fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
