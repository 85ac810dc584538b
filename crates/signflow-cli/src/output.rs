//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::Value;
use signflow_domain::WorkflowIr;
use signflow_sdk::WorkflowOutcome;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an extraction result.
    pub fn format_ir(&self, ir: &WorkflowIr) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(ir)?),
            OutputFormat::Table => Ok(self.format_ir_table(ir)),
            OutputFormat::Quiet => Ok(ir.documents.join("\n")),
        }
    }

    fn format_ir_table(&self, ir: &WorkflowIr) -> String {
        let mut lines = vec![self.colorize("Documents", "cyan")];
        for (i, document) in ir.documents.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, document));
        }
        lines.push(String::new());

        let mut builder = Builder::default();
        builder.push_record(["#", "Signer", "Method", "Email", "Level"]);
        for (i, signer) in ir.signers.iter().enumerate() {
            let email = if signer.has_email() { signer.email.as_str() } else { "-" };
            builder.push_record([
                (i + 1).to_string(),
                signer.name.clone(),
                signer.signature_method.as_str().to_string(),
                email.to_string(),
                signer.signing_level.to_string(),
            ]);
        }
        lines.push(self.table(builder));

        for fallback in &ir.fallbacks {
            lines.push(self.warning(&fallback.to_string()));
        }
        lines.join("\n")
    }

    /// Format a request body. Quiet mode prints it on one line.
    pub fn format_payload(&self, payload: &Value) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(serde_json::to_string(payload)?),
            OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(payload)?),
        }
    }

    /// Format a lifecycle outcome.
    pub fn format_outcome(&self, outcome: &WorkflowOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Table => Ok(self.format_outcome_table(outcome)),
            OutputFormat::Quiet => Ok(match (&outcome.workflow_id, &outcome.workflow_version) {
                (Some(id), Some(version)) => format!("{} {}", id, version),
                (Some(id), None) => id.clone(),
                _ => String::new(),
            }),
        }
    }

    fn format_outcome_table(&self, outcome: &WorkflowOutcome) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);

        let mut row = |field: &str, value: String| builder.push_record([field.to_string(), value]);
        row("Flow", outcome.flow.to_string());
        if let Some(id) = &outcome.workflow_id {
            row("Workflow ID", id.clone());
        }
        if let Some(version) = &outcome.workflow_version {
            row("Version", version.clone());
        }
        if let Some(status) = &outcome.status {
            row("Status", status.clone());
        }
        if let Some(step) = outcome.step_failed {
            row("Failed step", step.to_string());
        }
        if let Some(model) = &outcome.model {
            row("Model", model.clone());
        }
        row("Documents", outcome.documents_created.to_string());
        row("Invitees", outcome.invitees_created.to_string());
        row("Time", format!("{} ms", outcome.processing_time_ms));

        let mut lines = vec![self.table(builder)];
        for fallback in &outcome.extraction_fallbacks {
            lines.push(self.warning(&fallback.to_string()));
        }
        match (&outcome.error, outcome.success) {
            (Some(error), _) => lines.push(self.error(error)),
            (None, true) => lines.push(self.success("Workflow published")),
            (None, false) => {}
        }
        lines.join("\n")
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
