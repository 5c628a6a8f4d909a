use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::core::report::AnalysisReport;

/// JSON rendering of an [`AnalysisReport`] for programmatic consumption.
pub struct JsonReportFormatter {
    /// Pretty-print instead of a single line
    pretty: bool,
}

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_to_file(&self, report: &AnalysisReport, output_path: &Path) -> Result<()> {
        let json_content = self.format(report)?;
        fs::write(output_path, json_content)?;
        Ok(())
    }

    pub fn format(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = serde_json::to_value(report)?;
        output["meta"] = json!({
            "modules": report.summary.modules,
            "edges": report.summary.edges,
            "cycles": report.summary.cycles,
            "violations": report.violations(),
            "valid": report.is_valid(),
            "format": if self.pretty { "pretty" } else { "compact" }
        });

        let content = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        Ok(content)
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
