//! Tree-structured text report.
//!
//! ## Output Structure
//!
//! - **Header**: `# SERVICE_GRAPH` followed by a counts line
//! - **Modules**: one block per module with `Provides` and `Requires` branches
//! - **Dependency Graph**: every edge as `from -> to (via service)`
//! - **Capability Checks**: only when a capability was probed
//! - **Circular Dependencies**: every detected cycle
//!
//! Within a list every entry but the last takes the branch connector and the last takes
//! the terminal connector. An empty list renders as `(none)`.

use anyhow::Result;
use std::fs;
use std::path::Path;

use super::symbols::SymbolTable;
use crate::core::report::{AnalysisReport, ModuleReport};
use crate::core::resolver::{ProbeRecord, Resolution, ResolutionStatus};
use crate::core::ServiceDeclaration;

const NONE_LABEL: &str = "(none)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append a validation summary to modules with unmet mandatory requirements.
    pub validate: bool,
    /// Render `Provides`/`Requires` even when empty.
    pub show_empty_sections: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            validate: false,
            show_empty_sections: true,
        }
    }
}

/// One rendered line. `None` children means a leaf; `Some(vec![])` renders `(none)`.
#[derive(Debug, Clone)]
struct TreeItem {
    label: String,
    children: Option<Vec<TreeItem>>,
}

impl TreeItem {
    fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: None,
        }
    }

    fn section(label: impl Into<String>, children: Vec<TreeItem>) -> Self {
        Self {
            label: label.into(),
            children: Some(children),
        }
    }

    fn is_empty_section(&self) -> bool {
        matches!(&self.children, Some(children) if children.is_empty())
    }
}

pub struct TreeFormatter {
    symbols: SymbolTable,
    options: RenderOptions,
}

impl TreeFormatter {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::default(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.options.validate = validate;
        self
    }

    pub fn with_empty_sections(mut self, show: bool) -> Self {
        self.options.show_empty_sections = show;
        self
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn format_to_file(&self, report: &AnalysisReport, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.render(report))?;
        Ok(())
    }

    pub fn render(&self, report: &AnalysisReport) -> String {
        let mut output = String::with_capacity(4096);

        output.push_str("# SERVICE_GRAPH\n");
        output.push_str(&format!(
            "MODULES:{} PROVIDES:{} REQUIRES:{} EDGES:{} CYCLES:{}",
            report.summary.modules,
            report.summary.provided,
            report.summary.required,
            report.summary.edges,
            report.summary.cycles
        ));
        if self.options.validate {
            output.push_str(&format!(" VIOLATIONS:{}", report.violations()));
        }
        output.push_str("\n\n");

        for module in &report.modules {
            self.render_module(&mut output, module);
            output.push('\n');
        }

        let edges: Vec<TreeItem> = report
            .edges
            .iter()
            .map(|edge| TreeItem::leaf(format!("{} -> {} (via {})", edge.from, edge.to, edge.service)))
            .collect();
        self.render_section(&mut output, &self.symbols.graph, "Dependency Graph", &edges);
        output.push('\n');

        if !report.probes.is_empty() {
            let probes: Vec<TreeItem> = report.probes.iter().map(|p| self.probe_item(p)).collect();
            self.render_section(&mut output, &self.symbols.probe, "Capability Checks", &probes);
            output.push('\n');
        }

        let cycles: Vec<TreeItem> = report
            .cycles
            .iter()
            .map(|cycle| TreeItem::leaf(cycle.to_string()))
            .collect();
        self.render_section(&mut output, &self.symbols.cycle, "Circular Dependencies", &cycles);

        output
    }

    /// Renders a single module block, without the trailing blank line.
    pub fn render_module(&self, output: &mut String, module: &ModuleReport) {
        output.push_str(&format!("{} {}\n", self.symbols.module, module.name));

        let provides: Vec<TreeItem> = module.provides.iter().map(|p| self.provide_item(p)).collect();

        let mut requires: Vec<TreeItem> =
            module.requires.iter().map(|r| self.require_item(r)).collect();
        let violations = module.violations();
        if self.options.validate && violations > 0 {
            requires.push(TreeItem::leaf(format!(
                "{} {} required field(s) need validation",
                self.symbols.validation, violations
            )));
        }

        let mut sections = vec![
            TreeItem::section(format!("{} Provides", self.symbols.provides), provides),
            TreeItem::section(format!("{} Requires", self.symbols.requires), requires),
        ];
        if !self.options.show_empty_sections {
            sections.retain(|section| !section.is_empty_section());
        }
        if !sections.is_empty() {
            self.push_items(output, "", &sections);
        }
    }

    fn render_section(&self, output: &mut String, glyph: &str, title: &str, items: &[TreeItem]) {
        output.push_str(&format!("{glyph} {title}\n"));
        self.push_items(output, "", items);
    }

    fn push_items(&self, output: &mut String, prefix: &str, items: &[TreeItem]) {
        if items.is_empty() {
            output.push_str(prefix);
            output.push_str(self.symbols.connector(true));
            output.push_str(NONE_LABEL);
            output.push('\n');
            return;
        }

        for (i, item) in items.iter().enumerate() {
            let last = i + 1 == items.len();
            output.push_str(prefix);
            output.push_str(self.symbols.connector(last));
            output.push_str(&item.label);
            output.push('\n');

            if let Some(children) = &item.children {
                let child_prefix = format!("{prefix}{}", self.symbols.continuation(last));
                self.push_items(output, &child_prefix, children);
            }
        }
    }

    fn provide_item(&self, decl: &ServiceDeclaration) -> TreeItem {
        let mut label = decl.service.clone();
        if let Some(ty) = &decl.type_descriptor {
            label.push_str(&format!(" ({ty})"));
        }
        if let Some(description) = &decl.description {
            label.push_str(&format!(" - {description}"));
        }
        TreeItem::leaf(label)
    }

    fn require_item(&self, resolution: &Resolution) -> TreeItem {
        let decl = &resolution.requirement;
        let mut label = decl.service.clone();
        if let Some(ty) = &decl.type_descriptor {
            label.push_str(&format!(" ({ty})"));
        }
        if let Some(capability) = &decl.required_capability {
            label.push_str(&format!(" [needs {capability}]"));
        }

        match resolution.status {
            ResolutionStatus::Satisfied => {
                label.push_str(&format!(
                    " {} provided by: {}",
                    self.symbols.ok,
                    resolution.providers.join(", ")
                ));
            }
            ResolutionStatus::Unmet => {
                label.push_str(&format!(" {} NOT PROVIDED", self.symbols.missing));
                if !resolution.rejected.is_empty() {
                    label.push_str(&format!(" (rejected: {})", resolution.rejected.join(", ")));
                }
            }
            ResolutionStatus::OptionalUnmet => {
                label.push_str(&format!(" {} not provided (optional)", self.symbols.ok));
            }
        }
        TreeItem::leaf(label)
    }

    fn probe_item(&self, probe: &ProbeRecord) -> TreeItem {
        let outcome = &probe.outcome;
        let glyph = match (outcome.known_pattern, outcome.satisfies) {
            (true, true) => &self.symbols.ok,
            (true, false) => &self.symbols.missing,
            (false, _) => &self.symbols.warning,
        };
        let mut label = format!(
            "{glyph} {}: {} vs {}",
            probe.provider, probe.type_descriptor, probe.capability
        );
        if !outcome.known_pattern {
            label.push_str(" (unknown pattern)");
        }
        let children = outcome
            .explanation
            .iter()
            .map(|line| TreeItem::leaf(line.clone()))
            .collect();
        TreeItem::section(label, children)
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}
