//! TOML configuration.
//!
//! ```toml
//! validate = true
//! show_empty_sections = true
//! cycle_mode = "all-back-edges"
//!
//! [symbols]
//! missing = "!!"
//!
//! [[rules]]
//! type_pattern = '^\*redis\.Client$'
//! capability_pattern = '^io\.Closer$'
//! satisfies = true
//! explanation = ["$type implements Close() error"]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{CapabilityRule, CycleMode, RuleTable, ServiceAnalyzer};
use crate::formatters::{RenderOptions, SymbolTable, TreeFormatter};
use crate::utils::error::{Result, SvcGraphError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub validate: bool,
    pub show_empty_sections: bool,
    pub cycle_mode: CycleMode,
    pub symbols: SymbolTable,
    /// Extra capability rules, checked before the built-in table.
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub type_pattern: String,
    pub capability_pattern: String,
    pub satisfies: bool,
    #[serde(default)]
    pub explanation: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            validate: false,
            show_empty_sections: true,
            cycle_mode: CycleMode::default(),
            symbols: SymbolTable::default(),
            rules: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AnalyzerConfig = toml::from_str(content)?;
        // Surface bad patterns at load time rather than at analysis time.
        config.rule_table()?;
        Ok(config)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            validate: self.validate,
            show_empty_sections: self.show_empty_sections,
        }
    }

    /// Built-in rules with the configured ones in front.
    pub fn rule_table(&self) -> Result<RuleTable> {
        let mut custom = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let explanation: Vec<&str> = rule.explanation.iter().map(String::as_str).collect();
            let compiled = CapabilityRule::new(
                &rule.type_pattern,
                &rule.capability_pattern,
                rule.satisfies,
                &explanation,
            )
            .map_err(|err| SvcGraphError::InvalidRule {
                message: format!(
                    "{} / {}: {err}",
                    rule.type_pattern, rule.capability_pattern
                ),
            })?;
            custom.push(compiled);
        }

        let mut table = RuleTable::default();
        table.prepend(custom);
        Ok(table)
    }

    pub fn analyzer(&self) -> Result<ServiceAnalyzer> {
        let formatter = TreeFormatter::new()
            .with_symbols(self.symbols.clone())
            .with_options(self.render_options());
        Ok(ServiceAnalyzer::new()
            .with_rules(self.rule_table()?)
            .with_cycle_mode(self.cycle_mode)
            .with_formatter(formatter))
    }
}
