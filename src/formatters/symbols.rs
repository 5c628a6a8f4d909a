use serde::{Deserialize, Serialize};

/// Glyphs used by the tree formatter.
///
/// Every field has a default, so a configuration file only needs to name the glyphs it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolTable {
    /// Connector for every entry except the last.
    pub branch: String,
    /// Connector for the last entry of a list.
    pub terminal: String,
    /// Continuation under a branch entry.
    pub vertical: String,
    /// Continuation under a terminal entry.
    pub blank: String,
    pub module: String,
    pub provides: String,
    pub requires: String,
    /// Satisfied requirement, or optional requirement left unmet.
    pub ok: String,
    /// Required service that is not provided.
    pub missing: String,
    /// Capability check with no known verdict.
    pub warning: String,
    /// Per-module validation summary.
    pub validation: String,
    pub graph: String,
    pub probe: String,
    pub cycle: String,
}

impl SymbolTable {
    /// Plain ASCII glyphs for terminals without Unicode support.
    pub fn ascii() -> Self {
        Self {
            branch: "|-- ".to_string(),
            terminal: "`-- ".to_string(),
            vertical: "|   ".to_string(),
            blank: "    ".to_string(),
            module: "[M]".to_string(),
            provides: "[+]".to_string(),
            requires: "[-]".to_string(),
            ok: "[ok]".to_string(),
            missing: "[!!]".to_string(),
            warning: "[?]".to_string(),
            validation: "[!]".to_string(),
            graph: "[G]".to_string(),
            probe: "[C]".to_string(),
            cycle: "[@]".to_string(),
        }
    }

    pub fn connector(&self, last: bool) -> &str {
        if last {
            &self.terminal
        } else {
            &self.branch
        }
    }

    pub fn continuation(&self, last: bool) -> &str {
        if last {
            &self.blank
        } else {
            &self.vertical
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            branch: "├── ".to_string(),
            terminal: "└── ".to_string(),
            vertical: "│   ".to_string(),
            blank: "    ".to_string(),
            module: "📦".to_string(),
            provides: "📤".to_string(),
            requires: "📥".to_string(),
            ok: "✅".to_string(),
            missing: "❌".to_string(),
            warning: "⚠️".to_string(),
            validation: "⚠️".to_string(),
            graph: "🔗".to_string(),
            probe: "🔍".to_string(),
            cycle: "🔄".to_string(),
        }
    }
}
