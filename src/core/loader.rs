use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::declaration::ServiceDeclaration;
use crate::utils::error::{Result, SvcGraphError};

/// Accepted top-level shapes of a declaration document.
#[derive(Deserialize)]
#[serde(untagged)]
enum DeclarationDocument {
    List(Vec<ServiceDeclaration>),
    Wrapped { declarations: Vec<ServiceDeclaration> },
}

/// Reads declarations produced by an upstream extractor.
pub struct DeclarationLoader;

impl DeclarationLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load_file(&self, path: &Path) -> Result<Vec<ServiceDeclaration>> {
        let content = fs::read_to_string(path)?;
        let declarations = self.load_str(&content)?;
        debug!(
            path = %path.display(),
            count = declarations.len(),
            "loaded declarations"
        );
        Ok(declarations)
    }

    /// Parses a JSON list of declarations, bare or under a `declarations` key.
    pub fn load_str(&self, content: &str) -> Result<Vec<ServiceDeclaration>> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !(value.is_array() || value.is_object()) {
            return Err(SvcGraphError::InvalidInput {
                message: format!("expected a list of declarations, found {}", type_name(&value)),
            });
        }
        match serde_json::from_value::<DeclarationDocument>(value) {
            Ok(DeclarationDocument::List(list)) => Ok(list),
            Ok(DeclarationDocument::Wrapped { declarations }) => Ok(declarations),
            Err(err) => Err(SvcGraphError::InvalidInput {
                message: format!("malformed declaration list: {err}"),
            }),
        }
    }
}

impl Default for DeclarationLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
