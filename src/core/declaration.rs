use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role a declaration plays for its owning module.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Provided,
    Required,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceDeclaration {
    pub module: String,
    pub kind: ServiceKind,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_descriptor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_capability: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

impl ServiceDeclaration {
    pub fn new(module: impl Into<String>, kind: ServiceKind, service: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            kind,
            service: service.into(),
            type_descriptor: None,
            description: None,
            required_capability: None,
            optional: false,
        }
    }

    pub fn provided(module: impl Into<String>, service: impl Into<String>) -> Self {
        Self::new(module, ServiceKind::Provided, service)
    }

    pub fn required(module: impl Into<String>, service: impl Into<String>) -> Self {
        Self::new(module, ServiceKind::Required, service)
    }

    pub fn with_type(mut self, type_descriptor: impl Into<String>) -> Self {
        self.type_descriptor = Some(type_descriptor.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.required_capability = Some(capability.into());
        self
    }

    /// Marks a requirement as optional. Has no effect on provided declarations.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn is_provided(&self) -> bool {
        self.kind == ServiceKind::Provided
    }

    pub fn is_required(&self) -> bool {
        self.kind == ServiceKind::Required
    }

    /// Optional only counts for requirements.
    pub fn is_optional_requirement(&self) -> bool {
        self.is_required() && self.optional
    }
}

/// Ordered, validated set of declarations for a single analysis run.
///
/// Encounter order is preserved everywhere: module order is the order in which a module
/// name first appears, and every grouping returns declarations in input order. Module and
/// provider indexes are built once in [`DeclarationSet::new`] so lookups do not rescan the
/// declaration list.
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    declarations: Vec<ServiceDeclaration>,
    modules: Vec<String>,
    /// Module name -> position in `modules`
    module_index: HashMap<String, usize>,
    /// Declaration positions per module, parallel to `modules`
    by_module: Vec<Vec<usize>>,
    /// Service name -> positions of its provided declarations
    providers: HashMap<String, Vec<usize>>,
    dropped: usize,
}

impl DeclarationSet {
    pub fn new(declarations: Vec<ServiceDeclaration>) -> Self {
        let total = declarations.len();
        let declarations: Vec<ServiceDeclaration> = declarations
            .into_iter()
            .filter(|decl| !decl.service.trim().is_empty())
            .collect();
        let dropped = total - declarations.len();

        let mut modules: Vec<String> = Vec::new();
        let mut module_index: HashMap<String, usize> = HashMap::new();
        let mut by_module: Vec<Vec<usize>> = Vec::new();
        let mut providers: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, decl) in declarations.iter().enumerate() {
            let slot = match module_index.get(&decl.module) {
                Some(&slot) => slot,
                None => {
                    let slot = modules.len();
                    modules.push(decl.module.clone());
                    module_index.insert(decl.module.clone(), slot);
                    by_module.push(Vec::new());
                    slot
                }
            };
            by_module[slot].push(position);

            if decl.is_provided() {
                providers
                    .entry(decl.service.clone())
                    .or_insert_with(Vec::new)
                    .push(position);
            }
        }

        Self {
            declarations,
            modules,
            module_index,
            by_module,
            providers,
            dropped,
        }
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Number of declarations discarded for having an empty service name.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn declarations(&self) -> &[ServiceDeclaration] {
        &self.declarations
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Position of `module` in [`DeclarationSet::modules`].
    pub fn module_position(&self, module: &str) -> Option<usize> {
        self.module_index.get(module).copied()
    }

    pub fn provided(&self) -> impl Iterator<Item = &ServiceDeclaration> {
        self.declarations.iter().filter(|decl| decl.is_provided())
    }

    pub fn required(&self) -> impl Iterator<Item = &ServiceDeclaration> {
        self.declarations.iter().filter(|decl| decl.is_required())
    }

    /// Every declaration owned by `module`, in encounter order.
    pub fn declared_by(&self, module: &str) -> impl Iterator<Item = &ServiceDeclaration> {
        self.module_position(module)
            .map(|slot| self.by_module[slot].as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&position| &self.declarations[position])
    }

    pub fn provided_by(&self, module: &str) -> impl Iterator<Item = &ServiceDeclaration> {
        self.declared_by(module).filter(|decl| decl.is_provided())
    }

    pub fn required_by(&self, module: &str) -> impl Iterator<Item = &ServiceDeclaration> {
        self.declared_by(module).filter(|decl| decl.is_required())
    }

    /// Every provided declaration whose service name matches exactly, in encounter order.
    pub fn providers_of(&self, service: &str) -> impl Iterator<Item = &ServiceDeclaration> {
        self.providers
            .get(service)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&position| &self.declarations[position])
    }
}

impl From<Vec<ServiceDeclaration>> for DeclarationSet {
    fn from(declarations: Vec<ServiceDeclaration>) -> Self {
        Self::new(declarations)
    }
}
