use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use super::capability::{CapabilityOracle, ProbeOutcome, RuleTable};
use super::declaration::{DeclarationSet, ServiceDeclaration};
use super::graph::{DependencyEdge, GraphBuilder, ServiceGraph};

/// How a single requirement was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// At least one provider passed the name match and any capability check.
    Satisfied,
    /// No provider and the requirement is mandatory.
    Unmet,
    /// No provider, but the requirement is optional.
    OptionalUnmet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub requirement: ServiceDeclaration,
    pub status: ResolutionStatus,
    /// Every accepted providing module, in encounter order.
    pub providers: Vec<String>,
    /// Modules whose provider matched by name but failed the capability check.
    pub rejected: Vec<String>,
    /// The requiring module provides the service itself.
    pub self_satisfied: bool,
}

impl Resolution {
    pub fn module(&self) -> &str {
        &self.requirement.module
    }

    pub fn service(&self) -> &str {
        &self.requirement.service
    }

    pub fn is_satisfied(&self) -> bool {
        self.status == ResolutionStatus::Satisfied
    }

    /// A mandatory requirement with no provider.
    pub fn is_violation(&self) -> bool {
        self.status == ResolutionStatus::Unmet
    }

    pub fn is_ambiguous(&self) -> bool {
        self.providers.len() > 1
    }
}

/// One capability check performed while resolving a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeRecord {
    pub requirer: String,
    pub service: String,
    pub provider: String,
    pub type_descriptor: String,
    pub capability: String,
    pub outcome: ProbeOutcome,
}

/// Output of resolution: the module graph plus the full classification list.
#[derive(Debug, Clone)]
pub struct ResolvedGraph {
    pub graph: ServiceGraph,
    pub resolutions: Vec<Resolution>,
    pub probes: Vec<ProbeRecord>,
}

impl ResolvedGraph {
    pub fn violations(&self) -> usize {
        self.resolutions.iter().filter(|r| r.is_violation()).count()
    }

    pub fn resolutions_for<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a Resolution> {
        self.resolutions.iter().filter(move |r| r.module() == module)
    }

    pub fn resolution(&self, module: &str, service: &str) -> Option<&Resolution> {
        self.resolutions
            .iter()
            .find(|r| r.module() == module && r.service() == service)
    }
}

/// Resolves every requirement against the providers of a declaration set.
pub struct DependencyResolver {
    oracle: Box<dyn CapabilityOracle>,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::with_oracle(Box::new(RuleTable::default()))
    }

    pub fn with_oracle(oracle: Box<dyn CapabilityOracle>) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &dyn CapabilityOracle {
        self.oracle.as_ref()
    }

    pub fn resolve(&self, declarations: &DeclarationSet) -> ResolvedGraph {
        let mut builder = GraphBuilder::new();
        for module in declarations.modules() {
            builder.add_module(module);
        }

        let mut resolutions = Vec::new();
        let mut probes = Vec::new();

        for requirement in declarations.required() {
            let resolution = self.resolve_requirement(requirement, declarations, &mut probes);

            for provider in &resolution.providers {
                if provider != requirement.module.as_str() {
                    builder.add_edge(DependencyEdge::new(
                        requirement.module.as_str(),
                        provider.as_str(),
                        requirement.service.as_str(),
                    ));
                }
            }

            debug!(
                module = %requirement.module,
                service = %requirement.service,
                status = ?resolution.status,
                providers = resolution.providers.len(),
                "resolved requirement"
            );
            resolutions.push(resolution);
        }

        ResolvedGraph {
            graph: builder.build(),
            resolutions,
            probes,
        }
    }

    fn resolve_requirement(
        &self,
        requirement: &ServiceDeclaration,
        declarations: &DeclarationSet,
        probes: &mut Vec<ProbeRecord>,
    ) -> Resolution {
        let mut providers: Vec<String> = Vec::new();
        let mut rejected: Vec<String> = Vec::new();
        let mut accepted: HashSet<&str> = HashSet::new();
        let mut refused: HashSet<&str> = HashSet::new();

        for candidate in declarations.providers_of(&requirement.service) {
            let module = candidate.module.as_str();
            if self.passes_capability_check(requirement, candidate, probes) {
                if accepted.insert(module) {
                    providers.push(module.to_string());
                }
            } else if refused.insert(module) {
                rejected.push(module.to_string());
            }
        }
        // A module accepted through another declaration is not reported as rejected.
        rejected.retain(|module| !accepted.contains(module.as_str()));

        let status = if !providers.is_empty() {
            ResolutionStatus::Satisfied
        } else if requirement.optional {
            ResolutionStatus::OptionalUnmet
        } else {
            ResolutionStatus::Unmet
        };
        let self_satisfied = providers.iter().any(|p| p == &requirement.module);

        Resolution {
            requirement: requirement.clone(),
            status,
            providers,
            rejected,
            self_satisfied,
        }
    }

    /// Only a known, negative verdict disqualifies a provider. Unknown pairs and providers
    /// without a type descriptor are accepted.
    fn passes_capability_check(
        &self,
        requirement: &ServiceDeclaration,
        candidate: &ServiceDeclaration,
        probes: &mut Vec<ProbeRecord>,
    ) -> bool {
        let Some(capability) = non_blank(requirement.required_capability.as_deref()) else {
            return true;
        };
        let Some(type_descriptor) = non_blank(candidate.type_descriptor.as_deref()) else {
            return true;
        };

        let outcome = self.oracle.probe(type_descriptor, capability);
        let passes = !outcome.rejects();
        probes.push(ProbeRecord {
            requirer: requirement.module.clone(),
            service: requirement.service.clone(),
            provider: candidate.module.clone(),
            type_descriptor: type_descriptor.to_string(),
            capability: capability.to_string(),
            outcome,
        });
        passes
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
