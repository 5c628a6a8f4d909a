use serde::Serialize;

use super::cycles::Cycle;
use super::declaration::{DeclarationSet, ServiceDeclaration};
use super::graph::DependencyEdge;
use super::resolver::{ProbeRecord, Resolution, ResolutionStatus, ResolvedGraph};

/// Everything one module declared, with its requirements already resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub name: String,
    pub provides: Vec<ServiceDeclaration>,
    pub requires: Vec<Resolution>,
}

impl ModuleReport {
    /// Mandatory requirements that found no provider.
    pub fn violations(&self) -> usize {
        self.requires.iter().filter(|r| r.is_violation()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub modules: usize,
    pub provided: usize,
    pub required: usize,
    pub satisfied: usize,
    pub unmet_required: usize,
    pub unmet_optional: usize,
    pub ambiguous: usize,
    pub self_satisfied: usize,
    pub edges: usize,
    pub cycles: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub modules: Vec<ModuleReport>,
    pub providers: Vec<ServiceDeclaration>,
    pub requirers: Vec<Resolution>,
    pub probes: Vec<ProbeRecord>,
    pub edges: Vec<DependencyEdge>,
    pub adjacency: Vec<(String, Vec<String>)>,
    pub cycles: Vec<Cycle>,
    pub summary: Summary,
    /// Canonical text rendering, filled in by the analyzer.
    #[serde(skip)]
    pub text: String,
}

impl AnalysisReport {
    pub fn build(declarations: &DeclarationSet, resolved: ResolvedGraph, cycles: Vec<Cycle>) -> Self {
        let mut modules: Vec<ModuleReport> = declarations
            .modules()
            .iter()
            .map(|name| ModuleReport {
                name: name.clone(),
                provides: declarations.provided_by(name).cloned().collect(),
                requires: Vec::new(),
            })
            .collect();
        // Resolutions arrive in encounter order, so one pass keeps per-module order.
        for resolution in &resolved.resolutions {
            if let Some(slot) = declarations.module_position(resolution.module()) {
                modules[slot].requires.push(resolution.clone());
            }
        }

        let edges: Vec<DependencyEdge> = resolved.graph.edges().cloned().collect();
        let adjacency = resolved.graph.adjacency();

        let count = |status: ResolutionStatus| {
            resolved
                .resolutions
                .iter()
                .filter(|r| r.status == status)
                .count()
        };
        let summary = Summary {
            modules: modules.len(),
            provided: declarations.provided().count(),
            required: resolved.resolutions.len(),
            satisfied: count(ResolutionStatus::Satisfied),
            unmet_required: count(ResolutionStatus::Unmet),
            unmet_optional: count(ResolutionStatus::OptionalUnmet),
            ambiguous: resolved.resolutions.iter().filter(|r| r.is_ambiguous()).count(),
            self_satisfied: resolved.resolutions.iter().filter(|r| r.self_satisfied).count(),
            edges: edges.len(),
            cycles: cycles.len(),
            dropped: declarations.dropped(),
        };

        Self {
            modules,
            providers: declarations.provided().cloned().collect(),
            requirers: resolved.resolutions,
            probes: resolved.probes,
            edges,
            adjacency,
            cycles,
            summary,
            text: String::new(),
        }
    }

    pub fn module(&self, name: &str) -> Option<&ModuleReport> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn violations(&self) -> usize {
        self.summary.unmet_required
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// No mandatory requirement is unmet and the graph is acyclic.
    pub fn is_valid(&self) -> bool {
        self.violations() == 0 && !self.has_cycles()
    }
}
