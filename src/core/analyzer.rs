use tracing::{debug, info, warn};

use super::capability::{CapabilityOracle, RuleTable};
use super::cycles::{CycleDetector, CycleMode};
use super::declaration::{DeclarationSet, ServiceDeclaration};
use super::report::AnalysisReport;
use super::resolver::DependencyResolver;
use crate::formatters::{RenderOptions, TreeFormatter};

/// Runs one analysis: resolution, cycle detection and rendering.
pub struct ServiceAnalyzer {
    resolver: DependencyResolver,
    cycle_detector: CycleDetector,
    formatter: TreeFormatter,
}

impl ServiceAnalyzer {
    pub fn new() -> Self {
        Self {
            resolver: DependencyResolver::new(),
            cycle_detector: CycleDetector::default(),
            formatter: TreeFormatter::new(),
        }
    }

    pub fn with_oracle(mut self, oracle: Box<dyn CapabilityOracle>) -> Self {
        self.resolver = DependencyResolver::with_oracle(oracle);
        self
    }

    pub fn with_rules(self, rules: RuleTable) -> Self {
        self.with_oracle(Box::new(rules))
    }

    pub fn with_cycle_mode(mut self, mode: CycleMode) -> Self {
        self.cycle_detector = CycleDetector::new(mode);
        self
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.formatter = self.formatter.with_options(options);
        self
    }

    pub fn with_formatter(mut self, formatter: TreeFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn analyze(&self, declarations: Vec<ServiceDeclaration>) -> AnalysisReport {
        self.analyze_set(&DeclarationSet::new(declarations))
    }

    pub fn analyze_set(&self, declarations: &DeclarationSet) -> AnalysisReport {
        info!(
            declarations = declarations.len(),
            modules = declarations.modules().len(),
            "analyzing service declarations"
        );
        if declarations.dropped() > 0 {
            debug!(
                dropped = declarations.dropped(),
                "dropped declarations with an empty service name"
            );
        }

        let resolved = self.resolver.resolve(declarations);
        debug!(
            edges = resolved.graph.edge_count(),
            probes = resolved.probes.len(),
            "dependency graph built"
        );

        let cycles = self.cycle_detector.detect(&resolved.graph);
        for cycle in &cycles {
            warn!(cycle = %cycle, "circular dependency detected");
        }

        let mut report = AnalysisReport::build(declarations, resolved, cycles);
        if report.violations() > 0 {
            warn!(
                violations = report.violations(),
                "required services are not provided"
            );
        }
        report.text = self.formatter.render(&report);

        info!(
            satisfied = report.summary.satisfied,
            unmet = report.summary.unmet_required,
            cycles = report.summary.cycles,
            "analysis complete"
        );
        report
    }
}

impl Default for ServiceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
