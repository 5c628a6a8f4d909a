pub mod analyzer;
pub mod capability;
pub mod cycles;
pub mod declaration;
pub mod graph;
pub mod loader;
pub mod report;
pub mod resolver;

pub use analyzer::ServiceAnalyzer;
pub use capability::{CapabilityOracle, CapabilityRule, ProbeOutcome, RuleTable};
pub use cycles::{Cycle, CycleDetector, CycleMode};
pub use declaration::{DeclarationSet, ServiceDeclaration, ServiceKind};
pub use graph::{DependencyEdge, GraphBuilder, ModuleNode, ServiceGraph};
pub use loader::DeclarationLoader;
pub use report::{AnalysisReport, ModuleReport, Summary};
pub use resolver::{DependencyResolver, ProbeRecord, Resolution, ResolutionStatus, ResolvedGraph};
