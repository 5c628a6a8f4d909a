//! # SVCGRAPH
//!
//! Service dependency graph analysis for declared module capabilities.
//!
//! SVCGRAPH takes a flat list of service declarations (what each module provides and
//! requires), resolves every requirement against the providers, builds the module
//! dependency graph, detects circular dependencies and renders a tree-structured report.
//!
//! ## Output Formats
//!
//! - **Text**: Tree report with per-module `Provides`/`Requires` sections
//! - **JSON**: Full structured report for programmatic consumption
//!
//! ## Pipeline
//!
//! Declarations → resolver (consulting the capability oracle) → module graph →
//! cycle detector → report

pub mod config;
pub mod core;
pub mod formatters;
pub mod utils;

pub use crate::config::AnalyzerConfig;
pub use crate::core::{AnalysisReport, ServiceAnalyzer, ServiceDeclaration};
