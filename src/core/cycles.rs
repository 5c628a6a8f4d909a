//! Circular dependency detection.
//!
//! Depth-first search with a visited set and a recursion stack. Roots are taken in module
//! order and neighbours in first-edge order, so the same graph always yields the same
//! cycle list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::graph::ServiceGraph;

pub const CYCLE_SEPARATOR: &str = " -> ";

/// How far the search goes once a cycle has been found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleMode {
    /// Stop searching from the current root after its first cycle.
    #[default]
    FirstPerRoot,
    /// Keep searching and record one cycle per back edge.
    AllBackEdges,
}

/// Closed loop of module names; the first and last entries are the same module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub path: Vec<String>,
}

impl Cycle {
    pub fn contains(&self, module: &str) -> bool {
        self.path.iter().any(|m| m == module)
    }

    /// Distinct modules in the loop.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path.join(CYCLE_SEPARATOR))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CycleDetector {
    mode: CycleMode,
}

struct DfsState<'a> {
    names: Vec<&'a str>,
    edges: Vec<Vec<usize>>,
    visited: Vec<bool>,
    on_stack: Vec<bool>,
    path: Vec<usize>,
    cycles: Vec<Cycle>,
}

impl CycleDetector {
    pub fn new(mode: CycleMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CycleMode {
        self.mode
    }

    pub fn detect(&self, graph: &ServiceGraph) -> Vec<Cycle> {
        let names: Vec<&str> = graph.modules().collect();
        let position: HashMap<&str, usize> =
            names.iter().enumerate().map(|(i, name)| (*name, i)).collect();
        let edges: Vec<Vec<usize>> = names
            .iter()
            .map(|name| {
                graph
                    .dependencies_of(name)
                    .into_iter()
                    .filter_map(|dep| position.get(dep).copied())
                    .collect()
            })
            .collect();

        let count = names.len();
        let mut state = DfsState {
            names,
            edges,
            visited: vec![false; count],
            on_stack: vec![false; count],
            path: Vec::new(),
            cycles: Vec::new(),
        };

        for root in 0..count {
            if !state.visited[root] {
                self.visit(root, &mut state);
            }
        }
        state.cycles
    }

    /// Returns whether a cycle was found below `node`.
    fn visit(&self, node: usize, state: &mut DfsState<'_>) -> bool {
        state.visited[node] = true;
        state.on_stack[node] = true;
        state.path.push(node);

        let mut found = false;
        for i in 0..state.edges[node].len() {
            let next = state.edges[node][i];
            if !state.visited[next] {
                if self.visit(next, state) {
                    found = true;
                }
            } else if state.on_stack[next] {
                if let Some(start) = state.path.iter().position(|&n| n == next) {
                    let mut path: Vec<String> = state.path[start..]
                        .iter()
                        .map(|&n| state.names[n].to_string())
                        .collect();
                    path.push(state.names[next].to_string());
                    state.cycles.push(Cycle { path });
                    found = true;
                }
            }
            if found && self.mode == CycleMode::FirstPerRoot {
                break;
            }
        }

        state.path.pop();
        state.on_stack[node] = false;
        found
    }
}
