use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
    Directed, Graph,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleNode {
    pub name: String,
}

impl ModuleNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// "`from` depends on `to` because it requires `service`."
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub service: String,
}

impl DependencyEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            service: service.into(),
        }
    }
}

pub type ModuleGraph = Graph<ModuleNode, DependencyEdge, Directed>;

/// Module dependency graph addressed by stable node and edge indices.
///
/// Node indices follow insertion order and edge indices follow creation order, so every
/// iteration below is deterministic.
#[derive(Debug, Clone, Default)]
pub struct ServiceGraph {
    graph: ModuleGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl ServiceGraph {
    pub fn inner(&self) -> &ModuleGraph {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, module: &str) -> Option<NodeIndex> {
        self.node_map.get(module).copied()
    }

    pub fn contains(&self, module: &str) -> bool {
        self.node_map.contains_key(module)
    }

    /// Module names in node order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .map(|node| node.name.as_str())
    }

    /// Edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.graph.edge_references().map(|edge| edge.weight())
    }

    /// Distinct modules `module` depends on, in the order their first edge was created.
    pub fn dependencies_of(&self, module: &str) -> Vec<&str> {
        let Some(source) = self.node_index(module) else {
            return Vec::new();
        };

        // petgraph walks outgoing edges newest first; sort back into creation order.
        let mut outgoing: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges(source)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        outgoing.sort_by_key(|(id, _)| id.index());

        let mut seen: HashSet<NodeIndex> = HashSet::with_capacity(outgoing.len());
        outgoing
            .into_iter()
            .filter(|(_, target)| seen.insert(*target))
            .map(|(_, target)| self.graph[target].name.as_str())
            .collect()
    }

    /// Module → distinct dependencies, in node order. Modules without dependencies are
    /// included with an empty list.
    pub fn adjacency(&self) -> Vec<(String, Vec<String>)> {
        self.modules()
            .map(|module| {
                let deps = self
                    .dependencies_of(module)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (module.to_string(), deps)
            })
            .collect()
    }
}

pub struct GraphBuilder {
    graph: ModuleGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Adds a module node, returning the existing index when the name is already known.
    pub fn add_module(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            return index;
        }
        let index = self.graph.add_node(ModuleNode::new(name));
        self.node_map.insert(name.to_string(), index);
        index
    }

    /// Adds an edge between two known modules. Self edges are refused.
    pub fn add_edge(&mut self, edge: DependencyEdge) -> Option<EdgeIndex> {
        if edge.from == edge.to {
            return None;
        }
        let source_idx = self.node_map.get(&edge.from)?;
        let target_idx = self.node_map.get(&edge.to)?;
        Some(self.graph.add_edge(*source_idx, *target_idx, edge))
    }

    pub fn build(self) -> ServiceGraph {
        ServiceGraph {
            graph: self.graph,
            node_map: self.node_map,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
