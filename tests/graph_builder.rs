use svcgraph::core::{DependencyEdge, GraphBuilder, ServiceGraph};

#[test]
fn graph_builder_adds_modules_and_edges() {
    let mut gb = GraphBuilder::new();

    let a = gb.add_module("a");
    gb.add_module("b");
    gb.add_module("c");
    assert_eq!(gb.add_module("a"), a);

    assert!(gb.add_edge(DependencyEdge::new("a", "b", "s1")).is_some());
    assert!(gb.add_edge(DependencyEdge::new("b", "c", "s2")).is_some());

    let graph: ServiceGraph = gb.build();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.modules().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn add_edge_returns_none_for_unknown_or_self_edges() {
    let mut gb = GraphBuilder::new();
    gb.add_module("a");

    assert!(gb.add_edge(DependencyEdge::new("a", "missing", "s")).is_none());
    assert!(gb.add_edge(DependencyEdge::new("a", "a", "s")).is_none());
    assert_eq!(gb.build().edge_count(), 0);
}

#[test]
fn dependencies_are_distinct_and_in_creation_order() {
    let mut gb = GraphBuilder::new();
    for name in ["api", "db", "cache", "queue"] {
        gb.add_module(name);
    }
    gb.add_edge(DependencyEdge::new("api", "queue", "Jobs"));
    gb.add_edge(DependencyEdge::new("api", "db", "Database"));
    gb.add_edge(DependencyEdge::new("api", "queue", "Events"));
    gb.add_edge(DependencyEdge::new("api", "cache", "Cache"));
    let graph = gb.build();

    assert_eq!(graph.dependencies_of("api"), vec!["queue", "db", "cache"]);
    assert!(graph.dependencies_of("db").is_empty());
    assert!(graph.dependencies_of("unknown").is_empty());

    let services: Vec<&str> = graph.edges().map(|e| e.service.as_str()).collect();
    assert_eq!(services, vec!["Jobs", "Database", "Events", "Cache"]);
}

#[test]
fn adjacency_lists_every_module_in_node_order() {
    let mut gb = GraphBuilder::new();
    gb.add_module("a");
    gb.add_module("b");
    gb.add_edge(DependencyEdge::new("b", "a", "s"));
    let graph = gb.build();

    assert_eq!(
        graph.adjacency(),
        vec![
            ("a".to_string(), vec![]),
            ("b".to_string(), vec!["a".to_string()]),
        ]
    );
}
