use svcgraph::core::{
    CycleDetector, CycleMode, DeclarationSet, DependencyEdge, DependencyResolver, GraphBuilder,
    ServiceDeclaration, ServiceGraph,
};

fn graph(modules: &[&str], edges: &[(&str, &str)]) -> ServiceGraph {
    let mut gb = GraphBuilder::new();
    for module in modules {
        gb.add_module(module);
    }
    for (from, to) in edges {
        gb.add_edge(DependencyEdge::new(*from, *to, format!("{from}_{to}")));
    }
    gb.build()
}

#[test]
fn detects_two_module_cycle_from_declarations() {
    let set = DeclarationSet::new(vec![
        ServiceDeclaration::provided("A", "s2"),
        ServiceDeclaration::required("A", "s1"),
        ServiceDeclaration::provided("B", "s1"),
        ServiceDeclaration::required("B", "s2"),
    ]);
    let resolved = DependencyResolver::new().resolve(&set);

    let cycles = CycleDetector::default().detect(&resolved.graph);
    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].contains("A"));
    assert!(cycles[0].contains("B"));
    assert_eq!(cycles[0].to_string(), "A -> B -> A");
}

#[test]
fn acyclic_graph_yields_no_cycles() {
    let g = graph(&["api", "user", "db"], &[("api", "user"), ("user", "db"), ("api", "db")]);
    assert!(CycleDetector::default().detect(&g).is_empty());
}

#[test]
fn cycle_path_is_the_stack_suffix() {
    let g = graph(
        &["entry", "a", "b", "c"],
        &[("entry", "a"), ("a", "b"), ("b", "c"), ("c", "a")],
    );

    let cycles = CycleDetector::default().detect(&g);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].path, vec!["a", "b", "c", "a"]);
    assert!(!cycles[0].contains("entry"));
}

#[test]
fn first_per_root_stops_after_first_cycle() {
    let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "A"), ("B", "C"), ("C", "A")]);

    let cycles = CycleDetector::new(CycleMode::FirstPerRoot).detect(&g);
    let rendered: Vec<String> = cycles.iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered, vec!["A -> B -> A"]);
}

#[test]
fn all_back_edges_reports_overlapping_cycles() {
    let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "A"), ("B", "C"), ("C", "A")]);

    let cycles = CycleDetector::new(CycleMode::AllBackEdges).detect(&g);
    let rendered: Vec<String> = cycles.iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered, vec!["A -> B -> A", "A -> B -> C -> A"]);
}

#[test]
fn separate_components_each_report_a_cycle() {
    let g = graph(
        &["a", "b", "x", "y"],
        &[("a", "b"), ("b", "a"), ("x", "y"), ("y", "x")],
    );

    let cycles = CycleDetector::default().detect(&g);
    let rendered: Vec<String> = cycles.iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered, vec!["a -> b -> a", "x -> y -> x"]);
}

#[test]
fn later_roots_do_not_see_stale_stack_entries() {
    // "late" reaches the already explored cycle through a visited node.
    let g = graph(
        &["a", "b", "late"],
        &[("a", "b"), ("b", "a"), ("late", "b")],
    );

    let cycles = CycleDetector::default().detect(&g);
    assert_eq!(cycles.len(), 1);
}

#[test]
fn detection_is_deterministic() {
    let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
    let detector = CycleDetector::default();
    assert_eq!(detector.detect(&g), detector.detect(&g));
}
