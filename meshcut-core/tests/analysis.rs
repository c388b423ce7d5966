//! End-to-end behaviour: neighbour reports in, robustness answers out.

use std::collections::HashSet;

use meshcut_core::{
    Analysis, ArticulationPointFinder, DiffusionCentrality, Link, LinkWeighting,
    MinCutSearchBuilder, NeighbourReport, NodeId, ReportedNeighbour, StoerWagner,
    TopologySnapshot, WeightedGraph, karger_stein,
};
use meshcut_test_support::{logging::init_test_logging, topologies};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

fn graph_from(fixture: &topologies::Fixture) -> WeightedGraph {
    let nodes = fixture.nodes.iter().copied().map(NodeId::new).collect();
    let links = fixture
        .links
        .iter()
        .map(|&(a, b, weight)| Link::new(NodeId::new(a), NodeId::new(b), weight))
        .collect();
    WeightedGraph::from_snapshot(&TopologySnapshot::new(nodes, links)).expect("fixture is valid")
}

fn report(node: u32, received_at: u64, heard: &[(u32, f64)]) -> NeighbourReport {
    NeighbourReport {
        node: NodeId::new(node),
        received_at,
        neighbours: heard
            .iter()
            .map(|&(node, snr_db)| ReportedNeighbour {
                node: NodeId::new(node),
                snr_db,
            })
            .collect(),
    }
}

#[test]
fn reports_flow_through_every_analysis() {
    init_test_logging();
    // Two well-connected groups; 3 and 4 share the only, marginal, bridge.
    let reports = vec![
        report(1, 100, &[(2, 9.0), (3, 8.0)]),
        report(2, 101, &[(1, 9.5), (3, 7.0)]),
        report(3, 102, &[(1, 8.0), (2, 7.0), (4, -12.0)]),
        report(4, 103, &[(3, -11.0), (5, 10.0), (6, 10.0)]),
        report(5, 104, &[(4, 10.0), (6, 12.0)]),
        report(6, 105, &[(4, 9.0), (5, 12.0)]),
    ];
    let snapshot =
        TopologySnapshot::from_neighbour_reports(&reports, LinkWeighting::ShannonCapacity);
    let graph = WeightedGraph::from_snapshot(&snapshot).expect("reconciled snapshot is valid");
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 7);

    let cut_vertices = ArticulationPointFinder.analyse(&graph);
    assert_eq!(cut_vertices, vec![NodeId::new(3), NodeId::new(4)]);

    let exact = StoerWagner.analyse(&graph).expect("six nodes");
    let bridge = LinkWeighting::ShannonCapacity.weight(-11.0);
    assert!((exact.weight() - bridge).abs() < 1e-9);

    let search = MinCutSearchBuilder::new().with_trials(24).with_seed(99).build().expect("valid");
    let estimated = search.analyse(&graph).expect("contraction succeeds").expect("six nodes");
    assert_eq!(estimated.side_a(), exact.side_a());
    let links = estimated.crossing_links(&graph);
    assert_eq!(links.len(), 1);
    assert_eq!((links[0].a, links[0].b), (NodeId::new(3), NodeId::new(4)));

    let diffusion = DiffusionCentrality::default().analyse(&graph);
    assert_eq!(diffusion.nodes().len(), 6);
    let spread: f64 = graph
        .nodes()
        .filter_map(|to| diffusion.share(NodeId::new(1), to))
        .sum();
    assert!((spread - 1.0).abs() < 1e-9);
    // The weak bridge keeps most of node 1's traffic on its own side.
    let own_side: f64 = [1, 2, 3]
        .into_iter()
        .filter_map(|to| diffusion.share(NodeId::new(1), NodeId::new(to)))
        .sum();
    assert!(own_side > 0.9, "own side share {own_side}");
}

#[rstest]
#[case(topologies::path(6).fixture)]
#[case(topologies::star(5).fixture)]
#[case(topologies::barbell().fixture)]
#[case(topologies::random_connected(3, 20, 4))]
#[case(topologies::random_connected(8, 25, 12))]
fn removing_cut_vertices_splits_the_network(#[case] fixture: topologies::Fixture) {
    let graph = graph_from(&fixture);
    let before = graph.component_count();
    let cut_vertices: HashSet<NodeId> =
        ArticulationPointFinder.analyse(&graph).into_iter().collect();

    for node in graph.nodes() {
        let mut reduced = graph.clone();
        reduced.remove_node(node).expect("node is present");
        let splits = reduced.component_count() > before;
        assert_eq!(splits, cut_vertices.contains(&node), "node {node} in {}", fixture.name);
    }
}

#[rstest]
#[case(topologies::twin_clusters())]
#[case(topologies::barbell())]
fn repeated_runs_recover_the_minimum_cut(#[case] known: topologies::KnownTopology) {
    let graph = graph_from(&known.fixture);
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let best = (0..100)
        .filter_map(|_| karger_stein(&graph, &mut rng).expect("contraction succeeds"))
        .map(|cut| cut.weight())
        .fold(f64::INFINITY, f64::min);
    assert!((best - known.min_cut).abs() < 1e-9, "{}: best {best}", known.fixture.name);
}

#[test]
fn analyses_leave_the_graph_untouched() {
    let graph = graph_from(&topologies::twin_clusters().fixture);
    let reference = graph.clone();
    let search = MinCutSearchBuilder::new().with_trials(3).with_seed(1).build().expect("valid");

    let _ = ArticulationPointFinder.analyse(&graph);
    let _ = StoerWagner.analyse(&graph);
    let _ = search.analyse(&graph).expect("contraction succeeds");
    let _ = DiffusionCentrality::default().analyse(&graph);

    assert_eq!(graph.nodes().collect::<Vec<_>>(), reference.nodes().collect::<Vec<_>>());
    assert_eq!(graph.edges().collect::<Vec<_>>(), reference.edges().collect::<Vec<_>>());
    assert_eq!(graph.total_weight(), reference.total_weight());
}

#[test]
fn disconnected_networks_have_a_free_cut() {
    let graph = graph_from(&topologies::islands().fixture);
    let search = MinCutSearchBuilder::new().with_trials(2).with_seed(4).build().expect("valid");
    let cut = search.analyse(&graph).expect("contraction succeeds").expect("four nodes");
    assert_eq!(cut.weight(), 0.0);
    assert!(cut.crossing_links(&graph).is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn snapshots_and_cuts_serialise() {
    let snapshot = TopologySnapshot::new(
        vec![NodeId::new(1), NodeId::new(2)],
        vec![Link::new(NodeId::new(1), NodeId::new(2), 1.5)],
    );
    let json = serde_json::to_string(&snapshot).expect("snapshot serialises");
    assert_eq!(json, r#"{"nodes":[1,2],"links":[{"a":1,"b":2,"weight":1.5}]}"#);
    let back: TopologySnapshot = serde_json::from_str(&json).expect("snapshot deserialises");
    assert_eq!(back, snapshot);

    let graph = WeightedGraph::from_snapshot(&snapshot).expect("valid");
    let cut = StoerWagner.analyse(&graph).expect("two nodes");
    let encoded = serde_json::to_value(&cut).expect("cut serialises");
    assert_eq!(encoded["weight"], 1.5);
    assert_eq!(encoded["side_b"], serde_json::json!([2]));
}
