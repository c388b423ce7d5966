//! Unit tests for diffusion centrality.

use meshcut_test_support::{topologies, tracing::RecordingLayer};
use rstest::rstest;

use crate::{
    ConfigError, NodeId, WeightedGraph,
    test_utils::{graph_from, graph_from_fixture},
};

use super::DiffusionCentrality;

fn n(raw: u32) -> NodeId {
    NodeId::new(raw)
}

fn close(left: f64, right: f64) -> bool {
    (left - right).abs() <= 1e-9 * left.abs().max(right.abs()).max(1.0)
}

#[rstest]
#[case(1.0)]
#[case(7.5)]
fn pair_alternates_between_its_ends(#[case] weight: f64) {
    // qA swaps the two nodes, so odd hops land on the peer and even hops return.
    let graph = graph_from(&[1, 2], &[(1, 2, weight)]);
    let scores = DiffusionCentrality::default().scores(&graph);
    assert!(close(scores.centrality(n(1)).expect("scored"), 5.0));
    assert!(close(scores.share(n(1), n(2)).expect("scored"), 0.6));
    assert!(close(scores.share(n(1), n(1)).expect("scored"), 0.4));
}

#[test]
fn single_hop_horizon_is_degree_over_spectral_radius() {
    // Star with three leaves: λmax = √3.
    let graph = graph_from_fixture(&topologies::star(3).fixture);
    let scores = DiffusionCentrality::with_horizon(1).expect("non-zero").scores(&graph);
    let radius = 3.0_f64.sqrt();
    assert!(close(scores.centrality(n(1)).expect("hub"), 3.0 / radius));
    assert!(close(scores.centrality(n(2)).expect("leaf"), 1.0 / radius));
}

#[test]
fn hub_outranks_its_leaves() {
    let graph = graph_from_fixture(&topologies::star(4).fixture);
    let ranked = DiffusionCentrality::default().scores(&graph).ranked();
    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0].0, n(1));
    assert!(ranked[0].1 > ranked[1].1);
    assert!(ranked[1..].windows(2).all(|pair| close(pair[0].1, pair[1].1)));
}

#[test]
fn equal_scores_keep_graph_order() {
    let graph = graph_from(&[4, 2, 9], &[]);
    let order: Vec<NodeId> = DiffusionCentrality::default()
        .scores(&graph)
        .ranked()
        .into_iter()
        .map(|(node, _)| node)
        .collect();
    assert_eq!(order, vec![n(4), n(2), n(9)]);
}

#[test]
fn ring_nodes_score_alike() {
    let graph = graph_from_fixture(&topologies::ring(6).fixture);
    let scores = DiffusionCentrality::default().scores(&graph);
    let first = scores.centrality(n(1)).expect("scored");
    for &node in scores.nodes() {
        assert!(close(scores.centrality(node).unwrap_or(0.0), first), "node {node}");
    }
}

#[rstest]
#[case(topologies::barbell().fixture)]
#[case(topologies::random_connected(4, 12, 6))]
#[case(topologies::islands().fixture)]
fn shares_of_a_linked_node_sum_to_one(#[case] fixture: topologies::Fixture) {
    let graph = graph_from_fixture(&fixture);
    let scores = DiffusionCentrality::default().scores(&graph);
    for &from in scores.nodes() {
        let total: f64 = scores.nodes().iter().filter_map(|&to| scores.share(from, to)).sum();
        let linked = graph.neighbours(from).is_some_and(|around| !around.is_empty());
        assert!(close(total, if linked { 1.0 } else { 0.0 }), "node {from}: {total}");
    }
}

#[test]
fn scaling_every_weight_changes_nothing() {
    let fixture = topologies::random_connected(11, 10, 5);
    let scaled: Vec<(u32, u32, f64)> =
        fixture.links.iter().map(|&(a, b, weight)| (a, b, weight * 1000.0)).collect();
    let base = DiffusionCentrality::default().scores(&graph_from_fixture(&fixture));
    let heavy = DiffusionCentrality::default().scores(&graph_from(&fixture.nodes, &scaled));
    for &node in base.nodes() {
        let left = base.centrality(node).unwrap_or(0.0);
        let right = heavy.centrality(node).unwrap_or(0.0);
        assert!((left - right).abs() <= 1e-6 * left.max(1.0), "node {node}: {left} vs {right}");
    }
}

#[test]
fn graphs_without_links_score_zero() {
    let scores = DiffusionCentrality::default().scores(&graph_from(&[1, 2, 3], &[]));
    assert_eq!(scores.centrality(n(2)), Some(0.0));
    assert_eq!(scores.share(n(1), n(2)), Some(0.0));
    assert_eq!(scores.centrality(n(9)), None);
    assert_eq!(scores.share(n(1), n(9)), None);

    let empty = DiffusionCentrality::default().scores(&WeightedGraph::new());
    assert!(empty.nodes().is_empty() && empty.ranked().is_empty());
}

#[test]
fn zero_horizon_is_rejected() {
    assert_eq!(DiffusionCentrality::with_horizon(0), Err(ConfigError::ZeroHorizon));
    assert_eq!(DiffusionCentrality::default().horizon(), 5);
    assert_eq!(DiffusionCentrality::with_horizon(3).map(|analysis| analysis.horizon()), Ok(3));
}

#[test]
fn emits_diffusion_span() {
    let graph = graph_from_fixture(&topologies::barbell().fixture);
    let analysis = DiffusionCentrality::with_horizon(2).expect("non-zero");
    let (_, recorded) = RecordingLayer::capture(|| analysis.scores(&graph));
    let span = recorded.span("diffusion.centrality").expect("span recorded");
    assert_eq!(span.fields.get("nodes").map(String::as_str), Some("6"));
    assert_eq!(span.fields.get("horizon").map(String::as_str), Some("2"));
}
