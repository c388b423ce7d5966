//! Unit tests for articulation-point detection.

use std::collections::HashSet;

use meshcut_test_support::{
    topologies::{self, KnownTopology},
    tracing::RecordingLayer,
};
use proptest::prelude::*;
use rstest::rstest;

use crate::{
    NodeId, WeightedGraph,
    test_utils::{graph_from, graph_from_fixture, ids, suite_proptest_config},
};

use super::articulation_points;

#[rstest]
#[case::path(topologies::path(5))]
#[case::short_path(topologies::path(2))]
#[case::star(topologies::star(4))]
#[case::ring(topologies::ring(5))]
#[case::barbell(topologies::barbell())]
#[case::twin_clusters(topologies::twin_clusters())]
#[case::islands(topologies::islands())]
fn finds_known_articulation_points(#[case] known: KnownTopology) {
    let graph = graph_from_fixture(&known.fixture);
    assert_eq!(articulation_points(&graph), ids(&known.articulation));
}

#[rstest]
#[case::empty(&[], &[])]
#[case::single(&[1], &[])]
#[case::pair(&[1, 2], &[(1, 2, 1.0)])]
#[case::edgeless(&[1, 2, 3], &[])]
fn tiny_graphs_have_none(#[case] nodes: &[u32], #[case] links: &[(u32, u32, f64)]) {
    assert!(articulation_points(&graph_from(nodes, links)).is_empty());
}

#[test]
fn triangle_has_none() {
    let graph = graph_from(&[1, 2, 3], &[(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0)]);
    assert!(articulation_points(&graph).is_empty());
}

#[test]
fn root_with_single_child_is_not_marked() {
    // DFS starts at 1, whose only child is 2; 2 then separates 1 from 3.
    let graph = graph_from(&[1, 2, 3], &[(1, 2, 1.0), (2, 3, 1.0)]);
    assert_eq!(articulation_points(&graph), ids(&[2]));
}

#[test]
fn results_follow_node_order_across_components() {
    let graph = graph_from(
        &[9, 8, 7, 3, 2, 1],
        &[(9, 8, 1.0), (8, 7, 1.0), (3, 2, 1.0), (2, 1, 1.0)],
    );
    assert_eq!(articulation_points(&graph), ids(&[8, 2]));
}

#[rstest]
#[case(1, 12)]
#[case(5, 30)]
#[case(17, 64)]
fn every_inner_tree_node_is_a_cut_vertex(#[case] seed: u64, #[case] size: u32) {
    let graph = graph_from_fixture(&topologies::random_connected(seed, size, 0));
    let inner: Vec<NodeId> = graph
        .nodes()
        .filter(|&node| graph.neighbours(node).is_some_and(|around| around.len() > 1))
        .collect();
    assert_eq!(articulation_points(&graph), inner);
}

#[test]
fn long_chains_do_not_exhaust_the_stack() {
    let nodes: Vec<u32> = (1..=200_000).collect();
    let links: Vec<_> = nodes.windows(2).map(|pair| (pair[0], pair[1], 1.0)).collect();
    let graph = graph_from(&nodes, &links);
    let found = articulation_points(&graph);
    assert_eq!(found.len(), nodes.len() - 2);
    assert_eq!(found.first(), Some(&NodeId::new(2)));
}

#[test]
fn emits_articulation_span() {
    let graph = graph_from_fixture(&topologies::barbell().fixture);
    let (found, recorded) = RecordingLayer::capture(|| articulation_points(&graph));
    assert_eq!(found.len(), 2);
    let span = recorded.span("articulation.find").expect("span recorded");
    assert_eq!(span.fields.get("nodes").map(String::as_str), Some("6"));
    assert_eq!(span.fields.get("edges").map(String::as_str), Some("7"));
}

/// Reference check: `node` is a cut vertex iff removing it increases the
/// number of components.
fn splits_graph(graph: &WeightedGraph, node: NodeId) -> bool {
    let before = graph.component_count();
    let mut reduced = graph.clone();
    if reduced.remove_node(node).is_err() {
        return false;
    }
    reduced.component_count() > before
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn matches_removal_oracle(
        node_count in 1_u32..14,
        raw_links in prop::collection::vec((1_u32..14, 1_u32..14), 0..30),
    ) {
        let nodes: Vec<u32> = (1..=node_count).collect();
        let links: Vec<(u32, u32, f64)> = raw_links
            .into_iter()
            .filter(|&(a, b)| a != b && a <= node_count && b <= node_count)
            .map(|(a, b)| (a, b, 1.0))
            .collect();
        let graph = graph_from(&nodes, &links);

        let found: HashSet<NodeId> = articulation_points(&graph).into_iter().collect();
        for node in graph.nodes() {
            prop_assert_eq!(found.contains(&node), splits_graph(&graph, node), "node {}", node);
        }
    }
}
