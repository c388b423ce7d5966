//! Shared test utilities for `meshcut-core`.

use meshcut_test_support::{proptest_profile::ProptestRunProfile, topologies::Fixture};
use proptest::test_runner::Config as ProptestConfig;

use crate::{NodeId, WeightedGraph};

/// Builds a proptest configuration from the shared run profile so every
/// property suite honours `MESHCUT_PROPTEST_CASES`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases);
    ProptestConfig {
        cases: profile.cases(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph over `nodes` with the given weighted links.
pub(crate) fn graph_from(nodes: &[u32], links: &[(u32, u32, f64)]) -> WeightedGraph {
    let mut graph = WeightedGraph::with_capacity(nodes.len(), links.len());
    for &node in nodes {
        graph.add_node(NodeId::new(node));
    }
    for &(a, b, weight) in links {
        graph
            .add_edge(NodeId::new(a), NodeId::new(b), weight)
            .expect("fixture links reference known nodes");
    }
    graph
}

/// Builds the graph described by a shared topology fixture.
pub(crate) fn graph_from_fixture(fixture: &Fixture) -> WeightedGraph {
    graph_from(&fixture.nodes, &fixture.links)
}

/// Wraps raw node numbers.
pub(crate) fn ids(raw: &[u32]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId::new).collect()
}
