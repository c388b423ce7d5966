//! Exact global minimum cut by maximum-adjacency ordering (Stoer–Wagner).
//!
//! Runs in `O(n³)` over a dense weight matrix, which is comfortable for mesh
//! sizes and makes it a useful oracle for the randomized search.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{analysis::Analysis, graph::WeightedGraph, node::NodeId};

use super::MinCut;

/// Deterministic exact minimum-cut analysis.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoerWagner;

impl Analysis for StoerWagner {
    type Output = Option<MinCut>;

    fn analyse(&self, graph: &WeightedGraph) -> Self::Output {
        stoer_wagner(graph)
    }
}

/// Returns an exact global minimum cut of `graph`, or `None` when the graph
/// has fewer than two nodes. Disconnected graphs yield a zero-weight cut.
///
/// Among equally light cuts the first one found wins, so the result is a
/// pure function of the graph's node and edge order.
///
/// # Examples
/// ```
/// use meshcut_core::{NodeId, WeightedGraph, stoer_wagner};
///
/// let nodes = [1, 2, 3, 4].map(NodeId::new);
/// let mut graph = WeightedGraph::new();
/// for node in nodes {
///     graph.add_node(node);
/// }
/// graph.add_edge(nodes[0], nodes[1], 3.0)?;
/// graph.add_edge(nodes[1], nodes[2], 1.0)?;
/// graph.add_edge(nodes[2], nodes[3], 3.0)?;
/// graph.add_edge(nodes[3], nodes[0], 1.0)?;
///
/// let cut = stoer_wagner(&graph).expect("four nodes");
/// assert_eq!(cut.weight(), 2.0);
/// assert_eq!(cut.side_a(), &nodes[..2]);
/// # Ok::<(), meshcut_core::GraphError>(())
/// ```
#[must_use]
#[instrument(
    name = "mincut.stoer_wagner",
    level = "debug",
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn stoer_wagner(graph: &WeightedGraph) -> Option<MinCut> {
    let order: Vec<NodeId> = graph.nodes().collect();
    let count = order.len();
    if count < 2 {
        return None;
    }
    let index: HashMap<NodeId, usize> = order
        .iter()
        .enumerate()
        .map(|(position, &node)| (node, position))
        .collect();

    let mut weights = vec![vec![0.0_f64; count]; count];
    for (edge, weight) in graph.edges() {
        if let (Some(&low), Some(&high)) = (index.get(&edge.low()), index.get(&edge.high())) {
            weights[low][high] = weight;
            weights[high][low] = weight;
        }
    }

    let mut groups: Vec<Vec<usize>> = (0..count).map(|position| vec![position]).collect();
    let mut active: Vec<usize> = (0..count).collect();
    let mut best: Option<(f64, Vec<usize>)> = None;

    while active.len() > 1 {
        let (previous, last, phase_cut) = maximum_adjacency_phase(&weights, &active);
        if best.as_ref().is_none_or(|(weight, _)| phase_cut < *weight) {
            best = Some((phase_cut, groups[last].clone()));
        }

        let absorbed = std::mem::take(&mut groups[last]);
        groups[previous].extend(absorbed);
        for other in 0..count {
            if other != previous && other != last {
                let merged = weights[previous][other] + weights[last][other];
                weights[previous][other] = merged;
                weights[other][previous] = merged;
            }
        }
        active.retain(|&node| node != last);
    }

    let (weight, group) = best?;
    let mut membership = vec![false; count];
    for position in group {
        membership[position] = true;
    }
    debug!(weight, "stoer-wagner cut");
    Some(MinCut::from_membership(&order, weight, &membership))
}

/// Adds active nodes one at a time, always taking the node most tightly
/// connected to those already added. Returns the last two nodes added and
/// the cut-of-the-phase weight.
fn maximum_adjacency_phase(weights: &[Vec<f64>], active: &[usize]) -> (usize, usize, f64) {
    let count = weights.len();
    let mut attachment = vec![0.0_f64; count];
    let mut added = vec![false; count];
    let start = active[0];
    added[start] = true;
    for &node in active {
        attachment[node] = weights[start][node];
    }

    let mut previous = start;
    let mut last = start;
    for _ in 1..active.len() {
        let mut next = None;
        for &node in active {
            if added[node] {
                continue;
            }
            match next {
                Some(best) if attachment[best] >= attachment[node] => {}
                _ => next = Some(node),
            }
        }
        let Some(next) = next else {
            break;
        };
        added[next] = true;
        previous = last;
        last = next;
        for &node in active {
            if !added[node] {
                attachment[node] += weights[next][node];
            }
        }
    }
    (previous, last, attachment[last])
}
