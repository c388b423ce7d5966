//! Global minimum cut estimation.
//!
//! [`karger_stein`] runs one randomized Karger–Stein recursion;
//! [`MinCutSearch`] repeats it under a configurable trial count, seed and
//! execution strategy. [`stoer_wagner`] computes the exact minimum
//! deterministically and serves as a slower reference.
//!
//! Every cut carries the node partition it induces, so callers can see which
//! nodes fall on each side and which links realise the cut.

mod karger_stein;
mod search;
mod stoer_wagner;
mod union_find;
mod working;

use std::collections::HashSet;

use crate::{graph::WeightedGraph, node::NodeId};

pub use self::{
    karger_stein::{contract_to, karger_stein},
    search::{MinCutSearch, MinCutSearchBuilder},
    stoer_wagner::{StoerWagner, stoer_wagner},
};

/// Selects how independent pieces of a min-cut search are scheduled.
///
/// Both strategies produce identical results for the same seed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExecutionStrategy {
    /// Run everything on the calling thread.
    #[default]
    Sequential,
    /// Fan recursion branches and trials out over the rayon thread pool.
    /// Requires the `parallel` feature.
    Parallel,
}

/// A link of the analysed graph that crosses a cut.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossingLink {
    /// Endpoint on [`MinCut::side_a`].
    pub a: NodeId,
    /// Endpoint on [`MinCut::side_b`].
    pub b: NodeId,
    /// Link weight.
    pub weight: f64,
}

/// A two-way partition of a graph's nodes and the weight of the links
/// between the sides.
///
/// `side_a` always holds the first node of the analysed graph. Both sides
/// list nodes in the analysed graph's node order and are non-empty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinCut {
    weight: f64,
    side_a: Vec<NodeId>,
    side_b: Vec<NodeId>,
}

impl MinCut {
    /// Builds a cut from per-node side flags over `order`. Nodes whose flag
    /// matches the first node's land on side A.
    pub(crate) fn from_membership(order: &[NodeId], weight: f64, membership: &[bool]) -> Self {
        let anchor = membership.first().copied().unwrap_or(true);
        let (side_a, side_b) = order
            .iter()
            .zip(membership)
            .partition::<Vec<_>, _>(|&(_, &flag)| flag == anchor);
        Self {
            weight,
            side_a: side_a.into_iter().map(|(&node, _)| node).collect(),
            side_b: side_b.into_iter().map(|(&node, _)| node).collect(),
        }
    }

    /// Total weight of the links crossing the cut.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }

    /// Nodes on the side holding the graph's first node.
    #[must_use]
    #[rustfmt::skip]
    pub fn side_a(&self) -> &[NodeId] { &self.side_a }

    /// Nodes on the other side.
    #[must_use]
    #[rustfmt::skip]
    pub fn side_b(&self) -> &[NodeId] { &self.side_b }

    /// Returns the links of `graph` with one endpoint on each side, in edge
    /// order, oriented from side A to side B.
    ///
    /// Pass the graph the cut was computed on; links touching nodes outside
    /// the partition are skipped.
    ///
    /// # Examples
    /// ```
    /// use meshcut_core::{NodeId, StoerWagner, Analysis, WeightedGraph};
    ///
    /// let [a, b, c] = [1, 2, 3].map(NodeId::new);
    /// let mut graph = WeightedGraph::new();
    /// for node in [a, b, c] {
    ///     graph.add_node(node);
    /// }
    /// graph.add_edge(a, b, 5.0)?;
    /// graph.add_edge(b, c, 1.0)?;
    ///
    /// let cut = StoerWagner.analyse(&graph).expect("three nodes");
    /// let links = cut.crossing_links(&graph);
    /// assert_eq!(links.len(), 1);
    /// assert_eq!((links[0].a, links[0].b, links[0].weight), (b, c, 1.0));
    /// # Ok::<(), meshcut_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn crossing_links(&self, graph: &WeightedGraph) -> Vec<CrossingLink> {
        let side_a: HashSet<NodeId> = self.side_a.iter().copied().collect();
        let side_b: HashSet<NodeId> = self.side_b.iter().copied().collect();
        graph
            .edges()
            .filter_map(|(edge, weight)| {
                let (low, high) = edge.endpoints();
                if side_a.contains(&low) && side_b.contains(&high) {
                    Some(CrossingLink { a: low, b: high, weight })
                } else if side_b.contains(&low) && side_a.contains(&high) {
                    Some(CrossingLink { a: high, b: low, weight })
                } else {
                    None
                }
            })
            .collect()
    }
}
