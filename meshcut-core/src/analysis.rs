//! Common seam for topology analyses.

use crate::graph::WeightedGraph;

/// An analysis that can be run over a topology graph.
///
/// Hosts hold analyses behind this trait to run them uniformly over each
/// fresh snapshot. Implementations never modify the graph.
///
/// # Examples
/// ```
/// use meshcut_core::{Analysis, ArticulationPointFinder, NodeId, StoerWagner, WeightedGraph};
///
/// fn summarise<A: Analysis>(analysis: &A, graph: &WeightedGraph) -> A::Output {
///     analysis.analyse(graph)
/// }
///
/// let mut graph = WeightedGraph::new();
/// graph.add_node(NodeId::new(1));
/// assert!(summarise(&ArticulationPointFinder, &graph).is_empty());
/// assert!(summarise(&StoerWagner, &graph).is_none());
/// ```
pub trait Analysis {
    /// Result produced for one graph.
    type Output;

    /// Runs the analysis over `graph`.
    fn analyse(&self, graph: &WeightedGraph) -> Self::Output;
}
