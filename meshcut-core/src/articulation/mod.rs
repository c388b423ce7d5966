//! Articulation-point (cut vertex) detection.
//!
//! Implements Tarjan's low-link depth-first search. The traversal keeps an
//! explicit stack of frames instead of recursing, so very long chains in a
//! large mesh cannot exhaust the call stack. Edge weights are ignored; only
//! connectivity matters.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{analysis::Analysis, graph::WeightedGraph, node::NodeId};

/// Finds the nodes whose removal disconnects part of the network.
///
/// # Examples
/// ```
/// use meshcut_core::{Analysis, ArticulationPointFinder, NodeId, WeightedGraph};
///
/// let [a, b, c] = [1, 2, 3].map(NodeId::new);
/// let mut graph = WeightedGraph::new();
/// for node in [a, b, c] {
///     graph.add_node(node);
/// }
/// graph.add_edge(a, b, 1.0)?;
/// graph.add_edge(b, c, 1.0)?;
///
/// assert_eq!(ArticulationPointFinder.analyse(&graph), vec![b]);
/// # Ok::<(), meshcut_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ArticulationPointFinder;

impl Analysis for ArticulationPointFinder {
    type Output = Vec<NodeId>;

    fn analyse(&self, graph: &WeightedGraph) -> Self::Output {
        articulation_points(graph)
    }
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    node: usize,
    cursor: usize,
    parent: Option<usize>,
    children: usize,
}

/// Low-link bookkeeping for one traversal, indexed by dense node position.
struct Search<'a> {
    graph: &'a WeightedGraph,
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    discovery: Vec<Option<usize>>,
    low: Vec<usize>,
    marked: Vec<bool>,
    clock: usize,
}

impl<'a> Search<'a> {
    fn new(graph: &'a WeightedGraph) -> Self {
        let ids: Vec<NodeId> = graph.nodes().collect();
        let index = ids
            .iter()
            .enumerate()
            .map(|(position, &node)| (node, position))
            .collect();
        let count = ids.len();
        Self {
            graph,
            ids,
            index,
            discovery: vec![None; count],
            low: vec![0; count],
            marked: vec![false; count],
            clock: 0,
        }
    }

    fn discover(&mut self, node: usize) {
        self.discovery[node] = Some(self.clock);
        self.low[node] = self.clock;
        self.clock += 1;
    }

    fn run(mut self) -> Vec<NodeId> {
        let mut stack = Vec::new();
        for root in 0..self.ids.len() {
            if self.discovery[root].is_some() {
                continue;
            }
            self.discover(root);
            stack.push(Frame {
                node: root,
                cursor: 0,
                parent: None,
                children: 0,
            });
            while let Some(&frame) = stack.last() {
                match self.next_neighbour(frame) {
                    Some(next) => {
                        if let Some(top) = stack.last_mut() {
                            top.cursor += 1;
                        }
                        self.explore_edge(&mut stack, frame, next);
                    }
                    None => {
                        stack.pop();
                        self.retreat(stack.last().copied(), frame);
                    }
                }
            }
        }

        self.ids
            .iter()
            .zip(&self.marked)
            .filter_map(|(&node, &marked)| marked.then_some(node))
            .collect()
    }

    fn next_neighbour(&self, frame: Frame) -> Option<usize> {
        let id = self.ids[frame.node];
        let neighbours = self.graph.neighbours(id).unwrap_or_default();
        neighbours
            .get(frame.cursor)
            .and_then(|neighbour| self.index.get(neighbour).copied())
    }

    fn explore_edge(&mut self, stack: &mut Vec<Frame>, frame: Frame, next: usize) {
        match self.discovery[next] {
            None => {
                if let Some(top) = stack.last_mut() {
                    top.children += 1;
                }
                self.discover(next);
                stack.push(Frame {
                    node: next,
                    cursor: 0,
                    parent: Some(frame.node),
                    children: 0,
                });
            }
            Some(discovered) if frame.parent != Some(next) => {
                self.low[frame.node] = self.low[frame.node].min(discovered);
            }
            Some(_) => {}
        }
    }

    /// Folds a finished child's low-link into its parent and applies the
    /// cut-vertex rules.
    fn retreat(&mut self, parent: Option<Frame>, finished: Frame) {
        let Some(parent) = parent else {
            if finished.children > 1 {
                self.marked[finished.node] = true;
            }
            return;
        };
        let child_low = self.low[finished.node];
        self.low[parent.node] = self.low[parent.node].min(child_low);
        let parent_discovery = self.discovery[parent.node].unwrap_or(usize::MAX);
        if parent.parent.is_some() && child_low >= parent_discovery {
            self.marked[parent.node] = true;
        }
    }
}

/// Returns the articulation points of `graph` in graph node order.
///
/// Every connected component is searched, so disconnected graphs are
/// handled. Graphs with fewer than three nodes, and edgeless graphs, have
/// none.
#[must_use]
#[instrument(
    name = "articulation.find",
    level = "debug",
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn articulation_points(graph: &WeightedGraph) -> Vec<NodeId> {
    let found = Search::new(graph).run();
    debug!(found = found.len(), "articulation search complete");
    found
}

#[cfg(test)]
mod tests;
