//! Weighted undirected graph container for mesh topologies.
//!
//! [`WeightedGraph`] owns the node set, adjacency, edge weights and the
//! derived cumulative weight table used for proportional edge sampling.
//!
//! Iteration order is fixed so analyses are reproducible:
//!
//! - nodes iterate in insertion order; removing a node keeps the relative
//!   order of the others;
//! - each node's neighbours iterate in the order their edges were created;
//! - edges live in a dense table. New edges append; removing an edge moves
//!   the last edge into the vacated slot. The table order, and therefore the
//!   cumulative weight table, is a pure function of the mutation sequence.
//!
//! A weight of zero means "no edge", so every stored edge has a strictly
//! positive weight and self-loops are never stored.

mod connectivity;
mod contract;
mod edge;
pub mod invariants;
mod sampling;

use std::collections::{HashMap, HashSet};

use crate::{
    error::{GraphError, Result},
    node::NodeId,
};

pub use self::edge::EdgeKey;

#[derive(Clone, Debug, Default)]
struct NodeEntry {
    neighbours: Vec<NodeId>,
    weighted_degree: f64,
}

/// A weighted undirected graph over [`NodeId`]s.
///
/// `Clone` produces a fully independent deep copy, so clones can be mutated
/// (for example by contraction) without affecting the original.
///
/// # Examples
/// ```
/// use meshcut_core::{NodeId, WeightedGraph};
///
/// let [a, b, c] = [1, 2, 3].map(NodeId::new);
/// let mut graph = WeightedGraph::new();
/// for node in [a, b, c] {
///     graph.add_node(node);
/// }
/// graph.add_edge(a, b, 2.0)?;
/// graph.add_edge(b, c, 1.5)?;
///
/// assert_eq!(graph.edge_weight(b, a), 2.0);
/// assert_eq!(graph.edge_weight(a, c), 0.0);
/// assert_eq!(graph.total_weight(), 3.5);
/// assert_eq!(graph.weighted_degree(b), Some(3.5));
/// # Ok::<(), meshcut_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct WeightedGraph {
    order: Vec<NodeId>,
    nodes: HashMap<NodeId, NodeEntry>,
    edge_table: Vec<(EdgeKey, f64)>,
    edge_slots: HashMap<EdgeKey, usize>,
    total_weight: f64,
    cumulative: Vec<f64>,
    cumulative_stale: bool,
}

impl WeightedGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for the given numbers of nodes and edges.
    #[must_use]
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            order: Vec::with_capacity(nodes),
            nodes: HashMap::with_capacity(nodes),
            edge_table: Vec::with_capacity(edges),
            edge_slots: HashMap::with_capacity(edges),
            ..Self::default()
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.order.len() }

    /// Returns the number of edges with non-zero weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_table.len() }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Returns the sum of all edge weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_weight(&self) -> f64 { self.total_weight }

    /// Returns `true` when `node` is in the graph.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Iterates nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Returns the neighbours of `node` in edge-creation order, or `None`
    /// when the node is absent.
    #[must_use]
    pub fn neighbours(&self, node: NodeId) -> Option<&[NodeId]> {
        self.nodes.get(&node).map(|entry| entry.neighbours.as_slice())
    }

    /// Iterates edges and their weights in edge-table order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EdgeKey, f64)> + '_ {
        self.edge_table.iter().copied()
    }

    /// Adds an isolated node. Returns `false` if the node was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.order.push(node);
        self.nodes.insert(node, NodeEntry::default());
        true
    }

    /// Sets the weight of the undirected edge `a`–`b`.
    ///
    /// Any previous weight is replaced. A weight of zero removes the edge.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when `a == b`,
    /// [`GraphError::InvalidWeight`] when `weight` is negative or not finite
    /// or would push the total weight past `f64::MAX`, and
    /// [`GraphError::UnknownNode`] when either endpoint is absent. The graph
    /// is unchanged on error.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<()> {
        if a == b {
            return Err(GraphError::SelfLoop { node: a });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { a, b, weight });
        }
        self.require(a)?;
        self.require(b)?;
        let delta = weight - self.edge_weight(a, b);
        if !(self.total_weight + delta).is_finite() {
            return Err(GraphError::InvalidWeight { a, b, weight });
        }
        self.set_weight(EdgeKey::canonical(a, b), weight);
        Ok(())
    }

    /// Removes the edge `a`–`b` and returns its former weight (zero when
    /// there was no edge).
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when either endpoint is absent.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Result<f64> {
        self.require(a)?;
        self.require(b)?;
        if a == b {
            return Ok(0.0);
        }
        Ok(self.detach_edge(EdgeKey::canonical(a, b)))
    }

    /// Removes `node` together with all of its incident edges.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] when the node is absent.
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        let neighbours = self
            .nodes
            .get(&node)
            .map(|entry| entry.neighbours.clone())
            .ok_or(GraphError::UnknownNode { node })?;
        for neighbour in neighbours {
            self.detach_edge(EdgeKey::canonical(node, neighbour));
        }
        self.nodes.remove(&node);
        if let Some(position) = self.order.iter().position(|&existing| existing == node) {
            self.order.remove(position);
        }
        Ok(())
    }

    /// Returns the weight of `a`–`b`, or zero when there is no such edge.
    #[must_use]
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> f64 {
        if a == b {
            return 0.0;
        }
        self.edge_slots
            .get(&EdgeKey::canonical(a, b))
            .and_then(|&slot| self.edge_table.get(slot))
            .map_or(0.0, |&(_, weight)| weight)
    }

    /// Returns the weighted-degree bookkeeping value for `node`.
    #[must_use]
    pub fn weighted_degree(&self, node: NodeId) -> Option<f64> {
        self.nodes.get(&node).map(|entry| entry.weighted_degree)
    }

    /// Returns the weight of the cut separating `subset` from the rest of
    /// the graph: the sum of weights of edges with exactly one endpoint in
    /// `subset`. Ids in `subset` that are not in the graph are ignored.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashSet;
    /// use meshcut_core::{NodeId, WeightedGraph};
    ///
    /// let [a, b, c] = [1, 2, 3].map(NodeId::new);
    /// let mut graph = WeightedGraph::new();
    /// for node in [a, b, c] {
    ///     graph.add_node(node);
    /// }
    /// graph.add_edge(a, b, 1.0)?;
    /// graph.add_edge(b, c, 4.0)?;
    /// graph.add_edge(a, c, 2.0)?;
    ///
    /// let subset = HashSet::from([a]);
    /// assert_eq!(graph.cut_weight(&subset), 3.0);
    /// # Ok::<(), meshcut_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn cut_weight(&self, subset: &HashSet<NodeId>) -> f64 {
        self.edge_table
            .iter()
            .filter(|(key, _)| subset.contains(&key.low()) != subset.contains(&key.high()))
            .map(|&(_, weight)| weight)
            .sum()
    }

    fn require(&self, node: NodeId) -> Result<()> {
        if self.nodes.contains_key(&node) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode { node })
        }
    }

    /// Writes `weight` for an existing or new edge. Endpoints must exist and
    /// differ; zero detaches the edge.
    fn set_weight(&mut self, key: EdgeKey, weight: f64) {
        if weight == 0.0 {
            self.detach_edge(key);
            return;
        }
        let delta = match self.edge_slots.get(&key).copied() {
            Some(slot) => {
                let Some(entry) = self.edge_table.get_mut(slot) else {
                    return;
                };
                let delta = weight - entry.1;
                entry.1 = weight;
                delta
            }
            None => {
                self.edge_slots.insert(key, self.edge_table.len());
                self.edge_table.push((key, weight));
                for (node, neighbour) in [(key.low(), key.high()), (key.high(), key.low())] {
                    if let Some(entry) = self.nodes.get_mut(&node) {
                        entry.neighbours.push(neighbour);
                    }
                }
                weight
            }
        };
        for node in [key.low(), key.high()] {
            self.adjust_weighted_degree(node, delta);
        }
        self.adjust_total_weight(delta);
        self.cumulative_stale = true;
    }

    /// Removes `key` if present and returns its weight.
    fn detach_edge(&mut self, key: EdgeKey) -> f64 {
        let Some(slot) = self.edge_slots.remove(&key) else {
            return 0.0;
        };
        let (_, weight) = self.edge_table.swap_remove(slot);
        if let Some(&(moved, _)) = self.edge_table.get(slot) {
            self.edge_slots.insert(moved, slot);
        }
        for (node, neighbour) in [(key.low(), key.high()), (key.high(), key.low())] {
            if let Some(entry) = self.nodes.get_mut(&node) {
                if let Some(position) = entry.neighbours.iter().position(|&n| n == neighbour) {
                    entry.neighbours.remove(position);
                }
            }
            self.adjust_weighted_degree(node, -weight);
        }
        self.adjust_total_weight(-weight);
        self.cumulative_stale = true;
        weight
    }

    /// Applies `delta` to the running total.
    ///
    /// When a decrease removes more than what is left, the rounding error of
    /// the old total would dominate the remainder, so the total is summed
    /// again from the edge table.
    fn adjust_total_weight(&mut self, delta: f64) {
        let next = self.total_weight + delta;
        self.total_weight = if -delta > next { self.exact_total_weight() } else { next };
    }

    /// Applies `delta` to a node's weighted degree, with the same cancellation
    /// guard as [`Self::adjust_total_weight`].
    fn adjust_weighted_degree(&mut self, node: NodeId, delta: f64) {
        let Some(current) = self.nodes.get(&node).map(|entry| entry.weighted_degree) else {
            return;
        };
        let next = current + delta;
        let value = if -delta > next { self.incident_weight(node) } else { next };
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.weighted_degree = value;
        }
    }

    fn exact_total_weight(&self) -> f64 {
        self.edge_table.iter().map(|&(_, weight)| weight).sum()
    }

    fn incident_weight(&self, node: NodeId) -> f64 {
        self.neighbours(node).map_or(0.0, |neighbours| {
            neighbours
                .iter()
                .map(|&neighbour| self.edge_weight(node, neighbour))
                .sum()
        })
    }
}

/// Compares two accumulated weights with a relative tolerance that absorbs
/// floating-point drift from incremental bookkeeping.
pub(crate) fn weights_agree(left: f64, right: f64) -> bool {
    let scale = left.abs().max(right.abs()).max(1.0);
    (left - right).abs() <= 1e-9 * scale
}
