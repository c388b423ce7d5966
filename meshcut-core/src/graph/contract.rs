//! Node contraction.

use tracing::trace;

use crate::{
    error::{GraphError, Result},
    node::NodeId,
};

use super::{EdgeKey, WeightedGraph};

impl WeightedGraph {
    /// Merges `absorbed` into `survivor`.
    ///
    /// Every edge `absorbed`–`w` (with `w != survivor`) has its weight added
    /// to `survivor`–`w`. The edge between the two nodes becomes a self-loop
    /// and is discarded, then `absorbed` is removed. The total weight and the
    /// weighted degrees of every touched node are recomputed from the edges,
    /// and the sampling table is marked stale.
    ///
    /// Returns the discarded `survivor`–`absorbed` weight; the graph's total
    /// weight drops by exactly that amount. Contracting non-adjacent nodes is
    /// allowed and discards nothing.
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] when both arguments name the same
    /// node, [`GraphError::UnknownNode`] when either is absent, and
    /// [`GraphError::InvalidWeight`] when a merged weight would overflow. The
    /// graph is unchanged on error.
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
    /// graph.add_edge(a, b, 1.0)?;
    /// graph.add_edge(b, c, 2.0)?;
    /// graph.add_edge(a, c, 0.5)?;
    ///
    /// let discarded = graph.contract(a, b)?;
    /// assert_eq!(discarded, 1.0);
    /// assert_eq!(graph.node_count(), 2);
    /// assert_eq!(graph.edge_weight(a, c), 2.5);
    /// assert_eq!(graph.total_weight(), 2.5);
    /// # Ok::<(), meshcut_core::GraphError>(())
    /// ```
    pub fn contract(&mut self, survivor: NodeId, absorbed: NodeId) -> Result<f64> {
        if survivor == absorbed {
            return Err(GraphError::SelfLoop { node: survivor });
        }
        self.require(survivor)?;
        let merged: Vec<(NodeId, f64)> = self
            .neighbours(absorbed)
            .ok_or(GraphError::UnknownNode { node: absorbed })?
            .iter()
            .filter(|&&neighbour| neighbour != survivor)
            .map(|&neighbour| {
                let weight =
                    self.edge_weight(absorbed, neighbour) + self.edge_weight(survivor, neighbour);
                (neighbour, weight)
            })
            .collect();
        if let Some(&(neighbour, weight)) = merged.iter().find(|(_, weight)| !weight.is_finite()) {
            return Err(GraphError::InvalidWeight { a: survivor, b: neighbour, weight });
        }
        let discarded = self.edge_weight(survivor, absorbed);

        self.remove_node(absorbed)?;
        for &(neighbour, weight) in &merged {
            self.set_weight(EdgeKey::canonical(survivor, neighbour), weight);
        }
        self.total_weight = self.exact_total_weight();
        self.refresh_weighted_degree(survivor);
        for &(neighbour, _) in &merged {
            self.refresh_weighted_degree(neighbour);
        }

        trace!(%survivor, %absorbed, discarded, nodes = self.node_count(), "contracted");
        debug_assert!(
            self.check_invariants().is_ok(),
            "contraction broke graph invariants: {:?}",
            self.check_invariants(),
        );
        Ok(discarded)
    }

    fn refresh_weighted_degree(&mut self, node: NodeId) {
        let exact = self.incident_weight(node);
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.weighted_degree = exact;
        }
    }
}
