//! Cumulative edge-weight table and proportional edge sampling.

use crate::error::{GraphError, Result};

use super::{EdgeKey, WeightedGraph, weights_agree};

impl WeightedGraph {
    /// Recomputes the prefix sums over the edge table.
    ///
    /// Must be called after any edge mutation before
    /// [`Self::sample_edge_by_weight`]. The incrementally maintained total
    /// weight is replaced by the exact sum so drift cannot accumulate.
    pub fn rebuild_cumulative_weights(&mut self) {
        self.cumulative.clear();
        self.cumulative.reserve(self.edge_table.len());
        let mut running = 0.0;
        for &(_, weight) in &self.edge_table {
            running += weight;
            self.cumulative.push(running);
        }
        debug_assert!(
            weights_agree(running, self.total_weight),
            "total weight {} drifted from edge sum {running}",
            self.total_weight,
        );
        self.total_weight = running;
        self.cumulative_stale = false;
    }

    /// Returns the cumulative weight table. Meaningful only after
    /// [`Self::rebuild_cumulative_weights`].
    #[must_use]
    pub fn cumulative_weights(&self) -> &[f64] {
        &self.cumulative
    }

    /// Returns `true` when edges changed since the table was last rebuilt.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_sampling_table_stale(&self) -> bool { self.cumulative_stale }

    /// Resolves `value` in `[0, total_weight)` to the first edge whose
    /// cumulative weight is at least `value`.
    ///
    /// Drawing `value` uniformly yields each edge with probability
    /// proportional to its weight.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyGraph`] when the graph has no edges,
    /// [`GraphError::StaleSamplingTable`] when edges changed since the last
    /// rebuild, and [`GraphError::SampleOutOfRange`] when `value` is outside
    /// `[0, total_weight)`.
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
    /// graph.add_edge(b, c, 3.0)?;
    /// graph.rebuild_cumulative_weights();
    ///
    /// assert_eq!(graph.sample_edge_by_weight(0.5)?.endpoints(), (a, b));
    /// assert_eq!(graph.sample_edge_by_weight(1.5)?.endpoints(), (b, c));
    /// # Ok::<(), meshcut_core::GraphError>(())
    /// ```
    pub fn sample_edge_by_weight(&self, value: f64) -> Result<EdgeKey> {
        if self.edge_table.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        if self.cumulative_stale {
            return Err(GraphError::StaleSamplingTable);
        }
        let total = self.cumulative.last().copied().unwrap_or(0.0);
        if !(0.0..total).contains(&value) {
            return Err(GraphError::SampleOutOfRange { value, total });
        }
        let slot = self.cumulative.partition_point(|&running| running < value);
        self.edge_table
            .get(slot)
            .map(|&(key, _)| key)
            .ok_or(GraphError::SampleOutOfRange { value, total })
    }
}
