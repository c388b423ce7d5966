//! Connected-component queries. Weights are ignored.

use std::collections::{HashSet, VecDeque};

use crate::node::NodeId;

use super::WeightedGraph;

impl WeightedGraph {
    /// Returns the connected components, each listed in breadth-first order
    /// from its first node in graph order.
    #[must_use]
    pub fn components(&self) -> Vec<Vec<NodeId>> {
        let mut seen = HashSet::with_capacity(self.node_count());
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for root in self.nodes() {
            if !seen.insert(root) {
                continue;
            }
            let mut component = Vec::new();
            queue.push_back(root);
            while let Some(node) = queue.pop_front() {
                component.push(node);
                for &neighbour in self.neighbours(node).unwrap_or_default() {
                    if seen.insert(neighbour) {
                        queue.push_back(neighbour);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Returns the number of connected components (zero for an empty graph).
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components().len()
    }

    /// Returns `true` when the graph has at least one node and a single component.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.component_count() == 1
    }
}
