//! Structural invariant checks for [`WeightedGraph`].
//!
//! A violation indicates an implementation bug rather than bad input. The
//! checks are exposed so tests can assert graph health after arbitrary
//! mutation sequences, and contraction asserts them in debug builds.

use thiserror::Error;

use crate::node::NodeId;

use super::{EdgeKey, WeightedGraph, weights_agree};

/// Enumerates the invariants enforced by [`WeightedGraph`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphInvariant {
    /// The node order and node map describe the same set.
    NodeSet,
    /// Every adjacency entry is mutual and backed by a stored edge.
    MutualAdjacency,
    /// The total weight equals the sum of stored edge weights.
    TotalWeight,
    /// Each weighted degree equals the sum of its incident weights.
    WeightedDegree,
    /// A fresh cumulative table is non-decreasing and ends at the total weight.
    CumulativeTable,
}

impl GraphInvariant {
    /// Returns all invariants in evaluation order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::NodeSet,
            Self::MutualAdjacency,
            Self::TotalWeight,
            Self::WeightedDegree,
            Self::CumulativeTable,
        ]
    }
}

/// Reports an invariant violation found by [`WeightedGraph::check_invariants`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphInvariantViolation {
    /// The ordered node list and the node map disagree.
    #[error("node order lists {ordered} node(s) but the node map holds {mapped}")]
    NodeSet {
        /// Length of the ordered node list.
        ordered: usize,
        /// Number of entries in the node map.
        mapped: usize,
    },
    /// `origin` lists `target` as a neighbour without a matching edge or back-link.
    #[error("adjacency {origin}->{target} is not mirrored by a stored edge")]
    MissingBacklink {
        /// Node holding the one-way adjacency entry.
        origin: NodeId,
        /// Neighbour named by the entry.
        target: NodeId,
    },
    /// A stored edge is missing from its endpoints' adjacency lists.
    #[error("edge {edge} is absent from its endpoints' adjacency")]
    DetachedEdge {
        /// The stored edge.
        edge: EdgeKey,
    },
    /// A stored edge has a non-positive or non-finite weight.
    #[error("edge {edge} stores invalid weight {weight}")]
    InvalidStoredWeight {
        /// The offending edge.
        edge: EdgeKey,
        /// The stored weight.
        weight: f64,
    },
    /// The maintained total differs from the recomputed sum.
    #[error("total weight {recorded} differs from edge sum {recomputed}")]
    TotalWeight {
        /// Value held by the graph.
        recorded: f64,
        /// Value recomputed from the edges.
        recomputed: f64,
    },
    /// A node's weighted degree differs from its incident sum.
    #[error(
        "node {node} records weighted degree {recorded} but incident weights sum to {recomputed}"
    )]
    WeightedDegree {
        /// The node whose bookkeeping drifted.
        node: NodeId,
        /// Value held by the graph.
        recorded: f64,
        /// Value recomputed from incident edges.
        recomputed: f64,
    },
    /// A fresh cumulative table is malformed.
    #[error("cumulative weight table is inconsistent at index {index}")]
    CumulativeTable {
        /// First index at which the table disagrees with the edges.
        index: usize,
    },
}

impl GraphInvariantViolation {
    /// Returns the invariant this violation belongs to.
    #[must_use]
    pub const fn invariant(&self) -> GraphInvariant {
        match self {
            Self::NodeSet { .. } => GraphInvariant::NodeSet,
            Self::MissingBacklink { .. }
            | Self::DetachedEdge { .. }
            | Self::InvalidStoredWeight { .. } => GraphInvariant::MutualAdjacency,
            Self::TotalWeight { .. } => GraphInvariant::TotalWeight,
            Self::WeightedDegree { .. } => GraphInvariant::WeightedDegree,
            Self::CumulativeTable { .. } => GraphInvariant::CumulativeTable,
        }
    }
}

impl WeightedGraph {
    /// Runs every check in [`GraphInvariant::all`] order, stopping at the
    /// first violation.
    ///
    /// # Errors
    /// Returns the first [`GraphInvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), GraphInvariantViolation> {
        GraphInvariant::all()
            .into_iter()
            .try_for_each(|invariant| self.check_invariant(invariant))
    }

    /// Runs a single invariant check.
    ///
    /// # Errors
    /// Returns the first [`GraphInvariantViolation`] found for `invariant`.
    pub fn check_invariant(
        &self,
        invariant: GraphInvariant,
    ) -> Result<(), GraphInvariantViolation> {
        match invariant {
            GraphInvariant::NodeSet => self.check_node_set(),
            GraphInvariant::MutualAdjacency => self.check_mutual_adjacency(),
            GraphInvariant::TotalWeight => self.check_total_weight(),
            GraphInvariant::WeightedDegree => self.check_weighted_degrees(),
            GraphInvariant::CumulativeTable => self.check_cumulative_table(),
        }
    }

    fn check_node_set(&self) -> Result<(), GraphInvariantViolation> {
        let consistent = self.order.len() == self.nodes.len()
            && self.order.iter().all(|node| self.nodes.contains_key(node));
        if consistent {
            Ok(())
        } else {
            Err(GraphInvariantViolation::NodeSet {
                ordered: self.order.len(),
                mapped: self.nodes.len(),
            })
        }
    }

    fn check_mutual_adjacency(&self) -> Result<(), GraphInvariantViolation> {
        for (&origin, entry) in &self.nodes {
            for &target in &entry.neighbours {
                let mirrored = self
                    .neighbours(target)
                    .is_some_and(|back| back.contains(&origin));
                if !mirrored || self.edge_weight(origin, target) <= 0.0 {
                    return Err(GraphInvariantViolation::MissingBacklink { origin, target });
                }
            }
        }
        for &(edge, weight) in &self.edge_table {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(GraphInvariantViolation::InvalidStoredWeight { edge, weight });
            }
            let attached = self
                .neighbours(edge.low())
                .is_some_and(|list| list.contains(&edge.high()));
            if !attached {
                return Err(GraphInvariantViolation::DetachedEdge { edge });
            }
        }
        Ok(())
    }

    fn check_total_weight(&self) -> Result<(), GraphInvariantViolation> {
        let recomputed: f64 = self.edge_table.iter().map(|&(_, weight)| weight).sum();
        if weights_agree(recomputed, self.total_weight) {
            Ok(())
        } else {
            Err(GraphInvariantViolation::TotalWeight {
                recorded: self.total_weight,
                recomputed,
            })
        }
    }

    fn check_weighted_degrees(&self) -> Result<(), GraphInvariantViolation> {
        for &node in &self.order {
            let Some(entry) = self.nodes.get(&node) else {
                continue;
            };
            let recomputed: f64 = entry
                .neighbours
                .iter()
                .map(|&neighbour| self.edge_weight(node, neighbour))
                .sum();
            if !weights_agree(recomputed, entry.weighted_degree) {
                return Err(GraphInvariantViolation::WeightedDegree {
                    node,
                    recorded: entry.weighted_degree,
                    recomputed,
                });
            }
        }
        Ok(())
    }

    fn check_cumulative_table(&self) -> Result<(), GraphInvariantViolation> {
        if self.cumulative_stale {
            return Ok(());
        }
        if self.cumulative.len() != self.edge_table.len() {
            return Err(GraphInvariantViolation::CumulativeTable {
                index: self.cumulative.len().min(self.edge_table.len()),
            });
        }
        let mut previous = 0.0;
        for (index, &running) in self.cumulative.iter().enumerate() {
            if running < previous {
                return Err(GraphInvariantViolation::CumulativeTable { index });
            }
            previous = running;
        }
        if weights_agree(previous, self.total_weight) {
            Ok(())
        } else {
            Err(GraphInvariantViolation::CumulativeTable {
                index: self.cumulative.len().saturating_sub(1),
            })
        }
    }
}
