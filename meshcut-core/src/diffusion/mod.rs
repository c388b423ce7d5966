//! Diffusion centrality: how widely each node's traffic spreads within a
//! bounded number of hops.
//!
//! With `A` the weighted adjacency matrix and `q = 1 / λmax(A)`, the reach
//! matrix is `H = Σ (qA)^t` for `t` in `1..=horizon`. A node's centrality is
//! its row sum of `H`. Its share towards another node is that entry divided
//! by the row sum. Scaling every weight by the same factor leaves both
//! unchanged.

use std::{collections::HashMap, num::NonZeroU32};

use ndarray::{Array1, Array2, Axis};
use tracing::{debug, instrument};

use crate::{analysis::Analysis, error::ConfigError, graph::WeightedGraph, node::NodeId};

const DEFAULT_HORIZON: NonZeroU32 = match NonZeroU32::new(5) {
    Some(horizon) => horizon,
    None => NonZeroU32::MIN,
};
const POWER_ITERATION_LIMIT: usize = 10_000;
const POWER_ITERATION_TOLERANCE: f64 = 1e-13;

/// Computes diffusion centrality over a fixed hop horizon (five by default).
///
/// # Examples
/// ```
/// use meshcut_core::{Analysis, DiffusionCentrality, NodeId, WeightedGraph};
///
/// let [hub, a, b] = [1, 2, 3].map(NodeId::new);
/// let mut graph = WeightedGraph::new();
/// for node in [hub, a, b] {
///     graph.add_node(node);
/// }
/// graph.add_edge(hub, a, 1.0)?;
/// graph.add_edge(hub, b, 1.0)?;
///
/// let scores = DiffusionCentrality::default().analyse(&graph);
/// assert_eq!(scores.ranked()[0].0, hub);
/// # Ok::<(), meshcut_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DiffusionCentrality {
    horizon: NonZeroU32,
}

impl Default for DiffusionCentrality {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
        }
    }
}

impl DiffusionCentrality {
    /// Creates an analysis summing walks of up to `horizon` hops.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroHorizon`] when `horizon` is zero.
    pub fn with_horizon(horizon: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(horizon)
            .map(|horizon| Self { horizon })
            .ok_or(ConfigError::ZeroHorizon)
    }

    /// Returns the number of hops summed.
    #[must_use]
    pub const fn horizon(&self) -> u32 {
        self.horizon.get()
    }

    /// Scores every node of `graph`.
    ///
    /// An edgeless graph scores zero everywhere.
    #[must_use]
    #[instrument(
        name = "diffusion.centrality",
        level = "debug",
        skip(self, graph),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            horizon = self.horizon.get(),
        ),
    )]
    pub fn scores(&self, graph: &WeightedGraph) -> DiffusionScores {
        let nodes: Vec<NodeId> = graph.nodes().collect();
        let index: HashMap<NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(position, &node)| (node, position))
            .collect();

        let count = nodes.len();
        let mut adjacency = Array2::<f64>::zeros((count, count));
        for (edge, weight) in graph.edges() {
            if let (Some(&low), Some(&high)) = (index.get(&edge.low()), index.get(&edge.high())) {
                adjacency[[low, high]] = weight;
                adjacency[[high, low]] = weight;
            }
        }

        let reach = match spectral_radius(&adjacency) {
            Some(radius) => {
                let step = adjacency / radius;
                let mut power = step.clone();
                let mut reach = step.clone();
                for _ in 1..self.horizon.get() {
                    power = power.dot(&step);
                    reach += &power;
                }
                reach
            }
            None => adjacency,
        };
        let totals = reach.sum_axis(Axis(1)).to_vec();

        debug!(nodes = count, "diffusion scores computed");
        DiffusionScores {
            nodes,
            index,
            reach,
            totals,
        }
    }
}

impl Analysis for DiffusionCentrality {
    type Output = DiffusionScores;

    fn analyse(&self, graph: &WeightedGraph) -> Self::Output {
        self.scores(graph)
    }
}

/// Per-node diffusion results.
#[derive(Clone, Debug, PartialEq)]
pub struct DiffusionScores {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    reach: Array2<f64>,
    totals: Vec<f64>,
}

impl DiffusionScores {
    /// Returns the scored nodes in graph order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns the centrality of `node`, or `None` when it was not scored.
    #[must_use]
    pub fn centrality(&self, node: NodeId) -> Option<f64> {
        self.index
            .get(&node)
            .and_then(|&position| self.totals.get(position))
            .copied()
    }

    /// Returns the fraction of `from`'s diffusion that reaches `to`.
    ///
    /// The shares of one node sum to one, or are all zero when the node has
    /// no links. Returns `None` when either node was not scored.
    #[must_use]
    pub fn share(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let &row = self.index.get(&from)?;
        let &column = self.index.get(&to)?;
        let total = self.totals.get(row).copied()?;
        let entry = self.reach.get((row, column)).copied()?;
        Some(if total > 0.0 { entry / total } else { 0.0 })
    }

    /// Returns nodes with their centrality, most central first. Equal scores
    /// keep graph order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(NodeId, f64)> {
        let mut ranked: Vec<(NodeId, f64)> =
            self.nodes.iter().copied().zip(self.totals.iter().copied()).collect();
        ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
        ranked
    }
}

/// Largest eigenvalue of a symmetric non-negative matrix, or `None` when no
/// entry is positive.
///
/// Power iteration runs on `A + dI`, with `d` the largest row sum. `d` bounds
/// the spectrum, so the shift makes every eigenvalue non-negative and stops
/// bipartite graphs (whose spectrum mirrors around zero) from oscillating.
/// The estimate is the Rayleigh quotient of the unshifted matrix.
fn spectral_radius(adjacency: &Array2<f64>) -> Option<f64> {
    let shift = adjacency
        .sum_axis(Axis(1))
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    if shift <= 0.0 {
        return None;
    }

    let count = adjacency.nrows();
    let mut vector = Array1::<f64>::from_elem(count, (count as f64).sqrt().recip());
    let mut estimate = f64::NEG_INFINITY;
    for _ in 0..POWER_ITERATION_LIMIT {
        let image = adjacency.dot(&vector);
        let rayleigh = vector.dot(&image);
        let shifted = image + &(&vector * shift);
        let norm = shifted.dot(&shifted).sqrt();
        if norm <= 0.0 {
            break;
        }
        vector = shifted / norm;
        if (rayleigh - estimate).abs() <= POWER_ITERATION_TOLERANCE * rayleigh {
            return Some(rayleigh);
        }
        estimate = rayleigh;
    }
    (estimate > 0.0).then_some(estimate)
}

#[cfg(test)]
mod tests;
