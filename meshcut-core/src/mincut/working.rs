//! Working graphs: contractible copies that remember which original nodes
//! each super-node stands for.

use std::{collections::HashMap, sync::Arc};

use rand::Rng;
use tracing::trace;

use crate::{error::MinCutError, graph::WeightedGraph, node::NodeId};

use super::{MinCut, union_find::DisjointSet};

#[derive(Debug)]
struct OriginalNodes {
    order: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
}

/// A deep copy of the input graph plus partition tracking.
///
/// The original node list is shared between branches; everything that is
/// mutated is owned.
#[derive(Clone, Debug)]
pub(super) struct WorkingGraph {
    graph: WeightedGraph,
    members: DisjointSet,
    original: Arc<OriginalNodes>,
}

impl WorkingGraph {
    pub(super) fn new(graph: &WeightedGraph) -> Self {
        let order: Vec<NodeId> = graph.nodes().collect();
        let index = order
            .iter()
            .enumerate()
            .map(|(position, &node)| (node, position))
            .collect();
        Self {
            members: DisjointSet::new(order.len()),
            graph: graph.clone(),
            original: Arc::new(OriginalNodes { order, index }),
        }
    }

    #[rustfmt::skip]
    pub(super) fn node_count(&self) -> usize { self.graph.node_count() }

    pub(super) fn into_graph(self) -> WeightedGraph {
        self.graph
    }

    /// Contracts randomly chosen edges until at most `target` super-nodes
    /// remain.
    ///
    /// Edges are chosen with probability proportional to weight and the
    /// edge's low endpoint survives. Once no edges are left the first two
    /// nodes in graph order are merged.
    pub(super) fn contract_to<R>(&mut self, target: usize, rng: &mut R) -> Result<(), MinCutError>
    where
        R: Rng + ?Sized,
    {
        if target == 0 {
            return Err(MinCutError::InvalidTarget { target });
        }
        while self.graph.node_count() > target {
            let (survivor, absorbed) = self.pick_pair(rng)?;
            self.graph.contract(survivor, absorbed)?;
            self.absorb(survivor, absorbed);
        }
        Ok(())
    }

    fn pick_pair<R>(&mut self, rng: &mut R) -> Result<(NodeId, NodeId), MinCutError>
    where
        R: Rng + ?Sized,
    {
        if self.graph.edge_count() == 0 {
            let mut nodes = self.graph.nodes();
            return match (nodes.next(), nodes.next()) {
                (Some(first), Some(second)) => {
                    trace!(%first, %second, "no edges left; merging first two nodes");
                    Ok((first, second))
                }
                _ => Err(MinCutError::InvalidTarget {
                    target: self.graph.node_count(),
                }),
            };
        }
        self.graph.rebuild_cumulative_weights();
        let value = rng.gen_range(0.0..self.graph.total_weight());
        let edge = self.graph.sample_edge_by_weight(value)?;
        Ok(edge.endpoints())
    }

    fn absorb(&mut self, survivor: NodeId, absorbed: NodeId) {
        let lookup = |node: NodeId| self.original.index.get(&node).copied();
        if let (Some(kept), Some(merged)) = (lookup(survivor), lookup(absorbed)) {
            self.members.absorb(kept, merged);
        }
    }

    /// Converts a two-node working graph into a cut.
    ///
    /// Returns `None` unless exactly two super-nodes remain.
    pub(super) fn into_cut(mut self) -> Option<MinCut> {
        let mut remaining = self.graph.nodes();
        let (Some(first), Some(second), None) =
            (remaining.next(), remaining.next(), remaining.next())
        else {
            return None;
        };
        let weight = self.graph.edge_weight(first, second);
        let anchor = self.members.representative(0);
        let membership: Vec<bool> = (0..self.original.order.len())
            .map(|position| self.members.representative(position) == anchor)
            .collect();
        Some(MinCut::from_membership(&self.original.order, weight, &membership))
    }
}
