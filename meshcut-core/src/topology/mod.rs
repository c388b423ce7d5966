//! Topology snapshots supplied by the host application.
//!
//! A [`TopologySnapshot`] is the plain node/link listing the engine consumes.
//! Snapshots are usually derived from the neighbour reports mesh nodes
//! broadcast; [`TopologySnapshot::from_neighbour_reports`] reconciles those
//! reports into a single consistent link set and weights each link with a
//! [`LinkWeighting`].

mod reports;
mod weighting;

use tracing::instrument;

use crate::{error::Result, graph::WeightedGraph, node::NodeId};

pub use self::{
    reports::{NeighbourReport, ReportedNeighbour},
    weighting::LinkWeighting,
};

/// A weighted link between two nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    /// First endpoint.
    pub a: NodeId,
    /// Second endpoint.
    pub b: NodeId,
    /// Non-negative link weight; higher means a stronger link.
    pub weight: f64,
}

impl Link {
    /// Creates a link.
    #[must_use]
    pub const fn new(a: NodeId, b: NodeId, weight: f64) -> Self {
        Self { a, b, weight }
    }
}

/// Node and link listing describing the network at one point in time.
///
/// # Examples
/// ```
/// use meshcut_core::{Link, NodeId, TopologySnapshot, WeightedGraph};
///
/// let [a, b] = [1, 2].map(NodeId::new);
/// let snapshot = TopologySnapshot::new(vec![a, b], vec![Link::new(a, b, 3.0)]);
/// let graph = WeightedGraph::from_snapshot(&snapshot)?;
/// assert_eq!(graph.edge_weight(a, b), 3.0);
/// # Ok::<(), meshcut_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologySnapshot {
    /// Nodes in the order they should be iterated.
    pub nodes: Vec<NodeId>,
    /// Links between listed nodes.
    pub links: Vec<Link>,
}

impl TopologySnapshot {
    /// Creates a snapshot from explicit node and link lists.
    #[must_use]
    pub fn new(nodes: Vec<NodeId>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }
}

impl WeightedGraph {
    /// Builds a graph from a snapshot.
    ///
    /// Duplicate nodes are ignored and a repeated link overwrites the
    /// earlier weight.
    ///
    /// # Errors
    /// Returns the first [`crate::GraphError`] raised while adding a link:
    /// unknown endpoints, self-links, or invalid weights.
    #[instrument(
        name = "topology.build_graph",
        level = "debug",
        err,
        skip(snapshot),
        fields(nodes = snapshot.nodes.len(), links = snapshot.links.len()),
    )]
    pub fn from_snapshot(snapshot: &TopologySnapshot) -> Result<Self> {
        let mut graph = Self::with_capacity(snapshot.nodes.len(), snapshot.links.len());
        for &node in &snapshot.nodes {
            graph.add_node(node);
        }
        for link in &snapshot.links {
            graph.add_edge(link.a, link.b, link.weight)?;
        }
        Ok(graph)
    }
}
