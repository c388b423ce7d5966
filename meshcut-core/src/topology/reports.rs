//! Reconciliation of per-node neighbour reports into a link set.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::{graph::EdgeKey, node::NodeId};

use super::{Link, LinkWeighting, TopologySnapshot};

/// A neighbour heard by a reporting node.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportedNeighbour {
    /// The neighbour heard.
    pub node: NodeId,
    /// Signal-to-noise ratio of the neighbour's last packet, in dB.
    pub snr_db: f64,
}

/// The latest neighbour list broadcast by one node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighbourReport {
    /// The reporting node.
    pub node: NodeId,
    /// Receive timestamp of the report; larger is fresher.
    pub received_at: u64,
    /// Neighbours the node currently hears.
    pub neighbours: Vec<ReportedNeighbour>,
}

impl TopologySnapshot {
    /// Reconciles neighbour reports into a snapshot.
    ///
    /// Only the freshest report per node is used (a later report wins ties).
    /// Nodes are every reporting node and every neighbour mentioned, in
    /// first-seen order. For a link `a`–`b` reported by `a`:
    ///
    /// - when `b` also reports `a`, the SNR comes from the fresher of the two
    ///   reports (the first processed wins ties);
    /// - when `b` has a fresher report that omits `a`, the link has dropped
    ///   and is not emitted;
    /// - otherwise `a`'s reading stands, including when `b` never reported.
    ///
    /// Each link is emitted once, weighted by `weighting`. Links whose weight
    /// comes out as zero are omitted, as is any link that would push the
    /// summed weight past `f64::MAX`, so the result always builds a
    /// [`WeightedGraph`](crate::WeightedGraph).
    ///
    /// # Examples
    /// ```
    /// use meshcut_core::{
    ///     LinkWeighting, NeighbourReport, NodeId, ReportedNeighbour, TopologySnapshot,
    /// };
    ///
    /// let [a, b] = [1, 2].map(NodeId::new);
    /// let reports = [
    ///     NeighbourReport {
    ///         node: a,
    ///         received_at: 10,
    ///         neighbours: vec![ReportedNeighbour { node: b, snr_db: 4.0 }],
    ///     },
    ///     NeighbourReport { node: b, received_at: 20, neighbours: Vec::new() },
    /// ];
    /// let snapshot = TopologySnapshot::from_neighbour_reports(&reports, LinkWeighting::Uniform);
    /// assert_eq!(snapshot.nodes, vec![a, b]);
    /// assert!(snapshot.links.is_empty(), "b's fresher report no longer hears a");
    /// ```
    #[must_use]
    #[instrument(
        name = "topology.from_reports",
        level = "debug",
        skip(reports),
        fields(reports = reports.len()),
    )]
    pub fn from_neighbour_reports(reports: &[NeighbourReport], weighting: LinkWeighting) -> Self {
        let mut latest: HashMap<NodeId, &NeighbourReport> = HashMap::with_capacity(reports.len());
        let mut reporters = Vec::with_capacity(reports.len());
        for report in reports {
            match latest.get(&report.node).map(|existing| existing.received_at) {
                Some(held) if held > report.received_at => {}
                Some(_) => {
                    latest.insert(report.node, report);
                }
                None => {
                    reporters.push(report.node);
                    latest.insert(report.node, report);
                }
            }
        }

        let mut nodes = Vec::new();
        let mut seen_nodes = HashSet::new();
        let mut links = Vec::new();
        let mut emitted = HashSet::new();
        let mut total_weight = 0.0_f64;

        for report in reporters.iter().filter_map(|node| latest.get(node).copied()) {
            if seen_nodes.insert(report.node) {
                nodes.push(report.node);
            }
            for heard in &report.neighbours {
                if seen_nodes.insert(heard.node) {
                    nodes.push(heard.node);
                }
                let Some(key) = EdgeKey::new(report.node, heard.node) else {
                    continue;
                };
                if emitted.contains(&key) {
                    continue;
                }
                let Some(snr_db) = reconcile(report, heard, latest.get(&heard.node).copied()) else {
                    debug!(
                        reporter = %report.node,
                        neighbour = %heard.node,
                        "link dropped by fresher neighbour report",
                    );
                    continue;
                };
                let weight = weighting.weight(snr_db);
                if !(weight.is_finite() && weight > 0.0) {
                    continue;
                }
                if !(total_weight + weight).is_finite() {
                    debug!(
                        reporter = %report.node,
                        neighbour = %heard.node,
                        weight,
                        "link skipped: total weight would overflow",
                    );
                    continue;
                }
                total_weight += weight;
                emitted.insert(key);
                links.push(Link::new(report.node, heard.node, weight));
            }
        }

        debug!(nodes = nodes.len(), links = links.len(), "reconciled neighbour reports");
        Self { nodes, links }
    }
}

/// Returns the SNR to use for `reporter`–`heard`, or `None` when the peer's
/// fresher report shows the link has dropped.
fn reconcile(
    reporter: &NeighbourReport,
    heard: &ReportedNeighbour,
    peer: Option<&NeighbourReport>,
) -> Option<f64> {
    let Some(peer) = peer else {
        return Some(heard.snr_db);
    };
    let peer_is_fresher = peer.received_at > reporter.received_at;
    match peer.neighbours.iter().find(|back| back.node == reporter.node) {
        Some(back) if peer_is_fresher => Some(back.snr_db),
        Some(_) => Some(heard.snr_db),
        None if peer_is_fresher => None,
        None => Some(heard.snr_db),
    }
}
