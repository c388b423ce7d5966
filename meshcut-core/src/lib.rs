//! Meshcut core library: topology analysis for mesh radio networks.
//!
//! Builds a [`WeightedGraph`] from a [`TopologySnapshot`] (or directly from
//! node neighbour reports) and answers two robustness questions about it:
//! which nodes are single points of failure ([`ArticulationPointFinder`]),
//! and which set of links is the weakest way to split the network in two
//! ([`MinCutSearch`], [`StoerWagner`]). [`DiffusionCentrality`] ranks nodes
//! by how far their traffic spreads.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analysis;
mod articulation;
mod diffusion;
mod error;
pub mod graph;
mod mincut;
mod node;
mod topology;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    analysis::Analysis,
    articulation::{ArticulationPointFinder, articulation_points},
    diffusion::{DiffusionCentrality, DiffusionScores},
    error::{
        ConfigError, ConfigErrorCode, GraphError, GraphErrorCode, MinCutError, MinCutErrorCode,
        Result,
    },
    graph::{EdgeKey, WeightedGraph},
    mincut::{
        CrossingLink, ExecutionStrategy, MinCut, MinCutSearch, MinCutSearchBuilder, StoerWagner,
        contract_to, karger_stein, stoer_wagner,
    },
    node::NodeId,
    topology::{Link, LinkWeighting, NeighbourReport, ReportedNeighbour, TopologySnapshot},
};
