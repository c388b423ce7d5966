//! Error types for the meshcut core library.
//!
//! Every public error enum carries a stable machine-readable code so host
//! applications can map failures without matching on display strings.

use std::fmt;

use thiserror::Error;

use crate::{mincut::ExecutionStrategy, node::NodeId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident
                    $( { $($pattern:tt)* } )?
                    $( ( $($tuple:tt)* ) )?
                    => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(
                        Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )?
                            => $CodeTy::$CodeVariant,
                    )+
                }
            }
        }
    };
}

/// An error produced by [`crate::WeightedGraph`] operations.
///
/// A failing call leaves the graph exactly as it was before the call.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// An operation referenced a node that is not in the graph.
    #[error("node {node} is not present in the graph")]
    UnknownNode {
        /// The missing node.
        node: NodeId,
    },
    /// An edge was requested between a node and itself.
    #[error("edge from {node} to itself is not allowed")]
    SelfLoop {
        /// The node named at both ends.
        node: NodeId,
    },
    /// An edge weight was negative, NaN, or infinite.
    #[error("edge ({a}, {b}) has invalid weight {weight}")]
    InvalidWeight {
        /// First endpoint as supplied.
        a: NodeId,
        /// Second endpoint as supplied.
        b: NodeId,
        /// The rejected weight.
        weight: f64,
    },
    /// Sampling was requested on a graph without any weighted edge.
    #[error("graph has no weighted edges to sample")]
    EmptyGraph,
    /// Edges changed since the cumulative weight table was last rebuilt.
    #[error("cumulative weight table is stale; rebuild it before sampling")]
    StaleSamplingTable,
    /// The sampling value fell outside `[0, total_weight)`.
    #[error("sample value {value} is outside [0, {total})")]
    SampleOutOfRange {
        /// The supplied sample value.
        value: f64,
        /// The graph's total edge weight.
        total: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An operation referenced a node that is not in the graph.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
        /// An edge was requested between a node and itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An edge weight was negative, NaN, or infinite.
        InvalidWeight => InvalidWeight { .. } => "GRAPH_INVALID_WEIGHT",
        /// Sampling was requested on a graph without any weighted edge.
        EmptyGraph => EmptyGraph => "GRAPH_EMPTY",
        /// Edges changed since the cumulative weight table was last rebuilt.
        StaleSamplingTable => StaleSamplingTable => "GRAPH_STALE_SAMPLING_TABLE",
        /// The sampling value fell outside `[0, total_weight)`.
        SampleOutOfRange => SampleOutOfRange { .. } => "GRAPH_SAMPLE_OUT_OF_RANGE",
    }
}

/// An error produced while contracting a working graph.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MinCutError {
    /// Contraction was asked to reduce a graph to zero nodes.
    #[error("cannot contract a graph down to {target} nodes")]
    InvalidTarget {
        /// The rejected target node count.
        target: usize,
    },
    /// A graph operation failed during contraction.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`MinCutError`] variants.
    enum MinCutErrorCode for MinCutError {
        /// Contraction was asked to reduce a graph to zero nodes.
        InvalidTarget => InvalidTarget { .. } => "MINCUT_INVALID_TARGET",
        /// A graph operation failed during contraction.
        GraphFailure => Graph(..) => "MINCUT_GRAPH_FAILURE",
    }
}

impl MinCutError {
    /// Retrieve the inner [`GraphErrorCode`] when the failure came from the graph.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            Self::InvalidTarget { .. } => None,
        }
    }
}

/// An error produced while validating analysis configuration.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    /// A repetition count of zero was requested.
    #[error("trial count must be at least 1")]
    ZeroTrials,
    /// The requested execution strategy is not compiled into this build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    StrategyUnavailable {
        /// Strategy that could not be satisfied.
        requested: ExecutionStrategy,
    },
    /// A diffusion horizon of zero hops was requested.
    #[error("diffusion horizon must be at least one hop")]
    ZeroHorizon,
}

define_error_codes! {
    /// Stable codes describing [`ConfigError`] variants.
    enum ConfigErrorCode for ConfigError {
        /// A repetition count of zero was requested.
        ZeroTrials => ZeroTrials => "CONFIG_ZERO_TRIALS",
        /// The requested execution strategy is not compiled into this build.
        StrategyUnavailable => StrategyUnavailable { .. } => "CONFIG_STRATEGY_UNAVAILABLE",
        /// A diffusion horizon of zero hops was requested.
        ZeroHorizon => ZeroHorizon => "CONFIG_ZERO_HORIZON",
    }
}

/// Convenient alias for results returned by graph operations.
pub type Result<T> = core::result::Result<T, GraphError>;
