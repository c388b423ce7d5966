//! Repeated Karger–Stein trials under a validated configuration.

use std::num::NonZeroUsize;

use rand::{RngCore, SeedableRng, rngs::SmallRng};
use tracing::{Span, debug, field, instrument};

use crate::{
    analysis::Analysis,
    error::{ConfigError, MinCutError},
    graph::WeightedGraph,
};

use super::{
    ExecutionStrategy, MinCut,
    karger_stein::{karger_stein_with_strategy, lighter},
};

/// Configures and constructs [`MinCutSearch`] instances.
///
/// # Examples
/// ```
/// use meshcut_core::{ExecutionStrategy, MinCutSearchBuilder};
///
/// let search = MinCutSearchBuilder::new()
///     .with_trials(32)
///     .with_seed(7)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(search.trials().map(|trials| trials.get()), Some(32));
/// assert_eq!(search.seed(), Some(7));
/// assert_eq!(search.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MinCutSearchBuilder {
    trials: Option<usize>,
    seed: Option<u64>,
    execution_strategy: ExecutionStrategy,
}

impl MinCutSearchBuilder {
    /// Creates a builder with the default trial count, an entropy seed and
    /// sequential execution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of independent Karger–Stein trials.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }

    /// Fixes the base seed; trial `i` is seeded with `seed + i` (wrapping).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets how trials and recursion branches are scheduled.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Validates the configuration and constructs a [`MinCutSearch`].
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroTrials`] when zero trials were requested
    /// and [`ConfigError::StrategyUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    pub fn build(self) -> Result<MinCutSearch, ConfigError> {
        let trials = self
            .trials
            .map(|requested| NonZeroUsize::new(requested).ok_or(ConfigError::ZeroTrials))
            .transpose()?;
        if self.execution_strategy == ExecutionStrategy::Parallel && !cfg!(feature = "parallel") {
            return Err(ConfigError::StrategyUnavailable {
                requested: self.execution_strategy,
            });
        }
        Ok(MinCutSearch {
            trials,
            seed: self.seed,
            execution_strategy: self.execution_strategy,
        })
    }
}

/// Amplified global min-cut search.
///
/// Runs independent Karger–Stein trials and keeps the lightest cut. With
/// `t` trials on an `n`-node graph the failure probability falls roughly as
/// `(1 - 1/log n)^t`. Without an explicit trial count, `ceil(log2 n) + 1`
/// trials are run.
///
/// # Examples
/// ```
/// use meshcut_core::{Analysis, MinCutSearchBuilder, NodeId, WeightedGraph};
///
/// let nodes = [1, 2, 3, 4, 5, 6].map(NodeId::new);
/// let mut graph = WeightedGraph::new();
/// for node in nodes {
///     graph.add_node(node);
/// }
/// // Two triangles joined by a single weak link.
/// for (a, b) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
///     graph.add_edge(nodes[a], nodes[b], 4.0)?;
/// }
/// graph.add_edge(nodes[2], nodes[3], 1.0)?;
///
/// let search = MinCutSearchBuilder::new().with_trials(64).with_seed(3).build()?;
/// let cut = search.analyse(&graph)?.expect("six nodes");
/// assert_eq!(cut.weight(), 1.0);
/// assert_eq!(cut.side_a(), &nodes[..3]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MinCutSearch {
    trials: Option<NonZeroUsize>,
    seed: Option<u64>,
    execution_strategy: ExecutionStrategy,
}

impl MinCutSearch {
    /// Returns the configured trial count, or `None` when it is derived from
    /// the graph size.
    #[must_use]
    #[rustfmt::skip]
    pub fn trials(&self) -> Option<NonZeroUsize> { self.trials }

    /// Returns the configured base seed, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> Option<u64> { self.seed }

    /// Returns the configured execution strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Returns the default trial count for an `nodes`-node graph:
    /// `ceil(log2 n) + 1`.
    ///
    /// # Examples
    /// ```
    /// use meshcut_core::MinCutSearch;
    ///
    /// assert_eq!(MinCutSearch::default_trials(2), 2);
    /// assert_eq!(MinCutSearch::default_trials(5), 4);
    /// assert_eq!(MinCutSearch::default_trials(64), 7);
    /// ```
    #[must_use]
    pub fn default_trials(nodes: usize) -> usize {
        nodes.max(1).next_power_of_two().trailing_zeros() as usize + 1
    }

    /// Runs the search over `graph`. Returns `Ok(None)` for graphs with fewer
    /// than two nodes.
    ///
    /// For a fixed seed the result is deterministic and identical under both
    /// execution strategies. When several trials find equally light cuts the
    /// lowest-numbered trial wins.
    ///
    /// # Errors
    /// Propagates [`MinCutError`] from contraction, which indicates an
    /// internal inconsistency rather than bad input.
    #[instrument(
        name = "mincut.search",
        level = "debug",
        err,
        skip(self, graph),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            trials = field::Empty,
            seed = field::Empty,
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run(&self, graph: &WeightedGraph) -> Result<Option<MinCut>, MinCutError> {
        if graph.node_count() < 2 {
            return Ok(None);
        }
        let trials = self
            .trials
            .map_or_else(|| Self::default_trials(graph.node_count()), NonZeroUsize::get);
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
        let span = Span::current();
        span.record("trials", trials);
        span.record("seed", seed);

        let strategy = self.execution_strategy;
        let trial = |index: usize| -> Result<Option<MinCut>, MinCutError> {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(index as u64));
            let cut = karger_stein_with_strategy(graph, &mut rng, strategy)?;
            if let Some(found) = &cut {
                debug!(trial = index, weight = found.weight(), "trial finished");
            }
            Ok(cut)
        };
        let outcomes = run_trials(strategy, trials, trial)?;
        Ok(outcomes.into_iter().fold(None, lighter))
    }
}

impl Analysis for MinCutSearch {
    type Output = Result<Option<MinCut>, MinCutError>;

    fn analyse(&self, graph: &WeightedGraph) -> Self::Output {
        self.run(graph)
    }
}

/// Runs `trial` for every index and returns the outcomes in index order.
fn run_trials<F>(
    strategy: ExecutionStrategy,
    trials: usize,
    trial: F,
) -> Result<Vec<Option<MinCut>>, MinCutError>
where
    F: Fn(usize) -> Result<Option<MinCut>, MinCutError> + Send + Sync,
{
    match strategy {
        #[cfg(feature = "parallel")]
        ExecutionStrategy::Parallel => {
            use rayon::prelude::*;
            (0..trials).into_par_iter().map(trial).collect()
        }
        _ => (0..trials).map(trial).collect(),
    }
}
