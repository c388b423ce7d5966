//! Randomized contraction with Karger–Stein recursive amplification.

use std::f64::consts::SQRT_2;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{error::MinCutError, graph::WeightedGraph};

use super::{ExecutionStrategy, MinCut, working::WorkingGraph};

/// Graphs at or below this size are contracted straight to two nodes.
const BASE_CASE_NODES: usize = 6;

/// Returns a copy of `graph` contracted down to at most `target` nodes.
///
/// Each step samples an edge with probability proportional to its weight and
/// merges its higher endpoint into its lower one. When no edges remain the
/// first two nodes in graph order are merged, so disconnected graphs still
/// reduce. The input graph is never modified.
///
/// # Errors
/// Returns [`MinCutError::InvalidTarget`] when `target` is zero.
///
/// # Examples
/// ```
/// use meshcut_core::{NodeId, WeightedGraph, contract_to};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let nodes = [1, 2, 3, 4].map(NodeId::new);
/// let mut graph = WeightedGraph::new();
/// for node in nodes {
///     graph.add_node(node);
/// }
/// for pair in nodes.windows(2) {
///     graph.add_edge(pair[0], pair[1], 1.0)?;
/// }
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let reduced = contract_to(&graph, 2, &mut rng)?;
/// assert_eq!(reduced.node_count(), 2);
/// assert_eq!(reduced.total_weight(), 1.0);
/// assert_eq!(graph.node_count(), 4);
/// # Ok::<(), meshcut_core::MinCutError>(())
/// ```
pub fn contract_to<R>(
    graph: &WeightedGraph,
    target: usize,
    rng: &mut R,
) -> Result<WeightedGraph, MinCutError>
where
    R: Rng + ?Sized,
{
    let mut working = WorkingGraph::new(graph);
    working.contract_to(target, rng)?;
    Ok(working.into_graph())
}

/// Runs one Karger–Stein recursion over `graph` and returns the cut found.
///
/// The result is a valid cut whose weight is at least the true minimum; it
/// equals the minimum with probability bounded below by roughly
/// `1 / log n`. Repeat the call (or use [`super::MinCutSearch`]) to amplify
/// that probability. Returns `Ok(None)` for graphs with fewer than two nodes.
///
/// # Errors
/// Returns [`MinCutError::Graph`] if contraction hits an inconsistent graph
/// state, which indicates a bug rather than bad input.
///
/// # Examples
/// ```
/// use meshcut_core::{NodeId, WeightedGraph, karger_stein};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let [a, b] = [1, 2].map(NodeId::new);
/// let mut graph = WeightedGraph::new();
/// graph.add_node(a);
/// graph.add_node(b);
/// graph.add_edge(a, b, 2.5)?;
///
/// let cut = karger_stein(&graph, &mut SmallRng::seed_from_u64(1))?.expect("two nodes");
/// assert_eq!(cut.weight(), 2.5);
/// assert_eq!(cut.side_a(), &[a]);
/// assert_eq!(cut.side_b(), &[b]);
/// # Ok::<(), meshcut_core::MinCutError>(())
/// ```
#[instrument(
    name = "mincut.karger_stein",
    level = "debug",
    err,
    skip(graph, rng),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn karger_stein<R>(graph: &WeightedGraph, rng: &mut R) -> Result<Option<MinCut>, MinCutError>
where
    R: Rng + ?Sized,
{
    let cut = karger_stein_with_strategy(graph, rng, ExecutionStrategy::Sequential)?;
    if let Some(found) = &cut {
        debug!(weight = found.weight(), "karger-stein cut");
    }
    Ok(cut)
}

pub(super) fn karger_stein_with_strategy<R>(
    graph: &WeightedGraph,
    rng: &mut R,
    strategy: ExecutionStrategy,
) -> Result<Option<MinCut>, MinCutError>
where
    R: Rng + ?Sized,
{
    if graph.node_count() < 2 {
        return Ok(None);
    }
    recurse(WorkingGraph::new(graph), rng, strategy)
}

fn recurse<R>(
    mut working: WorkingGraph,
    rng: &mut R,
    strategy: ExecutionStrategy,
) -> Result<Option<MinCut>, MinCutError>
where
    R: Rng + ?Sized,
{
    let nodes = working.node_count();
    if nodes <= BASE_CASE_NODES {
        working.contract_to(2, rng)?;
        return Ok(working.into_cut());
    }

    let target = branch_target(nodes);
    // Both seeds are drawn before either branch runs so the outcome does not
    // depend on scheduling.
    let seeds = [rng.next_u64(), rng.next_u64()];
    let branch = |seed: u64| -> Result<Option<MinCut>, MinCutError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut reduced = working.clone();
        reduced.contract_to(target, &mut rng)?;
        recurse(reduced, &mut rng, strategy)
    };
    let (first, second) = join(strategy, || branch(seeds[0]), || branch(seeds[1]));
    Ok(lighter(first?, second?))
}

/// `ceil(n / sqrt(2) + 1)`; strictly below `n` for every `n` above the base
/// case.
fn branch_target(nodes: usize) -> usize {
    (nodes as f64 / SQRT_2 + 1.0).ceil() as usize
}

/// Keeps the lighter cut; ties keep `first`.
pub(super) fn lighter(first: Option<MinCut>, second: Option<MinCut>) -> Option<MinCut> {
    match (first, second) {
        (Some(first), Some(second)) if second.weight < first.weight => Some(second),
        (first, second) => first.or(second),
    }
}

fn join<A, B, RA, RB>(strategy: ExecutionStrategy, first: A, second: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    match strategy {
        #[cfg(feature = "parallel")]
        ExecutionStrategy::Parallel => rayon::join(first, second),
        _ => (first(), second()),
    }
}
