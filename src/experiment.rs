//! Instrumented forests for measuring amortized cost
//!
//! [`Instrumented`] is a [`Strategy`] that counts every `add_child` and
//! `remove` as one structural step and can replace the cascading decrease by
//! a naive one. [`Experiment`] wraps a forest using it and counts the
//! operations issued, so that `steps / ops` estimates the amortized cost of
//! a workload.
//!
//! [`run_star`] replays a sequence on which a forest without cascading cuts
//! degrades (a quadratic variant of the star construction of Li and Peebles,
//! "Replacing Mark Bits with Randomness in Fibonacci Heaps").
//!
//! ```rust
//! use priority_forest::experiment::{run_star, DecreasePolicy};
//!
//! let cascading = run_star(8, DecreasePolicy::Cascading);
//! let naive = run_star(8, DecreasePolicy::Naive);
//! assert_eq!(cascading.size, naive.size);
//! assert!(naive.steps_per_op() > cascading.steps_per_op());
//! ```

use std::fmt;

use crate::forest::PriorityForest;
use crate::node::{NodeKey, Nodes};
use crate::rank;
use crate::strategy::{self, Strategy};
use crate::traits::ForestError;

/// How [`Instrumented`] restores heap order after a decrease.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecreasePolicy {
    /// Cut the node and cascade through marked ancestors.
    #[default]
    Cascading,
    /// Move the node to the root list and never mark anything.
    Naive,
}

/// Strategy counting structural steps.
#[derive(Debug, Clone, Default)]
pub struct Instrumented {
    policy: DecreasePolicy,
    steps: u64,
    max_size: usize,
}

impl Instrumented {
    pub fn new(policy: DecreasePolicy) -> Self {
        Instrumented {
            policy,
            steps: 0,
            max_size: 0,
        }
    }

    #[inline]
    pub fn policy(&self) -> DecreasePolicy {
        self.policy
    }

    /// Number of `add_child` and `remove` calls so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Largest forest size seen by a consolidation.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl<T, P: Ord> Strategy<T, P> for Instrumented {
    fn add_child(&mut self, nodes: &mut Nodes<T, P>, parent: NodeKey, node: NodeKey) {
        self.steps += 1;
        nodes.add_child(parent, node);
    }

    fn remove(&mut self, nodes: &mut Nodes<T, P>, node: NodeKey) -> NodeKey {
        self.steps += 1;
        nodes.remove(node)
    }

    fn decrease(&mut self, nodes: &mut Nodes<T, P>, node: NodeKey, new_priority: P) {
        match self.policy {
            DecreasePolicy::Cascading => strategy::cascading_decrease(self, nodes, node, new_priority),
            DecreasePolicy::Naive => strategy::naive_decrease(self, nodes, node, new_priority),
        }
    }

    /// Without cascading cuts ranks are only bounded by the square root of
    /// the largest size ever reached.
    fn max_rank(&mut self, size: usize) -> usize {
        self.max_size = self.max_size.max(size);
        match self.policy {
            DecreasePolicy::Cascading => rank::max_rank(size),
            DecreasePolicy::Naive => rank::sqrt_bound(self.max_size),
        }
    }
}

/// A forest with an [`Instrumented`] strategy and an operation counter.
///
/// There is no `delete` here: [`PriorityForest::delete`] always cascades its
/// cut, so [`Experiment::remove`] is the way to drop a node under the chosen
/// policy.
#[derive(Debug)]
pub struct Experiment<T, P> {
    forest: PriorityForest<T, P, Instrumented>,
    ops: u64,
}

impl<T, P: Ord> Experiment<T, P> {
    pub fn new(policy: DecreasePolicy) -> Self {
        Experiment {
            forest: PriorityForest::with_strategy(Instrumented::new(policy)),
            ops: 0,
        }
    }

    pub fn insert(&mut self, priority: P, payload: T) -> NodeKey {
        self.ops += 1;
        self.forest.insert(priority, payload)
    }

    pub fn extract_min(&mut self) -> Result<(T, P), ForestError> {
        self.ops += 1;
        self.forest.extract_min()
    }

    pub fn decrease(&mut self, node: NodeKey, new_priority: P) -> Result<(), ForestError> {
        self.ops += 1;
        self.forest.decrease(node, new_priority)
    }

    /// Decreases `node` to `floor` and extracts it. Counts as two operations.
    ///
    /// `floor` must be below every other priority in the forest.
    pub fn remove(&mut self, node: NodeKey, floor: P) -> Result<(T, P), ForestError> {
        self.decrease(node, floor)?;
        self.extract_min()
    }

    pub fn payload_mut(&mut self, node: NodeKey) -> Option<&mut T> {
        self.forest.payload_mut(node)
    }

    pub fn priority(&self, node: NodeKey) -> Option<&P> {
        self.forest.priority(node)
    }

    pub fn len(&self) -> usize {
        self.forest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    #[inline]
    pub fn ops(&self) -> u64 {
        self.ops
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.forest.strategy().steps()
    }

    /// Average number of structural steps per operation.
    pub fn steps_per_op(&self) -> f64 {
        self.steps() as f64 / self.ops.max(1) as f64
    }

    pub fn forest(&self) -> &PriorityForest<T, P, Instrumented> {
        &self.forest
    }

    /// Report for a run on a forest of nominal size `size`.
    pub fn report(&self, size: usize) -> WorkloadReport {
        WorkloadReport {
            size,
            ops: self.ops,
            steps: self.steps(),
        }
    }
}

/// Outcome of one workload run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadReport {
    pub size: usize,
    pub ops: u64,
    pub steps: u64,
}

impl WorkloadReport {
    pub fn steps_per_op(&self) -> f64 {
        self.steps as f64 / self.ops.max(1) as f64
    }
}

impl fmt::Display for WorkloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.3}", self.size, self.steps_per_op())
    }
}

/// `n` sizes spaced logarithmically between `begin` and `end`.
///
/// ```rust
/// use priority_forest::experiment::log_range;
///
/// assert_eq!(log_range(50, 80_000, 30).first(), Some(&50));
/// assert_eq!(log_range(10, 1000, 3), vec![10, 100, 1000]);
/// ```
pub fn log_range(begin: usize, end: usize, n: usize) -> Vec<usize> {
    if n < 2 {
        return vec![begin; n];
    }
    let step = (end as f64 / begin as f64).ln() / (n - 1) as f64;
    (0..n)
        .map(|i| (begin as f64 * (step * i as f64).exp()).round() as usize)
        .collect()
}

/// Priority below every priority the star workload inserts.
const STAR_FLOOR: i64 = i64::MIN;

/// Node count of the star workload at `level`.
pub fn star_size(level: u32) -> usize {
    let level = level as usize;
    3 + level * (level + 1) / 2
}

/// Runs the star workload at `level` and reports its cost.
///
/// Builds stars of `level`, `level - 1`, ..., `1` nodes, then alternates
/// `2^level` rounds of two inserts and two extractions.
pub fn run_star(level: u32, policy: DecreasePolicy) -> WorkloadReport {
    let mut experiment = Experiment::new(policy);
    let mut star = Star {
        experiment: &mut experiment,
        handles: vec![None; star_size(level)],
    };

    let mut start = 3;
    for n in (1..=level as usize).rev() {
        star.build(n, start, false);
        start += n;
    }

    for _ in 0..1u64 << level {
        experiment.insert(1, ());
        experiment.insert(1, ());
        experiment.extract_min().expect("star: extract after two inserts");
        experiment.extract_min().expect("star: extract after two inserts");
    }

    experiment.report(star_size(level))
}

struct Star<'a> {
    experiment: &'a mut Experiment<(), i64>,
    handles: Vec<Option<NodeKey>>,
}

impl Star<'_> {
    /// Builds a star of `n` nodes whose nodes use priorities from `r` up.
    fn build(&mut self, n: usize, r: usize, consolidate: bool) {
        if n == 1 {
            if r >= self.handles.len() {
                self.handles.resize(r + 1, None);
            }
            debug_assert!(self.handles[r].is_none(), "star: priority {r} inserted twice");
            self.handles[r] = Some(self.experiment.insert(r as i64, ()));
            if consolidate {
                self.consolidate();
            }
            return;
        }

        self.build(n - 1, r, false);
        self.build(n - 1, r + n - 1, true);
        for i in r + n..r + 2 * n - 2 {
            if let Some(node) = self.handles.get_mut(i).and_then(Option::take) {
                self.experiment
                    .remove(node, STAR_FLOOR)
                    .expect("star: remove of a live node");
            }
        }
    }

    fn consolidate(&mut self) {
        let node = self.experiment.insert(0, ());
        self.experiment
            .remove(node, STAR_FLOOR)
            .expect("star: remove of the node just inserted");
    }
}
