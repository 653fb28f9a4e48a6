//! Structural audit of a priority forest
//!
//! Walks every node reachable from the meta-root and checks:
//!
//! - heap order: no child has a smaller priority than its parent
//! - parent links of every child point back to the node holding the ring
//! - sibling rings are consistent in both directions
//! - the rank of every node equals its number of children
//! - roots are unmarked
//! - the number of reachable nodes equals the forest size
//! - rank growth: the `i`-th smallest child rank is at least `i - 1`
//!
//! The last check only holds with cascading cuts; [`audit_structure`] skips
//! it for forests driven by a naive decrease. Neither function mutates the
//! forest.

use crate::forest::PriorityForest;
use crate::node::{NodeKey, Nodes};
use crate::rank::Rank;
use crate::strategy::Strategy;
use crate::traits::ForestError;

/// Summary of a successful audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditReport {
    /// Nodes reachable from the meta-root.
    pub nodes: usize,
    /// Number of roots.
    pub roots: usize,
    /// Largest rank of any user node.
    pub max_rank: Rank,
}

/// Runs every check, rank growth included.
///
/// # Errors
/// Returns [`ForestError::StructuralInvariantViolation`] naming the first
/// violated invariant.
pub fn audit<T, P, S>(forest: &PriorityForest<T, P, S>) -> Result<AuditReport, ForestError>
where
    P: Ord,
    S: Strategy<T, P>,
{
    Auditor::new(forest, true).run()
}

/// Like [`audit`] but without the rank growth check.
///
/// # Errors
/// Returns [`ForestError::StructuralInvariantViolation`] naming the first
/// violated invariant.
pub fn audit_structure<T, P, S>(forest: &PriorityForest<T, P, S>) -> Result<AuditReport, ForestError>
where
    P: Ord,
    S: Strategy<T, P>,
{
    Auditor::new(forest, false).run()
}

fn violation(reason: &'static str) -> ForestError {
    ForestError::StructuralInvariantViolation(reason)
}

struct Auditor<'a, T, P> {
    nodes: &'a Nodes<T, P>,
    size: usize,
    rank_growth: bool,
}

impl<'a, T, P: Ord> Auditor<'a, T, P> {
    fn new<S: Strategy<T, P>>(forest: &'a PriorityForest<T, P, S>, rank_growth: bool) -> Self {
        Auditor {
            nodes: forest.nodes(),
            size: forest.len(),
            rank_growth,
        }
    }

    fn run(&self) -> Result<AuditReport, ForestError> {
        let meta_root = self.nodes.meta_root();
        let roots = self.children(meta_root)?;
        for &root in &roots {
            if self.nodes.is_marked(root) {
                return Err(violation("root is marked"));
            }
        }

        let mut count = 0;
        let mut max_rank = 0;
        let mut stack = roots.clone();
        while let Some(node) = stack.pop() {
            count += 1;
            if count > self.nodes.len() {
                return Err(violation("node reachable more than once"));
            }
            if self.nodes.violates_heap_order(node) {
                return Err(violation("parent has bigger priority than its child"));
            }

            let children = self.children(node)?;
            if self.rank_growth {
                let mut ranks: Vec<usize> = children.iter().map(|&c| usize::from(self.nodes.rank(c))).collect();
                ranks.sort_unstable();
                if ranks.iter().enumerate().any(|(i, &rank)| rank + 1 < i) {
                    return Err(violation("child of the node has too small rank"));
                }
            }
            max_rank = max_rank.max(self.nodes.rank(node));
            stack.extend(children);
        }

        if count != self.size || count != self.nodes.len() {
            return Err(violation("size of the forest does not match its number of nodes"));
        }

        Ok(AuditReport {
            nodes: count,
            roots: roots.len(),
            max_rank,
        })
    }

    /// Collects the child ring of `node`, checking links and rank on the way.
    fn children(&self, node: NodeKey) -> Result<Vec<NodeKey>, ForestError> {
        let count = self.nodes.child_count(node);
        let children: Vec<NodeKey> = self.nodes.children(node).take(count + 1).collect();
        if children.len() != count {
            return Err(violation("rank of node does not match its real number of children"));
        }

        for &child in &children {
            if self.nodes.parent(child) != Some(node) {
                return Err(violation("inconsistent parent pointer"));
            }
            if self.nodes.prev_sibling(self.nodes.next_sibling(child)) != child
                || self.nodes.next_sibling(self.nodes.prev_sibling(child)) != child
            {
                return Err(violation("inconsistent sibling pointers"));
            }
        }
        Ok(children)
    }
}
