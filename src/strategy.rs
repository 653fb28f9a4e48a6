//! Extension surface of a priority forest
//!
//! A [`PriorityForest`](crate::PriorityForest) never touches its structure
//! directly: every attach, detach, decrease and bucket-count decision goes
//! through its [`Strategy`]. Overriding those four operations is enough to
//! count structural work, swap the decrease policy or change the rank bound,
//! without touching the rest of the forest. See
//! [`Instrumented`](crate::experiment::Instrumented) for such a strategy.
//!
//! The default bodies are the standard behaviour; [`cascading_decrease`],
//! [`naive_decrease`] and [`cut`] are public so that overriding strategies can
//! reuse them while still routing their own structural steps through `self`.

use crate::node::{NodeKey, Nodes};
use crate::rank;

/// Override points of a priority forest.
///
/// `decrease` is only called after the forest has validated the handle and
/// checked that the priority does not increase.
pub trait Strategy<T, P: Ord> {
    /// Attaches the detached `node` as a child of `parent`.
    #[inline]
    fn add_child(&mut self, nodes: &mut Nodes<T, P>, parent: NodeKey, node: NodeKey) {
        nodes.add_child(parent, node);
    }

    /// Detaches `node` from its parent and returns it.
    #[inline]
    fn remove(&mut self, nodes: &mut Nodes<T, P>, node: NodeKey) -> NodeKey {
        nodes.remove(node)
    }

    /// Lowers the priority of `node` and restores heap order.
    fn decrease(&mut self, nodes: &mut Nodes<T, P>, node: NodeKey, new_priority: P) {
        cascading_decrease(self, nodes, node, new_priority);
    }

    /// Number of consolidation buckets for a forest of `size` nodes.
    #[inline]
    fn max_rank(&mut self, size: usize) -> usize {
        rank::max_rank(size)
    }
}

/// The standard strategy: cascading cuts and the Fibonacci rank bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Standard;

impl<T, P: Ord> Strategy<T, P> for Standard {}

/// Moves the non-root `node` to the root list and clears its mark.
pub fn cut<T, P, S>(strategy: &mut S, nodes: &mut Nodes<T, P>, node: NodeKey)
where
    P: Ord,
    S: Strategy<T, P> + ?Sized,
{
    let node = strategy.remove(nodes, node);
    nodes.set_marked(node, false);
    let meta_root = nodes.meta_root();
    strategy.add_child(nodes, meta_root, node);
}

/// Cuts `node` and then walks up its former ancestors: a marked non-root
/// ancestor is cut as well, the first unmarked non-root ancestor gets marked
/// and ends the walk, and reaching a root ends it unchanged.
///
/// Returns the number of cuts made.
pub fn cascading_cut<T, P, S>(strategy: &mut S, nodes: &mut Nodes<T, P>, node: NodeKey) -> usize
where
    P: Ord,
    S: Strategy<T, P> + ?Sized,
{
    let meta_root = nodes.meta_root();
    let mut current = node;
    let mut cuts = 0;
    loop {
        let parent = match nodes.parent(current) {
            Some(parent) if parent != meta_root => parent,
            _ => break,
        };
        cut(strategy, nodes, current);
        cuts += 1;

        if nodes.is_root(parent) {
            break;
        }
        if !nodes.is_marked(parent) {
            nodes.set_marked(parent, true);
            break;
        }
        current = parent;
    }
    cuts
}

/// Decrease with cascading cuts.
///
/// Sets the priority; if `node` is a root or heap order still holds nothing
/// else happens, otherwise `node` is cut and the cut cascades through marked
/// ancestors (see [`cascading_cut`]).
pub fn cascading_decrease<T, P, S>(
    strategy: &mut S,
    nodes: &mut Nodes<T, P>,
    node: NodeKey,
    new_priority: P,
) where
    P: Ord,
    S: Strategy<T, P> + ?Sized,
{
    nodes.set_priority(node, new_priority);
    if !nodes.violates_heap_order(node) {
        return;
    }

    let cuts = cascading_cut(strategy, nodes, node);
    tracing::trace!(cuts, "cascading cut");
}

/// Decrease without marks: a violating node is moved to the root list and
/// its former parent is left alone, however many children it has lost.
pub fn naive_decrease<T, P, S>(
    strategy: &mut S,
    nodes: &mut Nodes<T, P>,
    node: NodeKey,
    new_priority: P,
) where
    P: Ord,
    S: Strategy<T, P> + ?Sized,
{
    nodes.set_priority(node, new_priority);
    if !nodes.violates_heap_order(node) {
        return;
    }

    let node = strategy.remove(nodes, node);
    let meta_root = nodes.meta_root();
    strategy.add_child(nodes, meta_root, node);
}
