//! Priority forest: a Fibonacci heap over an arena
//!
//! A priority forest is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease
//! - O(log n) amortized extract-min
//!
//! The structure is a collection of heap-ordered trees whose roots are the
//! children of a sentinel meta-root. Insert only adds a root; extract-min
//! promotes the children of the minimum and then consolidates, pairing roots
//! of equal rank until every rank occurs at most once.

use std::fmt;

use smallvec::{smallvec, SmallVec};

use crate::node::{NodeKey, Nodes};
use crate::strategy::{self, Standard, Strategy};
use crate::traits::{DecreaseKeyHeap, ForestError, Heap};

/// Priority forest
///
/// `T` is the payload, `P` the priority and `S` the [`Strategy`] every
/// structural step is routed through.
///
/// # Example
///
/// ```rust
/// use priority_forest::PriorityForest;
///
/// let mut forest = PriorityForest::new();
/// let handle = forest.insert(5, "item");
/// forest.insert(3, "other");
/// forest.decrease(handle, 1).unwrap();
/// assert_eq!(forest.peek(), Some((&1, &"item")));
/// assert_eq!(forest.extract_min(), Ok(("item", 1)));
/// ```
pub struct PriorityForest<T, P, S = Standard> {
    nodes: Nodes<T, P>,
    size: usize,
    strategy: S,
}

impl<T, P: Ord> PriorityForest<T, P, Standard> {
    /// Creates an empty forest with the standard strategy.
    pub fn new() -> Self {
        Self::with_strategy(Standard)
    }
}

impl<T, P: Ord> Default for PriorityForest<T, P, Standard> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord, S: Strategy<T, P>> PriorityForest<T, P, S> {
    /// Creates an empty forest that routes its structural steps through
    /// `strategy`.
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            nodes: Nodes::new(),
            size: 0,
            strategy,
        }
    }

    /// Returns the number of elements in the forest
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the forest is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Inserts a new node with the given priority and payload and returns its
    /// handle.
    ///
    /// The node becomes a new root; no consolidation happens.
    pub fn insert(&mut self, priority: P, payload: T) -> NodeKey {
        let node = self.nodes.create(priority, payload);
        let meta_root = self.nodes.meta_root();
        self.strategy.add_child(&mut self.nodes, meta_root, node);
        self.size += 1;
        node
    }

    /// Returns the minimum priority and its payload without removing them.
    ///
    /// Scans the roots, so this is O(number of roots).
    pub fn peek(&self) -> Option<(&P, &T)> {
        let min = self.min_root()?;
        Some((self.nodes.priority(min)?, self.nodes.payload(min)?))
    }

    /// Removes the node with minimum priority and returns `(payload, priority)`.
    ///
    /// # Errors
    /// Returns [`ForestError::EmptyStructure`] if the forest is empty.
    pub fn extract_min(&mut self) -> Result<(T, P), ForestError> {
        let min = self.min_root().ok_or(ForestError::EmptyStructure)?;
        self.extract_root(min)
    }

    /// Decreases the priority of `node` to `new_priority`.
    ///
    /// Equal priorities are accepted and change nothing structurally.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidTarget`] if `node` is not a live node of
    /// this forest and [`ForestError::PriorityOrderViolation`] if
    /// `new_priority` is larger than the current priority. The forest is left
    /// untouched in both cases.
    pub fn decrease(&mut self, node: NodeKey, new_priority: P) -> Result<(), ForestError> {
        let current = self.nodes.priority(node).ok_or(ForestError::InvalidTarget)?;
        if new_priority > *current {
            return Err(ForestError::PriorityOrderViolation);
        }
        self.strategy.decrease(&mut self.nodes, node, new_priority);
        Ok(())
    }

    /// Removes an arbitrary node and returns `(payload, priority)`.
    ///
    /// Behaves like decreasing `node` below every other priority and then
    /// extracting the minimum: the node is cut (cascading through marked
    /// ancestors), its children become roots and the roots are consolidated.
    ///
    /// The cut always cascades, whatever [`Strategy::decrease`] does, so a
    /// strategy with a naive decrease still gets marks from `delete`.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidTarget`] if `node` is not a live node of
    /// this forest.
    pub fn delete(&mut self, node: NodeKey) -> Result<(T, P), ForestError> {
        if !self.nodes.contains(node) {
            return Err(ForestError::InvalidTarget);
        }
        strategy::cascading_cut(&mut self.strategy, &mut self.nodes, node);
        self.extract_root(node)
    }

    /// Returns true if `node` is a live node of this forest.
    #[inline]
    pub fn contains(&self, node: NodeKey) -> bool {
        self.nodes.contains(node)
    }

    /// Returns the current priority of `node`.
    pub fn priority(&self, node: NodeKey) -> Option<&P> {
        self.nodes.priority(node)
    }

    /// Returns the payload of `node`.
    pub fn payload(&self, node: NodeKey) -> Option<&T> {
        self.nodes.payload(node)
    }

    /// Returns the payload of `node` for modification. The structure never
    /// looks at payloads.
    pub fn payload_mut(&mut self, node: NodeKey) -> Option<&mut T> {
        self.nodes.payload_mut(node)
    }

    /// Read access to the arena, for harnesses that audit the structure.
    #[inline]
    pub fn nodes(&self) -> &Nodes<T, P> {
        &self.nodes
    }

    #[cfg(test)]
    pub(crate) fn nodes_mut(&mut self) -> &mut Nodes<T, P> {
        &mut self.nodes
    }

    #[inline]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    #[inline]
    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    /// Finds the root with minimum priority; the first one on ties.
    fn min_root(&self) -> Option<NodeKey> {
        let meta_root = self.nodes.meta_root();
        self.nodes
            .children(meta_root)
            .min_by(|&a, &b| self.nodes.priority(a).cmp(&self.nodes.priority(b)))
    }

    /// Removes the root `root`, promotes its children and consolidates.
    fn extract_root(&mut self, root: NodeKey) -> Result<(T, P), ForestError> {
        debug_assert!(self.nodes.is_root(root), "extract_root: node is not a root");
        let meta_root = self.nodes.meta_root();

        let root = self.strategy.remove(&mut self.nodes, root);
        self.size -= 1;

        while let Some(child) = self.nodes.first_child(root) {
            let child = self.strategy.remove(&mut self.nodes, child);
            self.strategy.add_child(&mut self.nodes, meta_root, child);
        }

        let entry = self.nodes.destroy(root).ok_or(ForestError::InvalidTarget)?;
        self.consolidate();
        Ok((entry.payload, entry.priority))
    }

    /// Pairs roots of equal rank until every rank occurs at most once.
    fn consolidate(&mut self) {
        let meta_root = self.nodes.meta_root();
        let roots_before = self.nodes.child_count(meta_root);
        let capacity = self.strategy.max_rank(self.size);
        let mut buckets: SmallVec<[Option<NodeKey>; 64]> = smallvec![None; capacity];

        while let Some(first) = self.nodes.first_child(meta_root) {
            let mut tree = self.strategy.remove(&mut self.nodes, first);
            loop {
                let rank = usize::from(self.nodes.rank(tree));
                if rank >= buckets.len() {
                    tracing::warn!(rank, capacity, size = self.size, "consolidation bucket overflow");
                    buckets.resize(rank + 1, None);
                }
                match buckets[rank].take() {
                    Some(other) => tree = self.pair_trees(tree, other),
                    None => {
                        buckets[rank] = Some(tree);
                        break;
                    }
                }
            }
        }

        for tree in buckets.into_iter().flatten() {
            self.strategy.add_child(&mut self.nodes, meta_root, tree);
        }

        tracing::trace!(
            roots_before,
            roots_after = self.nodes.child_count(meta_root),
            capacity,
            "consolidated"
        );
    }

    /// Links two detached trees of equal rank; the larger priority becomes
    /// a child of the smaller, `a` winning ties. Consolidation passes the
    /// tree it just popped as `a` and the bucket occupant as `b`.
    fn pair_trees(&mut self, a: NodeKey, b: NodeKey) -> NodeKey {
        let (parent, child) = if self.nodes.priority(a) > self.nodes.priority(b) {
            (b, a)
        } else {
            (a, b)
        };
        self.strategy.add_child(&mut self.nodes, parent, child);
        parent
    }
}

impl<T, P, S> fmt::Debug for PriorityForest<T, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta_root = self.nodes.meta_root();
        f.debug_struct("PriorityForest")
            .field("len", &self.size)
            .field("roots", &self.nodes.child_count(meta_root))
            .finish()
    }
}

impl<T, P: Ord, S: Strategy<T, P> + Default> Heap<T, P> for PriorityForest<T, P, S> {
    fn new() -> Self {
        Self::with_strategy(S::default())
    }

    fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn len(&self) -> usize {
        self.size
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        PriorityForest::peek(self)
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.extract_min().ok().map(|(item, priority)| (priority, item))
    }
}

impl<T, P: Ord, S: Strategy<T, P> + Default> DecreaseKeyHeap<T, P> for PriorityForest<T, P, S> {
    type Handle = NodeKey;

    fn push_with_handle(&mut self, priority: P, item: T) -> NodeKey {
        self.insert(priority, item)
    }

    fn decrease_key(&mut self, handle: &NodeKey, new_priority: P) -> Result<(), ForestError> {
        self.decrease(*handle, new_priority)
    }
}
