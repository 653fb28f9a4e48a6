//! Node arena and the structural primitives of a priority forest
//!
//! Every node, including the sentinel meta-root, lives in a
//! [`SlotMap`] and refers to its relatives by [`NodeKey`]. The children of a
//! node form a circular doubly-linked ring reachable from `first_child`; the
//! roots of the forest are simply the children of the meta-root, so becoming
//! or ceasing to be a root goes through the same [`Nodes::add_child`] and
//! [`Nodes::remove`] as any other re-parenting.

use crate::rank::{self, Rank};
use index_ring::{RingOps, RingStore};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a node of a [`PriorityForest`](crate::PriorityForest).
    ///
    /// Keys are generational: once the node is extracted the key is stale and
    /// every operation taking it reports
    /// [`ForestError::InvalidTarget`](crate::ForestError::InvalidTarget).
    /// A key must only be used with the forest that returned it.
    pub struct NodeKey;
}

impl crate::traits::Handle for NodeKey {}

const RING: RingOps = RingOps::new();

/// Priority and payload of a user node. The meta-root has none.
pub(crate) struct Entry<T, P> {
    pub(crate) priority: P,
    pub(crate) payload: T,
}

pub(crate) struct Node<T, P> {
    entry: Option<Entry<T, P>>,
    parent: Option<NodeKey>,
    first_child: Option<NodeKey>,
    prev_sibling: NodeKey,
    next_sibling: NodeKey,
    rank: Rank,
    marked: bool,
}

impl<T, P> Node<T, P> {
    fn singleton(key: NodeKey, entry: Option<Entry<T, P>>) -> Self {
        Node {
            entry,
            parent: None,
            first_child: None,
            prev_sibling: key,
            next_sibling: key,
            rank: 0,
            marked: false,
        }
    }
}

/// Arena of forest nodes, meta-root included.
///
/// Strategies receive `&mut Nodes` and rebuild structure through
/// [`add_child`](Nodes::add_child) and [`remove`](Nodes::remove). The
/// structural accessors (`rank`, `parent`, `first_child`, ...) index the arena
/// directly and panic on keys that are not live.
pub struct Nodes<T, P> {
    slots: SlotMap<NodeKey, Node<T, P>>,
    meta_root: NodeKey,
    // child count of the meta-root, which may exceed any rank
    roots: usize,
}

impl<T, P> Nodes<T, P> {
    pub(crate) fn new() -> Self {
        let mut slots = SlotMap::with_key();
        let meta_root = slots.insert_with_key(|key| Node::singleton(key, None));
        Nodes {
            slots,
            meta_root,
            roots: 0,
        }
    }

    /// Allocates a parentless singleton node.
    pub(crate) fn create(&mut self, priority: P, payload: T) -> NodeKey {
        let entry = Some(Entry { priority, payload });
        self.slots.insert_with_key(|key| Node::singleton(key, entry))
    }

    /// Frees a detached leaf and hands back its entry.
    pub(crate) fn destroy(&mut self, key: NodeKey) -> Option<Entry<T, P>> {
        debug_assert!(key != self.meta_root, "destroy: cannot free the meta root");
        debug_assert!(self.slots[key].parent.is_none(), "destroy: node still has a parent");
        debug_assert!(self.slots[key].rank == 0, "destroy: node still has children");
        self.slots.remove(key).and_then(|node| node.entry)
    }

    /// Key of the sentinel whose children are the roots.
    #[inline]
    pub fn meta_root(&self) -> NodeKey {
        self.meta_root
    }

    /// Number of user nodes in the arena.
    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    /// Returns true if the arena holds no user node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `key` names a live user node.
    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        key != self.meta_root && self.slots.contains_key(key)
    }

    pub fn priority(&self, key: NodeKey) -> Option<&P> {
        self.slots
            .get(key)
            .and_then(|node| node.entry.as_ref())
            .map(|entry| &entry.priority)
    }

    pub fn payload(&self, key: NodeKey) -> Option<&T> {
        self.slots
            .get(key)
            .and_then(|node| node.entry.as_ref())
            .map(|entry| &entry.payload)
    }

    pub fn payload_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        self.slots
            .get_mut(key)
            .and_then(|node| node.entry.as_mut())
            .map(|entry| &mut entry.payload)
    }

    /// Raw parent link: the meta-root for roots, `None` only while detached.
    #[inline]
    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.slots[key].parent
    }

    #[inline]
    pub fn first_child(&self, key: NodeKey) -> Option<NodeKey> {
        self.slots[key].first_child
    }

    #[inline]
    pub fn next_sibling(&self, key: NodeKey) -> NodeKey {
        self.slots[key].next_sibling
    }

    #[inline]
    pub fn prev_sibling(&self, key: NodeKey) -> NodeKey {
        self.slots[key].prev_sibling
    }

    /// Rank of a user node. Always 0 for the meta-root, see
    /// [`child_count`](Nodes::child_count).
    #[inline]
    pub fn rank(&self, key: NodeKey) -> Rank {
        self.slots[key].rank
    }

    /// Number of children of `key`; for the meta-root, the number of roots.
    #[inline]
    pub fn child_count(&self, key: NodeKey) -> usize {
        if key == self.meta_root {
            self.roots
        } else {
            usize::from(self.slots[key].rank)
        }
    }

    #[inline]
    pub fn is_marked(&self, key: NodeKey) -> bool {
        self.slots[key].marked
    }

    #[inline]
    pub fn set_marked(&mut self, key: NodeKey, marked: bool) {
        self.slots[key].marked = marked;
    }

    /// Returns true if `key` is a child of the meta-root.
    #[inline]
    pub fn is_root(&self, key: NodeKey) -> bool {
        self.slots[key].parent == Some(self.meta_root)
    }

    /// Iterates the children of `key` in ring order from `first_child`.
    pub fn children(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.first_child(key)
            .into_iter()
            .flat_map(move |first| RING.iter(self, first))
    }
}

impl<T, P: Ord> Nodes<T, P> {
    /// Lowers the priority of `key`.
    ///
    /// Only the priority changes; restoring heap order is up to the caller.
    pub fn set_priority(&mut self, key: NodeKey, priority: P) {
        if let Some(entry) = self.slots[key].entry.as_mut() {
            debug_assert!(priority <= entry.priority, "set_priority: priority increased");
            entry.priority = priority;
        }
    }

    /// Returns true if `key` is a non-root whose parent has a larger priority.
    pub fn violates_heap_order(&self, key: NodeKey) -> bool {
        match self.parent(key) {
            Some(parent) if parent != self.meta_root => self.priority(parent) > self.priority(key),
            _ => false,
        }
    }

    /// Attaches the detached singleton `node` as the last child of `parent`.
    ///
    /// Unless `parent` is the meta-root, both must have the same rank and
    /// `parent` must not have a larger priority. Clears the mark of `node`
    /// and increments the child count of `parent`. This is the only way a
    /// rank grows.
    pub fn add_child(&mut self, parent: NodeKey, node: NodeKey) {
        debug_assert!(node != self.meta_root, "add_child: cannot attach the meta root");
        debug_assert!(self.slots[node].parent.is_none(), "add_child: node already has a parent");
        debug_assert!(RING.is_singleton(&*self, node), "add_child: node has a sibling");
        debug_assert!(
            parent == self.meta_root || self.rank(node) == self.rank(parent),
            "add_child: ranks of node and parent are different"
        );
        debug_assert!(
            parent == self.meta_root || self.priority(parent) <= self.priority(node),
            "add_child: parent has bigger priority than node"
        );

        let first_child = self.slots[parent].first_child;
        match first_child {
            Some(first) => RING.insert_before(self, first, node),
            None => self.slots[parent].first_child = Some(node),
        }

        let child = &mut self.slots[node];
        child.parent = Some(parent);
        child.marked = false;

        if parent == self.meta_root {
            self.roots += 1;
        } else {
            let parent = &mut self.slots[parent];
            parent.rank = rank::checked_increment(parent.rank);
        }
    }

    /// Detaches `node` from its parent and returns it as a singleton.
    ///
    /// Advances the parent's `first_child` past `node` and decrements its
    /// rank. This is the only way a rank shrinks.
    ///
    /// # Panics
    ///
    /// Panics if `node` has no parent.
    pub fn remove(&mut self, node: NodeKey) -> NodeKey {
        debug_assert!(node != self.meta_root, "remove: cannot remove the meta root");
        let Some(parent) = self.slots[node].parent else {
            panic!("remove: cannot disconnect node without parent");
        };

        let next = self.next_sibling(node);
        let remaining = if parent == self.meta_root {
            self.roots -= 1;
            self.roots
        } else {
            let parent_node = &mut self.slots[parent];
            parent_node.rank = rank::checked_decrement(parent_node.rank);
            usize::from(parent_node.rank)
        };

        let parent_node = &mut self.slots[parent];
        if remaining == 0 {
            parent_node.first_child = None;
        } else if parent_node.first_child == Some(node) {
            parent_node.first_child = Some(next);
        }

        self.slots[node].parent = None;
        RING.unlink(self, node);
        node
    }
}

impl<T, P> RingStore for Nodes<T, P> {
    type Key = NodeKey;

    #[inline]
    fn next(&self, key: NodeKey) -> NodeKey {
        self.slots[key].next_sibling
    }

    #[inline]
    fn prev(&self, key: NodeKey) -> NodeKey {
        self.slots[key].prev_sibling
    }

    #[inline]
    fn set_next(&mut self, key: NodeKey, next: NodeKey) {
        self.slots[key].next_sibling = next;
    }

    #[inline]
    fn set_prev(&mut self, key: NodeKey, prev: NodeKey) {
        self.slots[key].prev_sibling = prev;
    }
}
