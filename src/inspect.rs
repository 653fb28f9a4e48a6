//! Read-only views of a priority forest
//!
//! [`NodeView`] exposes every field of a node without allowing mutation;
//! [`Dump`] prints the forest as an indented tree. Both exist for test and
//! verification harnesses and never change the structure.

use std::fmt;

use crate::forest::PriorityForest;
use crate::node::{NodeKey, Nodes};
use crate::rank::Rank;
use crate::strategy::Strategy;

/// Borrowed, read-only view of one user node.
pub struct NodeView<'a, T, P> {
    nodes: &'a Nodes<T, P>,
    key: NodeKey,
}

impl<T, P> Clone for NodeView<'_, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, P> Copy for NodeView<'_, T, P> {}

impl<'a, T, P> NodeView<'a, T, P> {
    pub(crate) fn new(nodes: &'a Nodes<T, P>, key: NodeKey) -> Option<Self> {
        nodes.contains(key).then_some(NodeView { nodes, key })
    }

    #[inline]
    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn priority(&self) -> Option<&'a P> {
        self.nodes.priority(self.key)
    }

    pub fn payload(&self) -> Option<&'a T> {
        self.nodes.payload(self.key)
    }

    #[inline]
    pub fn rank(&self) -> Rank {
        self.nodes.rank(self.key)
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        self.nodes.is_marked(self.key)
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.nodes.is_root(self.key)
    }

    /// The parent node, or `None` for roots.
    pub fn parent(&self) -> Option<NodeView<'a, T, P>> {
        self.nodes
            .parent(self.key)
            .and_then(|parent| NodeView::new(self.nodes, parent))
    }

    pub fn next_sibling(&self) -> NodeView<'a, T, P> {
        NodeView {
            nodes: self.nodes,
            key: self.nodes.next_sibling(self.key),
        }
    }

    pub fn prev_sibling(&self) -> NodeView<'a, T, P> {
        NodeView {
            nodes: self.nodes,
            key: self.nodes.prev_sibling(self.key),
        }
    }

    /// Children in ring order, starting at the first child.
    pub fn children(&self) -> impl Iterator<Item = NodeView<'a, T, P>> + 'a {
        let nodes = self.nodes;
        nodes
            .children(self.key)
            .map(move |key| NodeView { nodes, key })
    }

    /// Number of nodes in the subtree rooted here, this node included.
    pub fn subtree_size(&self) -> usize {
        1 + self.children().map(|child| child.subtree_size()).sum::<usize>()
    }
}

impl<T, P: fmt::Debug> fmt::Debug for NodeView<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("key", &self.key)
            .field("priority", &self.priority())
            .field("rank", &self.rank())
            .field("marked", &self.is_marked())
            .finish()
    }
}

impl<T, P: Ord, S: Strategy<T, P>> PriorityForest<T, P, S> {
    /// View of `node`, or `None` if it is not a live node of this forest.
    pub fn node(&self, node: NodeKey) -> Option<NodeView<'_, T, P>> {
        NodeView::new(self.nodes(), node)
    }

    /// Views of the roots, in root-ring order.
    pub fn roots(&self) -> impl Iterator<Item = NodeView<'_, T, P>> + '_ {
        let nodes = self.nodes();
        nodes
            .children(nodes.meta_root())
            .map(move |key| NodeView { nodes, key })
    }

    /// Human-readable rendering of the whole forest.
    ///
    /// ```rust
    /// use priority_forest::PriorityForest;
    ///
    /// let mut forest = PriorityForest::new();
    /// forest.insert(2, 'b');
    /// forest.insert(1, 'a');
    /// assert_eq!(
    ///     forest.dump().to_string(),
    ///     "forest of size 2\n- 2 (payload: 'b')\n- 1 (payload: 'a')\n"
    /// );
    /// ```
    pub fn dump(&self) -> Dump<'_, T, P> {
        Dump {
            nodes: self.nodes(),
            size: self.len(),
        }
    }
}

/// Display adapter returned by [`PriorityForest::dump`].
pub struct Dump<'a, T, P> {
    nodes: &'a Nodes<T, P>,
    size: usize,
}

impl<T: fmt::Debug, P: fmt::Display> Dump<'_, T, P> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, key: NodeKey, depth: usize) -> fmt::Result {
        if let (Some(priority), Some(payload)) = (self.nodes.priority(key), self.nodes.payload(key)) {
            writeln!(f, "{:indent$}- {} (payload: {:?})", "", priority, payload, indent = depth * 2)?;
        }
        for child in self.nodes.children(key) {
            self.write_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug, P: fmt::Display> fmt::Display for Dump<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "forest of size {}", self.size)?;
        for root in self.nodes.children(self.nodes.meta_root()) {
            self.write_node(f, root, 0)?;
        }
        Ok(())
    }
}
