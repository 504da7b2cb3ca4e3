//! B-tree node - the unit of fan-out.
//!
//! A [`Node`] is a plain container: up to `2t - 1` ordered keys and, when
//! internal, exactly one more child than it has keys. It knows nothing about
//! ordering or about the tree that owns it; all restructuring (split, borrow,
//! merge) is done by the tree, which moves keys and children between nodes.

use crate::common::config::{initial_child_capacity, initial_key_capacity, max_keys, min_keys};

/// A node in a [`BTree`](super::BTree).
///
/// # Ownership
/// Every child is owned by exactly one parent. Splits and merges move whole
/// nodes between parents; nothing is shared and there are no parent links.
///
/// # Shape
/// - `keys.len() <= 2t - 1`
/// - leaf: `children` is empty
/// - internal: `children.len() == keys.len() + 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<Node<K>>,
}

impl<K> Node<K> {
    /// Create an empty leaf sized for minimum degree `degree`.
    pub(crate) fn leaf(degree: usize) -> Self {
        Self {
            keys: Vec::with_capacity(initial_key_capacity(degree)),
            children: Vec::new(),
        }
    }

    /// Create an internal node with no keys and a single child.
    ///
    /// This is only a transient shape: the tree immediately splits `child`
    /// so the node ends up with one key and two children.
    pub(crate) fn with_only_child(degree: usize, child: Node<K>) -> Self {
        let mut children = Vec::with_capacity(initial_child_capacity(degree));
        children.push(child);
        Self {
            keys: Vec::with_capacity(initial_key_capacity(degree)),
            children,
        }
    }

    /// Build a node from already-ordered parts.
    pub(crate) fn from_parts(keys: Vec<K>, children: Vec<Node<K>>) -> Self {
        Self { keys, children }
    }

    /// True if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of keys stored in this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True if the node holds `2t - 1` keys and must be split before an insert.
    #[inline]
    pub fn is_full(&self, degree: usize) -> bool {
        self.keys.len() >= max_keys(degree)
    }

    /// True if the node has more than `t - 1` keys and can give one away.
    #[inline]
    pub fn has_surplus(&self, degree: usize) -> bool {
        self.keys.len() > min_keys(degree)
    }

    /// The node's keys, in comparator order.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The node's children; empty for a leaf.
    #[inline]
    pub fn children(&self) -> &[Node<K>] {
        &self.children
    }

    /// Leftmost key of this subtree.
    pub fn first_key(&self) -> Option<&K> {
        let mut node = self;
        while let Some(child) = node.children.first() {
            node = child;
        }
        node.keys.first()
    }

    /// Rightmost key of this subtree.
    pub fn last_key(&self) -> Option<&K> {
        let mut node = self;
        while let Some(child) = node.children.last() {
            node = child;
        }
        node.keys.last()
    }

    /// Number of levels from this node down to its leaves (1 for a leaf).
    pub fn height(&self) -> usize {
        let mut levels = 1;
        let mut node = self;
        while let Some(child) = node.children.first() {
            node = child;
            levels += 1;
        }
        levels
    }

    /// Append this subtree's keys to `out` in order.
    pub(crate) fn collect_refs<'a>(&'a self, out: &mut Vec<&'a K>) {
        match self.children.split_last() {
            None => out.extend(self.keys.iter()),
            Some((last, rest)) => {
                for (child, key) in rest.iter().zip(self.keys.iter()) {
                    child.collect_refs(out);
                    out.push(key);
                }
                last.collect_refs(out);
            }
        }
    }

    /// Consume this subtree, appending its keys to `out` in order.
    pub(crate) fn drain_into(self, out: &mut Vec<K>) {
        let Node { keys, children } = self;
        if children.is_empty() {
            out.extend(keys);
            return;
        }
        let mut children = children.into_iter();
        for key in keys {
            if let Some(child) = children.next() {
                child.drain_into(out);
            }
            out.push(key);
        }
        for child in children {
            child.drain_into(out);
        }
    }
}
