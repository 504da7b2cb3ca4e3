//! The B-tree proper.
//!
//! # Algorithms
//! - **Search** walks down from the root, scanning each node for the first
//!   key not less than the probe.
//! - **Insert** is proactive: a full node is split *before* the walk enters
//!   it, so the leaf that finally receives the key always has room. A full
//!   root grows the tree by one level.
//! - **Delete** is reactive: before the walk descends into a child holding
//!   only `t - 1` keys, the child is topped up by borrowing from a sibling or
//!   by merging with one. The recursive removal can then always take a key
//!   out of the node it lands in. A root left with no keys and one child
//!   collapses into that child.
//!
//! Every restructuring moves owned nodes between parents; there are no
//! parent pointers.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use super::comparator::{Comparator, NaturalOrder};
use super::node::Node;
use super::stats::TreeStats;
use crate::common::config::{max_keys, min_keys, validate_degree, DEFAULT_DEGREE};
use crate::common::{Error, Result};

/// An ordered in-memory multiway search tree.
///
/// `K` is the key type, `C` the [`Comparator`] that orders keys. Equal keys
/// are allowed and stay adjacent in [`values`](BTree::values).
///
/// # Example
/// ```
/// use multiway::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for key in [5, 1, 4, 2, 3] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.search(&4), Some(&4));
/// assert!(tree.delete(&4));
/// assert!(!tree.delete(&4));
/// assert_eq!(tree.values(), vec![&1, &2, &3, &5]);
/// assert_eq!(tree.count(), 4);
/// ```
#[derive(Clone)]
pub struct BTree<K, C = NaturalOrder> {
    /// Never absent; an empty tree is an empty leaf root.
    root: Node<K>,

    /// Minimum degree `t`, fixed at construction.
    degree: usize,

    cmp: C,

    /// Number of keys stored, maintained incrementally.
    len: usize,

    stats: TreeStats,
}

impl<K: Ord> BTree<K> {
    /// Create an empty tree ordered by `K`'s [`Ord`] implementation.
    ///
    /// Fails with [`Error::InvalidDegree`] if `degree < 2` or `2 * degree`
    /// overflows.
    pub fn new(degree: usize) -> Result<Self> {
        Self::with_comparator(degree, NaturalOrder)
    }
}

impl<K: Ord> Default for BTree<K> {
    fn default() -> Self {
        Self::from_validated(DEFAULT_DEGREE, NaturalOrder)
    }
}

impl<K, C> BTree<K, C> {
    fn from_validated(degree: usize, cmp: C) -> Self {
        Self {
            root: Node::leaf(degree),
            degree,
            cmp,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    /// Number of keys currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Same as [`len`](BTree::len).
    #[inline]
    pub fn count(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The minimum degree `t`.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of levels in the tree. An empty tree has height 1.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// The root node, for read-only inspection.
    pub fn root(&self) -> &Node<K> {
        &self.root
    }

    /// The comparator this tree was built with.
    ///
    /// ```
    /// use multiway::{BTree, NaturalOrder, Reversed};
    ///
    /// let tree = BTree::<u8, _>::with_comparator(2, Reversed(NaturalOrder)).unwrap();
    /// assert_eq!(tree.comparator(), &Reversed(NaturalOrder));
    /// ```
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Smallest key, if any.
    pub fn first(&self) -> Option<&K> {
        self.root.first_key()
    }

    /// Largest key, if any.
    pub fn last(&self) -> Option<&K> {
        self.root.last_key()
    }

    /// All keys in ascending comparator order.
    pub fn values(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect_refs(&mut out);
        out
    }

    /// Consume the tree, returning its keys in ascending comparator order.
    pub fn into_values(self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.len);
        self.root.drain_into(&mut out);
        out
    }

    /// Drop every key. Degree, comparator and statistics are kept.
    pub fn clear(&mut self) {
        self.root = Node::leaf(self.degree);
        self.len = 0;
    }

    /// Copy of the restructuring counters.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

impl<K, C: Comparator<K>> BTree<K, C> {
    /// Create an empty tree ordered by `cmp`.
    ///
    /// Fails with [`Error::InvalidDegree`] if `degree < 2` or `2 * degree`
    /// overflows.
    pub fn with_comparator(degree: usize, cmp: C) -> Result<Self> {
        let degree = validate_degree(degree)?;
        Ok(Self::from_validated(degree, cmp))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Find a stored key equal to `key`.
    ///
    /// Returns the stored key rather than the probe, which matters when the
    /// comparator only looks at part of the key.
    pub fn search(&self, key: &K) -> Option<&K> {
        let mut node = &self.root;
        loop {
            let idx = lower_bound(&self.cmp, &node.keys, key);
            if let Some(found) = node.keys.get(idx) {
                if self.cmp.compare(found, key) == Ordering::Equal {
                    return Some(found);
                }
            }
            node = node.children.get(idx)?;
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert `key`. Always succeeds; an equal key already present is kept
    /// and the new one placed after it.
    pub fn insert(&mut self, key: K) {
        let degree = self.degree;

        if self.root.is_full(degree) {
            let old_root = mem::replace(&mut self.root, Node::from_parts(Vec::new(), Vec::new()));
            self.root = Node::with_only_child(degree, old_root);
            self.stats.root_grows += 1;
            Restructure::new(degree, &mut self.stats).split_child(&mut self.root, 0);
            debug!(
                degree,
                height = self.root.height(),
                len = self.len,
                "btree.root.grow"
            );
        }

        Restructure::new(degree, &mut self.stats).insert_non_full(&self.cmp, &mut self.root, key);
        self.len += 1;
    }

    /// Remove one key equal to `key`, returning the stored key.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let removed =
            Restructure::new(self.degree, &mut self.stats).remove(&self.cmp, &mut self.root, key);
        if removed.is_some() {
            self.len -= 1;
        }

        // The walk may have merged the root's only two children even when
        // the key was absent.
        if self.root.is_empty() && !self.root.is_leaf() {
            let children = mem::take(&mut self.root.children);
            if let Some(child) = children.into_iter().next() {
                self.root = child;
            }
            self.stats.root_shrinks += 1;
            debug!(
                degree = self.degree,
                height = self.root.height(),
                len = self.len,
                "btree.root.shrink"
            );
        }

        removed
    }

    /// Remove one key equal to `key`. Returns whether a key was found.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    // ========================================================================
    // Structural checks
    // ========================================================================

    /// Check every structural invariant.
    ///
    /// - each non-root node holds `t - 1 ..= 2t - 1` keys, the root at most
    ///   `2t - 1`, and an internal node one more child than keys
    /// - keys are in order within each node and bounded by their separators
    /// - all leaves sit at the same depth
    /// - the tracked count matches the number of stored keys
    pub fn validate(&self) -> Result<()> {
        let mut leaf_depth = None;
        let stored = self.check_node(&self.root, 0, None, None, &mut leaf_depth)?;
        if stored != self.len {
            return Err(Error::InvariantViolation(format!(
                "count is {} but {} keys are stored",
                self.len, stored
            )));
        }
        Ok(())
    }

    fn check_node(
        &self,
        node: &Node<K>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        leaf_depth: &mut Option<usize>,
    ) -> Result<usize> {
        let n = node.len();

        if n > max_keys(self.degree) {
            return Err(Error::InvariantViolation(format!(
                "node at depth {} holds {} keys, max is {}",
                depth,
                n,
                max_keys(self.degree)
            )));
        }
        if depth > 0 && n < min_keys(self.degree) {
            return Err(Error::InvariantViolation(format!(
                "node at depth {} holds {} keys, min is {}",
                depth,
                n,
                min_keys(self.degree)
            )));
        }
        if !node.is_leaf() && node.children.len() != n + 1 {
            return Err(Error::InvariantViolation(format!(
                "node at depth {} has {} keys and {} children",
                depth,
                n,
                node.children.len()
            )));
        }

        if node
            .keys
            .windows(2)
            .any(|pair| self.cmp.compare(&pair[0], &pair[1]) == Ordering::Greater)
        {
            return Err(Error::InvariantViolation(format!(
                "keys out of order in node at depth {}",
                depth
            )));
        }
        if let (Some(lo), Some(first)) = (lower, node.keys.first()) {
            if self.cmp.compare(first, lo) == Ordering::Less {
                return Err(Error::InvariantViolation(format!(
                    "key below its left separator at depth {}",
                    depth
                )));
            }
        }
        if let (Some(hi), Some(last)) = (upper, node.keys.last()) {
            if self.cmp.compare(last, hi) == Ordering::Greater {
                return Err(Error::InvariantViolation(format!(
                    "key above its right separator at depth {}",
                    depth
                )));
            }
        }

        if node.is_leaf() {
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(Error::InvariantViolation(format!(
                        "leaf at depth {}, expected {}",
                        depth, expected
                    )));
                }
                Some(_) => {}
            }
            return Ok(n);
        }

        let mut stored = n;
        for (i, child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { node.keys.get(i - 1) };
            let hi = node.keys.get(i).or(upper);
            stored += self.check_node(child, depth + 1, lo, hi, leaf_depth)?;
        }
        Ok(stored)
    }
}

impl<K, C: Comparator<K>> Extend<K> for BTree<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for BTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("degree", &self.degree)
            .field("len", &self.len)
            .field("height", &self.height())
            .field("values", &self.values())
            .finish()
    }
}

/// Index of the first key not less than `key`.
fn lower_bound<K, C: Comparator<K>>(cmp: &C, keys: &[K], key: &K) -> usize {
    keys.partition_point(|k| cmp.compare(k, key) == Ordering::Less)
}

/// Index of the first key greater than `key`.
fn upper_bound<K, C: Comparator<K>>(cmp: &C, keys: &[K], key: &K) -> usize {
    keys.partition_point(|k| cmp.compare(k, key) != Ordering::Greater)
}

// ============================================================================
// Restructuring
// ============================================================================

/// The recursive insert/delete walk and the node surgery it performs.
///
/// Borrows the tree's counters separately from its root so the walk can
/// hold `&mut` to both.
struct Restructure<'a> {
    degree: usize,
    stats: &'a mut TreeStats,
}

impl<'a> Restructure<'a> {
    fn new(degree: usize, stats: &'a mut TreeStats) -> Self {
        Self { degree, stats }
    }

    /// Insert into a subtree whose root is known not to be full.
    fn insert_non_full<K, C: Comparator<K>>(&mut self, cmp: &C, node: &mut Node<K>, key: K) {
        let mut idx = upper_bound(cmp, &node.keys, &key);

        if node.is_leaf() {
            node.keys.insert(idx, key);
            return;
        }

        if node.children[idx].is_full(self.degree) {
            self.split_child(node, idx);
            // The promoted median now sits at `idx`.
            if cmp.compare(&node.keys[idx], &key) != Ordering::Greater {
                idx += 1;
            }
        }
        self.insert_non_full(cmp, &mut node.children[idx], key);
    }

    /// Split the full child at `idx`, promoting its median into `parent`.
    ///
    /// The child keeps its lower `t - 1` keys (and `t` children); a new
    /// right sibling takes the upper `t - 1` keys (and `t` children).
    fn split_child<K>(&mut self, parent: &mut Node<K>, idx: usize) {
        let degree = self.degree;
        let child = &mut parent.children[idx];

        let mut upper = child.keys.split_off(degree - 1);
        let median = upper.remove(0);
        let upper_children = if child.is_leaf() {
            Vec::new()
        } else {
            child.children.split_off(degree)
        };

        parent.keys.insert(idx, median);
        parent
            .children
            .insert(idx + 1, Node::from_parts(upper, upper_children));

        self.stats.splits += 1;
        trace!(index = idx, degree, "btree.node.split");
    }

    /// Remove one key equal to `key` from the subtree rooted at `node`.
    ///
    /// `node` is either the root or holds at least `t` keys.
    fn remove<K, C: Comparator<K>>(&mut self, cmp: &C, node: &mut Node<K>, key: &K) -> Option<K> {
        let idx = lower_bound(cmp, &node.keys, key);
        let hit = node
            .keys
            .get(idx)
            .is_some_and(|k| cmp.compare(k, key) == Ordering::Equal);

        if hit {
            if node.is_leaf() {
                return Some(node.keys.remove(idx));
            }
            if node.children[idx].has_surplus(self.degree) {
                let pred = self.pop_last(&mut node.children[idx])?;
                return Some(mem::replace(&mut node.keys[idx], pred));
            }
            if node.children[idx + 1].has_surplus(self.degree) {
                let succ = self.pop_first(&mut node.children[idx + 1])?;
                return Some(mem::replace(&mut node.keys[idx], succ));
            }
            self.merge(node, idx);
            return self.remove(cmp, &mut node.children[idx], key);
        }

        if node.is_leaf() {
            return None;
        }

        let idx = if node.children[idx].has_surplus(self.degree) {
            idx
        } else {
            self.fill(node, idx)
        };
        self.remove(cmp, &mut node.children[idx], key)
    }

    /// Remove and return the rightmost key of a subtree holding at least `t` keys.
    fn pop_last<K>(&mut self, node: &mut Node<K>) -> Option<K> {
        if node.is_leaf() {
            return node.keys.pop();
        }
        let last = node.keys.len();
        if !node.children[last].has_surplus(self.degree) {
            self.fill(node, last);
        }
        let child = node.children.last_mut()?;
        self.pop_last(child)
    }

    /// Remove and return the leftmost key of a subtree holding at least `t` keys.
    fn pop_first<K>(&mut self, node: &mut Node<K>) -> Option<K> {
        if node.is_leaf() {
            if node.keys.is_empty() {
                return None;
            }
            return Some(node.keys.remove(0));
        }
        if !node.children[0].has_surplus(self.degree) {
            self.fill(node, 0);
        }
        let child = node.children.first_mut()?;
        self.pop_first(child)
    }

    /// Bring the child at `idx` up to at least `t` keys.
    ///
    /// Returns the index of the child that now covers the same key range;
    /// this is `idx - 1` when the last child was merged into its left sibling.
    fn fill<K>(&mut self, node: &mut Node<K>, idx: usize) -> usize {
        let degree = self.degree;
        let n = node.keys.len();

        if idx > 0 && node.children[idx - 1].has_surplus(degree) {
            self.borrow_from_left(node, idx);
            idx
        } else if idx < n && node.children[idx + 1].has_surplus(degree) {
            self.borrow_from_right(node, idx);
            idx
        } else if idx < n {
            self.merge(node, idx);
            idx
        } else {
            self.merge(node, idx - 1);
            idx - 1
        }
    }

    /// Rotate the left sibling's last key up into `node` and the separator
    /// down into the front of the child at `idx`.
    fn borrow_from_left<K>(&mut self, node: &mut Node<K>, idx: usize) {
        let (before, after) = node.children.split_at_mut(idx);
        let donor = &mut before[idx - 1];
        let child = &mut after[0];

        if let Some(key) = donor.keys.pop() {
            let separator = mem::replace(&mut node.keys[idx - 1], key);
            child.keys.insert(0, separator);
        }
        if let Some(grandchild) = donor.children.pop() {
            child.children.insert(0, grandchild);
        }

        self.stats.borrows_left += 1;
        trace!(index = idx, "btree.node.borrow_left");
    }

    /// Rotate the right sibling's first key up into `node` and the separator
    /// down onto the end of the child at `idx`.
    fn borrow_from_right<K>(&mut self, node: &mut Node<K>, idx: usize) {
        let (before, after) = node.children.split_at_mut(idx + 1);
        let child = &mut before[idx];
        let donor = &mut after[0];

        if !donor.keys.is_empty() {
            let key = donor.keys.remove(0);
            let separator = mem::replace(&mut node.keys[idx], key);
            child.keys.push(separator);
        }
        if !donor.children.is_empty() {
            child.children.push(donor.children.remove(0));
        }

        self.stats.borrows_right += 1;
        trace!(index = idx, "btree.node.borrow_right");
    }

    /// Fold the child at `idx + 1` and the separator at `idx` into the child
    /// at `idx`. Two minimal children produce exactly `2t - 1` keys.
    fn merge<K>(&mut self, node: &mut Node<K>, idx: usize) {
        let separator = node.keys.remove(idx);
        let right = node.children.remove(idx + 1);

        let left = &mut node.children[idx];
        left.keys.push(separator);
        left.keys.extend(right.keys);
        left.children.extend(right.children);

        self.stats.merges += 1;
        trace!(index = idx, len = left.keys.len(), "btree.node.merge");
    }
}
