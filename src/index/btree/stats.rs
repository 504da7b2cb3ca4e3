//! Restructuring statistics.

use std::fmt;

/// Counts of the structural operations a tree has performed.
///
/// The tree is single-threaded, so these are plain counters updated in
/// place; [`BTree::stats`](super::BTree::stats) hands out a copy.
///
/// # Example
/// ```
/// use multiway::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// tree.extend(1..=4);
///
/// let stats = tree.stats();
/// assert_eq!(stats.root_grows, 1);
/// assert_eq!(stats.splits, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Full nodes divided into two siblings.
    pub splits: u64,

    /// Sibling pairs combined with their separator into one node.
    pub merges: u64,

    /// Keys rotated in from a left sibling.
    pub borrows_left: u64,

    /// Keys rotated in from a right sibling.
    pub borrows_right: u64,

    /// Times the tree gained a level (root split).
    pub root_grows: u64,

    /// Times the tree lost a level (root collapsed into its only child).
    pub root_shrinks: u64,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of borrows in either direction.
    pub fn borrows(&self) -> u64 {
        self.borrows_left + self.borrows_right
    }

    /// Total number of node-level restructurings (splits, merges, borrows).
    pub fn restructures(&self) -> u64 {
        self.splits + self.merges + self.borrows()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, merges: {}, borrows: {} ({}L/{}R), grows: {}, shrinks: {} }}",
            self.splits,
            self.merges,
            self.borrows(),
            self.borrows_left,
            self.borrows_right,
            self.root_grows,
            self.root_shrinks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.splits, 0);
        assert_eq!(stats.restructures(), 0);
    }

    #[test]
    fn test_stats_totals() {
        let stats = TreeStats {
            splits: 4,
            merges: 2,
            borrows_left: 1,
            borrows_right: 3,
            ..TreeStats::default()
        };

        assert_eq!(stats.borrows(), 4);
        assert_eq!(stats.restructures(), 10);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = TreeStats {
            splits: 100,
            root_shrinks: 2,
            ..TreeStats::default()
        };

        stats.reset();

        assert_eq!(stats, TreeStats::default());
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats {
            splits: 80,
            merges: 20,
            borrows_left: 2,
            borrows_right: 3,
            root_grows: 4,
            root_shrinks: 1,
        };

        let display = format!("{}", stats);

        assert!(display.contains("splits: 80"));
        assert!(display.contains("merges: 20"));
        assert!(display.contains("borrows: 5 (2L/3R)"));
        assert!(display.contains("shrinks: 1"));
    }
}
