//! In-memory B-tree.
//!
//! # Components
//! - [`BTree`] - The tree: search, split-driven insert, borrow/merge-driven delete
//! - [`Node`] - Fixed-capacity key/child container owned by its parent
//! - [`Comparator`] - Three-way key ordering supplied at construction
//! - [`TreeStats`] - Counters for splits, merges, borrows and height changes

mod comparator;
mod node;
mod stats;
mod tree;

pub use comparator::{Comparator, NaturalOrder, Reversed};
pub use node::Node;
pub use stats::TreeStats;
pub use tree::BTree;
