//! multiway - A generic in-memory multiway balanced search tree (B-tree).
//!
//! # Architecture
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                           multiway                            │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌───────────────────────────────────────────────────────┐    │
//! │  │                Tree (index/btree/tree)                │    │
//! │  │    search · insert (split) · delete (borrow/merge)    │    │
//! │  └───────────────────────────────────────────────────────┘    │
//! │            ↓ owns                      ↓ asks                 │
//! │  ┌─────────────────────────┐   ┌─────────────────────────┐    │
//! │  │ Node (index/btree/node) │   │       Comparator        │    │
//! │  │  ≤ 2t-1 keys, n+1 kids  │   │   three-way key order   │    │
//! │  └─────────────────────────┘   └─────────────────────────┘    │
//! │                              ↓                                │
//! │  ┌───────────────────────────────────────────────────────┐    │
//! │  │                   Common (common/)                    │    │
//! │  │            degree config · Error / Result             │    │
//! │  └───────────────────────────────────────────────────────┘    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (degree bounds, Error, Result)
//! - [`index`] - Index structures (B-tree)
//!
//! # Concurrency
//! Nothing here locks. Callers sharing a tree across threads must serialize
//! writers and keep readers out while a write is in progress.
//!
//! # Quick Start
//! ```
//! use multiway::BTree;
//!
//! // Minimum degree 3: every non-root node holds 2 to 5 keys.
//! let mut tree = BTree::new(3).unwrap();
//! tree.extend([1, 18, 2, 5, 19, 6, 7]);
//!
//! assert_eq!(tree.search(&7), Some(&7));
//! assert!(tree.delete(&18));
//! assert_eq!(tree.values(), vec![&1, &2, &5, &6, &7, &19]);
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE};
pub use common::{Error, Result};

pub use index::btree::{BTree, Comparator, NaturalOrder, Node, Reversed, TreeStats};
