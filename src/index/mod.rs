//! Index structures.
//!
//! Currently implements:
//! - [`btree`] - Generic in-memory B-tree keyed by a caller-supplied order

pub mod btree;
