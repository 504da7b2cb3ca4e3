//! Error types for multiway.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in multiway.
///
/// Searching for or deleting an absent key is not an error; those
/// operations report absence through `Option` / `bool`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The minimum degree is too small for split/merge to be well defined,
    /// or so large that the node capacity `2t` overflows.
    #[error("Invalid minimum degree {degree}: must be between {min} and {max}")]
    InvalidDegree { degree: usize, min: usize, max: usize },

    /// A structural check found a broken invariant.
    ///
    /// This indicates a bug in the tree or a comparator that changed its
    /// answers after keys were inserted.
    #[error("B-tree invariant violated: {0}")]
    InvariantViolation(String),
}
