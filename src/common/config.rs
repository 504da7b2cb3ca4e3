//! Configuration constants for multiway.

use super::error::{Error, Result};

/// Smallest legal minimum degree `t`.
///
/// With `t = 2` every non-root node holds 1 to 3 keys (a 2-3-4 tree).
/// Anything smaller leaves no room to split a full node into two
/// non-empty halves, so construction rejects it.
pub const MIN_DEGREE: usize = 2;

/// Largest legal minimum degree `t`; beyond it `2t` overflows `usize`.
pub const MAX_DEGREE: usize = usize::MAX / 2;

/// Upper bound on the key slots reserved up front for a new node.
///
/// Large degrees grow node storage on demand instead of allocating
/// `2t - 1` slots for every empty node.
pub const MAX_PREALLOCATED_KEYS: usize = 64;

/// Minimum degree used by [`BTree::default`](crate::BTree).
///
/// # Fan-out
/// With `t = 6`:
/// - Keys per node: 5 to 11
/// - Children per internal node: 6 to 12
pub const DEFAULT_DEGREE: usize = 6;

/// Maximum number of keys a node may hold (`2t - 1`).
#[inline]
pub const fn max_keys(degree: usize) -> usize {
    2 * degree - 1
}

/// Minimum number of keys a non-root node must hold (`t - 1`).
#[inline]
pub const fn min_keys(degree: usize) -> usize {
    degree - 1
}

/// Maximum number of children an internal node may hold (`2t`).
#[inline]
pub const fn max_children(degree: usize) -> usize {
    2 * degree
}

/// Key slots to reserve for a fresh node of minimum degree `degree`.
#[inline]
pub fn initial_key_capacity(degree: usize) -> usize {
    max_keys(degree).min(MAX_PREALLOCATED_KEYS)
}

/// Child slots to reserve for a fresh internal node of minimum degree `degree`.
#[inline]
pub fn initial_child_capacity(degree: usize) -> usize {
    max_children(degree).min(MAX_PREALLOCATED_KEYS + 1)
}

/// Check that `degree` is usable as a minimum degree.
///
/// # Example
/// ```
/// use multiway::common::config::validate_degree;
///
/// assert_eq!(validate_degree(3).unwrap(), 3);
/// assert!(validate_degree(1).is_err());
/// assert!(validate_degree(usize::MAX).is_err());
/// ```
pub fn validate_degree(degree: usize) -> Result<usize> {
    if degree < MIN_DEGREE || degree.checked_mul(2).is_none() {
        return Err(Error::InvalidDegree {
            degree,
            min: MIN_DEGREE,
            max: MAX_DEGREE,
        });
    }
    Ok(degree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_bounds() {
        assert_eq!(max_keys(2), 3);
        assert_eq!(min_keys(2), 1);
        assert_eq!(max_children(2), 4);

        assert_eq!(max_keys(DEFAULT_DEGREE), 11);
        assert_eq!(min_keys(DEFAULT_DEGREE), 5);
        assert_eq!(max_children(DEFAULT_DEGREE), 12);
    }

    #[test]
    fn test_validate_degree() {
        assert_eq!(validate_degree(MIN_DEGREE), Ok(MIN_DEGREE));
        assert_eq!(validate_degree(64), Ok(64));
        assert_eq!(validate_degree(MAX_DEGREE), Ok(MAX_DEGREE));
        assert_eq!(
            validate_degree(0),
            Err(Error::InvalidDegree {
                degree: 0,
                min: 2,
                max: MAX_DEGREE
            })
        );
        assert_eq!(
            validate_degree(1),
            Err(Error::InvalidDegree {
                degree: 1,
                min: 2,
                max: MAX_DEGREE
            })
        );
    }

    #[test]
    fn test_validate_degree_rejects_overflow() {
        for degree in [MAX_DEGREE + 1, usize::MAX - 1, usize::MAX] {
            assert_eq!(
                validate_degree(degree),
                Err(Error::InvalidDegree {
                    degree,
                    min: MIN_DEGREE,
                    max: MAX_DEGREE
                })
            );
        }
    }

    #[test]
    fn test_initial_capacity_is_capped() {
        assert_eq!(initial_key_capacity(3), 5);
        assert_eq!(initial_child_capacity(3), 6);
        assert_eq!(initial_key_capacity(MAX_DEGREE), MAX_PREALLOCATED_KEYS);
        assert_eq!(
            initial_child_capacity(MAX_DEGREE),
            MAX_PREALLOCATED_KEYS + 1
        );
    }

    #[test]
    fn test_merge_fills_node_exactly() {
        // Two minimal siblings plus one separator make a full node.
        for t in MIN_DEGREE..10 {
            assert_eq!(2 * min_keys(t) + 1, max_keys(t));
        }
    }
}
