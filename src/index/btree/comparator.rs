//! Three-way key ordering.
//!
//! A [`BTree`](super::BTree) never inspects its keys directly; every
//! ordering decision goes through a [`Comparator`] fixed at construction.

use std::cmp::Ordering;

/// A three-way comparison over keys of type `K`.
///
/// `compare(a, b)` returns `Less` if `a < b`, `Equal` if they are
/// equivalent and `Greater` if `a > b`. The answer for a given pair must not
/// change for as long as both keys live in the same tree.
///
/// The order may be relaxed: a comparator that only looks at part of a key
/// (for example the id of an `(id, payload)` record) is fine as long as it is
/// consistent. Lookups then return the stored key, which can differ from the
/// probe.
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator:
/// ```
/// use multiway::BTree;
///
/// let mut tree = BTree::with_comparator(3, |a: &(u32, &str), b: &(u32, &str)| a.0.cmp(&b.0)).unwrap();
/// tree.insert((7, "seven"));
///
/// assert_eq!(tree.search(&(7, "")), Some(&(7, "seven")));
/// ```
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The key type's own [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator, producing a descending tree.
///
/// # Example
/// ```
/// use multiway::{BTree, NaturalOrder, Reversed};
///
/// let mut tree = BTree::with_comparator(2, Reversed(NaturalOrder)).unwrap();
/// tree.extend([1, 3, 2]);
///
/// assert_eq!(tree.values(), vec![&3, &2, &1]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
