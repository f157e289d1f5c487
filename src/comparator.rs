use core::cmp::Ordering;

/// A total order over keys, supplied when the tree is built.
///
/// Every comparison the tree performs funnels through the comparator
/// instance it was constructed with, so orders that carry state (a
/// collation table, a reversed view of the same keys) work exactly like the
/// natural one. Equality of keys is defined as the comparator returning
/// [`Ordering::Equal`].
///
/// It is a logic error for a comparator to be inconsistent (not a strict
/// total order) or to change its answers while keys are stored. The
/// resulting behavior is not specified, but stays encapsulated in the tree
/// that observed it and does not result in undefined behavior.
pub trait Comparator<K> {
    fn cmp(&self, a: &K, b: &K) -> Ordering;
}

/// The natural ordering of `K`, the default comparator.
///
/// # Examples
///
/// ```
/// use rank_bptree::{BPTreeSet, Natural};
///
/// let mut set: BPTreeSet<u64> = BPTreeSet::new();
/// set.insert(3).unwrap();
/// set.insert(1).unwrap();
/// assert_eq!(set.iter().collect::<Vec<_>>(), [1, 3]);
/// # let _ = Natural;
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<K: Ord> Comparator<K> for Natural {
    #[inline]
    fn cmp(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}
