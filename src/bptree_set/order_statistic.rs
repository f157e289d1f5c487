use crate::comparator::Comparator;
use crate::memory::MemoryResource;

use super::BPTreeSet;

impl<K: Copy, C: Comparator<K>, M: MemoryResource> BPTreeSet<K, C, M> {
    /// Returns the key at position `rank` in sorted order.
    ///
    /// The rank is zero-based; `None` when `rank >= len()`. This is the
    /// order-statistic query that motivates the tree: inner nodes carry
    /// per-child subtree counts, so the walk subtracts its way down one
    /// spine instead of scanning.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_bptree::BPTreeSet;
    ///
    /// let set: BPTreeSet<u32> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(set.get_by_rank(1), Some(20));
    /// assert_eq!(set.get_by_rank(3), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<K> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the zero-based position of `key` in sorted order, or `None`
    /// if the key is not present.
    ///
    /// Present keys satisfy `get_by_rank(rank_of(k)) == k`, and ranks are
    /// strictly monotone in the key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_bptree::BPTreeSet;
    ///
    /// let set: BPTreeSet<u32> = [10, 20, 30].into_iter().collect();
    /// assert_eq!(set.rank_of(&30), Some(2));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.raw.rank_of(key)
    }
}
