use core::cmp::Ordering;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};

use crate::comparator::Comparator;

use super::layout::{COUNT_SIZE, HEADER_SIZE, NODE_SIZE, NodeLayout, PTR_SIZE};

/// High bit of the first header byte marks a leaf; the low 7 bits hold the
/// item count.
const LEAF_BIT: u8 = 0x80;
const ITEMS_MASK: u8 = 0x7f;

/// A single tree node, leaf or inner, occupying one 256-byte block.
///
/// The block declares nothing but its header. Keys start at byte 8 in both
/// node kinds; inner nodes additionally carry child pointers and per-child
/// subtree counts at the offsets computed by [`NodeLayout`]. Slots are not
/// alignment-guaranteed for arbitrary key widths, so every access goes
/// through unaligned reads and writes.
///
/// A node exclusively owns the children behind its child pointers; the tree
/// frees them in post-order. None of the operations here allocate or
/// descend, they only rearrange the receiver and, for the sibling
/// operations, its direct children.
#[repr(C, align(8))]
pub(crate) struct Node<K> {
    tag: u8,
    _reserved: [u8; HEADER_SIZE - 1],
    _payload: [MaybeUninit<u8>; NODE_SIZE - HEADER_SIZE],
    _marker: PhantomData<K>,
}

/// Result of a lower-bound binary search: the first position whose key is
/// greater than or equal to the probe, with `found` set on exact equality.
pub(crate) struct SearchResult {
    pub(crate) index: usize,
    pub(crate) found: bool,
}

impl<K: Copy> Node<K> {
    /// Stamps a fresh header onto an uninitialized node block.
    ///
    /// # Safety
    /// `block` must be an exclusively owned, [`NODE_SIZE`]-byte allocation
    /// aligned for `Node<K>`.
    pub(crate) unsafe fn init(block: NonNull<u8>, leaf: bool) -> NonNull<Node<K>> {
        let node = block.cast::<Node<K>>();
        // SAFETY: the caller guarantees the block is ours and big enough.
        unsafe {
            ptr::write_bytes(block.as_ptr(), 0, HEADER_SIZE);
            (*node.as_ptr()).tag = if leaf { LEAF_BIT } else { 0 };
        }
        node
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.tag & LEAF_BIT != 0
    }

    #[inline]
    pub(crate) fn num_items(&self) -> usize {
        (self.tag & ITEMS_MASK) as usize
    }

    #[inline]
    fn set_num_items(&mut self, n: usize) {
        debug_assert!(n <= ITEMS_MASK as usize);
        self.tag = (self.tag & LEAF_BIT) | n as u8;
    }

    #[inline]
    pub(crate) fn max_items(&self) -> usize {
        if self.is_leaf() {
            NodeLayout::<K>::MAX_LEAF_ITEMS
        } else {
            NodeLayout::<K>::MAX_INNER_ITEMS
        }
    }

    #[inline]
    pub(crate) fn min_items(&self) -> usize {
        if self.is_leaf() {
            NodeLayout::<K>::MIN_LEAF_ITEMS
        } else {
            NodeLayout::<K>::MIN_INNER_ITEMS
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.num_items() == self.max_items()
    }

    #[inline]
    pub(crate) fn available(&self) -> usize {
        self.max_items() - self.num_items()
    }

    #[inline]
    fn base(&self) -> *const u8 {
        (self as *const Self).cast::<u8>()
    }

    #[inline]
    fn base_mut(&mut self) -> *mut u8 {
        (self as *mut Self).cast::<u8>()
    }

    /// Reads the key at `index` out of the packed key area.
    #[inline]
    pub(crate) fn key(&self, index: usize) -> K {
        debug_assert!(index < self.num_items());
        // SAFETY: slots below `num_items` were written by `set_key` or a
        // bulk copy from initialized slots; the offset is in-block.
        unsafe { ptr::read_unaligned(self.base().add(NodeLayout::<K>::key_offset(index)).cast()) }
    }

    #[inline]
    pub(crate) fn set_key(&mut self, index: usize, key: K) {
        debug_assert!(index < self.max_items());
        // SAFETY: the offset is in-block by the layout guards.
        unsafe {
            ptr::write_unaligned(self.base_mut().add(NodeLayout::<K>::key_offset(index)).cast(), key);
        }
    }

    /// Reads the child pointer at slot `index` of an inner node.
    #[inline]
    pub(crate) fn child(&self, index: usize) -> NonNull<Node<K>> {
        debug_assert!(!self.is_leaf());
        debug_assert!(index <= self.num_items());
        // SAFETY: child slots up to `num_items` hold pointers written by
        // `set_child`; the offset is in-block.
        let raw: *mut Node<K> = unsafe {
            ptr::read_unaligned(self.base().add(NodeLayout::<K>::child_offset(index)).cast())
        };
        debug_assert!(!raw.is_null());
        // SAFETY: live child slots are never null.
        unsafe { NonNull::new_unchecked(raw) }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, index: usize, child: NonNull<Node<K>>) {
        debug_assert!(!self.is_leaf());
        debug_assert!(index <= NodeLayout::<K>::MAX_INNER_ITEMS);
        // SAFETY: the offset is in-block by the layout guards.
        unsafe {
            ptr::write_unaligned(
                self.base_mut().add(NodeLayout::<K>::child_offset(index)).cast(),
                child.as_ptr(),
            );
        }
    }

    /// Stored number of live keys in the subtree below child `index`.
    #[inline]
    pub(crate) fn child_count(&self, index: usize) -> u32 {
        debug_assert!(!self.is_leaf());
        debug_assert!(index <= self.num_items());
        // SAFETY: count slots travel with their child slots, so slots up to
        // `num_items` are initialized; the offset is in-block.
        unsafe { ptr::read_unaligned(self.base().add(NodeLayout::<K>::count_offset(index)).cast()) }
    }

    #[inline]
    pub(crate) fn set_child_count(&mut self, index: usize, count: u32) {
        debug_assert!(!self.is_leaf());
        debug_assert!(index <= NodeLayout::<K>::MAX_INNER_ITEMS);
        // SAFETY: the offset is in-block by the layout guards.
        unsafe {
            ptr::write_unaligned(
                self.base_mut().add(NodeLayout::<K>::count_offset(index)).cast(),
                count,
            );
        }
    }

    #[inline]
    pub(crate) fn incr_child_count(&mut self, index: usize) {
        let count = self.child_count(index);
        self.set_child_count(index, count + 1);
    }

    #[inline]
    pub(crate) fn decr_child_count(&mut self, index: usize) {
        let count = self.child_count(index);
        debug_assert!(count > 0);
        self.set_child_count(index, count - 1);
    }

    /// Number of live keys in the subtree rooted at this node. O(1) for a
    /// leaf, O(fan-out) for an inner node.
    pub(crate) fn subtree_count(&self) -> usize {
        if self.is_leaf() {
            return self.num_items();
        }
        let mut total = self.num_items();
        for i in 0..=self.num_items() {
            total += self.child_count(i) as usize;
        }
        total
    }

    /// Recomputes the stored count for child `index` from the child itself.
    /// Used wherever a sibling operation changed a subtree's content.
    pub(crate) fn refresh_child_count(&mut self, index: usize) {
        // SAFETY: child slots of a live inner node point at live nodes.
        let count = unsafe { self.child(index).as_ref() }.subtree_count();
        self.set_child_count(index, count as u32);
    }

    /// Lower-bound binary search over `[0, num_items)`: the first position
    /// whose key compares greater than or equal to `key`.
    pub(crate) fn bsearch<C: Comparator<K>>(&self, key: &K, cmp: &C) -> SearchResult {
        let mut lo = 0;
        let mut hi = self.num_items();
        while lo < hi {
            let mid = (lo + hi) >> 1;
            let item = self.key(mid);
            match cmp.cmp(key, &item) {
                Ordering::Equal => return SearchResult { index: mid, found: true },
                Ordering::Less => hi = mid,
                // Positions up to `mid` hold keys strictly less than `key`.
                Ordering::Greater => lo = mid + 1,
            }
        }
        SearchResult { index: hi, found: false }
    }

    /// Opens slot `index`: keys from `index` on move one to the right, and
    /// for inner nodes the child and count slots from `index` on follow.
    /// The item count grows by one; slot `index` is left for the caller.
    pub(crate) fn shift_right(&mut self, index: usize) {
        let n = self.num_items();
        debug_assert!(index <= n && n < self.max_items());
        let to_shift = n - index;
        if to_shift > 0 {
            // SAFETY: source and destination ranges are in-block;
            // `ptr::copy` handles their overlap.
            unsafe {
                let keys = self.base_mut().add(NodeLayout::<K>::key_offset(index));
                ptr::copy(
                    keys,
                    keys.add(NodeLayout::<K>::KEY_SIZE),
                    to_shift * NodeLayout::<K>::KEY_SIZE,
                );
                if !self.is_leaf() {
                    let children = self.base_mut().add(NodeLayout::<K>::child_offset(index));
                    ptr::copy(children, children.add(PTR_SIZE), (to_shift + 1) * PTR_SIZE);
                    let counts = self.base_mut().add(NodeLayout::<K>::count_offset(index));
                    ptr::copy(counts, counts.add(COUNT_SIZE), (to_shift + 1) * COUNT_SIZE);
                }
            }
        }
        self.set_num_items(n + 1);
    }

    /// Removes the key at `index`, closing the gap. For inner nodes
    /// `child_step_right` selects whether child slot `index` or `index + 1`
    /// is dropped along with it; both cases arise during merges.
    pub(crate) fn shift_left(&mut self, index: usize, child_step_right: bool) {
        let n = self.num_items();
        debug_assert!(index < n);
        let to_shift = n - index - 1;
        if to_shift > 0 {
            // SAFETY: in-block overlapping copies, as above.
            unsafe {
                let keys = self.base_mut().add(NodeLayout::<K>::key_offset(index));
                ptr::copy(
                    keys.add(NodeLayout::<K>::KEY_SIZE),
                    keys,
                    to_shift * NodeLayout::<K>::KEY_SIZE,
                );
                if !self.is_leaf() {
                    let drop_slot = index + usize::from(child_step_right);
                    let slots = n - drop_slot;
                    if slots > 0 {
                        let children = self.base_mut().add(NodeLayout::<K>::child_offset(drop_slot));
                        ptr::copy(children.add(PTR_SIZE), children, slots * PTR_SIZE);
                        let counts = self.base_mut().add(NodeLayout::<K>::count_offset(drop_slot));
                        ptr::copy(counts.add(COUNT_SIZE), counts, slots * COUNT_SIZE);
                    }
                }
            }
        }
        self.set_num_items(n - 1);
    }

    fn insert_key(&mut self, index: usize, key: K) {
        debug_assert!(index <= self.num_items());
        self.shift_right(index);
        self.set_key(index, key);
    }

    /// Inserts into a leaf with room. The caller has already placed `index`
    /// with `bsearch`, so ordering is preserved by construction.
    pub(crate) fn leaf_insert(&mut self, index: usize, key: K) {
        debug_assert!(self.is_leaf() && self.num_items() < self.max_items());
        self.insert_key(index, key);
    }

    /// Installs a promoted median and the right half of a child split.
    /// Both affected subtree counts are brought up to date.
    pub(crate) fn inner_insert(&mut self, index: usize, key: K, right: NonNull<Node<K>>) {
        debug_assert!(!self.is_leaf() && self.num_items() < self.max_items());
        self.insert_key(index, key);
        self.set_child(index + 1, right);
        // SAFETY: `right` is the freshly split-off half, alive and ours.
        self.set_child_count(index + 1, unsafe { right.as_ref() }.subtree_count() as u32);
        self.refresh_child_count(index);
    }

    /// Splits a full node: the median is returned for promotion, keys above
    /// it (with their child slots) move into `right`, and the receiver
    /// truncates to the lower half. `right` inherits the leaf bit.
    pub(crate) fn split(&mut self, right: &mut Node<K>) -> K {
        let n = self.num_items();
        debug_assert_eq!(n, self.max_items());
        debug_assert_eq!(right.num_items(), 0);
        let mid = n / 2;
        let median = self.key(mid);
        let right_items = n - (mid + 1);
        right.tag = (self.tag & LEAF_BIT) | right_items as u8;
        // SAFETY: distinct nodes; ranges are in-block on both sides.
        unsafe {
            ptr::copy_nonoverlapping(
                self.base().add(NodeLayout::<K>::key_offset(mid + 1)),
                right.base_mut().add(NodeLayout::<K>::key_offset(0)),
                right_items * NodeLayout::<K>::KEY_SIZE,
            );
            if !self.is_leaf() {
                ptr::copy_nonoverlapping(
                    self.base().add(NodeLayout::<K>::child_offset(mid + 1)),
                    right.base_mut().add(NodeLayout::<K>::child_offset(0)),
                    (right_items + 1) * PTR_SIZE,
                );
                ptr::copy_nonoverlapping(
                    self.base().add(NodeLayout::<K>::count_offset(mid + 1)),
                    right.base_mut().add(NodeLayout::<K>::count_offset(0)),
                    (right_items + 1) * COUNT_SIZE,
                );
            }
        }
        self.set_num_items(mid);
        median
    }

    /// Appends the parent separator and the whole of `right`; `right` is
    /// left empty for the caller to retire.
    pub(crate) fn merge_from_right(&mut self, separator: K, right: &mut Node<K>) {
        let n = self.num_items();
        let right_items = right.num_items();
        debug_assert!(n + 1 + right_items <= self.max_items());
        debug_assert_eq!(self.is_leaf(), right.is_leaf());
        self.set_key(n, separator);
        // SAFETY: distinct nodes; ranges are in-block on both sides.
        unsafe {
            ptr::copy_nonoverlapping(
                right.base().add(NodeLayout::<K>::key_offset(0)),
                self.base_mut().add(NodeLayout::<K>::key_offset(n + 1)),
                right_items * NodeLayout::<K>::KEY_SIZE,
            );
            if !self.is_leaf() {
                ptr::copy_nonoverlapping(
                    right.base().add(NodeLayout::<K>::child_offset(0)),
                    self.base_mut().add(NodeLayout::<K>::child_offset(n + 1)),
                    (right_items + 1) * PTR_SIZE,
                );
                ptr::copy_nonoverlapping(
                    right.base().add(NodeLayout::<K>::count_offset(0)),
                    self.base_mut().add(NodeLayout::<K>::count_offset(n + 1)),
                    (right_items + 1) * COUNT_SIZE,
                );
            }
        }
        self.set_num_items(n + 1 + right_items);
        right.set_num_items(0);
    }

    /// Pulls `count` items from child `child_pos` into its left sibling,
    /// rotating through the separator. Requires the sibling to have room.
    pub(crate) fn rebalance_child_to_left(&mut self, child_pos: usize, count: usize) {
        debug_assert!(!self.is_leaf() && child_pos > 0);
        // SAFETY: distinct live children of this node; the parent block
        // does not alias either of them.
        let src = unsafe { &mut *self.child(child_pos).as_ptr() };
        let dest = unsafe { &mut *self.child(child_pos - 1).as_ptr() };
        debug_assert!(count >= 1 && src.num_items() >= count);
        debug_assert!(dest.available() >= count);

        let dest_items = dest.num_items();

        // The separator rotates down into the left sibling, followed by the
        // first `count - 1` keys of the source.
        dest.set_key(dest_items, self.key(child_pos - 1));
        for i in 1..count {
            dest.set_key(dest_items + i, src.key(i - 1));
        }
        // The last moved key becomes the new separator.
        self.set_key(child_pos - 1, src.key(count - 1));

        // Close the gap in the source node.
        for i in count..src.num_items() {
            let key = src.key(i);
            src.set_key(i - count, key);
        }

        if !src.is_leaf() {
            for i in 0..count {
                dest.set_child(dest_items + 1 + i, src.child(i));
                dest.set_child_count(dest_items + 1 + i, src.child_count(i));
            }
            for i in count..=src.num_items() {
                let child = src.child(i);
                let child_count = src.child_count(i);
                src.set_child(i - count, child);
                src.set_child_count(i - count, child_count);
            }
        }

        dest.set_num_items(dest_items + count);
        let src_items = src.num_items();
        src.set_num_items(src_items - count);

        self.refresh_child_count(child_pos - 1);
        self.refresh_child_count(child_pos);
    }

    /// Pushes `count` items from child `child_pos` into its right sibling.
    pub(crate) fn rebalance_child_to_right(&mut self, child_pos: usize, count: usize) {
        debug_assert!(!self.is_leaf() && child_pos < self.num_items());
        // SAFETY: as in `rebalance_child_to_left`.
        let src = unsafe { &mut *self.child(child_pos).as_ptr() };
        let dest = unsafe { &mut *self.child(child_pos + 1).as_ptr() };
        debug_assert!(count >= 1 && src.num_items() >= count);
        debug_assert!(dest.available() >= count);

        let dest_items = dest.num_items();
        debug_assert!(dest_items > 0);

        // Make room at the front of the right sibling.
        for i in (0..dest_items).rev() {
            let key = dest.key(i);
            dest.set_key(i + count, key);
        }

        let new_separator = src.key(src.num_items() - count);
        for i in 1..count {
            dest.set_key(i - 1, src.key(src.num_items() - count + i));
        }
        // The old separator rotates down into the right sibling and the new
        // one rises out of the source.
        dest.set_key(count - 1, self.key(child_pos));
        self.set_key(child_pos, new_separator);

        if !src.is_leaf() {
            for i in (0..=dest_items).rev() {
                let child = dest.child(i);
                let child_count = dest.child_count(i);
                dest.set_child(i + count, child);
                dest.set_child_count(i + count, child_count);
            }
            for i in 0..count {
                let slot = src.num_items() - (count - 1) + i;
                dest.set_child(i, src.child(slot));
                dest.set_child_count(i, src.child_count(slot));
            }
        }

        dest.set_num_items(dest_items + count);
        let src_items = src.num_items();
        src.set_num_items(src_items - count);

        self.refresh_child_count(child_pos);
        self.refresh_child_count(child_pos + 1);
    }

    /// Makes room in the full child at `child_pos` by rotating items into a
    /// sibling, trying the left one first. `insert_pos` is where the
    /// blocked insertion wanted to land inside the child; on success the
    /// translated `(child_pos, insert_pos)` to retry at is returned.
    ///
    /// The amount moved is biased by the insertion point: an insertion at
    /// the very end (or start) of the full child fills the sibling
    /// completely, keeping maximum room on the hot side, while a mid-node
    /// insertion moves only half of the sibling's free slots so both sides
    /// retain headroom.
    pub(crate) fn rebalance_child(
        &mut self,
        child_pos: usize,
        insert_pos: usize,
    ) -> Option<(usize, usize)> {
        debug_assert!(!self.is_leaf());
        // A sibling-less child is only possible under the root, which the
        // caller pre-splits instead of landing here.
        debug_assert!(self.num_items() >= 1);

        let node_ptr = self.child(child_pos);
        // SAFETY: live child of this node; the reference is dropped before
        // any sibling rotation mutates the child.
        let node_items = unsafe { node_ptr.as_ref() }.num_items();

        if child_pos > 0 {
            // SAFETY: live child of this node, read only.
            let (free, left_old_items) = {
                let left = unsafe { self.child(child_pos - 1).as_ref() };
                (left.available(), left.num_items())
            };
            if free > 0 {
                let mut to_move = 0;
                if insert_pos == node_items {
                    to_move = free;
                    debug_assert!(to_move < node_items);
                } else if free > 1 {
                    to_move = free / 2;
                }
                if to_move > 0 {
                    self.rebalance_child_to_left(child_pos, to_move);
                    // SAFETY: re-read after the rotation.
                    debug_assert_eq!(unsafe { node_ptr.as_ref() }.available(), to_move);
                    if insert_pos < to_move {
                        // The insertion point moved with the items; the +1
                        // accounts for the rotated separator.
                        return Some((child_pos - 1, left_old_items + insert_pos + 1));
                    }
                    return Some((child_pos, insert_pos - to_move));
                }
            }
        }

        if child_pos < self.num_items() {
            // SAFETY: live child of this node, read only.
            let free = unsafe { self.child(child_pos + 1).as_ref() }.available();
            if free > 0 {
                let mut to_move = 0;
                if insert_pos == 0 {
                    to_move = free;
                    debug_assert!(to_move < node_items);
                } else if free > 1 {
                    to_move = free / 2;
                }
                if to_move > 0 {
                    self.rebalance_child_to_right(child_pos, to_move);
                    // SAFETY: re-read after the rotation.
                    let remaining = unsafe { node_ptr.as_ref() }.num_items();
                    if insert_pos > remaining {
                        return Some((child_pos + 1, insert_pos - (remaining + 1)));
                    }
                    return Some((child_pos, insert_pos));
                }
            }
        }

        None
    }

    /// Repairs the underfull child at `child_pos` after a deletion. A merge
    /// with the left sibling is preferred, then with the right; when
    /// neither fits, items rotate over from a sibling instead. Returns the
    /// node a merge retired so the tree can free it.
    pub(crate) fn merge_or_rebalance_child(&mut self, child_pos: usize) -> Option<NonNull<Node<K>>> {
        debug_assert!(!self.is_leaf() && self.num_items() >= 1);
        let node_ptr = self.child(child_pos);
        // SAFETY: live child of this node.
        let node = unsafe { &mut *node_ptr.as_ptr() };
        debug_assert!(node.num_items() < node.min_items());

        if child_pos > 0 {
            // SAFETY: live child of this node.
            let left = unsafe { &mut *self.child(child_pos - 1).as_ptr() };
            if left.num_items() + 1 + node.num_items() <= left.max_items() {
                left.merge_from_right(self.key(child_pos - 1), node);
                self.shift_left(child_pos - 1, true);
                self.refresh_child_count(child_pos - 1);
                return Some(node_ptr);
            }
        }

        if child_pos < self.num_items() {
            let right_ptr = self.child(child_pos + 1);
            // SAFETY: live child of this node.
            let right = unsafe { &mut *right_ptr.as_ptr() };
            if node.num_items() + 1 + right.num_items() <= right.max_items() {
                node.merge_from_right(self.key(child_pos), right);
                self.shift_left(child_pos, true);
                self.refresh_child_count(child_pos);
                return Some(right_ptr);
            }

            // Neither merge fits, so the right sibling has plenty to lend.
            let to_move = (right.num_items() - node.num_items()) / 2;
            debug_assert!(to_move >= 1 && to_move < right.num_items());
            self.rebalance_child_to_left(child_pos + 1, to_move);
            return None;
        }

        // Only a left sibling exists and merging with it did not fit.
        debug_assert!(child_pos > 0);
        // SAFETY: live child of this node.
        let left = unsafe { self.child(child_pos - 1).as_ref() };
        let to_move = (left.num_items() - node.num_items()) / 2;
        debug_assert!(to_move >= 1 && to_move < left.num_items());
        self.rebalance_child_to_right(child_pos - 1, to_move);
        None
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use core::alloc::Layout;
    use core::mem::{align_of, size_of};

    use static_assertions::const_assert_eq;
    use std::vec::Vec;

    use crate::comparator::Natural;
    use crate::memory::{Global, MemoryResource};

    use super::*;

    const_assert_eq!(size_of::<Node<u64>>(), NODE_SIZE);
    const_assert_eq!(size_of::<Node<u128>>(), NODE_SIZE);
    const_assert_eq!(align_of::<Node<u64>>(), 8);

    fn node_layout() -> Layout {
        Layout::from_size_align(NODE_SIZE, align_of::<Node<u64>>()).unwrap()
    }

    fn alloc_leaf(keys: &[u64]) -> NonNull<Node<u64>> {
        let block = Global.allocate(node_layout()).unwrap();
        // SAFETY: fresh block of the right size and alignment.
        let node = unsafe { Node::<u64>::init(block, true) };
        // SAFETY: just initialized, exclusively ours.
        let n = unsafe { &mut *node.as_ptr() };
        for (i, &k) in keys.iter().enumerate() {
            n.leaf_insert(i, k);
        }
        node
    }

    fn free(node: NonNull<Node<u64>>) {
        // SAFETY: allocated by this test module with the same layout.
        unsafe { Global.deallocate(node.cast(), node_layout()) };
    }

    #[test]
    fn header_packs_count_and_leaf_bit() {
        let node = alloc_leaf(&[1, 2, 3]);
        // SAFETY: live node from `alloc_leaf`.
        let n = unsafe { node.as_ref() };
        assert!(n.is_leaf());
        assert_eq!(n.num_items(), 3);
        assert_eq!(n.max_items(), 31);
        assert_eq!(n.min_items(), 15);
        free(node);
    }

    #[test]
    fn bsearch_is_lower_bound() {
        let node = alloc_leaf(&[10, 20, 30, 40]);
        // SAFETY: live node from `alloc_leaf`.
        let n = unsafe { node.as_ref() };
        let hit = n.bsearch(&30, &Natural);
        assert!(hit.found);
        assert_eq!(hit.index, 2);
        let miss = n.bsearch(&25, &Natural);
        assert!(!miss.found);
        assert_eq!(miss.index, 2);
        let past_end = n.bsearch(&99, &Natural);
        assert!(!past_end.found);
        assert_eq!(past_end.index, 4);
        free(node);
    }

    #[test]
    fn shift_left_closes_the_gap() {
        let node = alloc_leaf(&[1, 2, 3, 4, 5]);
        // SAFETY: live node from `alloc_leaf`.
        let n = unsafe { &mut *node.as_ptr() };
        n.shift_left(1, false);
        assert_eq!(n.num_items(), 4);
        assert_eq!((0..4).map(|i| n.key(i)).collect::<Vec<_>>(), [1, 3, 4, 5]);
        free(node);
    }

    #[test]
    fn split_then_merge_restores_a_full_leaf() {
        let keys: Vec<u64> = (0..31).collect();
        let left = alloc_leaf(&keys);
        let right_block = Global.allocate(node_layout()).unwrap();
        // SAFETY: fresh block of the right size and alignment.
        let right = unsafe { Node::<u64>::init(right_block, true) };

        // SAFETY: two distinct live nodes.
        let (l, r) = unsafe { (&mut *left.as_ptr(), &mut *right.as_ptr()) };
        let median = l.split(r);
        assert_eq!(median, 15);
        assert_eq!(l.num_items(), 15);
        assert_eq!(r.num_items(), 15);
        assert!(r.is_leaf());
        assert_eq!(l.key(14), 14);
        assert_eq!(r.key(0), 16);

        l.merge_from_right(median, r);
        assert_eq!(l.num_items(), 31);
        assert_eq!(r.num_items(), 0);
        assert_eq!((0..31).map(|i| l.key(i)).collect::<Vec<_>>(), keys);

        free(left);
        free(right);
    }
}
