use core::marker::PhantomData;
use core::mem::size_of;

/// Every node occupies exactly this many bytes, regardless of key width.
pub(crate) const NODE_SIZE: usize = 256;

/// Bytes reserved for the node header (7-bit item count, leaf bit, rest zero).
pub(crate) const HEADER_SIZE: usize = 8;

/// Width of a child reference inside an inner node.
pub(crate) const PTR_SIZE: usize = size_of::<*mut ()>();

/// Width of a per-child subtree count inside an inner node.
pub(crate) const COUNT_SIZE: usize = size_of::<u32>();

/// Compile-time geometry of a node block for key type `K`.
///
/// The node declares no fields beyond its 8-byte header; key, child and
/// count slots live at offsets computed here and are accessed through raw,
/// unaligned reads and writes. Deriving everything from `size_of::<K>()`
/// keeps the block densely packed for any key width instead of losing
/// payload to padding.
pub(crate) struct NodeLayout<K>(PhantomData<K>);

impl<K> NodeLayout<K> {
    pub(crate) const KEY_SIZE: usize = size_of::<K>();

    /// A leaf is nothing but packed keys after the header.
    pub(crate) const MAX_LEAF_ITEMS: usize = (NODE_SIZE - HEADER_SIZE) / Self::KEY_SIZE;
    pub(crate) const MIN_LEAF_ITEMS: usize = (Self::MAX_LEAF_ITEMS - 1) / 2;

    /// An inner node holds `x` keys, `x + 1` child pointers and `x + 1`
    /// subtree counts:
    /// `HEADER + x*key + (x+1)*ptr + (x+1)*count <= NODE_SIZE`.
    pub(crate) const MAX_INNER_ITEMS: usize = (NODE_SIZE - HEADER_SIZE - PTR_SIZE - COUNT_SIZE)
        / (Self::KEY_SIZE + PTR_SIZE + COUNT_SIZE);
    pub(crate) const MIN_INNER_ITEMS: usize = (Self::MAX_INNER_ITEMS - 1) / 2;

    pub(crate) const KEY_OFFSET: usize = HEADER_SIZE;
    pub(crate) const CHILD_OFFSET: usize = HEADER_SIZE + Self::MAX_INNER_ITEMS * Self::KEY_SIZE;
    pub(crate) const COUNT_OFFSET: usize =
        Self::CHILD_OFFSET + (Self::MAX_INNER_ITEMS + 1) * PTR_SIZE;

    /// Referencing this constant forces the layout guards to evaluate when
    /// the tree is instantiated for a concrete `K`.
    pub(crate) const CHECKED: () = {
        assert!(
            size_of::<K>() >= 2,
            "key narrower than 2 bytes: leaf fan-out would overflow the 7-bit item counter",
        );
        assert!(size_of::<K>() <= 32, "key wider than 32 bytes does not fit 256-byte nodes");
        assert!(Self::MAX_LEAF_ITEMS < 128);
        assert!(Self::MIN_INNER_ITEMS >= 1);
        assert!(Self::COUNT_OFFSET + (Self::MAX_INNER_ITEMS + 1) * COUNT_SIZE <= NODE_SIZE);
    };

    #[inline]
    pub(crate) const fn key_offset(index: usize) -> usize {
        Self::KEY_OFFSET + index * Self::KEY_SIZE
    }

    #[inline]
    pub(crate) const fn child_offset(index: usize) -> usize {
        Self::CHILD_OFFSET + index * PTR_SIZE
    }

    #[inline]
    pub(crate) const fn count_offset(index: usize) -> usize {
        Self::COUNT_OFFSET + index * COUNT_SIZE
    }
}
