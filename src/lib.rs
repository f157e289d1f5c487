//! Rank-augmented B+tree collections for ordered, trivially-copyable keys.
//!
//! This crate provides [`BPTreeSet`], an ordered set designed to replace a
//! skip list behind sorted-set workloads in an in-memory key/value store.
//! On top of the usual ordered-set operations it answers two
//! order-statistic queries in O(log n):
//!
//! - [`rank_of`](BPTreeSet::rank_of) - the sorted position of a key
//! - [`get_by_rank`](BPTreeSet::get_by_rank) - the key at a sorted position
//!
//! # Example
//!
//! ```
//! use rank_bptree::BPTreeSet;
//!
//! let mut board = BPTreeSet::new();
//! board.insert(870u64).unwrap();
//! board.insert(120).unwrap();
//! board.insert(430).unwrap();
//!
//! // Ordered-set operations work as expected.
//! assert!(board.contains(&430));
//! assert_eq!(board.iter().collect::<Vec<_>>(), [120, 430, 870]);
//!
//! // Order-statistic operations (O(log n)).
//! assert_eq!(board.rank_of(&430), Some(1));
//! assert_eq!(board.get_by_rank(2), Some(870));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - only requires `alloc`, and node storage is
//!   pluggable through [`MemoryResource`]
//! - **Caller-supplied order** - comparisons funnel through a stored
//!   [`Comparator`], defaulting to the natural order
//! - **O(log n) rank operations** - via per-child subtree counts kept in
//!   inner nodes
//! - **Dense nodes** - every node is one packed 256-byte block, so the
//!   per-key metadata overhead stays at a few bits
//!
//! # Implementation
//!
//! Nodes are raw 256-byte blocks with an 8-byte header; fan-out and slot
//! offsets are derived from the key width at compile time. The tree keeps
//! no parent pointers: operations track their spine in an explicit
//! fixed-depth path. Insertion splits full nodes proactively on the way
//! down, deletion merges or rebalances underfull nodes on the way back up.
//! Keys live in both leaf and inner nodes; inner nodes additionally store a
//! subtree count per child, which is what makes the rank queries
//! logarithmic.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: The packed node layout requires unsafe; every unsafe block carries
// its justification, and everything above the raw module is safe code.
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Subtree counts are bounded by the node geometry, the casts cannot lose.
#![allow(clippy::cast_possible_truncation)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod comparator;
mod error;
mod memory;
mod raw;

pub mod bptree_set;

pub use bptree_set::{BPTreeSet, Iter};
pub use comparator::{Comparator, Natural};
pub use error::AllocError;
pub use memory::{Global, MemoryResource};
