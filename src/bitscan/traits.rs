/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Capability traits describing the bit-set interface shared by the dense
//! and sparse representations.
//!
//! The source library reaches this polymorphism through a class hierarchy
//! rooted at an abstract base with virtual `print`/`init_scan`, and lets
//! scan-cursor templates reach into the bit-set's private word array as
//! friends. Every downstream use site here (the scan cursors, the
//! adjacency graph, the sort engine) is generic over a concrete bit-set
//! type instead, so the dense/sparse choice is resolved at compile time
//! and never through a vtable.

/// Read-only view of a fixed-capacity bit-set's block structure, enough
/// to drive the scan cursors and the query-only call sites in the graph
/// and sort-engine layers.
pub trait BitBlockView {
    /// Number of bits the storage covers (`64 * num_blocks()`).
    fn capacity(&self) -> usize;

    /// Number of 64-bit blocks backing the bit-set.
    fn num_blocks(&self) -> usize;

    /// Whether bit `b` is set. Asserts `b < capacity()`.
    fn is_bit(&self, b: usize) -> bool;

    /// Total population of the set.
    fn count(&self) -> usize;

    /// Whether the set has no bits.
    fn is_empty(&self) -> bool;

    /// The raw word at physical block `block_idx`, or `0` if the block is
    /// not materialized (always the literal value for dense; for sparse,
    /// `0` both for an absent block and for a present-but-zero one kept
    /// around after an erase, per spec.md §4.3).
    fn block_or_zero(&self, block_idx: usize) -> u64;

    /// Lowest block index `>= from_block` whose word is non-zero, or
    /// `None` if none exists within `[from_block, num_blocks())`.
    fn next_nonzero_block(&self, from_block: usize) -> Option<usize>;

    /// Highest block index `<= from_block` whose word is non-zero, or
    /// `None` if none exists within `[0, from_block]`.
    fn prev_nonzero_block(&self, from_block: usize) -> Option<usize>;
}

/// Mutable bit-set capability used by scan cursors in destructive mode
/// and by graph adjacency mutation.
pub trait BitBlockMut: BitBlockView {
    /// Sets bit `b`. Asserts `b < capacity()`.
    fn set_bit(&mut self, b: usize);

    /// Clears bit `b`. A no-op if the bit was already clear. Asserts
    /// `b < capacity()`.
    fn clear_bit(&mut self, b: usize);

    /// Clears every bit.
    fn clear_all(&mut self);
}

/// Constructs a fresh, empty bit-set of a given population size. Lets
/// generic callers (the adjacency graph, the sort engine) build one
/// `adj[v]` per vertex without committing to dense or sparse storage.
pub trait BitSetFactory: Sized {
    fn with_population(pop_size: usize) -> Result<Self, super::error::BitSetError>;
}
