/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Stateful scan cursors.
//!
//! Unlike [`super::dense::DenseBitSet::next_bit`], which recomputes its
//! answer from the start of the block on every call, a cursor remembers
//! the last block/bit position it returned and resumes from there, so a
//! full left-to-right (or right-to-left) traversal of a set with `k`
//! blocks touches each block a bounded number of times instead of
//! rescanning from block zero on every step (spec.md §4.4).
//!
//! Four cursor kinds cover the product of direction (forward/reverse)
//! and destructiveness (does the cursor erase bits as it yields them).
//! The non-destructive cursors only need [`BitBlockView`]; the
//! destructive ones need [`BitBlockMut`].

use super::block;
use super::traits::{BitBlockMut, BitBlockView};

/// Forward, non-destructive scan cursor.
pub struct Scan {
    block: usize,
    bit_in_block: u64,
}

impl Scan {
    pub fn new() -> Self {
        Self { block: 0, bit_in_block: 0 }
    }

    /// Positions the cursor so the next [`Self::next_bit`] call starts
    /// scanning from the first set bit strictly after `first`. `None`
    /// starts from bit 0 (inclusive).
    pub fn init_scan(&mut self, first: Option<usize>) {
        match first {
            None => {
                self.block = 0;
                self.bit_in_block = u64::MAX;
            }
            Some(b) => {
                self.block = block::wdiv(b);
                let p = block::wmod(b);
                self.bit_in_block = block::mask_1_high(p) & !block::mask_bit(p);
            }
        }
    }

    /// Returns the next set bit at or after the cursor and advances past
    /// it, or `None` once the scan is exhausted.
    pub fn next_bit(&mut self, bb: &impl BitBlockView) -> Option<usize> {
        loop {
            if self.block >= bb.num_blocks() {
                return None;
            }
            let masked = bb.block_or_zero(self.block) & self.bit_in_block;
            if let Some(bit) = block::lsb(masked) {
                self.bit_in_block &= !block::mask_bit(bit);
                return Some(block::wmul(self.block) + bit);
            }
            match bb.next_nonzero_block(self.block + 1) {
                Some(next) => {
                    self.block = next;
                    self.bit_in_block = u64::MAX;
                }
                None => {
                    self.block = bb.num_blocks();
                    return None;
                }
            }
        }
    }
}

impl Default for Scan {
    fn default() -> Self {
        Self::new()
    }
}

/// Reverse, non-destructive scan cursor.
pub struct ScanRev {
    block: usize,
    bit_in_block: u64,
    exhausted: bool,
}

impl ScanRev {
    pub fn new() -> Self {
        Self { block: 0, bit_in_block: 0, exhausted: true }
    }

    /// Positions the cursor so the next [`Self::next_bit`] call starts
    /// scanning from the first set bit strictly before `last`. `None`
    /// starts from the highest bit (inclusive).
    pub fn init_scan(&mut self, bb: &impl BitBlockView, last: Option<usize>) {
        self.exhausted = false;
        match last {
            None => {
                self.block = bb.num_blocks().saturating_sub(1);
                self.bit_in_block = u64::MAX;
                if bb.num_blocks() == 0 {
                    self.exhausted = true;
                }
            }
            Some(b) => {
                self.block = block::wdiv(b);
                let p = block::wmod(b);
                self.bit_in_block = block::mask_1_low(p) & !block::mask_bit(p);
            }
        }
    }

    pub fn next_bit(&mut self, bb: &impl BitBlockView) -> Option<usize> {
        if self.exhausted {
            return None;
        }
        loop {
            let masked = bb.block_or_zero(self.block) & self.bit_in_block;
            if let Some(bit) = block::msb(masked) {
                self.bit_in_block &= !block::mask_bit(bit);
                return Some(block::wmul(self.block) + bit);
            }
            if self.block == 0 {
                self.exhausted = true;
                return None;
            }
            match bb.prev_nonzero_block(self.block - 1) {
                Some(prev) => {
                    self.block = prev;
                    self.bit_in_block = u64::MAX;
                }
                None => {
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}

impl Default for ScanRev {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward, destructive scan cursor: each returned bit is cleared from
/// the underlying set (or from a caller-supplied sibling set, for the
/// "erase from a different set as you scan this one" pattern).
pub struct ScanDest {
    block: usize,
    bit_in_block: u64,
}

impl ScanDest {
    pub fn new() -> Self {
        Self { block: 0, bit_in_block: 0 }
    }

    /// Positions the cursor at the block containing `first`. Destructive
    /// scans ignore any bit offset within that block — only the block
    /// coordinate of `first` is used, and the whole block is scanned.
    pub fn init_scan(&mut self, first: Option<usize>) {
        match first {
            None => {
                self.block = 0;
                self.bit_in_block = u64::MAX;
            }
            Some(b) => {
                self.block = block::wdiv(b);
                self.bit_in_block = u64::MAX;
            }
        }
    }

    /// Returns the next set bit, clearing it from `bb`. If
    /// `delete_also_from` is given, the same bit is also cleared there.
    pub fn next_bit(
        &mut self,
        bb: &mut impl BitBlockMut,
        delete_also_from: Option<&mut impl BitBlockMut>,
    ) -> Option<usize> {
        loop {
            if self.block >= bb.num_blocks() {
                return None;
            }
            let masked = bb.block_or_zero(self.block) & self.bit_in_block;
            if let Some(bit) = block::lsb(masked) {
                self.bit_in_block &= !block::mask_bit(bit);
                let global = block::wmul(self.block) + bit;
                bb.clear_bit(global);
                if let Some(other) = delete_also_from {
                    other.clear_bit(global);
                }
                return Some(global);
            }
            match bb.next_nonzero_block(self.block + 1) {
                Some(next) => {
                    self.block = next;
                    self.bit_in_block = u64::MAX;
                }
                None => {
                    self.block = bb.num_blocks();
                    return None;
                }
            }
        }
    }
}

impl Default for ScanDest {
    fn default() -> Self {
        Self::new()
    }
}

/// Reverse, destructive scan cursor.
pub struct ScanDestRev {
    block: usize,
    bit_in_block: u64,
    exhausted: bool,
}

impl ScanDestRev {
    pub fn new() -> Self {
        Self { block: 0, bit_in_block: 0, exhausted: true }
    }

    /// Positions the cursor at the block containing `last`. Destructive
    /// scans ignore any bit offset within that block — only the block
    /// coordinate of `last` is used, and the whole block is scanned.
    pub fn init_scan(&mut self, bb: &impl BitBlockView, last: Option<usize>) {
        self.exhausted = false;
        match last {
            None => {
                self.block = bb.num_blocks().saturating_sub(1);
                self.bit_in_block = u64::MAX;
                if bb.num_blocks() == 0 {
                    self.exhausted = true;
                }
            }
            Some(b) => {
                self.block = block::wdiv(b);
                self.bit_in_block = u64::MAX;
            }
        }
    }

    pub fn next_bit(
        &mut self,
        bb: &mut impl BitBlockMut,
        delete_also_from: Option<&mut impl BitBlockMut>,
    ) -> Option<usize> {
        if self.exhausted {
            return None;
        }
        loop {
            let masked = bb.block_or_zero(self.block) & self.bit_in_block;
            if let Some(bit) = block::msb(masked) {
                self.bit_in_block &= !block::mask_bit(bit);
                let global = block::wmul(self.block) + bit;
                bb.clear_bit(global);
                if let Some(other) = delete_also_from {
                    other.clear_bit(global);
                }
                return Some(global);
            }
            if self.block == 0 {
                self.exhausted = true;
                return None;
            }
            match bb.prev_nonzero_block(self.block - 1) {
                Some(prev) => {
                    self.block = prev;
                    self.bit_in_block = u64::MAX;
                }
                None => {
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}

impl Default for ScanDestRev {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterates the set bits of `bb` in ascending order using a forward
/// scan cursor, for generic code that only has a `BitBlockView` bound
/// and so cannot call a concrete type's own `next_bit`.
pub fn bits(bb: &impl BitBlockView) -> impl Iterator<Item = usize> + '_ {
    let mut cur = Scan::new();
    cur.init_scan(None);
    std::iter::from_fn(move || cur.next_bit(bb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitscan::dense::DenseBitSet;

    fn bs(pop: usize, bits: &[usize]) -> DenseBitSet {
        DenseBitSet::with_initial_bits(pop, bits.iter().copied()).unwrap()
    }

    #[test]
    fn forward_scan_yields_in_order() {
        let s = bs(200, &[3, 64, 65, 130, 199]);
        let mut cur = Scan::new();
        cur.init_scan(None);
        let mut out = Vec::new();
        while let Some(b) = cur.next_bit(&s) {
            out.push(b);
        }
        assert_eq!(out, vec![3, 64, 65, 130, 199]);
    }

    #[test]
    fn reverse_scan_yields_in_order() {
        let s = bs(200, &[3, 64, 65, 130, 199]);
        let mut cur = ScanRev::new();
        cur.init_scan(&s, None);
        let mut out = Vec::new();
        while let Some(b) = cur.next_bit(&s) {
            out.push(b);
        }
        assert_eq!(out, vec![199, 130, 65, 64, 3]);
    }

    #[test]
    fn forward_scan_from_midpoint() {
        let s = bs(200, &[3, 64, 65, 130]);
        let mut cur = Scan::new();
        cur.init_scan(Some(64));
        let mut out = Vec::new();
        while let Some(b) = cur.next_bit(&s) {
            out.push(b);
        }
        assert_eq!(out, vec![65, 130]);
    }

    #[test]
    fn reverse_scan_from_midpoint_excludes_start_bit() {
        let s = bs(200, &[3, 64, 65, 130]);
        let mut cur = ScanRev::new();
        cur.init_scan(&s, Some(65));
        let mut out = Vec::new();
        while let Some(b) = cur.next_bit(&s) {
            out.push(b);
        }
        assert_eq!(out, vec![64, 3]);
    }

    #[test]
    fn destructive_scan_ignores_bit_offset_and_seeds_whole_block() {
        let mut s = bs(200, &[3, 64, 65, 130]);
        let mut cur = ScanDest::new();
        // Starting at bit 64 should still yield bit 64 itself: a
        // destructive scan seeds only the block, not the bit offset.
        cur.init_scan(Some(64));
        let mut out = Vec::new();
        while let Some(b) = cur.next_bit(&mut s, None::<&mut DenseBitSet>) {
            out.push(b);
        }
        assert_eq!(out, vec![64, 65, 130]);
        assert!(s.is_bit(3));
    }

    #[test]
    fn destructive_forward_scan_empties_set() {
        let mut s = bs(200, &[3, 64, 130]);
        let mut cur = ScanDest::new();
        cur.init_scan(None);
        let mut out = Vec::new();
        while let Some(b) = cur.next_bit(&mut s, None::<&mut DenseBitSet>) {
            out.push(b);
        }
        assert_eq!(out, vec![3, 64, 130]);
        assert!(s.is_empty());
    }

    #[test]
    fn destructive_scan_also_deletes_from_sibling() {
        let mut s = bs(200, &[3, 64]);
        let mut other = bs(200, &[3, 64, 100]);
        let mut cur = ScanDest::new();
        cur.init_scan(None);
        while cur.next_bit(&mut s, Some(&mut other)).is_some() {}
        assert!(s.is_empty());
        assert_eq!(other.count(), 1);
        assert!(other.is_bit(100));
    }

    #[test]
    fn empty_set_scans_yield_nothing() {
        let s = DenseBitSet::new(128).unwrap();
        let mut cur = Scan::new();
        cur.init_scan(None);
        assert_eq!(cur.next_bit(&s), None);
        let mut curr = ScanRev::new();
        curr.init_scan(&s, None);
        assert_eq!(curr.next_bit(&s), None);
    }
}
