/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A bit-set paired with a cached population count.
//!
//! The cache is allowed to drift from `bb.count()` on purpose: callers
//! that need to logically shrink a set for a bound computation, without
//! paying for the block updates a real erase would cost, decrement `pc`
//! directly and leave `bb` untouched. [`BitSetWithPC::is_sync`] and
//! [`BitSetWithPC::recompute_pc`] are the contract for checking and
//! repairing that drift; nothing here re-syncs automatically.

use super::scan::{Scan, ScanRev};
use super::traits::{BitBlockMut, BitBlockView};

/// A bit-set `bb` paired with a cached count `pc`, which may
/// intentionally disagree with `bb.count()`.
#[derive(Clone, Debug)]
pub struct BitSetWithPC<BB> {
    bb: BB,
    pc: i64,
}

impl<BB: BitBlockView> BitSetWithPC<BB> {
    pub fn new(bb: BB) -> Self {
        let pc = bb.count() as i64;
        Self { bb, pc }
    }

    pub fn bitset(&self) -> &BB {
        &self.bb
    }

    /// The cached count, which may be stale; see [`Self::is_sync`].
    pub fn pc(&self) -> i64 {
        self.pc
    }

    /// Whether the cache currently agrees with `bb.count()`.
    pub fn is_sync(&self) -> bool {
        self.pc >= 0 && self.pc as usize == self.bb.count()
    }

    /// Forces `pc := bb.count()`.
    pub fn recompute_pc(&mut self) {
        self.pc = self.bb.count() as i64;
    }

    /// Decrements `pc` without touching `bb`, deliberately desynchronizing
    /// the cache. Used by bound computations that want to pretend the set
    /// shrank without paying for the erase.
    pub fn decrement_pc_lazy(&mut self) {
        self.pc -= 1;
    }

    /// Resets `pc` to zero without touching `bb`.
    pub fn erase_bit_lazy(&mut self) {
        self.pc = 0;
    }
}

impl<BB: BitBlockMut> BitSetWithPC<BB> {
    pub fn bitset_mut(&mut self) -> &mut BB {
        &mut self.bb
    }

    /// Sets bit `b` and increments `pc`. Does not check whether `b` was
    /// already set — the caller is asserting novelty, exactly as the
    /// un-cached `set_bit` does.
    pub fn set_bit(&mut self, b: usize) {
        self.bb.set_bit(b);
        self.pc += 1;
    }

    /// Clears bit `b` and decrements `pc`.
    pub fn erase_bit(&mut self, b: usize) {
        self.bb.clear_bit(b);
        self.pc -= 1;
    }

    /// Returns and erases the lowest set bit, or `None` if the set is
    /// empty.
    pub fn pop_lsb(&mut self) -> Option<usize> {
        let mut cur = Scan::new();
        cur.init_scan(None);
        let bit = cur.next_bit(&self.bb)?;
        self.erase_bit(bit);
        Some(bit)
    }

    /// Returns and erases the highest set bit, or `None` if the set is
    /// empty.
    pub fn pop_msb(&mut self) -> Option<usize> {
        let mut cur = ScanRev::new();
        cur.init_scan(&self.bb, None);
        let bit = cur.next_bit(&self.bb)?;
        self.erase_bit(bit);
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitscan::dense::DenseBitSet;

    #[test]
    fn tracks_count_through_mutation() {
        let mut s = BitSetWithPC::new(DenseBitSet::new(64).unwrap());
        s.set_bit(1);
        s.set_bit(2);
        assert_eq!(s.pc(), 2);
        assert!(s.is_sync());
        s.erase_bit(1);
        assert_eq!(s.pc(), 1);
        assert!(s.is_sync());
    }

    #[test]
    fn lazy_paths_desynchronize_deliberately() {
        let mut s = BitSetWithPC::new(DenseBitSet::new(64).unwrap());
        s.set_bit(1);
        s.set_bit(2);
        s.decrement_pc_lazy();
        assert_eq!(s.pc(), 1);
        assert!(!s.is_sync());
        assert_eq!(s.bitset().count(), 2);
        s.recompute_pc();
        assert!(s.is_sync());

        s.erase_bit_lazy();
        assert_eq!(s.pc(), 0);
        assert!(!s.is_sync());
        assert_eq!(s.bitset().count(), 2);
    }

    #[test]
    fn pop_lsb_and_pop_msb_drain_in_extreme_order() {
        let mut s = BitSetWithPC::new(DenseBitSet::new(200).unwrap());
        s.set_bit(3);
        s.set_bit(64);
        s.set_bit(130);

        assert_eq!(s.pop_lsb(), Some(3));
        assert_eq!(s.pc(), 2);
        assert_eq!(s.pop_msb(), Some(130));
        assert_eq!(s.pc(), 1);
        assert_eq!(s.pop_lsb(), Some(64));
        assert_eq!(s.pc(), 0);
        assert_eq!(s.pop_lsb(), None);
        assert_eq!(s.pop_msb(), None);
    }
}
