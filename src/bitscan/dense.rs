/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Fixed-capacity, dense bit-set: a contiguous sequence of 64-bit blocks.
//!
//! Capacity is a multiple of 64 and is fixed after construction; the
//! population size the caller declared at construction time may be
//! smaller than the physical capacity (spec.md §3), and bits beyond it
//! are not guaranteed to be zero — callers that respect the declared
//! size never observe them through the public API.

use super::block::{self, mask_1, mask_1_high, mask_1_low};
use super::error::BitSetError;
use super::traits::{BitBlockMut, BitBlockView, BitSetFactory};

/// Outcome of classifying a set by its cardinality, used by
/// [`DenseBitSet::is_singleton`] and the block-range variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetSize {
    Empty,
    Singleton(usize),
    Many,
}

/// Outcome of a single-pass classification of an intersection or
/// set-difference, reporting at most the first two witnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classify {
    Empty,
    Singleton(usize),
    Pair(usize, usize),
    Many,
}

/// A fixed-capacity dense bit-set backed by a contiguous `Vec<u64>`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseBitSet {
    n_bb: usize,
    v_bb: Vec<u64>,
}

impl DenseBitSet {
    /// Creates a bit-set able to hold at least `pop_size` elements
    /// (`capacity() == 64 * ceil(pop_size / 64)`), all bits initially
    /// clear.
    pub fn new(pop_size: usize) -> Result<Self, BitSetError> {
        let n_bb = pop_size.div_ceil(64).max(if pop_size == 0 { 0 } else { 1 });
        Self::with_num_blocks(n_bb)
    }

    /// Creates a bit-set with an explicit number of 64-bit blocks.
    pub fn with_num_blocks(n_bb: usize) -> Result<Self, BitSetError> {
        let mut v_bb = Vec::new();
        v_bb
            .try_reserve_exact(n_bb)
            .map_err(|_| BitSetError::Alloc { requested: n_bb * 64 })?;
        v_bb.resize(n_bb, 0);
        Ok(Self { n_bb, v_bb })
    }

    /// Creates a bit-set of population size `pop_size` with `bits` set.
    pub fn with_initial_bits(
        pop_size: usize,
        bits: impl IntoIterator<Item = usize>,
    ) -> Result<Self, BitSetError> {
        let mut bs = Self::new(pop_size)?;
        for b in bits {
            bs.set_bit(b);
        }
        Ok(bs)
    }

    /// Resets the bit-set to a fresh population size, discarding all
    /// current content. The number of blocks may change.
    pub fn reset(&mut self, pop_size: usize) -> Result<(), BitSetError> {
        *self = Self::new(pop_size)?;
        Ok(())
    }

    #[inline(always)]
    fn resolve_hi_block(&self, hi: Option<usize>) -> usize {
        hi.unwrap_or_else(|| self.n_bb.saturating_sub(1))
    }

    /// Total capacity in bits.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.n_bb * 64
    }

    /// Number of 64-bit blocks.
    #[inline(always)]
    pub fn num_blocks(&self) -> usize {
        self.n_bb
    }

    /// Raw block access, used by the scan cursors.
    #[inline(always)]
    pub fn block(&self, i: usize) -> u64 {
        self.v_bb[i]
    }

    #[inline(always)]
    pub fn is_bit(&self, b: usize) -> bool {
        debug_assert!(b < self.capacity());
        (self.v_bb[block::wdiv(b)] & block::mask_bit(block::wmod(b))) != 0
    }

    /// Population of the whole set.
    pub fn count(&self) -> usize {
        self.v_bb.iter().map(|w| block::popc(*w)).sum()
    }

    /// Population restricted to the closed bit-range `[lo, hi]`.
    pub fn count_range(&self, lo: usize, hi: usize) -> usize {
        debug_assert!(lo <= hi && hi < self.capacity());
        self.fold_range(lo, hi, 0usize, |acc, w| acc + block::popc(w))
    }

    #[inline]
    fn fold_range<T>(&self, lo: usize, hi: usize, init: T, mut f: impl FnMut(T, u64) -> T) -> T {
        let lo_block = block::wdiv(lo);
        let hi_block = block::wdiv(hi);
        let mut acc = init;
        for b in lo_block..=hi_block {
            let mut w = self.v_bb[b];
            if b == lo_block {
                w &= mask_1_high(block::wmod(lo));
            }
            if b == hi_block {
                w &= mask_1_low(block::wmod(hi));
            }
            acc = f(acc, w);
        }
        acc
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.v_bb.iter().all(|w| *w == 0)
    }

    /// Whether the closed bit-range `[lo, hi]` has no set bits.
    pub fn is_empty_block(&self, lo: usize, hi: usize) -> bool {
        self.fold_range(lo, hi, true, |acc, w| acc && w == 0)
    }

    /// Index of the lowest set bit, or `None` if empty.
    pub fn lsb(&self) -> Option<usize> {
        for (i, w) in self.v_bb.iter().enumerate() {
            if *w != 0 {
                return Some(block::wmul(i) + block::lsb(*w).unwrap());
            }
        }
        None
    }

    /// Index of the highest set bit, or `None` if empty.
    pub fn msb(&self) -> Option<usize> {
        for (i, w) in self.v_bb.iter().enumerate().rev() {
            if *w != 0 {
                return Some(block::wmul(i) + block::msb(*w).unwrap());
            }
        }
        None
    }

    /// Stateless forward scan: the lowest set bit strictly greater than
    /// `after`, or the lowest set bit at all if `after` is `None`.
    pub fn next_bit(&self, after: Option<usize>) -> Option<usize> {
        let start = match after {
            None => return self.lsb(),
            Some(a) => a + 1,
        };
        if start >= self.capacity() {
            return None;
        }
        let start_block = block::wdiv(start);
        let w = self.v_bb[start_block] & mask_1_high(block::wmod(start));
        if let Some(bit) = block::lsb(w) {
            return Some(block::wmul(start_block) + bit);
        }
        for b in (start_block + 1)..self.n_bb {
            if self.v_bb[b] != 0 {
                return Some(block::wmul(b) + block::lsb(self.v_bb[b]).unwrap());
            }
        }
        None
    }

    /// Stateless reverse scan: the highest set bit strictly less than
    /// `before`, or the highest set bit at all if `before` is `None`.
    pub fn prev_bit(&self, before: Option<usize>) -> Option<usize> {
        let start = match before {
            None => return self.msb(),
            Some(0) => return None,
            Some(b) => b - 1,
        };
        let start_block = block::wdiv(start);
        let w = self.v_bb[start_block] & mask_1_low(block::wmod(start));
        if let Some(bit) = block::msb(w) {
            return Some(block::wmul(start_block) + bit);
        }
        for b in (0..start_block).rev() {
            if self.v_bb[b] != 0 {
                return Some(block::wmul(b) + block::msb(self.v_bb[b]).unwrap());
            }
        }
        None
    }

    /// Classifies the cardinality of the whole set, short-circuiting on
    /// the second hit.
    pub fn is_singleton(&self) -> SetSize {
        match self.lsb() {
            None => SetSize::Empty,
            Some(b) => match self.next_bit(Some(b)) {
                None => SetSize::Singleton(b),
                Some(_) => SetSize::Many,
            },
        }
    }

    /// As [`Self::is_singleton`], restricted to the closed bit-range
    /// `[lo, hi]`.
    pub fn is_singleton_block(&self, lo: usize, hi: usize) -> SetSize {
        let mut found: Option<usize> = None;
        let lo_block = block::wdiv(lo);
        let hi_block = block::wdiv(hi);
        for b in lo_block..=hi_block {
            let mut w = self.v_bb[b];
            if b == lo_block {
                w &= mask_1_high(block::wmod(lo));
            }
            if b == hi_block {
                w &= mask_1_low(block::wmod(hi));
            }
            let mut rem = w;
            while rem != 0 {
                let bit = block::lsb(rem).unwrap();
                let global = block::wmul(b) + bit;
                match found {
                    None => found = Some(global),
                    Some(_) => return SetSize::Many,
                }
                rem &= rem - 1;
            }
        }
        match found {
            None => SetSize::Empty,
            Some(b) => SetSize::Singleton(b),
        }
    }

    /// Lowest bit in `self ∧ rhs`, or `None`.
    pub fn find_first_common(&self, rhs: &Self) -> Option<usize> {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        for b in 0..self.n_bb {
            let w = self.v_bb[b] & rhs.v_bb[b];
            if w != 0 {
                return Some(block::wmul(b) + block::lsb(w).unwrap());
            }
        }
        None
    }

    /// As [`Self::find_first_common`], restricted to the closed
    /// block-range `[lo, hi]`.
    pub fn find_first_common_block(&self, lo: usize, hi: usize, rhs: &Self) -> Option<usize> {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        debug_assert!(lo <= hi && hi < self.n_bb);
        for b in lo..=hi {
            let w = self.v_bb[b] & rhs.v_bb[b];
            if w != 0 {
                return Some(block::wmul(b) + block::lsb(w).unwrap());
            }
        }
        None
    }

    fn classify_combined(&self, rhs: &Self, combine: impl Fn(u64, u64) -> u64) -> Classify {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        let mut witnesses: [Option<usize>; 2] = [None, None];
        let mut count = 0usize;
        for b in 0..self.n_bb {
            let mut rem = combine(self.v_bb[b], rhs.v_bb[b]);
            while rem != 0 {
                let bit = block::lsb(rem).unwrap();
                let global = block::wmul(b) + bit;
                if count < 2 {
                    witnesses[count] = Some(global);
                }
                count += 1;
                if count >= 3 {
                    return Classify::Many;
                }
                rem &= rem - 1;
            }
        }
        match count {
            0 => Classify::Empty,
            1 => Classify::Singleton(witnesses[0].unwrap()),
            2 => Classify::Pair(witnesses[0].unwrap(), witnesses[1].unwrap()),
            _ => unreachable!(),
        }
    }

    /// Classifies `self ∧ rhs` as empty / singleton / pair / many in a
    /// single pass.
    pub fn find_common_singleton(&self, rhs: &Self) -> Classify {
        self.classify_combined(rhs, |a, b| a & b)
    }

    /// Classifies `self \ rhs` as empty / singleton / pair / many in a
    /// single pass.
    pub fn find_diff_singleton(&self, rhs: &Self) -> Classify {
        self.classify_combined(rhs, |a, b| a & !b)
    }

    /// Classifies `self \ rhs`, reporting up to its first two witnesses.
    /// Equivalent to [`Self::find_diff_singleton`]; kept as a distinct
    /// name because the source library exposes it separately for the
    /// "exactly two left over" caller pattern.
    pub fn find_diff_pair(&self, rhs: &Self) -> Classify {
        self.find_diff_singleton(rhs)
    }

    pub fn is_disjoint(&self, rhs: &Self) -> bool {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        self.v_bb.iter().zip(&rhs.v_bb).all(|(a, b)| a & b == 0)
    }

    pub fn is_disjoint_block(&self, lo: usize, hi: usize, rhs: &Self) -> bool {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        let lo_block = block::wdiv(lo);
        let hi_block = block::wdiv(hi);
        (lo_block..=hi_block).all(|blk| {
            let mut a = self.v_bb[blk];
            let mut r = rhs.v_bb[blk];
            if blk == lo_block {
                let m = mask_1_high(block::wmod(lo));
                a &= m;
                r &= m;
            }
            if blk == hi_block {
                let m = mask_1_low(block::wmod(hi));
                a &= m;
                r &= m;
            }
            a & r == 0
        })
    }

    /// Three-way disjointness check, independent of `self`.
    pub fn are_disjoint(lhs: &Self, rhs: &Self) -> bool {
        lhs.is_disjoint(rhs)
    }

    // ---- Mutation -------------------------------------------------

    #[inline(always)]
    pub fn set_bit(&mut self, b: usize) {
        debug_assert!(b < self.capacity());
        self.v_bb[block::wdiv(b)] |= block::mask_bit(block::wmod(b));
    }

    /// Sets every bit in the closed bit-range `[lo, hi]`.
    pub fn set_bit_range(&mut self, lo: usize, hi: usize) {
        debug_assert!(lo <= hi && hi < self.capacity());
        let lo_block = block::wdiv(lo);
        let hi_block = block::wdiv(hi);
        for b in lo_block..=hi_block {
            let mut m = u64::MAX;
            if b == lo_block {
                m &= mask_1_high(block::wmod(lo));
            }
            if b == hi_block {
                m &= mask_1_low(block::wmod(hi));
            }
            self.v_bb[b] |= m;
        }
    }

    /// Overwrites the whole buffer with `rhs`'s. Requires equal
    /// `num_blocks()`.
    pub fn set_from(&mut self, rhs: &Self) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        self.v_bb.copy_from_slice(&rhs.v_bb);
    }

    /// Copies blocks `[0, wdiv(last_bit))` from `rhs` wholesale, then
    /// copies bits `[0, last_bit]` of the boundary block.
    pub fn set_up_to(&mut self, last_bit: usize, rhs: &Self) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        debug_assert!(last_bit < self.capacity());
        let last_block = block::wdiv(last_bit);
        self.v_bb[..last_block].copy_from_slice(&rhs.v_bb[..last_block]);
        self.v_bb[last_block] = super::block::copy_low(
            block::wmod(last_bit),
            rhs.v_bb[last_block],
            self.v_bb[last_block],
        );
    }

    /// Copies whole blocks `[lo, hi]` from `rhs`.
    pub fn set_block_range(&mut self, lo: usize, hi: usize, rhs: &Self) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        debug_assert!(lo <= hi && hi < self.n_bb);
        self.v_bb[lo..=hi].copy_from_slice(&rhs.v_bb[lo..=hi]);
    }

    #[inline(always)]
    pub fn erase_bit(&mut self, b: usize) {
        debug_assert!(b < self.capacity());
        self.v_bb[block::wdiv(b)] &= !block::mask_bit(block::wmod(b));
    }

    /// Clears bits in the closed range `[lo, hi]`; `hi = None` means
    /// "through the last bit".
    pub fn erase_bit_range(&mut self, lo: usize, hi: Option<usize>) {
        let hi = hi.unwrap_or_else(|| self.capacity() - 1);
        debug_assert!(lo <= hi && hi < self.capacity());
        let lo_block = block::wdiv(lo);
        let hi_block = block::wdiv(hi);
        for b in lo_block..=hi_block {
            let mut m = u64::MAX;
            if b == lo_block {
                m &= mask_1_high(block::wmod(lo));
            }
            if b == hi_block {
                m &= mask_1_low(block::wmod(hi));
            }
            self.v_bb[b] &= !m;
        }
    }

    /// Clears every bit.
    pub fn clear(&mut self) {
        self.v_bb.iter_mut().for_each(|w| *w = 0);
    }

    /// Set-minus: `self <- self \ rhs`.
    pub fn erase_set(&mut self, rhs: &Self) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        for (a, b) in self.v_bb.iter_mut().zip(&rhs.v_bb) {
            *a &= !*b;
        }
    }

    /// `self <- self \ (lhs ∪ rhs)`.
    pub fn erase_set2(&mut self, lhs: &Self, rhs: &Self) {
        debug_assert_eq!(self.n_bb, lhs.n_bb);
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        for b in 0..self.n_bb {
            self.v_bb[b] &= !(lhs.v_bb[b] | rhs.v_bb[b]);
        }
    }

    /// Clears whole blocks `[lo, hi]`, then re-applies `self \ rhs` over
    /// that same block range (so the blocks end up holding exactly
    /// `self \ rhs` restricted to `[lo, hi]`).
    pub fn erase_block(&mut self, lo: usize, hi: usize, rhs: &Self) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        debug_assert!(lo <= hi && hi < self.n_bb);
        for b in lo..=hi {
            self.v_bb[b] &= !rhs.v_bb[b];
        }
    }

    pub fn erase_block2(&mut self, lo: usize, hi: usize, lhs: &Self, rhs: &Self) {
        debug_assert_eq!(self.n_bb, lhs.n_bb);
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        debug_assert!(lo <= hi && hi < self.n_bb);
        for b in lo..=hi {
            self.v_bb[b] &= !(lhs.v_bb[b] | rhs.v_bb[b]);
        }
    }

    pub fn flip(&mut self) {
        self.v_bb.iter_mut().for_each(|w| *w = !*w);
    }

    pub fn flip_block(&mut self, lo: usize, hi: usize) {
        debug_assert!(lo <= hi && hi < self.n_bb);
        for b in lo..=hi {
            self.v_bb[b] = !self.v_bb[b];
        }
    }
}

impl std::ops::BitAndAssign<&DenseBitSet> for DenseBitSet {
    fn bitand_assign(&mut self, rhs: &DenseBitSet) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        for (a, b) in self.v_bb.iter_mut().zip(&rhs.v_bb) {
            *a &= *b;
        }
    }
}

impl std::ops::BitOrAssign<&DenseBitSet> for DenseBitSet {
    fn bitor_assign(&mut self, rhs: &DenseBitSet) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        for (a, b) in self.v_bb.iter_mut().zip(&rhs.v_bb) {
            *a |= *b;
        }
    }
}

impl std::ops::BitXorAssign<&DenseBitSet> for DenseBitSet {
    fn bitxor_assign(&mut self, rhs: &DenseBitSet) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        for (a, b) in self.v_bb.iter_mut().zip(&rhs.v_bb) {
            *a ^= *b;
        }
    }
}

impl BitBlockView for DenseBitSet {
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.capacity()
    }
    #[inline(always)]
    fn num_blocks(&self) -> usize {
        self.n_bb
    }
    #[inline(always)]
    fn is_bit(&self, b: usize) -> bool {
        self.is_bit(b)
    }
    #[inline(always)]
    fn count(&self) -> usize {
        self.count()
    }
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
    #[inline(always)]
    fn block_or_zero(&self, block_idx: usize) -> u64 {
        self.v_bb[block_idx]
    }
    fn next_nonzero_block(&self, from_block: usize) -> Option<usize> {
        (from_block..self.n_bb).find(|&b| self.v_bb[b] != 0)
    }
    fn prev_nonzero_block(&self, from_block: usize) -> Option<usize> {
        (0..=from_block).rev().find(|&b| self.v_bb[b] != 0)
    }
}

impl BitSetFactory for DenseBitSet {
    fn with_population(pop_size: usize) -> Result<Self, BitSetError> {
        Self::new(pop_size)
    }
}

impl BitBlockMut for DenseBitSet {
    #[inline(always)]
    fn set_bit(&mut self, b: usize) {
        self.set_bit(b)
    }
    #[inline(always)]
    fn clear_bit(&mut self, b: usize) {
        self.erase_bit(b)
    }
    #[inline(always)]
    fn clear_all(&mut self) {
        self.clear()
    }
}

/// Masked AND over the closed bit-range `[lo, hi]`: inside, `res <- lhs ∧
/// rhs`; outside, cleared if `ERASE` else preserved (boundary blocks
/// preserve the out-of-range bits they still contain).
pub fn and_range<const ERASE: bool>(
    lo: usize,
    hi: usize,
    lhs: &DenseBitSet,
    rhs: &DenseBitSet,
    res: &mut DenseBitSet,
) {
    masked_range_op::<ERASE>(lo, hi, lhs, rhs, res, |a, b| a & b);
}

/// Masked OR over the closed bit-range `[lo, hi]`, same `Erase` contract
/// as [`and_range`].
pub fn or_range<const ERASE: bool>(
    lo: usize,
    hi: usize,
    lhs: &DenseBitSet,
    rhs: &DenseBitSet,
    res: &mut DenseBitSet,
) {
    masked_range_op::<ERASE>(lo, hi, lhs, rhs, res, |a, b| a | b);
}

fn masked_range_op<const ERASE: bool>(
    lo: usize,
    hi: usize,
    lhs: &DenseBitSet,
    rhs: &DenseBitSet,
    res: &mut DenseBitSet,
    combine: impl Fn(u64, u64) -> u64,
) {
    debug_assert_eq!(lhs.n_bb, rhs.n_bb);
    debug_assert_eq!(lhs.n_bb, res.n_bb);
    debug_assert!(lo <= hi && hi < lhs.capacity());
    let lo_block = block::wdiv(lo);
    let hi_block = block::wdiv(hi);
    if ERASE {
        for b in 0..lo_block {
            res.v_bb[b] = 0;
        }
        for b in (hi_block + 1)..res.n_bb {
            res.v_bb[b] = 0;
        }
    }
    for b in lo_block..=hi_block {
        let combined = combine(lhs.v_bb[b], rhs.v_bb[b]);
        res.v_bb[b] = if b == lo_block && b == hi_block {
            let m = mask_1(block::wmod(lo), block::wmod(hi));
            if ERASE {
                combined & m
            } else {
                (res.v_bb[b] & !m) | (combined & m)
            }
        } else if b == lo_block {
            if ERASE {
                combined & mask_1_high(block::wmod(lo))
            } else {
                super::block::copy_high(block::wmod(lo), combined, res.v_bb[b])
            }
        } else if b == hi_block {
            if ERASE {
                combined & mask_1_low(block::wmod(hi))
            } else {
                super::block::copy_low(block::wmod(hi), combined, res.v_bb[b])
            }
        } else {
            combined
        };
    }
}

/// Masked AND over the closed block-range `[lo, hi]` (whole blocks, no
/// bit-level boundary handling needed).
pub fn and_block_range<const ERASE: bool>(
    lo: usize,
    hi: usize,
    lhs: &DenseBitSet,
    rhs: &DenseBitSet,
    res: &mut DenseBitSet,
) {
    masked_block_op::<ERASE>(lo, hi, lhs, rhs, res, |a, b| a & b);
}

/// Masked OR over the closed block-range `[lo, hi]`.
pub fn or_block_range<const ERASE: bool>(
    lo: usize,
    hi: usize,
    lhs: &DenseBitSet,
    rhs: &DenseBitSet,
    res: &mut DenseBitSet,
) {
    masked_block_op::<ERASE>(lo, hi, lhs, rhs, res, |a, b| a | b);
}

fn masked_block_op<const ERASE: bool>(
    lo: usize,
    hi: usize,
    lhs: &DenseBitSet,
    rhs: &DenseBitSet,
    res: &mut DenseBitSet,
    combine: impl Fn(u64, u64) -> u64,
) {
    debug_assert_eq!(lhs.n_bb, rhs.n_bb);
    debug_assert_eq!(lhs.n_bb, res.n_bb);
    debug_assert!(lo <= hi && hi < lhs.n_bb);
    if ERASE {
        for b in 0..lo {
            res.v_bb[b] = 0;
        }
        for b in (hi + 1)..res.n_bb {
            res.v_bb[b] = 0;
        }
    }
    for b in lo..=hi {
        res.v_bb[b] = combine(lhs.v_bb[b], rhs.v_bb[b]);
    }
}

impl DenseBitSet {
    /// In-place `self[lo..=hi] &= rhs[lo..=hi]` (block range).
    pub fn and_equal_block(&mut self, lo: usize, hi: usize, rhs: &Self) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        debug_assert!(lo <= hi && hi < self.n_bb);
        for b in lo..=hi {
            self.v_bb[b] &= rhs.v_bb[b];
        }
    }

    /// In-place `self[lo..=hi] |= rhs[lo..=hi]` (block range).
    pub fn or_equal_block(&mut self, lo: usize, hi: usize, rhs: &Self) {
        debug_assert_eq!(self.n_bb, rhs.n_bb);
        debug_assert!(lo <= hi && hi < self.n_bb);
        for b in lo..=hi {
            self.v_bb[b] |= rhs.v_bb[b];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bs(pop: usize, bits: &[usize]) -> DenseBitSet {
        DenseBitSet::with_initial_bits(pop, bits.iter().copied()).unwrap()
    }

    #[test]
    fn scenario_s1() {
        let s = bs(130, &[10, 20, 64]);
        assert_eq!(s.count(), 3);
        assert_eq!(s.lsb(), Some(10));
        assert_eq!(s.msb(), Some(64));
        assert_eq!(s.next_bit(Some(10)), Some(20));
        assert_eq!(s.prev_bit(Some(64)), Some(20));
        assert_eq!(s.next_bit(Some(64)), None);
    }

    #[test]
    fn scenario_s2() {
        let mut s = DenseBitSet::new(130).unwrap();
        s.set_bit_range(63, 65);
        assert_eq!(s.count(), 3);
        assert!(s.is_bit(63) && s.is_bit(64) && s.is_bit(65));
        assert!(!s.is_bit(62));
        assert!(!s.is_bit(66));
    }

    #[test]
    fn scenario_s3() {
        let a = bs(130, &[10, 20, 64]);
        let b = bs(130, &[10, 64, 100]);
        let mut r = DenseBitSet::new(130).unwrap();
        and_range::<true>(0, 129, &a, &b, &mut r);
        assert_eq!(r.lsb(), Some(10));
        assert_eq!(r.count(), 2);
        assert!(r.is_bit(10) && r.is_bit(64));

        let mut r2 = DenseBitSet::new(130).unwrap();
        and_block_range::<true>(2, 2, &a, &b, &mut r2);
        assert!(r2.is_empty());

        let mut r3 = DenseBitSet::new(130).unwrap();
        r3.set_bit(3);
        and_block_range::<false>(1, 2, &a, &b, &mut r3);
        assert_eq!(r3.count(), 2);
        assert!(r3.is_bit(3) && r3.is_bit(64));
    }

    #[test]
    fn masked_range_preserves_outside_when_not_erasing() {
        let a = bs(192, &[5, 70, 140]);
        let b = bs(192, &[5, 70, 141]);
        let mut res = bs(192, &[1, 190]);
        or_range::<false>(64, 127, &a, &b, &mut res);
        assert!(res.is_bit(1));
        assert!(res.is_bit(190));
        assert!(res.is_bit(70));
    }

    #[test]
    fn classify_intersection_and_difference() {
        let a = bs(128, &[1, 2, 3]);
        let b = bs(128, &[2, 3, 4]);
        assert_eq!(a.find_common_singleton(&b), Classify::Pair(2, 3));
        assert_eq!(a.find_diff_singleton(&b), Classify::Singleton(1));
        let c = bs(128, &[1]);
        assert_eq!(a.find_diff_singleton(&c), Classify::Pair(2, 3));
    }

    #[test]
    fn is_singleton_variants() {
        assert_eq!(DenseBitSet::new(64).unwrap().is_singleton(), SetSize::Empty);
        assert_eq!(bs(64, &[5]).is_singleton(), SetSize::Singleton(5));
        assert_eq!(bs(64, &[5, 6]).is_singleton(), SetSize::Many);
    }

    #[test]
    fn erase_is_noop_on_absent_bit() {
        let mut s = bs(64, &[1, 2]);
        s.erase_bit(9);
        assert_eq!(s.count(), 2);
    }

    #[test]
    fn round_trip_enumerate() {
        let s0 = bs(256, &[0, 1, 63, 64, 200, 255]);
        let mut bits = Vec::new();
        let mut cur = None;
        while let Some(b) = s0.next_bit(cur) {
            bits.push(b);
            cur = Some(b);
        }
        let mut rebuilt = DenseBitSet::new(256).unwrap();
        for b in &bits {
            rebuilt.set_bit(*b);
        }
        assert_eq!(rebuilt, s0);
    }
}
