/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Sparse bit-set: a vector of `(block_index, word)` pairs kept sorted by
//! `block_index`, used when the declared population size is large but the
//! expected density is low (spec.md §4.3).
//!
//! Blocks are located by binary search. Erasing a bit never removes its
//! block from the vector even if the word becomes zero — callers that
//! want the vector compacted again call [`SparseBitSet::shrink_to_fit`]
//! explicitly. This mirrors the source library's non-compacting erase,
//! which favors not reshuffling the vector on every erase over keeping it
//! minimal at all times.

use super::block::{self, mask_1, mask_1_high, mask_1_low};
use super::dense::{Classify, SetSize};
use super::error::BitSetError;
use super::traits::{BitBlockMut, BitBlockView, BitSetFactory};

/// One non-implicit-zero word of a [`SparseBitSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseBlock {
    pub idx: usize,
    pub word: u64,
}

/// A fixed-capacity sparse bit-set backed by blocks sorted by index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseBitSet {
    n_bb: usize,
    blocks: Vec<SparseBlock>,
}

impl SparseBitSet {
    pub fn new(pop_size: usize) -> Result<Self, BitSetError> {
        let n_bb = pop_size.div_ceil(64).max(if pop_size == 0 { 0 } else { 1 });
        Ok(Self { n_bb, blocks: Vec::new() })
    }

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

    pub fn reset(&mut self, pop_size: usize) -> Result<(), BitSetError> {
        *self = Self::new(pop_size)?;
        Ok(())
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.n_bb * 64
    }

    #[inline(always)]
    pub fn num_blocks(&self) -> usize {
        self.n_bb
    }

    /// Drops materialized blocks whose word is zero.
    pub fn shrink_to_fit(&mut self) {
        self.blocks.retain(|b| b.word != 0);
        self.blocks.shrink_to_fit();
    }

    /// Binary search for the materialized block at exactly `idx`.
    fn find_block(&self, idx: usize) -> Result<usize, usize> {
        self.blocks.binary_search_by_key(&idx, |b| b.idx)
    }

    /// Lowest materialized-block position whose `idx >= idx` ("lower
    /// bound"). Returns `self.blocks.len()` if none.
    fn lower_bound(&self, idx: usize) -> usize {
        match self.find_block(idx) {
            Ok(pos) => pos,
            Err(pos) => pos,
        }
    }

    /// Highest materialized-block position whose `idx <= idx` ("upper
    /// bound", inclusive). Returns `None` if none.
    fn upper_bound(&self, idx: usize) -> Option<usize> {
        match self.find_block(idx) {
            Ok(pos) => Some(pos),
            Err(0) => None,
            Err(pos) => Some(pos - 1),
        }
    }

    #[inline(always)]
    fn word_at(&self, block_idx: usize) -> u64 {
        match self.find_block(block_idx) {
            Ok(pos) => self.blocks[pos].word,
            Err(_) => 0,
        }
    }

    fn word_mut(&mut self, block_idx: usize) -> &mut u64 {
        match self.find_block(block_idx) {
            Ok(pos) => &mut self.blocks[pos].word,
            Err(pos) => {
                self.blocks.insert(pos, SparseBlock { idx: block_idx, word: 0 });
                &mut self.blocks[pos].word
            }
        }
    }

    #[inline(always)]
    pub fn is_bit(&self, b: usize) -> bool {
        debug_assert!(b < self.capacity());
        (self.word_at(block::wdiv(b)) & block::mask_bit(block::wmod(b))) != 0
    }

    pub fn count(&self) -> usize {
        self.blocks.iter().map(|b| block::popc(b.word)).sum()
    }

    pub fn count_range(&self, lo: usize, hi: usize) -> usize {
        self.fold_range(lo, hi, 0usize, |acc, w| acc + block::popc(w))
    }

    fn fold_range<T>(&self, lo: usize, hi: usize, init: T, mut f: impl FnMut(T, u64) -> T) -> T {
        let lo_block = block::wdiv(lo);
        let hi_block = block::wdiv(hi);
        let start = self.lower_bound(lo_block);
        let mut acc = init;
        for b in &self.blocks[start..] {
            if b.idx > hi_block {
                break;
            }
            let mut w = b.word;
            if b.idx == lo_block {
                w &= mask_1_high(block::wmod(lo));
            }
            if b.idx == hi_block {
                w &= mask_1_low(block::wmod(hi));
            }
            acc = f(acc, w);
        }
        acc
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.word == 0)
    }

    pub fn is_empty_block(&self, lo: usize, hi: usize) -> bool {
        self.fold_range(lo, hi, true, |acc, w| acc && w == 0)
    }

    pub fn lsb(&self) -> Option<usize> {
        for b in &self.blocks {
            if b.word != 0 {
                return Some(block::wmul(b.idx) + block::lsb(b.word).unwrap());
            }
        }
        None
    }

    pub fn msb(&self) -> Option<usize> {
        for b in self.blocks.iter().rev() {
            if b.word != 0 {
                return Some(block::wmul(b.idx) + block::msb(b.word).unwrap());
            }
        }
        None
    }

    pub fn next_bit(&self, after: Option<usize>) -> Option<usize> {
        let start = match after {
            None => return self.lsb(),
            Some(a) => a + 1,
        };
        if start >= self.capacity() {
            return None;
        }
        let start_block = block::wdiv(start);
        let pos = self.lower_bound(start_block);
        for b in &self.blocks[pos..] {
            let mut w = b.word;
            if b.idx == start_block {
                w &= mask_1_high(block::wmod(start));
            }
            if let Some(bit) = block::lsb(w) {
                return Some(block::wmul(b.idx) + bit);
            }
        }
        None
    }

    pub fn prev_bit(&self, before: Option<usize>) -> Option<usize> {
        let start = match before {
            None => return self.msb(),
            Some(0) => return None,
            Some(b) => b - 1,
        };
        let start_block = block::wdiv(start);
        let pos = match self.upper_bound(start_block) {
            Some(p) => p,
            None => return None,
        };
        for b in self.blocks[..=pos].iter().rev() {
            let mut w = b.word;
            if b.idx == start_block {
                w &= mask_1_low(block::wmod(start));
            }
            if let Some(bit) = block::msb(w) {
                return Some(block::wmul(b.idx) + bit);
            }
        }
        None
    }

    pub fn is_singleton(&self) -> SetSize {
        match self.lsb() {
            None => SetSize::Empty,
            Some(b) => match self.next_bit(Some(b)) {
                None => SetSize::Singleton(b),
                Some(_) => SetSize::Many,
            },
        }
    }

    /// Classifies the intersection/difference of two sparse sets by a
    /// merge over both sorted block vectors, avoiding materializing the
    /// combined set.
    fn classify_combined(&self, rhs: &Self, combine: impl Fn(u64, u64) -> u64) -> Classify {
        let mut i = 0usize;
        let mut j = 0usize;
        let mut witnesses: [Option<usize>; 2] = [None, None];
        let mut count = 0usize;
        while i < self.blocks.len() && j < rhs.blocks.len() {
            let a = &self.blocks[i];
            let b = &rhs.blocks[j];
            let (word, idx) = match a.idx.cmp(&b.idx) {
                std::cmp::Ordering::Less => {
                    i += 1;
                    continue;
                }
                std::cmp::Ordering::Greater => {
                    j += 1;
                    continue;
                }
                std::cmp::Ordering::Equal => {
                    let w = combine(a.word, b.word);
                    let idx = a.idx;
                    i += 1;
                    j += 1;
                    (w, idx)
                }
            };
            let mut rem = word;
            while rem != 0 {
                let bit = block::lsb(rem).unwrap();
                let global = block::wmul(idx) + bit;
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

    pub fn find_common_singleton(&self, rhs: &Self) -> Classify {
        self.classify_combined(rhs, |a, b| a & b)
    }

    /// Set-difference classification requires walking blocks present only
    /// in `self` too (unlike intersection, where a block missing from
    /// either side contributes nothing).
    pub fn find_diff_singleton(&self, rhs: &Self) -> Classify {
        let mut i = 0usize;
        let mut j = 0usize;
        let mut witnesses: [Option<usize>; 2] = [None, None];
        let mut count = 0usize;
        while i < self.blocks.len() {
            let a = &self.blocks[i];
            while j < rhs.blocks.len() && rhs.blocks[j].idx < a.idx {
                j += 1;
            }
            let rhs_word = if j < rhs.blocks.len() && rhs.blocks[j].idx == a.idx {
                rhs.blocks[j].word
            } else {
                0
            };
            let mut rem = a.word & !rhs_word;
            while rem != 0 {
                let bit = block::lsb(rem).unwrap();
                let global = block::wmul(a.idx) + bit;
                if count < 2 {
                    witnesses[count] = Some(global);
                }
                count += 1;
                if count >= 3 {
                    return Classify::Many;
                }
                rem &= rem - 1;
            }
            i += 1;
        }
        match count {
            0 => Classify::Empty,
            1 => Classify::Singleton(witnesses[0].unwrap()),
            2 => Classify::Pair(witnesses[0].unwrap(), witnesses[1].unwrap()),
            _ => unreachable!(),
        }
    }

    pub fn find_diff_pair(&self, rhs: &Self) -> Classify {
        self.find_diff_singleton(rhs)
    }

    pub fn is_disjoint(&self, rhs: &Self) -> bool {
        let mut i = 0usize;
        let mut j = 0usize;
        while i < self.blocks.len() && j < rhs.blocks.len() {
            let a = &self.blocks[i];
            let b = &rhs.blocks[j];
            match a.idx.cmp(&b.idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    if a.word & b.word != 0 {
                        return false;
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        true
    }

    pub fn are_disjoint(lhs: &Self, rhs: &Self) -> bool {
        lhs.is_disjoint(rhs)
    }

    // ---- Mutation -------------------------------------------------

    #[inline(always)]
    pub fn set_bit(&mut self, b: usize) {
        debug_assert!(b < self.capacity());
        *self.word_mut(block::wdiv(b)) |= block::mask_bit(block::wmod(b));
    }

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
            *self.word_mut(b) |= m;
        }
    }

    #[inline(always)]
    pub fn erase_bit(&mut self, b: usize) {
        debug_assert!(b < self.capacity());
        if let Ok(pos) = self.find_block(block::wdiv(b)) {
            self.blocks[pos].word &= !block::mask_bit(block::wmod(b));
        }
    }

    pub fn erase_bit_range(&mut self, lo: usize, hi: Option<usize>) {
        let hi = hi.unwrap_or_else(|| self.capacity() - 1);
        debug_assert!(lo <= hi && hi < self.capacity());
        let lo_block = block::wdiv(lo);
        let hi_block = block::wdiv(hi);
        let start = self.lower_bound(lo_block);
        for b in &mut self.blocks[start..] {
            if b.idx > hi_block {
                break;
            }
            let mut m = u64::MAX;
            if b.idx == lo_block {
                m &= mask_1_high(block::wmod(lo));
            }
            if b.idx == hi_block {
                m &= mask_1_low(block::wmod(hi));
            }
            b.word &= !m;
        }
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn erase_set(&mut self, rhs: &Self) {
        let mut j = 0usize;
        for a in &mut self.blocks {
            while j < rhs.blocks.len() && rhs.blocks[j].idx < a.idx {
                j += 1;
            }
            if j < rhs.blocks.len() && rhs.blocks[j].idx == a.idx {
                a.word &= !rhs.blocks[j].word;
            }
        }
    }

    pub fn flip(&mut self) {
        for b in 0..self.n_bb {
            let cur = self.word_at(b);
            *self.word_mut(b) = !cur;
        }
    }
}

impl std::ops::BitAndAssign<&SparseBitSet> for SparseBitSet {
    fn bitand_assign(&mut self, rhs: &SparseBitSet) {
        let mut j = 0usize;
        self.blocks.retain_mut(|a| {
            while j < rhs.blocks.len() && rhs.blocks[j].idx < a.idx {
                j += 1;
            }
            if j < rhs.blocks.len() && rhs.blocks[j].idx == a.idx {
                a.word &= rhs.blocks[j].word;
                true
            } else {
                false
            }
        });
    }
}

impl std::ops::BitOrAssign<&SparseBitSet> for SparseBitSet {
    fn bitor_assign(&mut self, rhs: &SparseBitSet) {
        for b in &rhs.blocks {
            *self.word_mut(b.idx) |= b.word;
        }
    }
}

impl BitBlockView for SparseBitSet {
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
        self.word_at(block_idx)
    }
    fn next_nonzero_block(&self, from_block: usize) -> Option<usize> {
        let pos = self.lower_bound(from_block);
        self.blocks[pos..].iter().find(|b| b.word != 0).map(|b| b.idx)
    }
    fn prev_nonzero_block(&self, from_block: usize) -> Option<usize> {
        let pos = self.upper_bound(from_block)?;
        self.blocks[..=pos].iter().rev().find(|b| b.word != 0).map(|b| b.idx)
    }
}

impl BitSetFactory for SparseBitSet {
    fn with_population(pop_size: usize) -> Result<Self, BitSetError> {
        Self::new(pop_size)
    }
}

impl BitBlockMut for SparseBitSet {
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

/// Masked AND over the closed bit-range `[lo, hi]`, merge-based over both
/// operands' sorted blocks. Same `Erase` contract as
/// [`super::dense::and_range`]: outside the range, `res` is cleared if
/// `ERASE` else left untouched.
pub fn and_range<const ERASE: bool>(
    lo: usize,
    hi: usize,
    lhs: &SparseBitSet,
    rhs: &SparseBitSet,
    res: &mut SparseBitSet,
) {
    merge_range_op::<ERASE>(lo, hi, lhs, rhs, res, |a, b| a & b);
}

/// Masked OR over the closed bit-range `[lo, hi]`.
pub fn or_range<const ERASE: bool>(
    lo: usize,
    hi: usize,
    lhs: &SparseBitSet,
    rhs: &SparseBitSet,
    res: &mut SparseBitSet,
) {
    merge_range_op::<ERASE>(lo, hi, lhs, rhs, res, |a, b| a | b);
}

fn merge_range_op<const ERASE: bool>(
    lo: usize,
    hi: usize,
    lhs: &SparseBitSet,
    rhs: &SparseBitSet,
    res: &mut SparseBitSet,
    combine: impl Fn(u64, u64) -> u64,
) {
    debug_assert!(lo <= hi && hi < lhs.capacity());
    let lo_block = block::wdiv(lo);
    let hi_block = block::wdiv(hi);
    if ERASE {
        res.blocks.retain(|b| b.idx >= lo_block && b.idx <= hi_block);
    }
    let mut idx = lo_block;
    while idx <= hi_block {
        let combined = combine(lhs.word_at(idx), rhs.word_at(idx));
        let masked = if idx == lo_block && idx == hi_block {
            combined & mask_1(block::wmod(lo), block::wmod(hi))
        } else if idx == lo_block {
            combined & mask_1_high(block::wmod(lo))
        } else if idx == hi_block {
            combined & mask_1_low(block::wmod(hi))
        } else {
            combined
        };
        let preserved_outside = if ERASE {
            0
        } else if idx == lo_block && idx == hi_block {
            res.word_at(idx) & !mask_1(block::wmod(lo), block::wmod(hi))
        } else if idx == lo_block {
            res.word_at(idx) & !mask_1_high(block::wmod(lo))
        } else if idx == hi_block {
            res.word_at(idx) & !mask_1_low(block::wmod(hi))
        } else {
            0
        };
        let final_word = masked | preserved_outside;
        if final_word != 0 {
            *res.word_mut(idx) = final_word;
        } else if let Ok(pos) = res.find_block(idx) {
            res.blocks[pos].word = 0;
        }
        idx += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bs(pop: usize, bits: &[usize]) -> SparseBitSet {
        SparseBitSet::with_initial_bits(pop, bits.iter().copied()).unwrap()
    }

    #[test]
    fn basic_query() {
        let s = bs(1000, &[10, 20, 900]);
        assert_eq!(s.count(), 3);
        assert_eq!(s.lsb(), Some(10));
        assert_eq!(s.msb(), Some(900));
        assert_eq!(s.next_bit(Some(20)), Some(900));
        assert_eq!(s.prev_bit(Some(900)), Some(20));
        assert!(!s.is_bit(21));
    }

    #[test]
    fn erase_does_not_compact() {
        let mut s = bs(1000, &[10]);
        s.erase_bit(10);
        assert_eq!(s.blocks.len(), 1);
        assert!(s.is_empty());
        s.shrink_to_fit();
        assert_eq!(s.blocks.len(), 0);
    }

    #[test]
    fn classify_matches_dense_semantics() {
        let a = bs(1000, &[1, 500, 999]);
        let b = bs(1000, &[500, 999, 998]);
        assert_eq!(a.find_common_singleton(&b), Classify::Pair(500, 999));
        assert_eq!(a.find_diff_singleton(&b), Classify::Singleton(1));
    }

    #[test]
    fn masked_range_matches_dense() {
        let a = bs(256, &[5, 70, 140]);
        let b = bs(256, &[5, 70, 141]);
        let mut r = SparseBitSet::new(256).unwrap();
        and_range::<true>(64, 127, &a, &b, &mut r);
        assert_eq!(r.count(), 1);
        assert!(r.is_bit(70));
    }

    #[test]
    fn bitor_assign_merges() {
        let mut a = bs(256, &[1, 200]);
        let b = bs(256, &[2, 200]);
        a |= &b;
        assert_eq!(a.count(), 3);
    }
}
