/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The concrete scenarios (S1-S6) from the bit-set/graph core's
//! testable-properties section, run end to end against the public API.

use bitgraph::algorithms::{Algorithm, GraphFastRootSort};
use bitgraph::bitscan::{self, dense, scan, sparse, DenseBitSet, SparseBitSet};
use bitgraph::graph::Graph;

#[test]
fn s1_dense_basic_scan() {
    let s = DenseBitSet::with_initial_bits(130, [10, 20, 64]).unwrap();
    assert_eq!(s.count(), 3);
    assert_eq!(s.lsb(), Some(10));
    assert_eq!(s.msb(), Some(64));
    assert_eq!(s.next_bit(Some(10)), Some(20));
    assert_eq!(s.prev_bit(Some(64)), Some(20));
    assert_eq!(s.next_bit(Some(64)), None);
}

#[test]
fn s2_dense_range_set() {
    let mut s = DenseBitSet::new(130).unwrap();
    s.set_bit_range(63, 65);
    assert_eq!(s.count(), 3);
    assert!(s.is_bit(63) && s.is_bit(64) && s.is_bit(65));
    assert!(!s.is_bit(62));
    assert!(!s.is_bit(66));
}

#[test]
fn s3_masked_intersection() {
    let a = DenseBitSet::with_initial_bits(130, [10, 20, 64]).unwrap();
    let b = DenseBitSet::with_initial_bits(130, [10, 64, 100]).unwrap();

    let mut r = DenseBitSet::new(130).unwrap();
    dense::and_range::<true>(0, 129, &a, &b, &mut r);
    assert!(r.is_bit(10) && r.is_bit(64));
    assert_eq!(r.count(), 2);

    // block 2 only (bits [128,129], since block size is 64): no overlap there.
    let mut r2 = DenseBitSet::new(130).unwrap();
    dense::and_block_range::<true>(2, 2, &a, &b, &mut r2);
    assert!(r2.is_empty());

    // Erase=false, pre-seeded with bit 3, range spans blocks 1..=2 (bits 64..=129):
    // bit 3 (block 0) is preserved, and the overlap at 64 is added.
    let mut r3 = DenseBitSet::new(130).unwrap();
    r3.set_bit(3);
    dense::and_block_range::<false>(1, 2, &a, &b, &mut r3);
    assert!(r3.is_bit(3));
    assert!(r3.is_bit(64));
    assert_eq!(r3.count(), 2);
}

#[test]
fn s4_four_scan_modes() {
    let fwd = DenseBitSet::with_initial_bits(128, [0, 1, 64]).unwrap();
    let mut out = Vec::new();
    let mut cur = scan::Scan::new();
    cur.init_scan(None);
    while let Some(b) = cur.next_bit(&fwd) {
        out.push(b);
    }
    assert_eq!(out, vec![0, 1, 64]);

    let rev = DenseBitSet::with_initial_bits(128, [0, 1, 64]).unwrap();
    let mut out = Vec::new();
    let mut cur = scan::ScanRev::new();
    cur.init_scan(&rev, None);
    while let Some(b) = cur.next_bit(&rev) {
        out.push(b);
    }
    assert_eq!(out, vec![64, 1, 0]);

    let mut dest = DenseBitSet::with_initial_bits(128, [0, 1, 64]).unwrap();
    let mut out = Vec::new();
    let mut cur = scan::ScanDest::new();
    cur.init_scan(None);
    while let Some(b) = cur.next_bit(&mut dest, None::<&mut DenseBitSet>) {
        out.push(b);
    }
    assert_eq!(out, vec![0, 1, 64]);
    assert!(dest.is_empty());

    let mut dest_rev = DenseBitSet::with_initial_bits(128, [0, 1, 64]).unwrap();
    let mut out = Vec::new();
    let mut cur = scan::ScanDestRev::new();
    cur.init_scan(&dest_rev, None);
    while let Some(b) = cur.next_bit(&mut dest_rev, None::<&mut DenseBitSet>) {
        out.push(b);
    }
    assert_eq!(out, vec![64, 1, 0]);
    assert!(dest_rev.is_empty());
}

#[test]
fn s5_sparse_insertion_order_independent() {
    let mut s = SparseBitSet::new(10_001).unwrap();
    for b in [200, 5, 10_000, 3] {
        s.set_bit(b);
    }
    assert_eq!(s.count(), 4);
    let collected: Vec<usize> = bitscan::bits(&s).collect();
    assert_eq!(collected, vec![3, 5, 200, 10_000]);
}

#[test]
fn s6_five_cycle_degrees_and_peel() {
    let mut g = Graph::<DenseBitSet>::new(5, false).unwrap();
    for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)] {
        g.add_edge(u, v);
    }
    for v in 0..5 {
        assert_eq!(g.degree(v), 2);
    }

    let mut sort = GraphFastRootSort::new(&g);
    let non_degenerate = sort.new_order(Algorithm::Max, false, false).unwrap();
    let mut sorted_by_degree = non_degenerate.clone();
    sorted_by_degree.sort();
    assert_eq!(sorted_by_degree, vec![0, 1, 2, 3, 4]);

    let peeled = sort.new_order(Algorithm::MinDegen, false, false).unwrap();
    assert_eq!(peeled.len(), 5);
    let mut sorted_peel = peeled.clone();
    sorted_peel.sort();
    assert_eq!(sorted_peel, vec![0, 1, 2, 3, 4]);
}
