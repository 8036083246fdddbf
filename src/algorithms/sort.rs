/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! `GraphFastRootSort`: vertex-ordering engine over an adjacency graph
//! (spec.md §4.7).
//!
//! Every primitive produces a NEW→OLD permutation (`order[i]` is the
//! vertex that ends up at position `i`). [`GraphFastRootSort::new_order`]
//! optionally reverses it (`last_to_first`) and inverts it to OLD→NEW
//! (`old_to_new`) as a uniform post-processing step, regardless of which
//! algorithm produced it.

use super::decode::Decode;
use super::permutation::invert;
use crate::bitscan::scan::bits;
use crate::bitscan::{BitBlockMut, BitBlockView, BitSetError, BitSetFactory};
use crate::graph::Graph;

/// Selects which vertex-ordering primitive [`GraphFastRootSort::new_order`]
/// runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Identity permutation.
    None,
    /// Non-increasing by degree.
    Max,
    /// Non-decreasing by degree.
    Min,
    /// Non-increasing by degree, ties broken by support.
    MaxWithSupport,
    /// Non-decreasing by degree, ties broken by support.
    MinWithSupport,
    /// Degenerate peel, minimum active degree first.
    MinDegen,
    /// Degenerate peel, maximum active degree first.
    MaxDegen,
    /// Degenerate peel ties broken by a prior degree+support order,
    /// minimum active degree first.
    MinDegenCompo,
    /// As [`Algorithm::MinDegenCompo`], maximum active degree first.
    MaxDegenCompo,
}

/// Computes vertex orderings for an adjacency graph, caching the degree
/// and support vectors between calls.
pub struct GraphFastRootSort<'g, BB> {
    graph: &'g Graph<BB>,
    n: usize,
    deg: Vec<usize>,
    sup: Vec<usize>,
}

impl<'g, BB: BitBlockView> GraphFastRootSort<'g, BB> {
    pub fn new(graph: &'g Graph<BB>) -> Self {
        let n = graph.num_vertices();
        Self { graph, n, deg: vec![0; n], sup: vec![0; n] }
    }

    pub fn num_vertices(&self) -> usize {
        self.n
    }

    /// The last computed degree vector (`deg[v]` = `graph.degree(v)`).
    pub fn degrees(&self) -> &[usize] {
        &self.deg
    }

    /// The last computed support vector (`sup[v]` = Σ over neighbors `w`
    /// of `deg[w]`), computed once from the current `deg`.
    pub fn support(&self) -> &[usize] {
        &self.sup
    }

    fn compute_deg(&mut self) {
        for v in 0..self.n {
            self.deg[v] = self.graph.degree(v);
        }
    }

    fn compute_support(&mut self) {
        for v in 0..self.n {
            self.sup[v] = bits(self.graph.neighbors(v)).map(|w| self.deg[w]).sum();
        }
    }

    /// Non-degenerate sort: NEW→OLD order of `0..n` by `deg`
    /// (non-decreasing if `minimize`, else non-increasing), optionally
    /// tie-broken by `sup` the same way. Stable: ties otherwise keep
    /// their original vertex-id order.
    fn non_degenerate_sort(&self, minimize: bool, tie_break_support: bool) -> Vec<usize> {
        let mut nodes: Vec<usize> = (0..self.n).collect();
        nodes.sort_by(|&a, &b| {
            let primary = if minimize {
                self.deg[a].cmp(&self.deg[b])
            } else {
                self.deg[b].cmp(&self.deg[a])
            };
            if tie_break_support {
                primary.then_with(|| {
                    if minimize {
                        self.sup[a].cmp(&self.sup[b])
                    } else {
                        self.sup[b].cmp(&self.sup[a])
                    }
                })
            } else {
                primary
            }
        });
        nodes
    }
}

impl<'g, BB: BitBlockMut + BitSetFactory> GraphFastRootSort<'g, BB> {
    /// Degenerate peel: repeatedly extracts the active vertex of minimum
    /// (`minimize`) or maximum active degree, scanned in `scan_order`
    /// (so the first vertex in `scan_order` wins ties), decrementing the
    /// degree of its still-active neighbors after each extraction.
    fn degenerate_peel(&self, minimize: bool, scan_order: &[usize]) -> Result<Vec<usize>, BitSetError> {
        let mut deg = self.deg.clone();
        let mut active = BB::with_population(self.n)?;
        for v in 0..self.n {
            active.set_bit(v);
        }
        let mut nodes = Vec::with_capacity(self.n);
        loop {
            let mut best: Option<usize> = None;
            let mut best_deg = 0usize;
            for &j in scan_order {
                if !active.is_bit(j) {
                    continue;
                }
                let better = match best {
                    None => true,
                    Some(_) => {
                        if minimize {
                            deg[j] < best_deg
                        } else {
                            deg[j] > best_deg
                        }
                    }
                };
                if better {
                    best_deg = deg[j];
                    best = Some(j);
                }
            }
            let v = best.expect("active set non-empty while nodes incomplete");
            nodes.push(v);
            if nodes.len() == self.n {
                break;
            }
            active.clear_bit(v);
            for w in bits(self.graph.neighbors(v)) {
                if active.is_bit(w) {
                    deg[w] -= 1;
                }
            }
        }
        Ok(nodes)
    }

    /// Computes a new vertex ordering.
    ///
    /// The raw primitive output is NEW→OLD; `last_to_first` reverses it
    /// (applied uniformly, after the primitive, regardless of algorithm);
    /// `old_to_new` then inverts it in place.
    pub fn new_order(
        &mut self,
        alg: Algorithm,
        last_to_first: bool,
        old_to_new: bool,
    ) -> Result<Vec<usize>, BitSetError> {
        self.compute_deg();
        let mut order = match alg {
            Algorithm::None => (0..self.n).collect(),
            Algorithm::Max => self.non_degenerate_sort(false, false),
            Algorithm::Min => self.non_degenerate_sort(true, false),
            Algorithm::MaxWithSupport => {
                self.compute_support();
                self.non_degenerate_sort(false, true)
            }
            Algorithm::MinWithSupport => {
                self.compute_support();
                self.non_degenerate_sort(true, true)
            }
            Algorithm::MinDegen => {
                let scan: Vec<usize> = (0..self.n).collect();
                self.degenerate_peel(true, &scan)?
            }
            Algorithm::MaxDegen => {
                let scan: Vec<usize> = (0..self.n).collect();
                self.degenerate_peel(false, &scan)?
            }
            Algorithm::MinDegenCompo => {
                self.compute_support();
                let scan = self.non_degenerate_sort(true, true);
                self.degenerate_peel(true, &scan)?
            }
            Algorithm::MaxDegenCompo => {
                self.compute_support();
                let scan = self.non_degenerate_sort(false, true);
                self.degenerate_peel(false, &scan)?
            }
        };
        if last_to_first {
            order.reverse();
        }
        if old_to_new {
            order = invert(&order);
        }
        Ok(order)
    }

    /// Orders only the vertices in `subset` (an induced subgraph
    /// ordering): vertices outside `subset` keep their identity.
    pub fn new_order_subgraph(
        &mut self,
        alg: Algorithm,
        subset: &BB,
        last_to_first: bool,
        old_to_new: bool,
    ) -> Result<Vec<usize>, BitSetError>
    where
        BB: Clone,
    {
        let members: Vec<usize> = bits(subset).collect();
        debug_assert!(!members.is_empty(), "empty subgraph ordering requested");

        let sg = self.graph.create_subgraph(&members)?;
        let mut sub_sort = GraphFastRootSort::new(&sg);
        let sg_order = sub_sort.new_order(alg, last_to_first, false)?;

        let mut result: Vec<usize> = (0..self.n).collect();
        for (i, &v) in members.iter().enumerate() {
            let new_index_in_sg = sg_order[i];
            result[v] = members[new_index_in_sg];
        }

        if old_to_new {
            result = invert(&result);
        }
        Ok(result)
    }

    /// Produces a new graph with `order[u] -> order[v]` for every edge
    /// `(u, v)` of the original. `order` is OLD→NEW. If `decode` is
    /// given, records the inverse (NEW→OLD) for later decoding.
    pub fn reorder(&self, order: &[usize], decode: Option<&mut Decode>) -> Result<Graph<BB>, BitSetError>
    where
        BB: Clone,
    {
        let mut out = Graph::new(self.n, self.graph.is_directed())?;
        if self.graph.is_directed() {
            for u in 0..self.n {
                for v in 0..self.n {
                    if u != v && self.graph.is_edge(u, v) {
                        out.add_edge(order[u], order[v]);
                    }
                }
            }
        } else {
            for u in 0..self.n {
                for v in (u + 1)..self.n {
                    if self.graph.is_edge(u, v) {
                        out.add_edge(order[u], order[v]);
                    }
                }
            }
        }
        if let Some(d) = decode {
            d.add_ordering(invert(order));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitscan::DenseBitSet;

    fn path_graph(n: usize) -> Graph<DenseBitSet> {
        let mut g = Graph::new(n, false).unwrap();
        for v in 0..n - 1 {
            g.add_edge(v, v + 1);
        }
        g
    }

    #[test]
    fn none_is_identity() {
        let g = path_graph(5);
        let mut sort = GraphFastRootSort::new(&g);
        let order = sort.new_order(Algorithm::None, false, true).unwrap();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn max_orders_endpoints_last_by_degree() {
        // star graph: center has degree 4, leaves have degree 1
        let mut g = Graph::<DenseBitSet>::new(5, false).unwrap();
        for v in 1..5 {
            g.add_edge(0, v);
        }
        let mut sort = GraphFastRootSort::new(&g);
        let order = sort.new_order(Algorithm::Max, false, false).unwrap();
        assert_eq!(order[0], 0);
        assert_eq!(sort.degrees()[0], 4);
    }

    #[test]
    fn degenerate_peel_removes_minimum_degree_first() {
        let g = path_graph(4); // 0-1-2-3, degrees 1,2,2,1
        let mut sort = GraphFastRootSort::new(&g);
        let order = sort.new_order(Algorithm::MinDegen, false, false).unwrap();
        // first extracted vertex must have had degree 1 (an endpoint)
        assert!(order[0] == 0 || order[0] == 3);
    }

    #[test]
    fn last_to_first_reverses_uniformly() {
        let g = path_graph(4);
        let mut sort = GraphFastRootSort::new(&g);
        let fwd = sort.new_order(Algorithm::Max, false, false).unwrap();
        let rev = sort.new_order(Algorithm::Max, true, false).unwrap();
        let mut expected = fwd.clone();
        expected.reverse();
        assert_eq!(rev, expected);
    }

    #[test]
    fn old_to_new_inverts() {
        let g = path_graph(4);
        let mut sort = GraphFastRootSort::new(&g);
        let n2o = sort.new_order(Algorithm::Max, false, false).unwrap();
        let o2n = sort.new_order(Algorithm::Max, false, true).unwrap();
        for i in 0..n2o.len() {
            assert_eq!(o2n[n2o[i]], i);
        }
    }

    #[test]
    fn subgraph_ordering_leaves_outside_vertices_identity() {
        let g = path_graph(6);
        let mut sort = GraphFastRootSort::new(&g);
        let mut subset = DenseBitSet::new(6).unwrap();
        subset.set_bit(1);
        subset.set_bit(2);
        subset.set_bit(3);
        let order = sort.new_order_subgraph(Algorithm::Max, &subset, false, false).unwrap();
        assert_eq!(order[0], 0);
        assert_eq!(order[4], 4);
        assert_eq!(order[5], 5);
    }

    #[test]
    fn reorder_preserves_edge_set_under_permutation() {
        let g = path_graph(4);
        let mut sort = GraphFastRootSort::new(&g);
        let o2n = sort.new_order(Algorithm::Max, false, true).unwrap();
        let mut decode = Decode::new();
        let reordered = sort.reorder(&o2n, Some(&mut decode)).unwrap();
        assert_eq!(reordered.num_vertices(), 4);
        for u in 0..4 {
            for v in 0..4 {
                if u != v {
                    assert_eq!(g.is_edge(u, v), reordered.is_edge(o2n[u], o2n[v]));
                }
            }
        }
        assert_eq!(decode.decode(o2n[2]), 2);
    }
}
