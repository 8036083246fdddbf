/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Adjacency graph: one bit-set per vertex, generic over the underlying
//! dense or sparse representation (spec.md §4.6).
//!
//! `adj[v]` is a bit-set of capacity `|V|`; `adj[u].is_bit(v)` holds
//! exactly when there is an edge `(u, v)`. Undirected mutation keeps
//! `adj[u].is_bit(v) == adj[v].is_bit(u)` as an invariant; directed
//! graphs drop that and expose [`Graph::make_bidirected`] to establish it
//! after the fact.

use crate::bitscan::block::popc;
use crate::bitscan::scan::bits;
use crate::bitscan::{BitBlockMut, BitBlockView, BitSetError, BitSetFactory};

/// An adjacency-bit-set graph over `BB`, the per-vertex neighbor
/// representation (typically [`crate::bitscan::DenseBitSet`] or
/// [`crate::bitscan::SparseBitSet`]).
#[derive(Clone, Debug)]
pub struct Graph<BB> {
    adj: Vec<BB>,
    directed: bool,
}

impl<BB: BitBlockMut + BitSetFactory + Clone> Graph<BB> {
    /// Creates an edgeless graph on `n` vertices.
    pub fn new(n: usize, directed: bool) -> Result<Self, BitSetError> {
        let mut adj = Vec::new();
        adj.try_reserve_exact(n).map_err(|_| BitSetError::Alloc { requested: n })?;
        for _ in 0..n {
            adj.push(BB::with_population(n)?);
        }
        Ok(Self { adj, directed })
    }

    #[inline(always)]
    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    #[inline(always)]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> &BB {
        &self.adj[v]
    }

    #[inline(always)]
    pub fn is_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u].is_bit(v)
    }

    /// Degree of `v`: the population of `adj[v]`.
    #[inline(always)]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].count()
    }

    /// Degree of `v` restricted to the neighborhood's intersection with
    /// `mask` — counts without materializing the intersection.
    pub fn degree_masked(&self, v: usize, mask: &BB) -> usize {
        let mut count = 0usize;
        for b in 0..self.adj[v].num_blocks() {
            count += popc(self.adj[v].block_or_zero(b) & mask.block_or_zero(b));
        }
        count
    }

    /// Adds an edge `(u, v)`. Undirected graphs also set `(v, u)`; a
    /// self-loop (`u == v`) is set as-is, with no implicit stripping.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.adj[u].set_bit(v);
        if !self.directed {
            self.adj[v].set_bit(u);
        }
    }

    /// Removes an edge `(u, v)`. Undirected graphs also clear `(v, u)`.
    pub fn remove_edge(&mut self, u: usize, v: usize) {
        self.adj[u].clear_bit(v);
        if !self.directed {
            self.adj[v].clear_bit(u);
        }
    }

    /// For every directed edge `(u, v)`, also adds `(v, u)`. Meaningful
    /// only on directed graphs; does not flip `directed` itself.
    pub fn make_bidirected(&mut self) {
        let n = self.num_vertices();
        let edges: Vec<(usize, usize)> = (0..n)
            .flat_map(|u| bits(&self.adj[u]).map(move |v| (u, v)).collect::<Vec<_>>())
            .collect();
        for (u, v) in edges {
            self.adj[v].set_bit(u);
        }
    }

    /// Builds the induced subgraph on `verts`: vertex `i` of the result
    /// corresponds to `verts[i]` here, and edges are copied accordingly.
    pub fn create_subgraph(&self, verts: &[usize]) -> Result<Self, BitSetError> {
        let k = verts.len();
        let mut out = Self::new(k, self.directed)?;
        for (i, &u) in verts.iter().enumerate() {
            for (j, &v) in verts.iter().enumerate() {
                if i != j && self.is_edge(u, v) {
                    out.adj[i].set_bit(j);
                }
            }
        }
        Ok(out)
    }

    /// Reduces `|V|` to the first `k` vertices, dropping every edge
    /// incident to a removed vertex.
    pub fn shrink_to_fit(&mut self, k: usize) -> Result<(), BitSetError> {
        debug_assert!(k <= self.num_vertices());
        self.adj.truncate(k);
        for bb in &mut self.adj {
            let mut shrunk = BB::with_population(k)?;
            for v in bits(bb).filter(|&v| v < k) {
                shrunk.set_bit(v);
            }
            *bb = shrunk;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitscan::DenseBitSet;

    #[test]
    fn undirected_add_remove_is_symmetric() {
        let mut g = Graph::<DenseBitSet>::new(5, false).unwrap();
        g.add_edge(0, 1);
        assert!(g.is_edge(0, 1));
        assert!(g.is_edge(1, 0));
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(1), 1);
        g.remove_edge(0, 1);
        assert!(!g.is_edge(0, 1) && !g.is_edge(1, 0));
    }

    #[test]
    fn self_loop_is_not_stripped() {
        let mut g = Graph::<DenseBitSet>::new(3, false).unwrap();
        g.add_edge(1, 1);
        assert!(g.is_edge(1, 1));
    }

    #[test]
    fn directed_make_bidirected() {
        let mut g = Graph::<DenseBitSet>::new(4, true).unwrap();
        g.add_edge(0, 1);
        g.add_edge(2, 3);
        assert!(!g.is_edge(1, 0));
        g.make_bidirected();
        assert!(g.is_edge(1, 0));
        assert!(g.is_edge(3, 2));
    }

    #[test]
    fn induced_subgraph_preserves_edges() {
        let mut g = Graph::<DenseBitSet>::new(5, false).unwrap();
        g.add_edge(0, 2);
        g.add_edge(2, 4);
        g.add_edge(1, 3);
        let sub = g.create_subgraph(&[0, 2, 4]).unwrap();
        assert!(sub.is_edge(0, 1));
        assert!(sub.is_edge(1, 2));
        assert!(!sub.is_edge(0, 2));
    }

    #[test]
    fn shrink_to_fit_drops_incident_edges() {
        let mut g = Graph::<DenseBitSet>::new(5, false).unwrap();
        g.add_edge(0, 4);
        g.add_edge(1, 2);
        g.shrink_to_fit(3).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert!(g.is_edge(1, 2));
    }
}
