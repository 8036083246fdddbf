/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! DIMACS edge-format ingest/emit (spec.md §6), grounded in
//! `examples/original_source/src/graph/formats/dimacs_format.h`.
//!
//! Header line `p edge <n> <m>`, comment lines starting with `c` and
//! blank lines are skipped before the header is found. Edge lines
//! `e u v` are 1-based; `read_dimacs` converts them to 0-based before
//! calling [`Graph::add_edge`].

use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use super::error::GraphIoError;
use crate::bitscan::{BitBlockMut, BitBlockView, BitSetFactory};
use crate::graph::Graph;

fn io_err(path: &Path, source: std::io::Error) -> GraphIoError {
    GraphIoError::Io { path: path.to_path_buf(), source }
}

fn parse_err(path: &Path, line: usize, message: impl Into<String>) -> GraphIoError {
    GraphIoError::Parse { path: path.to_path_buf(), line, message: message.into() }
}

/// Reads an undirected graph from a DIMACS edge-format file.
pub fn read_dimacs<BB: BitBlockMut + BitSetFactory>(path: &Path) -> Result<Graph<BB>, GraphIoError> {
    let file = std::fs::File::open(path).map_err(|e| io_err(path, e))?;
    let reader = BufReader::new(file);

    let mut n = 0usize;
    let mut m = 0usize;
    let mut header_found = false;
    let mut graph: Option<Graph<BB>> = None;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| io_err(path, e))?;
        let lineno = lineno + 1;
        let trimmed = line.trim();

        if !header_found {
            if trimmed.is_empty() || trimmed.starts_with('c') {
                continue;
            }
            if !trimmed.starts_with('p') {
                return Err(parse_err(path, lineno, format!("expected DIMACS header, found: {trimmed}")));
            }
            let mut fields = trimmed.split_whitespace();
            let _p = fields.next();
            let kind = fields.next().ok_or_else(|| parse_err(path, lineno, "missing header kind"))?;
            if kind != "edge" {
                return Err(parse_err(path, lineno, format!("expected 'p edge <n> <m>', found kind '{kind}'")));
            }
            n = fields
                .next()
                .ok_or_else(|| parse_err(path, lineno, "missing vertex count"))?
                .parse()
                .map_err(|_| parse_err(path, lineno, "non-numeric vertex count"))?;
            m = fields
                .next()
                .ok_or_else(|| parse_err(path, lineno, "missing edge count"))?
                .parse()
                .map_err(|_| parse_err(path, lineno, "non-numeric edge count"))?;
            graph = Some(Graph::new(n, false).map_err(|_| parse_err(path, lineno, "failed to allocate graph"))?);
            header_found = true;
            continue;
        }

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if !trimmed.starts_with('e') {
            return Err(parse_err(path, lineno, format!("expected edge line 'e u v', found: {trimmed}")));
        }
        let mut fields = trimmed.split_whitespace();
        let _e = fields.next();
        let u: usize = fields
            .next()
            .ok_or_else(|| parse_err(path, lineno, "missing edge endpoint"))?
            .parse()
            .map_err(|_| parse_err(path, lineno, "non-numeric edge endpoint"))?;
        let v: usize = fields
            .next()
            .ok_or_else(|| parse_err(path, lineno, "missing edge endpoint"))?
            .parse()
            .map_err(|_| parse_err(path, lineno, "non-numeric edge endpoint"))?;
        if u == 0 || v == 0 || u > n || v > n {
            return Err(parse_err(path, lineno, format!("edge endpoint out of range 1..={n}")));
        }
        graph.as_mut().expect("header parsed before any edge line").add_edge(u - 1, v - 1);
    }

    if !header_found {
        return Err(parse_err(path, 0, "DIMACS header 'p edge <n> <m>' not found"));
    }
    let graph = graph.expect("header_found implies graph was allocated");
    log::debug!("read_dimacs: {path:?}: n={n} declared_m={m}");
    Ok(graph)
}

/// Writes `g` as a DIMACS edge-format file: `p edge n m` followed by one
/// `e u v` per undirected edge with `u < v`, both 1-based.
pub fn graph_to_dimacs<BB: BitBlockView>(g: &Graph<BB>, path: &Path) -> Result<(), GraphIoError> {
    let n = g.num_vertices();
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if g.is_edge(u, v) {
                edges.push((u, v));
            }
        }
    }

    let mut file = std::fs::File::create(path).map_err(|e| io_err(path, e))?;
    writeln!(file, "p edge {} {}", n, edges.len()).map_err(|e| io_err(path, e))?;
    for (u, v) in edges {
        writeln!(file, "e {} {}", u + 1, v + 1).map_err(|e| io_err(path, e))?;
    }
    Ok(())
}
