/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! yEd-flavored GML emit (spec.md §6), grounded in
//! `examples/original_source/graph/formats/yED_format.h`.
//!
//! Writes a `graph [ hierarchic 1 directed 1 ... ]` envelope, one `node`
//! per vertex (round-rectangle, fixed-palette fill) and one `edge` per
//! undirected edge, all sourced from a fixed 23-entry RGB palette.

use std::io::Write;
use std::path::Path;

use super::error::GraphIoError;
use crate::bitscan::BitBlockView;
use crate::graph::Graph;

/// Colors of the fixed yEd palette, in the original's index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GmlColor {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    Purple,
    Brown,
    Coral,
    Salmon,
    Orange,
    Gold,
    Lime,
    DarkCyan,
    Turquoise,
    DarkBlue,
    BlueViolet,
    Pink,
    Wheat,
    Sienna,
    Default,
    Black,
    White,
}

const TABLE_RGB: [&str; 23] = [
    "#FF0000", "#FFFF00", "#008000", "#00FFFF", "#0000FF", "#FF00FF", "#800080", "#800000", "#FF7F50", "#FA8072",
    "#FFA500", "#FFD700", "#FFFF00", "#008B8B", "#40E0D0", "#00008B", "#8A2BE2", "#FFC0CB", "#F5DEB3", "#A0522D",
    "#FFCC00", "#000000", "#FFFFFF",
];

impl GmlColor {
    fn hex(self) -> &'static str {
        TABLE_RGB[self as usize]
    }
}

fn io_err(path: &Path, source: std::io::Error) -> GraphIoError {
    GraphIoError::Io { path: path.to_path_buf(), source }
}

/// Writes `g` as yEd-flavored GML to `path`, coloring every vertex with
/// `GmlColor::Default` and every edge black.
pub fn graph_to_gml<BB: BitBlockView>(g: &Graph<BB>, path: &Path, scale: f64) -> Result<(), GraphIoError> {
    let n = g.num_vertices();
    if n == 0 {
        log::warn!("graph_to_gml: empty graph, no output written to {path:?}");
        return Ok(());
    }

    let mut f = std::fs::File::create(path).map_err(|e| io_err(path, e))?;
    write_header(&mut f).map_err(|e| io_err(path, e))?;
    for i in 0..n {
        write_vertex(&mut f, i, 0.0, 0.0, scale, GmlColor::Default).map_err(|e| io_err(path, e))?;
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if g.is_edge(i, j) {
                write_edge(&mut f, i, j, GmlColor::Black).map_err(|e| io_err(path, e))?;
            }
        }
    }
    write_footer(&mut f).map_err(|e| io_err(path, e))?;
    Ok(())
}

fn write_header(w: &mut impl Write) -> std::io::Result<()> {
    writeln!(w, "graph [ hierarchic 1 directed 1")
}

fn write_footer(w: &mut impl Write) -> std::io::Result<()> {
    writeln!(w, "]")
}

fn write_vertex(w: &mut impl Write, i: usize, x: f64, y: f64, scale: f64, color: GmlColor) -> std::io::Result<()> {
    writeln!(
        w,
        "node [ id {i} graphics [ x {} y {} w 11.0 h 11.0 type \"roundrectangle\" fill \"{}\" ] LabelGraphics [ text {} fontSize 7 ] ]",
        x * scale,
        y * scale,
        color.hex(),
        i + 1,
    )
}

fn write_edge(w: &mut impl Write, i: usize, j: usize, color: GmlColor) -> std::io::Result<()> {
    writeln!(w, "edge [ source {i} target {j} graphics [ fill \"{}\" ] ]", color.hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitscan::DenseBitSet;

    #[test]
    fn palette_has_23_entries() {
        assert_eq!(TABLE_RGB.len(), 23);
        assert_eq!(GmlColor::White.hex(), "#FFFFFF");
    }

    #[test]
    fn writes_header_node_and_edge_lines() {
        let mut g = Graph::<DenseBitSet>::new(2, false).unwrap();
        g.add_edge(0, 1);
        let mut path = std::env::temp_dir();
        path.push(format!("bitgraph_gml_test_{}", std::process::id()));
        graph_to_gml(&g, &path, 7.5).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(contents.starts_with("graph [ hierarchic 1 directed 1"));
        assert!(contents.contains("node [ id 0"));
        assert!(contents.contains("edge [ source 0 target 1"));
    }

    #[test]
    fn empty_graph_writes_nothing() {
        let g = Graph::<DenseBitSet>::new(0, false).unwrap();
        let mut path = std::env::temp_dir();
        path.push(format!("bitgraph_gml_empty_test_{}", std::process::id()));
        graph_to_gml(&g, &path, 7.5).unwrap();
        assert!(!path.exists());
    }
}
