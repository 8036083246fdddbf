/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Adjacency graphs built on the bit-sets in [`crate::bitscan`].

pub mod adjacency;

pub use adjacency::Graph;
