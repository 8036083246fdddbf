/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Crate-wide re-export of the error types each layer defines locally:
//! [`crate::bitscan::BitSetError`] for allocation failures and
//! [`crate::io::GraphIoError`] for the DIMACS/GML collaborators.

pub use crate::bitscan::BitSetError;
pub use crate::io::GraphIoError;
