/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Errors raised by the DIMACS/GML collaborators (spec.md §6).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphIoError {
    #[error("{path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {message}")]
    Parse { path: std::path::PathBuf, line: usize, message: String },
}
