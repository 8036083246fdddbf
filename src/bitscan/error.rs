/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Recoverable construction errors for bit-sets.
//!
//! The source library treats allocation failure at construction time as
//! fatal (log, then abort). This reimplementation surfaces it instead as
//! a [`BitSetError`] the caller can handle, per spec.md §7. [`reset_or_abort`]
//! is kept as a convenience wrapper for callers that prefer the original's
//! abort-on-failure behavior.

use thiserror::Error;

/// Errors that can occur while constructing or resizing a bit-set.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitSetError {
    /// The requested population size would require more memory than the
    /// allocator is willing (or able) to provide.
    #[error("failed to allocate storage for a bit-set of population size {requested}")]
    Alloc {
        /// The population size that was requested.
        requested: usize,
    },
}

/// Unwraps a fallible bit-set construction, aborting the process on
/// failure. This mirrors the original library's log-then-abort policy for
/// callers who have no recovery path of their own.
#[track_caller]
pub fn reset_or_abort<T>(result: Result<T, BitSetError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            log::error!("fatal: {e}");
            std::process::abort();
        }
    }
}
