/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::var::Var;
use std::error::Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures surfaced while evaluating a pattern.
///
/// A self-join mismatch or a pair of incompatible rows is *not* an error: the
/// offending tuple or pair simply produces no row.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Tuples are triples or quads, nothing else.
    #[error("tuple arity must be 3 or 4, found {found}")]
    Arity { found: usize },

    #[error("raw tuple of arity {tuple} does not fit a pattern of arity {pattern}")]
    ArityMismatch { pattern: usize, tuple: usize },

    #[error("row does not bind join key variable {0}")]
    UnboundKeyVariable(Var),

    /// Raised by the storage accessor; passed through untouched.
    #[error("storage access failed: {0}")]
    Access(#[source] Box<dyn Error + Send + Sync>),
}

impl EngineError {
    pub fn access<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        EngineError::Access(err.into())
    }
}
