/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::sync::atomic::{AtomicBool, Ordering};

/// When set, every `RowList` is collected into memory as soon as it is
/// created instead of being streamed. Results are unaffected.
pub static EAGER_MATERIALIZATION: AtomicBool = AtomicBool::new(false);

pub fn set_eager_materialization(enabled: bool) {
    EAGER_MATERIALIZATION.store(enabled, Ordering::SeqCst);
}

pub fn eager_materialization() -> bool {
    EAGER_MATERIALIZATION.load(Ordering::SeqCst)
}

pub mod error;
pub mod join_key;
pub mod predicate_object;
pub mod row;
pub mod row_list;
pub mod slot;
pub mod tuple;
pub mod var;

pub use error::{EngineError, Result};
pub use join_key::JoinKey;
pub use predicate_object::PredicateObjectList;
pub use row::{merge_rows, Row, RowBuilder};
pub use row_list::{RowIter, RowList};
pub use slot::Slot;
pub use tuple::Tuple;
pub use var::Var;

use std::fmt::Debug;
use std::hash::Hash;

/// Anything that can be bound to a variable: dictionary ids, strings, nodes.
pub trait TermValue: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> TermValue for T {}
