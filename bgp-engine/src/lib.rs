/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Join execution engine for SPARQL basic graph patterns.
//!
//! Bindings flow bottom-up: an [`access::AccessRows`] implementation returns
//! raw tuples for a pattern, [`eng_lib`] turns them into rows, the
//! algorithms in [`join`] combine row lists, and a [`plan::PhysicalPlan`]
//! threads a row list through an ordered list of steps.
//!
//! All evaluation is lazy and single-threaded: nothing happens until the
//! resulting [`RowList`] is pulled.

pub mod access;
pub mod config;
pub mod eng_lib;
pub mod join;
pub mod plan;

pub use access::{AccessRows, InMemoryStore, TupleIter};
pub use config::EngineConfig;
pub use join::{hash_join, merge_join, natural_order, nested_loop_join, star_join, substitution_join};
pub use plan::{PhysicalPlan, PlanStep, Step};

pub use shared::{
    merge_rows, EngineError, JoinKey, PredicateObjectList, Result, Row, RowBuilder, RowList, Slot,
    TermValue, Tuple, Var,
};

pub fn identity_row<X>() -> Row<X> {
    Row::identity()
}

pub fn identity_row_list<'a, X: 'a>() -> RowList<'a, X> {
    RowList::identity()
}

pub fn empty_row_list<'a, X: 'a>() -> RowList<'a, X> {
    RowList::empty()
}

pub fn create_row_list<'a, X: 'a, I>(vars: Vec<Var>, rows: I) -> RowList<'a, X>
where
    I: Iterator<Item = Result<Row<X>>> + 'a,
{
    RowList::new(vars, rows)
}

pub fn create_row_builder<X: TermValue>() -> RowBuilder<X> {
    RowBuilder::new()
}
