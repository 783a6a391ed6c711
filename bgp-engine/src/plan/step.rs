/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::access::AccessRows;
use crate::eng_lib::{convert_raw_tuples_to_rows, star_vars, vars};
use crate::join::{hash_join, nested_loop_join, star_join, substitution_join};
use crate::plan::PhysicalPlan;
use log::{debug, trace};
use shared::join_key::union_vars;
use shared::{JoinKey, PredicateObjectList, RowBuilder, RowList, Slot, TermValue, Tuple, Var};
use std::fmt;
use std::sync::Arc;

pub type Accessor<X> = Arc<dyn AccessRows<X>>;

/// One stage of a plan: consumes the row list produced so far and returns
/// the next one.
pub trait Step<X> {
    fn execute<'a>(&'a self, input: RowList<'a, X>) -> RowList<'a, X>
    where
        X: 'a;

    /// True if the step is known to produce no rows whatever its input.
    fn executes_to_nothing(&self) -> bool {
        false
    }

    /// Schema of the list `execute` returns for an input with schema
    /// `input`, worked out without executing anything.
    fn output_vars(&self, input: &[Var]) -> Vec<Var> {
        input.to_vec()
    }
}

/// The built-in steps.
pub enum PlanStep<X> {
    /// Ignores its input and yields the identity row once.
    Identity,
    /// Yields nothing, keeping the input schema; a plan containing it can be
    /// skipped entirely.
    Nothing,
    /// Scans `pattern` and hash-joins the result with the input, which is
    /// the build side.
    HashJoin { pattern: Tuple<Slot<X>>, accessor: Accessor<X> },
    /// Scans `pattern` and nested-loop-joins the input with the result.
    InnerLoopJoin { pattern: Tuple<Slot<X>>, accessor: Accessor<X> },
    /// Probes storage once per input row with `pattern` specialized by it.
    SubstitutionJoin { pattern: Tuple<Slot<X>>, accessor: Accessor<X> },
    StarJoin { pol: PredicateObjectList<X>, accessor: Accessor<X> },
    /// Passes rows through unchanged, logging each at `trace` level.
    Trace { label: String },
    Plan(PhysicalPlan<X>),
    Custom(Box<dyn Step<X>>),
}

impl<X: TermValue> PlanStep<X> {
    /// Creates a new hash join step
    pub fn hash_join(pattern: Tuple<Slot<X>>, accessor: Accessor<X>) -> Self {
        PlanStep::HashJoin { pattern, accessor }
    }

    /// Creates a new nested loop join step
    pub fn inner_loop_join(pattern: Tuple<Slot<X>>, accessor: Accessor<X>) -> Self {
        PlanStep::InnerLoopJoin { pattern, accessor }
    }

    /// Creates a new substitution (index) join step
    pub fn substitution_join(pattern: Tuple<Slot<X>>, accessor: Accessor<X>) -> Self {
        PlanStep::SubstitutionJoin { pattern, accessor }
    }

    /// Creates a new star join step
    pub fn star_join(pol: PredicateObjectList<X>, accessor: Accessor<X>) -> Self {
        PlanStep::StarJoin { pol, accessor }
    }

    pub fn trace(label: impl Into<String>) -> Self {
        PlanStep::Trace { label: label.into() }
    }

    pub fn custom(step: impl Step<X> + 'static) -> Self {
        PlanStep::Custom(Box::new(step))
    }

    pub fn is_trace(&self) -> bool {
        matches!(self, PlanStep::Trace { .. })
    }

    /// Rows produced by scanning `pattern` with no outside bindings.
    fn scan<'a>(pattern: &'a Tuple<Slot<X>>, accessor: &'a Accessor<X>) -> RowList<'a, X> {
        convert_raw_tuples_to_rows(accessor.access_rows(pattern), pattern.clone(), RowBuilder::new())
    }
}

impl<X: TermValue> Step<X> for PlanStep<X> {
    fn execute<'a>(&'a self, input: RowList<'a, X>) -> RowList<'a, X>
    where
        X: 'a,
    {
        match self {
            PlanStep::Identity => RowList::identity(),
            PlanStep::Nothing => RowList::empty_with(input.vars().to_vec()),
            PlanStep::HashJoin { pattern, accessor } => {
                let right = Self::scan(pattern, accessor);
                let key = JoinKey::new(input.vars(), right.vars());
                hash_join(key, input, right, RowBuilder::new())
            }
            PlanStep::InnerLoopJoin { pattern, accessor } => {
                let right = Self::scan(pattern, accessor);
                nested_loop_join(input, right, RowBuilder::new())
            }
            PlanStep::SubstitutionJoin { pattern, accessor } => {
                substitution_join(input, pattern.clone(), &**accessor, RowBuilder::new())
            }
            PlanStep::StarJoin { pol, accessor } => star_join(input, pol, &**accessor, RowBuilder::new()),
            PlanStep::Trace { label } => {
                debug!("{}: schema {:?}", label, input.vars());
                let (vars, rows) = input.into_parts();
                RowList::new(
                    vars,
                    rows.inspect(move |row| match row {
                        Ok(row) => trace!("{}: {}", label, row),
                        Err(err) => trace!("{}: error {}", label, err),
                    }),
                )
            }
            PlanStep::Plan(plan) => plan.execute(input),
            PlanStep::Custom(step) => step.execute(input),
        }
    }

    fn executes_to_nothing(&self) -> bool {
        match self {
            PlanStep::Nothing => true,
            PlanStep::Plan(plan) => plan.executes_to_nothing(),
            PlanStep::Custom(step) => step.executes_to_nothing(),
            _ => false,
        }
    }

    fn output_vars(&self, input: &[Var]) -> Vec<Var> {
        match self {
            PlanStep::Identity => Vec::new(),
            PlanStep::Nothing | PlanStep::Trace { .. } => input.to_vec(),
            PlanStep::HashJoin { pattern, .. }
            | PlanStep::InnerLoopJoin { pattern, .. }
            | PlanStep::SubstitutionJoin { pattern, .. } => union_vars(input, &vars(pattern)),
            PlanStep::StarJoin { pol, .. } => union_vars(input, &star_vars(pol)),
            PlanStep::Plan(plan) => plan.output_vars(input),
            PlanStep::Custom(step) => step.output_vars(input),
        }
    }
}

impl<X: fmt::Debug> fmt::Debug for PlanStep<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStep::Identity => f.write_str("Identity"),
            PlanStep::Nothing => f.write_str("Nothing"),
            PlanStep::HashJoin { pattern, .. } => f.debug_tuple("HashJoin").field(pattern).finish(),
            PlanStep::InnerLoopJoin { pattern, .. } => f.debug_tuple("InnerLoopJoin").field(pattern).finish(),
            PlanStep::SubstitutionJoin { pattern, .. } => f.debug_tuple("SubstitutionJoin").field(pattern).finish(),
            PlanStep::StarJoin { pol, .. } => f.debug_tuple("StarJoin").field(pol).finish(),
            PlanStep::Trace { label } => f.debug_tuple("Trace").field(label).finish(),
            PlanStep::Plan(plan) => f.debug_tuple("Plan").field(plan).finish(),
            PlanStep::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl<X> From<PhysicalPlan<X>> for PlanStep<X> {
    fn from(plan: PhysicalPlan<X>) -> Self {
        PlanStep::Plan(plan)
    }
}
