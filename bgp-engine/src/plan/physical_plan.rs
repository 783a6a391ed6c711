/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::config::EngineConfig;
use crate::plan::{PlanStep, Step};
use log::debug;
use shared::{RowList, TermValue, Var};

/// An ordered list of steps. Executing the plan threads the row list
/// through each step in turn, starting from whatever the caller passes in
/// (normally the identity row list).
pub struct PhysicalPlan<X> {
    steps: Vec<PlanStep<X>>,
}

impl<X> Default for PhysicalPlan<X> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<X: TermValue> PhysicalPlan<X> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<PlanStep<X>>) -> Self {
        Self { steps }
    }

    pub fn push(&mut self, step: PlanStep<X>) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Moves every step of `other` onto the end of this plan. Nesting is
    /// flattened one level: `other`'s steps become siblings of ours.
    pub fn append(&mut self, other: PhysicalPlan<X>) -> &mut Self {
        self.steps.extend(other.steps);
        self
    }

    pub fn steps(&self) -> &[PlanStep<X>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True if some step, at any depth, is known to yield nothing. Nothing
    /// is executed to find out.
    pub fn executes_to_nothing(&self) -> bool {
        self.steps.iter().any(|step| step.executes_to_nothing())
    }

    /// Inserts a trace step after every step, nested plans included.
    pub fn traced(self) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() * 2);
        for (i, step) in self.steps.into_iter().enumerate() {
            if step.is_trace() {
                steps.push(step);
                continue;
            }
            let label = format!("step {}: {:?}", i, step);
            let step = match step {
                PlanStep::Plan(inner) => PlanStep::Plan(inner.traced()),
                other => other,
            };
            steps.push(step);
            steps.push(PlanStep::trace(label));
        }
        Self { steps }
    }

    /// Applies `config`: installs its global settings and adds tracing when
    /// asked to.
    pub fn prepare(self, config: &EngineConfig) -> Self {
        config.install();
        if config.trace_steps {
            self.traced()
        } else {
            self
        }
    }

    /// Schema the plan produces for an input schema, without executing it.
    pub fn output_vars(&self, input: &[Var]) -> Vec<Var> {
        self.steps.iter().fold(input.to_vec(), |vars, step| step.output_vars(&vars))
    }

    /// Runs the plan from the identity row list.
    pub fn evaluate(&self) -> RowList<'_, X> {
        self.execute(RowList::identity())
    }
}

impl<X: TermValue> Step<X> for PhysicalPlan<X> {
    fn execute<'a>(&'a self, input: RowList<'a, X>) -> RowList<'a, X>
    where
        X: 'a,
    {
        debug!("executing plan of {} steps", self.steps.len());
        if self.executes_to_nothing() {
            debug!("plan contains a step that yields nothing, skipping");
            return RowList::empty_with(self.output_vars(input.vars()));
        }
        self.steps.iter().fold(input, |rows, step| step.execute(rows))
    }

    fn executes_to_nothing(&self) -> bool {
        PhysicalPlan::executes_to_nothing(self)
    }

    fn output_vars(&self, input: &[Var]) -> Vec<Var> {
        PhysicalPlan::output_vars(self, input)
    }
}

impl<X: std::fmt::Debug> std::fmt::Debug for PhysicalPlan<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.steps).finish()
    }
}

impl<X: TermValue> FromIterator<PlanStep<X>> for PhysicalPlan<X> {
    fn from_iter<I: IntoIterator<Item = PlanStep<X>>>(iter: I) -> Self {
        Self::from_steps(iter.into_iter().collect())
    }
}
