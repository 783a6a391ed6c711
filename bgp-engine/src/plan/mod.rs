/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Composition of join algorithms into a linear pipeline.
//!
//! A [`Step`] turns an input row list into an output row list. The built-in
//! steps are the variants of [`PlanStep`]; anything else can be plugged in
//! through [`PlanStep::Custom`]. A [`PhysicalPlan`] is an ordered list of
//! steps and is itself a step, so plans nest.

pub mod physical_plan;
pub mod step;

pub use physical_plan::PhysicalPlan;
pub use step::{Accessor, PlanStep, Step};
