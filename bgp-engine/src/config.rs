/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use serde::{Deserialize, Serialize};

/// Engine-wide settings.
///
/// Fields missing from a serialized config take their default values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Collect every row list in full as soon as it is created.
    pub eager_materialization: bool,
    /// Insert a trace step after each plan step in [`PhysicalPlan::prepare`].
    ///
    /// [`PhysicalPlan::prepare`]: crate::plan::PhysicalPlan::prepare
    pub trace_steps: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_eager_materialization(mut self, eager: bool) -> Self {
        self.eager_materialization = eager;
        self
    }

    pub fn with_trace_steps(mut self, trace: bool) -> Self {
        self.trace_steps = trace;
        self
    }

    /// Pushes the process-wide settings into effect.
    pub fn install(&self) {
        shared::set_eager_materialization(self.eager_materialization);
    }
}
