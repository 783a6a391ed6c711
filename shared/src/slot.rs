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
use serde::{Deserialize, Serialize};

/// One position of a pattern: either a variable or a concrete term.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot<X> {
    Variable(Var),
    Term(X),
}

impl<X> Slot<X> {
    pub fn var(name: &str) -> Self {
        Slot::Variable(Var::new(name))
    }

    pub fn term(value: X) -> Self {
        Slot::Term(value)
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Slot::Variable(_))
    }

    pub fn is_term(&self) -> bool {
        matches!(self, Slot::Term(_))
    }

    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Slot::Variable(var) => Some(var),
            Slot::Term(_) => None,
        }
    }

    pub fn as_term(&self) -> Option<&X> {
        match self {
            Slot::Term(term) => Some(term),
            Slot::Variable(_) => None,
        }
    }
}

impl<X> From<Var> for Slot<X> {
    fn from(var: Var) -> Self {
        Slot::Variable(var)
    }
}
