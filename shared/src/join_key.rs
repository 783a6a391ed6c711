/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::error::{EngineError, Result};
use crate::row::Row;
use crate::var::Var;
use std::fmt;

/// Variables shared by both operands of a join, in the order they first
/// appear in the left operand's schema. Both sides of a hash or merge join
/// extract their key tuples in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JoinKey {
    vars: Vec<Var>,
}

impl JoinKey {
    pub fn new(left: &[Var], right: &[Var]) -> Self {
        let mut vars: Vec<Var> = Vec::new();
        for var in left {
            if right.contains(var) && !vars.contains(var) {
                vars.push(var.clone());
            }
        }
        JoinKey { vars }
    }

    /// An explicit key, e.g. one chosen by a planner. Duplicates are dropped.
    pub fn from_vars(vars: impl IntoIterator<Item = Var>) -> Self {
        let mut key = JoinKey::default();
        for var in vars {
            if !key.vars.contains(&var) {
                key.vars.push(var);
            }
        }
        key
    }

    /// The empty key turns a hash or merge join into a cross product.
    pub fn empty() -> Self {
        JoinKey::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Var> {
        self.vars.iter()
    }

    /// The row's key tuple, or `None` if it leaves a key variable unbound.
    pub fn key_of<X: Clone>(&self, row: &Row<X>) -> Option<Vec<X>> {
        self.vars.iter().map(|var| row.get(var).cloned()).collect()
    }

    pub fn require_key<X: Clone>(&self, row: &Row<X>) -> Result<Vec<X>> {
        self.vars
            .iter()
            .map(|var| row.get(var).cloned().ok_or_else(|| EngineError::UnboundKeyVariable(var.clone())))
            .collect()
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, var) in self.vars.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", var)?;
        }
        f.write_str("]")
    }
}

/// Schema of a join result: the left schema followed by right-only variables.
pub fn union_vars(left: &[Var], right: &[Var]) -> Vec<Var> {
    let mut vars = left.to_vec();
    for var in right {
        if !vars.contains(var) {
            vars.push(var.clone());
        }
    }
    vars
}
