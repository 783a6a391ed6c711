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
use serde::{Deserialize, Serialize};

/// A triple `(subject, predicate, object)` or a quad
/// `(graph, subject, predicate, object)`.
///
/// Used both for patterns (`Tuple<Slot<X>>`) and for raw storage rows
/// (`Tuple<X>`). No other arity can be constructed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tuple<T> {
    Triple([T; 3]),
    Quad([T; 4]),
}

impl<T> Tuple<T> {
    pub fn triple(subject: T, predicate: T, object: T) -> Self {
        Tuple::Triple([subject, predicate, object])
    }

    pub fn quad(graph: T, subject: T, predicate: T, object: T) -> Self {
        Tuple::Quad([graph, subject, predicate, object])
    }

    pub fn from_vec(items: Vec<T>) -> Result<Self> {
        let found = items.len();
        let mut items = items.into_iter();
        match (found, items.next(), items.next(), items.next(), items.next()) {
            (3, Some(s), Some(p), Some(o), None) => Ok(Tuple::triple(s, p, o)),
            (4, Some(g), Some(s), Some(p), Some(o)) => Ok(Tuple::quad(g, s, p, o)),
            _ => Err(EngineError::Arity { found }),
        }
    }

    pub fn arity(&self) -> usize {
        self.as_slice().len()
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Tuple::Triple(items) => items,
            Tuple::Quad(items) => items,
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Absent for triples.
    pub fn graph(&self) -> Option<&T> {
        match self {
            Tuple::Triple(_) => None,
            Tuple::Quad([g, _, _, _]) => Some(g),
        }
    }

    pub fn subject(&self) -> &T {
        match self {
            Tuple::Triple([s, _, _]) => s,
            Tuple::Quad([_, s, _, _]) => s,
        }
    }

    pub fn predicate(&self) -> &T {
        match self {
            Tuple::Triple([_, p, _]) => p,
            Tuple::Quad([_, _, p, _]) => p,
        }
    }

    pub fn object(&self) -> &T {
        match self {
            Tuple::Triple([_, _, o]) => o,
            Tuple::Quad([_, _, _, o]) => o,
        }
    }

    /// Builds a tuple of the same arity from a per-position function.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Tuple<U> {
        match self {
            Tuple::Triple(items) => Tuple::Triple(items.each_ref().map(f)),
            Tuple::Quad(items) => Tuple::Quad(items.each_ref().map(f)),
        }
    }
}

impl<'a, T> IntoIterator for &'a Tuple<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
