/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rustc_hash::{FxHashMap, FxHashSet};
use shared::{EngineError, Result, Slot, TermValue, Tuple};
use std::sync::Arc;

pub type TupleIter<'a, X> = Box<dyn Iterator<Item = Result<Tuple<X>>> + 'a>;

/// The storage boundary. Returns every stored tuple matching the concrete
/// positions of `pattern`; variable positions are wildcards.
///
/// Failures are reported as `Err` items (usually via
/// [`EngineError::access`]) and reach the consumer of the row list
/// unchanged. Dropping the iterator must release any cursor it holds.
pub trait AccessRows<X> {
    fn access_rows(&self, pattern: &Tuple<Slot<X>>) -> TupleIter<'_, X>;
}

impl<X, A: AccessRows<X> + ?Sized> AccessRows<X> for &A {
    fn access_rows(&self, pattern: &Tuple<Slot<X>>) -> TupleIter<'_, X> {
        (**self).access_rows(pattern)
    }
}

impl<X, A: AccessRows<X> + ?Sized> AccessRows<X> for Arc<A> {
    fn access_rows(&self, pattern: &Tuple<Slot<X>>) -> TupleIter<'_, X> {
        (**self).access_rows(pattern)
    }
}

/// A set of tuples of one arity with a posting index per position.
///
/// A probe walks the shortest posting list among the pattern's concrete
/// positions and checks the remaining positions on each candidate.
#[derive(Debug, Clone)]
pub struct InMemoryStore<X> {
    arity: usize,
    tuples: Vec<Tuple<X>>,
    seen: FxHashSet<Tuple<X>>,
    indexes: Vec<FxHashMap<X, Vec<usize>>>,
}

impl<X: TermValue> InMemoryStore<X> {
    pub fn triples() -> Self {
        Self::with_arity(3)
    }

    pub fn quads() -> Self {
        Self::with_arity(4)
    }

    fn with_arity(arity: usize) -> Self {
        Self {
            arity,
            tuples: Vec::new(),
            seen: FxHashSet::default(),
            indexes: vec![FxHashMap::default(); arity],
        }
    }

    /// Builds a store from tuples that must all have the same arity.
    pub fn from_tuples(tuples: impl IntoIterator<Item = Tuple<X>>) -> Result<Self> {
        let mut tuples = tuples.into_iter().peekable();
        let mut store = match tuples.peek().map(Tuple::arity) {
            Some(4) => Self::quads(),
            _ => Self::triples(),
        };
        for tuple in tuples {
            store.insert(tuple)?;
        }
        Ok(store)
    }

    /// Adds a tuple; returns `false` if it was already stored.
    pub fn insert(&mut self, tuple: Tuple<X>) -> Result<bool> {
        if tuple.arity() != self.arity {
            return Err(EngineError::ArityMismatch { pattern: self.arity, tuple: tuple.arity() });
        }
        if !self.seen.insert(tuple.clone()) {
            return Ok(false);
        }
        let position = self.tuples.len();
        for (index, value) in self.indexes.iter_mut().zip(tuple.iter()) {
            index.entry(value.clone()).or_default().push(position);
        }
        self.tuples.push(tuple);
        Ok(true)
    }

    pub fn contains(&self, tuple: &Tuple<X>) -> bool {
        self.seen.contains(tuple)
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Candidate positions for a pattern, or `None` to scan everything.
    fn candidates(&self, pattern: &Tuple<Slot<X>>) -> Option<&[usize]> {
        let mut best: Option<&[usize]> = None;
        for (index, slot) in self.indexes.iter().zip(pattern.iter()) {
            let Some(term) = slot.as_term() else { continue };
            let postings = index.get(term).map(Vec::as_slice).unwrap_or(&[]);
            if best.map_or(true, |current| postings.len() < current.len()) {
                best = Some(postings);
            }
        }
        best
    }
}

fn tuple_matches<X: PartialEq>(pattern: &Tuple<Slot<X>>, tuple: &Tuple<X>) -> bool {
    pattern.iter().zip(tuple.iter()).all(|(slot, value)| match slot {
        Slot::Term(term) => term == value,
        Slot::Variable(_) => true,
    })
}

impl<X: TermValue> AccessRows<X> for InMemoryStore<X> {
    fn access_rows(&self, pattern: &Tuple<Slot<X>>) -> TupleIter<'_, X> {
        if pattern.arity() != self.arity {
            let err = EngineError::ArityMismatch { pattern: pattern.arity(), tuple: self.arity };
            return Box::new(std::iter::once(Err(err)));
        }
        let pattern = pattern.clone();
        match self.candidates(&pattern) {
            Some(positions) => Box::new(
                positions
                    .iter()
                    .map(move |&pos| &self.tuples[pos])
                    .filter(move |tuple| tuple_matches(&pattern, tuple))
                    .cloned()
                    .map(Ok),
            ),
            None => Box::new(self.tuples.iter().cloned().map(Ok)),
        }
    }
}
