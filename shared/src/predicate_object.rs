/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::slot::Slot;
use crate::tuple::Tuple;
use serde::{Deserialize, Serialize};

/// A star pattern: several patterns sharing one subject (and graph).
///
/// Two flags are tracked as entries are added. `multiple_same_predicate`
/// means a predicate appears with more than one object, so execution cannot
/// assume one object per predicate. `multiple_same_var` means an object
/// variable repeats across entries, which is an implicit self-join that has
/// to be checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateObjectList<X> {
    graph: Option<Slot<X>>,
    subject: Slot<X>,
    entries: Vec<(Slot<X>, Slot<X>)>,
    multiple_same_predicate: bool,
    multiple_same_var: bool,
}

impl<X: PartialEq> PredicateObjectList<X> {
    pub fn new(subject: Slot<X>) -> Self {
        Self::with_graph(None, subject)
    }

    pub fn with_graph(graph: Option<Slot<X>>, subject: Slot<X>) -> Self {
        PredicateObjectList {
            graph,
            subject,
            entries: Vec::new(),
            multiple_same_predicate: false,
            multiple_same_var: false,
        }
    }

    /// Adds `(predicate, object)`. Returns `false` when the identical pair is
    /// already present, in which case nothing changes.
    pub fn add(&mut self, predicate: Slot<X>, object: Slot<X>) -> bool {
        if self.entries.iter().any(|(p, o)| *p == predicate && *o == object) {
            return false;
        }
        if self.entries.iter().any(|(p, _)| *p == predicate) {
            self.multiple_same_predicate = true;
        }
        if let Some(var) = object.as_var() {
            if self.entries.iter().any(|(_, o)| o.as_var() == Some(var)) {
                self.multiple_same_var = true;
            }
        }
        self.entries.push((predicate, object));
        true
    }

    pub fn graph(&self) -> Option<&Slot<X>> {
        self.graph.as_ref()
    }

    pub fn subject(&self) -> &Slot<X> {
        &self.subject
    }

    pub fn entries(&self) -> &[(Slot<X>, Slot<X>)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn multiple_same_predicate(&self) -> bool {
        self.multiple_same_predicate
    }

    pub fn multiple_same_var(&self) -> bool {
        self.multiple_same_var
    }
}

impl<X: Clone + PartialEq> PredicateObjectList<X> {
    /// The single pattern for one entry: a triple, or a quad when a graph
    /// slot is present.
    pub fn pattern(&self, entry: &(Slot<X>, Slot<X>)) -> Tuple<Slot<X>> {
        let (predicate, object) = entry;
        match &self.graph {
            Some(graph) => Tuple::quad(graph.clone(), self.subject.clone(), predicate.clone(), object.clone()),
            None => Tuple::triple(self.subject.clone(), predicate.clone(), object.clone()),
        }
    }

    pub fn patterns(&self) -> impl Iterator<Item = Tuple<Slot<X>>> + '_ {
        self.entries.iter().map(move |entry| self.pattern(entry))
    }
}
