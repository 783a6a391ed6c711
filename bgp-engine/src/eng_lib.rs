/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Pattern utilities: substitution, variable bookkeeping and the bridge from
//! raw storage tuples to rows.

use crate::access::TupleIter;
use shared::{EngineError, PredicateObjectList, Result, Row, RowBuilder, RowList, Slot, TermValue, Tuple, Var};
use std::borrow::Cow;

/// Replaces every variable bound in `row` by its value. The pattern is
/// returned borrowed, untouched, when `row` is the identity row.
pub fn substitute<'p, X: TermValue>(pattern: &'p Tuple<Slot<X>>, row: &Row<X>) -> Cow<'p, Tuple<Slot<X>>> {
    if row.is_identity() {
        return Cow::Borrowed(pattern);
    }
    Cow::Owned(pattern.map(|slot| substitute_slot(slot, row)))
}

fn substitute_slot<X: TermValue>(slot: &Slot<X>, row: &Row<X>) -> Slot<X> {
    match slot {
        Slot::Variable(var) => row.get(var).map(|value| Slot::Term(value.clone())).unwrap_or_else(|| slot.clone()),
        term => term.clone(),
    }
}

/// Star-pattern version of [`substitute`]. Entries that become identical
/// after substitution collapse into one.
pub fn substitute_star<'p, X: TermValue>(
    pol: &'p PredicateObjectList<X>,
    row: &Row<X>,
) -> Cow<'p, PredicateObjectList<X>> {
    if row.is_identity() {
        return Cow::Borrowed(pol);
    }
    let graph = pol.graph().map(|g| substitute_slot(g, row));
    let mut result = PredicateObjectList::with_graph(graph, substitute_slot(pol.subject(), row));
    for (predicate, object) in pol.entries() {
        result.add(substitute_slot(predicate, row), substitute_slot(object, row));
    }
    Cow::Owned(result)
}

/// Adds the pattern's variables to `acc`, skipping ones already there.
pub fn acc_vars<X>(acc: &mut Vec<Var>, pattern: &Tuple<Slot<X>>) {
    for var in pattern.iter().filter_map(Slot::as_var) {
        if !acc.contains(var) {
            acc.push(var.clone());
        }
    }
}

/// Distinct variables of a pattern, in position order.
pub fn vars<X>(pattern: &Tuple<Slot<X>>) -> Vec<Var> {
    let mut acc = Vec::with_capacity(pattern.arity());
    acc_vars(&mut acc, pattern);
    acc
}

pub fn star_vars<X: Clone + PartialEq>(pol: &PredicateObjectList<X>) -> Vec<Var> {
    let mut acc = Vec::new();
    for pattern in pol.patterns() {
        acc_vars(&mut acc, &pattern);
    }
    acc
}

/// Counts variable occurrences; a repeated variable counts every time.
pub fn count_vars<X>(pattern: &Tuple<Slot<X>>) -> usize {
    pattern.iter().filter(|slot| slot.is_var()).count()
}

/// True when some variable occurs more than once, i.e. the pattern is a
/// self-join.
pub fn has_repeated_vars<X>(pattern: &Tuple<Slot<X>>) -> bool {
    count_vars(pattern) != vars(pattern).len()
}

/// Plain term tuple with `any` in every variable position, for stores that
/// take a wildcard marker instead of slots.
pub fn tuple_to_any_term<X: Clone>(pattern: &Tuple<Slot<X>>, any: &X) -> Tuple<X> {
    pattern.map(|slot| match slot {
        Slot::Term(term) => term.clone(),
        Slot::Variable(_) => any.clone(),
    })
}

/// Stages the bindings `tuple` gives to `pattern`'s variables on top of
/// whatever `builder` already holds.
///
/// Returns `Ok(false)` when a variable would get a second, different value,
/// which happens for a repeated variable whose positions disagree. The
/// builder is left partially filled in that case and must be reset.
pub fn bind_tuple<X: TermValue>(
    builder: &mut RowBuilder<X>,
    pattern: &Tuple<Slot<X>>,
    tuple: &Tuple<X>,
) -> Result<bool> {
    if pattern.arity() != tuple.arity() {
        return Err(EngineError::ArityMismatch { pattern: pattern.arity(), tuple: tuple.arity() });
    }
    for (slot, value) in pattern.iter().zip(tuple.iter()) {
        let Slot::Variable(var) = slot else { continue };
        match builder.get(var) {
            Some(seen) if seen != value => return Ok(false),
            Some(_) => {}
            None => {
                builder.add(var.clone(), value.clone());
            }
        }
    }
    Ok(true)
}

/// Converts one raw tuple, or `None` when it fails a self-join check.
pub fn tuple_to_row<X: TermValue>(
    tuple: &Tuple<X>,
    pattern: &Tuple<Slot<X>>,
    builder: &mut RowBuilder<X>,
) -> Result<Option<Row<X>>> {
    builder.reset();
    Ok(bind_tuple(builder, pattern, tuple)?.then(|| builder.build()))
}

/// Turns the tuples returned for `pattern` into rows over the pattern's
/// variables. Tuples whose repeated variables disagree are dropped.
pub fn convert_raw_tuples_to_rows<'a, X: TermValue + 'a>(
    raw: TupleIter<'a, X>,
    pattern: Tuple<Slot<X>>,
    mut builder: RowBuilder<X>,
) -> RowList<'a, X> {
    let schema = vars(&pattern);
    let rows = raw.filter_map(move |item| match item {
        Ok(tuple) => tuple_to_row(&tuple, &pattern, &mut builder).transpose(),
        Err(err) => Some(Err(err)),
    });
    RowList::new(schema, rows)
}
