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
use crate::join::substitution_join;
use log::debug;
use shared::{PredicateObjectList, RowBuilder, RowList, TermValue};

/// Evaluates a star pattern against `left` by chaining one substitution join
/// per entry. Each entry sees the bindings made by the entries before it, so
/// a repeated object variable is checked on the second probe rather than
/// assumed.
pub fn star_join<'a, X, A>(
    left: RowList<'a, X>,
    pol: &PredicateObjectList<X>,
    accessor: &'a A,
    builder: RowBuilder<X>,
) -> RowList<'a, X>
where
    X: TermValue + 'a,
    A: AccessRows<X> + ?Sized,
{
    if pol.multiple_same_var() || pol.multiple_same_predicate() {
        debug!(
            "star join on {:?}: {} entries (same predicate: {}, same var: {})",
            pol.subject(),
            pol.len(),
            pol.multiple_same_predicate(),
            pol.multiple_same_var()
        );
    }
    pol.patterns()
        .fold(left, |rows, pattern| substitution_join(rows, pattern, accessor, builder.clone()))
}
