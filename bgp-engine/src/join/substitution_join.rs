/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::access::{AccessRows, TupleIter};
use crate::eng_lib::{bind_tuple, substitute, vars};
use shared::join_key::union_vars;
use shared::{Result, Row, RowBuilder, RowList, Slot, TermValue, Tuple};

/// Index nested-loop join of `left` with a pattern.
///
/// For each left row, pulled one at a time, the row's bindings are
/// substituted into `pattern` and the specialized pattern is sent to
/// `accessor`. Every returned tuple that satisfies the pattern's repeated
/// variables becomes the left row extended with the pattern's remaining
/// variables. No side is ever materialized; the cost is one storage probe
/// per left row.
pub fn substitution_join<'a, X, A>(
    left: RowList<'a, X>,
    pattern: Tuple<Slot<X>>,
    accessor: &'a A,
    builder: RowBuilder<X>,
) -> RowList<'a, X>
where
    X: TermValue + 'a,
    A: AccessRows<X> + ?Sized,
{
    let schema = union_vars(left.vars(), &vars(&pattern));
    let rows = SubstitutionJoin { left, pattern, accessor, builder, current: None };
    RowList::new(schema, rows)
}

struct Probe<'a, X> {
    row: Row<X>,
    pattern: Tuple<Slot<X>>,
    tuples: TupleIter<'a, X>,
}

struct SubstitutionJoin<'a, X, A: ?Sized> {
    left: RowList<'a, X>,
    pattern: Tuple<Slot<X>>,
    accessor: &'a A,
    builder: RowBuilder<X>,
    current: Option<Probe<'a, X>>,
}

impl<'a, X, A> Iterator for SubstitutionJoin<'a, X, A>
where
    X: TermValue + 'a,
    A: AccessRows<X> + ?Sized,
{
    type Item = Result<Row<X>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(probe) = &mut self.current {
                match probe.tuples.next() {
                    Some(Ok(tuple)) => {
                        self.builder.reset().merge(&probe.row);
                        match bind_tuple(&mut self.builder, &probe.pattern, &tuple) {
                            Ok(true) => return Some(Ok(self.builder.build())),
                            Ok(false) => continue,
                            Err(err) => return Some(Err(err)),
                        }
                    }
                    Some(Err(err)) => return Some(Err(err)),
                    None => self.current = None,
                }
            }
            let row = match self.left.next()? {
                Ok(row) => row,
                Err(err) => return Some(Err(err)),
            };
            let pattern = substitute(&self.pattern, &row).into_owned();
            let accessor: &'a A = self.accessor;
            let tuples = accessor.access_rows(&pattern);
            self.current = Some(Probe { row, pattern, tuples });
        }
    }
}
