/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use shared::join_key::union_vars;
use shared::{merge_rows, Result, Row, RowBuilder, RowList, TermValue};

/// Joins every compatible pair of rows.
///
/// The right operand is collected on the first pull; the left operand is
/// streamed, giving output in left order and, per left row, right order.
/// Quadratic, but it makes no assumption about the inputs, which makes it
/// the reference the other algorithms are checked against.
pub fn nested_loop_join<'a, X: TermValue + 'a>(
    left: RowList<'a, X>,
    right: RowList<'a, X>,
    builder: RowBuilder<X>,
) -> RowList<'a, X> {
    let vars = union_vars(left.vars(), right.vars());
    let rows = NestedLoopJoin {
        outer: left,
        unloaded: Some(right),
        inner: Vec::new(),
        current: None,
        builder,
        done: false,
    };
    RowList::new(vars, rows)
}

struct NestedLoopJoin<'a, X> {
    outer: RowList<'a, X>,
    unloaded: Option<RowList<'a, X>>,
    inner: Vec<Row<X>>,
    current: Option<(Row<X>, usize)>,
    builder: RowBuilder<X>,
    done: bool,
}

impl<X: TermValue> Iterator for NestedLoopJoin<'_, X> {
    type Item = Result<Row<X>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(right) = self.unloaded.take() {
            match right.into_rows() {
                Ok(rows) => {
                    self.done = rows.is_empty();
                    self.inner = rows;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        loop {
            if self.done {
                return None;
            }
            if let Some((outer, index)) = &mut self.current {
                while let Some(candidate) = self.inner.get(*index) {
                    *index += 1;
                    if let Some(joined) = merge_rows(outer, candidate, &mut self.builder) {
                        return Some(Ok(joined));
                    }
                }
                self.current = None;
            }
            match self.outer.next() {
                Some(Ok(row)) => self.current = Some((row, 0)),
                Some(Err(err)) => return Some(Err(err)),
                None => self.done = true,
            }
        }
    }
}
