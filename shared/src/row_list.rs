/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::error::Result;
use crate::row::Row;
use crate::var::Var;
use crate::eager_materialization;
use std::fmt;

pub type RowIter<'a, X> = Box<dyn Iterator<Item = Result<Row<X>>> + 'a>;

/// A declared variable schema plus a lazy, single-pass stream of rows.
///
/// Errors travel inside the stream at the position where they occurred.
/// Dropping a `RowList` before it is exhausted drops every upstream
/// iterator, which releases whatever cursors they hold.
pub struct RowList<'a, X> {
    vars: Vec<Var>,
    rows: RowIter<'a, X>,
}

impl<'a, X: 'a> RowList<'a, X> {
    pub fn new<I>(vars: Vec<Var>, rows: I) -> Self
    where
        I: Iterator<Item = Result<Row<X>>> + 'a,
    {
        if eager_materialization() {
            let collected: Vec<_> = rows.collect();
            return RowList { vars, rows: Box::new(collected.into_iter()) };
        }
        RowList { vars, rows: Box::new(rows) }
    }

    pub fn from_rows(vars: Vec<Var>, rows: Vec<Row<X>>) -> Self {
        RowList { vars, rows: Box::new(rows.into_iter().map(Ok)) }
    }

    /// Exactly one row, the identity row.
    pub fn identity() -> Self {
        RowList { vars: Vec::new(), rows: Box::new(std::iter::once(Ok(Row::identity()))) }
    }

    /// No rows at all.
    pub fn empty() -> Self {
        Self::empty_with(Vec::new())
    }

    pub fn empty_with(vars: Vec<Var>) -> Self {
        RowList { vars, rows: Box::new(std::iter::empty()) }
    }

    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    pub fn into_parts(self) -> (Vec<Var>, RowIter<'a, X>) {
        (self.vars, self.rows)
    }

    /// Pulls everything into memory now; the returned list replays it.
    pub fn materialize(self) -> Self {
        let collected: Vec<_> = self.rows.collect();
        RowList { vars: self.vars, rows: Box::new(collected.into_iter()) }
    }

    /// Collects the rows, stopping at the first error.
    pub fn into_rows(self) -> Result<Vec<Row<X>>> {
        self.rows.collect()
    }
}

impl<X> Iterator for RowList<'_, X> {
    type Item = Result<Row<X>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<X> fmt::Debug for RowList<'_, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowList").field("vars", &self.vars).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::row::RowBuilder;

    #[test]
    fn test_identity_yields_one_empty_row() {
        let rows = RowList::<u32>::identity().into_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_identity());
    }

    #[test]
    fn test_empty_yields_nothing() {
        let list = RowList::<u32>::empty_with(vec![Var::new("x")]);
        assert_eq!(list.vars(), &[Var::new("x")]);
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn test_error_stays_in_place() {
        let mut builder = RowBuilder::new();
        let ok = builder.add(Var::new("x"), 1u32).build();
        let items = vec![Ok(ok.clone()), Err(EngineError::Arity { found: 2 }), Ok(ok)];
        let mut list = RowList::new(vec![Var::new("x")], items.into_iter());

        assert!(list.next().unwrap().is_ok());
        assert!(list.next().unwrap().is_err());
        assert!(list.next().unwrap().is_ok());
        assert!(list.next().is_none());
    }

    #[test]
    fn test_materialize_replays_rows() {
        let mut builder = RowBuilder::new();
        let rows: Vec<_> = (0..3u32).map(|i| builder.reset().add(Var::new("x"), i).build()).collect();
        let list = RowList::from_rows(vec![Var::new("x")], rows.clone()).materialize();

        assert_eq!(list.into_rows().unwrap(), rows);
    }
}
