/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::trace;
use shared::join_key::union_vars;
use shared::{merge_rows, JoinKey, Result, Row, RowBuilder, RowList, TermValue};
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Orders key tuples by the terms' own `Ord`.
pub fn natural_order<X: Ord>(a: &[X], b: &[X]) -> Ordering {
    a.cmp(b)
}

/// Sort-merge join on `join_key`.
///
/// Both operands must already be in non-decreasing key order under
/// `comparator`; this is not checked. When the heads of both sides share a
/// key, the full run of that key is gathered from each side and their cross
/// product is emitted (left run outer, right run inner). Those two runs are
/// the only rows held in memory.
///
/// Every row must bind every key variable, otherwise the stream yields
/// [`shared::EngineError::UnboundKeyVariable`] and stops.
pub fn merge_join<'a, X, C>(
    join_key: JoinKey,
    left: RowList<'a, X>,
    right: RowList<'a, X>,
    comparator: C,
    builder: RowBuilder<X>,
) -> RowList<'a, X>
where
    X: TermValue + 'a,
    C: Fn(&[X], &[X]) -> Ordering + 'a,
{
    let vars = union_vars(left.vars(), right.vars());
    let rows = MergeJoin {
        key: join_key,
        left: Cursor { rows: left, head: None },
        right: Cursor { rows: right, head: None },
        comparator: Box::new(comparator),
        builder,
        pending: VecDeque::new(),
        started: false,
        done: false,
    };
    RowList::new(vars, rows)
}

/// One side of the merge with a one-row lookahead.
struct Cursor<'a, X> {
    rows: RowList<'a, X>,
    head: Option<(Vec<X>, Row<X>)>,
}

impl<X: TermValue> Cursor<'_, X> {
    fn advance(&mut self, key: &JoinKey) -> Result<()> {
        self.head = match self.rows.next() {
            Some(row) => {
                let row = row?;
                Some((key.require_key(&row)?, row))
            }
            None => None,
        };
        Ok(())
    }

    fn take_run(
        &mut self,
        key: &JoinKey,
        run_key: &[X],
        comparator: &dyn Fn(&[X], &[X]) -> Ordering,
    ) -> Result<Vec<Row<X>>> {
        let mut run = Vec::new();
        while self.head.as_ref().is_some_and(|(k, _)| comparator(k, run_key) == Ordering::Equal) {
            if let Some((_, row)) = self.head.take() {
                run.push(row);
            }
            self.advance(key)?;
        }
        Ok(run)
    }
}

struct MergeJoin<'a, X> {
    key: JoinKey,
    left: Cursor<'a, X>,
    right: Cursor<'a, X>,
    comparator: Box<dyn Fn(&[X], &[X]) -> Ordering + 'a>,
    builder: RowBuilder<X>,
    pending: VecDeque<Row<X>>,
    started: bool,
    done: bool,
}

impl<X: TermValue> MergeJoin<'_, X> {
    /// Moves the merge forward by one comparison, filling `pending` when the
    /// heads share a key. Returns `false` once either side is exhausted.
    fn step(&mut self) -> Result<bool> {
        if !self.started {
            self.started = true;
            self.left.advance(&self.key)?;
            self.right.advance(&self.key)?;
        }
        let (Some((left_key, _)), Some((right_key, _))) = (&self.left.head, &self.right.head) else {
            return Ok(false);
        };
        match (self.comparator)(left_key, right_key) {
            Ordering::Less => self.left.advance(&self.key)?,
            Ordering::Greater => self.right.advance(&self.key)?,
            Ordering::Equal => {
                let run_key = left_key.clone();
                let left_run = self.left.take_run(&self.key, &run_key, &*self.comparator)?;
                let right_run = self.right.take_run(&self.key, &run_key, &*self.comparator)?;
                trace!("merge join {}: run of {} x {} rows", self.key, left_run.len(), right_run.len());
                for l in &left_run {
                    for r in &right_run {
                        if let Some(joined) = merge_rows(l, r, &mut self.builder) {
                            self.pending.push_back(joined);
                        }
                    }
                }
            }
        }
        Ok(true)
    }
}

impl<X: TermValue> Iterator for MergeJoin<'_, X> {
    type Item = Result<Row<X>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                return Some(Ok(row));
            }
            if self.done {
                return None;
            }
            match self.step() {
                Ok(true) => {}
                Ok(false) => self.done = true,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{EngineError, Var};

    fn list(names: &[&str], rows: &[&[u32]]) -> RowList<'static, u32> {
        let vars: Vec<Var> = names.iter().map(|n| Var::new(n)).collect();
        let mut builder = RowBuilder::new();
        let rows = rows
            .iter()
            .map(|values| {
                builder.reset();
                for (var, value) in vars.iter().zip(values.iter()) {
                    builder.add(var.clone(), *value);
                }
                builder.build()
            })
            .collect();
        RowList::from_rows(vars, rows)
    }

    fn values(rows: &[Row<u32>], name: &str) -> Vec<u32> {
        rows.iter().filter_map(|r| r.get(&Var::new(name)).copied()).collect()
    }

    #[test]
    fn test_merges_sorted_inputs() {
        let left = list(&["k", "a"], &[&[1, 10], &[3, 30], &[5, 50]]);
        let right = list(&["k", "b"], &[&[2, 200], &[3, 300], &[5, 500], &[6, 600]]);
        let key = JoinKey::new(left.vars(), right.vars());

        let rows = merge_join(key, left, right, natural_order, RowBuilder::new()).into_rows().unwrap();
        assert_eq!(values(&rows, "k"), vec![3, 5]);
        assert_eq!(values(&rows, "b"), vec![300, 500]);
    }

    #[test]
    fn test_equal_key_runs_cross() {
        let left = list(&["k", "a"], &[&[1, 10], &[1, 11], &[2, 20]]);
        let right = list(&["k", "b"], &[&[1, 100], &[1, 101], &[1, 102], &[2, 200]]);
        let key = JoinKey::new(left.vars(), right.vars());

        let rows = merge_join(key, left, right, natural_order, RowBuilder::new()).into_rows().unwrap();
        assert_eq!(rows.len(), 7);
        assert_eq!(values(&rows, "a"), vec![10, 10, 10, 11, 11, 11, 20]);
        assert_eq!(values(&rows, "b"), vec![100, 101, 102, 100, 101, 102, 200]);
    }

    #[test]
    fn test_descending_comparator() {
        let left = list(&["k"], &[&[9], &[4], &[1]]);
        let right = list(&["k"], &[&[4], &[2], &[1]]);
        let key = JoinKey::new(left.vars(), right.vars());

        let rows = merge_join(key, left, right, |a: &[u32], b: &[u32]| b.cmp(a), RowBuilder::new())
            .into_rows()
            .unwrap();
        assert_eq!(values(&rows, "k"), vec![4, 1]);
    }

    #[test]
    fn test_unbound_key_is_an_error() {
        let left = list(&["a"], &[&[1]]);
        let right = list(&["k"], &[&[1]]);
        let key = JoinKey::from_vars([Var::new("k")]);

        let result = merge_join(key, left, right, natural_order, RowBuilder::new()).into_rows();
        assert!(matches!(result, Err(EngineError::UnboundKeyVariable(v)) if v == Var::new("k")));
    }
}
