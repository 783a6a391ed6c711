/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::debug;
use rustc_hash::FxHashMap;
use shared::join_key::union_vars;
use shared::{merge_rows, JoinKey, Result, Row, RowBuilder, RowList, TermValue};
use std::collections::VecDeque;

/// Hash join on `join_key`.
///
/// The left operand is the build side: it is consumed completely, on the
/// first pull, into a multi-map from key tuple to rows. The right operand is
/// then streamed as the probe side, so output follows right-hand order and,
/// for one probe row, the order in which matching left rows arrived.
///
/// Rows that leave a key variable unbound cannot be hashed; they are kept
/// aside and matched with the full compatibility test instead.
pub fn hash_join<'a, X: TermValue + 'a>(
    join_key: JoinKey,
    left: RowList<'a, X>,
    right: RowList<'a, X>,
    builder: RowBuilder<X>,
) -> RowList<'a, X> {
    let vars = union_vars(left.vars(), right.vars());
    let rows = HashJoin {
        key: join_key,
        build_side: Some(left),
        probe_side: Some(right),
        table: HashTable::default(),
        builder,
        pending: VecDeque::new(),
    };
    RowList::new(vars, rows)
}

struct HashTable<X> {
    buckets: FxHashMap<Vec<X>, Vec<Row<X>>>,
    unkeyed: Vec<Row<X>>,
}

impl<X> Default for HashTable<X> {
    fn default() -> Self {
        HashTable { buckets: FxHashMap::default(), unkeyed: Vec::new() }
    }
}

impl<X: TermValue> HashTable<X> {
    fn build(key: &JoinKey, rows: RowList<'_, X>) -> Result<Self> {
        let mut table = HashTable::default();
        let mut count = 0usize;
        for row in rows {
            let row = row?;
            count += 1;
            match key.key_of(&row) {
                Some(k) => table.buckets.entry(k).or_default().push(row),
                None => table.unkeyed.push(row),
            }
        }
        debug!(
            "hash join {}: built {} rows into {} buckets ({} unkeyed)",
            key,
            count,
            table.buckets.len(),
            table.unkeyed.len()
        );
        Ok(table)
    }

    fn is_empty(&self) -> bool {
        self.buckets.is_empty() && self.unkeyed.is_empty()
    }

    fn probe(&self, key: &JoinKey, row: &Row<X>, builder: &mut RowBuilder<X>, out: &mut VecDeque<Row<X>>) {
        let mut emit = |candidate: &Row<X>| {
            if let Some(joined) = merge_rows(candidate, row, builder) {
                out.push_back(joined);
            }
        };
        match key.key_of(row) {
            Some(k) => {
                self.buckets.get(&k).into_iter().flatten().for_each(&mut emit);
            }
            None => {
                self.buckets.values().flatten().for_each(&mut emit);
            }
        }
        self.unkeyed.iter().for_each(&mut emit);
    }
}

struct HashJoin<'a, X> {
    key: JoinKey,
    build_side: Option<RowList<'a, X>>,
    probe_side: Option<RowList<'a, X>>,
    table: HashTable<X>,
    builder: RowBuilder<X>,
    pending: VecDeque<Row<X>>,
}

impl<X: TermValue> Iterator for HashJoin<'_, X> {
    type Item = Result<Row<X>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                return Some(Ok(row));
            }
            if let Some(left) = self.build_side.take() {
                match HashTable::build(&self.key, left) {
                    Ok(table) if table.is_empty() => self.probe_side = None,
                    Ok(table) => self.table = table,
                    Err(err) => {
                        self.probe_side = None;
                        return Some(Err(err));
                    }
                }
            }
            let probe = match self.probe_side.as_mut()?.next()? {
                Ok(row) => row,
                Err(err) => return Some(Err(err)),
            };
            self.table.probe(&self.key, &probe, &mut self.builder, &mut self.pending);
        }
    }
}
