/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::var::Var;
use crate::TermValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An immutable set of variable bindings.
///
/// Every variable reported by [`Row::vars`] has a value; an unbound variable
/// is simply absent. Rows are cheap to clone and safe to share.
///
/// Bindings are held sorted by variable with no variable repeated, so two
/// rows with the same mapping compare and hash equal however they were
/// built. Deserialization goes through [`RowBuilder`] to keep that true.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "Vec<(Var, X)>",
    into = "Vec<(Var, X)>",
    bound(serialize = "X: Clone + Serialize", deserialize = "X: TermValue + Deserialize<'de>")
)]
pub struct Row<X> {
    bindings: Arc<[(Var, X)]>,
}

impl<X> Row<X> {
    /// The row with no bindings, the unit of every join.
    pub fn identity() -> Self {
        Row { bindings: Arc::from(Vec::new()) }
    }

    pub fn is_identity(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, var: &Var) -> Option<&X> {
        let index = self.bindings.binary_search_by(|(v, _)| v.cmp(var)).ok()?;
        Some(&self.bindings[index].1)
    }

    pub fn contains(&self, var: &Var) -> bool {
        self.get(var).is_some()
    }

    /// Variables in sorted order.
    pub fn vars(&self) -> impl Iterator<Item = &Var> + '_ {
        self.bindings.iter().map(|(v, _)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Var, &X)> + '_ {
        self.bindings.iter().map(|(v, x)| (v, x))
    }
}

impl<X: PartialEq> Row<X> {
    /// Two rows are compatible when every variable they both bind has the
    /// same value in each.
    pub fn compatible(&self, other: &Row<X>) -> bool {
        self.bindings.iter().all(|(var, value)| match other.get(var) {
            Some(theirs) => theirs == value,
            None => true,
        })
    }

    /// Same bindings regardless of the order they were added in.
    pub fn same_bindings(&self, other: &Row<X>) -> bool {
        self.len() == other.len() && self.compatible(other)
    }
}

impl<X: fmt::Debug> fmt::Display for Row<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (var, value)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} = {:?}", var, value)?;
        }
        f.write_str(")")
    }
}

impl<X: TermValue> From<Vec<(Var, X)>> for Row<X> {
    fn from(bindings: Vec<(Var, X)>) -> Self {
        let mut builder = RowBuilder::new();
        for (var, value) in bindings {
            builder.add(var, value);
        }
        builder.build()
    }
}

impl<X: Clone> From<Row<X>> for Vec<(Var, X)> {
    fn from(row: Row<X>) -> Self {
        row.bindings.to_vec()
    }
}

/// Reusable accumulator for rows.
///
/// `add` stages a binding; adding a variable that is already staged
/// overwrites its value (last write wins). `build` copies the staged state
/// out, so later reuse of the builder never touches a built row.
#[derive(Debug, Clone)]
pub struct RowBuilder<X> {
    staged: Vec<(Var, X)>,
}

impl<X> Default for RowBuilder<X> {
    fn default() -> Self {
        RowBuilder { staged: Vec::new() }
    }
}

impl<X: TermValue> RowBuilder<X> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) -> &mut Self {
        self.staged.clear();
        self
    }

    pub fn add(&mut self, var: Var, value: X) -> &mut Self {
        match self.staged.binary_search_by(|(v, _)| v.cmp(&var)) {
            Ok(index) => self.staged[index].1 = value,
            Err(index) => self.staged.insert(index, (var, value)),
        }
        self
    }

    pub fn merge(&mut self, row: &Row<X>) -> &mut Self {
        for (var, value) in row.iter() {
            self.add(var.clone(), value.clone());
        }
        self
    }

    pub fn get(&self, var: &Var) -> Option<&X> {
        let index = self.staged.binary_search_by(|(v, _)| v.cmp(var)).ok()?;
        Some(&self.staged[index].1)
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn build(&self) -> Row<X> {
        Row { bindings: Arc::from(self.staged.as_slice()) }
    }
}

/// Union of two rows, or `None` when they disagree on a shared variable.
pub fn merge_rows<X: TermValue>(
    left: &Row<X>,
    right: &Row<X>,
    builder: &mut RowBuilder<X>,
) -> Option<Row<X>> {
    if !left.compatible(right) {
        return None;
    }
    if right.is_identity() {
        return Some(left.clone());
    }
    if left.is_identity() {
        return Some(right.clone());
    }
    Some(builder.reset().merge(left).merge(right).build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, u32)]) -> Row<u32> {
        let mut builder = RowBuilder::new();
        for (name, value) in pairs {
            builder.add(Var::new(name), *value);
        }
        builder.build()
    }

    #[test]
    fn test_identity_row() {
        let id: Row<u32> = Row::identity();
        assert!(id.is_identity());
        assert_eq!(id.vars().count(), 0);
        assert_eq!(id.to_string(), "()");
    }

    #[test]
    fn test_built_row_does_not_alias_builder() {
        let mut builder = RowBuilder::new();
        builder.add(Var::new("x"), 1u32);
        let first = builder.build();

        builder.reset().add(Var::new("x"), 2);
        let second = builder.build();

        assert_eq!(first.get(&Var::new("x")), Some(&1));
        assert_eq!(second.get(&Var::new("x")), Some(&2));
    }

    #[test]
    fn test_double_add_last_write_wins() {
        let mut builder = RowBuilder::new();
        builder.add(Var::new("x"), 1u32).add(Var::new("x"), 9);
        let row = builder.build();

        assert_eq!(row.len(), 1);
        assert_eq!(row.get(&Var::new("x")), Some(&9));
    }

    #[test]
    fn test_compatibility_is_symmetric() {
        let a = row(&[("x", 1), ("y", 2)]);
        let b = row(&[("y", 2), ("z", 3)]);
        let c = row(&[("y", 5)]);

        assert!(a.compatible(&b) && b.compatible(&a));
        assert!(!a.compatible(&c) && !c.compatible(&a));
    }

    #[test]
    fn test_merge_commutes() {
        let mut builder = RowBuilder::new();
        let a = row(&[("x", 1), ("y", 2)]);
        let b = row(&[("y", 2), ("z", 3)]);

        let ab = merge_rows(&a, &b, &mut builder).unwrap();
        let ba = merge_rows(&b, &a, &mut builder).unwrap();

        assert_eq!(ab, ba);
        assert!(ab.same_bindings(&ba));
        assert_eq!(ab.len(), 3);
    }

    #[test]
    fn test_equal_mappings_hash_alike() {
        let mut builder = RowBuilder::new();
        let xy = merge_rows(&row(&[("x", 1)]), &row(&[("y", 2)]), &mut builder).unwrap();
        let yx = merge_rows(&row(&[("y", 2)]), &row(&[("x", 1)]), &mut builder).unwrap();

        assert_eq!(xy, yx);
        assert_eq!(xy.to_string(), "(?x = 1 ?y = 2)");
        let set: std::collections::HashSet<Row<u32>> = [xy, yx].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_deserialize_goes_through_builder() {
        let deduped: Row<u32> = serde_json::from_str(r#"[["x", 1], ["x", 2]]"#).unwrap();
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped.vars().count(), 1);
        assert_eq!(deduped.get(&Var::new("x")), Some(&2));

        let shuffled: Row<u32> = serde_json::from_str(r#"[["?z", 3], ["a", 1]]"#).unwrap();
        assert_eq!(shuffled, row(&[("a", 1), ("z", 3)]));
        assert_eq!(serde_json::to_string(&shuffled).unwrap(), r#"[["a",1],["z",3]]"#);
    }

    #[test]
    fn test_merge_rejects_conflict() {
        let mut builder = RowBuilder::new();
        let a = row(&[("x", 1)]);
        let b = row(&[("x", 2)]);

        assert!(merge_rows(&a, &b, &mut builder).is_none());
        assert!(merge_rows(&b, &a, &mut builder).is_none());
    }

    #[test]
    fn test_merge_with_identity() {
        let mut builder = RowBuilder::new();
        let a = row(&[("x", 1)]);
        let merged = merge_rows(&Row::identity(), &a, &mut builder).unwrap();
        assert_eq!(merged, a);
    }
}
