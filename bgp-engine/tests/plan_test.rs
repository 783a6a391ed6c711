/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

extern crate bgp_engine;
use bgp_engine::access::AccessRows;
use bgp_engine::eng_lib::{convert_raw_tuples_to_rows, vars};
use bgp_engine::plan::Accessor;
use bgp_engine::{
    empty_row_list, hash_join, identity_row_list, merge_join, natural_order, nested_loop_join, star_join,
    substitution_join, EngineConfig, InMemoryStore, JoinKey, PhysicalPlan, PlanStep, PredicateObjectList, Row,
    RowBuilder, RowList, Slot, Step, Tuple, Var,
};
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    // Terms
    const ALICE: u32 = 1;
    const BOB: u32 = 2;
    const CAROL: u32 = 3;
    const ACME: u32 = 10;
    const KNOWS: u32 = 100;
    const WORKS_FOR: u32 = 101;
    const AGE: u32 = 102;

    fn social_graph() -> InMemoryStore<u32> {
        InMemoryStore::from_tuples(vec![
            Tuple::triple(ALICE, KNOWS, BOB),
            Tuple::triple(ALICE, KNOWS, CAROL),
            Tuple::triple(BOB, KNOWS, CAROL),
            Tuple::triple(ALICE, WORKS_FOR, ACME),
            Tuple::triple(CAROL, WORKS_FOR, ACME),
            Tuple::triple(ALICE, AGE, 30),
            Tuple::triple(BOB, AGE, 25),
            Tuple::triple(CAROL, AGE, 41),
        ])
        .unwrap()
    }

    fn pattern(s: Slot<u32>, p: u32, o: Slot<u32>) -> Tuple<Slot<u32>> {
        Tuple::triple(s, Slot::term(p), o)
    }

    fn scan<'a>(store: &'a InMemoryStore<u32>, pattern: &Tuple<Slot<u32>>) -> RowList<'a, u32> {
        convert_raw_tuples_to_rows(store.access_rows(pattern), pattern.clone(), RowBuilder::new())
    }

    fn canonical(rows: RowList<'_, u32>) -> Vec<Vec<(Var, u32)>> {
        let mut out: Vec<Vec<(Var, u32)>> = rows
            .map(|row| {
                let mut bindings: Vec<(Var, u32)> =
                    row.unwrap().iter().map(|(var, value)| (var.clone(), *value)).collect();
                bindings.sort();
                bindings
            })
            .collect();
        out.sort();
        out
    }

    fn value(row: &Row<u32>, name: &str) -> u32 {
        *row.get(&Var::new(name)).unwrap()
    }

    #[test]
    fn test_identity_laws() {
        let store = social_graph();
        let knows = pattern(Slot::var("x"), KNOWS, Slot::var("y"));
        let expected = canonical(scan(&store, &knows));
        assert_eq!(expected.len(), 3);

        let hashed = hash_join(JoinKey::empty(), identity_row_list(), scan(&store, &knows), RowBuilder::new());
        assert_eq!(hashed.vars(), &[Var::new("x"), Var::new("y")]);
        assert_eq!(canonical(hashed), expected);

        let looped = nested_loop_join(identity_row_list(), scan(&store, &knows), RowBuilder::new());
        assert_eq!(canonical(looped), expected);

        let substituted = substitution_join(identity_row_list(), knows.clone(), &store, RowBuilder::new());
        assert_eq!(canonical(substituted), expected);
    }

    #[test]
    fn test_empty_absorbs_every_algorithm() {
        let store = social_graph();
        let knows = pattern(Slot::var("x"), KNOWS, Slot::var("y"));
        let key = JoinKey::new(&[Var::new("x")], &vars(&knows));

        assert_eq!(hash_join(key.clone(), empty_row_list(), scan(&store, &knows), RowBuilder::new()).count(), 0);
        assert_eq!(hash_join(key.clone(), scan(&store, &knows), empty_row_list(), RowBuilder::new()).count(), 0);
        assert_eq!(nested_loop_join(empty_row_list(), scan(&store, &knows), RowBuilder::new()).count(), 0);
        assert_eq!(nested_loop_join(scan(&store, &knows), empty_row_list(), RowBuilder::new()).count(), 0);
        assert_eq!(
            merge_join(key.clone(), empty_row_list(), scan(&store, &knows), natural_order, RowBuilder::new()).count(),
            0
        );
        assert_eq!(
            merge_join(key, scan(&store, &knows), empty_row_list(), natural_order, RowBuilder::new()).count(),
            0
        );
        assert_eq!(substitution_join(empty_row_list(), knows, &store, RowBuilder::new()).count(), 0);

        let mut star = PredicateObjectList::new(Slot::var("x"));
        star.add(Slot::term(AGE), Slot::var("age"));
        assert_eq!(star_join(empty_row_list(), &star, &store, RowBuilder::new()).count(), 0);
    }

    #[test]
    fn test_friend_of_friend_plan() {
        let store: Accessor<u32> = Arc::new(social_graph());
        let mut plan = PhysicalPlan::new();
        plan.push(PlanStep::substitution_join(pattern(Slot::var("a"), KNOWS, Slot::var("b")), Arc::clone(&store)))
            .push(PlanStep::hash_join(pattern(Slot::var("b"), KNOWS, Slot::var("c")), Arc::clone(&store)))
            .push(PlanStep::inner_loop_join(pattern(Slot::var("c"), WORKS_FOR, Slot::term(ACME)), store));

        let rows = plan.evaluate().into_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(value(&rows[0], "a"), ALICE);
        assert_eq!(value(&rows[0], "b"), BOB);
        assert_eq!(value(&rows[0], "c"), CAROL);
    }

    #[test]
    fn test_star_step_in_plan() {
        let store: Accessor<u32> = Arc::new(social_graph());
        let mut employee = PredicateObjectList::new(Slot::var("p"));
        employee.add(Slot::term(WORKS_FOR), Slot::term(ACME));
        employee.add(Slot::term(AGE), Slot::var("age"));

        let plan: PhysicalPlan<u32> = vec![PlanStep::star_join(employee, store)].into_iter().collect();
        let mut ages: Vec<(u32, u32)> = plan
            .evaluate()
            .map(|row| {
                let row = row.unwrap();
                (value(&row, "p"), value(&row, "age"))
            })
            .collect();
        ages.sort_unstable();
        assert_eq!(ages, vec![(ALICE, 30), (CAROL, 41)]);
    }

    #[test]
    fn test_nested_plan_and_trace() {
        let store: Accessor<u32> = Arc::new(social_graph());
        let mut inner = PhysicalPlan::new();
        inner.push(PlanStep::substitution_join(pattern(Slot::var("x"), AGE, Slot::var("age")), Arc::clone(&store)));

        let mut plan = PhysicalPlan::new();
        plan.push(PlanStep::substitution_join(pattern(Slot::term(ALICE), KNOWS, Slot::var("x")), store))
            .push(PlanStep::Plan(inner));
        let plan = plan.prepare(&EngineConfig::default().with_trace_steps(true));
        assert_eq!(plan.len(), 4);

        let mut ages: Vec<u32> = plan.evaluate().map(|row| value(&row.unwrap(), "age")).collect();
        ages.sort_unstable();
        assert_eq!(ages, vec![25, 41]);
    }

    #[test]
    fn test_plan_with_nothing_short_circuits() {
        let store: Accessor<u32> = Arc::new(social_graph());
        let mut plan = PhysicalPlan::new();
        plan.push(PlanStep::hash_join(pattern(Slot::var("a"), KNOWS, Slot::var("b")), store));

        let mut dead = PhysicalPlan::new();
        dead.push(PlanStep::Identity).push(PlanStep::Nothing);
        plan.push(dead.into());

        assert!(plan.executes_to_nothing());
        assert_eq!(plan.execute(identity_row_list()).count(), 0);
    }

    #[test]
    fn test_patterns_from_json() {
        let pattern: Tuple<Slot<u32>> = serde_json::from_str(
            r#"{ "Triple": [ { "Variable": "?who" }, { "Term": 100 }, { "Term": 3 } ] }"#,
        )
        .unwrap();
        assert_eq!(pattern.subject().as_var(), Some(&Var::new("who")));

        let store = social_graph();
        let mut who: Vec<u32> = substitution_join(identity_row_list(), pattern, &store, RowBuilder::new())
            .map(|row| value(&row.unwrap(), "who"))
            .collect();
        who.sort_unstable();
        assert_eq!(who, vec![ALICE, BOB]);

        let mut star = PredicateObjectList::new(Slot::var("s"));
        star.add(Slot::term(KNOWS), Slot::var("o"));
        star.add(Slot::term(KNOWS), Slot::var("o2"));
        let text = serde_json::to_string(&star).unwrap();
        let back: PredicateObjectList<u32> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, star);
        assert!(back.multiple_same_predicate());
    }
}
