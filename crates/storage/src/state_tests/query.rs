// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ji_core::test_support::strategies::*;
use ji_core::{DateOrder, JobQuery};
use proptest::prelude::*;

fn ids(rows: &[&JobInfo]) -> Vec<String> {
    rows.iter().map(|r| r.id.to_string()).collect()
}

/// jin-1..jin-5 at dates 10..50; odd ones succeeded.
fn seeded() -> MaterializedState {
    let mut state = MaterializedState::default();
    for n in 1..=5u64 {
        let status = if n % 2 == 1 { "success" } else { "failure" };
        state.apply_event(&created(
            &format!("jin-{n}"),
            n * 10,
            NewJobInfo::new().status(status).corpus("urls"),
        ));
    }
    state
}

#[test]
fn unfiltered_query_is_date_ordered() {
    let state = seeded();
    assert_eq!(
        ids(&state.query(&JobQuery::new())),
        ["jin-1", "jin-2", "jin-3", "jin-4", "jin-5"]
    );
    assert_eq!(
        ids(&state.query(&JobQuery::new().order(DateOrder::Descending).limit(2))),
        ["jin-5", "jin-4"]
    );
}

#[test]
fn equality_query_returns_exact_matches() {
    let state = seeded();
    let q = JobQuery::by_field(IndexedField::Status, "success");
    assert_eq!(ids(&state.query(&q)), ["jin-1", "jin-3", "jin-5"]);
}

#[test]
fn conjunctive_query_with_window() {
    let state = seeded();
    let q = JobQuery::new()
        .eq(IndexedField::Corpus, "urls")
        .eq(IndexedField::Status, "success")
        .since(20)
        .until(50)
        .order(DateOrder::Descending);
    assert_eq!(ids(&state.query(&q)), ["jin-3"]);
}

#[test]
fn unknown_value_returns_nothing() {
    let state = seeded();
    assert!(state.query(&JobQuery::by_field(IndexedField::Status, "pending")).is_empty());
    let q = JobQuery::by_field(IndexedField::Corpus, "urls").eq(IndexedField::Mapper, "m");
    assert!(state.query(&q).is_empty());
}

#[yare::parameterized(
    since_only    = { Some(30), None,     vec!["jin-3", "jin-4", "jin-5"] },
    until_only    = { None,     Some(30), vec!["jin-1", "jin-2"] },
    both          = { Some(20), Some(40), vec!["jin-2", "jin-3"] },
    empty_window  = { Some(30), Some(30), vec![] },
    inverted      = { Some(40), Some(20), vec![] },
    past_the_end  = { Some(60), None,     vec![] },
)]
fn date_window(since: Option<u64>, until: Option<u64>, expected: Vec<&str>) {
    let state = seeded();
    let q = JobQuery {
        since_ms: since,
        until_ms: until,
        ..JobQuery::default()
    };
    assert_eq!(ids(&state.query(&q)), expected);
}

#[test]
fn equal_dates_tie_break_on_id() {
    let mut state = MaterializedState::default();
    for id in ["jin-b", "jin-a", "jin-c"] {
        state.apply_event(&created(id, 7, NewJobInfo::new().status("x")));
    }
    assert_eq!(ids(&state.query(&JobQuery::new())), ["jin-a", "jin-b", "jin-c"]);
    assert_eq!(
        ids(&state.query(&JobQuery::by_field(IndexedField::Status, "x"))),
        ["jin-a", "jin-b", "jin-c"]
    );
}

#[test]
fn older_than_excludes_cutoff() {
    let state = seeded();
    assert_eq!(ids(&state.older_than(30)), ["jin-1", "jin-2"]);
}

proptest! {
    /// The indexed path agrees with a full scan for every field and value.
    #[test]
    fn index_matches_full_scan(
        infos in proptest::collection::vec(arb_new_job_info(), 0..20),
        field in arb_field(),
        value in arb_value(),
    ) {
        let mut state = MaterializedState::default();
        for (n, info) in infos.iter().enumerate() {
            state.apply_event(&created(&format!("jin-{n:03}"), n as u64, info.clone()));
        }

        let got = ids(&state.query(&JobQuery::by_field(field, value.clone())));
        let expected: Vec<String> = infos
            .iter()
            .enumerate()
            .filter(|(_, info)| {
                (*info).clone().into_record_at(JobInfoId::new(), 0).field(field) == Some(value.as_str())
            })
            .map(|(n, _)| format!("jin-{n:03}"))
            .collect();
        prop_assert_eq!(got, expected);
    }
}
