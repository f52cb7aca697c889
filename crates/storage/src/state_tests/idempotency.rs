// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ji_core::JobQuery;

fn snapshot_json(state: &MaterializedState) -> serde_json::Value {
    serde_json::to_value(state).unwrap()
}

#[yare::parameterized(
    create = { job_info_created_event("jin-1", 1, "pending") },
    delete = { job_info_deleted_event("jin-1") },
)]
fn applying_twice_equals_applying_once(event: Event) {
    let mut once = MaterializedState::default();
    once.apply_event(&job_info_created_event("jin-1", 1, "pending"));
    let mut twice = once.clone();

    once.apply_event(&event);
    twice.apply_event(&event);
    twice.apply_event(&event);

    assert_eq!(snapshot_json(&once), snapshot_json(&twice));
    assert_eq!(
        once.query(&JobQuery::new()).len(),
        twice.query(&JobQuery::new()).len()
    );
}

#[test]
fn replaying_full_log_over_snapshot_is_stable() {
    let events = vec![
        job_info_created_event("jin-1", 1, "pending"),
        job_info_created_event("jin-2", 2, "success"),
        job_info_deleted_event("jin-1"),
        job_info_created_event("jin-3", 3, "success"),
    ];

    let mut state = MaterializedState::default();
    for event in &events {
        state.apply_event(event);
    }
    let expected = snapshot_json(&state);

    // Replay everything again, as if the WAL had not been truncated
    for event in &events {
        state.apply_event(event);
    }
    // The replayed create of jin-1 resurrects it; the replayed delete removes it again
    assert_eq!(snapshot_json(&state), expected);
    assert_eq!(
        state.query(&JobQuery::by_field(IndexedField::Status, "success")).len(),
        2
    );
}
