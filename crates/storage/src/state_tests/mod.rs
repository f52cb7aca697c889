// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod idempotency;
mod query;

use super::*;
pub(super) use ji_core::test_support::{job_info_created_event, job_info_deleted_event};
use ji_core::{IndexedField, JobInfoId, NewJobInfo};

pub(super) fn created(id: &str, date_ms: u64, fields: NewJobInfo) -> Event {
    Event::JobInfoCreated {
        id: JobInfoId::from_string(id),
        date_ms,
        fields,
    }
}

// ── Basic CRUD ───────────────────────────────────────────────────────────────

#[test]
fn apply_event_create() {
    let mut state = MaterializedState::default();
    state.apply_event(&job_info_created_event("jin-1", 10, "pending"));

    assert_eq!(state.len(), 1);
    let info = state.get("jin-1").found().unwrap();
    assert_eq!(info.date_ms, 10);
    assert_eq!(info.status.as_deref(), Some("pending"));
}

#[test]
fn apply_event_delete() {
    let mut state = MaterializedState::default();
    state.apply_event(&job_info_created_event("jin-1", 10, "pending"));
    state.apply_event(&job_info_deleted_event("jin-1"));

    assert!(state.is_empty());
    assert_eq!(state.get("jin-1"), PrefixMatch::NotFound);
    assert_eq!(state.index.date_len(), 0);
    assert_eq!(state.index.field_value_count(IndexedField::Status), 0);
}

#[test]
fn delete_unknown_id_is_noop() {
    let mut state = MaterializedState::default();
    state.apply_event(&job_info_created_event("jin-1", 10, "pending"));
    state.apply_event(&job_info_deleted_event("jin-2"));
    assert_eq!(state.len(), 1);
}

#[test]
fn create_does_not_overwrite_existing_record() {
    let mut state = MaterializedState::default();
    state.apply_event(&job_info_created_event("jin-1", 10, "pending"));
    state.apply_event(&job_info_created_event("jin-1", 20, "success"));

    let info = state.get("jin-1").found().unwrap();
    assert_eq!(info.date_ms, 10);
    assert_eq!(info.status.as_deref(), Some("pending"));
    assert!(state.index.posting(IndexedField::Status, "success").is_none());
}

// ── Prefix lookup ─────────────────────────────────────────────────────────────

#[yare::parameterized(
    exact          = { "jin-abc111", true },
    full_prefix    = { "jin-abc1", true },
    suffix_prefix  = { "abc1", true },
    ambiguous      = { "abc", false },
    missing        = { "zzz", false },
)]
fn get_by_prefix(query: &str, found: bool) {
    let mut state = MaterializedState::default();
    state.apply_event(&job_info_created_event("jin-abc111", 1, "a"));
    state.apply_event(&job_info_created_event("jin-abc222", 2, "b"));

    let result = state.get(query).found();
    assert_eq!(result.is_some(), found);
    if let Some(info) = result {
        assert_eq!(info.id, "jin-abc111");
    }
}

#[test]
fn get_reports_ambiguity_count() {
    let mut state = MaterializedState::default();
    for n in 0..3 {
        state.apply_event(&job_info_created_event(&format!("jin-ab{n}"), n, "a"));
    }
    assert_eq!(state.get("ab"), PrefixMatch::Ambiguous(3));
}

// ── Serialization ─────────────────────────────────────────────────────────────

#[test]
fn serde_roundtrip_rebuilds_indexes() {
    let mut state = MaterializedState::default();
    state.apply_event(&created("jin-1", 5, NewJobInfo::new().corpus("urls").mapper("m")));
    state.apply_event(&created("jin-2", 6, NewJobInfo::new().corpus("urls")));

    let json = serde_json::to_value(&state).unwrap();
    assert!(json.get("index").is_none());

    let restored: MaterializedState = serde_json::from_value(json).unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.index.date_len(), 2);
    assert_eq!(
        restored.index.posting(IndexedField::Corpus, "urls").map(|p| p.len()),
        Some(2)
    );
    assert_eq!(
        restored.index.posting(IndexedField::Mapper, "m").map(|p| p.len()),
        Some(1)
    );
}

#[test]
fn deserializes_empty_object() {
    let state: MaterializedState = serde_json::from_str("{}").unwrap();
    assert!(state.is_empty());
}
