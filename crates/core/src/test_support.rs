// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Event, JobInfoId, NewJobInfo};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job info records.
pub mod strategies {
    use crate::{IndexedField, NewJobInfo};
    use proptest::prelude::*;

    /// Small value pool so generated records collide on field values often.
    pub fn arb_value() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("pending".to_string()),
            Just("success".to_string()),
            Just("failure".to_string()),
            Just("".to_string()),
            "[a-z0-9_./:-]{1,12}",
        ]
    }

    pub fn arb_field() -> impl Strategy<Value = IndexedField> {
        proptest::sample::select(IndexedField::ALL.to_vec())
    }

    /// Any subset of the seven fields, each with an arbitrary value.
    pub fn arb_new_job_info() -> impl Strategy<Value = NewJobInfo> {
        (
            proptest::option::of(arb_value()),
            proptest::option::of(arb_value()),
            proptest::option::of(arb_value()),
            proptest::option::of(arb_value()),
            proptest::option::of(arb_value()),
            proptest::option::of(arb_value()),
            proptest::option::of(arb_value()),
        )
            .prop_map(
                |(status, remote_addr, mapper, reducer, query, corpus, revision)| NewJobInfo {
                    status,
                    remote_addr,
                    mapper,
                    reducer,
                    query,
                    corpus,
                    revision,
                },
            )
    }
}

// ── Fixtures ───────────────────────────────────────────────────────────────

/// A fully populated record as the cloud mapper endpoint would log it.
pub fn sample_new_job_info() -> NewJobInfo {
    NewJobInfo::new()
        .status("pending")
        .remote_addr("127.0.0.1")
        .mapper("map_tracing_events")
        .reducer("reduce_counts")
        .query("MAX_TRACE_HANDLES=10")
        .corpus("https://performance-insights.appspot.com")
        .revision("HEAD")
}

pub fn job_info_created_event(id: &str, date_ms: u64, status: &str) -> Event {
    Event::JobInfoCreated {
        id: JobInfoId::from_string(id),
        date_ms,
        fields: NewJobInfo::new().status(status),
    }
}

pub fn job_info_deleted_event(id: &str) -> Event {
    Event::JobInfoDeleted {
        id: JobInfoId::from_string(id),
    }
}
