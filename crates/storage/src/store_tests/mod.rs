// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod durable;

use super::*;
use ji_core::test_support::sample_new_job_info;
use ji_core::{status, DateOrder, FakeClock};
use std::time::Duration;
use tempfile::TempDir;

type Case = (&'static str, Box<dyn JobInfoStore>, FakeClock, Option<TempDir>);

/// Both store kinds behind the trait, each with its own controllable clock.
fn stores() -> Vec<Case> {
    let memory_clock = FakeClock::new();
    let memory: Box<dyn JobInfoStore> = Box::new(MemoryStore::with_clock(memory_clock.clone()));

    let durable_clock = FakeClock::new();
    let dir = tempfile::tempdir().unwrap();
    let durable: Box<dyn JobInfoStore> = Box::new(
        DurableStore::open_with_clock(StorePaths::in_dir(dir.path()), durable_clock.clone())
            .unwrap(),
    );

    vec![
        ("memory", memory, memory_clock, None),
        ("durable", durable, durable_clock, Some(dir)),
    ]
}

#[test]
fn create_then_get_returns_same_record() {
    for (kind, store, _, _dir) in stores() {
        let created = store.create(sample_new_job_info()).unwrap();
        let fetched = store.get(created.id.as_str()).unwrap();
        assert_eq!(fetched.as_ref(), Some(&created), "{kind}");
    }
}

#[test]
fn create_stamps_date_from_clock() {
    for (kind, store, clock, _dir) in stores() {
        clock.set_epoch_ms(1_700_000_000_000);
        let created = store.create(NewJobInfo::new().status(status::PENDING)).unwrap();
        assert_eq!(created.date_ms, 1_700_000_000_000, "{kind}");
        assert!(created.id.as_str().starts_with("jin-"), "{kind}");
    }
}

#[test]
fn identical_fields_get_distinct_ids() {
    for (kind, store, _, _dir) in stores() {
        let a = store.create(sample_new_job_info()).unwrap();
        let b = store.create(sample_new_job_info()).unwrap();
        assert_ne!(a.id, b.id, "{kind}");
        assert_eq!(store.len(), 2, "{kind}");
    }
}

#[test]
fn create_with_no_fields() {
    for (kind, store, _, _dir) in stores() {
        let created = store.create(NewJobInfo::new()).unwrap();
        assert_eq!(created.fields(), NewJobInfo::new(), "{kind}");
        assert!(store.get(created.id.as_str()).unwrap().is_some(), "{kind}");
    }
}

#[test]
fn get_unknown_id_is_none() {
    for (kind, store, _, _dir) in stores() {
        store.create(sample_new_job_info()).unwrap();
        assert_eq!(store.get("jin-missing").unwrap(), None, "{kind}");
        assert_eq!(store.get("").unwrap(), None, "{kind}");
    }
}

#[test]
fn get_by_unique_prefix() {
    for (kind, store, _, _dir) in stores() {
        let created = store.create(sample_new_job_info()).unwrap();
        let prefix = &created.id.as_str()[..8];
        assert_eq!(store.get(prefix).unwrap(), Some(created), "{kind}");
    }
}

#[test]
fn ambiguous_prefix_is_an_error() {
    for (kind, store, _, _dir) in stores() {
        store.create(NewJobInfo::new()).unwrap();
        store.create(NewJobInfo::new()).unwrap();
        let err = store.get("jin-").unwrap_err();
        assert!(
            matches!(err, StoreError::AmbiguousId { count: 2, .. }),
            "{kind}: {err}"
        );
    }
}

#[test]
fn query_by_field_is_exact_match() {
    for (kind, store, clock, _dir) in stores() {
        let ok = store.create(NewJobInfo::new().status("success")).unwrap();
        clock.advance(Duration::from_millis(1));
        store.create(NewJobInfo::new().status("Success")).unwrap();
        store.create(NewJobInfo::new().status("success ")).unwrap();
        store.create(NewJobInfo::new().mapper("success")).unwrap();

        let found = store.query_by_field(IndexedField::Status, "success").unwrap();
        assert_eq!(found, vec![ok], "{kind}");
    }
}

#[test]
fn query_by_field_without_matches_is_empty() {
    for (kind, store, _, _dir) in stores() {
        store.create(sample_new_job_info()).unwrap();
        let found = store.query_by_field(IndexedField::Revision, "deadbeef").unwrap();
        assert!(found.is_empty(), "{kind}");
    }
}

#[test]
fn query_by_field_orders_oldest_first() {
    for (kind, store, clock, _dir) in stores() {
        let mut expected = Vec::new();
        for _ in 0..3 {
            expected.push(store.create(NewJobInfo::new().corpus("c")).unwrap().id);
            clock.advance(Duration::from_secs(1));
        }
        let ids: Vec<_> = store
            .query_by_field(IndexedField::Corpus, "c")
            .unwrap()
            .into_iter()
            .map(|info| info.id)
            .collect();
        assert_eq!(ids, expected, "{kind}");
    }
}

#[test]
fn query_with_window_order_and_limit() {
    for (kind, store, clock, _dir) in stores() {
        for ms in [100, 200, 300, 400] {
            clock.set_epoch_ms(ms);
            store.create(NewJobInfo::new().reducer("r")).unwrap();
        }
        let query = JobQuery::by_field(IndexedField::Reducer, "r")
            .since(200)
            .until(400)
            .order(DateOrder::Descending)
            .limit(1);
        let dates: Vec<u64> = store
            .query(&query)
            .unwrap()
            .iter()
            .map(|info| info.date_ms)
            .collect();
        assert_eq!(dates, vec![300], "{kind}");
    }
}

#[test]
fn records_are_immutable_through_returned_copies() {
    for (kind, store, _, _dir) in stores() {
        let mut created = store.create(NewJobInfo::new().status("pending")).unwrap();
        created.status = Some("success".into());

        let stored = store.get(created.id.as_str()).unwrap().unwrap();
        assert_eq!(stored.status.as_deref(), Some("pending"), "{kind}");
        assert!(store
            .query_by_field(IndexedField::Status, "success")
            .unwrap()
            .is_empty());
    }
}

#[test]
fn prune_before_removes_older_records() {
    for (kind, store, clock, _dir) in stores() {
        clock.set_epoch_ms(1_000);
        let old = store.create(NewJobInfo::new().status("success")).unwrap();
        clock.set_epoch_ms(5_000);
        let new = store.create(NewJobInfo::new().status("success")).unwrap();

        let pruned = store.prune_before(5_000, false).unwrap();
        assert_eq!(pruned, vec![old.clone()], "{kind}");
        assert_eq!(store.get(old.id.as_str()).unwrap(), None, "{kind}");
        assert_eq!(
            store.query_by_field(IndexedField::Status, "success").unwrap(),
            vec![new],
            "{kind}"
        );
    }
}

#[test]
fn prune_before_dry_run_keeps_records() {
    for (kind, store, clock, _dir) in stores() {
        clock.set_epoch_ms(1_000);
        store.create(NewJobInfo::new()).unwrap();

        let pruned = store.prune_before(2_000, true).unwrap();
        assert_eq!(pruned.len(), 1, "{kind}");
        assert_eq!(store.len(), 1, "{kind}");
    }
}

#[test]
fn is_empty_tracks_len() {
    for (kind, store, _, _dir) in stores() {
        assert!(store.is_empty(), "{kind}");
        store.create(NewJobInfo::new()).unwrap();
        assert!(!store.is_empty(), "{kind}");
    }
}
