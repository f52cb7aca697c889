// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::snapshot::{load_snapshot, Snapshot};
use crate::state::MaterializedState;
use ji_core::Clock;
use std::io::Write;
use tempfile::tempdir;

fn open(dir: &std::path::Path, clock: &FakeClock) -> DurableStore<FakeClock> {
    DurableStore::open_with_clock(StorePaths::in_dir(dir), clock.clone()).unwrap()
}

#[test]
fn paths_layout() {
    let paths = StorePaths::in_dir("/var/lib/ji");
    assert_eq!(paths.wal_path, std::path::Path::new("/var/lib/ji/wal/events.wal"));
    assert_eq!(paths.snapshot_path, std::path::Path::new("/var/lib/ji/snapshot.zst"));
    assert_eq!(paths.lock_path, std::path::Path::new("/var/lib/ji/store.lock"));
}

#[test]
fn open_creates_state_dir() {
    let dir = tempdir().unwrap();
    let state_dir = dir.path().join("nested").join("state");
    let store = open(&state_dir, &FakeClock::new());

    assert!(store.is_empty());
    assert_eq!(store.state_dir(), state_dir);
    assert!(store.paths().wal_path.exists());
    assert!(store.paths().lock_path.exists());
}

#[test]
fn reopen_replays_wal() {
    let dir = tempdir().unwrap();
    let clock = FakeClock::new();
    let created = {
        let store = open(dir.path(), &clock);
        let a = store.create(sample_new_job_info()).unwrap();
        let b = store.create(NewJobInfo::new().status("failure")).unwrap();
        vec![a, b]
    };

    let store = open(dir.path(), &clock);
    assert_eq!(store.len(), 2);
    for info in &created {
        assert_eq!(store.get(info.id.as_str()).unwrap().as_ref(), Some(info));
    }
    assert_eq!(
        store.query_by_field(IndexedField::Status, "failure").unwrap(),
        vec![created[1].clone()]
    );
}

#[test]
fn write_after_torn_wal_tail_survives_reopen() {
    let dir = tempdir().unwrap();
    let clock = FakeClock::new();
    let (first, second) = {
        let store = open(dir.path(), &clock);
        let first = store.create(NewJobInfo::new().corpus("c1")).unwrap();
        let mut wal = std::fs::OpenOptions::new()
            .append(true)
            .open(&store.paths().wal_path)
            .unwrap();
        wal.write_all(br#"{"seq":2,"event":{"ty"#).unwrap();
        let second = store.create(NewJobInfo::new().corpus("c2")).unwrap();
        (first, second)
    };

    let store = open(dir.path(), &clock);
    assert_eq!(store.get(first.id.as_str()).unwrap(), Some(first));
    assert_eq!(store.get(second.id.as_str()).unwrap(), Some(second));
}

#[test]
fn reopen_after_prune_keeps_records_deleted() {
    let dir = tempdir().unwrap();
    let clock = FakeClock::new();
    let kept = {
        let store = open(dir.path(), &clock);
        clock.set_epoch_ms(100);
        store.create(NewJobInfo::new()).unwrap();
        clock.set_epoch_ms(200);
        let kept = store.create(NewJobInfo::new()).unwrap();
        assert_eq!(store.prune_before(200, false).unwrap().len(), 1);
        kept
    };

    let store = open(dir.path(), &clock);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(kept.id.as_str()).unwrap(), Some(kept));
}

#[test]
fn dry_run_prune_writes_nothing() {
    let dir = tempdir().unwrap();
    let clock = FakeClock::new();
    let store = open(dir.path(), &clock);
    store.create(NewJobInfo::new()).unwrap();
    let before = std::fs::read(&store.paths().wal_path).unwrap();

    clock.advance(Duration::from_secs(1));
    store.prune_before(clock.epoch_ms(), true).unwrap();

    assert_eq!(std::fs::read(&store.paths().wal_path).unwrap(), before);
}

#[test]
fn checkpoint_writes_snapshot_and_truncates_wal() {
    let dir = tempdir().unwrap();
    let store = open(dir.path(), &FakeClock::new());
    for _ in 0..3 {
        store.create(sample_new_job_info()).unwrap();
    }

    let result = store.checkpoint().unwrap();
    assert_eq!(result, CheckpointResult { seq: 3, records: 3 });

    let snapshot = load_snapshot(&store.paths().snapshot_path).unwrap().unwrap();
    assert_eq!(snapshot.seq, 3);
    assert_eq!(snapshot.state.len(), 3);
    assert_eq!(std::fs::metadata(&store.paths().wal_path).unwrap().len(), 0);
}

#[test]
fn reopen_from_snapshot_plus_wal_tail() {
    let dir = tempdir().unwrap();
    let clock = FakeClock::new();
    let (before, after) = {
        let store = open(dir.path(), &clock);
        let before = store.create(NewJobInfo::new().mapper("m1")).unwrap();
        store.checkpoint().unwrap();
        let after = store.create(NewJobInfo::new().mapper("m2")).unwrap();
        (before, after)
    };

    let store = open(dir.path(), &clock);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(before.id.as_str()).unwrap(), Some(before));
    assert_eq!(
        store.query_by_field(IndexedField::Mapper, "m2").unwrap(),
        vec![after]
    );

    // Sequence numbers continue past the snapshot
    assert_eq!(store.checkpoint().unwrap().seq, 2);
}

#[test]
fn replay_over_stale_snapshot_is_idempotent() {
    let dir = tempdir().unwrap();
    let clock = FakeClock::new();
    let paths = StorePaths::in_dir(dir.path());
    let created = {
        let store = open(dir.path(), &clock);
        store.create(sample_new_job_info()).unwrap()
    };

    // Snapshot covering the WAL entry without truncating it, as after a
    // crash between snapshot save and WAL truncation.
    let mut state = MaterializedState::default();
    state.apply_event(&ji_core::Event::created(&created));
    Snapshot::new(0, state).save(&paths.snapshot_path).unwrap();

    let store = open(dir.path(), &clock);
    assert_eq!(store.len(), 1);
    assert_eq!(store.query_by_field(IndexedField::Status, "pending").unwrap().len(), 1);
}

#[test]
fn torn_wal_tail_is_dropped_on_open() {
    let dir = tempdir().unwrap();
    let clock = FakeClock::new();
    let paths = StorePaths::in_dir(dir.path());
    let created = {
        let store = open(dir.path(), &clock);
        store.create(sample_new_job_info()).unwrap()
    };
    let mut wal = std::fs::OpenOptions::new()
        .append(true)
        .open(&paths.wal_path)
        .unwrap();
    wal.write_all(br#"{"seq":2,"event":{"type":"job_in"#).unwrap();
    drop(wal);

    let store = open(dir.path(), &clock);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(created.id.as_str()).unwrap(), Some(created));
    assert!(paths.wal_path.with_extension("bak").exists());

    // New writes land after the recovered prefix
    store.create(NewJobInfo::new()).unwrap();
    drop(store);
    assert_eq!(open(dir.path(), &clock).len(), 2);
}

#[test]
fn too_new_snapshot_fails_open() {
    let dir = tempdir().unwrap();
    let paths = StorePaths::in_dir(dir.path());
    let json = serde_json::json!({
        "v": 99,
        "seq": 0,
        "state": {},
        "created_at": "2026-01-01T00:00:00Z",
    });
    let bytes = zstd::encode_all(json.to_string().as_bytes(), 3).unwrap();
    std::fs::write(&paths.snapshot_path, bytes).unwrap();

    let err = DurableStore::open_with_clock(paths, FakeClock::new())
        .err()
        .unwrap();
    assert!(matches!(err, StoreError::Snapshot(_)), "{err}");
    assert!(err.to_string().contains("newer than supported"));
}
