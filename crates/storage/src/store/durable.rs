// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable store: WAL for every write, snapshot for checkpoints.

use super::{lookup, query_owned, JobInfoStore, StoreError};
use crate::snapshot::{load_snapshot, Snapshot};
use crate::state::MaterializedState;
use crate::wal::Wal;
use fs2::FileExt;
use ji_core::{Clock, Event, JobInfo, JobInfoId, JobQuery, NewJobInfo, SystemClock};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;

/// File layout of a store inside its state directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub state_dir: PathBuf,
    pub wal_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub lock_path: PathBuf,
}

impl StorePaths {
    pub fn in_dir(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            wal_path: state_dir.join("wal").join("events.wal"),
            snapshot_path: state_dir.join("snapshot.zst"),
            lock_path: state_dir.join("store.lock"),
            state_dir,
        }
    }
}

/// Outcome of [`DurableStore::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointResult {
    /// WAL sequence covered by the snapshot
    pub seq: u64,
    /// Records in the snapshot
    pub records: usize,
}

struct Inner {
    state: MaterializedState,
    wal: Wal,
}

impl Inner {
    /// Make events durable, then apply them. On a WAL failure nothing is applied.
    fn commit(&mut self, events: &[Event]) -> Result<(), StoreError> {
        let written = events
            .iter()
            .try_for_each(|event| self.wal.append(event).map(|_| ()))
            .and_then(|()| self.wal.flush());
        if let Err(e) = written {
            self.wal.discard_unflushed();
            return Err(e.into());
        }
        for event in events {
            self.state.apply_event(event);
        }
        Ok(())
    }
}

pub struct DurableStore<C: Clock = SystemClock> {
    paths: StorePaths,
    inner: Mutex<Inner>,
    clock: C,
    // Exclusive lock on `store.lock`, released on drop
    #[allow(dead_code)]
    lock_file: File,
}

impl DurableStore<SystemClock> {
    pub fn open(paths: StorePaths) -> Result<Self, StoreError> {
        Self::open_with_clock(paths, SystemClock)
    }
}

impl<C: Clock> DurableStore<C> {
    /// Open the store, recovering state from the snapshot and WAL.
    ///
    /// Blocks until no other process holds the store's lock.
    pub fn open_with_clock(paths: StorePaths, clock: C) -> Result<Self, StoreError> {
        fs::create_dir_all(&paths.state_dir)?;
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&paths.lock_path)?;
        lock_file.lock_exclusive()?;

        let (state, wal) = recover(&paths)?;
        Ok(Self {
            paths,
            inner: Mutex::new(Inner { state, wal }),
            clock,
            lock_file,
        })
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn state_dir(&self) -> &Path {
        &self.paths.state_dir
    }

    /// Snapshot the current state and drop the WAL entries it covers.
    pub fn checkpoint(&self) -> Result<CheckpointResult, StoreError> {
        let mut inner = self.inner.lock();
        inner.wal.flush()?;
        let seq = inner.wal.write_seq();
        Snapshot::new(seq, inner.state.clone()).save(&self.paths.snapshot_path)?;
        // A crash before truncation only leaves entries that replay idempotently
        inner.wal.truncate_before(seq + 1)?;
        let result = CheckpointResult {
            seq,
            records: inner.state.len(),
        };
        info!(seq, records = result.records, "checkpoint complete");
        Ok(result)
    }
}

/// Rebuild state from the snapshot, then the WAL entries written after it.
fn recover(paths: &StorePaths) -> Result<(MaterializedState, Wal), StoreError> {
    let (mut state, snapshot_seq) = load_snapshot(&paths.snapshot_path)?
        .map(|snapshot| (snapshot.state, snapshot.seq))
        .unwrap_or_default();

    let wal = Wal::open(&paths.wal_path, snapshot_seq)?;
    let replayed = wal.entries_after(snapshot_seq)?;
    for entry in &replayed {
        state.apply_event(&entry.event);
    }
    info!(
        snapshot_seq,
        replayed = replayed.len(),
        records = state.len(),
        state_dir = %paths.state_dir.display(),
        "recovered store"
    );
    Ok((state, wal))
}

impl<C: Clock> JobInfoStore for DurableStore<C> {
    fn create(&self, info: NewJobInfo) -> Result<JobInfo, StoreError> {
        let mut inner = self.inner.lock();
        let record = info.into_record(JobInfoId::new(), &self.clock);
        inner.commit(&[Event::created(&record)])?;
        Ok(record)
    }

    fn get(&self, id: &str) -> Result<Option<JobInfo>, StoreError> {
        lookup(&self.inner.lock().state, id)
    }

    fn query(&self, query: &JobQuery) -> Result<Vec<JobInfo>, StoreError> {
        Ok(query_owned(&self.inner.lock().state, query))
    }

    fn len(&self) -> usize {
        self.inner.lock().state.len()
    }

    fn prune_before(&self, cutoff_ms: u64, dry_run: bool) -> Result<Vec<JobInfo>, StoreError> {
        let mut inner = self.inner.lock();
        let pruned: Vec<JobInfo> = inner
            .state
            .older_than(cutoff_ms)
            .into_iter()
            .cloned()
            .collect();
        if dry_run || pruned.is_empty() {
            return Ok(pruned);
        }
        let events: Vec<Event> = pruned
            .iter()
            .map(|info| Event::JobInfoDeleted {
                id: info.id.clone(),
            })
            .collect();
        inner.commit(&events)?;
        info!(count = pruned.len(), cutoff_ms, "pruned job infos");
        Ok(pruned)
    }
}
