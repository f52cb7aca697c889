// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Volatile store for tests and embedding.

use super::{lookup, query_owned, JobInfoStore, StoreError};
use crate::state::MaterializedState;
use ji_core::{Clock, Event, JobInfo, JobInfoId, JobQuery, NewJobInfo, SystemClock};
use parking_lot::Mutex;

pub struct MemoryStore<C: Clock = SystemClock> {
    state: Mutex<MaterializedState>,
    clock: C,
}

impl MemoryStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Mutex::new(MaterializedState::default()),
            clock,
        }
    }
}

impl<C: Clock> JobInfoStore for MemoryStore<C> {
    fn create(&self, info: NewJobInfo) -> Result<JobInfo, StoreError> {
        let record = info.into_record(JobInfoId::new(), &self.clock);
        self.state.lock().apply_event(&Event::created(&record));
        Ok(record)
    }

    fn get(&self, id: &str) -> Result<Option<JobInfo>, StoreError> {
        lookup(&self.state.lock(), id)
    }

    fn query(&self, query: &JobQuery) -> Result<Vec<JobInfo>, StoreError> {
        Ok(query_owned(&self.state.lock(), query))
    }

    fn len(&self) -> usize {
        self.state.lock().len()
    }

    fn prune_before(&self, cutoff_ms: u64, dry_run: bool) -> Result<Vec<JobInfo>, StoreError> {
        let mut state = self.state.lock();
        let pruned: Vec<JobInfo> = state.older_than(cutoff_ms).into_iter().cloned().collect();
        if !dry_run {
            for info in &pruned {
                state.apply_event(&Event::JobInfoDeleted {
                    id: info.id.clone(),
                });
            }
        }
        Ok(pruned)
    }
}
