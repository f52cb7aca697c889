// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keyed stores for job info records.

mod durable;
mod memory;

pub use durable::{CheckpointResult, DurableStore, StorePaths};
pub use memory::MemoryStore;

use crate::snapshot::SnapshotError;
use crate::state::{MaterializedState, PrefixMatch};
use crate::wal::WalError;
use ji_core::{IndexedField, JobInfo, JobQuery, NewJobInfo};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("WAL error: {0}")]
    Wal(#[from] WalError),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("id '{prefix}' is ambiguous ({count} records match)")]
    AmbiguousId { prefix: String, count: usize },
}

/// Create, look up, and query job info records.
///
/// Every write is atomic: a record is either fully visible to readers with
/// its id and date assigned, or absent.
pub trait JobInfoStore: Send + Sync {
    /// Persist a new record, assigning its id and creation date.
    fn create(&self, info: NewJobInfo) -> Result<JobInfo, StoreError>;

    /// Look up by exact id or unique id prefix.
    fn get(&self, id: &str) -> Result<Option<JobInfo>, StoreError>;

    fn query(&self, query: &JobQuery) -> Result<Vec<JobInfo>, StoreError>;

    /// Records whose `field` equals `value` exactly, oldest first.
    fn query_by_field(&self, field: IndexedField, value: &str) -> Result<Vec<JobInfo>, StoreError> {
        self.query(&JobQuery::by_field(field, value))
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retention cleanup: remove records created before `cutoff_ms`.
    ///
    /// With `dry_run`, nothing is removed. Returns the affected records,
    /// oldest first. This is a storage policy, not a record operation.
    fn prune_before(&self, cutoff_ms: u64, dry_run: bool) -> Result<Vec<JobInfo>, StoreError>;
}

/// Resolve an id against the state, turning ambiguity into an error.
fn lookup(state: &MaterializedState, id: &str) -> Result<Option<JobInfo>, StoreError> {
    match state.get(id) {
        PrefixMatch::Found(info) => Ok(Some(info.clone())),
        PrefixMatch::NotFound => Ok(None),
        PrefixMatch::Ambiguous(count) => Err(StoreError::AmbiguousId {
            prefix: id.to_string(),
            count,
        }),
    }
}

fn query_owned(state: &MaterializedState, query: &JobQuery) -> Vec<JobInfo> {
    state.query(query).into_iter().cloned().collect()
}

#[cfg(test)]
#[path = "../store_tests/mod.rs"]
mod tests;
