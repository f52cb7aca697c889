// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state from WAL replay

mod helpers;
mod index;
mod job_infos;

pub use helpers::PrefixMatch;

use index::Index;
use ji_core::{DateOrder, Event, JobInfo, JobInfoId, JobQuery};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Materialized state built from WAL operations
///
/// Secondary indexes are not persisted; they are rebuilt whenever the state
/// is deserialized from a snapshot.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(from = "PersistedState")]
pub struct MaterializedState {
    job_infos: HashMap<String, JobInfo>,
    #[serde(skip)]
    index: Index,
}

/// On-disk shape of [`MaterializedState`].
#[derive(Deserialize)]
struct PersistedState {
    #[serde(default)]
    job_infos: HashMap<String, JobInfo>,
}

impl From<PersistedState> for MaterializedState {
    fn from(persisted: PersistedState) -> Self {
        let mut index = Index::default();
        for info in persisted.job_infos.values() {
            index.insert(info);
        }
        Self {
            job_infos: persisted.job_infos,
            index,
        }
    }
}

impl MaterializedState {
    pub fn len(&self) -> usize {
        self.job_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.job_infos.is_empty()
    }

    /// Get a record by ID or unique prefix (like git commit hashes)
    pub fn get(&self, id: &str) -> PrefixMatch<'_, JobInfo> {
        helpers::find_by_prefix(&self.job_infos, id)
    }

    /// Evaluate a query using the secondary indexes.
    pub fn query(&self, query: &JobQuery) -> Vec<&JobInfo> {
        let limit = query.limit.unwrap_or(usize::MAX);

        // Without equality filters the date index yields rows already in order.
        if query.filters.is_empty() {
            let keys = self.index.date_range(query.since_ms, query.until_ms);
            let lookup = |(_, id): &(u64, JobInfoId)| self.job_infos.get(id.as_str());
            return match query.order {
                DateOrder::Ascending => keys.filter_map(lookup).take(limit).collect(),
                DateOrder::Descending => keys.rev().filter_map(lookup).take(limit).collect(),
            };
        }

        let Some(candidates) = self.index.smallest_posting(&query.filters) else {
            return Vec::new();
        };
        let mut rows: Vec<&JobInfo> = candidates
            .iter()
            .filter_map(|id| self.job_infos.get(id.as_str()))
            .filter(|info| query.matches(info))
            .collect();
        rows.sort_by(|a, b| (a.date_ms, &a.id).cmp(&(b.date_ms, &b.id)));
        if query.order == DateOrder::Descending {
            rows.reverse();
        }
        rows.truncate(limit);
        rows
    }

    /// Records created strictly before `cutoff_ms`, oldest first.
    pub fn older_than(&self, cutoff_ms: u64) -> Vec<&JobInfo> {
        self.query(&JobQuery::new().until(cutoff_ms))
    }

    /// Apply an event to derive state changes.
    ///
    /// # Idempotency Requirement
    ///
    /// Applying the same event twice must produce the same state as applying
    /// it once: WAL replay after a checkpoint may see events whose effects
    /// are already in the snapshot.
    pub fn apply_event(&mut self, event: &Event) {
        tracing::debug!("apply {}", event.log_summary());
        match event {
            Event::JobInfoCreated { .. } | Event::JobInfoDeleted { .. } => {
                job_infos::apply(self, event)
            }
        }
    }
}

#[cfg(test)]
#[path = "../state_tests/mod.rs"]
mod tests;
