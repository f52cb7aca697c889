// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job info record: metadata logged about a mapper/reducer job run.

use crate::clock::Clock;
use crate::field::IndexedField;
use serde::{Deserialize, Serialize};

pub use crate::id::JobInfoId;

/// Well-known values for [`JobInfo::status`]. Any string is accepted.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const RUNNING: &str = "running";
    pub const SUCCESS: &str = "success";
    pub const FAILURE: &str = "failure";
}

/// Fields supplied by the caller when logging a job.
///
/// Carries no date; the store stamps it on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJobInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reducer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl NewJobInfo {
    pub fn new() -> Self {
        Self::default()
    }

    crate::optional_setters! {
        status: String,
        remote_addr: String,
        mapper: String,
        reducer: String,
        query: String,
        corpus: String,
        revision: String,
    }

    /// Set an indexed field by name. Used where the field is chosen at runtime.
    pub fn with_field(mut self, field: IndexedField, value: impl Into<String>) -> Self {
        let slot = match field {
            IndexedField::Status => &mut self.status,
            IndexedField::RemoteAddr => &mut self.remote_addr,
            IndexedField::Mapper => &mut self.mapper,
            IndexedField::Reducer => &mut self.reducer,
            IndexedField::Query => &mut self.query,
            IndexedField::Corpus => &mut self.corpus,
            IndexedField::Revision => &mut self.revision,
        };
        *slot = Some(value.into());
        self
    }

    /// Stamp the record with its identity and creation time.
    ///
    /// Only stores call this; the clock is read exactly once.
    pub fn into_record(self, id: JobInfoId, clock: &impl Clock) -> JobInfo {
        self.into_record_at(id, clock.epoch_ms())
    }

    /// Stamp with an already-known creation time (WAL replay).
    pub fn into_record_at(self, id: JobInfoId, date_ms: u64) -> JobInfo {
        JobInfo {
            id,
            date_ms,
            status: self.status,
            remote_addr: self.remote_addr,
            mapper: self.mapper,
            reducer: self.reducer,
            query: self.query,
            corpus: self.corpus,
            revision: self.revision,
        }
    }
}

/// A persisted job info record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    pub id: JobInfoId,
    /// Creation time in epoch milliseconds, assigned by the store.
    pub date_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reducer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

/// Test builder for stored records, with fixed id and date defaults.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone)]
pub struct JobInfoBuilder {
    id: JobInfoId,
    date_ms: u64,
    status: Option<String>,
    remote_addr: Option<String>,
    mapper: Option<String>,
    reducer: Option<String>,
    query: Option<String>,
    corpus: Option<String>,
    revision: Option<String>,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for JobInfoBuilder {
    fn default() -> Self {
        Self {
            id: JobInfoId::from_string("jin-test"),
            date_ms: 1_000_000,
            status: None,
            remote_addr: None,
            mapper: None,
            reducer: None,
            query: None,
            corpus: None,
            revision: None,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl JobInfoBuilder {
    pub fn id(mut self, id: impl Into<JobInfoId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn date_ms(mut self, date_ms: u64) -> Self {
        self.date_ms = date_ms;
        self
    }

    crate::optional_setters! {
        status: String,
        remote_addr: String,
        mapper: String,
        reducer: String,
        query: String,
        corpus: String,
        revision: String,
    }

    pub fn build(self) -> JobInfo {
        NewJobInfo {
            status: self.status,
            remote_addr: self.remote_addr,
            mapper: self.mapper,
            reducer: self.reducer,
            query: self.query,
            corpus: self.corpus,
            revision: self.revision,
        }
        .into_record_at(self.id, self.date_ms)
    }
}

impl JobInfo {
    /// Create a builder with test defaults.
    #[cfg(any(test, feature = "test-support"))]
    pub fn builder() -> JobInfoBuilder {
        JobInfoBuilder::default()
    }

    /// Kind name of the entity, as the record is known to its consumers.
    pub const KIND: &'static str = "JobInfo";

    /// Read an indexed string field.
    pub fn field(&self, field: IndexedField) -> Option<&str> {
        match field {
            IndexedField::Status => self.status.as_deref(),
            IndexedField::RemoteAddr => self.remote_addr.as_deref(),
            IndexedField::Mapper => self.mapper.as_deref(),
            IndexedField::Reducer => self.reducer.as_deref(),
            IndexedField::Query => self.query.as_deref(),
            IndexedField::Corpus => self.corpus.as_deref(),
            IndexedField::Revision => self.revision.as_deref(),
        }
    }

    /// Iterate over the indexed fields that are set, in declaration order.
    pub fn indexed_values(&self) -> impl Iterator<Item = (IndexedField, &str)> + '_ {
        IndexedField::ALL
            .into_iter()
            .filter_map(move |f| self.field(f).map(|v| (f, v)))
    }

    /// The caller-supplied part of the record.
    pub fn fields(&self) -> NewJobInfo {
        NewJobInfo {
            status: self.status.clone(),
            remote_addr: self.remote_addr.clone(),
            mapper: self.mapper.clone(),
            reducer: self.reducer.clone(),
            query: self.query.clone(),
            corpus: self.corpus.clone(),
            revision: self.revision.clone(),
        }
    }
}

#[cfg(test)]
#[path = "job_info_tests.rs"]
mod tests;
