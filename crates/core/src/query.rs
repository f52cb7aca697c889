// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query description over job info records.

use crate::field::IndexedField;
use crate::job_info::JobInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result ordering by creation date. Ties break on record ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    #[default]
    Ascending,
    Descending,
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateOrder::Ascending => "asc",
            DateOrder::Descending => "desc",
        })
    }
}

/// Equality filters on indexed fields plus an optional date window.
///
/// Filters are conjunctive. The window is half-open: `since_ms <= date < until_ms`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub filters: Vec<(IndexedField, String)>,
    #[serde(default)]
    pub since_ms: Option<u64>,
    #[serde(default)]
    pub until_ms: Option<u64>,
    #[serde(default)]
    pub order: DateOrder,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl JobQuery {
    /// A query matching every record, oldest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// A query for a single equality filter.
    pub fn by_field(field: IndexedField, value: impl Into<String>) -> Self {
        Self::new().eq(field, value)
    }

    pub fn eq(mut self, field: IndexedField, value: impl Into<String>) -> Self {
        self.filters.push((field, value.into()));
        self
    }

    pub fn since(mut self, epoch_ms: u64) -> Self {
        self.since_ms = Some(epoch_ms);
        self
    }

    pub fn until(mut self, epoch_ms: u64) -> Self {
        self.until_ms = Some(epoch_ms);
        self
    }

    pub fn order(mut self, order: DateOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// True if the date lies inside the window.
    pub fn in_window(&self, date_ms: u64) -> bool {
        self.since_ms.map_or(true, |since| date_ms >= since)
            && self.until_ms.map_or(true, |until| date_ms < until)
    }

    /// True if the record satisfies every filter and the date window.
    ///
    /// Unset fields never match an equality filter.
    pub fn matches(&self, info: &JobInfo) -> bool {
        self.in_window(info.date_ms)
            && self
                .filters
                .iter()
                .all(|(field, value)| info.field(*field) == Some(value.as_str()))
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
