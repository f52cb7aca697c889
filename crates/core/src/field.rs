// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Indexed string fields of a job info record.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A string field of [`JobInfo`](crate::JobInfo) that supports equality lookups.
///
/// `date` is indexed too, but for ranges and ordering; it is queried through
/// [`JobQuery`](crate::JobQuery) bounds rather than through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexedField {
    Status,
    RemoteAddr,
    Mapper,
    Reducer,
    Query,
    Corpus,
    Revision,
}

impl IndexedField {
    pub const ALL: [IndexedField; 7] = [
        IndexedField::Status,
        IndexedField::RemoteAddr,
        IndexedField::Mapper,
        IndexedField::Reducer,
        IndexedField::Query,
        IndexedField::Corpus,
        IndexedField::Revision,
    ];

    /// The field's name as stored and as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            IndexedField::Status => "status",
            IndexedField::RemoteAddr => "remote_addr",
            IndexedField::Mapper => "mapper",
            IndexedField::Reducer => "reducer",
            IndexedField::Query => "query",
            IndexedField::Corpus => "corpus",
            IndexedField::Revision => "revision",
        }
    }
}

impl std::fmt::Display for IndexedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}' (expected one of: status, remote_addr, mapper, reducer, query, corpus, revision)")]
pub struct UnknownField(pub String);

impl FromStr for IndexedField {
    type Err = UnknownField;

    /// Accepts the stored name; `remote-addr` is accepted as an alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        IndexedField::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
