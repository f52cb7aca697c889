// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod compact;
pub mod create;
pub mod list;
pub mod prune;
pub mod show;

use clap::Args;
use ji_core::{IndexedField, JobQuery, NewJobInfo};

/// One optional flag per indexed field, shared by `create` and `list`.
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct FieldArgs {
    /// Job status (e.g. "pending", "success", "failure")
    #[arg(long)]
    pub status: Option<String>,
    /// Address the job was submitted from
    #[arg(long)]
    pub remote_addr: Option<String>,
    /// Mapper name
    #[arg(long)]
    pub mapper: Option<String>,
    /// Reducer name
    #[arg(long)]
    pub reducer: Option<String>,
    /// Query expression
    #[arg(long)]
    pub query: Option<String>,
    /// Corpus name
    #[arg(long)]
    pub corpus: Option<String>,
    /// Corpus or code revision
    #[arg(long)]
    pub revision: Option<String>,
}

impl FieldArgs {
    /// Fields that were given, in declaration order.
    pub fn pairs(self) -> Vec<(IndexedField, String)> {
        let Self {
            status,
            remote_addr,
            mapper,
            reducer,
            query,
            corpus,
            revision,
        } = self;
        [
            (IndexedField::Status, status),
            (IndexedField::RemoteAddr, remote_addr),
            (IndexedField::Mapper, mapper),
            (IndexedField::Reducer, reducer),
            (IndexedField::Query, query),
            (IndexedField::Corpus, corpus),
            (IndexedField::Revision, revision),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    pub fn into_new_job_info(self) -> NewJobInfo {
        self.pairs()
            .into_iter()
            .fold(NewJobInfo::new(), |info, (field, value)| info.with_field(field, value))
    }

    /// Equality filters for every given field.
    pub fn into_query(self) -> JobQuery {
        self.pairs()
            .into_iter()
            .fold(JobQuery::new(), |query, (field, value)| query.eq(field, value))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
