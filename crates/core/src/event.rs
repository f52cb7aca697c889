// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events recorded in the write-ahead log.

use crate::job_info::{JobInfo, JobInfoId, NewJobInfo};
use serde::{Deserialize, Serialize};

/// Facts about what happened to the store. State is derived from these.
///
/// Serializes with `{"type": "job_info:created", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "job_info:created")]
    JobInfoCreated {
        id: JobInfoId,
        date_ms: u64,
        #[serde(flatten)]
        fields: NewJobInfo,
    },

    /// Retention cleanup removed a record.
    #[serde(rename = "job_info:deleted")]
    JobInfoDeleted { id: JobInfoId },
}

impl Event {
    /// The creation event for a freshly stamped record.
    pub fn created(info: &JobInfo) -> Self {
        Event::JobInfoCreated {
            id: info.id.clone(),
            date_ms: info.date_ms,
            fields: info.fields(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::JobInfoCreated { .. } => "job_info:created",
            Event::JobInfoDeleted { .. } => "job_info:deleted",
        }
    }

    /// One-line description for tracing output.
    pub fn log_summary(&self) -> String {
        let t = self.name();
        match self {
            Event::JobInfoCreated {
                id,
                date_ms,
                fields,
            } => {
                let mut line = format!("{t} id={id} date_ms={date_ms}");
                for (key, value) in [
                    ("status", &fields.status),
                    ("mapper", &fields.mapper),
                    ("reducer", &fields.reducer),
                    ("corpus", &fields.corpus),
                ] {
                    if let Some(v) = value {
                        line.push_str(&format!(" {key}={v}"));
                    }
                }
                line
            }
            Event::JobInfoDeleted { id } => format!("{t} id={id}"),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
