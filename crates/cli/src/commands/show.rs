// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ji show` - Display one job info

use std::io::{self, Write};

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use ji_core::{IndexedField, JobInfo};
use ji_storage::JobInfoStore;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{time_ago, OutputFormat};

/// RFC 3339 rendering of an epoch-millisecond date.
pub fn format_date(date_ms: u64) -> String {
    i64::try_from(date_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(
            || date_ms.to_string(),
            |dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
}

fn field_label(field: IndexedField) -> &'static str {
    match field {
        IndexedField::Status => "Status:",
        IndexedField::RemoteAddr => "Remote addr:",
        IndexedField::Mapper => "Mapper:",
        IndexedField::Reducer => "Reducer:",
        IndexedField::Query => "Query:",
        IndexedField::Corpus => "Corpus:",
        IndexedField::Revision => "Revision:",
    }
}

fn label(text: &str) -> String {
    color::context(&format!("{text:<13}"))
}

fn write_job_info(out: &mut dyn Write, info: &JobInfo) -> io::Result<()> {
    writeln!(out, "{} {}", color::header("Job info:"), info.id)?;
    writeln!(
        out,
        "  {}{} ({} ago)",
        label("Date:"),
        format_date(info.date_ms),
        time_ago(info.date_ms)
    )?;
    for field in IndexedField::ALL {
        let value = info
            .field(field)
            .map_or_else(|| color::muted("-"), str::to_string);
        writeln!(out, "  {}{}", label(field_label(field)), value)?;
    }
    Ok(())
}

pub fn handle(id: &str, store: &dyn JobInfoStore, format: OutputFormat) -> Result<()> {
    let info = store
        .get(id)?
        .ok_or_else(|| ExitError::not_found(JobInfo::KIND, id))?;
    format.emit(&info, |out| write_job_info(out, &info))
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
