// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ji list` - Query job infos by field and creation window

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use ji_core::{DateOrder, IndexedField, JobInfo, JobQuery};
use ji_storage::JobInfoStore;

use super::FieldArgs;
use crate::color;
use crate::output::{now_ms, time_ago, OutputFormat, Page};

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Extra equality filter by field name (repeatable)
    #[arg(long = "where", value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(IndexedField, String)>,

    /// Only records created within this long ago (e.g. "1h", "7d")
    #[arg(long, value_parser = ji_core::parse_duration)]
    pub since: Option<Duration>,

    /// Only records created more than this long ago
    #[arg(long, value_parser = ji_core::parse_duration)]
    pub until: Option<Duration>,

    /// Oldest first (default: newest first)
    #[arg(long)]
    pub asc: bool,

    /// Maximum number of records to show (default: 20)
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    /// Show all records (no limit)
    #[arg(long, conflicts_with = "limit")]
    pub no_limit: bool,
}

/// Parse `field=value`; the value may be empty.
pub fn parse_filter(s: &str) -> Result<(IndexedField, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = name.parse::<IndexedField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

impl ListArgs {
    /// Build the store query relative to `now_ms`.
    ///
    /// The limit is one past the requested count so truncation can be detected.
    pub fn to_query(&self, now_ms: u64) -> JobQuery {
        let ago = |d: Duration| now_ms.saturating_sub(d.as_millis() as u64);
        let mut query = self.fields.clone().into_query().order(if self.asc {
            DateOrder::Ascending
        } else {
            DateOrder::Descending
        });
        for (field, value) in &self.filters {
            query = query.eq(*field, value.clone());
        }
        if let Some(since) = self.since {
            query = query.since(ago(since));
        }
        if let Some(until) = self.until {
            query = query.until(ago(until));
        }
        if !self.no_limit {
            query = query.limit(self.limit.saturating_add(1));
        }
        query
    }
}

fn cell(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn format_job_info_list(out: &mut dyn Write, items: &[JobInfo]) -> io::Result<()> {
    let status_w = items
        .iter()
        .map(|i| cell(i.status.as_deref()).len())
        .max()
        .unwrap_or(0)
        .max("STATUS".len());
    let mapper_w = items
        .iter()
        .map(|i| cell(i.mapper.as_deref()).len())
        .max()
        .unwrap_or(0)
        .max("MAPPER".len());

    writeln!(
        out,
        "{}",
        color::header(&format!(
            "{:<12} {:<status_w$} {:<mapper_w$} {:<6} CORPUS",
            "ID", "STATUS", "MAPPER", "AGE"
        ))
    )?;
    for info in items {
        writeln!(
            out,
            "{:<12} {:<status_w$} {:<mapper_w$} {:<6} {}",
            info.id.short(12),
            cell(info.status.as_deref()),
            cell(info.mapper.as_deref()),
            time_ago(info.date_ms),
            cell(info.corpus.as_deref()),
        )?;
    }
    Ok(())
}

pub fn handle(args: ListArgs, store: &dyn JobInfoStore, format: OutputFormat) -> Result<()> {
    let rows = store.query(&args.to_query(now_ms()))?;
    let page = Page::from_probe(rows, (!args.no_limit).then_some(args.limit));
    page.print(format, "No job infos found", format_job_info_list)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
