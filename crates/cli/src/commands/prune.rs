// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ji prune` - Retention cleanup

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use ji_storage::JobInfoStore;

use crate::output::{now_ms, print_pruned, time_ago, OutputFormat};

#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Remove records created more than this long ago (e.g. "30d")
    #[arg(long, value_parser = ji_core::parse_duration)]
    pub older_than: Duration,

    /// Show what would be pruned without making changes
    #[arg(long)]
    pub dry_run: bool,
}

/// Creation-time cutoff for `older_than` before `now_ms`.
pub fn cutoff_ms(older_than: Duration, now_ms: u64) -> u64 {
    now_ms.saturating_sub(older_than.as_millis() as u64)
}

pub fn handle(args: PruneArgs, store: &dyn JobInfoStore, format: OutputFormat) -> Result<()> {
    let cutoff = cutoff_ms(args.older_than, now_ms());
    let pruned = store.prune_before(cutoff, args.dry_run)?;
    print_pruned(&pruned, args.dry_run, format, |info| {
        format!(
            "{} ({}, {} ago)",
            info.id,
            info.status.as_deref().unwrap_or("-"),
            time_ago(info.date_ms)
        )
    })
}

#[cfg(test)]
#[path = "prune_tests.rs"]
mod tests;
