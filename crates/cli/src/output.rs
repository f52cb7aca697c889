// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering shared by the commands.

use std::io::{self, Write};

use clap::ValueEnum;
use ji_core::{Clock, SystemClock};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Pretty JSON of `data`, or whatever `text` writes, on stdout.
    pub fn emit<T: Serialize>(
        self,
        data: &T,
        text: impl FnOnce(&mut dyn Write) -> io::Result<()>,
    ) -> anyhow::Result<()> {
        self.emit_to(&mut io::stdout().lock(), data, text)
    }

    fn emit_to<T: Serialize>(
        self,
        out: &mut dyn Write,
        data: &T,
        text: impl FnOnce(&mut dyn Write) -> io::Result<()>,
    ) -> anyhow::Result<()> {
        match self {
            Self::Json => writeln!(out, "{}", serde_json::to_string_pretty(data)?)?,
            Self::Text => text(out)?,
        }
        Ok(())
    }
}

pub fn now_ms() -> u64 {
    SystemClock.epoch_ms()
}

/// Age of `epoch_ms` as "5s", "2m", "1h", "3d".
pub fn time_ago(epoch_ms: u64) -> String {
    time_ago_at(epoch_ms, now_ms())
}

fn time_ago_at(epoch_ms: u64, now_ms: u64) -> String {
    if epoch_ms == 0 {
        return "-".into();
    }
    ji_core::format_elapsed_ms(now_ms.saturating_sub(epoch_ms))
}

/// One page of list results.
#[derive(Debug)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Rows past the limit were left out.
    pub more: bool,
}

impl<T> Page<T> {
    /// Cut `rows`, fetched with one extra probe row, down to `limit`.
    pub fn from_probe(mut rows: Vec<T>, limit: Option<usize>) -> Self {
        let more = limit.is_some_and(|n| rows.len() > n);
        if let Some(n) = limit {
            rows.truncate(n);
        }
        Self { rows, more }
    }
}

impl<T: Serialize> Page<T> {
    pub fn print(
        &self,
        format: OutputFormat,
        empty_msg: &str,
        render: impl FnOnce(&mut dyn Write, &[T]) -> io::Result<()>,
    ) -> anyhow::Result<()> {
        format.emit(&self.rows, |out| self.write_text(out, empty_msg, render))
    }

    fn write_text(
        &self,
        out: &mut dyn Write,
        empty_msg: &str,
        render: impl FnOnce(&mut dyn Write, &[T]) -> io::Result<()>,
    ) -> io::Result<()> {
        if self.rows.is_empty() {
            writeln!(out, "{empty_msg}")?;
        } else {
            render(out, &self.rows)?;
        }
        if self.more {
            writeln!(out, "\n... more not shown. Use --no-limit or -n N to see more.")?;
        }
        Ok(())
    }
}

/// Report records removed (or selected, on a dry run) by retention.
pub fn print_pruned<T: Serialize>(
    pruned: &[T],
    dry_run: bool,
    format: OutputFormat,
    describe: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    let summary = serde_json::json!({ "dry_run": dry_run, "pruned": pruned });
    format.emit(&summary, |out| write_pruned(out, pruned, dry_run, describe))
}

fn write_pruned<T>(
    out: &mut dyn Write,
    pruned: &[T],
    dry_run: bool,
    describe: impl Fn(&T) -> String,
) -> io::Result<()> {
    let (prefix, verb) = if dry_run {
        writeln!(out, "Dry run, no changes made\n")?;
        ("Would prune", "would be pruned")
    } else {
        ("Pruned", "pruned")
    };
    for entry in pruned {
        writeln!(out, "{prefix} {}", describe(entry))?;
    }
    writeln!(out, "\n{} job info(s) {verb}", pruned.len())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
