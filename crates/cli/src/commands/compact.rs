// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ji compact` - Snapshot the store and truncate its WAL

use std::io::Write;

use anyhow::Result;
use ji_core::Clock;
use ji_storage::DurableStore;

use crate::output::OutputFormat;

pub fn handle<C: Clock>(store: &DurableStore<C>, format: OutputFormat) -> Result<()> {
    let result = store.checkpoint()?;
    let data = serde_json::json!({
        "seq": result.seq,
        "records": result.records,
        "snapshot": store.paths().snapshot_path,
    });
    format.emit(&data, |out| {
        writeln!(
            out,
            "Compacted {} job info(s) at seq {}",
            result.records, result.seq
        )
    })
}
