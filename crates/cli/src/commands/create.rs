// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ji create` - Record a new job info

use std::io::Write;

use anyhow::Result;
use clap::Args;
use ji_storage::JobInfoStore;

use super::FieldArgs;
use crate::output::OutputFormat;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

pub fn handle(args: CreateArgs, store: &dyn JobInfoStore, format: OutputFormat) -> Result<()> {
    let info = store.create(args.fields.into_new_job_info())?;
    tracing::debug!(id = %info.id, date_ms = info.date_ms, "created job info");
    format.emit(&info, |out| writeln!(out, "{}", info.id))
}
