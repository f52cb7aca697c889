// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time copies of the materialized state.
//!
//! A snapshot records the WAL sequence it covers; opening a store loads it
//! and replays only the entries after that sequence.

use crate::migration::{MigrationError, MigrationRegistry};
use crate::state::MaterializedState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

const ZSTD_LEVEL: i32 = 3;

/// Backups kept beside a replaced file: `.bak`, `.bak.2`, `.bak.3`.
const MAX_BAK_FILES: u32 = 3;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "v")]
    pub version: u32,
    /// Last WAL sequence folded into `state`.
    pub seq: u64,
    pub state: MaterializedState,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(seq: u64, state: MaterializedState) -> Self {
        Self {
            version: CURRENT_SNAPSHOT_VERSION,
            seq,
            state,
            created_at: Utc::now(),
        }
    }

    /// Replace the snapshot at `path`.
    ///
    /// The new file is written and synced beside `path`, the old one is
    /// copied to a rotated `.bak`, then the new file is renamed over it.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let compressed = zstd::stream::encode_all(serde_json::to_vec(self)?.as_slice(), ZSTD_LEVEL)?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let staged = path.with_extension("tmp");
        let mut file = File::create(&staged)?;
        file.write_all(&compressed)?;
        file.sync_all()?;
        drop(file);

        if path.is_file() {
            let bak = rotate_bak_path(path);
            fs::copy(path, &bak)?;
            debug!(backup = %bak.display(), "kept previous snapshot");
        }
        fs::rename(&staged, path)?;

        info!(
            seq = self.seq,
            records = self.state.len(),
            bytes = compressed.len(),
            path = %path.display(),
            "saved snapshot"
        );
        Ok(())
    }
}

/// Read the snapshot at `path`, upgrading older layouts. `None` if there is none.
pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>, SnapshotError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let raw: serde_json::Value = serde_json::from_slice(&zstd::stream::decode_all(file)?)?;
    let current = MigrationRegistry::new().migrate_to(raw, CURRENT_SNAPSHOT_VERSION)?;
    Ok(Some(serde_json::from_value(current)?))
}

fn bak_path(path: &Path, n: u32) -> PathBuf {
    match n {
        1 => path.with_extension("bak"),
        n => path.with_extension(format!("bak.{n}")),
    }
}

/// Shift existing backups of `path` up one slot and return the freed `.bak`.
///
/// The backup in the last slot is dropped.
pub(crate) fn rotate_bak_path(path: &Path) -> PathBuf {
    let _ = fs::remove_file(bak_path(path, MAX_BAK_FILES));
    for n in (1..MAX_BAK_FILES).rev() {
        let from = bak_path(path, n);
        if from.exists() {
            let _ = fs::rename(&from, bak_path(path, n + 1));
        }
    }
    bak_path(path, 1)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
