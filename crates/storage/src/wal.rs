// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log of store events.
//!
//! One JSON object per line: `{"seq": 1, "event": {...}}`. Appends are
//! buffered until [`Wal::flush`], which writes and fsyncs them. Bytes past
//! the last successful flush are never acknowledged; they are cut off
//! before the next write lands. A corrupt
//! tail (torn write, garbage, non-UTF-8 bytes) is cut off on open; the
//! damaged file is kept as a rotated `.bak`.

use crate::snapshot::rotate_bak_path;
use ji_core::Event;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single durable log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalEntry {
    pub seq: u64,
    pub event: Event,
}

pub struct Wal {
    path: PathBuf,
    file: File,
    write_seq: u64,
    /// File length covered by acknowledged flushes.
    durable_len: u64,
    buffer: Vec<WalEntry>,
}

impl Wal {
    /// Open (or create) the log at `path`.
    ///
    /// `min_seq` is the sequence already covered by a snapshot. New entries
    /// are numbered after both it and the last entry in the file, so
    /// sequence numbers keep increasing across a truncation.
    pub fn open(path: &Path, min_seq: u64) -> Result<Self, WalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let (entries, corrupt) = if path.exists() {
            scan(path)?
        } else {
            (Vec::new(), false)
        };

        if corrupt {
            let bak = rotate_bak_path(path);
            warn!(
                path = %path.display(),
                backup = %bak.display(),
                valid_entries = entries.len(),
                "corrupt WAL, keeping valid prefix"
            );
            fs::rename(path, &bak)?;
            write_entries(path, &entries)?;
        }

        let last_seq = entries.last().map(|e| e.seq).unwrap_or(0);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let durable_len = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            write_seq: last_seq.max(min_seq),
            durable_len,
            buffer: Vec::new(),
        })
    }

    /// Sequence number of the last appended entry (flushed or not).
    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }

    /// Buffer an event and return its sequence number.
    pub fn append(&mut self, event: &Event) -> Result<u64, WalError> {
        let seq = self.write_seq + 1;
        self.buffer.push(WalEntry {
            seq,
            event: event.clone(),
        });
        self.write_seq = seq;
        Ok(seq)
    }

    /// Write buffered entries and fsync.
    ///
    /// On failure the file is cut back to its last flushed length, so a
    /// partial or unsynced batch can neither resurface on reopen nor merge
    /// with the next line. Buffered entries stay queued for the caller to
    /// retry or [`discard`](Self::discard_unflushed).
    pub fn flush(&mut self) -> Result<(), WalError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let mut bytes = Vec::new();
        for entry in &self.buffer {
            serde_json::to_writer(&mut bytes, entry)?;
            bytes.push(b'\n');
        }

        self.cut_unacknowledged()?;
        let written = self
            .file
            .write_all(&bytes)
            .and_then(|()| self.file.sync_data());
        if let Err(e) = written {
            // Retried by the next flush if this cut fails too
            if let Err(cut) = self.cut_unacknowledged() {
                warn!(path = %self.path.display(), error = %cut, "failed to cut WAL after write error");
            }
            return Err(e.into());
        }

        self.durable_len += bytes.len() as u64;
        self.buffer.clear();
        Ok(())
    }

    /// Drop bytes past `durable_len` left by a failed write.
    fn cut_unacknowledged(&mut self) -> Result<(), WalError> {
        let len = self.file.metadata()?.len();
        if len > self.durable_len {
            warn!(
                path = %self.path.display(),
                durable_len = self.durable_len,
                len,
                "cutting unacknowledged WAL bytes"
            );
            self.file.set_len(self.durable_len)?;
            self.file.sync_data()?;
        }
        Ok(())
    }

    /// Drop buffered entries that were never flushed, rewinding the sequence.
    pub fn discard_unflushed(&mut self) {
        if let Some(first) = self.buffer.first() {
            self.write_seq = first.seq - 1;
        }
        self.buffer.clear();
    }

    /// Durable entries with `seq > after`, stopping at the first corrupt line.
    pub fn entries_after(&self, after: u64) -> Result<Vec<WalEntry>, WalError> {
        let (entries, _) = scan(&self.path)?;
        Ok(entries.into_iter().filter(|e| e.seq > after).collect())
    }

    /// Remove entries with `seq < before`. Buffered entries are flushed first.
    pub fn truncate_before(&mut self, before: u64) -> Result<(), WalError> {
        self.flush()?;
        let (entries, _) = scan(&self.path)?;
        let kept: Vec<_> = entries.into_iter().filter(|e| e.seq >= before).collect();

        let tmp = self.path.with_extension("wal.tmp");
        write_entries(&tmp, &kept)?;
        fs::rename(&tmp, &self.path)?;
        self.file = OpenOptions::new().append(true).open(&self.path)?;
        self.durable_len = self.file.metadata()?.len();
        info!(before, kept = kept.len(), "truncated WAL");
        Ok(())
    }
}

/// Read valid entries from the start of the file. The flag is set when a
/// line fails to decode; nothing after it is returned.
fn scan(path: &Path) -> Result<(Vec<WalEntry>, bool), WalError> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for line in reader.split(b'\n') {
        let line = line?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let decoded = std::str::from_utf8(&line)
            .ok()
            .and_then(|text| serde_json::from_str::<WalEntry>(text).ok());
        match decoded {
            Some(entry) => entries.push(entry),
            None => return Ok((entries, true)),
        }
    }
    Ok((entries, false))
}

fn write_entries(path: &Path, entries: &[WalEntry]) -> Result<(), WalError> {
    let mut file = File::create(path)?;
    for entry in entries {
        serde_json::to_writer(&mut file, entry)?;
        file.write_all(b"\n")?;
    }
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
