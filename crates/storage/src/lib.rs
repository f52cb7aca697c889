// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ji-storage: WAL-backed persistence and indexed queries for job info records

pub mod migration;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod wal;

pub use migration::{Migration, MigrationError, MigrationRegistry};
pub use snapshot::{load_snapshot, Snapshot, SnapshotError, CURRENT_SNAPSHOT_VERSION};
pub use state::{MaterializedState, PrefixMatch};
pub use store::{CheckpointResult, DurableStore, JobInfoStore, MemoryStore, StoreError, StorePaths};
pub use wal::{Wal, WalEntry, WalError};
