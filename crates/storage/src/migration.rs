// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot schema migrations.
//!
//! Steps rewrite raw JSON, so retired layouts never need Rust types.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("snapshot version {0} is newer than supported ({1})")]
    TooNew(u32, u32),
    #[error("no migration path from version {0} to {1}")]
    NoPath(u32, u32),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Upgrade from one schema version to the next.
pub trait Migration: Send + Sync {
    fn source_version(&self) -> u32;
    fn target_version(&self) -> u32;
    fn migrate(&self, snapshot: &mut Value) -> Result<(), MigrationError>;
}

/// Known steps, keyed by the version they upgrade from.
#[derive(Default)]
pub struct MigrationRegistry {
    steps: BTreeMap<u32, Box<dyn Migration>>,
}

impl MigrationRegistry {
    /// Every migration this build knows. Version 1 is the first layout, so
    /// there are none yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step, replacing any registered for the same source version.
    pub fn register(&mut self, step: impl Migration + 'static) -> &mut Self {
        self.steps.insert(step.source_version(), Box::new(step));
        self
    }

    /// Run steps until the snapshot's `v` reaches `target`.
    pub fn migrate_to(&self, mut snapshot: Value, target: u32) -> Result<Value, MigrationError> {
        let mut version = version_of(&snapshot)?;
        if version > target {
            return Err(MigrationError::TooNew(version, target));
        }
        while version < target {
            let Some(step) = self.steps.get(&version) else {
                return Err(MigrationError::NoPath(version, target));
            };
            let next = step.target_version();
            if next <= version {
                return Err(MigrationError::Invalid(format!(
                    "migration from version {version} targets {next}"
                )));
            }
            step.migrate(&mut snapshot)?;
            snapshot
                .as_object_mut()
                .ok_or_else(|| {
                    MigrationError::Invalid(format!("migration to version {next} left a non-object"))
                })?
                .insert("v".into(), Value::from(next));
            version = next;
        }
        Ok(snapshot)
    }
}

fn version_of(snapshot: &Value) -> Result<u32, MigrationError> {
    match snapshot.get("v").and_then(Value::as_u64).map(u32::try_from) {
        Some(Ok(v)) => Ok(v),
        _ => Err(MigrationError::Invalid(
            "missing or invalid version field \"v\"".into(),
        )),
    }
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
