// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

const CURRENT: u32 = 1;

/// Moves `state.records` to `state.job_infos`.
struct RenameRecords;

impl Migration for RenameRecords {
    fn source_version(&self) -> u32 {
        1
    }
    fn target_version(&self) -> u32 {
        2
    }
    fn migrate(&self, snapshot: &mut Value) -> Result<(), MigrationError> {
        let state = snapshot
            .get_mut("state")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| MigrationError::Invalid("missing state".into()))?;
        if let Some(records) = state.remove("records") {
            state.insert("job_infos".into(), records);
        }
        Ok(())
    }
}

/// Stamps a marker so tests can see it ran.
struct Mark;

impl Migration for Mark {
    fn source_version(&self) -> u32 {
        2
    }
    fn target_version(&self) -> u32 {
        3
    }
    fn migrate(&self, snapshot: &mut Value) -> Result<(), MigrationError> {
        snapshot["marked"] = Value::Bool(true);
        Ok(())
    }
}

#[test]
fn current_version_passes_through() {
    let snapshot = json!({"v": 1, "seq": 1, "state": {}});
    let migrated = MigrationRegistry::new()
        .migrate_to(snapshot.clone(), CURRENT)
        .unwrap();
    assert_eq!(migrated, snapshot);
}

#[test]
fn newer_than_supported() {
    let err = MigrationRegistry::new()
        .migrate_to(json!({"v": 99}), CURRENT)
        .unwrap_err();
    assert!(matches!(err, MigrationError::TooNew(99, 1)));
    assert_eq!(err.to_string(), "snapshot version 99 is newer than supported (1)");
}

#[test]
fn missing_step() {
    let result = MigrationRegistry::new().migrate_to(json!({"v": 1}), 2);
    assert!(matches!(result, Err(MigrationError::NoPath(1, 2))));
}

#[yare::parameterized(
    missing   = { json!({"seq": 1}) },
    string    = { json!({"v": "1"}) },
    negative  = { json!({"v": -1}) },
    too_large = { json!({"v": 5_000_000_000u64}) },
    array     = { json!([1, 2]) },
)]
fn unreadable_version(snapshot: Value) {
    let result = MigrationRegistry::new().migrate_to(snapshot, CURRENT);
    assert!(matches!(result, Err(MigrationError::Invalid(_))));
}

#[test]
fn steps_chain_regardless_of_registration_order() {
    let mut registry = MigrationRegistry::new();
    registry.register(Mark).register(RenameRecords);

    let migrated = registry
        .migrate_to(json!({"v": 1, "seq": 42, "state": {"records": {}}}), 3)
        .unwrap();

    assert_eq!(
        migrated,
        json!({"v": 3, "seq": 42, "marked": true, "state": {"job_infos": {}}})
    );
}

#[test]
fn partial_chain_stops_at_target() {
    let mut registry = MigrationRegistry::new();
    registry.register(RenameRecords).register(Mark);

    let migrated = registry
        .migrate_to(json!({"v": 1, "state": {}}), 2)
        .unwrap();
    assert_eq!(migrated["v"], 2);
    assert!(migrated.get("marked").is_none());
}

#[test]
fn failing_step_aborts() {
    let mut registry = MigrationRegistry::new();
    registry.register(RenameRecords);

    let result = registry.migrate_to(json!({"v": 1, "seq": 1}), 2);
    assert!(matches!(result, Err(MigrationError::Invalid(_))));
}

/// Registered at 1 but claims to stay at 1.
struct Stalls;

impl Migration for Stalls {
    fn source_version(&self) -> u32 {
        1
    }
    fn target_version(&self) -> u32 {
        1
    }
    fn migrate(&self, _snapshot: &mut Value) -> Result<(), MigrationError> {
        Ok(())
    }
}

/// Replaces the whole snapshot with an array.
struct Clobbers;

impl Migration for Clobbers {
    fn source_version(&self) -> u32 {
        1
    }
    fn target_version(&self) -> u32 {
        2
    }
    fn migrate(&self, snapshot: &mut Value) -> Result<(), MigrationError> {
        *snapshot = json!([]);
        Ok(())
    }
}

#[test]
fn step_that_does_not_advance_is_invalid() {
    let mut registry = MigrationRegistry::new();
    registry.register(Stalls);

    let result = registry.migrate_to(json!({"v": 1}), 2);
    assert!(matches!(result, Err(MigrationError::Invalid(msg)) if msg.contains("targets 1")));
}

#[test]
fn step_leaving_non_object_is_invalid() {
    let mut registry = MigrationRegistry::new();
    registry.register(Clobbers);

    let result = registry.migrate_to(json!({"v": 1}), 2);
    assert!(matches!(result, Err(MigrationError::Invalid(msg)) if msg.contains("non-object")));
}
