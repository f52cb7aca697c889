//! `ji prune` specs

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn prune_dry_run_changes_nothing() {
    let store = Store::empty();
    let id = store.create(&["--status", "success"]);
    std::thread::sleep(std::time::Duration::from_millis(1100));

    store
        .ji()
        .args(&["prune", "--older-than", "1s", "--dry-run"])
        .passes()
        .stdout_has("Would prune")
        .stdout_has(&id);
    store.ji().args(&["show", &id]).passes();
}

#[test]
fn prune_removes_old_records() {
    let store = Store::empty();
    let id = store.create(&["--status", "success"]);
    std::thread::sleep(std::time::Duration::from_millis(1100));

    let result = store
        .ji()
        .args(&["prune", "--older-than", "1s", "-o", "json"])
        .passes()
        .json();
    assert_eq!(result["dry_run"], false);
    assert_eq!(result["pruned"][0]["id"], Value::from(id.as_str()));

    store.ji().args(&["show", &id]).fails();
}

#[test]
fn prune_keeps_recent_records() {
    let store = Store::empty();
    let id = store.create(&[]);

    store
        .ji()
        .args(&["prune", "--older-than", "1h"])
        .passes()
        .stdout_has("0 job info(s) pruned");
    store.ji().args(&["show", &id]).passes();
}

#[test]
fn prune_requires_older_than() {
    let store = Store::empty();
    store.ji().args(&["prune"]).fails().stderr_has("--older-than");
}
