//! `ji list` specs

use crate::prelude::*;
use crate::prelude::assert_eq;

fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn list_empty_store() {
    let store = Store::empty();
    store.ji().args(&["list"]).passes().stdout_has("No job infos found");
}

#[test]
fn list_filters_by_exact_field_value() {
    let store = Store::empty();
    let wanted = store.create(&["--status", "success", "--corpus", "c1"]);
    store.create(&["--status", "Success", "--corpus", "c1"]);
    store.create(&["--status", "failure", "--corpus", "c1"]);

    let rows = store
        .ji()
        .args(&["list", "--status", "success", "-o", "json"])
        .passes()
        .json();
    assert_eq!(ids(&rows), vec![wanted]);
}

#[test]
fn list_combines_filters() {
    let store = Store::empty();
    let wanted = store.create(&["--mapper", "m", "--reducer", "r"]);
    store.create(&["--mapper", "m", "--reducer", "other"]);

    let rows = store
        .ji()
        .args(&["list", "--mapper", "m", "--reducer", "r", "-o", "json"])
        .passes()
        .json();
    assert_eq!(ids(&rows), vec![wanted]);
}

#[test]
fn list_where_filter_by_field_name() {
    let store = Store::empty();
    let wanted = store.create(&["--remote-addr", "10.0.0.7"]);
    store.create(&["--remote-addr", "10.0.0.8"]);

    let rows = store
        .ji()
        .args(&["list", "--where", "remote_addr=10.0.0.7", "-o", "json"])
        .passes()
        .json();
    assert_eq!(ids(&rows), vec![wanted]);

    store
        .ji()
        .args(&["list", "--where", "colour=red"])
        .fails()
        .stderr_has("unknown field 'colour'");
}

#[test]
fn list_is_newest_first_unless_asc() {
    let store = Store::empty();
    let first = store.create(&["--corpus", "c"]);
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = store.create(&["--corpus", "c"]);

    let desc = store.ji().args(&["list", "-o", "json"]).passes().json();
    assert_eq!(ids(&desc), vec![second.clone(), first.clone()]);

    let asc = store.ji().args(&["list", "--asc", "-o", "json"]).passes().json();
    assert_eq!(ids(&asc), vec![first, second]);
}

#[test]
fn list_limit_reports_more() {
    let store = Store::empty();
    for _ in 0..3 {
        store.create(&["--status", "pending"]);
    }

    store
        .ji()
        .args(&["list", "-n", "2"])
        .passes()
        .stdout_has("more not shown");
    let rows = store.ji().args(&["list", "-n", "2", "-o", "json"]).passes().json();
    assert_eq!(rows.as_array().unwrap().len(), 2);

    store
        .ji()
        .args(&["list", "--no-limit"])
        .passes()
        .stdout_lacks("more not shown");
}

#[test]
fn list_since_window() {
    let store = Store::empty();
    store.create(&["--status", "pending"]);

    let recent = store.ji().args(&["list", "--since", "1h", "-o", "json"]).passes().json();
    assert_eq!(recent.as_array().unwrap().len(), 1);

    let old = store.ji().args(&["list", "--until", "1h", "-o", "json"]).passes().json();
    assert!(old.as_array().unwrap().is_empty());
}

#[test]
fn list_rejects_bad_duration() {
    let store = Store::empty();
    store.ji().args(&["list", "--since", "5x"]).fails();
}
