//! `ji create` and `ji show` specs

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn create_prints_new_id() {
    let store = Store::empty();
    let id = store.create(&["--status", "pending"]);
    assert!(id.starts_with("jin-"), "unexpected id: {id}");
}

#[test]
fn create_then_show_returns_all_fields() {
    let store = Store::empty();
    let id = store.create(&[
        "--status",
        "pending",
        "--remote-addr",
        "127.0.0.1",
        "--mapper",
        "map_tracing_events",
        "--reducer",
        "reduce_counts",
        "--query",
        "MAX_TRACE_HANDLES=10",
        "--corpus",
        "https://performance-insights.appspot.com",
        "--revision",
        "HEAD",
    ]);

    let shown = store.ji().args(&["show", &id, "-o", "json"]).passes().json();
    assert_eq!(shown["id"], Value::from(id.as_str()));
    assert_eq!(shown["status"], "pending");
    assert_eq!(shown["remote_addr"], "127.0.0.1");
    assert_eq!(shown["mapper"], "map_tracing_events");
    assert_eq!(shown["reducer"], "reduce_counts");
    assert_eq!(shown["query"], "MAX_TRACE_HANDLES=10");
    assert_eq!(shown["corpus"], "https://performance-insights.appspot.com");
    assert_eq!(shown["revision"], "HEAD");
    assert!(shown["date_ms"].as_u64().unwrap() > 0);
}

#[test]
fn create_json_output_is_the_record() {
    let store = Store::empty();
    let created = store
        .ji()
        .args(&["create", "--corpus", "c1", "-o", "json"])
        .passes()
        .json();
    assert_eq!(created["corpus"], "c1");
    assert!(created.get("status").is_none());

    let id = created["id"].as_str().unwrap();
    store.ji().args(&["show", id]).passes().stdout_has("c1");
}

#[test]
fn show_text_lists_labels() {
    let store = Store::empty();
    let id = store.create(&["--mapper", "m1"]);
    store
        .ji()
        .args(&["show", &id])
        .passes()
        .stdout_has("Job info:")
        .stdout_has("Mapper:")
        .stdout_has("m1")
        .stdout_has("ago");
}

#[test]
fn show_accepts_unique_prefix() {
    let store = Store::empty();
    let id = store.create(&["--status", "success"]);
    store
        .ji()
        .args(&["show", &id[..10]])
        .passes()
        .stdout_has(&id);
}

#[test]
fn show_unknown_id_exits_one() {
    let store = Store::empty();
    let run = store
        .ji()
        .args(&["show", "jin-doesnotexist"])
        .fails()
        .stderr_has("not found");
    assert_eq!(run.code(), Some(1));
}

#[test]
fn records_survive_across_invocations() {
    let store = Store::empty();
    let ids: Vec<String> = (0..3).map(|_| store.create(&["--status", "success"])).collect();

    for id in &ids {
        store.ji().args(&["show", id]).passes();
    }
    assert!(store.wal_path().exists());
}

#[test]
fn state_dir_flag_overrides_env() {
    let store = Store::empty();
    let other = Store::empty();
    let id = store
        .ji()
        .args(&["--state-dir", other.path().to_str().unwrap(), "create"])
        .passes()
        .stdout();

    other.ji().args(&["show", id.trim()]).passes();
    store.ji().args(&["show", id.trim()]).fails();
}
