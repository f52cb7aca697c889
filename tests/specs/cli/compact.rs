//! `ji compact` specs

use crate::prelude::*;
use crate::prelude::assert_eq;
use std::io::Read;

#[test]
fn compact_writes_snapshot_and_empties_wal() {
    let store = Store::empty();
    let id = store.create(&["--revision", "HEAD"]);
    store.create(&["--revision", "HEAD"]);

    let result = store.ji().args(&["compact", "-o", "json"]).passes().json();
    assert_eq!(result["seq"], 2);
    assert_eq!(result["records"], 2);

    assert_eq!(std::fs::metadata(store.wal_path()).unwrap().len(), 0);

    let mut json = Vec::new();
    zstd::stream::Decoder::new(std::fs::File::open(store.snapshot_path()).unwrap())
        .unwrap()
        .read_to_end(&mut json)
        .unwrap();
    let snapshot: Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(snapshot["v"], 1);
    assert!(snapshot["state"]["job_infos"][id.as_str()].is_object());
}

#[test]
fn records_readable_after_compact() {
    let store = Store::empty();
    let before = store.create(&["--status", "success"]);
    store.ji().args(&["compact"]).passes().stdout_has("Compacted 1 job info(s)");
    std::thread::sleep(std::time::Duration::from_millis(5));
    let after = store.create(&["--status", "success"]);

    let rows = store
        .ji()
        .args(&["list", "--status", "success", "--asc", "-o", "json"])
        .passes()
        .json();
    let ids: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![before.as_str(), after.as_str()]);
}
