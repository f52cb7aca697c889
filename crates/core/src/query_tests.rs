// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn record(status: &str, date_ms: u64) -> JobInfo {
    JobInfo::builder().status(status).corpus("urls").date_ms(date_ms).build()
}

#[test]
fn empty_query_matches_everything() {
    let q = JobQuery::new();
    assert!(q.matches(&record("pending", 0)));
    assert!(q.matches(&JobInfo::builder().build()));
}

#[test]
fn equality_filter_matches_exact_value_only() {
    let q = JobQuery::by_field(IndexedField::Status, "pending");
    assert!(q.matches(&record("pending", 1)));
    assert!(!q.matches(&record("pending ", 1)));
    assert!(!q.matches(&record("Pending", 1)));
}

#[test]
fn equality_filter_never_matches_unset_field() {
    let q = JobQuery::by_field(IndexedField::Mapper, "");
    assert!(!q.matches(&record("pending", 1)));
}

#[test]
fn filters_are_conjunctive() {
    let q = JobQuery::new()
        .eq(IndexedField::Status, "success")
        .eq(IndexedField::Corpus, "urls");
    assert!(q.matches(&record("success", 1)));
    assert!(!q.matches(&record("failure", 1)));

    let q = q.eq(IndexedField::Corpus, "other");
    assert!(!q.matches(&record("success", 1)));
}

#[yare::parameterized(
    before_since  = { 99, false },
    at_since      = { 100, true },
    inside        = { 150, true },
    at_until      = { 200, false },
    after_until   = { 250, false },
)]
fn date_window_is_half_open(date_ms: u64, expected: bool) {
    let q = JobQuery::new().since(100).until(200);
    assert_eq!(q.in_window(date_ms), expected);
    assert_eq!(q.matches(&record("x", date_ms)), expected);
}

#[test]
fn default_order_is_ascending() {
    assert_eq!(JobQuery::new().order, DateOrder::Ascending);
    assert_eq!(DateOrder::Ascending.to_string(), "asc");
    assert_eq!(DateOrder::Descending.to_string(), "desc");
}

#[test]
fn builder_methods_set_fields() {
    let q = JobQuery::new().order(DateOrder::Descending).limit(3);
    assert_eq!(q.order, DateOrder::Descending);
    assert_eq!(q.limit, Some(3));
}
