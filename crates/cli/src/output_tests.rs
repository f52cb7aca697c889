// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

/// Writer whose every write fails, like a closed pipe.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("jin-{i}")).collect()
}

fn page_text(page: &Page<String>) -> String {
    let mut out = Vec::new();
    page.write_text(&mut out, "No job infos found", |out, rows| {
        rows.iter().try_for_each(|row| writeln!(out, "{row}"))
    })
    .unwrap();
    String::from_utf8(out).unwrap()
}

fn pruned_text(n: usize, dry_run: bool) -> String {
    let mut out = Vec::new();
    write_pruned(&mut out, &ids(n), dry_run, |id| id.clone()).unwrap();
    String::from_utf8(out).unwrap()
}

#[yare::parameterized(
    zero_is_dash = { 0, 10_000, "-" },
    seconds      = { 5_000, 10_000, "5s" },
    minutes      = { 1, 120_001, "2m" },
    future       = { 20_000, 10_000, "0s" },
)]
fn time_ago_formats(epoch_ms: u64, now_ms: u64, expected: &str) {
    assert_eq!(time_ago_at(epoch_ms, now_ms), expected);
}

#[yare::parameterized(
    under_limit = { 3, Some(5), 3, false },
    at_limit    = { 5, Some(5), 5, false },
    probe_row   = { 6, Some(5), 5, true },
    unlimited   = { 40, None, 40, false },
)]
fn page_from_probe(fetched: usize, limit: Option<usize>, shown: usize, more: bool) {
    let page = Page::from_probe(ids(fetched), limit);
    assert_eq!(page.rows.len(), shown);
    assert_eq!(page.more, more);
}

#[test]
fn empty_page_prints_message_only() {
    let text = page_text(&Page::from_probe(Vec::new(), Some(20)));
    assert_eq!(text, "No job infos found\n");
}

#[test]
fn truncated_page_prints_hint_after_rows() {
    let text = page_text(&Page::from_probe(ids(3), Some(2)));
    assert_eq!(
        text,
        "jin-0\njin-1\n\n... more not shown. Use --no-limit or -n N to see more.\n"
    );
}

#[test]
fn pruned_real_run() {
    assert_eq!(pruned_text(2, false), "Pruned jin-0\nPruned jin-1\n\n2 job info(s) pruned\n");
}

#[test]
fn pruned_dry_run() {
    let text = pruned_text(1, true);
    assert!(text.starts_with("Dry run, no changes made\n\n"));
    assert!(text.contains("Would prune jin-0\n"));
    assert!(text.ends_with("1 job info(s) would be pruned\n"));
}

#[test]
fn pruned_nothing() {
    assert_eq!(pruned_text(0, false), "\n0 job info(s) pruned\n");
}

#[yare::parameterized(
    text = { OutputFormat::Text },
    json = { OutputFormat::Json },
)]
fn emit_reports_write_errors(format: OutputFormat) {
    let err = format
        .emit_to(&mut ClosedPipe, &ids(1), |out| writeln!(out, "jin-0"))
        .unwrap_err();
    let io_err = err.downcast_ref::<io::Error>().unwrap();
    assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn emit_text_uses_renderer_only() {
    let mut out = Vec::new();
    OutputFormat::Text
        .emit_to(&mut out, &ids(2), |out| writeln!(out, "two"))
        .unwrap();
    assert_eq!(out, b"two\n");
}

#[test]
fn page_renderer_errors_propagate() {
    let page = Page::from_probe(ids(2), None);
    let err = page
        .write_text(&mut Vec::new(), "none", |_, _| {
            Err(io::ErrorKind::BrokenPipe.into())
        })
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn pruned_report_errors_propagate() {
    let err = write_pruned(&mut ClosedPipe, &ids(1), false, |id| id.clone()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}
