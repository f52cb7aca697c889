// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn not_found_message_and_code() {
    let err = ExitError::not_found("job info", "jin-abc");
    assert_eq!(err.code, 1);
    assert_eq!(err.to_string(), "job info not found: jin-abc");
}

#[test]
fn exit_code_from_exit_error() {
    let err = anyhow::Error::new(ExitError::new(3, "boom"));
    assert_eq!(exit_code(&err), 3);
}

#[test]
fn exit_code_defaults_for_other_errors() {
    let err = anyhow::anyhow!("invalid duration: 5x");
    assert_eq!(exit_code(&err), 1);
}
