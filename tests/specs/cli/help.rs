//! CLI help output specs

use crate::prelude::*;

#[test]
fn ji_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn ji_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("create")
        .stdout_has("show")
        .stdout_has("list")
        .stdout_has("prune")
        .stdout_has("compact");
}

#[test]
fn ji_create_help_lists_field_flags() {
    cli()
        .args(&["create", "--help"])
        .passes()
        .stdout_has("--status")
        .stdout_has("--remote-addr")
        .stdout_has("--mapper")
        .stdout_has("--reducer")
        .stdout_has("--query")
        .stdout_has("--corpus")
        .stdout_has("--revision");
}

#[test]
fn ji_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["frobnicate"]).fails().stderr_has("frobnicate");
}
