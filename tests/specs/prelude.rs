//! Shared helpers for CLI specs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

pub use serde_json::Value;
pub use similar_asserts::assert_eq;
use tempfile::TempDir;

/// Run `ji` with no state directory configured.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// A throwaway state directory.
pub struct Store {
    dir: TempDir,
}

impl Store {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn wal_path(&self) -> PathBuf {
        self.path().join("wal").join("events.wal")
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.path().join("snapshot.zst")
    }

    /// `ji` bound to this store via `JI_STATE_DIR`.
    pub fn ji(&self) -> CliBuilder {
        let mut builder = CliBuilder::new();
        builder.cmd.env("JI_STATE_DIR", self.path());
        builder
    }

    /// Create a record and return its id.
    pub fn create(&self, args: &[&str]) -> String {
        let mut full = vec!["create"];
        full.extend_from_slice(args);
        self.ji().args(&full).passes().stdout().trim().to_string()
    }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    fn new() -> Self {
        let mut cmd = assert_cmd::Command::cargo_bin("ji").unwrap();
        cmd.env_remove("JI_STATE_DIR")
            .env_remove("JI_LOG")
            .env_remove("COLOR")
            .env("NO_COLOR", "1");
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn run(mut self) -> RunAssert {
        RunAssert {
            output: self.cmd.output().unwrap(),
        }
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstderr:\n{}",
            run.output.status.code(),
            run.stderr()
        );
        run
    }

    /// Run and require a non-zero exit code.
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}",
            run.stdout()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.output.stdout).unwrap()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout has {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }
}
