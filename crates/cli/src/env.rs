// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-driven configuration: state directory and log filter.

use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Overrides the state directory.
pub const STATE_DIR_VAR: &str = "JI_STATE_DIR";

/// `EnvFilter` directives for log output.
pub const LOG_VAR: &str = "JI_LOG";

const DEFAULT_LOG: &str = "warn";

/// Resolve the state directory.
///
/// Order: `--state-dir`, `JI_STATE_DIR`, `$XDG_STATE_HOME/ji`,
/// `$HOME/.local/state/ji`. Empty variables are ignored.
pub fn state_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    resolve_state_dir(flag, |key| std::env::var(key).ok(), dirs::home_dir())
}

fn resolve_state_dir(
    flag: Option<PathBuf>,
    var: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    let lookup = |key: &str| var(key).filter(|v| !v.is_empty());
    if let Some(dir) = lookup(STATE_DIR_VAR) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = lookup("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("ji"));
    }
    match home {
        Some(home) => Ok(home.join(".local").join("state").join("ji")),
        None => bail!("cannot determine state directory: set {STATE_DIR_VAR} or pass --state-dir"),
    }
}

/// Install the stderr subscriber. Invalid `JI_LOG` directives fall back to `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
