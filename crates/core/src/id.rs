// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record identifiers and prefix lookup.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Length of the random part of a generated id.
const RANDOM_LEN: usize = 19;

/// Truncate to at most `n` bytes.
pub fn short(s: &str, n: usize) -> &str {
    s.get(..n).unwrap_or(s)
}

/// Whether `query` identifies `key`: a prefix of the full key, or of the
/// part after its type prefix (up to and including the first `-`).
///
/// Empty queries never match.
pub fn prefix_matches(key: &str, query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    key.starts_with(query)
        || key
            .split_once('-')
            .is_some_and(|(_, rest)| rest.starts_with(query))
}

/// Unique identifier for a job info record.
///
/// Assigned by the store when the record is created, as `jin-` plus a
/// 19-character nanoid (23 bytes, stored inline by `SmolStr`). Two records
/// with identical fields still receive distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobInfoId(SmolStr);

impl JobInfoId {
    pub const PREFIX: &'static str = "jin-";

    /// Generate a fresh random id.
    pub fn new() -> Self {
        let mut id = String::with_capacity(Self::PREFIX.len() + RANDOM_LEN);
        id.push_str(Self::PREFIX);
        id.push_str(&nanoid::nanoid!(RANDOM_LEN));
        Self(SmolStr::new(id))
    }

    /// Wrap an existing id (WAL replay, CLI input).
    pub fn from_string(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The random part, without `jin-`.
    pub fn suffix(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// First `n` bytes of [`suffix`](Self::suffix), as shown in listings.
    pub fn short(&self, n: usize) -> &str {
        short(self.suffix(), n)
    }
}

impl Default for JobInfoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobInfoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobInfoId {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl From<String> for JobInfoId {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

impl PartialEq<str> for JobInfoId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JobInfoId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Borrow<str> for JobInfoId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for JobInfoId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
