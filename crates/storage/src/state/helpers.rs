// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helper functions for state lookups.

use std::collections::HashMap;

/// Outcome of an ID lookup that accepts unique prefixes.
#[derive(Debug, PartialEq, Eq)]
pub enum PrefixMatch<'a, V> {
    Found(&'a V),
    NotFound,
    /// More than one key matched; holds the number of matches.
    Ambiguous(usize),
}

impl<'a, V> PrefixMatch<'a, V> {
    pub fn found(self) -> Option<&'a V> {
        match self {
            PrefixMatch::Found(v) => Some(v),
            PrefixMatch::NotFound | PrefixMatch::Ambiguous(_) => None,
        }
    }
}

/// Get a value by exact ID or unique prefix.
///
/// Matches against both the full key and the suffix after the type prefix
/// ("jin-"). This allows short IDs displayed without their type prefix to
/// resolve back to the full entry.
pub(crate) fn find_by_prefix<'a, V>(map: &'a HashMap<String, V>, id: &str) -> PrefixMatch<'a, V> {
    if let Some(val) = map.get(id) {
        return PrefixMatch::Found(val);
    }
    let mut matches = map
        .iter()
        .filter(|(k, _)| ji_core::id::prefix_matches(k, id))
        .map(|(_, v)| v);
    match (matches.next(), matches.next()) {
        (None, _) => PrefixMatch::NotFound,
        (Some(v), None) => PrefixMatch::Found(v),
        (Some(_), Some(_)) => PrefixMatch::Ambiguous(2 + matches.count()),
    }
}
