// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secondary indexes over job info records.

use ji_core::{IndexedField, JobInfo, JobInfoId};
use std::collections::btree_set::Range;
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

type Posting = BTreeSet<JobInfoId>;

#[derive(Debug, Default, Clone)]
pub(super) struct Index {
    /// field → value → ids with that exact value
    by_field: HashMap<IndexedField, HashMap<String, Posting>>,
    /// (date_ms, id), ordered by creation time
    by_date: BTreeSet<(u64, JobInfoId)>,
}

impl Index {
    pub(super) fn insert(&mut self, info: &JobInfo) {
        for (field, value) in info.indexed_values() {
            self.by_field
                .entry(field)
                .or_default()
                .entry(value.to_string())
                .or_default()
                .insert(info.id.clone());
        }
        self.by_date.insert((info.date_ms, info.id.clone()));
    }

    pub(super) fn remove(&mut self, info: &JobInfo) {
        for (field, value) in info.indexed_values() {
            let Some(values) = self.by_field.get_mut(&field) else {
                continue;
            };
            if let Some(ids) = values.get_mut(value) {
                ids.remove(&info.id);
                if ids.is_empty() {
                    values.remove(value);
                }
            }
        }
        self.by_date.remove(&(info.date_ms, info.id.clone()));
    }

    /// Ids whose `field` equals `value`.
    pub(super) fn posting(&self, field: IndexedField, value: &str) -> Option<&Posting> {
        self.by_field.get(&field)?.get(value)
    }

    /// The smallest posting list among the filters. `None` when any filter
    /// has no matches, since the conjunction is then empty.
    pub(super) fn smallest_posting(&self, filters: &[(IndexedField, String)]) -> Option<&Posting> {
        let mut smallest: Option<&Posting> = None;
        for (field, value) in filters {
            let posting = self.posting(*field, value)?;
            if smallest.map_or(true, |s| posting.len() < s.len()) {
                smallest = Some(posting);
            }
        }
        smallest
    }

    /// Entries with `since <= date < until`, in date order.
    pub(super) fn date_range(
        &self,
        since_ms: Option<u64>,
        until_ms: Option<u64>,
    ) -> Range<'_, (u64, JobInfoId)> {
        // The empty id sorts before every real id, so (t, "") bounds all of t.
        let key = |ms: u64| (ms, JobInfoId::from_string(""));
        if let (Some(since), Some(until)) = (since_ms, until_ms) {
            if since >= until {
                return self
                    .by_date
                    .range((Bound::Included(key(since)), Bound::Excluded(key(since))));
            }
        }
        let lower = since_ms.map_or(Bound::Unbounded, |ms| Bound::Included(key(ms)));
        let upper = until_ms.map_or(Bound::Unbounded, |ms| Bound::Excluded(key(ms)));
        self.by_date.range((lower, upper))
    }

    #[cfg(test)]
    pub(super) fn field_value_count(&self, field: IndexedField) -> usize {
        self.by_field.get(&field).map_or(0, HashMap::len)
    }

    #[cfg(test)]
    pub(super) fn date_len(&self) -> usize {
        self.by_date.len()
    }
}
