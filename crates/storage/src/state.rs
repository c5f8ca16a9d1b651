// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized key space built from committed write sets

use crate::selector::Selector;
use crate::store::{Changeset, Entry, StoreError, Version, Write, WriteSet};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Stored {
    value: Vec<u8>,
    version: Version,
}

/// Committed state: every live key with the version that last wrote it
#[derive(Debug, Default, Clone)]
pub struct MaterializedState {
    entries: BTreeMap<String, Stored>,
    version: Version,
}

impl MaterializedState {
    /// Version of the most recent committed batch
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<Entry> {
        self.entries.get(key).map(|s| Entry {
            key: key.to_string(),
            value: s.value.clone(),
            version: s.version,
        })
    }

    /// Entries in `[start, end)`; an inverted range is empty
    pub fn range(&self, start: &str, end: &str) -> Vec<Entry> {
        if start >= end {
            return Vec::new();
        }
        self.entries
            .range::<str, _>((
                std::ops::Bound::Included(start),
                std::ops::Bound::Excluded(end),
            ))
            .map(|(k, s)| Entry {
                key: k.clone(),
                value: s.value.clone(),
                version: s.version,
            })
            .collect()
    }

    pub fn query(&self, selector: &Selector) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|(_, s)| selector.matches_bytes(&s.value))
            .map(|(k, s)| Entry {
                key: k.clone(),
                value: s.value.clone(),
                version: s.version,
            })
            .collect()
    }

    /// Check that nothing a transaction read has changed since
    pub fn validate(&self, changes: &Changeset) -> Result<(), StoreError> {
        for (key, seen) in &changes.reads {
            let current = self.entries.get(key).map(|s| s.version);
            if current != *seen {
                return Err(StoreError::Conflict { key: key.clone() });
            }
        }
        for range in &changes.ranges {
            let current: Vec<(String, Version)> = self
                .range(&range.start, &range.end)
                .into_iter()
                .map(|e| (e.key, e.version))
                .collect();
            if current != range.observed {
                return Err(StoreError::Phantom {
                    start: range.start.clone(),
                    end: range.end.clone(),
                });
            }
        }
        Ok(())
    }

    /// Apply a write set as the next version, without validation
    pub fn apply(&mut self, writes: &WriteSet) -> Version {
        self.version += 1;
        for (key, write) in writes {
            match write {
                Write::Put(value) => {
                    self.entries.insert(
                        key.clone(),
                        Stored {
                            value: value.clone(),
                            version: self.version,
                        },
                    );
                }
                Write::Delete => {
                    self.entries.remove(key);
                }
            }
        }
        self.version
    }

    /// Validate then apply
    pub fn commit(&mut self, changes: &Changeset) -> Result<Version, StoreError> {
        self.validate(changes)?;
        Ok(self.apply(&changes.writes))
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
