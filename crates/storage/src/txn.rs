// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-operation transaction
//!
//! Reads observe committed state and are recorded with the version seen.
//! Writes are buffered and invisible, even to this transaction, until
//! [`Transaction::commit`]. Dropping a transaction discards its writes.

use crate::selector::Selector;
use crate::store::{Changeset, RangeRead, Store, StoreError, Version, Write};

pub struct Transaction<'s, S: Store + ?Sized> {
    store: &'s S,
    changes: Changeset,
}

impl<'s, S: Store + ?Sized> Transaction<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            changes: Changeset::default(),
        }
    }

    /// Whether the underlying store evaluates structured queries
    pub fn supports_query(&self) -> bool {
        self.store.supports_query()
    }

    pub fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entry = self.store.get(key)?;
        self.changes
            .reads
            .entry(key.to_string())
            .or_insert(entry.as_ref().map(|e| e.version));
        Ok(entry.map(|e| e.value))
    }

    /// Key-value pairs in `[start, end)`, in key order
    pub fn range(&mut self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        let entries = self.store.range(start, end)?;
        self.changes.ranges.push(RangeRead {
            start: start.to_string(),
            end: end.to_string(),
            observed: entries.iter().map(|e| (e.key.clone(), e.version)).collect(),
        });
        Ok(entries.into_iter().map(|e| (e.key, e.value)).collect())
    }

    /// Key-value pairs matching the selector, in key order.
    ///
    /// Each returned key joins the read set; keys that start matching later
    /// are not detected.
    pub fn query(&mut self, selector: &Selector) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        let entries = self.store.query(selector)?;
        for e in &entries {
            self.changes
                .reads
                .entry(e.key.clone())
                .or_insert(Some(e.version));
        }
        Ok(entries.into_iter().map(|e| (e.key, e.value)).collect())
    }

    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.changes.writes.insert(key.into(), Write::Put(value));
    }

    pub fn delete(&mut self, key: impl Into<String>) {
        self.changes.writes.insert(key.into(), Write::Delete);
    }

    pub fn is_read_only(&self) -> bool {
        self.changes.writes.is_empty()
    }

    /// Keys this transaction will write
    pub fn write_keys(&self) -> impl Iterator<Item = &str> {
        self.changes.writes.keys().map(String::as_str)
    }

    /// Submit the changeset. Read-only transactions commit nothing and
    /// return `None`.
    pub fn commit(self) -> Result<Option<Version>, StoreError> {
        if self.is_read_only() {
            return Ok(None);
        }
        self.store.commit(self.changes).map(Some)
    }
}

#[cfg(test)]
#[path = "txn_tests.rs"]
mod tests;
