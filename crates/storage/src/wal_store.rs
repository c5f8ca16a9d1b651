// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable store: an in-memory key space backed by a write-ahead log
//!
//! Several handles, in one process or many, may share a log. Each commit
//! takes the [`WalLock`], applies whatever other handles appended since,
//! and only then validates its read set, so a stale transaction is rejected
//! instead of overwriting a newer write. Reads between commits see the log
//! as of open or this handle's last commit.

use crate::memory::MemoryStore;
use crate::selector::Selector;
use crate::state::MaterializedState;
use crate::store::{Changeset, Entry, Store, StoreError, Version};
use crate::wal::{Wal, WalLock};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Store whose commits are appended to a WAL before they become visible
#[derive(Clone)]
pub struct WalStore {
    memory: MemoryStore,
    wal: Arc<Mutex<Wal>>,
}

impl WalStore {
    /// Replay the log at `path` and open it for appending
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let _lock = WalLock::acquire(path)?;
        let wal = Wal::open(path)?;
        let mut state = MaterializedState::default();
        for entry in Wal::replay(path)? {
            state.apply(&entry.writes);
        }
        Ok(Self {
            memory: MemoryStore::from_state(state),
            wal: Arc::new(Mutex::new(wal)),
        })
    }

    pub fn version(&self) -> Version {
        self.memory.version()
    }
}

impl Store for WalStore {
    fn get(&self, key: &str) -> Result<Option<Entry>, StoreError> {
        self.memory.get(key)
    }

    fn range(&self, start: &str, end: &str) -> Result<Vec<Entry>, StoreError> {
        self.memory.range(start, end)
    }

    fn supports_query(&self) -> bool {
        self.memory.supports_query()
    }

    fn query(&self, selector: &Selector) -> Result<Vec<Entry>, StoreError> {
        self.memory.query(selector)
    }

    fn commit(&self, changes: Changeset) -> Result<Version, StoreError> {
        if changes.writes.is_empty() {
            return Ok(self.version());
        }
        let mut wal = self.wal.lock().unwrap_or_else(|e| e.into_inner());
        let _lock = WalLock::acquire(wal.path())?;

        let mut state = self.memory.write_state();
        let appended = wal.catch_up()?;
        if !appended.is_empty() {
            tracing::debug!(entries = appended.len(), "applying entries from other writers");
        }
        for entry in &appended {
            state.apply(&entry.writes);
        }

        state.validate(&changes)?;
        wal.append(&changes.writes)?;
        Ok(state.apply(&changes.writes))
    }
}

#[cfg(test)]
#[path = "wal_store_tests.rs"]
mod tests;
