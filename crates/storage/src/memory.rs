// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process store

use crate::selector::Selector;
use crate::state::MaterializedState;
use crate::store::{Changeset, Entry, Store, StoreError, Version, WriteSet};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// Shared in-memory store. Clones see the same key space.
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<RwLock<MaterializedState>>,
    structured_queries: bool,
}

impl MemoryStore {
    /// A store that evaluates structured queries natively
    pub fn new() -> Self {
        Self::from_state(MaterializedState::default())
    }

    /// A store that offers only get and range scans
    pub fn scan_only() -> Self {
        Self {
            structured_queries: false,
            ..Self::new()
        }
    }

    pub fn from_state(state: MaterializedState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            structured_queries: true,
        }
    }

    /// Same key space, structured queries disabled
    pub fn without_queries(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            structured_queries: false,
        }
    }

    /// Current committed version
    pub fn version(&self) -> Version {
        self.state.read().unwrap_or_else(|e| e.into_inner()).version()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.state.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exclusive access to the key space; commits hold it from validation
    /// through application
    pub(crate) fn write_state(&self) -> RwLockWriteGuard<'_, MaterializedState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Validate, run `before_apply` (e.g. durable logging), then apply.
    ///
    /// The write lock is held throughout, so validation and application are
    /// atomic with respect to every other commit.
    pub(crate) fn commit_with<F>(
        &self,
        changes: Changeset,
        before_apply: F,
    ) -> Result<Version, StoreError>
    where
        F: FnOnce(&WriteSet) -> Result<(), StoreError>,
    {
        let mut state = self.write_state();
        state.validate(&changes)?;
        before_apply(&changes.writes)?;
        Ok(state.apply(&changes.writes))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Entry>, StoreError> {
        Ok(self.state.read().unwrap_or_else(|e| e.into_inner()).get(key))
    }

    fn range(&self, start: &str, end: &str) -> Result<Vec<Entry>, StoreError> {
        Ok(self
            .state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .range(start, end))
    }

    fn supports_query(&self) -> bool {
        self.structured_queries
    }

    fn query(&self, selector: &Selector) -> Result<Vec<Entry>, StoreError> {
        if !self.structured_queries {
            return Err(StoreError::QueryUnsupported);
        }
        Ok(self
            .state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .query(selector))
    }

    fn commit(&self, changes: Changeset) -> Result<Version, StoreError> {
        if changes.writes.is_empty() {
            return Ok(self.version());
        }
        self.commit_with(changes, |_| Ok(()))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
