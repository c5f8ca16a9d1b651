// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The substrate contract consumed by the ledger programs

use crate::selector::Selector;
use crate::wal::WalError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Commit sequence number; every committed batch bumps it by one
pub type Version = u64;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("read conflict on key {key}")]
    Conflict { key: String },
    #[error("phantom read in range [{start}, {end})")]
    Phantom { start: String, end: String },
    #[error("structured queries are not supported by this store")]
    QueryUnsupported,
    #[error("WAL error: {0}")]
    Wal(#[from] WalError),
}

/// A stored value with the version that last wrote it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Vec<u8>,
    pub version: Version,
}

/// A buffered mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Write {
    Put(Vec<u8>),
    Delete,
}

/// Mutations keyed by store key, applied in key order
pub type WriteSet = BTreeMap<String, Write>;

/// A range read and the keys it observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRead {
    pub start: String,
    pub end: String,
    pub observed: Vec<(String, Version)>,
}

/// Everything a transaction read and wants to write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    /// Key to the version seen (`None` if the key was absent)
    pub reads: BTreeMap<String, Option<Version>>,
    pub ranges: Vec<RangeRead>,
    pub writes: WriteSet,
}

/// Key-value store with optimistic multi-version commit
pub trait Store: Send + Sync {
    /// Current value of a key
    fn get(&self, key: &str) -> Result<Option<Entry>, StoreError>;

    /// All entries in `[start, end)`, in key order
    fn range(&self, start: &str, end: &str) -> Result<Vec<Entry>, StoreError>;

    /// Whether [`Store::query`] is available
    fn supports_query(&self) -> bool {
        false
    }

    /// Entries whose JSON document matches the selector, in key order.
    ///
    /// A transaction records only the returned keys, so a key that starts
    /// matching after the read does not fail its commit. Writers that depend
    /// on the absence of further matches read the key range with
    /// [`Store::range`] instead.
    fn query(&self, selector: &Selector) -> Result<Vec<Entry>, StoreError> {
        let _ = selector;
        Err(StoreError::QueryUnsupported)
    }

    /// Validate the read set and apply the writes atomically
    fn commit(&self, changes: Changeset) -> Result<Version, StoreError>;
}

impl<S: Store + ?Sized> Store for &S {
    fn get(&self, key: &str) -> Result<Option<Entry>, StoreError> {
        (**self).get(key)
    }

    fn range(&self, start: &str, end: &str) -> Result<Vec<Entry>, StoreError> {
        (**self).range(start, end)
    }

    fn supports_query(&self) -> bool {
        (**self).supports_query()
    }

    fn query(&self, selector: &Selector) -> Result<Vec<Entry>, StoreError> {
        (**self).query(selector)
    }

    fn commit(&self, changes: Changeset) -> Result<Version, StoreError> {
        (**self).commit(changes)
    }
}
