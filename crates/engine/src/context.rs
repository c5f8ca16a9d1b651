// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-operation execution context

use crate::error::LedgerError;
use chrono::{DateTime, TimeDelta, Utc};
use scholar_core::{Caller, Class, Event, Exam, Grade, LedgerConfig, Material, Record, RecordKind};
use scholar_storage::{Selector, Store, Transaction};

/// A record type that can be loaded by id
pub(crate) trait Stored: Into<Record> + Sized {
    const KIND: RecordKind;

    fn from_record(record: Record) -> Option<Self>;
}

impl Stored for Class {
    const KIND: RecordKind = RecordKind::Class;

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Class(c) => Some(c),
            _ => None,
        }
    }
}

impl Stored for Material {
    const KIND: RecordKind = RecordKind::Material;

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Material(m) => Some(m),
            _ => None,
        }
    }
}

impl Stored for Exam {
    const KIND: RecordKind = RecordKind::Exam;

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Exam(e) => Some(e),
            _ => None,
        }
    }
}

impl Stored for Grade {
    const KIND: RecordKind = RecordKind::Grade;

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Grade(g) => Some(g),
            _ => None,
        }
    }
}

/// Decode a stored document as the expected record type
pub(crate) fn decode<T: Stored>(key: &str, bytes: &[u8]) -> Result<T, LedgerError> {
    T::from_record(Record::decode(bytes)?).ok_or_else(|| LedgerError::UnexpectedRecord {
        key: key.to_string(),
        expected: T::KIND,
    })
}

/// Everything one operation sees: who is calling, the agreed instant, and
/// a transaction over the record store. Events are buffered until commit.
pub(crate) struct OperationContext<'a, S: Store + ?Sized> {
    pub caller: Caller,
    pub now: DateTime<Utc>,
    pub config: &'a LedgerConfig,
    txn: Transaction<'a, S>,
    events: Vec<Event>,
}

impl<'a, S: Store + ?Sized> OperationContext<'a, S> {
    pub fn new(store: &'a S, caller: Caller, now: DateTime<Utc>, config: &'a LedgerConfig) -> Self {
        Self {
            caller,
            now,
            config,
            txn: Transaction::new(store),
            events: Vec::new(),
        }
    }

    pub fn correction_delay(&self) -> TimeDelta {
        self.config.correction_delta()
    }

    pub fn fetch<T: Stored>(&mut self, id: &str) -> Result<Option<T>, LedgerError> {
        let key = T::KIND.key(id);
        match self.txn.get(&key)? {
            Some(bytes) => decode(&key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Load a record, failing with NotFound if absent
    pub fn require<T: Stored>(&mut self, id: &str) -> Result<T, LedgerError> {
        self.fetch(id)?
            .ok_or_else(|| LedgerError::not_found(T::KIND, id))
    }

    pub fn exists(&mut self, kind: RecordKind, id: &str) -> Result<bool, LedgerError> {
        Ok(self.txn.get(&kind.key(id))?.is_some())
    }

    /// Fail with AlreadyExists if the key is occupied
    pub fn ensure_vacant(&mut self, kind: RecordKind, id: &str) -> Result<(), LedgerError> {
        if self.exists(kind, id)? {
            return Err(LedgerError::already_exists(kind, id));
        }
        Ok(())
    }

    pub fn save(&mut self, record: impl Into<Record>) -> Result<(), LedgerError> {
        let record = record.into();
        let bytes = record.encode()?;
        self.txn.put(record.key(), bytes);
        Ok(())
    }

    pub fn remove(&mut self, kind: RecordKind, id: &str) {
        self.txn.delete(kind.key(id));
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn supports_query(&self) -> bool {
        self.txn.supports_query()
    }

    pub fn range(&mut self, kind: RecordKind) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let (start, end) = kind.key_range();
        Ok(self.txn.range(&start, &end)?)
    }

    pub fn query(&mut self, selector: &Selector) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        Ok(self.txn.query(selector)?)
    }

    pub fn into_parts(self) -> (Transaction<'a, S>, Vec<Event>) {
        (self.txn, self.events)
    }
}
