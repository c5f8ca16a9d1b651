// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::notify::{EventSink, NotifyError};
use scholar_storage::{Changeset, Entry, Selector, Store, StoreError, Version};

/// Wrapper that adds tracing to any Store
#[derive(Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Store> Store for TracedStore<S> {
    fn get(&self, key: &str) -> Result<Option<Entry>, StoreError> {
        let result = self.inner.get(key);
        tracing::trace!(
            key,
            version = ?result.as_ref().ok().and_then(|e| e.as_ref().map(|e| e.version)),
            "get"
        );
        result
    }

    fn range(&self, start: &str, end: &str) -> Result<Vec<Entry>, StoreError> {
        let result = self.inner.range(start, end);
        tracing::debug!(
            start,
            end,
            count = result.as_ref().map(|v| v.len()).ok(),
            "range scanned"
        );
        result
    }

    fn supports_query(&self) -> bool {
        self.inner.supports_query()
    }

    fn query(&self, selector: &Selector) -> Result<Vec<Entry>, StoreError> {
        let result = self.inner.query(selector);
        match &result {
            Ok(hits) => tracing::debug!(?selector, count = hits.len(), "queried"),
            Err(e) => tracing::warn!(?selector, error = %e, "query failed"),
        }
        result
    }

    fn commit(&self, changes: Changeset) -> Result<Version, StoreError> {
        let span = tracing::info_span!(
            "store.commit",
            reads = changes.reads.len(),
            ranges = changes.ranges.len(),
            writes = changes.writes.len()
        );
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.commit(changes);
        let elapsed = start.elapsed();

        match &result {
            Ok(version) => tracing::info!(
                version,
                elapsed_ms = elapsed.as_millis() as u64,
                "committed"
            ),
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "commit rejected"
            ),
        }

        result
    }
}

/// Wrapper that adds tracing to any EventSink
#[derive(Clone)]
pub struct TracedEventSink<E> {
    inner: E,
}

impl<E> TracedEventSink<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: EventSink> EventSink for TracedEventSink<E> {
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), NotifyError> {
        let span = tracing::info_span!("event.emit", name);
        let _guard = span.enter();

        let result = self.inner.emit(name, payload);
        // Emission failures never fail the operation
        match &result {
            Ok(()) => tracing::debug!(payload_len = payload.len(), "emitted"),
            Err(e) => tracing::warn!(error = %e, "emit failed"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
