// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::notify::FakeEventSink;
use scholar_storage::{MemoryStore, Transaction};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, T>(f: F) -> (String, T)
where
    F: FnOnce() -> T,
{
    let logs = CapturedLogs::new();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);

    (logs.contents(), result)
}

// =============================================================================
// Tracing output verification tests
// =============================================================================

#[test]
fn traced_store_commit_logs_span_and_version() {
    let (logs, result) = with_tracing(|| {
        let store = TracedStore::new(MemoryStore::new());
        let mut txn = Transaction::new(&store);
        txn.put("CLASS_C1", b"{}".to_vec());
        txn.commit()
    });

    assert!(result.is_ok(), "commit should succeed: {:?}", result);
    assert!(
        logs.contains("store.commit"),
        "Should log span name. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("committed"),
        "Should log completion. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("elapsed_ms"),
        "Should log timing. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_store_logs_rejected_commit() {
    let (logs, result) = with_tracing(|| {
        let store = TracedStore::new(MemoryStore::new());
        let mut stale = Transaction::new(&store);
        stale.get("k").unwrap();
        stale.put("k", b"late".to_vec());

        let mut first = Transaction::new(&store);
        first.put("k", b"early".to_vec());
        first.commit().unwrap();

        stale.commit()
    });

    assert!(result.is_err());
    assert!(
        logs.contains("commit rejected"),
        "Should log rejection. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_store_logs_range_count() {
    let (logs, _) = with_tracing(|| {
        let store = TracedStore::new(MemoryStore::new());
        store.range("CLASS_", "CLASS`")
    });

    assert!(
        logs.contains("range scanned"),
        "Should log scan. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_sink_logs_failure() {
    let (logs, result) = with_tracing(|| {
        let traced = TracedEventSink::new(FakeEventSink::failing("bus down"));
        traced.emit("GradePublished", b"{}")
    });

    assert!(result.is_err());
    assert!(
        logs.contains("event.emit"),
        "Should log span name. Logs:\n{}",
        logs
    );
    assert!(
        logs.contains("emit failed"),
        "Should log failure. Logs:\n{}",
        logs
    );
}

// =============================================================================
// Delegation tests - verify traced wrapper delegates to inner adapter
// =============================================================================

#[test]
fn traced_store_delegates_to_inner() {
    let memory = MemoryStore::without_queries(&MemoryStore::new());
    let store = TracedStore::new(memory.clone());

    let mut txn = Transaction::new(&store);
    txn.put("k", b"v".to_vec());
    txn.commit().unwrap();

    assert!(!store.supports_query());
    assert_eq!(memory.get("k").unwrap().unwrap().value, b"v");
}

#[test]
fn traced_sink_delegates_to_inner() {
    let fake = FakeEventSink::new();
    let traced = TracedEventSink::new(fake.clone());

    traced.emit("ClassCreated", br#"{"classId":"C1"}"#).unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "ClassCreated");
}
