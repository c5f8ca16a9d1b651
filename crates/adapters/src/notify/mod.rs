// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event sinks
//!
//! The ledger hands each committed operation's events to an [`EventSink`].
//! Emission is fire-and-forget: the ledger logs a failed emit and moves on.

mod file;
mod noop;

pub use file::FileEventSink;
pub use noop::NoOpEventSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{EmitCall, FakeEventSink};

use thiserror::Error;

/// Errors from event emission
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("emit failed: {0}")]
    EmitFailed(String),
}

/// Destination for notification events
pub trait EventSink: Clone + Send + Sync + 'static {
    /// Emit one named event with its JSON payload
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), NotifyError>;
}
