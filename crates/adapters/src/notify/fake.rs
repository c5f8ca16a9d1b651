// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake event sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{EventSink, NotifyError};
use std::sync::{Arc, Mutex};

/// Recorded emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitCall {
    pub name: String,
    pub payload: Vec<u8>,
}

impl EmitCall {
    /// Payload decoded as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.payload).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Default)]
struct FakeState {
    calls: Vec<EmitCall>,
    fail_with: Option<String>,
}

/// Fake event sink for testing
#[derive(Clone, Default)]
pub struct FakeEventSink {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every emit fails after recording the call
    pub fn failing(message: &str) -> Self {
        let sink = Self::new();
        sink.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_with = Some(message.to_string());
        sink
    }

    /// Get all recorded emissions
    pub fn calls(&self) -> Vec<EmitCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Names of recorded emissions, in order
    pub fn names(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.name).collect()
    }
}

impl EventSink for FakeEventSink {
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), NotifyError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.calls.push(EmitCall {
            name: name.to_string(),
            payload: payload.to_vec(),
        });
        match &inner.fail_with {
            Some(message) => Err(NotifyError::EmitFailed(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
