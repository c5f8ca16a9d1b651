// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op event sink for when notifications are disabled.

use super::{EventSink, NotifyError};

/// Event sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpEventSink;

impl NoOpEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for NoOpEventSink {
    fn emit(&self, _name: &str, _payload: &[u8]) -> Result<(), NotifyError> {
        Ok(())
    }
}
