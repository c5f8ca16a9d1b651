// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! scholar-core: shared vocabulary for the academic ledger
//!
//! This crate provides:
//! - The deterministic clock abstraction (one instant per operation)
//! - Caller identity resolution from opaque credentials
//! - Record types for classes, materials, exams and grades
//! - Notification events emitted after a committed operation
//! - Ledger configuration

pub mod clock;
pub mod config;
pub mod event;
pub mod identity;
pub mod record;

pub use clock::{Clock, FakeClock, FixedClock, SystemClock};
pub use config::{ConfigError, LedgerConfig, QueryMode};
pub use event::Event;
pub use identity::{resolve, Caller, Credential, IdentityError, Organization};
pub use record::{
    Class, ClassSummary, Exam, Grade, Material, MaterialKind, MaterialSummary, Record,
    RecordError, RecordKind,
};
