// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Scholar ledger programs
//!
//! Every operation runs as one unit: the caller is resolved, a single
//! timestamp is taken from the clock, the matching program reads and writes
//! records through one [`Transaction`](scholar_storage::Transaction), and
//! only after the transaction commits are its events handed to the sink.

mod access;
mod class;
mod context;
mod error;
mod exam;
mod grade;
mod ledger;
mod material;
mod operation;
mod query;
mod response;

#[cfg(test)]
mod testing;

pub use access::Decision;
pub use error::{ErrorKind, LedgerError};
pub use ledger::Ledger;
pub use operation::{Operation, Signature, OPERATIONS};
pub use response::{ContentRef, ExamView, Response};
