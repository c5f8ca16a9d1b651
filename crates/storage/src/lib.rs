// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Versioned key-value substrate for the academic ledger
//!
//! Ledger programs see the store only through [`Transaction`]: reads are
//! recorded in a read set, writes are buffered, and commit validates the read
//! set against current versions before applying anything.

mod memory;
mod selector;
mod state;
mod store;
mod txn;
mod wal;
mod wal_store;

pub use memory::MemoryStore;
pub use selector::{Condition, Selector};
pub use state::MaterializedState;
pub use store::{Changeset, Entry, RangeRead, Store, StoreError, Version, Write, WriteSet};
pub use txn::Transaction;
pub use wal::{Wal, WalEntry, WalError, WalLock};
pub use wal_store::WalStore;
