// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filtered listings over one record kind
//!
//! Two backends answer the same question: a structured selector evaluated by
//! the store, or a range scan over the kind's key prefix filtered in process.
//! Both return records in key order.

use crate::context::{decode, OperationContext, Stored};
use crate::error::LedgerError;
use scholar_core::QueryMode;
use scholar_storage::{Selector, Store};

/// Which backend serves a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Backend {
    Structured,
    Scan,
}

impl Backend {
    pub fn select(mode: QueryMode, store_supports_query: bool) -> Self {
        match mode {
            QueryMode::Structured => Backend::Structured,
            QueryMode::Scan => Backend::Scan,
            QueryMode::Auto if store_supports_query => Backend::Structured,
            QueryMode::Auto => Backend::Scan,
        }
    }
}

/// Every record of kind `T` matching `selector`, in key order
pub(crate) fn find<T: Stored, S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    selector: Selector,
) -> Result<Vec<T>, LedgerError> {
    let backend = Backend::select(ctx.config.query_mode, ctx.supports_query());
    let rows = match backend {
        Backend::Structured => {
            let selector = selector.eq("docType", T::KIND.as_str());
            ctx.query(&selector)?
        }
        Backend::Scan => ctx
            .range(T::KIND)?
            .into_iter()
            .filter(|(_, bytes)| selector.matches_bytes(bytes))
            .collect(),
    };
    tracing::trace!(kind = %T::KIND, ?backend, count = rows.len(), "listing");
    rows.iter().map(|(key, bytes)| decode(key, bytes)).collect()
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
