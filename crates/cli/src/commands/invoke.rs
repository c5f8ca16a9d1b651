// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `scholar invoke <operation> [args...]` - Run one ledger operation

use crate::output::{self, OutputFormat, Rendered};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use scholar_adapters::{FileEventSink, TracedEventSink, TracedStore};
use scholar_core::{Clock, Credential, FixedClock, LedgerConfig, SystemClock};
use scholar_engine::Ledger;
use scholar_storage::WalStore;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct InvokeArgs {
    /// Operation name, e.g. CreateClass
    pub operation: String,

    /// Operation arguments, in order
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Membership-service id of the caller's organization
    #[arg(long, default_value = "InstitutionMSP")]
    pub org: String,

    /// Caller subject: a distinguished name, or a bare common name
    #[arg(long, required_unless_present = "credential_file")]
    pub subject: Option<String>,

    /// Read the credential JSON from a file instead
    #[arg(long, conflicts_with_all = ["org", "subject"])]
    pub credential_file: Option<PathBuf>,

    /// Operation timestamp (RFC 3339) [default: now]
    #[arg(long)]
    pub at: Option<String>,
}

impl InvokeArgs {
    fn credential(&self) -> Result<Vec<u8>> {
        if let Some(path) = &self.credential_file {
            return std::fs::read(path)
                .with_context(|| format!("reading credential {}", path.display()));
        }
        let subject = self.subject.as_deref().unwrap_or_default();
        let subject = if subject.contains('=') {
            subject.to_string()
        } else {
            format!("CN={}", subject)
        };
        Ok(Credential::new(self.org.as_str(), subject).to_bytes())
    }

    fn timestamp(&self) -> Result<DateTime<Utc>> {
        match &self.at {
            Some(at) => Ok(DateTime::parse_from_rfc3339(at)
                .with_context(|| format!("invalid --at timestamp {:?}", at))?
                .with_timezone(&Utc)),
            None => Ok(SystemClock.now()),
        }
    }
}

pub fn invoke(args: InvokeArgs, store_dir: &Path, config_path: &Path, format: OutputFormat) -> Result<()> {
    let config = LedgerConfig::load(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let credential = args.credential()?;
    let clock = FixedClock(args.timestamp()?);

    let wal_path = store_dir.join("ledger.wal");
    tracing::debug!(wal = %wal_path.display(), "opening ledger");
    let store = WalStore::open(&wal_path)
        .with_context(|| format!("opening ledger {}", wal_path.display()))?;
    let events = FileEventSink::new(store_dir.join("events.jsonl"));

    let ledger = Ledger::new(
        TracedStore::new(store),
        TracedEventSink::new(events),
        clock,
        config,
    );
    let response = ledger.invoke(&credential, &args.operation, &args.args)?;
    output::print(&Rendered(&response), format);
    Ok(())
}
