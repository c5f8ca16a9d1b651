// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with suggestions and exit codes.

use crate::output::OutputFormat;
use scholar_engine::{ErrorKind, LedgerError, Signature};
use serde::Serialize;
use std::fmt;
use std::process::ExitCode;

/// Failure reported to the terminal.
#[derive(Debug, Serialize)]
pub struct ScholarError {
    /// Ledger classification, absent for local failures
    pub kind: Option<ErrorKind>,
    /// What went wrong
    pub message: String,
    /// How to fix it
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ScholarError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: None,
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn from_ledger(err: &LedgerError) -> Self {
        let mut out = ScholarError::new(err.to_string());
        out.kind = Some(err.kind());
        match err {
            LedgerError::UnknownOperation(_) => {
                out.with_suggestion("List available operations with: scholar operations")
            }
            LedgerError::Arity { operation, .. } => match Signature::lookup(operation) {
                Some(sig) => out.with_suggestion(format!("Usage: scholar invoke {}", usage(sig))),
                None => out,
            },
            LedgerError::Identity(_) => out
                .with_suggestion("Pass --subject with a CN, e.g. --subject prof")
                .with_suggestion("Or pass a credential JSON with --credential-file"),
            _ => out,
        }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self.kind {
            None => 1,
            Some(ErrorKind::NotFound) => 3,
            Some(ErrorKind::AlreadyExists) => 4,
            Some(ErrorKind::AccessDenied) => 5,
            Some(ErrorKind::InvalidArgument) => 6,
            Some(ErrorKind::TooEarly) => 7,
            Some(ErrorKind::NotYetAvailable) => 8,
            Some(ErrorKind::NotPublished) => 9,
            Some(ErrorKind::IdentityResolutionFailure) => 10,
            Some(ErrorKind::CapacityReached) => 11,
            Some(ErrorKind::Conflict) => 12,
            Some(ErrorKind::Internal) => 13,
        }
    }
}

impl From<&anyhow::Error> for ScholarError {
    fn from(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<LedgerError>() {
            Some(ledger) => ScholarError::from_ledger(ledger),
            None => ScholarError::new(format!("{:#}", err)),
        }
    }
}

impl fmt::Display for ScholarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => writeln!(f, "error[{}]: {}", kind, self.message)?,
            None => writeln!(f, "error: {}", self.message)?,
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

fn usage(sig: &Signature) -> String {
    let mut out = sig.name.to_string();
    for arg in sig.args {
        out.push_str(&format!(" <{}>", arg));
    }
    for arg in sig.optional {
        out.push_str(&format!(" [{}]", arg));
    }
    out
}

/// Print the error to stderr and return its exit status
pub fn report(err: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let err = ScholarError::from(err);
    match format {
        OutputFormat::Text => eprint!("{}", err),
        OutputFormat::Json => match serde_json::to_string(&err) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprint!("{}", err),
        },
    }
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
