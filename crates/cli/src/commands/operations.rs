// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `scholar operations` - List operations and their arguments

use crate::output::{self, OutputFormat};
use scholar_engine::{Signature, OPERATIONS};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
struct OperationEntry {
    name: &'static str,
    args: &'static [&'static str],
    optional: &'static [&'static str],
}

impl From<&Signature> for OperationEntry {
    fn from(s: &Signature) -> Self {
        Self {
            name: s.name,
            args: s.args,
            optional: s.optional,
        }
    }
}

impl fmt::Display for OperationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in self.args {
            write!(f, " <{}>", arg)?;
        }
        for arg in self.optional {
            write!(f, " [{}]", arg)?;
        }
        Ok(())
    }
}

pub fn list(format: OutputFormat) {
    let entries: Vec<OperationEntry> = OPERATIONS.iter().map(OperationEntry::from).collect();
    output::print_list(&entries, format);
}
