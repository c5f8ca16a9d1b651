// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured predicates over JSON documents
//!
//! A selector is a conjunction of per-field conditions on top-level fields,
//! in the spirit of a CouchDB `selector`. The same matcher serves stores that
//! evaluate queries natively and callers filtering a range scan in process.

use serde_json::Value;
use std::collections::BTreeMap;

/// Condition on a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value
    Eq(Value),
    /// Field equals one of the values
    In(Vec<Value>),
}

impl Condition {
    fn matches(&self, field: Option<&Value>) -> bool {
        match (self, field) {
            (Condition::Eq(expected), Some(actual)) => expected == actual,
            (Condition::In(options), Some(actual)) => options.iter().any(|o| o == actual),
            (_, None) => false,
        }
    }
}

/// A conjunction of field conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    conditions: BTreeMap<String, Condition>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions
            .insert(field.into(), Condition::Eq(value.into()));
        self
    }

    /// Require `field` to be one of `values`
    pub fn one_of<V: Into<Value>>(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions.insert(field.into(), Condition::In(values));
        self
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Evaluate against a decoded document. Non-objects never match.
    pub fn matches(&self, doc: &Value) -> bool {
        let Some(object) = doc.as_object() else {
            return false;
        };
        self.conditions
            .iter()
            .all(|(field, cond)| cond.matches(object.get(field)))
    }

    /// Evaluate against raw bytes. Undecodable documents never match.
    pub fn matches_bytes(&self, bytes: &[u8]) -> bool {
        serde_json::from_slice::<Value>(bytes)
            .map(|doc| self.matches(&doc))
            .unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
