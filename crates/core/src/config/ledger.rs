// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ledger configuration
//!
//! Loaded from the `[ledger]` table of a TOML file:
//!
//! ```toml
//! [ledger]
//! correction_delay = "24h"
//! query_mode = "auto"
//! ```

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default delay between an exam and the moment learners may read its correction
pub const DEFAULT_CORRECTION_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("correction delay out of range: {0}")]
    DelayOutOfRange(String),
}

/// Which backend serves filtered listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Structured queries when the store supports them, scan otherwise
    #[default]
    Auto,
    /// Always range-scan and filter in process
    Scan,
    /// Always use structured queries
    Structured,
}

/// Settings every replica must agree on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Applied uniformly to every exam: `correction_available_at = exam_date + delay`
    #[serde(with = "humantime_serde")]
    pub correction_delay: Duration,
    pub query_mode: QueryMode,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            correction_delay: DEFAULT_CORRECTION_DELAY,
            query_mode: QueryMode::Auto,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    ledger: LedgerConfig,
}

impl LedgerConfig {
    pub fn with_correction_delay(mut self, delay: Duration) -> Self {
        self.correction_delay = delay;
        self
    }

    pub fn with_query_mode(mut self, mode: QueryMode) -> Self {
        self.query_mode = mode;
        self
    }

    /// Parse the `[ledger]` table of a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.ledger.validate()?;
        Ok(file.ledger)
    }

    /// Load from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// The correction delay as a signed calendar delta
    pub fn correction_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.correction_delay).unwrap_or(TimeDelta::MAX)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        TimeDelta::from_std(self.correction_delay)
            .map(|_| ())
            .map_err(|_| {
                ConfigError::DelayOutOfRange(
                    humantime::format_duration(self.correction_delay).to_string(),
                )
            })
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
