// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the ledger programs

use chrono::{DateTime, Utc};
use scholar_core::{IdentityError, RecordError, RecordKind};
use scholar_storage::StoreError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Caller-facing classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    AccessDenied,
    InvalidArgument,
    TooEarly,
    NotYetAvailable,
    NotPublished,
    IdentityResolutionFailure,
    CapacityReached,
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::AccessDenied => "AccessDenied",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::TooEarly => "TooEarly",
            ErrorKind::NotYetAvailable => "NotYetAvailable",
            ErrorKind::NotPublished => "NotPublished",
            ErrorKind::IdentityResolutionFailure => "IdentityResolutionFailure",
            ErrorKind::CapacityReached => "CapacityReached",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Internal => "Internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by ledger operations. A failed operation commits nothing.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("identity resolution failed: {0}")]
    Identity(#[from] IdentityError),
    #[error("{kind} {id} does not exist")]
    NotFound { kind: RecordKind, id: String },
    #[error("{kind} {id} already exists")]
    AlreadyExists { kind: RecordKind, id: String },
    #[error("student {student_id} is already enrolled in class {class_id}")]
    AlreadyEnrolled {
        class_id: String,
        student_id: String,
    },
    #[error("student {student_id} is not enrolled in class {class_id}")]
    NotEnrolled {
        class_id: String,
        student_id: String,
    },
    #[error("module {module} already exists in class {class_id}")]
    ModuleExists { class_id: String, module: String },
    #[error("class {class_id} is full ({max_students} students)")]
    CapacityReached { class_id: String, max_students: u32 },
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("{operation} expects {expected} arguments, got {got}")]
    Arity {
        operation: &'static str,
        expected: String,
        got: usize,
    },
    #[error("exam {exam_id} takes place at {exam_date}; corrections are accepted from then on")]
    TooEarly {
        exam_id: String,
        exam_date: DateTime<Utc>,
    },
    #[error("correction for exam {exam_id} is already uploaded")]
    CorrectionAlreadyUploaded { exam_id: String },
    #[error("no correction has been uploaded for exam {exam_id}")]
    NoCorrection { exam_id: String },
    #[error("exam {exam_id} date is locked once a correction exists")]
    DateLocked { exam_id: String },
    #[error("correction for exam {exam_id} is not available until {available_at}")]
    NotYetAvailable {
        exam_id: String,
        available_at: DateTime<Utc>,
    },
    #[error("grade {grade_id} is not published yet")]
    NotPublished { grade_id: String },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("record error: {0}")]
    Record(#[from] RecordError),
    #[error("record at {key} is not a {expected}")]
    UnexpectedRecord { key: String, expected: RecordKind },
}

impl LedgerError {
    pub fn not_found(kind: RecordKind, id: &str) -> Self {
        LedgerError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn already_exists(kind: RecordKind, id: &str) -> Self {
        LedgerError::AlreadyExists {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        LedgerError::InvalidArgument(message.into())
    }

    /// Classification preserved across every layer
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Identity(_) => ErrorKind::IdentityResolutionFailure,
            LedgerError::NotFound { .. }
            | LedgerError::NotEnrolled { .. }
            | LedgerError::NoCorrection { .. } => ErrorKind::NotFound,
            LedgerError::AlreadyExists { .. }
            | LedgerError::AlreadyEnrolled { .. }
            | LedgerError::ModuleExists { .. }
            | LedgerError::CorrectionAlreadyUploaded { .. } => ErrorKind::AlreadyExists,
            LedgerError::CapacityReached { .. } => ErrorKind::CapacityReached,
            LedgerError::AccessDenied(_) => ErrorKind::AccessDenied,
            LedgerError::InvalidArgument(_)
            | LedgerError::UnknownOperation(_)
            | LedgerError::Arity { .. }
            | LedgerError::DateLocked { .. } => ErrorKind::InvalidArgument,
            LedgerError::TooEarly { .. } => ErrorKind::TooEarly,
            LedgerError::NotYetAvailable { .. } => ErrorKind::NotYetAvailable,
            LedgerError::NotPublished { .. } => ErrorKind::NotPublished,
            LedgerError::Store(StoreError::Conflict { .. } | StoreError::Phantom { .. }) => {
                ErrorKind::Conflict
            }
            LedgerError::Store(_) | LedgerError::Record(_) | LedgerError::UnexpectedRecord { .. } => {
                ErrorKind::Internal
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
