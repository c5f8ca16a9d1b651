// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured results returned to callers

use chrono::{DateTime, Utc};
use scholar_core::{Caller, Class, ClassSummary, Exam, Grade, MaterialSummary};
use serde::Serialize;

/// Result of a successful operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Mutations return nothing
    Empty,
    Class(Class),
    Classes(Vec<ClassSummary>),
    Materials(Vec<MaterialSummary>),
    Content(ContentRef),
    Exam(ExamView),
    Exams(Vec<ExamView>),
    Grade(Grade),
    Grades(Vec<Grade>),
}

/// An opaque content pointer handed out after an access check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRef {
    pub id: String,
    pub content_ref: String,
}

/// Exam as seen by a particular caller at a particular instant.
///
/// Content and correction pointers are never part of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamView {
    pub id: String,
    pub class_id: String,
    pub module_id: String,
    pub title: String,
    pub exam_date: DateTime<Utc>,
    pub correction_available_at: DateTime<Utc>,
    pub correction_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction_uploaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ExamView {
    /// Institution callers see any uploaded correction as available, plus
    /// upload and creator details. Everyone else sees it only once the
    /// availability window has opened.
    pub fn new(exam: &Exam, caller: &Caller, now: DateTime<Utc>, available_at: DateTime<Utc>) -> Self {
        let privileged = caller.is_institution();
        let correction_available = if privileged {
            exam.has_correction()
        } else {
            exam.has_correction() && now >= available_at
        };
        Self {
            id: exam.id.clone(),
            class_id: exam.class_id.clone(),
            module_id: exam.module_id.clone(),
            title: exam.title.clone(),
            exam_date: exam.exam_date,
            correction_available_at: available_at,
            correction_available,
            correction_uploaded_at: privileged.then_some(exam.correction_uploaded_at).flatten(),
            created_by: privileged.then(|| exam.created_by.clone()),
            created_at: privileged.then_some(exam.created_at),
        }
    }
}
