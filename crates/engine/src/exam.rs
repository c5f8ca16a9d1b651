// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exam program
//!
//! A correction may enter the ledger only once the exam has taken place, and
//! learners may read it only after `exam_date + correction_delay`. Both gates
//! use the operation's single agreed timestamp.

use crate::access;
use crate::context::OperationContext;
use crate::error::LedgerError;
use crate::query;
use crate::response::{ContentRef, ExamView, Response};
use chrono::{DateTime, Utc};
use scholar_core::{Class, Event, Exam, RecordKind};
use scholar_storage::{Selector, Store};

pub(crate) struct NewExam {
    pub exam_id: String,
    pub class_id: String,
    pub module_id: String,
    pub title: String,
    pub exam_date: DateTime<Utc>,
    pub content_ref: String,
}

fn view<S: Store + ?Sized>(ctx: &OperationContext<'_, S>, exam: &Exam) -> ExamView {
    let available_at = exam.correction_available_at(ctx.correction_delay());
    ExamView::new(exam, &ctx.caller, ctx.now, available_at)
}

pub(crate) fn create_exam<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    new: NewExam,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "create exams").check()?;
    let _: Class = ctx.require(&new.class_id)?;
    ctx.ensure_vacant(RecordKind::Exam, &new.exam_id)?;

    let exam = Exam {
        id: new.exam_id,
        class_id: new.class_id,
        module_id: new.module_id,
        title: new.title,
        exam_date: new.exam_date,
        content_ref: new.content_ref,
        correction_ref: None,
        correction_uploaded_at: None,
        created_by: ctx.caller.id.clone(),
        created_at: ctx.now,
    };
    ctx.emit(Event::ExamCreated {
        exam_id: exam.id.clone(),
        class_id: exam.class_id.clone(),
        exam_date: exam.exam_date.to_rfc3339(),
    });
    ctx.save(exam)?;
    Ok(Response::Empty)
}

pub(crate) fn upload_correction<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    exam_id: &str,
    correction_ref: String,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "upload corrections").check()?;

    let mut exam: Exam = ctx.require(exam_id)?;
    if exam.has_correction() {
        return Err(LedgerError::CorrectionAlreadyUploaded {
            exam_id: exam_id.to_string(),
        });
    }
    if ctx.now < exam.exam_date {
        return Err(LedgerError::TooEarly {
            exam_id: exam_id.to_string(),
            exam_date: exam.exam_date,
        });
    }

    exam.correction_ref = Some(correction_ref);
    exam.correction_uploaded_at = Some(ctx.now);
    ctx.emit(Event::CorrectionUploaded {
        exam_id: exam.id.clone(),
        class_id: exam.class_id.clone(),
    });
    ctx.save(exam)?;
    Ok(Response::Empty)
}

pub(crate) fn list_exams<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    class_id: &str,
) -> Result<Response, LedgerError> {
    access::require_enrollment(ctx, class_id)?;
    let exams: Vec<Exam> = query::find(ctx, Selector::new().eq("classId", class_id))?;
    let ctx = &*ctx;
    Ok(Response::Exams(exams.iter().map(|e| view(ctx, e)).collect()))
}

pub(crate) fn get_exam<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    exam_id: &str,
) -> Result<Response, LedgerError> {
    let exam: Exam = ctx.require(exam_id)?;
    access::require_enrollment(ctx, &exam.class_id)?;
    Ok(Response::Exam(view(ctx, &exam)))
}

pub(crate) fn fetch_exam_content<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    exam_id: &str,
) -> Result<Response, LedgerError> {
    let exam: Exam = ctx.require(exam_id)?;
    access::require_enrollment(ctx, &exam.class_id)?;
    Ok(Response::Content(ContentRef {
        id: exam.id,
        content_ref: exam.content_ref,
    }))
}

pub(crate) fn fetch_correction_content<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    exam_id: &str,
) -> Result<Response, LedgerError> {
    let exam: Exam = ctx.require(exam_id)?;
    access::require_enrollment(ctx, &exam.class_id)?;

    let available_at = exam.correction_available_at(ctx.correction_delay());
    if !ctx.caller.is_institution() && ctx.now < available_at {
        return Err(LedgerError::NotYetAvailable {
            exam_id: exam.id,
            available_at,
        });
    }
    let Some(correction_ref) = exam.correction_ref else {
        return Err(LedgerError::NoCorrection { exam_id: exam.id });
    };
    Ok(Response::Content(ContentRef {
        id: exam.id,
        content_ref: correction_ref,
    }))
}

pub(crate) fn update_exam_date<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    exam_id: &str,
    exam_date: DateTime<Utc>,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "reschedule exams").check()?;

    let mut exam: Exam = ctx.require(exam_id)?;
    if exam.has_correction() {
        return Err(LedgerError::DateLocked {
            exam_id: exam_id.to_string(),
        });
    }
    exam.exam_date = exam_date;
    ctx.emit(Event::ExamRescheduled {
        exam_id: exam.id.clone(),
        exam_date: exam_date.to_rfc3339(),
    });
    ctx.save(exam)?;
    Ok(Response::Empty)
}

pub(crate) fn delete_exam<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    exam_id: &str,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "delete exams").check()?;
    let exam: Exam = ctx.require(exam_id)?;
    ctx.remove(RecordKind::Exam, exam_id);
    ctx.emit(Event::ExamDeleted {
        exam_id: exam.id,
        class_id: exam.class_id,
    });
    Ok(Response::Empty)
}

#[cfg(test)]
#[path = "exam_tests.rs"]
mod tests;
