// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Grade program
//!
//! Grades are stored unpublished. Learners see a grade only when it is
//! theirs and published; the published flag is set only by `PublishGrade`.

use crate::access;
use crate::context::OperationContext;
use crate::error::LedgerError;
use crate::query;
use crate::response::Response;
use scholar_core::{Class, Event, Exam, Grade, RecordKind};
use scholar_storage::{Selector, Store};

pub(crate) struct NewGrade {
    pub grade_id: String,
    pub exam_id: String,
    pub student_id: String,
    pub score: f64,
    pub comment: String,
    pub max_score: Option<f64>,
}

fn validate_score(score: f64, max_score: Option<f64>) -> Result<(), LedgerError> {
    if !score.is_finite() || score < 0.0 {
        return Err(LedgerError::invalid(format!(
            "score must be a non-negative number, got {}",
            score
        )));
    }
    match max_score {
        Some(max) if !max.is_finite() || max <= 0.0 => Err(LedgerError::invalid(format!(
            "maxScore must be a positive number, got {}",
            max
        ))),
        Some(max) if score > max => Err(LedgerError::invalid(format!(
            "score {} exceeds maxScore {}",
            score, max
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn submit_grade<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    new: NewGrade,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "submit grades").check()?;
    validate_score(new.score, new.max_score)?;

    let exam: Exam = ctx.require(&new.exam_id)?;
    let class: Class = ctx.require(&exam.class_id)?;
    // Enrollment of the graded student, not of the caller
    access::enrolled(&class, &new.student_id).check()?;
    ctx.ensure_vacant(RecordKind::Grade, &new.grade_id)?;

    let grade = Grade {
        id: new.grade_id,
        exam_id: new.exam_id,
        student_id: new.student_id,
        score: new.score,
        max_score: new.max_score,
        comment: new.comment,
        published: false,
        graded_by: ctx.caller.id.clone(),
        graded_at: ctx.now,
        published_by: None,
        published_at: None,
    };
    ctx.emit(Event::GradeSubmitted {
        grade_id: grade.id.clone(),
        exam_id: grade.exam_id.clone(),
        student_id: grade.student_id.clone(),
    });
    ctx.save(grade)?;
    Ok(Response::Empty)
}

/// Re-publishing keeps the original publisher and timestamp and writes nothing
pub(crate) fn publish_grade<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    grade_id: &str,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "publish grades").check()?;

    let mut grade: Grade = ctx.require(grade_id)?;
    if grade.published {
        tracing::debug!(grade_id, "already published");
        return Ok(Response::Empty);
    }
    grade.published = true;
    grade.published_by = Some(ctx.caller.id.clone());
    grade.published_at = Some(ctx.now);
    ctx.emit(Event::GradePublished {
        grade_id: grade.id.clone(),
        student_id: grade.student_id.clone(),
    });
    ctx.save(grade)?;
    Ok(Response::Empty)
}

pub(crate) fn get_grade<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    grade_id: &str,
) -> Result<Response, LedgerError> {
    let grade: Grade = ctx.require(grade_id)?;
    access::grade_reader(&ctx.caller, &grade)?;
    Ok(Response::Grade(grade))
}

/// Grades of a class, restricted to the caller's own published grades for
/// learners. `student` narrows the listing to one student.
fn class_grades<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    class_id: &str,
    student: Option<&str>,
) -> Result<Vec<Grade>, LedgerError> {
    let _: Class = ctx.require(class_id)?;
    let exams: Vec<Exam> = query::find(ctx, Selector::new().eq("classId", class_id))?;
    if exams.is_empty() {
        return Ok(Vec::new());
    }

    let mut selector = Selector::new().one_of("examId", exams.into_iter().map(|e| e.id));
    if let Some(student_id) = student {
        selector = selector.eq("studentId", student_id);
    }
    if ctx.caller.is_learner() {
        selector = selector
            .eq("studentId", ctx.caller.id.as_str())
            .eq("published", true);
    }
    query::find(ctx, selector)
}

pub(crate) fn list_grades_for_class<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    class_id: &str,
) -> Result<Response, LedgerError> {
    access::known_organization(&ctx.caller).check()?;
    Ok(Response::Grades(class_grades(ctx, class_id, None)?))
}

pub(crate) fn list_my_grades<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    student_id: &str,
    class_id: &str,
) -> Result<Response, LedgerError> {
    access::self_or_institution(&ctx.caller, student_id, "list grades").check()?;
    Ok(Response::Grades(class_grades(ctx, class_id, Some(student_id))?))
}

/// Never touches the published flag
pub(crate) fn update_grade<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    grade_id: &str,
    score: f64,
    comment: String,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "update grades").check()?;

    let mut grade: Grade = ctx.require(grade_id)?;
    validate_score(score, grade.max_score)?;
    grade.score = score;
    grade.comment = comment;
    grade.graded_by = ctx.caller.id.clone();
    grade.graded_at = ctx.now;
    ctx.emit(Event::GradeUpdated {
        grade_id: grade.id.clone(),
    });
    ctx.save(grade)?;
    Ok(Response::Empty)
}

pub(crate) fn delete_grade<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    grade_id: &str,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "delete grades").check()?;
    let _: Grade = ctx.require(grade_id)?;
    ctx.remove(RecordKind::Grade, grade_id);
    ctx.emit(Event::GradeDeleted {
        grade_id: grade_id.to_string(),
    });
    Ok(Response::Empty)
}

#[cfg(test)]
#[path = "grade_tests.rs"]
mod tests;
