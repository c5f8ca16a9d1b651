// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ledger entry point

use crate::class;
use crate::context::OperationContext;
use crate::error::{ErrorKind, LedgerError};
use crate::exam::{self, NewExam};
use crate::grade::{self, NewGrade};
use crate::material::{self, NewMaterial};
use crate::operation::Operation;
use crate::response::Response;
use scholar_adapters::EventSink;
use scholar_core::{resolve, Caller, Clock, LedgerConfig};
use scholar_storage::Store;

/// Runs operations against a store, stamping each with the clock and
/// handing committed events to the sink
pub struct Ledger<S, E, C> {
    store: S,
    events: E,
    clock: C,
    config: LedgerConfig,
}

impl<S, E, C> Ledger<S, E, C>
where
    S: Store,
    E: EventSink,
    C: Clock,
{
    pub fn new(store: S, events: E, clock: C, config: LedgerConfig) -> Self {
        Self {
            store,
            events,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Run a named operation with positional string arguments.
    ///
    /// The credential is resolved before anything else, including argument
    /// parsing.
    pub fn invoke<A: AsRef<str>>(
        &self,
        credential: &[u8],
        name: &str,
        args: &[A],
    ) -> Result<Response, LedgerError> {
        let caller = resolve(credential)?;
        let operation = Operation::parse(name, args)?;
        self.execute(caller, operation)
    }

    /// Run a typed operation
    pub fn submit(&self, credential: &[u8], operation: Operation) -> Result<Response, LedgerError> {
        let caller = resolve(credential)?;
        self.execute(caller, operation)
    }

    fn execute(&self, caller: Caller, operation: Operation) -> Result<Response, LedgerError> {
        let op = operation.name();
        let span = tracing::info_span!("ledger.invoke", op, caller = %caller);
        let _guard = span.enter();

        let now = self.clock.now();
        let mut ctx = OperationContext::new(&self.store, caller, now, &self.config);

        let response = match dispatch(&mut ctx, operation) {
            Ok(response) => response,
            Err(e) => {
                log_failure(&e);
                return Err(e);
            }
        };

        let (txn, events) = ctx.into_parts();
        match txn.commit() {
            Ok(Some(version)) => tracing::info!(version, events = events.len(), "committed"),
            Ok(None) => tracing::debug!("read-only"),
            Err(e) => {
                let e = LedgerError::from(e);
                log_failure(&e);
                return Err(e);
            }
        }

        for event in events {
            if let Err(e) = self.events.emit(event.name(), &event.payload()) {
                tracing::warn!(event = event.name(), error = %e, "event emission failed");
            }
        }

        Ok(response)
    }
}

fn log_failure(error: &LedgerError) {
    match error.kind() {
        ErrorKind::Internal => tracing::error!(kind = %error.kind(), error = %error, "failed"),
        ErrorKind::Conflict => tracing::warn!(kind = %error.kind(), error = %error, "failed"),
        kind => tracing::debug!(%kind, error = %error, "rejected"),
    }
}

fn dispatch<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    operation: Operation,
) -> Result<Response, LedgerError> {
    match operation {
        Operation::InitLedger => class::init_ledger(ctx),
        Operation::CreateClass {
            id,
            name,
            description,
            semester,
            max_students,
            teacher,
        } => class::create_class(ctx, id, name, description, semester, max_students, teacher),
        Operation::ListClasses => class::list_classes(ctx),
        Operation::GetClassDetails { class_id } => class::get_class_details(ctx, &class_id),
        Operation::EnrollStudent {
            class_id,
            student_id,
        } => class::enroll_student(ctx, &class_id, &student_id),
        Operation::WithdrawStudent {
            class_id,
            student_id,
        } => class::withdraw_student(ctx, &class_id, &student_id),
        Operation::AddModule { class_id, module } => class::add_module(ctx, &class_id, &module),

        Operation::UploadMaterial {
            material_id,
            class_id,
            module_id,
            title,
            kind,
            content_ref,
        } => material::upload_material(
            ctx,
            NewMaterial {
                material_id,
                class_id,
                module_id,
                title,
                kind,
                content_ref,
            },
        ),
        Operation::ListMaterials { class_id } => material::list_materials(ctx, &class_id),
        Operation::FetchMaterialContent { material_id } => {
            material::fetch_material_content(ctx, &material_id)
        }
        Operation::DeleteMaterial { material_id } => material::delete_material(ctx, &material_id),

        Operation::CreateExam {
            exam_id,
            class_id,
            module_id,
            title,
            exam_date,
            content_ref,
        } => exam::create_exam(
            ctx,
            NewExam {
                exam_id,
                class_id,
                module_id,
                title,
                exam_date,
                content_ref,
            },
        ),
        Operation::UploadCorrection {
            exam_id,
            correction_ref,
        } => exam::upload_correction(ctx, &exam_id, correction_ref),
        Operation::ListExams { class_id } => exam::list_exams(ctx, &class_id),
        Operation::GetExam { exam_id } => exam::get_exam(ctx, &exam_id),
        Operation::FetchExamContent { exam_id } => exam::fetch_exam_content(ctx, &exam_id),
        Operation::FetchCorrectionContent { exam_id } => {
            exam::fetch_correction_content(ctx, &exam_id)
        }
        Operation::UpdateExamDate { exam_id, exam_date } => {
            exam::update_exam_date(ctx, &exam_id, exam_date)
        }
        Operation::DeleteExam { exam_id } => exam::delete_exam(ctx, &exam_id),

        Operation::SubmitGrade {
            grade_id,
            exam_id,
            student_id,
            score,
            comment,
            max_score,
        } => grade::submit_grade(
            ctx,
            NewGrade {
                grade_id,
                exam_id,
                student_id,
                score,
                comment,
                max_score,
            },
        ),
        Operation::PublishGrade { grade_id } => grade::publish_grade(ctx, &grade_id),
        Operation::GetGrade { grade_id } => grade::get_grade(ctx, &grade_id),
        Operation::ListGradesForClass { class_id } => grade::list_grades_for_class(ctx, &class_id),
        Operation::ListMyGrades {
            student_id,
            class_id,
        } => grade::list_my_grades(ctx, &student_id, &class_id),
        Operation::UpdateGrade {
            grade_id,
            score,
            comment,
        } => grade::update_grade(ctx, &grade_id, score, comment),
        Operation::DeleteGrade { grade_id } => grade::delete_grade(ctx, &grade_id),
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
