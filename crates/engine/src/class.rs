// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Class program: classes, modules and enrollment

use crate::access;
use crate::context::OperationContext;
use crate::error::LedgerError;
use crate::query;
use crate::response::Response;
use scholar_core::{Class, Event, RecordKind};
use scholar_storage::{Selector, Store};

/// Classes seeded by `InitLedger`: (id, name, description, semester, capacity, teacher)
const SEED_CLASSES: &[(&str, &str, &str, &str, u32, &str)] = &[
    (
        "MATH101",
        "Mathematics 101",
        "Introduction to differential calculus",
        "Fall 2024",
        30,
        "Prof. Dupont",
    ),
    (
        "INFO101",
        "Computer Science 101",
        "Introduction to programming",
        "Fall 2024",
        25,
        "Prof. Martin",
    ),
];

pub(crate) fn init_ledger<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "initialize the ledger").check()?;

    for (id, name, description, semester, capacity, teacher) in SEED_CLASSES {
        if ctx.exists(RecordKind::Class, id)? {
            continue;
        }
        let mut class = Class::new(*id, *name, *description, ctx.caller.id.clone(), ctx.now);
        class.semester = Some(semester.to_string());
        class.max_students = Some(*capacity);
        class.teacher = Some(teacher.to_string());
        ctx.emit(Event::ClassCreated {
            class_id: class.id.clone(),
            name: class.name.clone(),
            created_by: class.created_by.clone(),
        });
        ctx.save(class)?;
    }
    Ok(Response::Empty)
}

pub(crate) fn create_class<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    id: String,
    name: String,
    description: String,
    semester: Option<String>,
    max_students: Option<u32>,
    teacher: Option<String>,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "create classes").check()?;
    ctx.ensure_vacant(RecordKind::Class, &id)?;

    let mut class = Class::new(id, name, description, ctx.caller.id.clone(), ctx.now);
    class.semester = semester;
    class.max_students = max_students;
    class.teacher = teacher;

    ctx.emit(Event::ClassCreated {
        class_id: class.id.clone(),
        name: class.name.clone(),
        created_by: class.created_by.clone(),
    });
    ctx.save(class)?;
    Ok(Response::Empty)
}

/// Public listing: id, name and description only
pub(crate) fn list_classes<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
) -> Result<Response, LedgerError> {
    let classes: Vec<Class> = query::find(ctx, Selector::new())?;
    Ok(Response::Classes(
        classes.iter().map(Class::summary).collect(),
    ))
}

pub(crate) fn get_class_details<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    class_id: &str,
) -> Result<Response, LedgerError> {
    access::known_organization(&ctx.caller).check()?;
    let class: Class = ctx.require(class_id)?;
    Ok(Response::Class(class))
}

pub(crate) fn enroll_student<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    class_id: &str,
    student_id: &str,
) -> Result<Response, LedgerError> {
    access::self_or_institution(&ctx.caller, student_id, "enroll").check()?;

    let mut class: Class = ctx.require(class_id)?;
    if class.is_enrolled(student_id) {
        return Err(LedgerError::AlreadyEnrolled {
            class_id: class_id.to_string(),
            student_id: student_id.to_string(),
        });
    }
    if let (true, Some(max_students)) = (class.is_full(), class.max_students) {
        return Err(LedgerError::CapacityReached {
            class_id: class_id.to_string(),
            max_students,
        });
    }

    class.enroll(student_id, ctx.now);
    ctx.save(class)?;
    ctx.emit(Event::StudentEnrolled {
        class_id: class_id.to_string(),
        student_id: student_id.to_string(),
        enrolled_by: ctx.caller.id.clone(),
    });
    Ok(Response::Empty)
}

pub(crate) fn withdraw_student<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    class_id: &str,
    student_id: &str,
) -> Result<Response, LedgerError> {
    access::self_or_institution(&ctx.caller, student_id, "withdraw").check()?;

    let mut class: Class = ctx.require(class_id)?;
    if !class.withdraw(student_id, ctx.now) {
        return Err(LedgerError::NotEnrolled {
            class_id: class_id.to_string(),
            student_id: student_id.to_string(),
        });
    }
    ctx.save(class)?;
    ctx.emit(Event::StudentWithdrawn {
        class_id: class_id.to_string(),
        student_id: student_id.to_string(),
    });
    Ok(Response::Empty)
}

pub(crate) fn add_module<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    class_id: &str,
    module: &str,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "add modules").check()?;

    let mut class: Class = ctx.require(class_id)?;
    if class.has_module(module) {
        return Err(LedgerError::ModuleExists {
            class_id: class_id.to_string(),
            module: module.to_string(),
        });
    }
    class.modules.push(module.to_string());
    class.updated_at = ctx.now;
    ctx.save(class)?;
    ctx.emit(Event::ModuleAdded {
        class_id: class_id.to_string(),
        module: module.to_string(),
    });
    Ok(Response::Empty)
}

#[cfg(test)]
#[path = "class_tests.rs"]
mod tests;
