// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authorization decisions shared by every ledger program

use crate::context::OperationContext;
use crate::error::LedgerError;
use scholar_core::{Caller, Class, Grade, Organization};
use scholar_storage::Store;

/// Outcome of an access check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Denied(String),
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }

    /// Convert a denial into an AccessDenied error
    pub fn check(self) -> Result<(), LedgerError> {
        match self {
            Decision::Granted => Ok(()),
            Decision::Denied(reason) => Err(LedgerError::AccessDenied(reason)),
        }
    }
}

/// Only Institution members may perform `action`
pub fn institution_only(caller: &Caller, action: &str) -> Decision {
    if caller.is_institution() {
        Decision::Granted
    } else {
        Decision::Denied(format!("only Institution members may {}", action))
    }
}

/// Any caller from a known organization
pub fn known_organization(caller: &Caller) -> Decision {
    if caller.org.is_known() {
        Decision::Granted
    } else {
        Decision::Denied(format!("organization {} is not recognized", caller.org))
    }
}

/// Institution members act for anyone; learners only for themselves
pub fn self_or_institution(caller: &Caller, student_id: &str, action: &str) -> Decision {
    match &caller.org {
        Organization::Institution => Decision::Granted,
        Organization::Learner if caller.id == student_id => Decision::Granted,
        Organization::Learner => Decision::Denied(format!(
            "learner {} may not {} for {}",
            caller.id, action, student_id
        )),
        Organization::Unrecognized(org) => {
            Decision::Denied(format!("organization {} is not recognized", org))
        }
    }
}

/// Whether `student_id` belongs to the class
pub fn enrolled(class: &Class, student_id: &str) -> Decision {
    if class.is_enrolled(student_id) {
        Decision::Granted
    } else {
        Decision::Denied(format!(
            "{} is not enrolled in class {}",
            student_id, class.id
        ))
    }
}

/// Learners read a grade only if it is theirs and published
pub fn grade_reader(caller: &Caller, grade: &Grade) -> Result<(), LedgerError> {
    match &caller.org {
        Organization::Institution => Ok(()),
        Organization::Learner if caller.id != grade.student_id => Err(LedgerError::AccessDenied(
            format!("grade {} belongs to another student", grade.id),
        )),
        Organization::Learner if !grade.published => Err(LedgerError::NotPublished {
            grade_id: grade.id.clone(),
        }),
        Organization::Learner => Ok(()),
        Organization::Unrecognized(org) => Err(LedgerError::AccessDenied(format!(
            "organization {} is not recognized",
            org
        ))),
    }
}

/// Enrollment check against a class.
///
/// Institution members pass without loading the class. Learners pass only
/// if enrolled; the class must exist. Everyone else is denied.
pub(crate) fn require_enrollment<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    class_id: &str,
) -> Result<(), LedgerError> {
    match &ctx.caller.org {
        Organization::Institution => Ok(()),
        Organization::Learner => {
            let class: Class = ctx.require(class_id)?;
            let decision = enrolled(&class, &ctx.caller.id);
            if !decision.is_granted() {
                tracing::debug!(class_id, caller = %ctx.caller, "enrollment check denied");
            }
            decision.check()
        }
        Organization::Unrecognized(org) => Err(LedgerError::AccessDenied(format!(
            "organization {} is not recognized",
            org
        ))),
    }
}

#[cfg(test)]
#[path = "access_tests.rs"]
mod tests;
