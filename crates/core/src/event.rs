// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification events emitted by the ledger programs
//!
//! Events are buffered while an operation runs and handed to the event sink
//! only after the operation's writes commit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum Event {
    // Class events
    ClassCreated {
        class_id: String,
        name: String,
        created_by: String,
    },
    ModuleAdded {
        class_id: String,
        module: String,
    },
    StudentEnrolled {
        class_id: String,
        student_id: String,
        enrolled_by: String,
    },
    StudentWithdrawn {
        class_id: String,
        student_id: String,
    },

    // Material events
    MaterialUploaded {
        material_id: String,
        class_id: String,
    },
    MaterialDeleted {
        material_id: String,
        class_id: String,
    },

    // Exam events
    ExamCreated {
        exam_id: String,
        class_id: String,
        exam_date: String,
    },
    CorrectionUploaded {
        exam_id: String,
        class_id: String,
    },
    ExamRescheduled {
        exam_id: String,
        exam_date: String,
    },
    ExamDeleted {
        exam_id: String,
        class_id: String,
    },

    // Grade events
    GradeSubmitted {
        grade_id: String,
        exam_id: String,
        student_id: String,
    },
    GradePublished {
        grade_id: String,
        student_id: String,
    },
    GradeUpdated {
        grade_id: String,
    },
    GradeDeleted {
        grade_id: String,
    },
}

impl Event {
    /// Event name as handed to the substrate
    pub fn name(&self) -> &'static str {
        match self {
            Event::ClassCreated { .. } => "ClassCreated",
            Event::ModuleAdded { .. } => "ModuleAdded",
            Event::StudentEnrolled { .. } => "StudentEnrolled",
            Event::StudentWithdrawn { .. } => "StudentWithdrawn",
            Event::MaterialUploaded { .. } => "MaterialUploaded",
            Event::MaterialDeleted { .. } => "MaterialDeleted",
            Event::ExamCreated { .. } => "ExamCreated",
            Event::CorrectionUploaded { .. } => "CorrectionUploaded",
            Event::ExamRescheduled { .. } => "ExamRescheduled",
            Event::ExamDeleted { .. } => "ExamDeleted",
            Event::GradeSubmitted { .. } => "GradeSubmitted",
            Event::GradePublished { .. } => "GradePublished",
            Event::GradeUpdated { .. } => "GradeUpdated",
            Event::GradeDeleted { .. } => "GradeDeleted",
        }
    }

    /// JSON payload, including the event name under `event`
    pub fn payload(&self) -> Vec<u8> {
        // Variants hold only strings
        serde_json::to_vec(self).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
