// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named operations and their argument lists
//!
//! Callers reach the ledger with an operation name and an ordered list of
//! string arguments. Parsing turns that into a typed [`Operation`]; primitive
//! arguments (dates, numbers, material kinds) are validated here, before any
//! state is read.

use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use scholar_core::MaterialKind;

/// Argument list of a named operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub name: &'static str,
    pub args: &'static [&'static str],
    /// Trailing arguments that may be omitted
    pub optional: &'static [&'static str],
}

impl Signature {
    const fn new(name: &'static str, args: &'static [&'static str]) -> Self {
        Self {
            name,
            args,
            optional: &[],
        }
    }

    const fn with_optional(mut self, optional: &'static [&'static str]) -> Self {
        self.optional = optional;
        self
    }

    pub fn lookup(name: &str) -> Option<&'static Signature> {
        OPERATIONS.iter().find(|s| s.name == name)
    }

    fn expected(&self) -> String {
        if self.optional.is_empty() {
            self.args.len().to_string()
        } else {
            format!(
                "{} to {}",
                self.args.len(),
                self.args.len() + self.optional.len()
            )
        }
    }
}

/// Every operation the ledger accepts
pub const OPERATIONS: &[Signature] = &[
    Signature::new("InitLedger", &[]),
    Signature::new("CreateClass", &["id", "name", "description"])
        .with_optional(&["semester", "maxStudents", "teacher"]),
    Signature::new("ListClasses", &[]),
    Signature::new("GetClassDetails", &["classId"]),
    Signature::new("EnrollStudent", &["classId", "studentId"]),
    Signature::new("WithdrawStudent", &["classId", "studentId"]),
    Signature::new("AddModule", &["classId", "moduleName"]),
    Signature::new(
        "UploadMaterial",
        &["materialId", "classId", "moduleId", "title", "kind", "contentPointer"],
    ),
    Signature::new("ListMaterials", &["classId"]),
    Signature::new("FetchMaterialContent", &["materialId"]),
    Signature::new("DeleteMaterial", &["materialId"]),
    Signature::new(
        "CreateExam",
        &["examId", "classId", "moduleId", "title", "examDate", "examContentPointer"],
    ),
    Signature::new("UploadCorrection", &["examId", "correctionContentPointer"]),
    Signature::new("ListExams", &["classId"]),
    Signature::new("GetExam", &["examId"]),
    Signature::new("FetchExamContent", &["examId"]),
    Signature::new("FetchCorrectionContent", &["examId"]),
    Signature::new("UpdateExamDate", &["examId", "newDate"]),
    Signature::new("DeleteExam", &["examId"]),
    Signature::new(
        "SubmitGrade",
        &["gradeId", "examId", "studentId", "score", "comment"],
    )
    .with_optional(&["maxScore"]),
    Signature::new("PublishGrade", &["gradeId"]),
    Signature::new("GetGrade", &["gradeId"]),
    Signature::new("ListGradesForClass", &["classId"]),
    Signature::new("ListMyGrades", &["studentId", "classId"]),
    Signature::new("UpdateGrade", &["gradeId", "score", "comment"]),
    Signature::new("DeleteGrade", &["gradeId"]),
];

/// A typed ledger operation
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    // Class program
    InitLedger,
    CreateClass {
        id: String,
        name: String,
        description: String,
        semester: Option<String>,
        max_students: Option<u32>,
        teacher: Option<String>,
    },
    ListClasses,
    GetClassDetails {
        class_id: String,
    },
    EnrollStudent {
        class_id: String,
        student_id: String,
    },
    WithdrawStudent {
        class_id: String,
        student_id: String,
    },
    AddModule {
        class_id: String,
        module: String,
    },

    // Material program
    UploadMaterial {
        material_id: String,
        class_id: String,
        module_id: String,
        title: String,
        kind: MaterialKind,
        content_ref: String,
    },
    ListMaterials {
        class_id: String,
    },
    FetchMaterialContent {
        material_id: String,
    },
    DeleteMaterial {
        material_id: String,
    },

    // Exam program
    CreateExam {
        exam_id: String,
        class_id: String,
        module_id: String,
        title: String,
        exam_date: DateTime<Utc>,
        content_ref: String,
    },
    UploadCorrection {
        exam_id: String,
        correction_ref: String,
    },
    ListExams {
        class_id: String,
    },
    GetExam {
        exam_id: String,
    },
    FetchExamContent {
        exam_id: String,
    },
    FetchCorrectionContent {
        exam_id: String,
    },
    UpdateExamDate {
        exam_id: String,
        exam_date: DateTime<Utc>,
    },
    DeleteExam {
        exam_id: String,
    },

    // Grade program
    SubmitGrade {
        grade_id: String,
        exam_id: String,
        student_id: String,
        score: f64,
        comment: String,
        max_score: Option<f64>,
    },
    PublishGrade {
        grade_id: String,
    },
    GetGrade {
        grade_id: String,
    },
    ListGradesForClass {
        class_id: String,
    },
    ListMyGrades {
        student_id: String,
        class_id: String,
    },
    UpdateGrade {
        grade_id: String,
        score: f64,
        comment: String,
    },
    DeleteGrade {
        grade_id: String,
    },
}

/// Positional argument reader for one signature
struct Args<'a, A> {
    signature: &'static Signature,
    values: &'a [A],
}

impl<A: AsRef<str>> Args<'_, A> {
    fn raw(&self, index: usize) -> &str {
        self.values
            .get(index)
            .map(|v| AsRef::<str>::as_ref(v))
            .unwrap_or_default()
    }

    fn name(&self, index: usize) -> &'static str {
        self.signature
            .args
            .iter()
            .chain(self.signature.optional)
            .nth(index)
            .copied()
            .unwrap_or("argument")
    }

    /// Free text; may be empty
    fn text(&self, index: usize) -> String {
        self.raw(index).to_string()
    }

    /// An identifier; must not be blank
    fn id(&self, index: usize) -> Result<String, LedgerError> {
        let value = self.raw(index);
        if value.trim().is_empty() {
            return Err(LedgerError::invalid(format!(
                "{} must not be empty",
                self.name(index)
            )));
        }
        Ok(value.to_string())
    }

    /// An optional trailing argument; absent or empty means none
    fn optional(&self, index: usize) -> Option<&str> {
        Some(self.raw(index)).filter(|v| !v.is_empty())
    }

    fn date(&self, index: usize) -> Result<DateTime<Utc>, LedgerError> {
        parse_date(self.raw(index))
            .map_err(|e| LedgerError::invalid(format!("{}: {}", self.name(index), e)))
    }

    fn number(&self, value: &str, index: usize) -> Result<f64, LedgerError> {
        value.trim().parse::<f64>().map_err(|_| {
            LedgerError::invalid(format!("{} is not a number: {:?}", self.name(index), value))
        })
    }
}

/// Parse an RFC 3339 instant
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| format!("invalid date {:?}: {}", value, e))
}

impl Operation {
    /// Parse a named operation from its positional string arguments
    pub fn parse<A: AsRef<str>>(name: &str, values: &[A]) -> Result<Self, LedgerError> {
        let signature =
            Signature::lookup(name).ok_or_else(|| LedgerError::UnknownOperation(name.to_string()))?;
        let required = signature.args.len();
        if values.len() < required || values.len() > required + signature.optional.len() {
            return Err(LedgerError::Arity {
                operation: signature.name,
                expected: signature.expected(),
                got: values.len(),
            });
        }
        let a = Args { signature, values };

        let op = match signature.name {
            "InitLedger" => Operation::InitLedger,
            "CreateClass" => Operation::CreateClass {
                id: a.id(0)?,
                name: a.id(1)?,
                description: a.text(2),
                semester: a.optional(3).map(str::to_string),
                max_students: a
                    .optional(4)
                    .map(|v| match v.trim().parse::<u32>() {
                        Ok(n) if n > 0 => Ok(n),
                        _ => Err(LedgerError::invalid(format!(
                            "maxStudents must be a positive integer: {:?}",
                            v
                        ))),
                    })
                    .transpose()?,
                teacher: a.optional(5).map(str::to_string),
            },
            "ListClasses" => Operation::ListClasses,
            "GetClassDetails" => Operation::GetClassDetails { class_id: a.id(0)? },
            "EnrollStudent" => Operation::EnrollStudent {
                class_id: a.id(0)?,
                student_id: a.id(1)?,
            },
            "WithdrawStudent" => Operation::WithdrawStudent {
                class_id: a.id(0)?,
                student_id: a.id(1)?,
            },
            "AddModule" => Operation::AddModule {
                class_id: a.id(0)?,
                module: a.id(1)?,
            },
            "UploadMaterial" => Operation::UploadMaterial {
                material_id: a.id(0)?,
                class_id: a.id(1)?,
                module_id: a.id(2)?,
                title: a.text(3),
                kind: a
                    .raw(4)
                    .parse::<MaterialKind>()
                    .map_err(|e: scholar_core::RecordError| LedgerError::invalid(e.to_string()))?,
                content_ref: a.id(5)?,
            },
            "ListMaterials" => Operation::ListMaterials { class_id: a.id(0)? },
            "FetchMaterialContent" => Operation::FetchMaterialContent {
                material_id: a.id(0)?,
            },
            "DeleteMaterial" => Operation::DeleteMaterial {
                material_id: a.id(0)?,
            },
            "CreateExam" => Operation::CreateExam {
                exam_id: a.id(0)?,
                class_id: a.id(1)?,
                module_id: a.id(2)?,
                title: a.text(3),
                exam_date: a.date(4)?,
                content_ref: a.id(5)?,
            },
            "UploadCorrection" => Operation::UploadCorrection {
                exam_id: a.id(0)?,
                correction_ref: a.id(1)?,
            },
            "ListExams" => Operation::ListExams { class_id: a.id(0)? },
            "GetExam" => Operation::GetExam { exam_id: a.id(0)? },
            "FetchExamContent" => Operation::FetchExamContent { exam_id: a.id(0)? },
            "FetchCorrectionContent" => Operation::FetchCorrectionContent { exam_id: a.id(0)? },
            "UpdateExamDate" => Operation::UpdateExamDate {
                exam_id: a.id(0)?,
                exam_date: a.date(1)?,
            },
            "DeleteExam" => Operation::DeleteExam { exam_id: a.id(0)? },
            "SubmitGrade" => Operation::SubmitGrade {
                grade_id: a.id(0)?,
                exam_id: a.id(1)?,
                student_id: a.id(2)?,
                score: a.number(a.raw(3), 3)?,
                comment: a.text(4),
                max_score: a.optional(5).map(|v| a.number(v, 5)).transpose()?,
            },
            "PublishGrade" => Operation::PublishGrade { grade_id: a.id(0)? },
            "GetGrade" => Operation::GetGrade { grade_id: a.id(0)? },
            "ListGradesForClass" => Operation::ListGradesForClass { class_id: a.id(0)? },
            "ListMyGrades" => Operation::ListMyGrades {
                student_id: a.id(0)?,
                class_id: a.id(1)?,
            },
            "UpdateGrade" => Operation::UpdateGrade {
                grade_id: a.id(0)?,
                score: a.number(a.raw(1), 1)?,
                comment: a.text(2),
            },
            "DeleteGrade" => Operation::DeleteGrade { grade_id: a.id(0)? },
            other => return Err(LedgerError::UnknownOperation(other.to_string())),
        };
        Ok(op)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::InitLedger => "InitLedger",
            Operation::CreateClass { .. } => "CreateClass",
            Operation::ListClasses => "ListClasses",
            Operation::GetClassDetails { .. } => "GetClassDetails",
            Operation::EnrollStudent { .. } => "EnrollStudent",
            Operation::WithdrawStudent { .. } => "WithdrawStudent",
            Operation::AddModule { .. } => "AddModule",
            Operation::UploadMaterial { .. } => "UploadMaterial",
            Operation::ListMaterials { .. } => "ListMaterials",
            Operation::FetchMaterialContent { .. } => "FetchMaterialContent",
            Operation::DeleteMaterial { .. } => "DeleteMaterial",
            Operation::CreateExam { .. } => "CreateExam",
            Operation::UploadCorrection { .. } => "UploadCorrection",
            Operation::ListExams { .. } => "ListExams",
            Operation::GetExam { .. } => "GetExam",
            Operation::FetchExamContent { .. } => "FetchExamContent",
            Operation::FetchCorrectionContent { .. } => "FetchCorrectionContent",
            Operation::UpdateExamDate { .. } => "UpdateExamDate",
            Operation::DeleteExam { .. } => "DeleteExam",
            Operation::SubmitGrade { .. } => "SubmitGrade",
            Operation::PublishGrade { .. } => "PublishGrade",
            Operation::GetGrade { .. } => "GetGrade",
            Operation::ListGradesForClass { .. } => "ListGradesForClass",
            Operation::ListMyGrades { .. } => "ListMyGrades",
            Operation::UpdateGrade { .. } => "UpdateGrade",
            Operation::DeleteGrade { .. } => "DeleteGrade",
        }
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
