// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use scholar_core::{Class, ClassSummary, Grade, MaterialSummary};
use scholar_engine::{ExamView, Response};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// Text rendering of an operation result; serializes as the bare response
#[derive(Serialize)]
#[serde(transparent)]
pub struct Rendered<'a>(pub &'a Response);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Response::Empty => write!(f, "ok"),
            Response::Class(class) => write_class(f, class),
            Response::Classes(classes) => write_lines(f, classes, write_class_summary),
            Response::Materials(materials) => write_lines(f, materials, write_material),
            Response::Content(content) => write!(f, "{}\t{}", content.id, content.content_ref),
            Response::Exam(exam) => write_exam(f, exam),
            Response::Exams(exams) => write_lines(f, exams, write_exam),
            Response::Grade(grade) => write_grade(f, grade),
            Response::Grades(grades) => write_lines(f, grades, write_grade),
        }
    }
}

fn write_lines<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    write: fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    if items.is_empty() {
        return write!(f, "(none)");
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write(f, item)?;
    }
    Ok(())
}

fn write_class(f: &mut fmt::Formatter<'_>, class: &Class) -> fmt::Result {
    writeln!(f, "{}: {}", class.id, class.name)?;
    writeln!(f, "  {}", class.description)?;
    if let Some(semester) = &class.semester {
        writeln!(f, "  semester: {}", semester)?;
    }
    if let Some(teacher) = &class.teacher {
        writeln!(f, "  teacher: {}", teacher)?;
    }
    match class.max_students {
        Some(max) => writeln!(f, "  students: {}/{}", class.students.len(), max)?,
        None => writeln!(f, "  students: {}", class.students.len())?,
    }
    if !class.students.is_empty() {
        let students: Vec<&str> = class.students.iter().map(String::as_str).collect();
        writeln!(f, "  enrolled: {}", students.join(", "))?;
    }
    write!(f, "  modules: {}", class.modules.join(", "))
}

fn write_class_summary(f: &mut fmt::Formatter<'_>, class: &ClassSummary) -> fmt::Result {
    write!(f, "{}\t{}\t{}", class.id, class.name, class.description)
}

fn write_material(f: &mut fmt::Formatter<'_>, material: &MaterialSummary) -> fmt::Result {
    write!(
        f,
        "{}\t{}\t{}\t{}",
        material.id, material.module_id, material.kind, material.title
    )
}

fn write_exam(f: &mut fmt::Formatter<'_>, exam: &ExamView) -> fmt::Result {
    let correction = if exam.correction_available {
        "correction available".to_string()
    } else {
        format!("correction from {}", exam.correction_available_at.to_rfc3339())
    };
    write!(
        f,
        "{}\t{}\t{}\t{}\t{}",
        exam.id,
        exam.module_id,
        exam.exam_date.to_rfc3339(),
        exam.title,
        correction
    )
}

fn write_grade(f: &mut fmt::Formatter<'_>, grade: &Grade) -> fmt::Result {
    let score = match grade.max_score {
        Some(max) => format!("{}/{}", grade.score, max),
        None => grade.score.to_string(),
    };
    let state = if grade.published { "published" } else { "draft" };
    write!(
        f,
        "{}\t{}\t{}\t{}\t{}",
        grade.id, grade.exam_id, grade.student_id, score, state
    )?;
    if !grade.comment.is_empty() {
        write!(f, "\t{}", grade.comment)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
