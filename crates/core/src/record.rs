// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ledger records
//!
//! Every stored document carries a `docType` discriminator and lives under a
//! key derived from its natural identifier. Documents are decoded into the
//! [`Record`] sum type once, at the store boundary.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record codec error: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("unknown material kind: {0}")]
    UnknownMaterialKind(String),
}

/// Discriminator for the four entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Class,
    Material,
    Exam,
    Grade,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Class => "class",
            RecordKind::Material => "material",
            RecordKind::Exam => "exam",
            RecordKind::Grade => "grade",
        }
    }

    /// Key prefix for this kind
    pub fn prefix(self) -> &'static str {
        match self {
            RecordKind::Class => "CLASS_",
            RecordKind::Material => "MAT_",
            RecordKind::Exam => "EXAM_",
            RecordKind::Grade => "GRADE_",
        }
    }

    /// Store key for an entity of this kind
    pub fn key(self, id: &str) -> String {
        format!("{}{}", self.prefix(), id)
    }

    /// Half-open key range `[start, end)` covering every key of this kind
    pub fn key_range(self) -> (String, String) {
        let start = self.prefix().to_string();
        let mut end = start.clone().into_bytes();
        // Prefixes are ASCII and end in '_'; bump the final byte to get the
        // first key past the prefix.
        if let Some(last) = end.last_mut() {
            *last += 1;
        }
        (start, String::from_utf8_lossy(&end).into_owned())
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A class and its enrollment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(default)]
    pub modules: Vec<String>,
    /// Ordered set, so the encoded document is identical on every replica
    #[serde(default)]
    pub students: BTreeSet<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Class {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        created_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            semester: None,
            max_students: None,
            teacher: None,
            modules: Vec::new(),
            students: BTreeSet::new(),
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_enrolled(&self, student_id: &str) -> bool {
        self.students.contains(student_id)
    }

    pub fn is_full(&self) -> bool {
        self.max_students
            .is_some_and(|max| self.students.len() >= max as usize)
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.iter().any(|m| m == name)
    }

    /// Add a student; returns false if already enrolled
    pub fn enroll(&mut self, student_id: &str, now: DateTime<Utc>) -> bool {
        let added = self.students.insert(student_id.to_string());
        if added {
            self.updated_at = now;
        }
        added
    }

    /// Remove a student; returns false if not enrolled
    pub fn withdraw(&mut self, student_id: &str, now: DateTime<Utc>) -> bool {
        let removed = self.students.remove(student_id);
        if removed {
            self.updated_at = now;
        }
        removed
    }

    pub fn summary(&self) -> ClassSummary {
        ClassSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Public view of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Kind of course material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Lecture,
    Exercise,
}

impl FromStr for MaterialKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lecture" => Ok(MaterialKind::Lecture),
            "exercise" => Ok(MaterialKind::Exercise),
            _ => Err(RecordError::UnknownMaterialKind(s.to_string())),
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialKind::Lecture => write!(f, "lecture"),
            MaterialKind::Exercise => write!(f, "exercise"),
        }
    }
}

/// A course material reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub class_id: String,
    pub module_id: String,
    pub title: String,
    pub kind: MaterialKind,
    /// Pointer into an external content-addressed store; never interpreted
    pub content_ref: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Material {
    pub fn summary(&self) -> MaterialSummary {
        MaterialSummary {
            id: self.id.clone(),
            class_id: self.class_id.clone(),
            module_id: self.module_id.clone(),
            title: self.title.clone(),
            kind: self.kind,
            uploaded_by: self.uploaded_by.clone(),
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Material metadata without its content pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub id: String,
    pub class_id: String,
    pub module_id: String,
    pub title: String,
    pub kind: MaterialKind,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

/// An exam and, once uploaded, its correction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub class_id: String,
    pub module_id: String,
    pub title: String,
    pub exam_date: DateTime<Utc>,
    pub content_ref: String,
    #[serde(default)]
    pub correction_ref: Option<String>,
    #[serde(default)]
    pub correction_uploaded_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Exam {
    pub fn has_correction(&self) -> bool {
        self.correction_ref.is_some()
    }

    /// Instant from which learners may read the correction
    pub fn correction_available_at(&self, delay: TimeDelta) -> DateTime<Utc> {
        self.exam_date
            .checked_add_signed(delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// A score recorded against an exam for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub exam_id: String,
    pub student_id: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub published: bool,
    pub graded_by: String,
    pub graded_at: DateTime<Utc>,
    #[serde(default)]
    pub published_by: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// A stored ledger document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "docType", rename_all = "lowercase")]
pub enum Record {
    Class(Class),
    Material(Material),
    Exam(Exam),
    Grade(Grade),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Class(_) => RecordKind::Class,
            Record::Material(_) => RecordKind::Material,
            Record::Exam(_) => RecordKind::Exam,
            Record::Grade(_) => RecordKind::Grade,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::Class(c) => &c.id,
            Record::Material(m) => &m.id,
            Record::Exam(e) => &e.id,
            Record::Grade(g) => &g.id,
        }
    }

    pub fn key(&self) -> String {
        self.kind().key(self.id())
    }

    pub fn encode(&self) -> Result<Vec<u8>, RecordError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl From<Class> for Record {
    fn from(c: Class) -> Self {
        Record::Class(c)
    }
}

impl From<Material> for Record {
    fn from(m: Material) -> Self {
        Record::Material(m)
    }
}

impl From<Exam> for Record {
    fn from(e: Exam) -> Self {
        Record::Exam(e)
    }
}

impl From<Grade> for Record {
    fn from(g: Grade) -> Self {
        Record::Grade(g)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
