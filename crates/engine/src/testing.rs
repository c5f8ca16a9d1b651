// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for ledger program tests

use crate::{Ledger, LedgerError, Response};
use chrono::{DateTime, Utc};
use scholar_adapters::FakeEventSink;
use scholar_core::{Clock, Credential, FakeClock, LedgerConfig, QueryMode};
use scholar_storage::MemoryStore;

/// Exam date used by most fixtures
pub const EXAM_DATE: &str = "2024-06-01T10:00:00Z";

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

/// Query backend a harness exercises
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Structured,
    Scan,
}

pub struct Harness {
    pub ledger: Ledger<MemoryStore, FakeEventSink, FakeClock>,
    pub store: MemoryStore,
    pub clock: FakeClock,
    pub sink: FakeEventSink,
}

impl Harness {
    /// Structured queries, clock one day before [`EXAM_DATE`]
    pub fn new() -> Self {
        Self::with_backend(Backend::Structured)
    }

    pub fn with_backend(backend: Backend) -> Self {
        let store = match backend {
            Backend::Structured => MemoryStore::new(),
            Backend::Scan => MemoryStore::scan_only(),
        };
        Self::build(store, LedgerConfig::default().with_query_mode(QueryMode::Auto))
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self::build(MemoryStore::new(), config)
    }

    fn build(store: MemoryStore, config: LedgerConfig) -> Self {
        let clock = FakeClock::at(at("2024-05-31T10:00:00Z"));
        let sink = FakeEventSink::new();
        let ledger = Ledger::new(store.clone(), sink.clone(), clock.clone(), config);
        Self {
            ledger,
            store,
            clock,
            sink,
        }
    }

    pub fn clock_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn set_time(&self, rfc3339: &str) {
        self.clock.set(at(rfc3339));
    }

    pub fn call(
        &self,
        credential: &Credential,
        name: &str,
        args: &[&str],
    ) -> Result<Response, LedgerError> {
        self.ledger.invoke(&credential.to_bytes(), name, args)
    }

    /// Call as the institution member `prof`
    pub fn inst(&self, name: &str, args: &[&str]) -> Result<Response, LedgerError> {
        self.call(&Credential::institution("prof"), name, args)
    }

    pub fn learner(&self, id: &str, name: &str, args: &[&str]) -> Result<Response, LedgerError> {
        self.call(&Credential::learner(id), name, args)
    }

    pub fn class(&self, id: &str) {
        let name = format!("{} name", id);
        self.inst("CreateClass", &[id, name.as_str(), "description"])
            .unwrap();
    }

    pub fn enroll(&self, class_id: &str, student_id: &str) {
        self.inst("EnrollStudent", &[class_id, student_id]).unwrap();
    }

    pub fn exam(&self, id: &str, class_id: &str) {
        self.inst(
            "CreateExam",
            &[id, class_id, "m1", "Midterm", EXAM_DATE, "QmExam"],
        )
        .unwrap();
    }

    pub fn material(&self, id: &str, class_id: &str) {
        self.inst(
            "UploadMaterial",
            &[id, class_id, "m1", "Slides", "lecture", "QmSlides"],
        )
        .unwrap();
    }

    pub fn grade(&self, id: &str, exam_id: &str, student_id: &str, score: &str) {
        self.inst("SubmitGrade", &[id, exam_id, student_id, score, "ok"])
            .unwrap();
    }

    pub fn publish(&self, grade_id: &str) {
        self.inst("PublishGrade", &[grade_id]).unwrap();
    }
}

pub fn classes(response: Response) -> Vec<scholar_core::ClassSummary> {
    match response {
        Response::Classes(c) => c,
        other => panic!("expected classes, got {:?}", other),
    }
}

pub fn class_of(response: Response) -> scholar_core::Class {
    match response {
        Response::Class(c) => c,
        other => panic!("expected class, got {:?}", other),
    }
}

pub fn materials(response: Response) -> Vec<scholar_core::MaterialSummary> {
    match response {
        Response::Materials(m) => m,
        other => panic!("expected materials, got {:?}", other),
    }
}

pub fn content(response: Response) -> String {
    match response {
        Response::Content(c) => c.content_ref,
        other => panic!("expected content, got {:?}", other),
    }
}

pub fn exams(response: Response) -> Vec<crate::ExamView> {
    match response {
        Response::Exams(e) => e,
        other => panic!("expected exams, got {:?}", other),
    }
}

pub fn grade_of(response: Response) -> scholar_core::Grade {
    match response {
        Response::Grade(g) => g,
        other => panic!("expected grade, got {:?}", other),
    }
}

/// Grade ids of a listing, in order
pub fn grade_ids(response: Response) -> Vec<String> {
    match response {
        Response::Grades(g) => g.into_iter().map(|g| g.id).collect(),
        other => panic!("expected grades, got {:?}", other),
    }
}
