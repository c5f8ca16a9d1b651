//! Exam timing specs
//!
//! Corrections are accepted from the exam date on and released to learners
//! once the correction delay has elapsed.

use crate::prelude::*;

#[test]
fn correction_before_exam_is_too_early() {
    let temp = Project::empty();
    temp.with_exam();

    temp.institution("prof")
        .at("2024-06-01T09:59:59Z")
        .args(&["UploadCorrection", "E1", "ipfs://correction"])
        .exits(7)
        .stderr_has("TooEarly");
}

#[test]
fn correction_is_released_after_the_delay() {
    let temp = Project::empty();
    temp.with_exam();
    temp.institution("prof")
        .at(EXAM_DATE)
        .args(&["UploadCorrection", "E1", "ipfs://correction"])
        .passes();

    temp.learner("alice")
        .at(DURING_WINDOW)
        .args(&["FetchCorrectionContent", "E1"])
        .exits(8)
        .stderr_has("not available until 2024-06-02 10:00:00 UTC");

    temp.learner("alice")
        .at(AFTER_WINDOW)
        .args(&["FetchCorrectionContent", "E1"])
        .passes()
        .stdout_eq("E1\tipfs://correction\n");
}

#[test]
fn institution_sees_correction_immediately() {
    let temp = Project::empty();
    temp.with_exam();
    temp.institution("prof")
        .at(EXAM_DATE)
        .args(&["UploadCorrection", "E1", "ipfs://correction"])
        .passes();

    temp.institution("ta")
        .at(EXAM_DATE)
        .args(&["FetchCorrectionContent", "E1"])
        .passes()
        .stdout_eq("E1\tipfs://correction\n");
}

#[test]
fn configured_delay_moves_the_window() {
    let temp = Project::empty();
    temp.file(".scholar/scholar.toml", "[ledger]\ncorrection_delay = \"48h\"\n");
    temp.with_exam();
    temp.institution("prof")
        .at(EXAM_DATE)
        .args(&["UploadCorrection", "E1", "ipfs://correction"])
        .passes();

    temp.learner("alice")
        .at(AFTER_WINDOW)
        .args(&["FetchCorrectionContent", "E1"])
        .exits(8);
    temp.learner("alice")
        .at("2024-06-03T10:00:00Z")
        .args(&["FetchCorrectionContent", "E1"])
        .passes();
}

#[test]
fn exam_listing_hides_pointers() {
    let temp = Project::empty();
    temp.with_exam();

    let exams = temp
        .learner("alice")
        .at(BEFORE_EXAM)
        .json()
        .args(&["ListExams", "C1"])
        .passes()
        .stdout_json();
    let exam = &exams[0];
    assert_eq!(exam["id"], "E1");
    assert_eq!(exam["correctionAvailable"], false);
    assert_eq!(exam["correctionAvailableAt"], "2024-06-02T10:00:00Z");
    assert!(exam.get("contentRef").is_none());
    assert!(exam.get("createdBy").is_none());
}

#[test]
fn exam_content_requires_enrollment() {
    let temp = Project::empty();
    temp.with_exam();

    temp.learner("alice")
        .args(&["FetchExamContent", "E1"])
        .passes()
        .stdout_eq("E1\tipfs://exam\n");
    temp.learner("bob")
        .args(&["FetchExamContent", "E1"])
        .exits(5);
}

#[test]
fn exam_date_locks_once_corrected() {
    let temp = Project::empty();
    temp.with_exam();
    temp.institution("prof")
        .at(BEFORE_EXAM)
        .args(&["UpdateExamDate", "E1", "2024-06-05T10:00:00Z"])
        .passes();
    temp.institution("prof")
        .at("2024-06-05T10:00:00Z")
        .args(&["UploadCorrection", "E1", "ipfs://correction"])
        .passes();

    temp.institution("prof")
        .args(&["UpdateExamDate", "E1", "2024-06-06T10:00:00Z"])
        .exits(6);
}
