//! Grade publication specs

use crate::prelude::*;

fn graded() -> Project {
    let temp = Project::empty();
    temp.with_exam();
    temp.institution("prof")
        .at(EXAM_DATE)
        .args(&["SubmitGrade", "G1", "E1", "alice", "15.5", "solid work", "20"])
        .passes();
    temp
}

#[test]
fn unpublished_grade_is_hidden_from_the_student() {
    let temp = graded();

    temp.learner("alice")
        .args(&["GetGrade", "G1"])
        .exits(9)
        .stderr_has("grade G1 is not published yet");
    temp.learner("alice")
        .args(&["ListMyGrades", "alice", "C1"])
        .passes()
        .stdout_eq("(none)\n");
}

#[test]
fn published_grade_is_visible_to_its_student_only() {
    let temp = graded();
    temp.institution("prof").args(&["PublishGrade", "G1"]).passes();

    temp.learner("alice")
        .args(&["GetGrade", "G1"])
        .passes()
        .stdout_eq("G1\tE1\talice\t15.5/20\tpublished\tsolid work\n");
    temp.learner("bob").args(&["GetGrade", "G1"]).exits(5);
}

#[test]
fn grade_json_carries_publication_details() {
    let temp = graded();
    temp.institution("dean")
        .at(AFTER_WINDOW)
        .args(&["PublishGrade", "G1"])
        .passes();

    let grade = temp
        .institution("prof")
        .json()
        .args(&["GetGrade", "G1"])
        .passes()
        .stdout_json();
    assert_eq!(grade["published"], true);
    assert_eq!(grade["publishedBy"], "dean");
    assert_eq!(grade["publishedAt"], "2024-06-02T10:00:00Z");
    assert_eq!(grade["maxScore"], 20.0);
}

#[test]
fn scores_are_validated() {
    let temp = Project::empty();
    temp.with_exam();
    let submit = |score: &str| {
        temp.institution("prof")
            .args(&["SubmitGrade", "G1", "E1", "alice", score, "", "20"])
    };

    submit("21").exits(6);
    submit("-1").exits(6);
    submit("abc").exits(6);
    submit("20").passes();
}

#[test]
fn only_enrolled_students_are_graded() {
    let temp = Project::empty();
    temp.with_exam();
    temp.institution("prof")
        .args(&["SubmitGrade", "G1", "E1", "bob", "10", ""])
        .exits(5);
}

#[test]
fn class_listing_shows_drafts_to_the_institution() {
    let temp = graded();

    temp.institution("prof")
        .args(&["ListGradesForClass", "C1"])
        .passes()
        .stdout_eq("G1\tE1\talice\t15.5/20\tdraft\tsolid work\n");
}
