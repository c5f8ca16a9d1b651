//! Class and enrollment specs

use crate::prelude::*;

#[test]
fn init_ledger_seeds_two_classes() {
    let temp = Project::empty();
    temp.institution("admin").args(&["InitLedger"]).passes();

    temp.learner("alice")
        .args(&["ListClasses"])
        .passes()
        .stdout_eq(
            "INFO101\tComputer Science 101\tIntroduction to programming\n\
             MATH101\tMathematics 101\tIntroduction to differential calculus\n",
        );
}

#[test]
fn init_ledger_twice_keeps_existing_classes() {
    let temp = Project::empty();
    temp.institution("admin").args(&["InitLedger"]).passes();
    temp.learner("alice").args(&["EnrollStudent", "MATH101", "alice"]).passes();
    temp.institution("admin").args(&["InitLedger"]).passes();

    temp.institution("admin")
        .args(&["GetClassDetails", "MATH101"])
        .passes()
        .stdout_has("students: 1/30")
        .stdout_has("enrolled: alice");
}

#[test]
fn state_persists_across_invocations() {
    let temp = Project::empty();
    temp.institution("prof")
        .args(&["CreateClass", "C1", "Algebra", "Linear algebra", "Spring 2025", "2"])
        .passes();
    assert!(temp.store().join("ledger.wal").is_file());

    let class = temp
        .learner("alice")
        .json()
        .args(&["GetClassDetails", "C1"])
        .passes()
        .stdout_json();
    assert_eq!(class["semester"], "Spring 2025");
    assert_eq!(class["maxStudents"], 2);
    assert_eq!(class["createdBy"], "prof");
}

#[test]
fn capacity_is_enforced() {
    let temp = Project::empty();
    temp.institution("prof")
        .args(&["CreateClass", "C1", "Algebra", "Linear algebra", "Spring 2025", "1"])
        .passes();
    temp.learner("alice").args(&["EnrollStudent", "C1", "alice"]).passes();

    temp.learner("bob")
        .args(&["EnrollStudent", "C1", "bob"])
        .exits(11)
        .stderr_has("class C1 is full (1 students)");
    temp.learner("alice")
        .args(&["EnrollStudent", "C1", "alice"])
        .exits(4);
}

#[test]
fn learners_cannot_enroll_others() {
    let temp = Project::empty();
    temp.institution("prof")
        .args(&["CreateClass", "C1", "Algebra", "Linear algebra"])
        .passes();

    temp.learner("mallory")
        .args(&["EnrollStudent", "C1", "alice"])
        .exits(5);
}

#[test]
fn learners_cannot_create_classes() {
    let temp = Project::empty();
    temp.learner("alice")
        .args(&["CreateClass", "C1", "Algebra", "Linear algebra"])
        .exits(5);
    temp.learner("alice").args(&["ListClasses"]).passes().stdout_eq("(none)\n");
}

#[test]
fn committed_operations_append_events() {
    let temp = Project::empty();
    temp.institution("prof")
        .args(&["CreateClass", "C1", "Algebra", "Linear algebra"])
        .passes();
    temp.learner("alice").args(&["EnrollStudent", "C1", "alice"]).passes();
    temp.learner("bob").args(&["EnrollStudent", "NOPE", "bob"]).exits(3);

    let events: Vec<serde_json::Value> = temp
        .read(".scholar/events.jsonl")
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let names: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(names, ["ClassCreated", "StudentEnrolled"]);
    assert_eq!(events[1]["payload"]["studentId"], "alice");
}
