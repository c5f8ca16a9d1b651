//! Help and operation listing specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();
    temp.scholar()
        .args(&["--help"])
        .passes()
        .stdout_has("invoke")
        .stdout_has("operations");
}

#[test]
fn operations_show_argument_lists() {
    let temp = Project::empty();
    temp.scholar()
        .args(&["operations"])
        .passes()
        .stdout_has("CreateClass <id> <name> <description> [semester] [maxStudents] [teacher]\n")
        .stdout_has("PublishGrade <gradeId>\n")
        .stdout_has("InitLedger\n");
}

#[test]
fn operations_as_json() {
    let temp = Project::empty();
    let listed = temp
        .scholar()
        .args(&["--output", "json", "operations"])
        .passes()
        .stdout_json();
    let ops = listed.as_array().unwrap();
    assert_eq!(ops.len(), 26);
    let submit = ops.iter().find(|op| op["name"] == "SubmitGrade").unwrap();
    assert_eq!(submit["optional"], serde_json::json!(["maxScore"]));
}

#[test]
fn operations_do_not_create_a_store() {
    let temp = Project::empty();
    temp.scholar().args(&["operations"]).passes();
    assert!(!temp.store().exists());
}
