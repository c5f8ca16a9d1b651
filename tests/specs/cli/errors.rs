//! Error reporting and exit code specs

use crate::prelude::*;

#[test]
fn unknown_operation_is_an_invalid_argument() {
    let temp = Project::empty();
    temp.institution("prof")
        .args(&["EnrollEveryone"])
        .exits(6)
        .stderr_has("error[InvalidArgument]: unknown operation: EnrollEveryone")
        .stderr_has("scholar operations");
}

#[test]
fn wrong_arity_shows_usage() {
    let temp = Project::empty();
    temp.institution("prof")
        .args(&["EnrollStudent", "C1"])
        .exits(6)
        .stderr_has("Usage: scholar invoke EnrollStudent <classId> <studentId>");
}

#[test]
fn missing_subject_is_a_usage_error() {
    let temp = Project::empty();
    temp.scholar().args(&["invoke", "ListClasses"]).exits(2);
}

#[test]
fn malformed_credential_fails_identity_resolution() {
    let temp = Project::empty();
    temp.file("cred.json", "not a credential");
    temp.scholar()
        .args(&["invoke", "--credential-file", "cred.json", "ListClasses"])
        .exits(10)
        .stderr_has("IdentityResolutionFailure");
}

#[test]
fn credential_file_is_accepted() {
    let temp = Project::empty();
    temp.file(
        "cred.json",
        r#"{"mspId":"InstitutionMSP","subject":"CN=prof,OU=staff"}"#,
    );
    temp.scholar()
        .args(&["invoke", "--credential-file", "cred.json", "CreateClass", "C1", "Algebra", "Linear algebra"])
        .passes()
        .stdout_eq("ok\n");
}

#[test]
fn unrecognized_organization_is_denied() {
    let temp = Project::empty();
    temp.invoke("VisitorMSP", "eve")
        .args(&["GetClassDetails", "MATH101"])
        .exits(5)
        .stderr_has("AccessDenied");
}

#[test]
fn missing_record_is_not_found() {
    let temp = Project::empty();
    temp.institution("prof")
        .args(&["GetClassDetails", "NOPE"])
        .exits(3)
        .stderr_has("class NOPE does not exist");
}

#[test]
fn json_errors_carry_the_kind() {
    let temp = Project::empty();
    let run = temp
        .institution("prof")
        .json()
        .args(&["GetClassDetails", "NOPE"])
        .exits(3);
    let err: serde_json::Value = serde_json::from_str(run.stderr().trim()).unwrap();
    assert_eq!(err["kind"], "NotFound");
}

#[test]
fn invalid_at_timestamp_is_rejected_locally() {
    let temp = Project::empty();
    temp.institution("prof")
        .at("yesterday")
        .args(&["ListClasses"])
        .exits(1)
        .stderr_has("invalid --at timestamp");
}

#[test]
fn broken_config_is_reported() {
    let temp = Project::empty();
    temp.file(".scholar/scholar.toml", "[ledger]\ncorrection_delay = \"soon\"\n");
    temp.institution("prof")
        .args(&["ListClasses"])
        .exits(1)
        .stderr_has("loading config");
}
