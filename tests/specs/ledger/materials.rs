//! Course material specs

use crate::prelude::*;

fn with_material() -> Project {
    let temp = Project::empty();
    temp.with_exam();
    temp.institution("prof")
        .args(&["UploadMaterial", "MAT1", "C1", "M1", "Week 1", "lecture", "ipfs://week1"])
        .passes();
    temp
}

#[test]
fn enrolled_students_list_and_fetch_materials() {
    let temp = with_material();

    temp.learner("alice")
        .args(&["ListMaterials", "C1"])
        .passes()
        .stdout_eq("MAT1\tM1\tlecture\tWeek 1\n");
    temp.learner("alice")
        .args(&["FetchMaterialContent", "MAT1"])
        .passes()
        .stdout_eq("MAT1\tipfs://week1\n");
}

#[test]
fn outsiders_are_denied() {
    let temp = with_material();

    temp.learner("bob").args(&["ListMaterials", "C1"]).exits(5);
    temp.learner("bob")
        .args(&["FetchMaterialContent", "MAT1"])
        .exits(5);
}

#[test]
fn unknown_kind_is_rejected() {
    let temp = Project::empty();
    temp.with_exam();
    temp.institution("prof")
        .args(&["UploadMaterial", "MAT1", "C1", "M1", "Week 1", "podcast", "ipfs://x"])
        .exits(6);
}

#[test]
fn deleted_material_is_gone() {
    let temp = with_material();
    temp.institution("prof").args(&["DeleteMaterial", "MAT1"]).passes();

    temp.learner("alice")
        .args(&["ListMaterials", "C1"])
        .passes()
        .stdout_eq("(none)\n");
    temp.learner("alice")
        .args(&["FetchMaterialContent", "MAT1"])
        .exits(3);
}
