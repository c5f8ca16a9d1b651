// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Material program: course material references behind an enrollment check

use crate::access;
use crate::context::OperationContext;
use crate::error::LedgerError;
use crate::query;
use crate::response::{ContentRef, Response};
use scholar_core::{Class, Event, Material, MaterialKind, RecordKind};
use scholar_storage::{Selector, Store};

pub(crate) struct NewMaterial {
    pub material_id: String,
    pub class_id: String,
    pub module_id: String,
    pub title: String,
    pub kind: MaterialKind,
    pub content_ref: String,
}

pub(crate) fn upload_material<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    new: NewMaterial,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "upload materials").check()?;
    let _: Class = ctx.require(&new.class_id)?;
    ctx.ensure_vacant(RecordKind::Material, &new.material_id)?;

    let material = Material {
        id: new.material_id,
        class_id: new.class_id,
        module_id: new.module_id,
        title: new.title,
        kind: new.kind,
        content_ref: new.content_ref,
        uploaded_by: ctx.caller.id.clone(),
        uploaded_at: ctx.now,
    };
    ctx.emit(Event::MaterialUploaded {
        material_id: material.id.clone(),
        class_id: material.class_id.clone(),
    });
    ctx.save(material)?;
    Ok(Response::Empty)
}

/// Metadata only; content pointers go through [`fetch_material_content`]
pub(crate) fn list_materials<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    class_id: &str,
) -> Result<Response, LedgerError> {
    access::require_enrollment(ctx, class_id)?;
    let materials: Vec<Material> = query::find(ctx, Selector::new().eq("classId", class_id))?;
    Ok(Response::Materials(
        materials.iter().map(Material::summary).collect(),
    ))
}

/// Enrollment is checked again here, at the point of use
pub(crate) fn fetch_material_content<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    material_id: &str,
) -> Result<Response, LedgerError> {
    let material: Material = ctx.require(material_id)?;
    access::require_enrollment(ctx, &material.class_id)?;
    Ok(Response::Content(ContentRef {
        id: material.id,
        content_ref: material.content_ref,
    }))
}

pub(crate) fn delete_material<S: Store + ?Sized>(
    ctx: &mut OperationContext<'_, S>,
    material_id: &str,
) -> Result<Response, LedgerError> {
    access::institution_only(&ctx.caller, "delete materials").check()?;
    let material: Material = ctx.require(material_id)?;
    ctx.remove(RecordKind::Material, material_id);
    ctx.emit(Event::MaterialDeleted {
        material_id: material.id,
        class_id: material.class_id,
    });
    Ok(Response::Empty)
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
