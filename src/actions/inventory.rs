//! Inventory record actions: registration, listing, deletion, and the
//! movement history behind a record's counters.

use super::ActionResult;
use crate::{
    auth::{AuthContext, Role},
    core::inventory::{self, MaterialKind},
    entities::{material, stock_movement},
    errors::Error,
};
use sea_orm::DatabaseConnection;

/// Registers a new inventory record in a warehouse. Requires `Manager`.
pub async fn register_material(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    warehouse_id: i64,
    name: String,
    kind: &str,
    unit: String,
    opening_balance: f64,
) -> ActionResult<material::Model> {
    if let Err(e) = ctx.require(Role::Manager) {
        return ActionResult::fail(&e);
    }
    let kind = match MaterialKind::parse(kind) {
        Ok(kind) => kind,
        Err(e) => return ActionResult::fail(&e),
    };
    inventory::register_material(db, warehouse_id, name, kind, unit, opening_balance)
        .await
        .into()
}

/// Lists a warehouse's inventory records. Requires `Viewer`.
pub async fn list_materials(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    warehouse_id: i64,
) -> ActionResult<Vec<material::Model>> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    inventory::list_materials(db, warehouse_id).await.into()
}

/// Fetches one inventory record. Requires `Viewer`.
pub async fn get_material(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    material_id: i64,
) -> ActionResult<material::Model> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    match inventory::get_material_by_id(db, material_id).await {
        Ok(Some(record)) => ActionResult::ok(record),
        Ok(None) => ActionResult::fail(&Error::NotFound {
            resource: "Inventory record",
            id: material_id.to_string(),
        }),
        Err(e) => ActionResult::fail(&e),
    }
}

/// Permanently deletes an inventory record and its movement history.
/// Refused while invoices or manufacturing runs still reference it.
/// Requires `Manager`.
pub async fn delete_material(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    material_id: i64,
) -> ActionResult<()> {
    if let Err(e) = ctx.require(Role::Manager) {
        return ActionResult::fail(&e);
    }
    inventory::delete_material(db, material_id).await.into()
}

/// Lists the movement history of a record, newest first. Requires `Viewer`.
pub async fn list_stock_movements(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    material_id: i64,
) -> ActionResult<Vec<stock_movement::Model>> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    inventory::list_stock_movements(db, material_id).await.into()
}
