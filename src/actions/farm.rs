//! Registry actions for farms and warehouses.

use super::ActionResult;
use crate::{
    auth::{AuthContext, Role},
    core::{farm, warehouse},
    entities::{farm as farm_entity, warehouse as warehouse_entity},
};
use sea_orm::DatabaseConnection;

/// Creates a farm. Requires `Manager`.
pub async fn create_farm(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    name: String,
    owner_user_id: String,
) -> ActionResult<farm_entity::Model> {
    if let Err(e) = ctx.require(Role::Manager) {
        return ActionResult::fail(&e);
    }
    farm::create_farm(db, name, owner_user_id).await.into()
}

/// Lists active farms. Requires `Viewer`.
pub async fn list_farms(
    db: &DatabaseConnection,
    ctx: &AuthContext,
) -> ActionResult<Vec<farm_entity::Model>> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    farm::list_farms(db).await.into()
}

/// Soft deletes a farm. Requires `Admin`.
pub async fn delete_farm(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    farm_id: i64,
) -> ActionResult<farm_entity::Model> {
    if let Err(e) = ctx.require(Role::Admin) {
        return ActionResult::fail(&e);
    }
    farm::delete_farm(db, farm_id).await.into()
}

/// Creates a warehouse under a farm. Requires `Manager`.
pub async fn create_warehouse(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    farm_id: i64,
    name: String,
) -> ActionResult<warehouse_entity::Model> {
    if let Err(e) = ctx.require(Role::Manager) {
        return ActionResult::fail(&e);
    }
    warehouse::create_warehouse(db, farm_id, name).await.into()
}

/// Lists a farm's active warehouses. Requires `Viewer`.
pub async fn list_warehouses(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    farm_id: i64,
) -> ActionResult<Vec<warehouse_entity::Model>> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    warehouse::list_warehouses(db, farm_id).await.into()
}

/// Soft deletes a warehouse. Requires `Manager`.
pub async fn delete_warehouse(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    warehouse_id: i64,
) -> ActionResult<warehouse_entity::Model> {
    if let Err(e) = ctx.require(Role::Manager) {
        return ActionResult::fail(&e);
    }
    warehouse::delete_warehouse(db, warehouse_id).await.into()
}
