//! Warehouse business logic - storage locations within a farm.

use crate::{
    entities::{Farm, Warehouse, warehouse},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a warehouse in a farm. Names must be unique among the farm's
/// active warehouses.
pub async fn create_warehouse(
    db: &DatabaseConnection,
    farm_id: i64,
    name: String,
) -> Result<warehouse::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Warehouse name cannot be empty"));
    }

    let farm = Farm::find_by_id(farm_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Farm",
            id: farm_id.to_string(),
        })?;

    if farm.is_deleted {
        return Err(Error::NotFound {
            resource: "Farm",
            id: farm_id.to_string(),
        });
    }

    if get_warehouse_by_name(db, farm_id, name.trim())
        .await?
        .is_some()
    {
        return Err(Error::validation(format!(
            "Warehouse '{}' already exists in this farm",
            name.trim()
        )));
    }

    let warehouse = warehouse::ActiveModel {
        farm_id: Set(farm_id),
        name: Set(name.trim().to_string()),
        is_deleted: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    warehouse.insert(db).await.map_err(Into::into)
}

/// Finds an active warehouse by name within a farm.
pub async fn get_warehouse_by_name(
    db: &DatabaseConnection,
    farm_id: i64,
    name: &str,
) -> Result<Option<warehouse::Model>> {
    Warehouse::find()
        .filter(warehouse::Column::FarmId.eq(farm_id))
        .filter(warehouse::Column::Name.eq(name))
        .filter(warehouse::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a warehouse by its unique ID.
pub async fn get_warehouse_by_id(
    db: &DatabaseConnection,
    warehouse_id: i64,
) -> Result<Option<warehouse::Model>> {
    Warehouse::find_by_id(warehouse_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a farm's active warehouses, ordered alphabetically by name.
pub async fn list_warehouses(
    db: &DatabaseConnection,
    farm_id: i64,
) -> Result<Vec<warehouse::Model>> {
    Warehouse::find()
        .filter(warehouse::Column::FarmId.eq(farm_id))
        .filter(warehouse::Column::IsDeleted.eq(false))
        .order_by_asc(warehouse::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Soft deletes a warehouse, preserving its inventory history.
pub async fn delete_warehouse(
    db: &DatabaseConnection,
    warehouse_id: i64,
) -> Result<warehouse::Model> {
    let mut warehouse: warehouse::ActiveModel = Warehouse::find_by_id(warehouse_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Warehouse",
            id: warehouse_id.to_string(),
        })?
        .into();

    if *warehouse.is_deleted.as_ref() {
        return Err(Error::NotFound {
            resource: "Warehouse",
            id: warehouse_id.to_string(),
        });
    }

    warehouse.is_deleted = Set(true);
    warehouse.update(db).await.map_err(Into::into)
}
