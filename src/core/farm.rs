//! Farm business logic - tenant registry operations.

use crate::{
    config::seed::FarmConfig,
    core::warehouse,
    entities::{Farm, farm},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Creates a farm. Names must be unique among active farms.
pub async fn create_farm(
    db: &DatabaseConnection,
    name: String,
    owner_user_id: String,
) -> Result<farm::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Farm name cannot be empty"));
    }

    if get_farm_by_name(db, name.trim()).await?.is_some() {
        return Err(Error::validation(format!(
            "Farm '{}' already exists",
            name.trim()
        )));
    }

    let farm = farm::ActiveModel {
        name: Set(name.trim().to_string()),
        owner_user_id: Set(owner_user_id),
        is_deleted: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    farm.insert(db).await.map_err(Into::into)
}

/// Finds an active farm by name.
pub async fn get_farm_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<farm::Model>> {
    Farm::find()
        .filter(farm::Column::Name.eq(name))
        .filter(farm::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a farm by its unique ID.
pub async fn get_farm_by_id(db: &DatabaseConnection, farm_id: i64) -> Result<Option<farm::Model>> {
    Farm::find_by_id(farm_id).one(db).await.map_err(Into::into)
}

/// Lists all active farms, ordered alphabetically by name.
pub async fn list_farms(db: &DatabaseConnection) -> Result<Vec<farm::Model>> {
    Farm::find()
        .filter(farm::Column::IsDeleted.eq(false))
        .order_by_asc(farm::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Soft deletes a farm, hiding it and its data without destroying history.
pub async fn delete_farm(db: &DatabaseConnection, farm_id: i64) -> Result<farm::Model> {
    let mut farm: farm::ActiveModel = Farm::find_by_id(farm_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Farm",
            id: farm_id.to_string(),
        })?
        .into();

    if *farm.is_deleted.as_ref() {
        return Err(Error::NotFound {
            resource: "Farm",
            id: farm_id.to_string(),
        });
    }

    farm.is_deleted = Set(true);
    farm.update(db).await.map_err(Into::into)
}

/// Seeds farms and their warehouses from configuration, skipping any that
/// already exist. Used at startup so a fresh database comes up ready.
pub async fn seed_farms(db: &DatabaseConnection, configs: &[FarmConfig]) -> Result<()> {
    for config in configs {
        let farm = match get_farm_by_name(db, &config.name).await? {
            Some(existing) => existing,
            None => {
                info!(farm = %config.name, "seeding farm");
                create_farm(db, config.name.clone(), config.owner.clone()).await?
            }
        };

        for warehouse_name in &config.warehouses {
            if warehouse::get_warehouse_by_name(db, farm.id, warehouse_name)
                .await?
                .is_none()
            {
                info!(farm = %config.name, warehouse = %warehouse_name, "seeding warehouse");
                warehouse::create_warehouse(db, farm.id, warehouse_name.clone()).await?;
            }
        }
    }

    Ok(())
}
