//! Warehouse entity - A storage location within a farm.
//!
//! Inventory records are kept per warehouse: the same material name in two
//! warehouses is two independent balance records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Warehouse database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warehouses")]
pub struct Model {
    /// Unique identifier for the warehouse
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the farm this warehouse belongs to
    pub farm_id: i64,
    /// Human-readable name of the warehouse
    pub name: String,
    /// Soft delete flag - if true, warehouse is hidden but data is preserved
    pub is_deleted: bool,
    /// When the warehouse was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Warehouse and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each warehouse belongs to one farm
    #[sea_orm(
        belongs_to = "super::farm::Entity",
        from = "Column::FarmId",
        to = "super::farm::Column::Id"
    )]
    Farm,
    /// One warehouse has many inventory records
    #[sea_orm(has_many = "super::material::Entity")]
    Materials,
}

impl Related<super::farm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farm.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
