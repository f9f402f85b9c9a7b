//! Farm entity - The tenant root of the system.
//!
//! Every warehouse, invoice, and daily report belongs to exactly one farm.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Farm database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "farms")]
pub struct Model {
    /// Unique identifier for the farm
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the farm
    pub name: String,
    /// User id of the farm owner
    pub owner_user_id: String,
    /// Soft delete flag - if true, farm is hidden but data is preserved
    pub is_deleted: bool,
    /// When the farm was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Farm and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One farm has many warehouses
    #[sea_orm(has_many = "super::warehouse::Entity")]
    Warehouses,
    /// One farm has many invoices
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoices,
    /// One farm has many daily reports
    #[sea_orm(has_many = "super::daily_report::Entity")]
    DailyReports,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouses.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl Related<super::daily_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
