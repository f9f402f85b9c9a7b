//! Invoice entity - A buy or sell document against one warehouse.
//!
//! The invoice itself carries no quantities; its items do. Deleting an
//! invoice reverses and removes all of its items first.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    /// Unique identifier for the invoice
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the farm this invoice belongs to
    pub farm_id: i64,
    /// ID of the warehouse whose stock this invoice moves
    pub warehouse_id: i64,
    /// Invoice direction: `"buy"` or `"sell"`
    pub invoice_type: String,
    /// Counterparty name (supplier or customer)
    pub party: String,
    /// Business date of the invoice
    pub invoice_date: Date,
    /// User id of whoever recorded the invoice
    pub created_by: String,
    /// When the invoice was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Invoice and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each invoice belongs to one farm
    #[sea_orm(
        belongs_to = "super::farm::Entity",
        from = "Column::FarmId",
        to = "super::farm::Column::Id"
    )]
    Farm,
    /// Each invoice targets one warehouse
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    /// One invoice has many items
    #[sea_orm(has_many = "super::invoice_item::Entity")]
    Items,
}

impl Related<super::farm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farm.def()
    }
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::invoice_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
