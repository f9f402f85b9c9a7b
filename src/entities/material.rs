//! Material entity - The per-warehouse inventory record.
//!
//! One row per (warehouse, name, kind) pair, holding the opening balance, the
//! four transaction counters, and the derived `current_balance`. Medicines
//! share the table with feed materials, discriminated by `kind`.
//!
//! Invariant maintained by [`crate::core::inventory`] after every mutation:
//! `current_balance == opening_balance + purchases + manufacturing - sales - consumption`

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory record database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    /// Unique identifier for the inventory record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the warehouse this record belongs to
    pub warehouse_id: i64,
    /// Name of the material or medicine
    pub name: String,
    /// Record kind: `"material"` or `"medicine"`
    pub kind: String,
    /// Unit of measure (e.g. "kg", "bag", "bottle")
    pub unit: String,
    /// Balance the record started with when it was registered
    pub opening_balance: f64,
    /// Total quantity bought via `buy` invoice items
    pub purchases: f64,
    /// Total quantity sold via `sell` invoice items
    pub sales: f64,
    /// Total quantity consumed as manufacturing input
    pub consumption: f64,
    /// Total quantity produced as manufacturing output
    pub manufacturing: f64,
    /// Derived balance, kept consistent with the counters above
    pub current_balance: f64,
    /// When the record was registered
    pub created_at: DateTimeUtc,
    /// When a counter was last mutated
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Material and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each inventory record belongs to one warehouse
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    /// One inventory record has many invoice items
    #[sea_orm(has_many = "super::invoice_item::Entity")]
    InvoiceItems,
    /// One inventory record has many manufacturing items
    #[sea_orm(has_many = "super::manufacturing_item::Entity")]
    ManufacturingItems,
    /// One inventory record has many stock movements
    #[sea_orm(has_many = "super::stock_movement::Entity")]
    StockMovements,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::invoice_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceItems.def()
    }
}

impl Related<super::manufacturing_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManufacturingItems.def()
    }
}

impl Related<super::stock_movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
