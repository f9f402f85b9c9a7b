//! Invoice item entity - One line of an invoice.
//!
//! Creating a `sell` item increments the referenced record's `sales` counter
//! and decrements its balance; a `buy` item does the opposite through
//! `purchases`. Deleting an item reverses the corresponding counter.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the invoice this item belongs to
    pub invoice_id: i64,
    /// ID of the inventory record this item moves
    pub material_id: i64,
    /// Quantity moved, always positive
    pub quantity: f64,
    /// Price per unit
    pub unit_price: f64,
    /// When the item was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between InvoiceItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one invoice
    #[sea_orm(
        belongs_to = "super::invoice::Entity",
        from = "Column::InvoiceId",
        to = "super::invoice::Column::Id"
    )]
    Invoice,
    /// Each item references one inventory record
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
