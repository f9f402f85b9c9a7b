//! Manufacturing item entity - One input material of a blending run.
//!
//! Creating one increments the input record's `consumption` counter and
//! decrements its balance by `quantity`. `weight` is the precomputed
//! `quantity * blend_count` contribution to the run's output.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Manufacturing item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "manufacturing_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the manufacturing invoice this item belongs to
    pub manufacturing_invoice_id: i64,
    /// ID of the inventory record consumed
    pub material_id: i64,
    /// Quantity consumed per blend, always positive
    pub quantity: f64,
    /// Contribution to the output: quantity * blend_count
    pub weight: f64,
    /// When the item was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ManufacturingItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one manufacturing invoice
    #[sea_orm(
        belongs_to = "super::manufacturing_invoice::Entity",
        from = "Column::ManufacturingInvoiceId",
        to = "super::manufacturing_invoice::Column::Id"
    )]
    ManufacturingInvoice,
    /// Each item consumes from one inventory record
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<super::manufacturing_invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManufacturingInvoice.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
