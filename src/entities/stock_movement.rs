//! Stock movement entity - Append-only audit trail of the ledger.
//!
//! One row per counter mutation: which counter moved, by how much, what the
//! effect on the balance was, and which document caused it. Reversals appear
//! as movements with negated deltas rather than as deletions, so the full
//! history of a record stays reconstructible.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock movement database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    /// Unique identifier for the movement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the inventory record that moved
    pub material_id: i64,
    /// Counter that moved: `"purchases"`, `"sales"`, `"consumption"`, or `"manufacturing"`
    pub counter: String,
    /// Signed delta applied to the counter
    pub quantity: f64,
    /// Signed delta applied to `current_balance`
    pub balance_delta: f64,
    /// What caused the movement: `"invoice_item"`, `"manufacturing_item"`, or `"manufacturing_output"`
    pub source_kind: String,
    /// ID of the causing row, if it still exists
    pub source_id: Option<i64>,
    /// When the movement was applied
    pub recorded_at: DateTimeUtc,
}

/// Defines relationships between StockMovement and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each movement belongs to one inventory record
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
