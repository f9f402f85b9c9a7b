//! Manufacturing invoice entity - A feed-blending run.
//!
//! Converts input materials (its items) into one output material. The
//! produced quantity is the sum of item weights, where each item's weight is
//! its quantity multiplied by the invoice's blend count.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Manufacturing invoice database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "manufacturing_invoices")]
pub struct Model {
    /// Unique identifier for the manufacturing invoice
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the warehouse the run happens in
    pub warehouse_id: i64,
    /// ID of the inventory record that receives the produced quantity
    pub output_material_id: i64,
    /// Number of blends; multiplies every item quantity into its weight
    pub blend_count: f64,
    /// Total output quantity, sum of item weights
    pub produced_quantity: f64,
    /// Business date of the run
    pub invoice_date: Date,
    /// User id of whoever recorded the run
    pub created_by: String,
    /// When the run was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ManufacturingInvoice and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each run happens in one warehouse
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    /// Each run produces into one inventory record
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::OutputMaterialId",
        to = "super::material::Column::Id"
    )]
    OutputMaterial,
    /// One run has many input items
    #[sea_orm(has_many = "super::manufacturing_item::Entity")]
    Items,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutputMaterial.def()
    }
}

impl Related<super::manufacturing_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
