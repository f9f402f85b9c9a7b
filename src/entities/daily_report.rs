//! Daily report entity - One production report per farm per day.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily production report database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_reports")]
pub struct Model {
    /// Unique identifier for the report
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the farm this report covers
    pub farm_id: i64,
    /// Calendar day the report covers; unique per farm
    pub report_date: Date,
    /// Eggs collected that day
    pub eggs_collected: i64,
    /// Birds lost that day
    pub mortality: i64,
    /// Feed consumed that day, in the farm's feed unit
    pub feed_consumed: f64,
    /// Free-form operator notes
    pub notes: Option<String>,
    /// User id of whoever submitted the report
    pub created_by: String,
    /// When the report was submitted
    pub created_at: DateTimeUtc,
}

/// Defines relationships between DailyReport and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each report belongs to one farm
    #[sea_orm(
        belongs_to = "super::farm::Entity",
        from = "Column::FarmId",
        to = "super::farm::Column::Id"
    )]
    Farm,
}

impl Related<super::farm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farm.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
