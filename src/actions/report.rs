//! Reporting actions: daily production entries and the aggregates built
//! over them.

use super::ActionResult;
use crate::{
    auth::{AuthContext, Role},
    core::report::{self, ProductionSummary, WarehouseStockSummary},
    entities::daily_report,
};
use sea_orm::{DatabaseConnection, prelude::Date};

/// Records a day's production figures for a farm. Requires `Worker`.
/// One report per farm and date.
pub async fn create_daily_report(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    farm_id: i64,
    report_date: Date,
    eggs_collected: i64,
    mortality: i64,
    feed_consumed: f64,
    notes: Option<String>,
) -> ActionResult<daily_report::Model> {
    if let Err(e) = ctx.require(Role::Worker) {
        return ActionResult::fail(&e);
    }
    report::create_daily_report(
        db,
        farm_id,
        report_date,
        eggs_collected,
        mortality,
        feed_consumed,
        notes,
        ctx.user_id.clone(),
    )
    .await
    .into()
}

/// Lists a farm's reports over an inclusive date range. Requires `Viewer`.
pub async fn list_reports(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    farm_id: i64,
    from: Date,
    to: Date,
) -> ActionResult<Vec<daily_report::Model>> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    report::list_reports_for_range(db, farm_id, from, to)
        .await
        .into()
}

/// Totals a farm's production over an inclusive date range. Requires
/// `Viewer`.
pub async fn production_summary(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    farm_id: i64,
    from: Date,
    to: Date,
) -> ActionResult<ProductionSummary> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    report::production_summary(db, farm_id, from, to).await.into()
}

/// Snapshots a warehouse's stock levels. Requires `Viewer`.
pub async fn warehouse_stock_summary(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    warehouse_id: i64,
) -> ActionResult<WarehouseStockSummary> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    report::warehouse_stock_summary(db, warehouse_id).await.into()
}
