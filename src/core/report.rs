//! Reporting business logic - daily production reports and aggregates.
//!
//! Daily reports are one-per-farm-per-day records of production figures.
//! Aggregates are computed from the queried rows rather than pushed into SQL,
//! matching the small per-farm data volumes.

use crate::{
    core::inventory,
    entities::{DailyReport, Farm, daily_report, material},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Totals over a date range of daily reports.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProductionSummary {
    /// Number of reports in the range
    pub days: usize,
    pub total_eggs: i64,
    pub total_mortality: i64,
    pub total_feed_consumed: f64,
}

/// Current stock of one warehouse: every inventory record plus the names of
/// records that are out of stock.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WarehouseStockSummary {
    pub warehouse_id: i64,
    pub records: Vec<material::Model>,
    pub out_of_stock: Vec<String>,
}

/// Submits a daily production report. One report per farm per day.
pub async fn create_daily_report(
    db: &DatabaseConnection,
    farm_id: i64,
    report_date: Date,
    eggs_collected: i64,
    mortality: i64,
    feed_consumed: f64,
    notes: Option<String>,
    created_by: String,
) -> Result<daily_report::Model> {
    if eggs_collected < 0 || mortality < 0 {
        return Err(Error::validation(
            "Eggs collected and mortality cannot be negative",
        ));
    }

    if feed_consumed < 0.0 || !feed_consumed.is_finite() {
        return Err(Error::InvalidQuantity {
            quantity: feed_consumed,
        });
    }

    let farm = Farm::find_by_id(farm_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Farm",
            id: farm_id.to_string(),
        })?;

    if farm.is_deleted {
        return Err(Error::NotFound {
            resource: "Farm",
            id: farm_id.to_string(),
        });
    }

    let existing = DailyReport::find()
        .filter(daily_report::Column::FarmId.eq(farm_id))
        .filter(daily_report::Column::ReportDate.eq(report_date))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::validation(format!(
            "A report for {report_date} already exists for this farm"
        )));
    }

    let report = daily_report::ActiveModel {
        farm_id: Set(farm_id),
        report_date: Set(report_date),
        eggs_collected: Set(eggs_collected),
        mortality: Set(mortality),
        feed_consumed: Set(feed_consumed),
        notes: Set(notes),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    report.insert(db).await.map_err(Into::into)
}

/// Lists a farm's reports within an inclusive date range, oldest first.
pub async fn list_reports_for_range(
    db: &DatabaseConnection,
    farm_id: i64,
    from: Date,
    to: Date,
) -> Result<Vec<daily_report::Model>> {
    DailyReport::find()
        .filter(daily_report::Column::FarmId.eq(farm_id))
        .filter(daily_report::Column::ReportDate.gte(from))
        .filter(daily_report::Column::ReportDate.lte(to))
        .order_by_asc(daily_report::Column::ReportDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Totals production figures over an inclusive date range.
pub async fn production_summary(
    db: &DatabaseConnection,
    farm_id: i64,
    from: Date,
    to: Date,
) -> Result<ProductionSummary> {
    let reports = list_reports_for_range(db, farm_id, from, to).await?;

    let mut summary = ProductionSummary {
        days: reports.len(),
        total_eggs: 0,
        total_mortality: 0,
        total_feed_consumed: 0.0,
    };
    for report in &reports {
        summary.total_eggs += report.eggs_collected;
        summary.total_mortality += report.mortality;
        summary.total_feed_consumed += report.feed_consumed;
    }

    Ok(summary)
}

/// Snapshot of a warehouse's stock, flagging records with nothing on hand.
pub async fn warehouse_stock_summary(
    db: &DatabaseConnection,
    warehouse_id: i64,
) -> Result<WarehouseStockSummary> {
    let records = inventory::list_materials(db, warehouse_id).await?;

    let out_of_stock = records
        .iter()
        .filter(|r| r.current_balance <= 0.0)
        .map(|r| r.name.clone())
        .collect();

    Ok(WarehouseStockSummary {
        warehouse_id,
        records,
        out_of_stock,
    })
}
