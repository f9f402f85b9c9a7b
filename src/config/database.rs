//! Database configuration module.
//!
//! Handles `SQLite` connection setup and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without hand-written SQL.

use crate::entities::{
    DailyReport, Farm, Invoice, InvoiceItem, ManufacturingInvoice, ManufacturingItem, Material,
    StockMovement, Warehouse,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/coopstock.sqlite".to_string())
}

/// Establishes the database connection using [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let farm_table = schema.create_table_from_entity(Farm);
    let warehouse_table = schema.create_table_from_entity(Warehouse);
    let material_table = schema.create_table_from_entity(Material);
    let invoice_table = schema.create_table_from_entity(Invoice);
    let invoice_item_table = schema.create_table_from_entity(InvoiceItem);
    let manufacturing_invoice_table = schema.create_table_from_entity(ManufacturingInvoice);
    let manufacturing_item_table = schema.create_table_from_entity(ManufacturingItem);
    let stock_movement_table = schema.create_table_from_entity(StockMovement);
    let daily_report_table = schema.create_table_from_entity(DailyReport);

    db.execute(builder.build(&farm_table)).await?;
    db.execute(builder.build(&warehouse_table)).await?;
    db.execute(builder.build(&material_table)).await?;
    db.execute(builder.build(&invoice_table)).await?;
    db.execute(builder.build(&invoice_item_table)).await?;
    db.execute(builder.build(&manufacturing_invoice_table))
        .await?;
    db.execute(builder.build(&manufacturing_item_table)).await?;
    db.execute(builder.build(&stock_movement_table)).await?;
    db.execute(builder.build(&daily_report_table)).await?;

    Ok(())
}
