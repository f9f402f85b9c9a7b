//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and creating registry
//! entities with sensible defaults.

use crate::{
    core::{
        farm,
        inventory::{self, MaterialKind},
        invoice::{self, InvoiceType},
        warehouse,
    },
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use sea_orm::prelude::Date;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test farm owned by "alice".
pub async fn create_test_farm(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::farm::Model> {
    farm::create_farm(db, name.to_string(), "alice".to_string()).await
}

/// Sets up a database with one farm ("Sunrise") holding one warehouse
/// ("Main"). Most inventory tests start here.
pub async fn setup_with_warehouse() -> Result<(
    DatabaseConnection,
    entities::farm::Model,
    entities::warehouse::Model,
)> {
    let db = setup_test_db().await?;
    let farm = create_test_farm(&db, "Sunrise").await?;
    let warehouse = warehouse::create_warehouse(&db, farm.id, "Main".to_string()).await?;
    Ok((db, farm, warehouse))
}

/// Registers a plain material measured in kilograms.
pub async fn register_test_material(
    db: &DatabaseConnection,
    warehouse_id: i64,
    name: &str,
    opening_balance: f64,
) -> Result<entities::material::Model> {
    inventory::register_material(
        db,
        warehouse_id,
        name.to_string(),
        MaterialKind::Material,
        "kg".to_string(),
        opening_balance,
    )
    .await
}

/// Creates an empty invoice header dated [`test_date`], raised by "wally"
/// against "Acme Feed Co".
pub async fn create_test_invoice(
    db: &DatabaseConnection,
    farm_id: i64,
    warehouse_id: i64,
    invoice_type: InvoiceType,
) -> Result<entities::invoice::Model> {
    invoice::create_invoice(
        db,
        farm_id,
        warehouse_id,
        invoice_type,
        "Acme Feed Co".to_string(),
        test_date(),
        "wally".to_string(),
    )
    .await
}

/// Fixed date used by tests that don't care about the calendar.
#[must_use]
pub fn test_date() -> Date {
    #[allow(clippy::unwrap_used)]
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}
