//! Invoice actions: buy/sell documents and their ledger-backed items.

use super::ActionResult;
use crate::{
    auth::{AuthContext, Role},
    core::invoice::{self, InvoiceType},
    entities::{invoice as invoice_entity, invoice_item},
    errors::Error,
};
use sea_orm::{DatabaseConnection, prelude::Date};

/// Creates an empty invoice header. Requires `Worker`.
pub async fn create_invoice(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    farm_id: i64,
    warehouse_id: i64,
    invoice_type: &str,
    party: String,
    invoice_date: Date,
) -> ActionResult<invoice_entity::Model> {
    if let Err(e) = ctx.require(Role::Worker) {
        return ActionResult::fail(&e);
    }
    let invoice_type = match InvoiceType::parse(invoice_type) {
        Ok(t) => t,
        Err(e) => return ActionResult::fail(&e),
    };
    invoice::create_invoice(
        db,
        farm_id,
        warehouse_id,
        invoice_type,
        party,
        invoice_date,
        ctx.user_id.clone(),
    )
    .await
    .into()
}

/// Fetches an invoice with its items. Requires `Viewer`.
pub async fn get_invoice(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    invoice_id: i64,
) -> ActionResult<(invoice_entity::Model, Vec<invoice_item::Model>)> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    let invoice = match invoice::get_invoice_by_id(db, invoice_id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => {
            return ActionResult::fail(&Error::NotFound {
                resource: "Invoice",
                id: invoice_id.to_string(),
            });
        }
        Err(e) => return ActionResult::fail(&e),
    };
    match invoice::get_items_for_invoice(db, invoice_id).await {
        Ok(items) => ActionResult::ok((invoice, items)),
        Err(e) => ActionResult::fail(&e),
    }
}

/// Lists a warehouse's invoices, newest first. Requires `Viewer`.
pub async fn list_invoices(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    warehouse_id: i64,
) -> ActionResult<Vec<invoice_entity::Model>> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    invoice::list_invoices_for_warehouse(db, warehouse_id)
        .await
        .into()
}

/// Adds an item to an invoice and applies it to the ledger. Requires
/// `Worker`. Sell items that exceed the available balance fail with the
/// shortage attached and no state change.
pub async fn add_invoice_item(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    invoice_id: i64,
    material_id: i64,
    quantity: f64,
    unit_price: f64,
) -> ActionResult<invoice_item::Model> {
    if let Err(e) = ctx.require(Role::Worker) {
        return ActionResult::fail(&e);
    }
    invoice::add_invoice_item(db, invoice_id, material_id, quantity, unit_price)
        .await
        .into()
}

/// Replaces an item's quantity and price, re-basing the ledger on the new
/// figures. Requires `Worker`.
pub async fn update_invoice_item(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    item_id: i64,
    new_quantity: f64,
    new_unit_price: f64,
) -> ActionResult<invoice_item::Model> {
    if let Err(e) = ctx.require(Role::Worker) {
        return ActionResult::fail(&e);
    }
    invoice::update_invoice_item(db, item_id, new_quantity, new_unit_price)
        .await
        .into()
}

/// Removes an item, reversing its ledger effect. Requires `Worker`.
pub async fn delete_invoice_item(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    item_id: i64,
) -> ActionResult<()> {
    if let Err(e) = ctx.require(Role::Worker) {
        return ActionResult::fail(&e);
    }
    invoice::delete_invoice_item(db, item_id).await.into()
}

/// Deletes an invoice, reversing every item. Requires `Manager`.
pub async fn delete_invoice(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    invoice_id: i64,
) -> ActionResult<()> {
    if let Err(e) = ctx.require(Role::Manager) {
        return ActionResult::fail(&e);
    }
    invoice::delete_invoice(db, invoice_id).await.into()
}
