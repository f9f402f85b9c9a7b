//! Manufacturing actions: feed-blending runs and their lifecycle.

use super::ActionResult;
use crate::{
    auth::{AuthContext, Role},
    core::manufacturing::{self, ManufacturingInput, ManufacturingOutcome},
    entities::{manufacturing_invoice, manufacturing_item},
    errors::Error,
};
use sea_orm::{DatabaseConnection, prelude::Date};

/// Creates a blending run. Requires `Worker`. All inputs are validated
/// against current stock before anything moves; a shortage on any of them
/// fails the whole run with the full shortage list. A failure crediting the
/// output after the inputs were consumed surfaces as a warning on an
/// otherwise successful result.
pub async fn create_manufacturing_invoice(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    warehouse_id: i64,
    output_material_id: i64,
    blend_count: f64,
    invoice_date: Date,
    inputs: Vec<ManufacturingInput>,
) -> ActionResult<ManufacturingOutcome> {
    if let Err(e) = ctx.require(Role::Worker) {
        return ActionResult::fail(&e);
    }
    match manufacturing::create_manufacturing_invoice(
        db,
        warehouse_id,
        output_material_id,
        blend_count,
        invoice_date,
        ctx.user_id.clone(),
        inputs,
    )
    .await
    {
        Ok(outcome) => {
            let warning = outcome.warning.clone();
            ActionResult::ok_with_warning(outcome, warning)
        }
        Err(e) => ActionResult::fail(&e),
    }
}

/// Fetches a run with its consumed items. Requires `Viewer`.
pub async fn get_manufacturing_invoice(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    invoice_id: i64,
) -> ActionResult<(
    manufacturing_invoice::Model,
    Vec<manufacturing_item::Model>,
)> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    let invoice = match manufacturing::get_manufacturing_invoice_by_id(db, invoice_id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => {
            return ActionResult::fail(&Error::NotFound {
                resource: "Manufacturing invoice",
                id: invoice_id.to_string(),
            });
        }
        Err(e) => return ActionResult::fail(&e),
    };
    match manufacturing::get_items_for_manufacturing_invoice(db, invoice_id).await {
        Ok(items) => ActionResult::ok((invoice, items)),
        Err(e) => ActionResult::fail(&e),
    }
}

/// Lists a warehouse's runs, newest first. Requires `Viewer`.
pub async fn list_manufacturing_invoices(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    warehouse_id: i64,
) -> ActionResult<Vec<manufacturing_invoice::Model>> {
    if let Err(e) = ctx.require(Role::Viewer) {
        return ActionResult::fail(&e);
    }
    manufacturing::list_manufacturing_invoices(db, warehouse_id)
        .await
        .into()
}

/// Deletes a completed run, reversing the output credit and every input
/// consumption. Requires `Manager`.
pub async fn delete_manufacturing_invoice(
    db: &DatabaseConnection,
    ctx: &AuthContext,
    invoice_id: i64,
) -> ActionResult<()> {
    if let Err(e) = ctx.require(Role::Manager) {
        return ActionResult::fail(&e);
    }
    manufacturing::delete_manufacturing_invoice(db, invoice_id)
        .await
        .into()
}
