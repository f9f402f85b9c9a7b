//! Manufacturing business logic - feed-blending runs.
//!
//! A run consumes input materials and credits the blended output to another
//! inventory record. All inputs are validated before anything is written:
//! stock shortages are collected across every input and reported as one
//! structured list. Application is then staged (invoice, items, output last);
//! a failure while creating items triggers an explicit rollback that removes
//! the run's records, and a failure applying the output is surfaced as a
//! warning on an otherwise successful result rather than rolled back.

use crate::{
    core::inventory,
    entities::{
        ManufacturingInvoice, ManufacturingItem, Material, manufacturing_invoice,
        manufacturing_item,
    },
    errors::{Error, Result, StockShortage},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One requested input of a blending run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingInput {
    /// Inventory record to consume from
    pub material_id: i64,
    /// Quantity consumed per blend
    pub quantity: f64,
}

/// Result of creating a run. `warning` is set when the inputs were consumed
/// but crediting the output failed; the operator must reconcile that state
/// manually.
#[derive(Debug, Clone)]
pub struct ManufacturingOutcome {
    pub invoice: manufacturing_invoice::Model,
    pub items: Vec<manufacturing_item::Model>,
    pub warning: Option<String>,
}

/// Creates a blending run: validates every input up front, consumes the
/// inputs, and credits the output with the sum of item weights
/// (weight = quantity * `blend_count`).
pub async fn create_manufacturing_invoice(
    db: &DatabaseConnection,
    warehouse_id: i64,
    output_material_id: i64,
    blend_count: f64,
    invoice_date: Date,
    created_by: String,
    inputs: Vec<ManufacturingInput>,
) -> Result<ManufacturingOutcome> {
    if inputs.is_empty() {
        return Err(Error::validation(
            "A manufacturing run requires at least one input material",
        ));
    }

    if blend_count <= 0.0 || !blend_count.is_finite() {
        return Err(Error::validation(format!(
            "Invalid blend count: {blend_count}"
        )));
    }

    for input in &inputs {
        if input.quantity <= 0.0 || !input.quantity.is_finite() {
            return Err(Error::InvalidQuantity {
                quantity: input.quantity,
            });
        }
    }

    let output = Material::find_by_id(output_material_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Material",
            id: output_material_id.to_string(),
        })?;

    if output.warehouse_id != warehouse_id {
        return Err(Error::validation(format!(
            "Output material '{}' belongs to a different warehouse",
            output.name
        )));
    }

    // Validate all inputs before mutating anything, collecting every
    // shortage so the caller sees the complete list at once.
    let mut shortages = Vec::new();
    for input in &inputs {
        let record = Material::find_by_id(input.material_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "Material",
                id: input.material_id.to_string(),
            })?;

        if record.warehouse_id != warehouse_id {
            return Err(Error::validation(format!(
                "Input material '{}' belongs to a different warehouse",
                record.name
            )));
        }

        if record.current_balance < input.quantity {
            shortages.push(StockShortage {
                material_name: record.name,
                available: record.current_balance,
                required: input.quantity,
            });
        }
    }

    if !shortages.is_empty() {
        return Err(Error::InsufficientStock { shortages });
    }

    let produced_quantity: f64 = inputs.iter().map(|i| i.quantity * blend_count).sum();

    let invoice = manufacturing_invoice::ActiveModel {
        warehouse_id: Set(warehouse_id),
        output_material_id: Set(output_material_id),
        blend_count: Set(blend_count),
        produced_quantity: Set(produced_quantity),
        invoice_date: Set(invoice_date),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let invoice = invoice.insert(db).await?;

    let mut items = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let created = match create_item(db, &invoice, input).await {
            Ok(item) => item,
            Err(e) => {
                // Compensate by removing the run's records. Consumption
                // already applied for earlier items stays in place and is
                // visible in the stock movement history.
                warn!(
                    invoice_id = invoice.id,
                    error = %e,
                    "manufacturing item creation failed, rolling back invoice"
                );
                if let Err(rollback_err) = rollback_manufacturing_invoice(db, invoice.id).await {
                    warn!(
                        invoice_id = invoice.id,
                        error = %rollback_err,
                        "rollback of manufacturing invoice failed"
                    );
                }
                return Err(e);
            }
        };
        items.push(created);
    }

    // All inputs consumed; credit the output. A failure here is reported as
    // a warning, not rolled back.
    let warning = match inventory::apply_manufacturing_output(
        db,
        output_material_id,
        produced_quantity,
        invoice.id,
    )
    .await
    {
        Ok(_) => None,
        Err(e) => {
            warn!(
                invoice_id = invoice.id,
                error = %e,
                "manufacturing inputs consumed but output application failed"
            );
            Some(format!(
                "Inputs were consumed but the output could not be applied: {e}"
            ))
        }
    };

    Ok(ManufacturingOutcome {
        invoice,
        items,
        warning,
    })
}

async fn create_item(
    db: &DatabaseConnection,
    invoice: &manufacturing_invoice::Model,
    input: &ManufacturingInput,
) -> Result<manufacturing_item::Model> {
    let item = manufacturing_item::ActiveModel {
        manufacturing_invoice_id: Set(invoice.id),
        material_id: Set(input.material_id),
        quantity: Set(input.quantity),
        weight: Set(input.quantity * invoice.blend_count),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let item = item.insert(db).await?;

    inventory::apply_consumption(db, input.material_id, input.quantity, item.id).await?;
    Ok(item)
}

/// Retrieves a run by its unique ID.
pub async fn get_manufacturing_invoice_by_id(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<Option<manufacturing_invoice::Model>> {
    ManufacturingInvoice::find_by_id(invoice_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a warehouse's runs, newest business date first.
pub async fn list_manufacturing_invoices(
    db: &DatabaseConnection,
    warehouse_id: i64,
) -> Result<Vec<manufacturing_invoice::Model>> {
    ManufacturingInvoice::find()
        .filter(manufacturing_invoice::Column::WarehouseId.eq(warehouse_id))
        .order_by_desc(manufacturing_invoice::Column::InvoiceDate)
        .order_by_desc(manufacturing_invoice::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the input items of a run in insertion order.
pub async fn get_items_for_manufacturing_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<Vec<manufacturing_item::Model>> {
    ManufacturingItem::find()
        .filter(manufacturing_item::Column::ManufacturingInvoiceId.eq(invoice_id))
        .order_by_asc(manufacturing_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a completed run, reversing both sides of the ledger: the output
/// credit first (guarded, so the produced stock must still be on hand), then
/// each input's consumption.
pub async fn delete_manufacturing_invoice(db: &DatabaseConnection, invoice_id: i64) -> Result<()> {
    let invoice = ManufacturingInvoice::find_by_id(invoice_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Manufacturing invoice",
            id: invoice_id.to_string(),
        })?;

    inventory::reverse_manufacturing_output(
        db,
        invoice.output_material_id,
        invoice.produced_quantity,
        invoice.id,
    )
    .await?;

    let items = get_items_for_manufacturing_invoice(db, invoice_id).await?;
    for item in items {
        inventory::reverse_consumption(db, item.material_id, item.quantity, item.id).await?;
        item.delete(db).await?;
    }

    invoice.delete(db).await?;
    Ok(())
}

/// Compensating deletion used when item creation fails partway: removes the
/// run's item rows and the invoice record without reversing any consumption
/// that was already applied.
pub async fn rollback_manufacturing_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<()> {
    let invoice = ManufacturingInvoice::find_by_id(invoice_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Manufacturing invoice",
            id: invoice_id.to_string(),
        })?;

    ManufacturingItem::delete_many()
        .filter(manufacturing_item::Column::ManufacturingInvoiceId.eq(invoice_id))
        .exec(db)
        .await?;

    invoice.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::inventory::{balance_invariant_holds, get_material_by_id};
    use crate::test_utils::*;

    fn inputs(pairs: &[(i64, f64)]) -> Vec<ManufacturingInput> {
        pairs
            .iter()
            .map(|&(material_id, quantity)| ManufacturingInput {
                material_id,
                quantity,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_blending_worked_example() -> Result<()> {
        // A: qty 5, blend 2 → weight 10; B: qty 3, blend 2 → weight 6;
        // output quantity 16.
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let a = register_test_material(&db, warehouse.id, "A", 20.0).await?;
        let b = register_test_material(&db, warehouse.id, "B", 20.0).await?;
        let blend = register_test_material(&db, warehouse.id, "Blend", 0.0).await?;

        let outcome = create_manufacturing_invoice(
            &db,
            warehouse.id,
            blend.id,
            2.0,
            test_date(),
            "user1".to_string(),
            inputs(&[(a.id, 5.0), (b.id, 3.0)]),
        )
        .await?;

        assert!(outcome.warning.is_none());
        assert_eq!(outcome.invoice.produced_quantity, 16.0);
        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.items[0].weight, 10.0);
        assert_eq!(outcome.items[1].weight, 6.0);

        let a_stock = get_material_by_id(&db, a.id).await?.unwrap();
        let b_stock = get_material_by_id(&db, b.id).await?.unwrap();
        let blend_stock = get_material_by_id(&db, blend.id).await?.unwrap();

        assert_eq!(a_stock.consumption, 5.0);
        assert_eq!(a_stock.current_balance, 15.0);
        assert_eq!(b_stock.consumption, 3.0);
        assert_eq!(b_stock.current_balance, 17.0);
        assert_eq!(blend_stock.manufacturing, 16.0);
        assert_eq!(blend_stock.current_balance, 16.0);
        assert!(balance_invariant_holds(&a_stock));
        assert!(balance_invariant_holds(&b_stock));
        assert!(balance_invariant_holds(&blend_stock));

        Ok(())
    }

    #[tokio::test]
    async fn test_shortages_fail_before_any_mutation() -> Result<()> {
        // A has 4 but 5 is required: the run must fail up front with the
        // structured shortage list and create nothing.
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let a = register_test_material(&db, warehouse.id, "A", 4.0).await?;
        let b = register_test_material(&db, warehouse.id, "B", 20.0).await?;
        let blend = register_test_material(&db, warehouse.id, "Blend", 0.0).await?;

        let result = create_manufacturing_invoice(
            &db,
            warehouse.id,
            blend.id,
            2.0,
            test_date(),
            "user1".to_string(),
            inputs(&[(a.id, 5.0), (b.id, 3.0)]),
        )
        .await;

        match result.unwrap_err() {
            Error::InsufficientStock { shortages } => {
                assert_eq!(shortages.len(), 1);
                assert_eq!(shortages[0].material_name, "A");
                assert_eq!(shortages[0].available, 4.0);
                assert_eq!(shortages[0].required, 5.0);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        assert!(list_manufacturing_invoices(&db, warehouse.id).await?.is_empty());
        let a_stock = get_material_by_id(&db, a.id).await?.unwrap();
        let b_stock = get_material_by_id(&db, b.id).await?.unwrap();
        assert_eq!(a_stock.consumption, 0.0);
        assert_eq!(a_stock.current_balance, 4.0);
        assert_eq!(b_stock.consumption, 0.0);
        assert_eq!(b_stock.current_balance, 20.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_all_shortages_reported_together() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let a = register_test_material(&db, warehouse.id, "A", 1.0).await?;
        let b = register_test_material(&db, warehouse.id, "B", 2.0).await?;
        let blend = register_test_material(&db, warehouse.id, "Blend", 0.0).await?;

        let result = create_manufacturing_invoice(
            &db,
            warehouse.id,
            blend.id,
            1.0,
            test_date(),
            "user1".to_string(),
            inputs(&[(a.id, 5.0), (b.id, 3.0)]),
        )
        .await;

        match result.unwrap_err() {
            Error::InsufficientStock { shortages } => {
                assert_eq!(shortages.len(), 2);
                assert_eq!(shortages[0].material_name, "A");
                assert_eq!(shortages[1].material_name, "B");
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_inputs() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let a = register_test_material(&db, warehouse.id, "A", 10.0).await?;
        let blend = register_test_material(&db, warehouse.id, "Blend", 0.0).await?;

        // No inputs
        let result = create_manufacturing_invoice(
            &db,
            warehouse.id,
            blend.id,
            2.0,
            test_date(),
            "user1".to_string(),
            vec![],
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Zero blend count
        let result = create_manufacturing_invoice(
            &db,
            warehouse.id,
            blend.id,
            0.0,
            test_date(),
            "user1".to_string(),
            inputs(&[(a.id, 5.0)]),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Negative input quantity
        let result = create_manufacturing_invoice(
            &db,
            warehouse.id,
            blend.id,
            2.0,
            test_date(),
            "user1".to_string(),
            inputs(&[(a.id, -5.0)]),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidQuantity { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_reverses_both_sides() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let a = register_test_material(&db, warehouse.id, "A", 20.0).await?;
        let blend = register_test_material(&db, warehouse.id, "Blend", 0.0).await?;

        let outcome = create_manufacturing_invoice(
            &db,
            warehouse.id,
            blend.id,
            2.0,
            test_date(),
            "user1".to_string(),
            inputs(&[(a.id, 5.0)]),
        )
        .await?;

        delete_manufacturing_invoice(&db, outcome.invoice.id).await?;

        assert!(
            get_manufacturing_invoice_by_id(&db, outcome.invoice.id)
                .await?
                .is_none()
        );
        let a_stock = get_material_by_id(&db, a.id).await?.unwrap();
        let blend_stock = get_material_by_id(&db, blend.id).await?.unwrap();
        assert_eq!(a_stock.consumption, 0.0);
        assert_eq!(a_stock.current_balance, 20.0);
        assert_eq!(blend_stock.manufacturing, 0.0);
        assert_eq!(blend_stock.current_balance, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_fails_when_output_already_consumed() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let a = register_test_material(&db, warehouse.id, "A", 20.0).await?;
        let blend = register_test_material(&db, warehouse.id, "Blend", 0.0).await?;

        let outcome = create_manufacturing_invoice(
            &db,
            warehouse.id,
            blend.id,
            2.0,
            test_date(),
            "user1".to_string(),
            inputs(&[(a.id, 5.0)]),
        )
        .await?;

        // Consume most of the produced stock, leaving too little to reverse.
        crate::core::inventory::apply_consumption(&db, blend.id, 8.0, 99).await?;

        let result = delete_manufacturing_invoice(&db, outcome.invoice.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientStock { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_rollback_keeps_applied_consumption() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let a = register_test_material(&db, warehouse.id, "A", 20.0).await?;
        let blend = register_test_material(&db, warehouse.id, "Blend", 0.0).await?;

        let outcome = create_manufacturing_invoice(
            &db,
            warehouse.id,
            blend.id,
            2.0,
            test_date(),
            "user1".to_string(),
            inputs(&[(a.id, 5.0)]),
        )
        .await?;

        rollback_manufacturing_invoice(&db, outcome.invoice.id).await?;

        // Records are gone; consumption that was already applied stays.
        assert!(
            get_manufacturing_invoice_by_id(&db, outcome.invoice.id)
                .await?
                .is_none()
        );
        assert!(
            get_items_for_manufacturing_invoice(&db, outcome.invoice.id)
                .await?
                .is_empty()
        );
        let a_stock = get_material_by_id(&db, a.id).await?.unwrap();
        assert_eq!(a_stock.consumption, 5.0);
        let blend_stock = get_material_by_id(&db, blend.id).await?.unwrap();
        assert_eq!(blend_stock.manufacturing, 10.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_output_in_other_warehouse_rejected() -> Result<()> {
        let (db, farm, warehouse) = setup_with_warehouse().await?;
        let other =
            crate::core::warehouse::create_warehouse(&db, farm.id, "Other".to_string()).await?;
        let a = register_test_material(&db, warehouse.id, "A", 20.0).await?;
        let foreign_blend = register_test_material(&db, other.id, "Blend", 0.0).await?;

        let result = create_manufacturing_invoice(
            &db,
            warehouse.id,
            foreign_blend.id,
            2.0,
            test_date(),
            "user1".to_string(),
            inputs(&[(a.id, 5.0)]),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }
}
