//! Invoice business logic - buy/sell documents and their items.
//!
//! Item mutations pair the row change with the ledger adjustment inside one
//! database transaction, so a failed stock guard leaves neither an orphaned
//! item nor a moved counter. Deleting an invoice sweeps its items, reversing
//! each one before removal.

use crate::{
    core::inventory,
    entities::{Invoice, InvoiceItem, Material, Warehouse, invoice, invoice_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};

/// Direction of an invoice: `buy` adds stock, `sell` removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    Buy,
    Sell,
}

impl InvoiceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            InvoiceType::Buy => "buy",
            InvoiceType::Sell => "sell",
        }
    }

    /// Parses the stored discriminator.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "buy" => Ok(InvoiceType::Buy),
            "sell" => Ok(InvoiceType::Sell),
            other => Err(Error::validation(format!("Unknown invoice type: {other}"))),
        }
    }
}

/// Creates an invoice header against a warehouse. Quantities live on items,
/// added separately via [`add_invoice_item`].
pub async fn create_invoice(
    db: &DatabaseConnection,
    farm_id: i64,
    warehouse_id: i64,
    invoice_type: InvoiceType,
    party: String,
    invoice_date: Date,
    created_by: String,
) -> Result<invoice::Model> {
    if party.trim().is_empty() {
        return Err(Error::validation("Invoice party cannot be empty"));
    }

    let warehouse = Warehouse::find_by_id(warehouse_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Warehouse",
            id: warehouse_id.to_string(),
        })?;

    if warehouse.is_deleted || warehouse.farm_id != farm_id {
        return Err(Error::NotFound {
            resource: "Warehouse",
            id: warehouse_id.to_string(),
        });
    }

    let invoice = invoice::ActiveModel {
        farm_id: Set(farm_id),
        warehouse_id: Set(warehouse_id),
        invoice_type: Set(invoice_type.as_str().to_string()),
        party: Set(party.trim().to_string()),
        invoice_date: Set(invoice_date),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    invoice.insert(db).await.map_err(Into::into)
}

/// Retrieves an invoice by its unique ID.
pub async fn get_invoice_by_id(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<Option<invoice::Model>> {
    Invoice::find_by_id(invoice_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a warehouse's invoices, newest business date first.
pub async fn list_invoices_for_warehouse(
    db: &DatabaseConnection,
    warehouse_id: i64,
) -> Result<Vec<invoice::Model>> {
    Invoice::find()
        .filter(invoice::Column::WarehouseId.eq(warehouse_id))
        .order_by_desc(invoice::Column::InvoiceDate)
        .order_by_desc(invoice::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the items of an invoice in insertion order.
pub async fn get_items_for_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<Vec<invoice_item::Model>> {
    InvoiceItem::find()
        .filter(invoice_item::Column::InvoiceId.eq(invoice_id))
        .order_by_asc(invoice_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

fn validate_item_inputs(quantity: f64, unit_price: f64) -> Result<()> {
    if quantity <= 0.0 || !quantity.is_finite() {
        return Err(Error::InvalidQuantity { quantity });
    }
    if unit_price < 0.0 || !unit_price.is_finite() {
        return Err(Error::validation(format!("Invalid unit price: {unit_price}")));
    }
    Ok(())
}

/// Adds an item to an invoice and applies it to the ledger.
///
/// The insert and the counter adjustment share one database transaction: a
/// sell that fails its stock guard creates nothing.
pub async fn add_invoice_item(
    db: &DatabaseConnection,
    invoice_id: i64,
    material_id: i64,
    quantity: f64,
    unit_price: f64,
) -> Result<invoice_item::Model> {
    validate_item_inputs(quantity, unit_price)?;

    let txn = db.begin().await?;

    let invoice = Invoice::find_by_id(invoice_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Invoice",
            id: invoice_id.to_string(),
        })?;
    let invoice_type = InvoiceType::parse(&invoice.invoice_type)?;

    let material = Material::find_by_id(material_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Material",
            id: material_id.to_string(),
        })?;

    if material.warehouse_id != invoice.warehouse_id {
        return Err(Error::validation(format!(
            "Material '{}' belongs to a different warehouse than the invoice",
            material.name
        )));
    }

    let item = invoice_item::ActiveModel {
        invoice_id: Set(invoice_id),
        material_id: Set(material_id),
        quantity: Set(quantity),
        unit_price: Set(unit_price),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let item = item.insert(&txn).await?;

    inventory::apply_invoice_item(&txn, &item, invoice_type).await?;

    txn.commit().await?;
    Ok(item)
}

/// Changes an item's quantity and price, rebalancing the ledger.
///
/// The old quantity is reversed and the new one applied in the same database
/// transaction; the stock guard is evaluated against the new quantity.
pub async fn update_invoice_item(
    db: &DatabaseConnection,
    item_id: i64,
    new_quantity: f64,
    new_unit_price: f64,
) -> Result<invoice_item::Model> {
    validate_item_inputs(new_quantity, new_unit_price)?;

    let txn = db.begin().await?;

    let item = InvoiceItem::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Invoice item",
            id: item_id.to_string(),
        })?;

    let invoice = Invoice::find_by_id(item.invoice_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Invoice",
            id: item.invoice_id.to_string(),
        })?;
    let invoice_type = InvoiceType::parse(&invoice.invoice_type)?;

    inventory::reverse_invoice_item(&txn, &item, invoice_type).await?;

    let mut updated: invoice_item::ActiveModel = item.into();
    updated.quantity = Set(new_quantity);
    updated.unit_price = Set(new_unit_price);
    let updated = updated.update(&txn).await?;

    inventory::apply_invoice_item(&txn, &updated, invoice_type).await?;

    txn.commit().await?;
    Ok(updated)
}

/// Deletes an item and reverses its effect on the ledger.
pub async fn delete_invoice_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let item = InvoiceItem::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Invoice item",
            id: item_id.to_string(),
        })?;

    let invoice = Invoice::find_by_id(item.invoice_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Invoice",
            id: item.invoice_id.to_string(),
        })?;
    let invoice_type = InvoiceType::parse(&invoice.invoice_type)?;

    inventory::reverse_invoice_item(&txn, &item, invoice_type).await?;
    item.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Deletes an invoice after reversing and removing every item it carries.
pub async fn delete_invoice(db: &DatabaseConnection, invoice_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let invoice = Invoice::find_by_id(invoice_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Invoice",
            id: invoice_id.to_string(),
        })?;
    let invoice_type = InvoiceType::parse(&invoice.invoice_type)?;

    let items = InvoiceItem::find()
        .filter(invoice_item::Column::InvoiceId.eq(invoice_id))
        .all(&txn)
        .await?;

    for item in items {
        inventory::reverse_invoice_item(&txn, &item, invoice_type).await?;
        item.delete(&txn).await?;
    }

    invoice.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
