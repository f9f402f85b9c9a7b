//! Inventory ledger - registration and the counter update rules.
//!
//! Every mutation of an inventory record goes through [`adjust_stock`], which
//! issues a single UPDATE statement adjusting both the counter and
//! `current_balance`. For balance-decreasing mutations the stock guard
//! (`current_balance >= quantity`) is part of the statement's WHERE clause,
//! so there is no read-modify-write window: zero rows affected means the
//! stock was insufficient and nothing changed. Each successful adjustment
//! also appends a row to `stock_movements`, keeping the ledger auditable.

use crate::{
    core::invoice::InvoiceType,
    entities::{
        InvoiceItem, ManufacturingItem, Material, StockMovement, Warehouse, invoice_item, material,
        stock_movement,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Kind of an inventory record: feed materials and medicines share the
/// `materials` table, discriminated by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Material,
    Medicine,
}

impl MaterialKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MaterialKind::Material => "material",
            MaterialKind::Medicine => "medicine",
        }
    }

    /// Parses the stored discriminator.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "material" => Ok(MaterialKind::Material),
            "medicine" => Ok(MaterialKind::Medicine),
            other => Err(Error::validation(format!("Unknown material kind: {other}"))),
        }
    }
}

/// The four transaction counters of an inventory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StockCounter {
    Purchases,
    Sales,
    Consumption,
    Manufacturing,
}

impl StockCounter {
    const fn column(self) -> material::Column {
        match self {
            StockCounter::Purchases => material::Column::Purchases,
            StockCounter::Sales => material::Column::Sales,
            StockCounter::Consumption => material::Column::Consumption,
            StockCounter::Manufacturing => material::Column::Manufacturing,
        }
    }

    /// Direction in which this counter moves `current_balance`:
    /// purchases and manufacturing add stock, sales and consumption remove it.
    const fn balance_sign(self) -> f64 {
        match self {
            StockCounter::Purchases | StockCounter::Manufacturing => 1.0,
            StockCounter::Sales | StockCounter::Consumption => -1.0,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            StockCounter::Purchases => "purchases",
            StockCounter::Sales => "sales",
            StockCounter::Consumption => "consumption",
            StockCounter::Manufacturing => "manufacturing",
        }
    }
}

/// The document that caused a ledger mutation, recorded on the movement row.
#[derive(Debug, Clone, Copy)]
enum MovementSource {
    InvoiceItem(i64),
    ManufacturingItem(i64),
    ManufacturingOutput(i64),
}

impl MovementSource {
    const fn kind(self) -> &'static str {
        match self {
            MovementSource::InvoiceItem(_) => "invoice_item",
            MovementSource::ManufacturingItem(_) => "manufacturing_item",
            MovementSource::ManufacturingOutput(_) => "manufacturing_output",
        }
    }

    const fn source_id(self) -> i64 {
        match self {
            MovementSource::InvoiceItem(id)
            | MovementSource::ManufacturingItem(id)
            | MovementSource::ManufacturingOutput(id) => id,
        }
    }
}

/// Checks the ledger invariant on a record:
/// `current_balance == opening_balance + purchases + manufacturing - sales - consumption`.
#[must_use]
pub fn balance_invariant_holds(record: &material::Model) -> bool {
    let expected = record.opening_balance + record.purchases + record.manufacturing
        - record.sales
        - record.consumption;
    (record.current_balance - expected).abs() < 1e-9
}

/// Registers a material or medicine in a warehouse with an opening balance,
/// creating its inventory record. At most one record may exist per
/// (warehouse, name, kind).
pub async fn register_material(
    db: &DatabaseConnection,
    warehouse_id: i64,
    name: String,
    kind: MaterialKind,
    unit: String,
    opening_balance: f64,
) -> Result<material::Model> {
    // Validate inputs
    if name.trim().is_empty() {
        return Err(Error::validation("Material name cannot be empty"));
    }

    if unit.trim().is_empty() {
        return Err(Error::validation("Unit cannot be empty"));
    }

    if opening_balance < 0.0 || !opening_balance.is_finite() {
        return Err(Error::InvalidQuantity {
            quantity: opening_balance,
        });
    }

    let warehouse = Warehouse::find_by_id(warehouse_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Warehouse",
            id: warehouse_id.to_string(),
        })?;

    if warehouse.is_deleted {
        return Err(Error::NotFound {
            resource: "Warehouse",
            id: warehouse_id.to_string(),
        });
    }

    let existing = get_material_by_name(db, warehouse_id, name.trim(), kind).await?;
    if existing.is_some() {
        return Err(Error::validation(format!(
            "{} '{}' is already registered in this warehouse",
            kind.as_str(),
            name.trim()
        )));
    }

    let now = chrono::Utc::now();
    let record = material::ActiveModel {
        warehouse_id: Set(warehouse_id),
        name: Set(name.trim().to_string()),
        kind: Set(kind.as_str().to_string()),
        unit: Set(unit.trim().to_string()),
        opening_balance: Set(opening_balance),
        purchases: Set(0.0),
        sales: Set(0.0),
        consumption: Set(0.0),
        manufacturing: Set(0.0),
        current_balance: Set(opening_balance),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    record.insert(db).await.map_err(Into::into)
}

/// Finds an inventory record by its unique ID.
pub async fn get_material_by_id(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Option<material::Model>> {
    Material::find_by_id(material_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a record by warehouse, name, and kind.
pub async fn get_material_by_name(
    db: &DatabaseConnection,
    warehouse_id: i64,
    name: &str,
    kind: MaterialKind,
) -> Result<Option<material::Model>> {
    Material::find()
        .filter(material::Column::WarehouseId.eq(warehouse_id))
        .filter(material::Column::Name.eq(name))
        .filter(material::Column::Kind.eq(kind.as_str()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all inventory records of a warehouse, ordered alphabetically by name.
pub async fn list_materials(
    db: &DatabaseConnection,
    warehouse_id: i64,
) -> Result<Vec<material::Model>> {
    Material::find()
        .filter(material::Column::WarehouseId.eq(warehouse_id))
        .order_by_asc(material::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an inventory record and its movement history. Irreversible.
///
/// Records still referenced by invoice or manufacturing items cannot be
/// deleted; those documents must be removed first.
pub async fn delete_material(db: &DatabaseConnection, material_id: i64) -> Result<()> {
    let record = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Material",
            id: material_id.to_string(),
        })?;

    let referencing_invoice_items = InvoiceItem::find()
        .filter(invoice_item::Column::MaterialId.eq(material_id))
        .count(db)
        .await?;

    let referencing_manufacturing_items = ManufacturingItem::find()
        .filter(crate::entities::manufacturing_item::Column::MaterialId.eq(material_id))
        .count(db)
        .await?;

    if referencing_invoice_items > 0 || referencing_manufacturing_items > 0 {
        return Err(Error::validation(format!(
            "Material '{}' is referenced by existing invoice or manufacturing items",
            record.name
        )));
    }

    StockMovement::delete_many()
        .filter(stock_movement::Column::MaterialId.eq(material_id))
        .exec(db)
        .await?;

    record.delete(db).await?;
    Ok(())
}

/// Lists the movement history of a record, newest first.
pub async fn list_stock_movements(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Vec<stock_movement::Model>> {
    StockMovement::find()
        .filter(stock_movement::Column::MaterialId.eq(material_id))
        .order_by_desc(stock_movement::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies an invoice item to the ledger: `sell` increments `sales` and
/// decrements the balance (guarded), `buy` increments `purchases` and the
/// balance.
pub async fn apply_invoice_item<C>(
    db: &C,
    item: &invoice_item::Model,
    invoice_type: InvoiceType,
) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    let counter = match invoice_type {
        InvoiceType::Buy => StockCounter::Purchases,
        InvoiceType::Sell => StockCounter::Sales,
    };
    adjust_stock(
        db,
        item.material_id,
        counter,
        item.quantity,
        MovementSource::InvoiceItem(item.id),
    )
    .await
}

/// Inverse of [`apply_invoice_item`], used when an item or its invoice is
/// deleted. Applying and then reversing the same item restores every counter.
pub async fn reverse_invoice_item<C>(
    db: &C,
    item: &invoice_item::Model,
    invoice_type: InvoiceType,
) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    let counter = match invoice_type {
        InvoiceType::Buy => StockCounter::Purchases,
        InvoiceType::Sell => StockCounter::Sales,
    };
    adjust_stock(
        db,
        item.material_id,
        counter,
        -item.quantity,
        MovementSource::InvoiceItem(item.id),
    )
    .await
}

/// Consumes an input material for a manufacturing item: increments
/// `consumption`, decrements the balance (guarded).
pub async fn apply_consumption<C>(
    db: &C,
    material_id: i64,
    quantity: f64,
    manufacturing_item_id: i64,
) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    adjust_stock(
        db,
        material_id,
        StockCounter::Consumption,
        quantity,
        MovementSource::ManufacturingItem(manufacturing_item_id),
    )
    .await
}

/// Reverses a manufacturing item's consumption when a completed run is deleted.
pub async fn reverse_consumption<C>(
    db: &C,
    material_id: i64,
    quantity: f64,
    manufacturing_item_id: i64,
) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    adjust_stock(
        db,
        material_id,
        StockCounter::Consumption,
        -quantity,
        MovementSource::ManufacturingItem(manufacturing_item_id),
    )
    .await
}

/// Credits the produced quantity to the output material after all inputs of
/// a run succeeded: increments `manufacturing` and the balance.
pub async fn apply_manufacturing_output<C>(
    db: &C,
    material_id: i64,
    quantity: f64,
    manufacturing_invoice_id: i64,
) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    adjust_stock(
        db,
        material_id,
        StockCounter::Manufacturing,
        quantity,
        MovementSource::ManufacturingOutput(manufacturing_invoice_id),
    )
    .await
}

/// Reverses a run's output when a completed run is deleted (guarded: the
/// produced stock must still be on hand).
pub async fn reverse_manufacturing_output<C>(
    db: &C,
    material_id: i64,
    quantity: f64,
    manufacturing_invoice_id: i64,
) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    adjust_stock(
        db,
        material_id,
        StockCounter::Manufacturing,
        -quantity,
        MovementSource::ManufacturingOutput(manufacturing_invoice_id),
    )
    .await
}

/// Adjusts one counter and `current_balance` in a single atomic UPDATE and
/// appends the movement row.
///
/// `counter_delta` is signed: positive applies a transaction, negative
/// reverses one. The balance moves by `counter_delta * balance_sign`. When
/// that balance move is negative, the statement only matches rows with
/// enough stock; an unmatched update is reported as `InsufficientStock`
/// without any mutation having happened.
async fn adjust_stock<C>(
    db: &C,
    material_id: i64,
    counter: StockCounter,
    counter_delta: f64,
    source: MovementSource,
) -> Result<material::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let quantity = counter_delta.abs();
    if quantity == 0.0 || !quantity.is_finite() {
        return Err(Error::InvalidQuantity {
            quantity: counter_delta,
        });
    }

    // Fetched only for error shaping; the WHERE-clause guard below stays
    // authoritative under concurrent writers.
    let record = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Material",
            id: material_id.to_string(),
        })?;

    let balance_delta = counter_delta * counter.balance_sign();

    let mut update = Material::update_many()
        .col_expr(
            counter.column(),
            Expr::col(counter.column()).add(counter_delta),
        )
        .col_expr(
            material::Column::CurrentBalance,
            Expr::col(material::Column::CurrentBalance).add(balance_delta),
        )
        .col_expr(
            material::Column::UpdatedAt,
            Expr::value(chrono::Utc::now()),
        )
        .filter(material::Column::Id.eq(material_id));

    if balance_delta < 0.0 {
        update = update.filter(material::Column::CurrentBalance.gte(-balance_delta));
    }

    let result = update.exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::shortage(
            record.name,
            record.current_balance,
            -balance_delta,
        ));
    }

    let movement = stock_movement::ActiveModel {
        material_id: Set(material_id),
        counter: Set(counter.as_str().to_string()),
        quantity: Set(counter_delta),
        balance_delta: Set(balance_delta),
        source_kind: Set(source.kind().to_string()),
        source_id: Set(Some(source.source_id())),
        recorded_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    movement.insert(db).await?;

    Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Material",
            id: material_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn item(id: i64, material_id: i64, quantity: f64) -> invoice_item::Model {
        invoice_item::Model {
            id,
            invoice_id: 1,
            material_id,
            quantity,
            unit_price: 1.0,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_material_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Empty name
        let result = register_material(
            &db,
            1,
            String::new(),
            MaterialKind::Material,
            "kg".to_string(),
            0.0,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Empty unit
        let result = register_material(
            &db,
            1,
            "Corn".to_string(),
            MaterialKind::Material,
            "  ".to_string(),
            0.0,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Negative opening balance
        let result = register_material(
            &db,
            1,
            "Corn".to_string(),
            MaterialKind::Material,
            "kg".to_string(),
            -1.0,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: -1.0 }
        ));

        // Non-finite opening balance
        let result = register_material(
            &db,
            1,
            "Corn".to_string(),
            MaterialKind::Material,
            "kg".to_string(),
            f64::NAN,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidQuantity { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_material_integration() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;

        let record = register_material(
            &db,
            warehouse.id,
            "  Corn  ".to_string(),
            MaterialKind::Material,
            "kg".to_string(),
            100.0,
        )
        .await?;

        assert_eq!(record.name, "Corn");
        assert_eq!(record.kind, "material");
        assert_eq!(record.opening_balance, 100.0);
        assert_eq!(record.current_balance, 100.0);
        assert_eq!(record.purchases, 0.0);
        assert_eq!(record.sales, 0.0);
        assert_eq!(record.consumption, 0.0);
        assert_eq!(record.manufacturing, 0.0);
        assert!(balance_invariant_holds(&record));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_material_rejects_duplicates() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;

        register_test_material(&db, warehouse.id, "Corn", 10.0).await?;
        let result = register_material(
            &db,
            warehouse.id,
            "Corn".to_string(),
            MaterialKind::Material,
            "kg".to_string(),
            5.0,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Same name as a medicine is a different record
        let medicine = register_material(
            &db,
            warehouse.id,
            "Corn".to_string(),
            MaterialKind::Medicine,
            "bottle".to_string(),
            5.0,
        )
        .await?;
        assert_eq!(medicine.kind, "medicine");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_material_unknown_warehouse() -> Result<()> {
        let db = setup_test_db().await?;

        let result = register_material(
            &db,
            999,
            "Corn".to_string(),
            MaterialKind::Material,
            "kg".to_string(),
            0.0,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                resource: "Warehouse",
                ..
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_sell_buy_reverse_sequence() -> Result<()> {
        // opening 100 → sell 30 → buy 10 → reverse the sell
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let record = register_test_material(&db, warehouse.id, "Feed", 100.0).await?;

        let sell = item(1, record.id, 30.0);
        let after_sell = apply_invoice_item(&db, &sell, InvoiceType::Sell).await?;
        assert_eq!(after_sell.sales, 30.0);
        assert_eq!(after_sell.current_balance, 70.0);
        assert!(balance_invariant_holds(&after_sell));

        let buy = item(2, record.id, 10.0);
        let after_buy = apply_invoice_item(&db, &buy, InvoiceType::Buy).await?;
        assert_eq!(after_buy.purchases, 10.0);
        assert_eq!(after_buy.current_balance, 80.0);
        assert!(balance_invariant_holds(&after_buy));

        let after_reverse = reverse_invoice_item(&db, &sell, InvoiceType::Sell).await?;
        assert_eq!(after_reverse.sales, 0.0);
        assert_eq!(after_reverse.current_balance, 110.0);
        assert!(balance_invariant_holds(&after_reverse));

        Ok(())
    }

    #[tokio::test]
    async fn test_oversell_fails_without_mutation() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let record = register_test_material(&db, warehouse.id, "Feed", 20.0).await?;

        let sell = item(1, record.id, 30.0);
        let result = apply_invoice_item(&db, &sell, InvoiceType::Sell).await;
        match result.unwrap_err() {
            Error::InsufficientStock { shortages } => {
                assert_eq!(shortages.len(), 1);
                assert_eq!(shortages[0].material_name, "Feed");
                assert_eq!(shortages[0].available, 20.0);
                assert_eq!(shortages[0].required, 30.0);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // No counter moved, no movement recorded
        let unchanged = get_material_by_id(&db, record.id).await?.unwrap();
        assert_eq!(unchanged.sales, 0.0);
        assert_eq!(unchanged.current_balance, 20.0);
        assert!(list_stock_movements(&db, record.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_apply_reverse_round_trip() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let record = register_test_material(&db, warehouse.id, "Feed", 50.0).await?;

        for invoice_type in [InvoiceType::Buy, InvoiceType::Sell] {
            let line = item(7, record.id, 12.5);
            apply_invoice_item(&db, &line, invoice_type).await?;
            let restored = reverse_invoice_item(&db, &line, invoice_type).await?;

            assert_eq!(restored.opening_balance, record.opening_balance);
            assert_eq!(restored.purchases, record.purchases);
            assert_eq!(restored.sales, record.sales);
            assert_eq!(restored.consumption, record.consumption);
            assert_eq!(restored.manufacturing, record.manufacturing);
            assert_eq!(restored.current_balance, record.current_balance);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_buy_reversal_is_guarded() -> Result<()> {
        // Reversing a purchase whose stock was already sold off must fail
        // rather than drive the balance negative.
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let record = register_test_material(&db, warehouse.id, "Feed", 0.0).await?;

        let buy = item(1, record.id, 10.0);
        apply_invoice_item(&db, &buy, InvoiceType::Buy).await?;
        let sell = item(2, record.id, 8.0);
        apply_invoice_item(&db, &sell, InvoiceType::Sell).await?;

        let result = reverse_invoice_item(&db, &buy, InvoiceType::Buy).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientStock { .. }
        ));

        let unchanged = get_material_by_id(&db, record.id).await?.unwrap();
        assert_eq!(unchanged.purchases, 10.0);
        assert_eq!(unchanged.current_balance, 2.0);
        assert!(balance_invariant_holds(&unchanged));

        Ok(())
    }

    #[tokio::test]
    async fn test_consumption_and_output_counters() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let input = register_test_material(&db, warehouse.id, "Corn", 40.0).await?;
        let output = register_test_material(&db, warehouse.id, "Blend", 0.0).await?;

        let after_consume = apply_consumption(&db, input.id, 15.0, 1).await?;
        assert_eq!(after_consume.consumption, 15.0);
        assert_eq!(after_consume.current_balance, 25.0);
        assert!(balance_invariant_holds(&after_consume));

        let after_output = apply_manufacturing_output(&db, output.id, 30.0, 1).await?;
        assert_eq!(after_output.manufacturing, 30.0);
        assert_eq!(after_output.current_balance, 30.0);
        assert!(balance_invariant_holds(&after_output));

        let restored_input = reverse_consumption(&db, input.id, 15.0, 1).await?;
        assert_eq!(restored_input.consumption, 0.0);
        assert_eq!(restored_input.current_balance, 40.0);

        let restored_output = reverse_manufacturing_output(&db, output.id, 30.0, 1).await?;
        assert_eq!(restored_output.manufacturing, 0.0);
        assert_eq!(restored_output.current_balance, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_stock_movements_are_recorded() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let record = register_test_material(&db, warehouse.id, "Feed", 100.0).await?;

        let sell = item(3, record.id, 30.0);
        apply_invoice_item(&db, &sell, InvoiceType::Sell).await?;
        reverse_invoice_item(&db, &sell, InvoiceType::Sell).await?;

        let movements = list_stock_movements(&db, record.id).await?;
        assert_eq!(movements.len(), 2);

        // Newest first: the reversal
        assert_eq!(movements[0].counter, "sales");
        assert_eq!(movements[0].quantity, -30.0);
        assert_eq!(movements[0].balance_delta, 30.0);
        assert_eq!(movements[0].source_kind, "invoice_item");
        assert_eq!(movements[0].source_id, Some(3));

        assert_eq!(movements[1].quantity, 30.0);
        assert_eq!(movements[1].balance_delta, -30.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_material_removes_history() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let record = register_test_material(&db, warehouse.id, "Feed", 10.0).await?;
        apply_manufacturing_output(&db, record.id, 5.0, 1).await?;

        // The output movement references a manufacturing run, not an item row,
        // so nothing blocks deletion here.
        delete_material(&db, record.id).await?;

        assert!(get_material_by_id(&db, record.id).await?.is_none());
        assert!(list_stock_movements(&db, record.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_unknown_material() -> Result<()> {
        let db = setup_test_db().await?;

        let line = item(1, 999, 5.0);
        let result = apply_invoice_item(&db, &line, InvoiceType::Buy).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                resource: "Material",
                ..
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() -> Result<()> {
        let (db, _farm, warehouse) = setup_with_warehouse().await?;
        let record = register_test_material(&db, warehouse.id, "Feed", 10.0).await?;

        let line = item(1, record.id, 0.0);
        let result = apply_invoice_item(&db, &line, InvoiceType::Buy).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidQuantity { .. }));

        Ok(())
    }
}
