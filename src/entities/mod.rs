//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod daily_report;
pub mod farm;
pub mod invoice;
pub mod invoice_item;
pub mod manufacturing_invoice;
pub mod manufacturing_item;
pub mod material;
pub mod stock_movement;
pub mod warehouse;

// Re-export specific types to avoid conflicts
pub use daily_report::{
    Column as DailyReportColumn, Entity as DailyReport, Model as DailyReportModel,
};
pub use farm::{Column as FarmColumn, Entity as Farm, Model as FarmModel};
pub use invoice::{Column as InvoiceColumn, Entity as Invoice, Model as InvoiceModel};
pub use invoice_item::{
    Column as InvoiceItemColumn, Entity as InvoiceItem, Model as InvoiceItemModel,
};
pub use manufacturing_invoice::{
    Column as ManufacturingInvoiceColumn, Entity as ManufacturingInvoice,
    Model as ManufacturingInvoiceModel,
};
pub use manufacturing_item::{
    Column as ManufacturingItemColumn, Entity as ManufacturingItem,
    Model as ManufacturingItemModel,
};
pub use material::{Column as MaterialColumn, Entity as Material, Model as MaterialModel};
pub use stock_movement::{
    Column as StockMovementColumn, Entity as StockMovement, Model as StockMovementModel,
};
pub use warehouse::{Column as WarehouseColumn, Entity as Warehouse, Model as WarehouseModel};
