//! Core business logic - framework-agnostic operations over the database.
//!
//! Each module owns one area: the inventory ledger, invoices, manufacturing,
//! the farm/warehouse registry, and reporting. Everything is async, returns
//! the crate-wide `Result`, and takes the database connection as its first
//! argument; nothing here knows about callers, roles, or transports.

/// Farm registry and seeding
pub mod farm;
/// Inventory records and the ledger update rules
pub mod inventory;
/// Buy/sell invoices and their items
pub mod invoice;
/// Feed-blending runs
pub mod manufacturing;
/// Daily production reports and aggregates
pub mod report;
/// Warehouse registry
pub mod warehouse;
