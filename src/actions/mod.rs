//! Actions layer - the server-action interface over the core modules.
//!
//! Each action checks the caller's role through [`AuthContext::require`],
//! delegates to `core`, and wraps the outcome in an [`ActionResult`] so the
//! calling request layer never has to handle a Rust error: failures come
//! back as `{success: false, error: "..."}` with stock shortages attached
//! as structured data for display.

/// Farm and warehouse registry actions
pub mod farm;
/// Inventory record and ledger history actions
pub mod inventory;
/// Invoice and invoice item actions
pub mod invoice;
/// Manufacturing run actions
pub mod manufacturing;
/// Daily report and aggregate reporting actions
pub mod report;

use crate::errors::{Error, Result, StockShortage};
use serde::Serialize;

/// Uniform result envelope returned by every action.
#[derive(Debug, Serialize)]
pub struct ActionResult<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Error message for display, present when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Payload of a successful operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Structured shortage list for insufficient-stock failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortages: Option<Vec<StockShortage>>,
    /// Non-fatal problem on an otherwise successful operation
    /// (e.g. manufacturing output could not be applied)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl<T> ActionResult<T> {
    /// Successful result carrying a payload.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
            shortages: None,
            warning: None,
        }
    }

    /// Successful result with an attached warning.
    #[must_use]
    pub fn ok_with_warning(data: T, warning: Option<String>) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
            shortages: None,
            warning,
        }
    }

    /// Failed result. Insufficient-stock errors keep their structured
    /// shortage list alongside the display message.
    #[must_use]
    pub fn fail(error: &Error) -> Self {
        let shortages = match error {
            Error::InsufficientStock { shortages } => Some(shortages.clone()),
            _ => None,
        };
        Self {
            success: false,
            error: Some(error.to_string()),
            data: None,
            shortages,
            warning: None,
        }
    }
}

impl<T> From<Result<T>> for ActionResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => ActionResult::ok(data),
            Err(e) => ActionResult::fail(&e),
        }
    }
}
