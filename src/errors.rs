//! Unified error types for the whole crate.
//!
//! Every fallible operation returns the crate-wide [`Result`] alias. Errors are
//! never thrown across the action boundary: the actions layer converts them
//! into a `{success: false, error: ...}` envelope for callers to display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One line of an insufficient-stock report: which material fell short,
/// how much was on hand, and how much the operation needed.
///
/// Stock checks collect these for *all* failing items before any mutation
/// happens, so callers can display the complete list at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockShortage {
    /// Name of the material or medicine that is short
    pub material_name: String,
    /// Current balance available in the warehouse
    pub available: f64,
    /// Quantity the operation required
    pub required: f64,
}

fn format_shortages(shortages: &[StockShortage]) -> String {
    shortages
        .iter()
        .map(|s| {
            format!(
                "{} (available {}, required {})",
                s.material_name, s.available, s.required
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unauthorized: requires {required} role, caller has {actual}")]
    Unauthorized {
        required: &'static str,
        actual: &'static str,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: f64 },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Insufficient stock: {}", format_shortages(shortages))]
    InsufficientStock { shortages: Vec<StockShortage> },

    #[error("Persistence error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Shorthand for a validation failure with a plain message.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a single-item stock shortage.
    pub fn shortage(material_name: impl Into<String>, available: f64, required: f64) -> Self {
        Error::InsufficientStock {
            shortages: vec![StockShortage {
                material_name: material_name.into(),
                available,
                required,
            }],
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
