//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and order operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch between values.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// No selected items to build an order from.
    #[error("No selected items in cart")]
    EmptySelection,

    /// Shipping address is missing required fields.
    #[error("Incomplete address: missing {0}")]
    IncompleteAddress(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
