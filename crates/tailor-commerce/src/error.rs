//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront and back-office operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Variant not found.
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Booking not found.
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    /// Requested pieces exceed the variant stock.
    #[error("Not enough stock for variant {variant_id}: requested {requested}, available {available}")]
    InsufficientStock {
        variant_id: String,
        requested: i64,
        available: i64,
    },

    /// Invalid piece count.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Invalid booking status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Unknown booking status string.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Unknown measurement key for a garment.
    #[error("Unknown measurement '{key}' for {garment}")]
    UnknownMeasurement { garment: String, key: String },

    /// Bill number collision.
    #[error("Bill number already in use: {0}")]
    DuplicateBillNumber(String),

    /// Bill row does not exist.
    #[error("Bill row not found: {0}")]
    BillRowNotFound(u8),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
