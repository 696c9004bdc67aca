//! Checkout error types.

use thiserror::Error;

/// Errors that can occur while building or pricing a cart.
///
/// Every pricing-stage failure is terminal for that checkout call; no
/// partial results are returned. A failed payment simulation is not an
/// error; it surfaces as a `PaymentStatus::Failed` value.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Cart has no items.
    #[error("Cart must contain at least one item")]
    EmptyCart,

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid item quantity (must be at least 1).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CheckoutError {
    fn from(e: serde_json::Error) -> Self {
        CheckoutError::SerializationError(e.to_string())
    }
}
