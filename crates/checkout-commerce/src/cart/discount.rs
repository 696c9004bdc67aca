//! Discounts actually granted during a checkout.
//!
//! An [`AppliedDiscount`] is an immutable record of one discount applied
//! in a specific pricing pass, as opposed to a `Promotion`, which is a
//! reusable rule.

use crate::catalog::Promotion;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Where a discount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountSource {
    /// Product-level discount.
    Product,
    /// Promotion rule discount.
    Promotion,
    /// Payment-method discount.
    PaymentMethod,
}

impl DiscountSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountSource::Product => "PRODUCT",
            DiscountSource::Promotion => "PROMOTION",
            DiscountSource::PaymentMethod => "PAYMENT_METHOD",
        }
    }
}

/// What a discount applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountTarget {
    /// A specific product in the cart.
    Product(ProductId),
    /// The whole cart.
    Total,
}

impl DiscountTarget {
    /// The target as a display label: the product id, or "TOTAL" for
    /// cart-wide discounts.
    pub fn label(&self) -> &str {
        match self {
            DiscountTarget::Product(id) => id.as_str(),
            DiscountTarget::Total => "TOTAL",
        }
    }
}

/// A discount that has been applied during a pricing pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedDiscount {
    /// Identifier of the granting promotion or payment method.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Where the discount came from.
    pub source: DiscountSource,
    /// Amount discounted. Always non-negative.
    pub amount: Money,
    /// Description for display.
    pub description: String,
    /// What the discount applies to.
    pub target: DiscountTarget,
}

impl AppliedDiscount {
    /// Create from a promotion and a calculated amount.
    pub fn from_promotion(promotion: &Promotion, amount: Money, target: DiscountTarget) -> Self {
        Self {
            id: promotion.id.as_str().to_string(),
            name: promotion.name.clone(),
            source: DiscountSource::Promotion,
            amount,
            description: promotion.description_or_name().to_string(),
            target,
        }
    }
}
