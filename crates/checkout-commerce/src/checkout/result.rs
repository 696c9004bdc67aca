//! Checkout result types.

use crate::cart::{AppliedDiscount, Cart};
use crate::ids::TransactionId;
use crate::money::Money;
use crate::payment::{PaymentMethod, PaymentStatus};
use serde::{Deserialize, Serialize};

/// Complete financial breakdown of one checkout.
///
/// Produced once per `price_cart` call and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutResult {
    /// Unique transaction identifier.
    pub transaction_id: TransactionId,
    /// The priced cart, with computed fields filled in.
    pub cart: Cart,

    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Per-item promotion discounts, in item order.
    pub product_discounts: Vec<AppliedDiscount>,
    /// Cart-level promotion discounts.
    pub promotion_discounts: Vec<AppliedDiscount>,
    /// Payment-method discount, if the method grants one.
    pub payment_method_discount: Option<AppliedDiscount>,
    /// Sum of all applied discounts.
    pub total_discounts: Money,
    /// Subtotal minus total discounts.
    pub final_total: Money,

    /// Payment method used.
    pub payment_method: PaymentMethod,
    /// Outcome of the simulated payment.
    pub payment_status: PaymentStatus,
    /// Unix timestamp of processing.
    pub processed_at: i64,

    /// Human-readable summary of the checkout.
    pub summary: String,
}

impl CheckoutResult {
    /// Check if the payment was confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.payment_status == PaymentStatus::Confirmed
    }

    /// Every applied discount: product, promotion, then payment method.
    pub fn all_discounts(&self) -> impl Iterator<Item = &AppliedDiscount> {
        self.product_discounts
            .iter()
            .chain(self.promotion_discounts.iter())
            .chain(self.payment_method_discount.iter())
    }
}

/// Render the human-readable checkout summary: subtotal, each applied
/// discount by name and amount, and the final total.
pub(crate) fn render_summary(
    subtotal: Money,
    discounts: &[AppliedDiscount],
    total_discounts: Money,
    final_total: Money,
) -> String {
    let mut summary = String::from("Checkout Summary:\n");
    summary.push_str(&format!("Subtotal: {}\n", subtotal));

    if !discounts.is_empty() {
        summary.push_str("Discounts Applied:\n");
        for discount in discounts {
            summary.push_str(&format!("  - {}: -{}\n", discount.name, discount.amount));
        }
        summary.push_str(&format!("Total Discounts: -{}\n", total_discounts));
    }

    summary.push_str(&format!("Final Total: {}", final_total));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{DiscountSource, DiscountTarget};
    use crate::money::Currency;

    fn usd(amount: i64) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn discount(name: &str, amount: i64) -> AppliedDiscount {
        AppliedDiscount {
            id: "D1".to_string(),
            name: name.to_string(),
            source: DiscountSource::Promotion,
            amount: usd(amount),
            description: name.to_string(),
            target: DiscountTarget::Total,
        }
    }

    #[test]
    fn test_summary_with_discounts() {
        let summary = render_summary(
            usd(20_000),
            &[discount("Electronics Sale", 4_000)],
            usd(4_000),
            usd(16_000),
        );

        assert_eq!(
            summary,
            "Checkout Summary:\n\
             Subtotal: $200.00\n\
             Discounts Applied:\n\
             \x20 - Electronics Sale: -$40.00\n\
             Total Discounts: -$40.00\n\
             Final Total: $160.00"
        );
    }

    #[test]
    fn test_summary_without_discounts() {
        let summary = render_summary(usd(5_000), &[], usd(0), usd(5_000));

        assert_eq!(
            summary,
            "Checkout Summary:\nSubtotal: $50.00\nFinal Total: $50.00"
        );
    }
}
