//! Discount calculations.
//!
//! Three pure computations over the promotion catalog: per-item
//! promotion discounts, the cart-level minimum-purchase discount, and
//! the payment-method discount. All monetary math is integer
//! minor-unit arithmetic; percentages round half-up (see
//! [`Money::percentage`]).

use crate::cart::{AppliedDiscount, CartItem, DiscountSource, DiscountTarget};
use crate::catalog::{Promotion, PromotionCatalog, PromotionKind};
use crate::error::CheckoutError;
use crate::money::Money;
use crate::payment::PaymentMethod;
use std::sync::Arc;

/// Computes discount amounts from promotion rules.
///
/// Holds no mutable state; safe to share across concurrent checkouts.
#[derive(Debug, Clone)]
pub struct DiscountEngine {
    promotions: Arc<PromotionCatalog>,
}

impl DiscountEngine {
    /// Create an engine over a promotion catalog.
    pub fn new(promotions: Arc<PromotionCatalog>) -> Self {
        Self { promotions }
    }

    /// The promotion catalog this engine reads from.
    pub fn promotions(&self) -> &PromotionCatalog {
        &self.promotions
    }

    /// Promotion discounts for a single cart item.
    ///
    /// Returns an empty list for promotion-ineligible products.
    /// Zero-value discounts are suppressed; every returned record is
    /// strictly positive and targets the item's product.
    pub fn item_discounts(&self, item: &CartItem) -> Result<Vec<AppliedDiscount>, CheckoutError> {
        let product = &item.product;
        if !product.eligible_for_promotions {
            return Ok(Vec::new());
        }

        let item_subtotal = item.subtotal()?;
        let applicable = self
            .promotions
            .applicable(Some(&product.id), Some(&product.category));

        let mut discounts = Vec::new();
        for promotion in applicable {
            let amount = self.promotion_amount(promotion, item, item_subtotal);
            if amount.is_positive() {
                discounts.push(AppliedDiscount::from_promotion(
                    promotion,
                    amount,
                    DiscountTarget::Product(product.id.clone()),
                ));
            }
        }

        Ok(discounts)
    }

    /// The best cart-level minimum-purchase discount, if any qualifies.
    ///
    /// A promotion qualifies when its threshold is at most the subtotal
    /// (inclusive). Among qualifying promotions the largest discount
    /// wins; an exact tie keeps the first in catalog order.
    pub fn minimum_purchase_discount(&self, subtotal: Money) -> Option<AppliedDiscount> {
        let mut best: Option<(&Promotion, Money)> = None;

        for promotion in self.promotions.active() {
            let PromotionKind::MinimumPurchase {
                threshold,
                discount,
            } = &promotion.kind
            else {
                continue;
            };

            // No currency conversion: foreign-currency thresholds never qualify.
            if threshold.currency != subtotal.currency
                || threshold.amount_minor > subtotal.amount_minor
            {
                continue;
            }

            match best {
                Some((_, best_amount)) if discount.amount_minor <= best_amount.amount_minor => {}
                _ => best = Some((promotion, *discount)),
            }
        }

        best.map(|(promotion, amount)| {
            AppliedDiscount::from_promotion(promotion, amount, DiscountTarget::Total)
        })
    }

    /// The payment-method discount, absent for methods without one.
    pub fn payment_method_discount(
        &self,
        subtotal: Money,
        method: PaymentMethod,
    ) -> Option<AppliedDiscount> {
        let percentage = method.discount_percentage();
        if percentage <= 0.0 {
            return None;
        }

        Some(AppliedDiscount {
            id: format!("PAYMENT_{}", method.as_str()),
            name: format!("{} Discount", method.display_name()),
            source: DiscountSource::PaymentMethod,
            amount: subtotal.percentage(percentage),
            description: format!("{}% discount for {}", percentage, method.display_name()),
            target: DiscountTarget::Total,
        })
    }

    /// Discount amount a single promotion grants on an item.
    fn promotion_amount(&self, promotion: &Promotion, item: &CartItem, item_subtotal: Money) -> Money {
        let currency = item_subtotal.currency;
        match &promotion.kind {
            PromotionKind::PercentageDiscount { percentage } => {
                item_subtotal.percentage(*percentage)
            }
            PromotionKind::FixedAmountDiscount { amount } => {
                // Applied verbatim, not scaled by quantity. Foreign-currency
                // amounts never apply.
                if amount.currency == currency {
                    *amount
                } else {
                    Money::zero(currency)
                }
            }
            PromotionKind::BuyXGetYFree {
                required_quantity,
                free_quantity,
            } => buy_x_get_y_amount(item, *required_quantity, *free_quantity),
            // Minimum-purchase discounts apply at cart level only.
            PromotionKind::MinimumPurchase { .. } => Money::zero(currency),
        }
    }
}

/// Discount for a buy-X-get-Y-free promotion: each full set of
/// `required` items earns `free` items at full unit price, capped at
/// the quantity actually in the cart.
fn buy_x_get_y_amount(item: &CartItem, required: i64, free: i64) -> Money {
    let unit_price = item.product.price;
    if required < 1 || item.quantity < required {
        return Money::zero(unit_price.currency);
    }

    let eligible_sets = item.quantity / required;
    let free_items = (eligible_sets * free).min(item.quantity);

    unit_price.multiply(free_items)
}
