//! Cart and cart item types.

use crate::cart::AppliedDiscount;
use crate::catalog::Product;
use crate::error::CheckoutError;
use crate::ids::CartId;
use crate::money::{Currency, Money};
use crate::payment::PaymentMethod;
use serde::{Deserialize, Serialize};

/// A shipping address. Carried on the cart for the caller's benefit;
/// it plays no part in pricing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingAddress {
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// Delivery zone identifier.
    pub zone_id: String,
}

/// An item in the cart.
///
/// The computed fields start at zero and are written exactly once per
/// pricing pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Snapshot of the product at cart-build time.
    pub product: Product,
    /// Quantity. At least 1, fixed at cart-build time.
    pub quantity: i64,
    /// Item subtotal (unit price x quantity). Computed during pricing.
    pub item_subtotal: Money,
    /// Total discount applied to this item. Computed during pricing.
    pub item_discount: Money,
    /// Item subtotal minus item discount. Computed during pricing.
    pub item_total: Money,
}

impl CartItem {
    /// Create a new cart item.
    ///
    /// Returns an error if the quantity is less than 1.
    pub fn new(product: Product, quantity: i64) -> Result<Self, CheckoutError> {
        if quantity < 1 {
            return Err(CheckoutError::InvalidQuantity(quantity));
        }
        let currency = product.price.currency;
        Ok(Self {
            product,
            quantity,
            item_subtotal: Money::zero(currency),
            item_discount: Money::zero(currency),
            item_total: Money::zero(currency),
        })
    }

    /// Item subtotal before discounts, computed exactly (no rounding).
    pub fn subtotal(&self) -> Result<Money, CheckoutError> {
        self.product
            .price
            .try_multiply(self.quantity)
            .ok_or(CheckoutError::Overflow)
    }

    /// Write the computed pricing fields back onto the item.
    pub(crate) fn apply_pricing(&mut self, subtotal: Money, discount: Money) -> Result<(), CheckoutError> {
        self.item_subtotal = subtotal;
        self.item_discount = discount;
        self.item_total = subtotal.try_subtract(&discount).ok_or_else(|| {
            CheckoutError::CurrencyMismatch {
                expected: subtotal.currency.code().to_string(),
                got: discount.currency.code().to_string(),
            }
        })?;
        Ok(())
    }
}

/// A shopping cart.
///
/// The aggregate fields (subtotal, discounts, final total) are written
/// by the pricing pipeline; each checkout call operates on its own
/// `Cart` instance, so no locking is needed across calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Items in the cart, in insertion order.
    pub items: Vec<CartItem>,
    /// Selected payment method.
    pub payment_method: PaymentMethod,
    /// Optional shipping address (not used in pricing).
    pub shipping_address: Option<ShippingAddress>,
    /// Cart currency.
    pub currency: Currency,
    /// Subtotal before discounts. Computed during pricing.
    pub subtotal: Money,
    /// Sum of all applied discounts. Computed during pricing.
    pub total_discounts: Money,
    /// Subtotal minus total discounts. Computed during pricing.
    pub final_total: Money,
    /// All discounts applied during pricing, for transparency.
    pub applied_discounts: Vec<AppliedDiscount>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create a new empty cart with a generated id.
    pub fn new(payment_method: PaymentMethod, currency: Currency) -> Self {
        Self::with_id(CartId::generate(), payment_method, currency)
    }

    /// Create a new empty cart with an explicit id.
    pub fn with_id(id: CartId, payment_method: PaymentMethod, currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            id,
            items: Vec::new(),
            payment_method,
            shipping_address: None,
            currency,
            subtotal: Money::zero(currency),
            total_discounts: Money::zero(currency),
            final_total: Money::zero(currency),
            applied_discounts: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the shipping address.
    pub fn with_shipping_address(mut self, address: ShippingAddress) -> Self {
        self.shipping_address = Some(address);
        self
    }

    /// Add an item to the cart.
    ///
    /// Returns an error if the quantity is invalid or the product is
    /// priced in a different currency than the cart.
    pub fn add_item(&mut self, product: Product, quantity: i64) -> Result<(), CheckoutError> {
        if product.price.currency != self.currency {
            return Err(CheckoutError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }
        let item = CartItem::new(product, quantity)?;
        self.items.push(item);
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Touch the update timestamp.
    pub(crate) fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_minor: i64) -> Product {
        Product::new(id, "Test Product", Money::new(price_minor, Currency::USD), "Test")
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(PaymentMethod::CreditCard, Currency::USD);
        assert!(cart.is_empty());
        assert_eq!(cart.payment_method, PaymentMethod::CreditCard);
        assert!(cart.subtotal.is_zero());
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new(PaymentMethod::Cash, Currency::USD);
        cart.add_item(test_product("p-1", 1000), 2).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_item_rejects_zero_quantity() {
        let mut cart = Cart::new(PaymentMethod::Cash, Currency::USD);
        let result = cart.add_item(test_product("p-1", 1000), 0);
        assert!(matches!(result, Err(CheckoutError::InvalidQuantity(0))));
    }

    #[test]
    fn test_add_item_rejects_currency_mismatch() {
        let mut cart = Cart::new(PaymentMethod::Cash, Currency::USD);
        let clp_product = Product::new(
            "p-1",
            "Peso Product",
            Money::new(1000, Currency::CLP),
            "Test",
        );
        let result = cart.add_item(clp_product, 1);
        assert!(matches!(result, Err(CheckoutError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_item_subtotal_is_exact() {
        let item = CartItem::new(test_product("p-1", 333), 3).unwrap();
        assert_eq!(item.subtotal().unwrap().amount_minor, 999);
    }

    #[test]
    fn test_item_computed_fields_start_at_zero() {
        let item = CartItem::new(test_product("p-1", 1000), 2).unwrap();
        assert!(item.item_subtotal.is_zero());
        assert!(item.item_discount.is_zero());
        assert!(item.item_total.is_zero());
    }

    #[test]
    fn test_apply_pricing() {
        let mut item = CartItem::new(test_product("p-1", 10000), 2).unwrap();
        item.apply_pricing(
            Money::new(20000, Currency::USD),
            Money::new(4000, Currency::USD),
        )
        .unwrap();

        assert_eq!(item.item_subtotal.amount_minor, 20000);
        assert_eq!(item.item_discount.amount_minor, 4000);
        assert_eq!(item.item_total.amount_minor, 16000);
    }
}
