//! Checkout orchestration.

use crate::cart::{AppliedDiscount, Cart, ShippingAddress};
use crate::catalog::{Product, ProductCatalog, Promotion, PromotionCatalog};
use crate::checkout::result::render_summary;
use crate::checkout::{CheckoutResult, DiscountEngine};
use crate::error::CheckoutError;
use crate::ids::{CartId, ProductId, TransactionId};
use crate::money::Money;
use crate::payment::{PaymentMethod, PaymentMethodInfo, PaymentProcessor, PaymentStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

/// Default bound on the simulated payment step.
const DEFAULT_PAYMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// A requested cart line, to be resolved against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRequest {
    /// SKU of the requested product.
    pub product_id: ProductId,
    /// Requested quantity.
    pub quantity: i64,
}

impl ItemRequest {
    /// Create a new item request.
    pub fn new(product_id: impl Into<ProductId>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Orchestrates a checkout: subtotal, discounts, totals, payment.
///
/// Catalogs are read-only and shared; each call owns its cart, so any
/// number of checkouts may run concurrently. The only await point is
/// the simulated payment delay.
#[derive(Clone)]
pub struct CheckoutService {
    catalog: Arc<ProductCatalog>,
    engine: DiscountEngine,
    processor: Arc<dyn PaymentProcessor>,
    payment_timeout: Duration,
}

impl CheckoutService {
    /// Create a service over explicit catalogs.
    pub fn new(
        catalog: Arc<ProductCatalog>,
        promotions: Arc<PromotionCatalog>,
        processor: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            catalog,
            engine: DiscountEngine::new(promotions),
            processor,
            payment_timeout: DEFAULT_PAYMENT_TIMEOUT,
        }
    }

    /// Create a service over the demo seed catalogs.
    pub fn with_seed_data(processor: Arc<dyn PaymentProcessor>) -> Self {
        Self::new(
            Arc::new(ProductCatalog::with_seed_data()),
            Arc::new(PromotionCatalog::with_seed_data()),
            processor,
        )
    }

    /// Bound the payment step; expiry is reported as a failed payment.
    pub fn with_payment_timeout(mut self, timeout: Duration) -> Self {
        self.payment_timeout = timeout;
        self
    }

    /// Build a cart from item requests, resolving each SKU against the
    /// catalog. Generates a cart id when none is given. The cart
    /// currency is taken from the first resolved product.
    pub fn build_cart(
        &self,
        items: &[ItemRequest],
        payment_method: PaymentMethod,
        shipping_address: Option<ShippingAddress>,
        cart_id: Option<CartId>,
    ) -> Result<Cart, CheckoutError> {
        let first = items.first().ok_or(CheckoutError::EmptyCart)?;
        let currency = self.resolve(&first.product_id)?.price.currency;

        let id = cart_id.unwrap_or_else(CartId::generate);
        let mut cart = Cart::with_id(id, payment_method, currency);
        cart.shipping_address = shipping_address;

        for request in items {
            let product = self.resolve(&request.product_id)?.clone();
            cart.add_item(product, request.quantity)?;
        }

        Ok(cart)
    }

    /// Price the cart and simulate payment.
    ///
    /// Runs the full pipeline: validation, subtotal, per-item
    /// discounts, cart-level minimum-purchase discount, payment-method
    /// discount, totals, payment simulation, summary. Any validation
    /// failure aborts the whole checkout; no partial results are
    /// returned. A declined payment is not a pipeline failure; the
    /// result carries `PaymentStatus::Failed`.
    #[instrument(skip_all, fields(cart_id = %cart.id))]
    pub async fn price_cart(&self, mut cart: Cart) -> Result<CheckoutResult, CheckoutError> {
        self.validate(&mut cart)?;

        let transaction_id = TransactionId::generate();

        // Subtotal over all items, exact (no rounding happens here).
        let item_subtotals = cart
            .items
            .iter()
            .map(|item| item.subtotal())
            .collect::<Result<Vec<_>, _>>()?;
        let subtotal = Money::try_sum(item_subtotals.iter(), cart.currency)
            .ok_or(CheckoutError::Overflow)?;

        // Per-item promotion discounts, in cart order.
        let mut all_discounts: Vec<AppliedDiscount> = Vec::new();
        let mut product_discounts: Vec<AppliedDiscount> = Vec::new();

        for (item, item_subtotal) in cart.items.iter_mut().zip(item_subtotals) {
            let discounts = self.engine.item_discounts(item)?;

            let item_discount =
                Money::try_sum(discounts.iter().map(|d| &d.amount), item_subtotal.currency)
                    .ok_or(CheckoutError::Overflow)?;
            item.apply_pricing(item_subtotal, item_discount)?;

            product_discounts.extend(discounts.iter().cloned());
            all_discounts.extend(discounts);
        }

        // Cart-level minimum-purchase discount.
        let mut promotion_discounts: Vec<AppliedDiscount> = Vec::new();
        if let Some(discount) = self.engine.minimum_purchase_discount(subtotal) {
            promotion_discounts.push(discount.clone());
            all_discounts.push(discount);
        }

        // Payment-method discount.
        let payment_method_discount = self
            .engine
            .payment_method_discount(subtotal, cart.payment_method);
        if let Some(discount) = &payment_method_discount {
            all_discounts.push(discount.clone());
        }

        // Totals.
        let total_discounts =
            Money::try_sum(all_discounts.iter().map(|d| &d.amount), cart.currency)
                .ok_or(CheckoutError::Overflow)?;
        let final_total = subtotal
            .try_subtract(&total_discounts)
            .ok_or(CheckoutError::Overflow)?;

        cart.subtotal = subtotal;
        cart.total_discounts = total_discounts;
        cart.final_total = final_total;
        cart.applied_discounts = all_discounts.clone();
        cart.touch();

        // Simulated payment, bounded; expiry reports a failed payment.
        let payment_method = cart.payment_method;
        let payment_status = match tokio::time::timeout(
            self.payment_timeout,
            self.processor.process(final_total, payment_method),
        )
        .await
        {
            Ok(status) => status,
            Err(_) => {
                warn!(cart_id = %cart.id, "payment simulation timed out");
                PaymentStatus::Failed
            }
        };

        let summary = render_summary(subtotal, &all_discounts, total_discounts, final_total);

        Ok(CheckoutResult {
            transaction_id,
            cart,
            subtotal,
            product_discounts,
            promotion_discounts,
            payment_method_discount,
            total_discounts,
            final_total,
            payment_method,
            payment_status,
            processed_at: current_timestamp(),
            summary,
        })
    }

    /// Active promotions, in catalog order.
    pub fn active_promotions(&self) -> Vec<Promotion> {
        self.engine.promotions().active().cloned().collect()
    }

    /// Active promotions applicable to a product and/or category.
    pub fn applicable_promotions(
        &self,
        product_id: Option<&ProductId>,
        category: Option<&str>,
    ) -> Vec<Promotion> {
        self.engine
            .promotions()
            .applicable(product_id, category)
            .into_iter()
            .cloned()
            .collect()
    }

    /// All payment methods with their discount percentages.
    pub fn payment_methods(&self) -> Vec<PaymentMethodInfo> {
        PaymentMethod::all().iter().map(|m| m.info()).collect()
    }

    /// The product catalog, keyed by id.
    pub fn products(&self) -> &HashMap<ProductId, Product> {
        self.catalog.all()
    }

    /// Validate the cart before pricing begins. Re-resolves every item
    /// against the catalog and refreshes the product snapshot, so stale
    /// caller-supplied product data never reaches the pricing math.
    fn validate(&self, cart: &mut Cart) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        for item in &mut cart.items {
            if item.quantity < 1 {
                return Err(CheckoutError::InvalidQuantity(item.quantity));
            }
            item.product = self.resolve(&item.product.id)?.clone();
        }

        Ok(())
    }

    fn resolve(&self, id: &ProductId) -> Result<&Product, CheckoutError> {
        self.catalog
            .find(id)
            .ok_or_else(|| CheckoutError::ProductNotFound(id.as_str().to_string()))
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
    use crate::money::Currency;
    use crate::payment::{ProcessorConfig, SimulatedProcessor};

    fn confirming_processor() -> Arc<dyn PaymentProcessor> {
        Arc::new(SimulatedProcessor::with_config(ProcessorConfig {
            latency_ms: 0,
            success_rate: 1.0,
        }))
    }

    fn usd(amount: i64) -> Money {
        Money::new(amount, Currency::USD)
    }

    /// Service with one product ($100.00, Electronics) and a 20%
    /// Electronics promotion.
    fn electronics_service() -> CheckoutService {
        let mut products = ProductCatalog::new();
        products.insert(Product::new(
            "p-001",
            "Test Phone",
            usd(10_000),
            "Electronics",
        ));

        let mut promotions = PromotionCatalog::new();
        promotions.push(
            Promotion::percentage("PROMO001", "Electronics Sale", 20.0)
                .for_categories(vec!["Electronics".to_string()]),
        );

        CheckoutService::new(
            Arc::new(products),
            Arc::new(promotions),
            confirming_processor(),
        )
    }

    /// Service with one product and no promotions at all.
    fn plain_service() -> CheckoutService {
        let mut products = ProductCatalog::new();
        products.insert(Product::new("p-1", "Widget", usd(2_500), "Misc"));

        CheckoutService::new(
            Arc::new(products),
            Arc::new(PromotionCatalog::new()),
            confirming_processor(),
        )
    }

    #[tokio::test]
    async fn test_electronics_scenario() {
        // One item, $100.00 x 2, 20% category promotion, credit card
        // (no payment discount): subtotal 200.00, discount 40.00,
        // final 160.00.
        let service = electronics_service();
        let cart = service
            .build_cart(
                &[ItemRequest::new("p-001", 2)],
                PaymentMethod::CreditCard,
                None,
                None,
            )
            .unwrap();

        let result = service.price_cart(cart).await.unwrap();

        assert_eq!(result.subtotal, usd(20_000));
        assert_eq!(result.product_discounts.len(), 1);
        assert_eq!(result.product_discounts[0].amount, usd(4_000));
        assert_eq!(result.total_discounts, usd(4_000));
        assert_eq!(result.final_total, usd(16_000));
        assert!(result.payment_method_discount.is_none());
        assert_eq!(result.payment_status, PaymentStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_no_discounts_final_equals_subtotal() {
        let service = plain_service();
        let cart = service
            .build_cart(
                &[ItemRequest::new("p-1", 3)],
                PaymentMethod::CreditCard,
                None,
                None,
            )
            .unwrap();

        let result = service.price_cart(cart).await.unwrap();

        assert!(result.total_discounts.is_zero());
        assert_eq!(result.final_total, result.subtotal);
        assert_eq!(result.subtotal, usd(7_500));
    }

    #[tokio::test]
    async fn test_payment_method_discount_applied() {
        let service = plain_service();
        let cart = service
            .build_cart(
                &[ItemRequest::new("p-1", 4)], // $100.00
                PaymentMethod::DebitCard,
                None,
                None,
            )
            .unwrap();

        let result = service.price_cart(cart).await.unwrap();

        let discount = result.payment_method_discount.as_ref().unwrap();
        assert_eq!(discount.amount, usd(1_000)); // exactly 10%
        assert_eq!(result.final_total, usd(9_000));
        // Payment discount lives in its own field, not the promotion list.
        assert!(result.promotion_discounts.is_empty());
    }

    #[tokio::test]
    async fn test_invariants_hold() {
        let service = electronics_service();
        let cart = service
            .build_cart(
                &[ItemRequest::new("p-001", 2)],
                PaymentMethod::Cash,
                None,
                None,
            )
            .unwrap();

        let result = service.price_cart(cart).await.unwrap();

        let discount_sum = Money::try_sum(
            result.all_discounts().map(|d| &d.amount),
            Currency::USD,
        )
        .unwrap();
        assert_eq!(result.total_discounts, discount_sum);
        assert_eq!(
            result.final_total,
            result.subtotal.subtract(&result.total_discounts)
        );

        for item in &result.cart.items {
            assert_eq!(
                item.item_total,
                item.item_subtotal.subtract(&item.item_discount)
            );
            assert_eq!(
                item.item_subtotal,
                item.product.price.multiply(item.quantity)
            );
        }
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let service = plain_service();
        let cart = Cart::new(PaymentMethod::Cash, Currency::USD);

        let result = service.price_cart(cart).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_unknown_product_aborts_checkout() {
        let service = plain_service();
        let mut cart = Cart::new(PaymentMethod::Cash, Currency::USD);
        cart.add_item(
            Product::new("ghost", "Not In Catalog", usd(100), "Misc"),
            1,
        )
        .unwrap();

        let result = service.price_cart(cart).await;
        match result {
            Err(CheckoutError::ProductNotFound(id)) => assert_eq!(id, "ghost"),
            other => panic!("expected ProductNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_build_cart_rejects_unknown_sku() {
        let service = plain_service();
        let result = service.build_cart(
            &[ItemRequest::new("no-such-sku", 1)],
            PaymentMethod::Cash,
            None,
            None,
        );
        assert!(matches!(result, Err(CheckoutError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_build_cart_generates_id_when_absent() {
        let service = plain_service();
        let cart = service
            .build_cart(&[ItemRequest::new("p-1", 1)], PaymentMethod::Cash, None, None)
            .unwrap();
        assert!(!cart.id.as_str().is_empty());

        let explicit = service
            .build_cart(
                &[ItemRequest::new("p-1", 1)],
                PaymentMethod::Cash,
                None,
                Some(CartId::new("cart-42")),
            )
            .unwrap();
        assert_eq!(explicit.id.as_str(), "cart-42");
    }

    #[tokio::test]
    async fn test_item_fields_written_during_pricing() {
        let service = electronics_service();
        let cart = service
            .build_cart(
                &[ItemRequest::new("p-001", 2)],
                PaymentMethod::CreditCard,
                None,
                None,
            )
            .unwrap();

        let result = service.price_cart(cart).await.unwrap();
        let item = &result.cart.items[0];

        assert_eq!(item.item_subtotal, usd(20_000));
        assert_eq!(item.item_discount, usd(4_000));
        assert_eq!(item.item_total, usd(16_000));
    }

    #[tokio::test]
    async fn test_idempotent_pricing() {
        let service = electronics_service();
        let build = || {
            service
                .build_cart(
                    &[ItemRequest::new("p-001", 2)],
                    PaymentMethod::Cash,
                    None,
                    Some(CartId::new("cart-1")),
                )
                .unwrap()
        };

        let first = service.price_cart(build()).await.unwrap();
        let second = service.price_cart(build()).await.unwrap();

        assert_ne!(first.transaction_id, second.transaction_id);
        assert_eq!(first.subtotal, second.subtotal);
        assert_eq!(first.total_discounts, second.total_discounts);
        assert_eq!(first.final_total, second.final_total);
        assert_eq!(first.product_discounts, second.product_discounts);
        assert_eq!(first.payment_method_discount, second.payment_method_discount);
    }

    #[tokio::test]
    async fn test_failed_payment_still_returns_complete_result() {
        let mut products = ProductCatalog::new();
        products.insert(Product::new("p-1", "Widget", usd(2_500), "Misc"));

        let service = CheckoutService::new(
            Arc::new(products),
            Arc::new(PromotionCatalog::new()),
            Arc::new(SimulatedProcessor::with_config(ProcessorConfig {
                latency_ms: 0,
                success_rate: 0.0,
            })),
        );

        let cart = service
            .build_cart(&[ItemRequest::new("p-1", 1)], PaymentMethod::Cash, None, None)
            .unwrap();
        let result = service.price_cart(cart).await.unwrap();

        assert_eq!(result.payment_status, PaymentStatus::Failed);
        assert!(!result.is_confirmed());
        // The breakdown is complete despite the decline.
        assert_eq!(result.subtotal, usd(2_500));
        assert!(result.payment_method_discount.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_payment_timeout_reports_failed() {
        let mut products = ProductCatalog::new();
        products.insert(Product::new("p-1", "Widget", usd(2_500), "Misc"));

        let service = CheckoutService::new(
            Arc::new(products),
            Arc::new(PromotionCatalog::new()),
            Arc::new(SimulatedProcessor::with_config(ProcessorConfig {
                latency_ms: 60_000,
                success_rate: 1.0,
            })),
        )
        .with_payment_timeout(Duration::from_millis(100));

        let cart = service
            .build_cart(&[ItemRequest::new("p-1", 1)], PaymentMethod::CreditCard, None, None)
            .unwrap();
        let result = service.price_cart(cart).await.unwrap();

        assert_eq!(result.payment_status, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn test_summary_lists_discounts() {
        let service = electronics_service();
        let cart = service
            .build_cart(
                &[ItemRequest::new("p-001", 2)],
                PaymentMethod::Cash,
                None,
                None,
            )
            .unwrap();

        let result = service.price_cart(cart).await.unwrap();

        assert!(result.summary.starts_with("Checkout Summary:"));
        assert!(result.summary.contains("Electronics Sale: -$40.00"));
        assert!(result.summary.contains("Cash Discount: -$10.00"));
        assert!(result.summary.contains(&format!(
            "Final Total: {}",
            result.final_total
        )));
    }

    #[tokio::test]
    async fn test_seed_data_checkout() {
        // Coffee (22,491 CLP) x 5 with the seeded buy-2-get-1 promo:
        // 2 free units. Subtotal 112,455 exceeds the 90,000 minimum
        // purchase threshold, so the 9,000 cart discount also applies.
        let service = CheckoutService::with_seed_data(confirming_processor());
        let cart = service
            .build_cart(
                &[ItemRequest::new("PROD004", 5)],
                PaymentMethod::CreditCard,
                None,
                None,
            )
            .unwrap();

        let result = service.price_cart(cart).await.unwrap();

        assert_eq!(result.subtotal, Money::new(112_455, Currency::CLP));
        assert_eq!(result.product_discounts.len(), 1);
        assert_eq!(
            result.product_discounts[0].amount,
            Money::new(44_982, Currency::CLP) // 2 x 22,491
        );
        assert_eq!(result.promotion_discounts.len(), 1);
        assert_eq!(
            result.promotion_discounts[0].amount,
            Money::new(9_000, Currency::CLP)
        );
        assert_eq!(
            result.final_total,
            Money::new(112_455 - 44_982 - 9_000, Currency::CLP)
        );
    }

    #[tokio::test]
    async fn test_query_surface() {
        let service = CheckoutService::with_seed_data(confirming_processor());

        assert_eq!(service.active_promotions().len(), 4);
        assert_eq!(service.products().len(), 5);
        assert_eq!(service.payment_methods().len(), 5);

        let coffee = ProductId::new("PROD004");
        let applicable = service.applicable_promotions(Some(&coffee), Some("Alimentos"));
        assert_eq!(applicable.len(), 1);
        assert_eq!(applicable[0].id.as_str(), "PROMO002");
    }
}
