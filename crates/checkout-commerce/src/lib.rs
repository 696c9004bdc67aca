//! Checkout pricing domain for a shopping cart.
//!
//! This crate computes a checkout total: it sums item subtotals,
//! applies per-product promotional discounts, a cart-level
//! minimum-purchase promotion, and a payment-method discount, then
//! produces a financial breakdown and a simulated payment confirmation.
//!
//! - **Catalog**: static product and promotion catalogs, read-only
//!   after construction
//! - **Cart**: shopping cart with items and applied discounts
//! - **Checkout**: the discount engine and the pricing pipeline
//! - **Payment**: payment methods and the simulated processor
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use checkout_commerce::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), CheckoutError> {
//! let processor = Arc::new(SimulatedProcessor::new());
//! let service = CheckoutService::with_seed_data(processor);
//!
//! let cart = service.build_cart(
//!     &[ItemRequest::new("p-001", 1)],
//!     PaymentMethod::Cash,
//!     None,
//!     None,
//! )?;
//!
//! let result = service.price_cart(cart).await?;
//! println!("{}", result.summary);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod payment;

pub use error::CheckoutError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CheckoutError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, ProductCatalog, Promotion, PromotionCatalog, PromotionKind};

    // Cart
    pub use crate::cart::{
        AppliedDiscount, Cart, CartItem, DiscountSource, DiscountTarget, ShippingAddress,
    };

    // Checkout
    pub use crate::checkout::{CheckoutResult, CheckoutService, DiscountEngine, ItemRequest};

    // Payment
    pub use crate::payment::{
        PaymentMethod, PaymentMethodInfo, PaymentProcessor, PaymentStatus, ProcessorConfig,
        SimulatedProcessor,
    };
}
