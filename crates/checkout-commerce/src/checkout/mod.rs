//! Checkout pricing pipeline.
//!
//! [`DiscountEngine`] holds the pure discount computations;
//! [`CheckoutService`] orchestrates a full pricing pass and produces a
//! [`CheckoutResult`].

mod engine;
mod result;
mod service;

pub use engine::DiscountEngine;
pub use result::CheckoutResult;
pub use service::{CheckoutService, ItemRequest};
