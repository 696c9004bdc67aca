//! Shopping cart and applied-discount types.

mod cart;
mod discount;

pub use cart::{Cart, CartItem, ShippingAddress};
pub use discount::{AppliedDiscount, DiscountSource, DiscountTarget};
