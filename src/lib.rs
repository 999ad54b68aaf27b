//! Coupons
//!
//! Coupons is a coupon evaluation engine: it decides which cart-wise, product-wise and
//! buy-x-get-y coupons apply to a shopping cart, what each is worth, and prices the cart
//! with a chosen coupon applied.

pub mod cart;
pub mod clock;
pub mod coupons;
pub mod discounts;
pub mod evaluation;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod store;
pub mod strategies;
