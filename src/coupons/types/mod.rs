//! Coupon detail shapes

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::{
    coupons::{CouponError, CouponKind},
    discounts::fraction,
    products::ProductId,
};

mod bxgy;
mod cart_wise;
mod product_wise;

pub use bxgy::BxGyDetails;
pub use cart_wise::CartWiseDetails;
pub use product_wise::ProductWiseDetails;

/// A product and a unit count, used for BxGy buy requirements and free items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductQuantity {
    /// Product
    pub product: ProductId,

    /// Number of units
    pub quantity: u32,
}

impl ProductQuantity {
    /// Create a new product quantity pair.
    pub const fn new(product: ProductId, quantity: u32) -> Self {
        Self { product, quantity }
    }
}

/// Percent discounts must lie within `0%..=100%`.
fn validate_percent(kind: CouponKind, percent: &Percentage) -> Result<(), CouponError> {
    let value = fraction(percent);

    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(CouponError::malformed(
            kind,
            format!("discount must be between 0% and 100%, got {}%", value * Decimal::ONE_HUNDRED),
        ));
    }

    Ok(())
}
