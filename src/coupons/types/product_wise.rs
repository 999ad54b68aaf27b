//! Product-wise Coupon
//!
//! A percentage off every cart line carrying one product.

use decimal_percentage::Percentage;
use jiff::civil::Date;

use crate::{
    coupons::{CouponError, CouponKind, types::validate_percent},
    products::ProductId,
};

/// Product-wise coupon details
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWiseDetails {
    product: ProductId,
    percent: Percentage,
    expiry: Option<Date>,
}

impl ProductWiseDetails {
    /// Create product-wise details with no expiry.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::MalformedDefinition` if the percentage is outside `0%..=100%`.
    pub fn new(product: ProductId, percent: Percentage) -> Result<Self, CouponError> {
        validate_percent(CouponKind::ProductWise, &percent)?;

        Ok(Self {
            product,
            percent,
            expiry: None,
        })
    }

    /// Set the last day the coupon can be used.
    #[must_use]
    pub fn with_expiry(mut self, expiry: Date) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Discounted product
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Discount percentage
    pub fn percent(&self) -> &Percentage {
        &self.percent
    }

    /// Expiry date
    pub fn expiry(&self) -> Option<Date> {
        self.expiry
    }
}
