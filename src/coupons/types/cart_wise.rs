//! Cart-wise Coupon
//!
//! A percentage off the whole cart once its subtotal reaches a threshold.

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};

use crate::coupons::{CouponError, CouponKind, types::validate_percent};

/// Cart-wise coupon details
#[derive(Debug, Clone, PartialEq)]
pub struct CartWiseDetails<'a> {
    threshold: Money<'a, Currency>,
    percent: Percentage,
    expiry: Option<Date>,
}

impl<'a> CartWiseDetails<'a> {
    /// Create cart-wise details with no expiry.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::MalformedDefinition` if the threshold is negative or the
    /// percentage is outside `0%..=100%`.
    pub fn new(threshold: Money<'a, Currency>, percent: Percentage) -> Result<Self, CouponError> {
        if threshold.to_minor_units() < 0 {
            return Err(CouponError::malformed(
                CouponKind::CartWise,
                format!("threshold must not be negative, got {threshold}"),
            ));
        }

        validate_percent(CouponKind::CartWise, &percent)?;

        Ok(Self {
            threshold,
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

    /// Minimum cart subtotal
    pub fn threshold(&self) -> &Money<'a, Currency> {
        &self.threshold
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
