//! Coupon errors.

use thiserror::Error;

use crate::{
    coupons::{CouponId, CouponKind},
    discounts::DiscountError,
    pricing::TotalPriceError,
};

/// Failures reported by coupon definition, lookup and evaluation.
#[derive(Debug, Error)]
pub enum CouponError {
    /// No coupon is stored under the requested id.
    #[error("coupon {0} not found")]
    NotFound(CouponId),

    /// A coupon is already stored under this id.
    #[error("coupon {0} already exists")]
    AlreadyExists(CouponId),

    /// The coupon's expiry date has passed.
    #[error("coupon {0} has expired")]
    Expired(CouponId),

    /// No strategy is registered for the coupon kind.
    #[error("no strategy registered for {0} coupons")]
    StrategyNotFound(CouponKind),

    /// The definition is invalid, or its details do not match its declared kind.
    #[error("malformed {kind} coupon: {reason}")]
    MalformedDefinition {
        /// Declared coupon kind
        kind: CouponKind,

        /// What was wrong with the definition
        reason: String,
    },

    /// Discount arithmetic failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Cart totals could not be calculated.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

impl CouponError {
    /// Build a `MalformedDefinition` error.
    pub fn malformed(kind: CouponKind, reason: impl Into<String>) -> Self {
        Self::MalformedDefinition {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<rusty_money::MoneyError> for CouponError {
    fn from(error: rusty_money::MoneyError) -> Self {
        Self::Discount(DiscountError::Money(error))
    }
}
