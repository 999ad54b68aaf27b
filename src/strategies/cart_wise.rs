//! Cart-wise Strategy

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    cart::Cart,
    coupons::{Coupon, CouponDefinition, CouponError, CouponKind, types::CartWiseDetails},
    discounts::percent_of,
    strategies::{AppliedCart, CouponStrategy, ensure_not_expired, wrong_kind},
};

/// Percentage off the cart subtotal once it reaches the coupon threshold.
#[derive(Debug, Default, Clone, Copy)]
pub struct CartWiseStrategy;

impl CartWiseStrategy {
    fn details<'c, 'a>(coupon: &'c Coupon<'a>) -> Result<&'c CartWiseDetails<'a>, CouponError> {
        match coupon.definition() {
            CouponDefinition::CartWise(details) => Ok(details),
            _ => Err(wrong_kind(CouponKind::CartWise, coupon)),
        }
    }

    /// Whether `subtotal` reaches the threshold. Fails on a currency mismatch.
    fn meets_threshold<'a>(
        subtotal: Money<'a, Currency>,
        details: &CartWiseDetails<'a>,
    ) -> Result<bool, CouponError> {
        Ok(subtotal.sub(*details.threshold())?.to_minor_units() >= 0)
    }
}

impl CouponStrategy for CartWiseStrategy {
    fn kind(&self) -> CouponKind {
        CouponKind::CartWise
    }

    fn is_applicable<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
        today: Date,
    ) -> Result<bool, CouponError> {
        let details = Self::details(coupon)?;

        if coupon.is_expired(today) {
            return Ok(false);
        }

        Self::meets_threshold(cart.subtotal()?, details)
    }

    fn calculate_discount<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
    ) -> Result<Money<'a, Currency>, CouponError> {
        let details = Self::details(coupon)?;
        let subtotal = cart.subtotal()?;

        if !Self::meets_threshold(subtotal, details)? {
            debug!(coupon = %coupon.id(), %subtotal, threshold = %details.threshold(), "below threshold");

            return Ok(Money::from_minor(0, cart.currency()));
        }

        Ok(percent_of(details.percent(), &subtotal)?)
    }

    fn apply_coupon<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
        today: Date,
    ) -> Result<AppliedCart<'a>, CouponError> {
        ensure_not_expired(coupon, today)?;

        let discount = self.calculate_discount(cart, coupon)?;

        AppliedCart::aggregate(cart, discount)
    }
}
