//! Product-wise Strategy

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    coupons::{Coupon, CouponDefinition, CouponError, CouponKind, types::ProductWiseDetails},
    discounts::percent_of,
    items::CartItem,
    strategies::{AppliedCart, CouponStrategy, ensure_not_expired, wrong_kind},
};

/// Percentage off every line carrying the coupon's product.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductWiseStrategy;

impl ProductWiseStrategy {
    fn details<'c>(coupon: &'c Coupon<'_>) -> Result<&'c ProductWiseDetails, CouponError> {
        match coupon.definition() {
            CouponDefinition::ProductWise(details) => Ok(details),
            _ => Err(wrong_kind(CouponKind::ProductWise, coupon)),
        }
    }

    /// Discount on one line; zero for lines of other products.
    fn line_discount<'a>(
        details: &ProductWiseDetails,
        item: &CartItem<'a>,
    ) -> Result<Money<'a, Currency>, CouponError> {
        if item.product() != details.product() {
            return Ok(Money::from_minor(0, item.unit_price().currency()));
        }

        Ok(percent_of(details.percent(), &item.line_total()?)?)
    }
}

impl CouponStrategy for ProductWiseStrategy {
    fn kind(&self) -> CouponKind {
        CouponKind::ProductWise
    }

    fn is_applicable<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
        today: Date,
    ) -> Result<bool, CouponError> {
        let details = Self::details(coupon)?;

        Ok(!coupon.is_expired(today) && cart.contains(details.product()))
    }

    fn calculate_discount<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
    ) -> Result<Money<'a, Currency>, CouponError> {
        let details = Self::details(coupon)?;

        cart.iter()
            .try_fold(Money::from_minor(0, cart.currency()), |acc, item| {
                Ok(acc.add(Self::line_discount(details, item)?)?)
            })
    }

    fn apply_coupon<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
        today: Date,
    ) -> Result<AppliedCart<'a>, CouponError> {
        ensure_not_expired(coupon, today)?;

        let details = Self::details(coupon)?;

        AppliedCart::itemized(cart, |item| Self::line_discount(details, item))
    }
}
