//! Buy X Get Y Strategy
//!
//! A bundle repeats once for every full set of `buy` products in the cart, up to
//! the coupon's repetition limit. Each repetition adds the `get` quantities to a
//! free-unit budget, which is spent on the eligible cart lines cheapest first.
//! Budget left over once eligible stock runs out is forfeited.

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    cart::Cart,
    coupons::{Coupon, CouponDefinition, CouponError, CouponKind, types::BxGyDetails},
    products::ProductId,
    strategies::{AppliedCart, CouponStrategy, ensure_not_expired, wrong_kind},
};

/// Units of one cart line granted free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeUnits {
    /// Index of the line in the cart
    pub line: usize,

    /// Product on the line
    pub product: ProductId,

    /// Number of units granted free
    pub units: u32,
}

/// Number of times the bundle is honoured for `cart`, capped at the repetition limit.
///
/// Zero when any buy requirement is not met.
pub fn effective_repeats(details: &BxGyDetails, cart: &Cart<'_>) -> u32 {
    details
        .buy()
        .iter()
        .fold(details.repetition_limit(), |repeats, required| {
            let possible = cart.quantity_of(required.product) / u64::from(required.quantity);

            u32::try_from(possible).map_or(repeats, |possible| repeats.min(possible))
        })
}

/// Total free units granted for `repeats` repetitions of the bundle.
pub fn free_budget(details: &BxGyDetails, repeats: u32) -> u64 {
    details
        .get()
        .iter()
        .map(|free| u64::from(free.quantity) * u64::from(repeats))
        .sum()
}

/// Allocate the free-unit budget for `repeats` repetitions across the cart.
///
/// Eligible lines are consumed in ascending unit price order; lines with equal
/// prices keep their cart order.
pub fn allocate_free_units(
    details: &BxGyDetails,
    cart: &Cart<'_>,
    repeats: u32,
) -> SmallVec<[FreeUnits; 4]> {
    let mut candidates: SmallVec<[(usize, _); 8]> = cart
        .iter()
        .enumerate()
        .filter(|(_, item)| details.is_free_product(item.product()))
        .collect();

    candidates.sort_by_key(|(_, item)| item.unit_price().to_minor_units());

    let mut remaining = free_budget(details, repeats);
    let mut allocated = SmallVec::new();

    for (line, item) in candidates {
        if remaining == 0 {
            break;
        }

        let units = u32::try_from(remaining.min(u64::from(item.quantity())))
            .unwrap_or(item.quantity());

        remaining -= u64::from(units);

        allocated.push(FreeUnits {
            line,
            product: item.product(),
            units,
        });
    }

    allocated
}

/// Buy-X-get-Y bundle discount.
#[derive(Debug, Default, Clone, Copy)]
pub struct BxGyStrategy;

impl BxGyStrategy {
    fn details<'c>(coupon: &'c Coupon<'_>) -> Result<&'c BxGyDetails, CouponError> {
        match coupon.definition() {
            CouponDefinition::BxGy(details) => Ok(details),
            _ => Err(wrong_kind(CouponKind::BxGy, coupon)),
        }
    }
}

impl CouponStrategy for BxGyStrategy {
    fn kind(&self) -> CouponKind {
        CouponKind::BxGy
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

        let buys_met = details
            .buy()
            .iter()
            .all(|required| cart.quantity_of(required.product) >= u64::from(required.quantity));

        let has_free_product = details.get().iter().any(|free| cart.contains(free.product));

        Ok(buys_met && has_free_product)
    }

    fn calculate_discount<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
    ) -> Result<Money<'a, Currency>, CouponError> {
        let details = Self::details(coupon)?;
        let repeats = effective_repeats(details, cart);
        let zero = Money::from_minor(0, cart.currency());

        if repeats == 0 {
            debug!(coupon = %coupon.id(), "buy requirements not met");

            return Ok(zero);
        }

        let allocated = allocate_free_units(details, cart, repeats);

        debug!(
            coupon = %coupon.id(),
            repeats,
            budget = free_budget(details, repeats),
            granted = allocated.iter().map(|free| u64::from(free.units)).sum::<u64>(),
            "allocated free units"
        );

        allocated
            .iter()
            .filter_map(|free| cart.items().get(free.line).map(|item| item.price_of(free.units)))
            .try_fold(zero, |discount, waived| Ok(discount.add(waived?)?))
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
