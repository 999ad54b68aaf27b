//! Discount strategies
//!
//! One [`CouponStrategy`] per coupon kind. Strategies are stateless and every
//! method is a pure function of the cart, the coupon and the evaluation date.

use std::{fmt, sync::Arc};

use jiff::civil::Date;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    cart::Cart,
    coupons::{Coupon, CouponError, CouponId, CouponKind},
    items::CartItem,
    pricing::TotalPriceError,
    products::ProductId,
};

pub mod bxgy;
pub mod cart_wise;
pub mod product_wise;
pub mod registry;

pub use bxgy::BxGyStrategy;
pub use cart_wise::CartWiseStrategy;
pub use product_wise::ProductWiseStrategy;
pub use registry::StrategyRegistry;

/// Discount calculation for a single coupon kind.
pub trait CouponStrategy: fmt::Debug + Send + Sync {
    /// The coupon kind this strategy evaluates.
    fn kind(&self) -> CouponKind;

    /// Whether `coupon` may be applied to `cart` on `today`. Expired coupons are never applicable.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::MalformedDefinition` if the coupon is not of this strategy's kind,
    /// or an arithmetic error if cart totals cannot be calculated.
    fn is_applicable<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
        today: Date,
    ) -> Result<bool, CouponError>;

    /// Discount the coupon yields on `cart`, ignoring expiry.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::MalformedDefinition` if the coupon is not of this strategy's kind,
    /// or an arithmetic error.
    fn calculate_discount<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
    ) -> Result<Money<'a, Currency>, CouponError>;

    /// Price `cart` with `coupon` applied.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Expired` if the coupon has expired on `today`, plus the errors of
    /// [`CouponStrategy::calculate_discount`].
    fn apply_coupon<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
        today: Date,
    ) -> Result<AppliedCart<'a>, CouponError>;
}

/// Shared strategy object held by the registry.
pub type Strategy = Arc<dyn CouponStrategy>;

/// Convert any strategy implementation into a shared strategy object.
pub fn strategy<S>(strategy: S) -> Strategy
where
    S: CouponStrategy + 'static,
{
    Arc::new(strategy)
}

/// A coupon that applies to a cart, and what it is worth.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicabilityResult<'a> {
    /// Coupon id
    pub coupon: CouponId,

    /// Coupon kind
    pub kind: CouponKind,

    /// Discount the coupon would yield
    pub discount: Money<'a, Currency>,
}

/// A cart line after a coupon has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedLine<'a> {
    /// Product
    pub product: ProductId,

    /// Units on the line
    pub quantity: u32,

    /// Unit price
    pub unit_price: Money<'a, Currency>,

    /// Discount attributed to this line
    pub discount: Money<'a, Currency>,
}

/// A cart priced with a coupon applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCart<'a> {
    lines: SmallVec<[DiscountedLine<'a>; 10]>,
    total_price: Money<'a, Currency>,
    total_discount: Money<'a, Currency>,
    final_price: Money<'a, Currency>,
}

impl<'a> AppliedCart<'a> {
    /// Build a result whose discount is attributed line by line; the total discount is
    /// the sum of the line discounts.
    ///
    /// # Errors
    ///
    /// Returns any error produced by `line_discount`, or a money arithmetic error.
    pub fn itemized<F>(cart: &Cart<'a>, mut line_discount: F) -> Result<Self, CouponError>
    where
        F: FnMut(&CartItem<'a>) -> Result<Money<'a, Currency>, CouponError>,
    {
        let mut total_discount = Money::from_minor(0, cart.currency());

        let lines = cart
            .iter()
            .map(|item| {
                let discount = line_discount(item)?;
                total_discount = total_discount.add(discount)?;

                Ok(DiscountedLine::from_item(item, discount))
            })
            .collect::<Result<SmallVec<_>, CouponError>>()?;

        Self::from_parts(cart, lines, total_discount)
    }

    /// Build a result for a discount calculated for the cart as a whole; every line
    /// reports a zero discount.
    ///
    /// # Errors
    ///
    /// Returns a money arithmetic error if the totals cannot be calculated.
    pub fn aggregate(
        cart: &Cart<'a>,
        total_discount: Money<'a, Currency>,
    ) -> Result<Self, CouponError> {
        let zero = Money::from_minor(0, cart.currency());

        let lines = cart
            .iter()
            .map(|item| DiscountedLine::from_item(item, zero))
            .collect();

        Self::from_parts(cart, lines, total_discount)
    }

    fn from_parts(
        cart: &Cart<'a>,
        lines: SmallVec<[DiscountedLine<'a>; 10]>,
        total_discount: Money<'a, Currency>,
    ) -> Result<Self, CouponError> {
        let total_price = cart.subtotal()?;
        let final_price = total_price.sub(total_discount)?;

        Ok(Self {
            lines,
            total_price,
            total_discount,
            final_price,
        })
    }

    /// Lines in cart order
    pub fn lines(&self) -> &[DiscountedLine<'a>] {
        &self.lines
    }

    /// Cart subtotal before the discount
    pub fn total_price(&self) -> Money<'a, Currency> {
        self.total_price
    }

    /// Discount granted by the coupon
    pub fn total_discount(&self) -> Money<'a, Currency> {
        self.total_discount
    }

    /// Price after the discount
    pub fn final_price(&self) -> Money<'a, Currency> {
        self.final_price
    }
}

impl<'a> DiscountedLine<'a> {
    fn from_item(item: &CartItem<'a>, discount: Money<'a, Currency>) -> Self {
        Self {
            product: item.product(),
            quantity: item.quantity(),
            unit_price: *item.unit_price(),
            discount,
        }
    }

    /// `quantity * unit_price`, before the discount.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the result does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        CartItem::new(self.product, self.quantity, self.unit_price).line_total()
    }
}

/// Fail with `CouponError::Expired` once the coupon is past its expiry date.
fn ensure_not_expired(coupon: &Coupon<'_>, today: Date) -> Result<(), CouponError> {
    if coupon.is_expired(today) {
        return Err(CouponError::Expired(coupon.id()));
    }

    Ok(())
}

/// The error returned when a strategy is handed a coupon of another kind.
fn wrong_kind(expected: CouponKind, coupon: &Coupon<'_>) -> CouponError {
    CouponError::malformed(
        expected,
        format!("coupon {} has {} details", coupon.id(), coupon.kind()),
    )
}
