//! Coupon Evaluation
//!
//! Entry point for evaluating coupons against a cart: which coupons apply and
//! what they are worth, and the cart priced with one chosen coupon.

use tracing::{Span, warn};

use crate::{
    cart::Cart,
    clock::{Clock, SystemClock},
    coupons::{Coupon, CouponError, CouponId},
    store::CouponSource,
    strategies::{AppliedCart, ApplicabilityResult, StrategyRegistry},
};

/// Evaluates coupons using a strategy registry and a clock.
#[derive(Debug, Clone)]
pub struct CouponEvaluator<C = SystemClock> {
    registry: StrategyRegistry,
    clock: C,
}

impl Default for CouponEvaluator<SystemClock> {
    fn default() -> Self {
        Self::new(StrategyRegistry::standard())
    }
}

impl CouponEvaluator<SystemClock> {
    /// Create an evaluator that reads today's date from the system clock.
    pub fn new(registry: StrategyRegistry) -> Self {
        Self::with_clock(registry, SystemClock)
    }
}

impl<C: Clock> CouponEvaluator<C> {
    /// Create an evaluator with an explicit clock.
    pub fn with_clock(registry: StrategyRegistry, clock: C) -> Self {
        Self { registry, clock }
    }

    /// Strategy registry
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// The date coupons are currently evaluated against.
    pub fn today(&self) -> jiff::civil::Date {
        self.clock.today()
    }

    /// Every coupon in `coupons` that applies to `cart`, with the discount it yields.
    ///
    /// Results keep the order of `coupons`. Coupons whose kind has no registered
    /// strategy, or that fail to evaluate against `cart`, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Per-coupon failures are logged and skipped rather than returned.
    #[tracing::instrument(
        name = "coupons.evaluate.list_applicable",
        skip_all,
        fields(
            cart_lines = cart.len(),
            coupons = coupons.len(),
            applicable = tracing::field::Empty
        ),
        err
    )]
    pub fn list_applicable<'a>(
        &self,
        cart: &Cart<'a>,
        coupons: &[Coupon<'a>],
    ) -> Result<Vec<ApplicabilityResult<'a>>, CouponError> {
        let today = self.today();
        let mut results = Vec::new();

        for coupon in coupons {
            let Some(strategy) = self.registry.get(coupon.kind()) else {
                warn!(coupon = %coupon.id(), kind = %coupon.kind(), "no strategy registered, skipping");

                continue;
            };

            let evaluated = strategy
                .is_applicable(cart, coupon, today)
                .and_then(|applicable| {
                    applicable
                        .then(|| strategy.calculate_discount(cart, coupon))
                        .transpose()
                });

            match evaluated {
                Ok(Some(discount)) => results.push(ApplicabilityResult {
                    coupon: coupon.id(),
                    kind: coupon.kind(),
                    discount,
                }),
                Ok(None) => {}
                Err(error) => {
                    warn!(coupon = %coupon.id(), kind = %coupon.kind(), %error, "evaluation failed, skipping");
                }
            }
        }

        Span::current().record("applicable", tracing::field::display(results.len()));

        Ok(results)
    }

    /// Price `cart` with `coupon` applied.
    ///
    /// The coupon does not need to be applicable; one whose conditions are not met
    /// yields a zero discount.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::StrategyNotFound` if the coupon kind has no strategy,
    /// `CouponError::Expired` if the coupon has expired, or any evaluation error.
    #[tracing::instrument(
        name = "coupons.evaluate.apply",
        skip_all,
        fields(coupon = %coupon.id(), kind = %coupon.kind(), cart_lines = cart.len()),
        err
    )]
    pub fn apply<'a>(
        &self,
        cart: &Cart<'a>,
        coupon: &Coupon<'a>,
    ) -> Result<AppliedCart<'a>, CouponError> {
        self.registry
            .strategy(coupon.kind())?
            .apply_coupon(cart, coupon, self.today())
    }

    /// [`CouponEvaluator::list_applicable`] over every coupon in `source`.
    ///
    /// # Errors
    ///
    /// See [`CouponEvaluator::list_applicable`].
    pub fn applicable_coupons<'a, S>(
        &self,
        source: &S,
        cart: &Cart<'a>,
    ) -> Result<Vec<ApplicabilityResult<'a>>, CouponError>
    where
        S: CouponSource<'a> + ?Sized,
    {
        self.list_applicable(cart, &source.all())
    }

    /// Look up coupon `id` in `source` and apply it to `cart`.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::NotFound` if `source` has no such coupon, then the
    /// errors of [`CouponEvaluator::apply`].
    pub fn apply_coupon<'a, S>(
        &self,
        source: &S,
        id: CouponId,
        cart: &Cart<'a>,
    ) -> Result<AppliedCart<'a>, CouponError>
    where
        S: CouponSource<'a> + ?Sized,
    {
        let coupon = source.get(id)?;

        self.apply(cart, &coupon)
    }
}
