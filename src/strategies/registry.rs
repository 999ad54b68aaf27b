//! Strategy Registry

use rustc_hash::FxHashMap;

use crate::{
    coupons::{CouponError, CouponKind},
    strategies::{BxGyStrategy, CartWiseStrategy, CouponStrategy, ProductWiseStrategy, Strategy, strategy},
};

/// Maps each coupon kind to the strategy that evaluates it.
#[derive(Debug, Default, Clone)]
pub struct StrategyRegistry {
    strategies: FxHashMap<CouponKind, Strategy>,
}

impl StrategyRegistry {
    /// Create a registry with no strategies.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry with a strategy for every built-in coupon kind.
    pub fn standard() -> Self {
        Self::empty()
            .with(strategy(CartWiseStrategy))
            .with(strategy(ProductWiseStrategy))
            .with(strategy(BxGyStrategy))
    }

    /// Add a strategy, replacing any existing one for its kind.
    #[must_use]
    pub fn with(mut self, strategy: Strategy) -> Self {
        self.register(strategy);
        self
    }

    /// Register a strategy, returning the one it replaces.
    pub fn register(&mut self, strategy: Strategy) -> Option<Strategy> {
        self.strategies.insert(strategy.kind(), strategy)
    }

    /// Look up the strategy for `kind`.
    pub fn get(&self, kind: CouponKind) -> Option<&dyn CouponStrategy> {
        self.strategies.get(&kind).map(AsRef::as_ref)
    }

    /// Look up the strategy for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::StrategyNotFound` if no strategy is registered for `kind`.
    pub fn strategy(&self, kind: CouponKind) -> Result<&dyn CouponStrategy, CouponError> {
        self.get(kind).ok_or(CouponError::StrategyNotFound(kind))
    }

    /// Registered kinds, in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = CouponKind> + '_ {
        CouponKind::ALL
            .into_iter()
            .filter(|kind| self.strategies.contains_key(kind))
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether no strategies are registered
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
