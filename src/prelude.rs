//! Coupons prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    clock::{Clock, FixedClock, SystemClock},
    coupons::{
        Coupon, CouponDefinition, CouponError, CouponId, CouponKind, UnknownCouponKind,
        types::{BxGyDetails, CartWiseDetails, ProductQuantity, ProductWiseDetails},
    },
    discounts::DiscountError,
    evaluation::CouponEvaluator,
    fixtures::{Fixture, FixtureError},
    items::CartItem,
    pricing::TotalPriceError,
    products::ProductId,
    receipt::{ReceiptError, write_applicable, write_applied_cart},
    store::{CouponSource, InMemoryCouponStore},
    strategies::{
        AppliedCart, ApplicabilityResult, BxGyStrategy, CartWiseStrategy, CouponStrategy,
        DiscountedLine, ProductWiseStrategy, Strategy, StrategyRegistry, strategy,
    },
};
