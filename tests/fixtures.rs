//! Evaluation of the bundled fixture sets.

use jiff::civil::date;
use rusty_money::{Money, iso::GBP};
use testresult::TestResult;

use coupons::prelude::*;

fn evaluator() -> CouponEvaluator<FixedClock> {
    CouponEvaluator::with_clock(StrategyRegistry::standard(), FixedClock(date(2024, 6, 15)))
}

#[test]
fn basic_set_lists_applicable_coupons() -> TestResult {
    let fixture = Fixture::from_set("basic")?;
    let store = fixture.store()?;
    let cart = fixture.cart()?;

    let results = evaluator().applicable_coupons(&store, &cart)?;

    // Coupon 4 has expired and coupon 5 needs a £1000 cart
    let summary: Vec<(u32, i64)> = results
        .iter()
        .map(|result| (result.coupon.get(), result.discount.to_minor_units()))
        .collect();

    assert_eq!(summary, vec![(1, 4_400), (2, 6_000), (3, 2_500)]);

    Ok(())
}

#[test]
fn basic_set_applies_coupon_and_renders_receipt() -> TestResult {
    let fixture = Fixture::from_set("basic")?;
    let store = fixture.store()?;
    let cart = fixture.cart()?;

    let applied = evaluator().apply_coupon(&store, CouponId::new(2), &cart)?;

    assert_eq!(applied.final_price(), Money::from_minor(38_000, GBP));

    let mut out = Vec::new();

    write_applied_cart(&mut out, CouponId::new(2), &applied)?;

    let output = String::from_utf8(out)?;

    assert!(output.contains("Final:"));
    assert!(output.contains(&Money::from_minor(38_000, GBP).to_string()));

    Ok(())
}

#[test]
fn basic_set_rejects_expired_coupon() -> TestResult {
    let fixture = Fixture::from_set("basic")?;
    let store = fixture.store()?;
    let cart = fixture.cart()?;

    let result = evaluator().apply_coupon(&store, CouponId::new(4), &cart);

    assert!(matches!(result, Err(CouponError::Expired(_))));

    Ok(())
}

#[test]
fn bundles_set_grants_cheapest_free_products_first() -> TestResult {
    let fixture = Fixture::from_set("bundles")?;
    let store = fixture.store()?;
    let cart = fixture.cart()?;

    let results = evaluator().applicable_coupons(&store, &cart)?;

    assert_eq!(results.len(), 1);
    assert_eq!(
        results.first().map(|result| (result.coupon, result.discount)),
        Some((CouponId::new(1), Money::from_minor(5_500, GBP)))
    );

    let applied = evaluator().apply_coupon(&store, CouponId::new(2), &cart)?;

    assert_eq!(applied.total_discount(), Money::from_minor(0, GBP));
    assert_eq!(applied.final_price(), applied.total_price());

    Ok(())
}
