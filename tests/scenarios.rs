//! End-to-end coupon scenarios.
//!
//! Sample cart used by most scenarios:
//!
//! | Product | Qty | Unit price |
//! |---------|-----|------------|
//! | 1       | 6   | £50.00     |
//! | 2       | 3   | £30.00     |
//! | 3       | 2   | £25.00     |
//!
//! Subtotal: £440.00

use decimal_percentage::Percentage;
use jiff::civil::{Date, date};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::GBP};
use testresult::TestResult;

use coupons::prelude::*;

const TODAY: Date = date(2024, 6, 15);

fn pq(product: u32, quantity: u32) -> ProductQuantity {
    ProductQuantity::new(ProductId::new(product), quantity)
}

fn gbp(minor: i64) -> Money<'static, rusty_money::iso::Currency> {
    Money::from_minor(minor, GBP)
}

fn cart(lines: &[(u32, u32, i64)]) -> TestResult<Cart<'static>> {
    let items: Vec<_> = lines
        .iter()
        .map(|&(product, quantity, minor)| CartItem::new(ProductId::new(product), quantity, gbp(minor)))
        .collect();

    Ok(Cart::with_items(items, GBP)?)
}

fn sample_cart() -> TestResult<Cart<'static>> {
    cart(&[(1, 6, 5000), (2, 3, 3000), (3, 2, 2500)])
}

fn evaluator() -> CouponEvaluator<FixedClock> {
    CouponEvaluator::with_clock(StrategyRegistry::standard(), FixedClock(TODAY))
}

fn percent(points: i64) -> Percentage {
    Percentage::from(Decimal::new(points, 2))
}

#[test]
fn cart_wise_coupon_takes_ten_percent_off_the_cart() -> TestResult {
    let cart = sample_cart()?;
    let coupon = Coupon::new(
        CouponId::new(1),
        CouponDefinition::CartWise(CartWiseDetails::new(gbp(10_000), percent(10))?),
    );

    let evaluator = evaluator();
    let applicable = evaluator.list_applicable(&cart, std::slice::from_ref(&coupon))?;

    assert_eq!(
        applicable,
        vec![ApplicabilityResult {
            coupon: CouponId::new(1),
            kind: CouponKind::CartWise,
            discount: gbp(4_400),
        }]
    );

    let applied = evaluator.apply(&cart, &coupon)?;

    assert_eq!(applied.total_price(), gbp(44_000));
    assert_eq!(applied.total_discount(), gbp(4_400));
    assert_eq!(applied.final_price(), gbp(39_600));

    Ok(())
}

#[test]
fn product_wise_coupon_discounts_matching_lines() -> TestResult {
    let cart = sample_cart()?;
    let coupon = Coupon::new(
        CouponId::new(2),
        CouponDefinition::ProductWise(ProductWiseDetails::new(ProductId::new(1), percent(20))?),
    );

    let applied = evaluator().apply(&cart, &coupon)?;

    assert_eq!(applied.total_discount(), gbp(6_000));
    assert_eq!(applied.final_price(), gbp(38_000));

    let line_discounts: Vec<Money<'_, _>> = applied.lines().iter().map(|line| line.discount).collect();

    assert_eq!(line_discounts, vec![gbp(6_000), gbp(0), gbp(0)]);

    Ok(())
}

#[test]
fn bxgy_repeats_limited_by_scarcest_buy_product() -> TestResult {
    let cart = sample_cart()?;
    let coupon = Coupon::new(
        CouponId::new(3),
        CouponDefinition::BxGy(BxGyDetails::new([pq(1, 2), pq(2, 2)], [pq(3, 1)], 3)?),
    );

    let evaluator = evaluator();
    let applicable = evaluator.list_applicable(&cart, std::slice::from_ref(&coupon))?;

    assert_eq!(applicable.first().map(|result| result.discount), Some(gbp(2_500)));

    let applied = evaluator.apply(&cart, &coupon)?;

    assert_eq!(applied.total_discount(), gbp(2_500));
    assert_eq!(applied.final_price(), gbp(41_500));

    Ok(())
}

#[test]
fn bxgy_with_insufficient_buy_quantity_grants_nothing() -> TestResult {
    let cart = cart(&[(1, 1, 5000), (3, 1, 2500)])?;
    let coupon = Coupon::new(
        CouponId::new(4),
        CouponDefinition::BxGy(BxGyDetails::new([pq(1, 2)], [pq(3, 1)], 3)?),
    );

    let evaluator = evaluator();

    assert!(
        evaluator
            .list_applicable(&cart, std::slice::from_ref(&coupon))?
            .is_empty()
    );

    let applied = evaluator.apply(&cart, &coupon)?;

    assert_eq!(applied.total_discount(), gbp(0));
    assert_eq!(applied.final_price(), gbp(7_500));

    Ok(())
}

#[test]
fn bxgy_forfeits_budget_beyond_eligible_stock() -> TestResult {
    let cart = cart(&[(1, 5, 5000), (3, 2, 2500)])?;
    let coupon = Coupon::new(
        CouponId::new(5),
        CouponDefinition::BxGy(BxGyDetails::new([pq(1, 2)], [pq(3, 1)], 3)?),
    );

    let applied = evaluator().apply(&cart, &coupon)?;

    assert_eq!(applied.total_discount(), gbp(5_000));
    assert_eq!(applied.final_price(), gbp(25_000));

    Ok(())
}

#[test]
fn bxgy_spreads_budget_over_several_free_products() -> TestResult {
    let cart = cart(&[(1, 4, 5000), (3, 1, 2500), (4, 1, 3000)])?;
    let coupon = Coupon::new(
        CouponId::new(6),
        CouponDefinition::BxGy(BxGyDetails::new(
            [pq(1, 2)],
            [pq(3, 1), pq(4, 1), pq(5, 1)],
            3,
        )?),
    );

    let applied = evaluator().apply(&cart, &coupon)?;

    assert_eq!(applied.total_discount(), gbp(5_500));
    assert_eq!(applied.final_price(), gbp(20_000));

    Ok(())
}

#[test]
fn applying_an_unknown_coupon_is_not_found() -> TestResult {
    let store = InMemoryCouponStore::new();
    let result = evaluator().apply_coupon(&store, CouponId::new(404), &sample_cart()?);

    assert!(matches!(result, Err(CouponError::NotFound(id)) if id == CouponId::new(404)));

    Ok(())
}

#[test]
fn applicable_coupons_over_a_store_keep_store_order() -> TestResult {
    let cart = sample_cart()?;
    let mut store = InMemoryCouponStore::new();

    store.create(CouponDefinition::CartWise(CartWiseDetails::new(gbp(10_000), percent(10))?));
    store.create(CouponDefinition::ProductWise(ProductWiseDetails::new(ProductId::new(1), percent(20))?));
    store.create(CouponDefinition::BxGy(BxGyDetails::new([pq(1, 2), pq(2, 2)], [pq(3, 1)], 3)?));
    store.create(CouponDefinition::CartWise(
        CartWiseDetails::new(gbp(0), percent(50))?.with_expiry(date(2024, 6, 14)),
    ));

    let results = evaluator().applicable_coupons(&store, &cart)?;

    let summary: Vec<(u32, CouponKind, i64)> = results
        .iter()
        .map(|result| (result.coupon.get(), result.kind, result.discount.to_minor_units()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (1, CouponKind::CartWise, 4_400),
            (2, CouponKind::ProductWise, 6_000),
            (3, CouponKind::BxGy, 2_500),
        ]
    );

    Ok(())
}

#[test]
fn expired_coupon_from_store_cannot_be_applied() -> TestResult {
    let mut store = InMemoryCouponStore::new();
    let coupon = store.create(CouponDefinition::ProductWise(
        ProductWiseDetails::new(ProductId::new(1), percent(20))?.with_expiry(date(2024, 6, 14)),
    ));

    let result = evaluator().apply_coupon(&store, coupon.id(), &sample_cart()?);

    assert!(matches!(result, Err(CouponError::Expired(id)) if id == coupon.id()));

    Ok(())
}
