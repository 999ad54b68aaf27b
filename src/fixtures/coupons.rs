//! Coupon Fixtures
//!
//! Coupons are declared with a `type` and a flat `details` map. The fields
//! present in `details` must be exactly the ones the declared type needs.

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    coupons::{
        Coupon, CouponDefinition, CouponError, CouponId, CouponKind,
        types::{BxGyDetails, CartWiseDetails, ProductQuantity, ProductWiseDetails},
    },
    fixtures::{
        FixtureError,
        values::{parse_date, parse_percentage, parse_price},
    },
    products::ProductId,
};

/// Wrapper for coupons in YAML
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// Coupon records, in evaluation order
    pub coupons: Vec<CouponFixture>,
}

/// Coupon record from YAML
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Coupon id
    pub id: u32,

    /// Declared coupon kind (e.g., "cart-wise", "PRODUCT_WISE", "bxgy")
    #[serde(rename = "type")]
    pub kind: String,

    /// Kind-specific details
    pub details: CouponDetailsFixture,
}

/// Product and quantity pair from YAML
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProductQuantityFixture {
    /// Product id
    pub product_id: u32,

    /// Quantity
    pub quantity: u32,
}

/// Union of every coupon detail field
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CouponDetailsFixture {
    /// Cart-wise minimum subtotal (e.g., "100.00 GBP")
    pub threshold: Option<String>,

    /// Cart-wise or product-wise discount (e.g., "10%")
    pub discount: Option<String>,

    /// Product-wise target product
    pub product_id: Option<u32>,

    /// BxGy products to buy
    pub buy_products: Option<Vec<ProductQuantityFixture>>,

    /// BxGy products granted free
    pub get_products: Option<Vec<ProductQuantityFixture>>,

    /// BxGy repetition limit
    pub repetition_limit: Option<u32>,

    /// Last valid day (e.g., "2025-12-31")
    pub expiry: Option<String>,
}

impl CouponDetailsFixture {
    /// Names of the fields that are set.
    fn present(&self) -> Vec<&'static str> {
        [
            ("threshold", self.threshold.is_some()),
            ("discount", self.discount.is_some()),
            ("product_id", self.product_id.is_some()),
            ("buy_products", self.buy_products.is_some()),
            ("get_products", self.get_products.is_some()),
            ("repetition_limit", self.repetition_limit.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    /// Reject fields that do not belong to `kind`.
    fn only(&self, kind: CouponKind, allowed: &[&str]) -> Result<(), CouponError> {
        let extra: Vec<&str> = self
            .present()
            .into_iter()
            .filter(|field| !allowed.contains(field))
            .collect();

        if extra.is_empty() {
            Ok(())
        } else {
            Err(CouponError::malformed(
                kind,
                format!("unexpected fields: {}", extra.join(", ")),
            ))
        }
    }

    fn into_definition(
        self,
        kind: CouponKind,
    ) -> Result<CouponDefinition<'static>, FixtureError> {
        let expiry = self.expiry.as_deref().map(parse_date).transpose()?;

        let definition = match kind {
            CouponKind::CartWise => {
                self.only(kind, &["threshold", "discount"])?;

                let (minor_units, currency) = parse_price(&required(kind, "threshold", self.threshold)?)?;
                let percent = parse_percentage(&required(kind, "discount", self.discount)?)?;
                let details = CartWiseDetails::new(Money::from_minor(minor_units, currency), percent)?;

                CouponDefinition::CartWise(match expiry {
                    Some(expiry) => details.with_expiry(expiry),
                    None => details,
                })
            }
            CouponKind::ProductWise => {
                self.only(kind, &["product_id", "discount"])?;

                let product = required(kind, "product_id", self.product_id)?;
                let percent = parse_percentage(&required(kind, "discount", self.discount)?)?;
                let details = ProductWiseDetails::new(ProductId::new(product), percent)?;

                CouponDefinition::ProductWise(match expiry {
                    Some(expiry) => details.with_expiry(expiry),
                    None => details,
                })
            }
            CouponKind::BxGy => {
                self.only(kind, &["buy_products", "get_products", "repetition_limit"])?;

                let buy = required(kind, "buy_products", self.buy_products)?;
                let get = required(kind, "get_products", self.get_products)?;
                let limit = required(kind, "repetition_limit", self.repetition_limit)?;

                let details = BxGyDetails::new(
                    buy.into_iter().map(ProductQuantity::from),
                    get.into_iter().map(ProductQuantity::from),
                    limit,
                )?;

                CouponDefinition::BxGy(match expiry {
                    Some(expiry) => details.with_expiry(expiry),
                    None => details,
                })
            }
        };

        Ok(definition)
    }
}

fn required<T>(kind: CouponKind, field: &str, value: Option<T>) -> Result<T, CouponError> {
    value.ok_or_else(|| CouponError::malformed(kind, format!("missing field `{field}`")))
}

impl From<ProductQuantityFixture> for ProductQuantity {
    fn from(fixture: ProductQuantityFixture) -> Self {
        ProductQuantity::new(ProductId::new(fixture.product_id), fixture.quantity)
    }
}

impl TryFrom<CouponFixture> for Coupon<'static> {
    type Error = FixtureError;

    fn try_from(fixture: CouponFixture) -> Result<Self, Self::Error> {
        let kind: CouponKind = fixture.kind.parse()?;
        let definition = fixture.details.into_definition(kind)?;

        Ok(Coupon::new(CouponId::new(fixture.id), definition))
    }
}
