//! Buy X Get Y Coupon
//!
//! Buy every product in `buy` (at the given quantities) and receive units of
//! the `get` products free, repeated up to `repetition_limit` times.

use jiff::civil::Date;
use smallvec::SmallVec;

use crate::{
    coupons::{CouponError, CouponKind, types::ProductQuantity},
    products::ProductId,
};

/// BxGy coupon details
#[derive(Debug, Clone, PartialEq)]
pub struct BxGyDetails {
    buy: SmallVec<[ProductQuantity; 4]>,
    get: SmallVec<[ProductQuantity; 4]>,
    repetition_limit: u32,
    expiry: Option<Date>,
}

impl BxGyDetails {
    /// Create BxGy details with no expiry.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::MalformedDefinition` if either product list is empty,
    /// any quantity is zero, or the repetition limit is zero.
    pub fn new(
        buy: impl IntoIterator<Item = ProductQuantity>,
        get: impl IntoIterator<Item = ProductQuantity>,
        repetition_limit: u32,
    ) -> Result<Self, CouponError> {
        let buy: SmallVec<[ProductQuantity; 4]> = buy.into_iter().collect();
        let get: SmallVec<[ProductQuantity; 4]> = get.into_iter().collect();

        validate_products("buy", &buy)?;
        validate_products("get", &get)?;

        if repetition_limit == 0 {
            return Err(CouponError::malformed(
                CouponKind::BxGy,
                "repetition limit must be at least 1",
            ));
        }

        Ok(Self {
            buy,
            get,
            repetition_limit,
            expiry: None,
        })
    }

    /// Set the last day the coupon can be used.
    #[must_use]
    pub fn with_expiry(mut self, expiry: Date) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Products (and quantities) that must be bought for each repetition
    pub fn buy(&self) -> &[ProductQuantity] {
        &self.buy
    }

    /// Products (and quantities) granted free for each repetition
    pub fn get(&self) -> &[ProductQuantity] {
        &self.get
    }

    /// Maximum number of repetitions
    pub fn repetition_limit(&self) -> u32 {
        self.repetition_limit
    }

    /// Expiry date
    pub fn expiry(&self) -> Option<Date> {
        self.expiry
    }

    /// Whether `product` is one of the free products.
    pub fn is_free_product(&self, product: ProductId) -> bool {
        self.get.iter().any(|free| free.product == product)
    }
}

fn validate_products(list: &str, products: &[ProductQuantity]) -> Result<(), CouponError> {
    if products.is_empty() {
        return Err(CouponError::malformed(
            CouponKind::BxGy,
            format!("{list} products must not be empty"),
        ));
    }

    if let Some(zero) = products.iter().find(|pq| pq.quantity == 0) {
        return Err(CouponError::malformed(
            CouponKind::BxGy,
            format!("{list} quantity for product {} must be positive", zero.product),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn pq(product: u32, quantity: u32) -> ProductQuantity {
        ProductQuantity::new(ProductId::new(product), quantity)
    }

    #[test]
    fn keeps_requirement_order() -> TestResult {
        let details = BxGyDetails::new([pq(1, 2), pq(2, 2)], [pq(3, 1)], 3)?;

        assert_eq!(details.buy(), &[pq(1, 2), pq(2, 2)]);
        assert_eq!(details.get(), &[pq(3, 1)]);
        assert_eq!(details.repetition_limit(), 3);
        assert!(details.is_free_product(ProductId::new(3)));
        assert!(!details.is_free_product(ProductId::new(1)));

        Ok(())
    }

    #[test]
    fn empty_get_list_is_malformed() {
        let result = BxGyDetails::new([pq(1, 2)], std::iter::empty(), 1);

        assert!(matches!(
            result,
            Err(CouponError::MalformedDefinition {
                kind: CouponKind::BxGy,
                ..
            })
        ));
    }

    #[test]
    fn zero_quantity_is_malformed() {
        let result = BxGyDetails::new([pq(1, 0)], [pq(3, 1)], 1);

        assert!(
            matches!(&result, Err(CouponError::MalformedDefinition { reason, .. }) if reason.contains("product 1")),
            "expected MalformedDefinition, got {result:?}"
        );
    }

    #[test]
    fn zero_repetition_limit_is_malformed() {
        let result = BxGyDetails::new([pq(1, 2)], [pq(3, 1)], 0);

        assert!(matches!(
            result,
            Err(CouponError::MalformedDefinition { .. })
        ));
    }
}
