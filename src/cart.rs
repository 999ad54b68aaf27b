//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::CartItem,
    pricing::{TotalPriceError, quantity_of, total_price},
    products::ProductId,
};

/// Errors related to cart construction.
#[derive(Debug, Error)]
pub enum CartError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// A line was given a quantity of zero (index, product).
    #[error("Item {0} (product {1}) has zero quantity")]
    ZeroQuantity(usize, ProductId),
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<CartItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given line items.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line is priced in another currency or has zero quantity.
    pub fn with_items(
        items: impl Into<Vec<CartItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.unit_price().currency();

            if item_currency != currency {
                return Err(CartError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if item.quantity() == 0 {
                return Err(CartError::ZeroQuantity(i, item.product()));
            }

            Ok(())
        })?;

        Ok(Cart { items, currency })
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was a money arithmetic or overflow error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.items)
    }

    /// Total quantity of `product` in the cart, summed across duplicate lines.
    pub fn quantity_of(&self, product: ProductId) -> u64 {
        quantity_of(&self.items, product)
    }

    /// Whether any line carries `product`.
    pub fn contains(&self, product: ProductId) -> bool {
        self.items.iter().any(|item| item.product() == product)
    }

    /// Iterate over the line items in cart order.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem<'a>> {
        self.items.iter()
    }

    /// Get the line items.
    pub fn items(&self) -> &[CartItem<'a>] {
        &self.items
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    fn test_items<'a>() -> [CartItem<'a>; 3] {
        [
            CartItem::new(ProductId::new(1), 6, Money::from_minor(5000, iso::GBP)),
            CartItem::new(ProductId::new(2), 3, Money::from_minor(3000, iso::GBP)),
            CartItem::new(ProductId::new(3), 2, Money::from_minor(2500, iso::GBP)),
        ]
    }

    #[test]
    fn new_with_currency() {
        let cart = Cart::new(iso::GBP);

        assert_eq!(cart.currency, iso::GBP);
        assert!(cart.is_empty());
    }

    #[test]
    fn with_items_currency_mismatch_errors() {
        let items = [
            CartItem::new(ProductId::new(1), 1, Money::from_minor(100, iso::GBP)),
            CartItem::new(ProductId::new(2), 1, Money::from_minor(100, iso::USD)),
        ];

        let result = Cart::with_items(items, iso::GBP);

        assert!(
            matches!(
                result,
                Err(CartError::CurrencyMismatch(1, item, cart))
                    if item == iso::USD.iso_alpha_code && cart == iso::GBP.iso_alpha_code
            ),
            "expected CurrencyMismatch, got {result:?}"
        );
    }

    #[test]
    fn with_items_zero_quantity_errors() {
        let items = [CartItem::new(
            ProductId::new(9),
            0,
            Money::from_minor(100, iso::GBP),
        )];

        let result = Cart::with_items(items, iso::GBP);

        assert!(
            matches!(result, Err(CartError::ZeroQuantity(0, product)) if product == ProductId::new(9)),
            "expected ZeroQuantity, got {result:?}"
        );
    }

    #[test]
    fn subtotal_with_items() -> TestResult {
        let cart = Cart::with_items(test_items(), iso::GBP)?;

        assert_eq!(cart.subtotal()?, Money::from_minor(44_000, iso::GBP));

        Ok(())
    }

    #[test]
    fn subtotal_with_no_items() -> TestResult {
        let cart = Cart::new(iso::GBP);

        assert_eq!(cart.subtotal()?, Money::from_minor(0, iso::GBP));

        Ok(())
    }

    #[test]
    fn quantity_and_contains() -> TestResult {
        let cart = Cart::with_items(test_items(), iso::GBP)?;

        assert_eq!(cart.quantity_of(ProductId::new(1)), 6);
        assert!(cart.contains(ProductId::new(3)));
        assert!(!cart.contains(ProductId::new(4)));
        assert_eq!(cart.len(), 3);

        Ok(())
    }
}
