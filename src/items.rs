//! Items

use rusty_money::{Money, iso::Currency};

use crate::{pricing::TotalPriceError, products::ProductId};

/// A single cart line: a product, how many of it, and its unit price.
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem<'a> {
    product: ProductId,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> CartItem<'a> {
    /// Creates a new cart line.
    pub fn new(product: ProductId, quantity: u32, unit_price: Money<'a, Currency>) -> Self {
        Self {
            product,
            quantity,
            unit_price,
        }
    }

    /// Returns the product of the line
    pub fn product(&self) -> ProductId {
        self.product
    }

    /// Returns the number of units on the line
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the price of a single unit
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Price of `units` units of this line's product.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the result does not fit in minor units.
    pub fn price_of(&self, units: u32) -> Result<Money<'a, Currency>, TotalPriceError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(units))
            .ok_or(TotalPriceError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }

    /// Returns `quantity * unit price`.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the result does not fit in minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        self.price_of(self.quantity)
    }
}
