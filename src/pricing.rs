//! Prices

use rusty_money::{Money, MoneyError, iso};
use thiserror::Error;

use crate::{items::CartItem, products::ProductId};

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No items were provided, so currency could not be determined.
    #[error("no items provided; cannot determine currency")]
    NoItems,

    /// A line total did not fit in minor units.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total price of a list of cart items (`quantity * unit price`, summed).
///
/// # Errors
///
/// - [`TotalPriceError::NoItems`]: No items were provided, so currency could not be determined.
/// - [`TotalPriceError::Overflow`]: A line total overflowed.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    items: &[CartItem<'a>],
) -> Result<Money<'a, iso::Currency>, TotalPriceError> {
    let first = items.first().ok_or(TotalPriceError::NoItems)?;

    items.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, item| Ok(acc.add(item.line_total()?)?),
    )
}

/// Total quantity of a product across every line that carries it.
pub fn quantity_of(items: &[CartItem<'_>], product: ProductId) -> u64 {
    items
        .iter()
        .filter(|item| item.product() == product)
        .map(|item| u64::from(item.quantity()))
        .sum()
}
