//! Cart Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, values::parse_price},
    items::CartItem,
    products::ProductId,
};

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines, in cart order
    pub items: Vec<CartItemFixture>,
}

/// Cart line from YAML
#[derive(Debug, Deserialize)]
pub struct CartItemFixture {
    /// Product id
    pub product_id: u32,

    /// Number of units
    pub quantity: u32,

    /// Unit price (e.g., "50.00 GBP")
    pub price: String,
}

impl TryFrom<CartItemFixture> for CartItem<'_> {
    type Error = FixtureError;

    fn try_from(fixture: CartItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(CartItem::new(
            ProductId::new(fixture.product_id),
            fixture.quantity,
            Money::from_minor(minor_units, currency),
        ))
    }
}
