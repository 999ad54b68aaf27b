//! Products

use std::fmt;

/// Product identifier, as assigned by the catalogue that owns the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(u32);

impl ProductId {
    /// Create a product id from its raw value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Return the raw id value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_raw_id() {
        assert_eq!(ProductId::new(42).to_string(), "42");
    }

    #[test]
    fn from_u32_round_trips_through_get() {
        let id = ProductId::from(7);

        assert_eq!(id.get(), 7);
        assert_eq!(id, ProductId::new(7));
    }
}
