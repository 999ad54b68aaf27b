//! Fixtures
//!
//! Coupon and cart sets loaded from YAML files under a base directory:
//! `coupons/<set>.yml` and `carts/<set>.yml`.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    coupons::{Coupon, CouponDefinition, CouponError, UnknownCouponKind},
    fixtures::{carts::CartFixture, coupons::CouponsFixture},
    items::CartItem,
    store::InMemoryCouponStore,
};

pub mod carts;
pub mod coupons;
pub mod values;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid date
    #[error("Invalid date {0}: {1}")]
    InvalidDate(String, jiff::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between prices in the set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Unknown coupon type
    #[error(transparent)]
    UnknownKind(#[from] UnknownCouponKind),

    /// No cart lines loaded
    #[error("No cart items loaded; cannot create cart")]
    NoItems,

    /// Invalid coupon definition
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Coupons, in file order
    coupons: Vec<Coupon<'a>>,

    /// Cart lines, in file order
    items: Vec<CartItem<'a>>,

    /// Currency shared by every price in the set
    currency: Option<&'static Currency>,
}

impl Fixture<'static> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            coupons: Vec::new(),
            items: Vec::new(),
            currency: None,
        }
    }

    /// Load coupons from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a coupon type is unknown,
    /// or if a coupon's details do not match its type.
    pub fn load_coupons(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("coupons").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CouponsFixture = serde_norway::from_str(&contents)?;

        for coupon_fixture in fixture.coupons {
            let coupon = Coupon::try_from(coupon_fixture)?;

            if let CouponDefinition::CartWise(details) = coupon.definition() {
                self.observe_currency(details.threshold().currency())?;
            }

            self.coupons.push(coupon);
        }

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if prices are invalid
    /// or in different currencies.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for item_fixture in fixture.items {
            let item = CartItem::try_from(item_fixture)?;

            self.observe_currency(item.unit_price().currency())?;
            self.items.push(item);
        }

        Ok(self)
    }

    /// Load a complete fixture set (coupons and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_coupons(name)?.load_cart(name)?;

        Ok(fixture)
    }
}

impl<'a> Fixture<'a> {
    fn observe_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);

                Ok(())
            }
        }
    }

    /// Get all coupons
    pub fn coupons(&self) -> &[Coupon<'a>] {
        &self.coupons
    }

    /// Get all cart lines
    pub fn items(&self) -> &[CartItem<'a>] {
        &self.items
    }

    /// Create a coupon store holding the loaded coupons
    ///
    /// # Errors
    ///
    /// Returns an error if two coupons share an id.
    pub fn store(&self) -> Result<InMemoryCouponStore<'a>, FixtureError> {
        let mut store = InMemoryCouponStore::new();

        for coupon in &self.coupons {
            store.insert(coupon.clone())?;
        }

        Ok(store)
    }

    /// Create a cart from the loaded lines
    ///
    /// # Errors
    ///
    /// Returns an error if no lines are loaded or if cart creation fails.
    pub fn cart(&self) -> Result<Cart<'a>, FixtureError> {
        if self.items.is_empty() {
            return Err(FixtureError::NoItems);
        }

        let currency = self.currency.ok_or(FixtureError::NoItems)?;

        Ok(Cart::with_items(self.items.clone(), currency)?)
    }
}

impl Default for Fixture<'static> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rusty_money::{Money, iso::GBP};
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::coupons::{CouponId, CouponKind};

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    const COUPONS: &str = r#"
coupons:
  - id: 1
    type: cart-wise
    details: { threshold: "100.00 GBP", discount: "10%" }
  - id: 2
    type: PRODUCT_WISE
    details: { product_id: 1, discount: "20%" }
"#;

    const CART: &str = r#"
items:
  - { product_id: 1, quantity: 6, price: "50.00 GBP" }
  - { product_id: 2, quantity: 3, price: "30.00 GBP" }
  - { product_id: 3, quantity: 2, price: "25.00 GBP" }
"#;

    #[test]
    fn fixture_loads_coupons_and_cart() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(dir.path(), "coupons", "basic", COUPONS)?;
        write_fixture(dir.path(), "carts", "basic", CART)?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_coupons("basic")?.load_cart("basic")?;

        let kinds: Vec<CouponKind> = fixture.coupons().iter().map(Coupon::kind).collect();

        assert_eq!(kinds, vec![CouponKind::CartWise, CouponKind::ProductWise]);
        assert_eq!(fixture.items().len(), 3);

        let cart = fixture.cart()?;

        assert_eq!(cart.currency(), GBP);
        assert_eq!(cart.subtotal()?, Money::from_minor(44_000, GBP));

        let store = fixture.store()?;

        assert_eq!(store.len(), 2);

        Ok(())
    }

    #[test]
    fn fixture_rejects_mixed_currencies() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(dir.path(), "coupons", "mixed", COUPONS)?;
        write_fixture(
            dir.path(),
            "carts",
            "mixed",
            r#"
items:
  - { product_id: 1, quantity: 1, price: "5.00 USD" }
"#,
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_coupons("mixed")?;

        let result = fixture.load_cart("mixed");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(..))));

        Ok(())
    }

    #[test]
    fn fixture_rejects_duplicate_coupon_ids() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(
            dir.path(),
            "coupons",
            "dupes",
            r#"
coupons:
  - id: 4
    type: product-wise
    details: { product_id: 1, discount: "20%" }
  - id: 4
    type: product-wise
    details: { product_id: 2, discount: "20%" }
"#,
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_coupons("dupes")?;

        assert!(matches!(
            fixture.store(),
            Err(FixtureError::Coupon(CouponError::AlreadyExists(id))) if id == CouponId::new(4)
        ));

        Ok(())
    }

    #[test]
    fn fixture_without_cart_lines_has_no_cart() {
        let fixture = Fixture::with_base_path("unused");

        assert!(matches!(fixture.cart(), Err(FixtureError::NoItems)));
    }

    #[test]
    fn missing_fixture_file_is_io_error() -> TestResult {
        let dir = TempDir::new()?;
        let mut fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_coupons("absent"),
            Err(FixtureError::Io(_))
        ));

        Ok(())
    }

    #[test]
    fn bundled_basic_set_loads() -> TestResult {
        let fixture = Fixture::from_set("basic")?;

        assert!(!fixture.coupons().is_empty());
        assert!(fixture.cart().is_ok());

        Ok(())
    }
}
