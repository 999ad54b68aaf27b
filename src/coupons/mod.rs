//! Coupons
//!
//! A coupon is an id plus one of three definition shapes. The shape is the
//! coupon's kind, so a definition can never disagree with its own tag; raw
//! records that declare a kind separately are checked with
//! [`CouponDefinition::expect_kind`] before they are evaluated.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use thiserror::Error;

pub mod types;

mod errors;

pub use errors::CouponError;

use crate::coupons::types::{BxGyDetails, CartWiseDetails, ProductWiseDetails};

/// Coupon identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CouponId(u32);

impl CouponId {
    /// Create a coupon id from its raw value.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Return the raw id value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CouponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Coupon kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CouponKind {
    /// Percentage off the whole cart above a threshold
    CartWise,

    /// Percentage off every line of one product
    ProductWise,

    /// Buy a set of products, get other products free
    BxGy,
}

impl CouponKind {
    /// Every coupon kind, in declaration order.
    pub const ALL: [CouponKind; 3] = [Self::CartWise, Self::ProductWise, Self::BxGy];

    /// Canonical name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CartWise => "cart-wise",
            Self::ProductWise => "product-wise",
            Self::BxGy => "bxgy",
        }
    }
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a coupon kind.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid coupon type: {0}")]
pub struct UnknownCouponKind(pub String);

impl FromStr for CouponKind {
    type Err = UnknownCouponKind;

    /// Accepts `cart-wise`, `CART_WISE`, `Product-Wise`, `bxgy`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('_', "-");

        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalised)
            .ok_or_else(|| UnknownCouponKind(s.to_string()))
    }
}

/// Coupon definition: exactly one detail shape per coupon kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponDefinition<'a> {
    /// Cart-wise percentage discount
    CartWise(CartWiseDetails<'a>),

    /// Product-wise percentage discount
    ProductWise(ProductWiseDetails),

    /// Buy X get Y bundle
    BxGy(BxGyDetails),
}

impl CouponDefinition<'_> {
    /// Return the coupon kind implied by the detail shape.
    pub const fn kind(&self) -> CouponKind {
        match self {
            Self::CartWise(_) => CouponKind::CartWise,
            Self::ProductWise(_) => CouponKind::ProductWise,
            Self::BxGy(_) => CouponKind::BxGy,
        }
    }

    /// Return the expiry date, if any.
    pub fn expiry(&self) -> Option<Date> {
        match self {
            Self::CartWise(details) => details.expiry(),
            Self::ProductWise(details) => details.expiry(),
            Self::BxGy(details) => details.expiry(),
        }
    }

    /// A definition is expired once `today` is strictly after its expiry date.
    pub fn is_expired(&self, today: Date) -> bool {
        self.expiry().is_some_and(|expiry| today > expiry)
    }

    /// Check that a separately declared kind agrees with the detail shape.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::MalformedDefinition` when they disagree.
    pub fn expect_kind(self, declared: CouponKind) -> Result<Self, CouponError> {
        if self.kind() == declared {
            Ok(self)
        } else {
            Err(CouponError::malformed(
                declared,
                format!("details describe a {} coupon", self.kind()),
            ))
        }
    }
}

/// A stored coupon: its id and definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon<'a> {
    id: CouponId,
    definition: CouponDefinition<'a>,
}

impl<'a> Coupon<'a> {
    /// Create a new coupon.
    pub fn new(id: CouponId, definition: CouponDefinition<'a>) -> Self {
        Self { id, definition }
    }

    /// Return the coupon id
    pub fn id(&self) -> CouponId {
        self.id
    }

    /// Return the coupon kind
    pub fn kind(&self) -> CouponKind {
        self.definition.kind()
    }

    /// Return the coupon definition
    pub fn definition(&self) -> &CouponDefinition<'a> {
        &self.definition
    }

    /// Whether the coupon has expired as of `today`.
    pub fn is_expired(&self, today: Date) -> bool {
        self.definition.is_expired(today)
    }
}
