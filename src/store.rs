//! Coupon Store
//!
//! Where coupon definitions come from. Evaluation only needs to read them, via
//! [`CouponSource`]; [`InMemoryCouponStore`] also supports managing them.

use std::collections::BTreeMap;

use tracing::info;

use crate::coupons::{Coupon, CouponDefinition, CouponError, CouponId};

/// Read access to stored coupons.
pub trait CouponSource<'a> {
    /// Fetch one coupon.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::NotFound` if no coupon has the given id.
    fn get(&self, id: CouponId) -> Result<Coupon<'a>, CouponError>;

    /// Every stored coupon, in a stable order.
    fn all(&self) -> Vec<Coupon<'a>>;
}

/// Coupons held in memory, keyed and ordered by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCouponStore<'a> {
    coupons: BTreeMap<CouponId, CouponDefinition<'a>>,
    last_id: u32,
}

impl<'a> InMemoryCouponStore<'a> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new coupon under the next free id. Ids start at 1.
    pub fn create(&mut self, definition: CouponDefinition<'a>) -> Coupon<'a> {
        self.last_id = self.last_id.saturating_add(1);

        let id = CouponId::new(self.last_id);

        info!(coupon = %id, kind = %definition.kind(), "created coupon");

        self.coupons.insert(id, definition.clone());

        Coupon::new(id, definition)
    }

    /// Store a coupon under its own id.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::AlreadyExists` if the id is taken.
    pub fn insert(&mut self, coupon: Coupon<'a>) -> Result<(), CouponError> {
        let id = coupon.id();

        if self.coupons.contains_key(&id) {
            return Err(CouponError::AlreadyExists(id));
        }

        info!(coupon = %id, kind = %coupon.kind(), "inserted coupon");

        self.last_id = self.last_id.max(id.get());
        self.coupons.insert(id, coupon.definition().clone());

        Ok(())
    }

    /// Replace the definition of an existing coupon.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::NotFound` if no coupon has the given id.
    pub fn update(
        &mut self,
        id: CouponId,
        definition: CouponDefinition<'a>,
    ) -> Result<Coupon<'a>, CouponError> {
        let stored = self
            .coupons
            .get_mut(&id)
            .ok_or(CouponError::NotFound(id))?;

        info!(coupon = %id, kind = %definition.kind(), "updated coupon");

        stored.clone_from(&definition);

        Ok(Coupon::new(id, definition))
    }

    /// Remove a coupon, returning it.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::NotFound` if no coupon has the given id.
    pub fn delete(&mut self, id: CouponId) -> Result<Coupon<'a>, CouponError> {
        let definition = self.coupons.remove(&id).ok_or(CouponError::NotFound(id))?;

        info!(coupon = %id, "deleted coupon");

        Ok(Coupon::new(id, definition))
    }

    /// Number of stored coupons
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

impl<'a> CouponSource<'a> for InMemoryCouponStore<'a> {
    fn get(&self, id: CouponId) -> Result<Coupon<'a>, CouponError> {
        self.coupons
            .get(&id)
            .map(|definition| Coupon::new(id, definition.clone()))
            .ok_or(CouponError::NotFound(id))
    }

    fn all(&self) -> Vec<Coupon<'a>> {
        self.coupons
            .iter()
            .map(|(id, definition)| Coupon::new(*id, definition.clone()))
            .collect()
    }
}

impl<'a> FromIterator<CouponDefinition<'a>> for InMemoryCouponStore<'a> {
    fn from_iter<I: IntoIterator<Item = CouponDefinition<'a>>>(definitions: I) -> Self {
        let mut store = Self::new();

        for definition in definitions {
            store.create(definition);
        }

        store
    }
}
