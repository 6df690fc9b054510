use crate::core::persistence::CartPersistence;
use crate::domain::model::{Cart, CartSummary, MenuItem};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{CartError, Result};

/// A view's in-memory cart, rehydrated on entry and written through on every
/// mutation.
///
/// If the write-through fails the in-memory change is kept and the store error
/// is returned; the next successful save catches the store up.
pub struct CartStore<S: KeyValueStore> {
    cart: Cart,
    persistence: CartPersistence<S>,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn open(persistence: CartPersistence<S>) -> Self {
        let cart = persistence.load();
        Self { cart, persistence }
    }

    /// Discards in-memory state and re-reads the stored cart, for a view that
    /// is being re-entered.
    pub fn reload(&mut self) {
        self.cart = self.persistence.load();
    }

    /// Adds one unit of `item`. An item with a negative or non-finite price is
    /// refused with [`CartError::InvalidItem`] and nothing changes.
    pub fn add_item(&mut self, item: &MenuItem) -> Result<()> {
        let quantity = self.cart.increment(item).map_err(|e| {
            tracing::warn!("Refused to add {}: {}", item.id, e);
            CartError::from(e)
        })?;
        tracing::debug!("Added {} ({}), quantity now {}", item.id, item.name, quantity);
        self.persistence.save(&self.cart)
    }

    pub fn remove_item(&mut self, item: &MenuItem) -> Result<()> {
        self.remove_id(&item.id)
    }

    /// Removes one unit by id. An id that is not in the cart is ignored and the
    /// store is not written at all, so a stale view cannot clobber a newer cart
    /// saved by another view. Call [`CartStore::persist`] to force a re-save.
    pub fn remove_id(&mut self, id: &str) -> Result<()> {
        match self.cart.decrement(id) {
            Some(remaining) => {
                tracing::debug!("Removed one {}, quantity now {}", id, remaining);
                self.persistence.save(&self.cart)
            }
            None => {
                tracing::debug!("Remove ignored, {} is not in the cart", id);
                Ok(())
            }
        }
    }

    pub fn quantity_of(&self, id: &str) -> u32 {
        self.cart.quantity_of(id)
    }

    pub fn total_count(&self) -> u64 {
        self.cart.total_count()
    }

    pub fn total_price(&self) -> f64 {
        self.cart.total_price()
    }

    pub fn can_checkout(&self) -> bool {
        self.total_count() > 0
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.cart)
    }

    /// Writes the current cart even if nothing changed since the last save.
    pub fn persist(&self) -> Result<()> {
        self.persistence.save(&self.cart)
    }

    pub fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }
}
