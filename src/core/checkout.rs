use crate::core::cart_store::CartStore;
use crate::domain::model::CartSummary;
use crate::domain::ports::{KeyValueStore, PaymentStage};
use crate::utils::error::{CartError, Result};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub summary: CartSummary,
    pub handed_off_at: DateTime<Utc>,
}

/// Hands a non-empty cart to the payment stage. The cart is left untouched;
/// clearing it belongs to whoever confirms the order.
pub struct CheckoutHandoff<P: PaymentStage> {
    payment: P,
}

impl<P: PaymentStage> CheckoutHandoff<P> {
    pub fn new(payment: P) -> Self {
        Self { payment }
    }

    pub fn payment_stage(&self) -> &P {
        &self.payment
    }

    pub fn handoff<S: KeyValueStore>(&self, store: &CartStore<S>) -> Result<Handoff> {
        if !store.can_checkout() {
            tracing::warn!("Checkout refused: cart is empty");
            return Err(CartError::EmptyCart);
        }

        // The payment stage reads the stored cart, so it must be current first.
        store.persist()?;

        let summary = store.summary();
        self.payment.begin_payment(&summary)?;

        tracing::info!(
            "Handed off {} items totalling {:.2} to payment",
            summary.item_count,
            summary.total_price
        );

        Ok(Handoff {
            summary,
            handed_off_at: Utc::now(),
        })
    }
}
