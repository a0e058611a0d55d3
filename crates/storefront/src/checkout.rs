//! Simulated checkout receipt.
//!
//! Checkout never talks to anything: it summarizes the cart, hands the
//! summary back, and the controller clears local state. Receipts are not
//! persisted.

use bazaar_core::Price;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::cart::CartStore;

/// Alert shown when checkout is attempted on an empty cart.
pub const EMPTY_CART_ALERT: &str = "Your cart is empty!";

/// Summary of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub confirmation: Uuid,
    pub total: Price,
    pub items: u64,
    pub lines: usize,
    pub placed_at: DateTime<Utc>,
}

impl Receipt {
    /// Summarize the current contents of `cart`.
    #[must_use]
    pub fn for_cart(cart: &CartStore) -> Self {
        Self {
            confirmation: Uuid::new_v4(),
            total: cart.total(),
            items: cart.count(),
            lines: cart.entries().len(),
            placed_at: Utc::now(),
        }
    }

    /// Thank-you message shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Thank you for your purchase!\nTotal Amount: {}", self.total)
    }
}
