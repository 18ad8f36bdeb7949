//! Delivery pricing.
//!
//! Orders at or above the free-delivery threshold ship free, everything
//! below pays a flat fee. The same rule runs on the cart page and at
//! checkout so the shopper never sees two different totals.

use common::Money;
use serde::{Deserialize, Serialize};

/// Subtotal at which delivery becomes free.
pub const FREE_DELIVERY_THRESHOLD: Money = Money::from_rupees(5000);

/// Flat delivery fee charged below the threshold.
pub const DELIVERY_FEE: Money = Money::from_rupees(299);

/// A priced delivery: the subtotal it was quoted for, the shipping charge
/// and the resulting order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryQuote {
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl DeliveryQuote {
    /// Quotes delivery for a subtotal. At or above
    /// [`FREE_DELIVERY_THRESHOLD`] shipping is zero, below it the flat
    /// [`DELIVERY_FEE`] applies.
    pub fn for_subtotal(subtotal: Money) -> Self {
        let shipping = if subtotal >= FREE_DELIVERY_THRESHOLD {
            Money::zero()
        } else {
            DELIVERY_FEE
        };
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    pub fn is_free_delivery(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more the shopper must add to reach free delivery. Zero once
    /// the threshold is met.
    pub fn amount_to_free_delivery(&self) -> Money {
        if self.subtotal >= FREE_DELIVERY_THRESHOLD {
            Money::zero()
        } else {
            FREE_DELIVERY_THRESHOLD - self.subtotal
        }
    }
}
