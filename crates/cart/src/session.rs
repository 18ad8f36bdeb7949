use std::time::Instant;

use catalog::ProductSnapshot;
use common::Money;

use crate::delivery::DeliveryQuote;
use crate::flight::{FlightQueue, PointerOrigin};
use crate::pulse::BadgePulse;
use crate::store::Cart;

/// Everything the shopper's cart surface needs in one place: the lines, the
/// thumbnails currently flying toward the badge and the badge bounce timer.
///
/// The pieces stay independently usable; this wrapper exists because a
/// single add touches all three at once.
#[derive(Debug, Clone, Default)]
pub struct CartSession {
    pub cart: Cart,
    pub flights: FlightQueue,
    pub badge: BadgePulse,
}

impl CartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the product and drives the add feedback.
    ///
    /// When an origin is given a thumbnail flight launches from it using the
    /// product's primary image. The badge pulses on every add. Returns the
    /// resulting line quantity.
    pub fn add_to_cart(
        &mut self,
        product: ProductSnapshot,
        origin: Option<PointerOrigin>,
        now: Instant,
    ) -> u32 {
        if let Some(origin) = origin {
            let image = product.primary_image().unwrap_or_default().to_string();
            self.flights.launch(image, origin);
        }
        let quantity = self.cart.add(product);
        self.badge.pulse(now);
        quantity
    }

    /// Adds several units of the product, launching at most one flight.
    ///
    /// The product detail page adds unit by unit so quantities merge into a
    /// single line, but only the first add carries the pointer origin.
    /// Returns the resulting line quantity.
    pub fn add_many(
        &mut self,
        product: &ProductSnapshot,
        quantity: u32,
        origin: Option<PointerOrigin>,
        now: Instant,
    ) -> u32 {
        for i in 0..quantity {
            let origin = if i == 0 { origin } else { None };
            self.add_to_cart(product.clone(), origin, now);
        }
        self.cart
            .line(&product.id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Delivery quote for the cart's current subtotal.
    pub fn delivery_quote(&self) -> DeliveryQuote {
        DeliveryQuote::for_subtotal(self.cart.subtotal())
    }

    /// Subtotal of the cart lines.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }
}
