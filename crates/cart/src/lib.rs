//! Shopping cart state for the storefront.
//!
//! The cart is an in-memory line collection keyed by product. Totals are
//! always derived from the lines at call time, never cached, so every read
//! reflects the lines exactly. Alongside the cart itself this crate carries
//! the delivery pricing rule, the flying-item animation queue and the badge
//! pulse timer, composed into a [`CartSession`] that mirrors what a shopper
//! sees: lines, totals, in-flight thumbnails and a bouncing count badge.

pub mod delivery;
pub mod flight;
pub mod pulse;
pub mod session;
pub mod store;

pub use delivery::{DELIVERY_FEE, DeliveryQuote, FREE_DELIVERY_THRESHOLD};
pub use flight::{FlightQueue, FlyingItem, PointerOrigin};
pub use pulse::{BOUNCE_DURATION, BadgePulse};
pub use session::CartSession;
pub use store::{Cart, CartLine};
