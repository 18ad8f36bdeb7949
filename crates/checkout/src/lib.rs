//! Checkout orchestration for the storefront.
//!
//! One checkout attempt walks four steps against two outside parties:
//!
//! 1. Load the payment widget
//! 2. Create the order and its payment order on the backend
//! 3. Open the widget and wait for the shopper to pay or walk away
//! 4. Verify the payment proof on the backend
//!
//! The sign-in and delivery-address gates run before step 1 and end the
//! attempt without touching the network. The cart is cleared only after
//! step 4 succeeds; dismissing the widget at step 3 returns the attempt to
//! idle with the cart untouched, and every failure carries the message the
//! shopper reads, word for word.

pub mod error;
pub mod flow;
pub mod order;
pub mod ports;
pub mod state;

pub use error::{CheckoutError, Result};
pub use flow::{CheckoutFlow, CheckoutOutcome};
pub use order::{Order, OrderItemRequest, OrderLine, OrderStatus, ShippingAddress, TrackingEntry};
pub use ports::orders::{
    CheckoutSession, InMemoryOrdersGateway, OrdersGateway, VerifyPaymentRequest, WidgetOrder,
};
pub use ports::widget::{
    CHECKOUT_DESCRIPTION, CHECKOUT_DISPLAY_NAME, DEFAULT_THEME_COLOR, PaymentConfirmation,
    PaymentControl, PaymentHandle, PaymentWidget, ScriptedWidget, WidgetOutcome, WidgetPrefill,
    WidgetRequest, WidgetScript, payment_channel,
};
pub use state::CheckoutState;
