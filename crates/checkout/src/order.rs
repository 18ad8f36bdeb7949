//! Orders as the backend reports them.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};
use session::Address;

/// Fulfilment status of an order.
///
/// Status transitions:
/// ```text
/// PaymentPending ──► Confirmed ──► Packed ──► Shipped ──► Delivered
///        │               │           │           │
///        └───────────────┴───────────┴───────────┴──► Cancelled
/// ```
///
/// The string form is the wire form, so `as_str` and serde agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created but not yet paid for.
    #[default]
    PaymentPending,

    /// Payment verified; the seller has the order.
    Confirmed,

    /// Packed and ready to hand to the courier.
    Packed,

    /// With the courier.
    Shipped,

    /// Delivered to the shopper (terminal state).
    Delivered,

    /// Cancelled before delivery (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true once payment has been verified.
    pub fn is_paid(&self) -> bool {
        matches!(
            self,
            OrderStatus::Confirmed
                | OrderStatus::Packed
                | OrderStatus::Shipped
                | OrderStatus::Delivered
        )
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns true if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether fulfilment may move from this status to `next`.
    ///
    /// Fulfilment advances one step at a time; cancellation is allowed from
    /// any non-terminal status.
    pub fn can_advance_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (OrderStatus::PaymentPending, OrderStatus::Confirmed) => true,
            (OrderStatus::Confirmed, OrderStatus::Packed) => true,
            (OrderStatus::Packed, OrderStatus::Shipped) => true,
            (OrderStatus::Shipped, OrderStatus::Delivered) => true,
            (current, OrderStatus::Cancelled) => !current.is_terminal(),
            _ => false,
        }
    }

    /// Returns the status in its wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PaymentPending => "payment_pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of a placed order. Name and price are frozen at order time;
/// the seller is recorded so marketplace payouts know whose sale it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub seller: Option<UserId>,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

/// One fulfilment update on an order's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEntry {
    pub status: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Where the order ships, with the recipient's name and phone alongside
/// the account address fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Address,
}

/// A placed order as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderLine>,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
    pub status: OrderStatus,
    pub tracking: Vec<TrackingEntry>,
    pub shipping_address: Option<ShippingAddress>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    pub fn is_paid(&self) -> bool {
        self.status.is_paid()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// What checkout submits per cart line: which product and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderItemRequest {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}
