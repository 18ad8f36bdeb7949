//! Orders gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use cart::DeliveryQuote;
use catalog::ProductSnapshot;
use chrono::Utc;
use common::{Money, OrderId, ProductId};

use crate::error::{CheckoutError, Result};
use crate::order::{Order, OrderItemRequest, OrderLine, OrderStatus, TrackingEntry};

/// The payment order the widget opens against: the gateway-side id, the
/// amount due and its currency.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOrder {
    pub id: String,
    pub amount: Money,
    pub currency: String,
}

/// What the backend hands back when checkout starts: the pending order,
/// the payment order for the widget and the key that opens it.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub order: Order,
    pub widget_order: WidgetOrder,
    pub key_id: String,
}

/// Payment proof sent back for verification, tying the storefront order to
/// the widget's order, payment and signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPaymentRequest {
    pub order_id: OrderId,
    pub widget_order_id: String,
    pub widget_payment_id: String,
    pub widget_signature: String,
}

/// Trait for the backend operations checkout needs.
#[async_trait]
pub trait OrdersGateway: Send + Sync {
    /// Creates a pending order and its payment order from the cart lines.
    async fn create_checkout(&self, items: Vec<OrderItemRequest>) -> Result<CheckoutSession>;

    /// Submits the payment proof. Returns the confirmed order.
    async fn verify_payment(&self, request: VerifyPaymentRequest) -> Result<Order>;
}

#[derive(Debug, Default)]
struct InMemoryOrdersState {
    products: HashMap<ProductId, (String, Money)>,
    orders: HashMap<OrderId, Order>,
    next_id: u32,
    fail_on_create: bool,
    fail_on_verify: bool,
    create_calls: u32,
    verify_calls: u32,
}

/// In-memory orders gateway for testing.
///
/// Prices orders the same way the real backend does (line totals plus the
/// delivery rule) and confirms them on verification.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrdersGateway {
    state: Arc<RwLock<InMemoryOrdersState>>,
}

impl InMemoryOrdersGateway {
    /// Creates a new in-memory orders gateway with an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product so orders can reference it.
    pub fn add_product(&self, product: &ProductSnapshot) {
        self.state.write().unwrap().products.insert(
            product.id.clone(),
            (product.name.clone(), product.price),
        );
    }

    /// Configures the gateway to reject order creation.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Configures the gateway to reject payment verification.
    pub fn set_fail_on_verify(&self, fail: bool) {
        self.state.write().unwrap().fail_on_verify = fail;
    }

    /// Returns the order stored under `id`, if any.
    pub fn order(&self, id: &OrderId) -> Option<Order> {
        self.state.read().unwrap().orders.get(id).cloned()
    }

    /// Returns the number of orders created so far.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }

    /// Returns how many times order creation was attempted.
    pub fn create_call_count(&self) -> u32 {
        self.state.read().unwrap().create_calls
    }

    /// Returns how many times verification was attempted.
    pub fn verify_call_count(&self) -> u32 {
        self.state.read().unwrap().verify_calls
    }
}

#[async_trait]
impl OrdersGateway for InMemoryOrdersGateway {
    async fn create_checkout(&self, items: Vec<OrderItemRequest>) -> Result<CheckoutSession> {
        let mut state = self.state.write().unwrap();
        state.create_calls += 1;

        if state.fail_on_create {
            return Err(CheckoutError::OrderRejected("Insufficient stock".to_string()));
        }
        if items.is_empty() {
            return Err(CheckoutError::OrderRejected("No order items".to_string()));
        }

        let mut lines = Vec::with_capacity(items.len());
        for item in &items {
            let (name, price) = state
                .products
                .get(&item.product_id)
                .cloned()
                .ok_or_else(|| {
                    CheckoutError::OrderRejected(format!(
                        "Product not found: {}",
                        item.product_id
                    ))
                })?;
            lines.push(OrderLine {
                product: item.product_id.clone(),
                name,
                price,
                quantity: item.quantity,
                seller: None,
            });
        }

        let subtotal = lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total());
        let quote = DeliveryQuote::for_subtotal(subtotal);

        state.next_id += 1;
        let order = Order {
            id: OrderId::new(format!("ORD-{:04}", state.next_id)),
            items: lines,
            subtotal,
            shipping: quote.shipping,
            total: quote.total,
            status: OrderStatus::PaymentPending,
            tracking: vec![],
            shipping_address: None,
            created_at: Utc::now(),
        };
        let widget_order = WidgetOrder {
            id: format!("wo_{:06}", state.next_id),
            amount: quote.total,
            currency: "INR".to_string(),
        };
        state.orders.insert(order.id.clone(), order.clone());

        Ok(CheckoutSession {
            order,
            widget_order,
            key_id: "key_test_0001".to_string(),
        })
    }

    async fn verify_payment(&self, request: VerifyPaymentRequest) -> Result<Order> {
        let mut state = self.state.write().unwrap();
        state.verify_calls += 1;

        if state.fail_on_verify {
            return Err(CheckoutError::VerificationRejected(
                "Invalid payment signature".to_string(),
            ));
        }

        let order = state
            .orders
            .get_mut(&request.order_id)
            .ok_or_else(|| CheckoutError::VerificationRejected("Order not found".to_string()))?;
        order.status = OrderStatus::Confirmed;
        order.tracking.push(TrackingEntry {
            status: "confirmed".to_string(),
            message: Some("Payment received".to_string()),
            created_at: Utc::now(),
        });

        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use catalog::{Category, SellerRef};
    use common::UserId;

    use super::*;

    fn product(id: &str, price_rupees: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: Category::Jewellery,
            sub_category: "Necklaces".to_string(),
            price: Money::from_rupees(price_rupees),
            original_price: None,
            description: String::new(),
            images: vec![],
            seller: SellerRef {
                id: UserId::new("seller-1"),
                name: "Kanchi Silks".to_string(),
            },
            stock: 10,
            rating: 4.5,
            review_count: 8,
            is_featured: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_verify() {
        let gateway = InMemoryOrdersGateway::new();
        gateway.add_product(&product("p1", 4000));

        let session = gateway
            .create_checkout(vec![OrderItemRequest::new(ProductId::new("p1"), 1)])
            .await
            .unwrap();

        assert_eq!(session.order.id.as_str(), "ORD-0001");
        assert_eq!(session.order.status, OrderStatus::PaymentPending);
        assert_eq!(session.order.subtotal, Money::from_rupees(4000));
        assert_eq!(session.order.shipping, Money::from_rupees(299));
        assert_eq!(session.widget_order.id, "wo_000001");
        assert_eq!(session.widget_order.amount, Money::from_rupees(4299));
        assert_eq!(session.widget_order.currency, "INR");
        assert_eq!(session.key_id, "key_test_0001");

        let confirmed = gateway
            .verify_payment(VerifyPaymentRequest {
                order_id: session.order.id.clone(),
                widget_order_id: session.widget_order.id.clone(),
                widget_payment_id: "pay_000001".to_string(),
                widget_signature: "sig_000001".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(confirmed.status, OrderStatus::Confirmed);
        assert_eq!(confirmed.tracking.len(), 1);
        assert_eq!(confirmed.tracking[0].status, "confirmed");
        assert_eq!(gateway.create_call_count(), 1);
        assert_eq!(gateway.verify_call_count(), 1);
    }

    #[tokio::test]
    async fn test_free_delivery_at_threshold() {
        let gateway = InMemoryOrdersGateway::new();
        gateway.add_product(&product("p1", 2500));

        let session = gateway
            .create_checkout(vec![OrderItemRequest::new(ProductId::new("p1"), 2)])
            .await
            .unwrap();

        assert_eq!(session.order.subtotal, Money::from_rupees(5000));
        assert!(session.order.shipping.is_zero());
        assert_eq!(session.widget_order.amount, Money::from_rupees(5000));
    }

    #[tokio::test]
    async fn test_empty_items_are_rejected() {
        let gateway = InMemoryOrdersGateway::new();

        let result = gateway.create_checkout(vec![]).await;

        match result {
            Err(CheckoutError::OrderRejected(message)) => {
                assert_eq!(message, "No order items");
            }
            other => panic!("expected OrderRejected, got {other:?}"),
        }
        assert_eq!(gateway.order_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected() {
        let gateway = InMemoryOrdersGateway::new();

        let result = gateway
            .create_checkout(vec![OrderItemRequest::new(ProductId::new("ghost"), 1)])
            .await;

        match result {
            Err(CheckoutError::OrderRejected(message)) => {
                assert_eq!(message, "Product not found: ghost");
            }
            other => panic!("expected OrderRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fail_on_create() {
        let gateway = InMemoryOrdersGateway::new();
        gateway.add_product(&product("p1", 4000));
        gateway.set_fail_on_create(true);

        let result = gateway
            .create_checkout(vec![OrderItemRequest::new(ProductId::new("p1"), 1)])
            .await;

        assert!(matches!(result, Err(CheckoutError::OrderRejected(_))));
        assert_eq!(gateway.order_count(), 0);
        assert_eq!(gateway.create_call_count(), 1);
    }

    #[tokio::test]
    async fn test_fail_on_verify_keeps_order_pending() {
        let gateway = InMemoryOrdersGateway::new();
        gateway.add_product(&product("p1", 4000));

        let session = gateway
            .create_checkout(vec![OrderItemRequest::new(ProductId::new("p1"), 1)])
            .await
            .unwrap();

        gateway.set_fail_on_verify(true);
        let result = gateway
            .verify_payment(VerifyPaymentRequest {
                order_id: session.order.id.clone(),
                widget_order_id: session.widget_order.id.clone(),
                widget_payment_id: "pay_000001".to_string(),
                widget_signature: "bad".to_string(),
            })
            .await;

        match result {
            Err(CheckoutError::VerificationRejected(message)) => {
                assert_eq!(message, "Invalid payment signature");
            }
            other => panic!("expected VerificationRejected, got {other:?}"),
        }
        let stored = gateway.order(&session.order.id).unwrap();
        assert_eq!(stored.status, OrderStatus::PaymentPending);
    }

    #[tokio::test]
    async fn test_sequential_order_ids() {
        let gateway = InMemoryOrdersGateway::new();
        gateway.add_product(&product("p1", 4000));

        let first = gateway
            .create_checkout(vec![OrderItemRequest::new(ProductId::new("p1"), 1)])
            .await
            .unwrap();
        let second = gateway
            .create_checkout(vec![OrderItemRequest::new(ProductId::new("p1"), 1)])
            .await
            .unwrap();

        assert_eq!(first.order.id.as_str(), "ORD-0001");
        assert_eq!(second.order.id.as_str(), "ORD-0002");
        assert_eq!(second.widget_order.id, "wo_000002");
    }
}
