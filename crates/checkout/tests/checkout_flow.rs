//! Checkout flow integration tests
//!
//! These drive a full attempt against the in-memory gateway and the
//! scripted widget, including suspension at the open widget while the
//! shopper decides.

use std::time::Instant;

use catalog::{Category, ProductSnapshot, SellerRef};
use checkout::{
    CheckoutFlow, CheckoutOutcome, CheckoutState, InMemoryOrdersGateway, OrderStatus,
    PaymentConfirmation, ScriptedWidget, WidgetScript,
};
use common::{Money, OrderId, ProductId, UserId};
use session::{Address, AuthUser, Session, SessionContext, UserRole};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn product(id: &str, price_rupees: i64) -> ProductSnapshot {
    ProductSnapshot {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        category: Category::Saree,
        sub_category: "Silk".to_string(),
        price: Money::from_rupees(price_rupees),
        original_price: None,
        description: String::new(),
        images: vec![format!("https://img.example/{id}.jpg")],
        seller: SellerRef {
            id: UserId::new("seller-1"),
            name: "Kanchi Silks".to_string(),
        },
        stock: 10,
        rating: 4.6,
        review_count: 15,
        is_featured: false,
    }
}

fn signed_in_ctx() -> SessionContext {
    let mut ctx = SessionContext::new();
    ctx.sign_in(Session {
        token: "tok_abc123".to_string(),
        user: AuthUser {
            id: UserId::new("u1"),
            name: "Meera Iyer".to_string(),
            email: "meera@example.com".to_string(),
            role: UserRole::Customer,
            store_name: None,
            phone: Some("9876543210".to_string()),
            address: Some(Address {
                line1: Some("12 Temple Street".to_string()),
                city: Some("Chennai".to_string()),
                ..Address::default()
            }),
        },
    });
    let now = Instant::now();
    ctx.cart.add_to_cart(product("p1", 4000), None, now);
    ctx.cart.add_to_cart(product("p1", 4000), None, now);
    ctx.cart.add_to_cart(product("p2", 6000), None, now);
    ctx
}

fn setup() -> (
    CheckoutFlow<InMemoryOrdersGateway, ScriptedWidget>,
    InMemoryOrdersGateway,
    ScriptedWidget,
) {
    let gateway = InMemoryOrdersGateway::new();
    gateway.add_product(&product("p1", 4000));
    gateway.add_product(&product("p2", 6000));
    let widget = ScriptedWidget::new();
    let flow = CheckoutFlow::new(gateway.clone(), widget.clone());
    (flow, gateway, widget)
}

#[tokio::test]
async fn completes_and_clears_the_cart() {
    init_tracing();
    let (mut flow, gateway, _widget) = setup();
    let mut ctx = signed_in_ctx();

    let outcome = flow.run(&mut ctx).await;

    let CheckoutOutcome::Completed { order } = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(order.subtotal, Money::from_rupees(14000));
    assert!(order.shipping.is_zero());
    assert_eq!(order.total, Money::from_rupees(14000));
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert!(ctx.cart.cart.is_empty());
    assert_eq!(flow.state(), CheckoutState::Succeeded);
    assert_eq!(gateway.create_call_count(), 1);
    assert_eq!(gateway.verify_call_count(), 1);
}

#[tokio::test]
async fn widget_opens_with_the_order_amount_and_prefill() {
    init_tracing();
    let (mut flow, _gateway, widget) = setup();
    let mut ctx = signed_in_ctx();

    flow.run(&mut ctx).await;

    let request = widget.last_request().unwrap();
    assert_eq!(request.key_id, "key_test_0001");
    assert_eq!(request.amount, Money::from_rupees(14000));
    assert_eq!(request.currency, "INR");
    assert_eq!(request.prefill.name, "Meera Iyer");
    assert_eq!(request.prefill.email, "meera@example.com");
    assert_eq!(request.prefill.contact, "9876543210");
    assert_eq!(request.display_name, "RatnaMayuri");
}

#[tokio::test]
async fn suspends_at_the_widget_until_the_shopper_pays() {
    init_tracing();
    let (flow, _gateway, widget) = setup();
    widget.set_script(WidgetScript::Manual);
    let ctx = signed_in_ctx();

    let mut watcher = flow.watch_state();
    let task = tokio::spawn(async move {
        let mut flow = flow;
        let mut ctx = ctx;
        let outcome = flow.run(&mut ctx).await;
        (flow, ctx, outcome)
    });

    watcher
        .wait_for(|s| *s == CheckoutState::AwaitingPayment)
        .await
        .unwrap();
    let control = loop {
        if let Some(control) = widget.take_control() {
            break control;
        }
        tokio::task::yield_now().await;
    };
    assert!(!task.is_finished());

    control.confirm(PaymentConfirmation {
        widget_order_id: "wo_000001".to_string(),
        widget_payment_id: "pay_000001".to_string(),
        widget_signature: "sig_000001".to_string(),
    });

    let (flow, ctx, outcome) = task.await.unwrap();
    assert!(matches!(outcome, CheckoutOutcome::Completed { .. }));
    assert_eq!(flow.state(), CheckoutState::Succeeded);
    assert!(ctx.cart.cart.is_empty());
}

#[tokio::test]
async fn dismissal_abandons_and_keeps_everything() {
    init_tracing();
    let (flow, gateway, widget) = setup();
    widget.set_script(WidgetScript::Manual);
    let ctx = signed_in_ctx();

    let mut watcher = flow.watch_state();
    let task = tokio::spawn(async move {
        let mut flow = flow;
        let mut ctx = ctx;
        let outcome = flow.run(&mut ctx).await;
        (flow, ctx, outcome)
    });

    watcher
        .wait_for(|s| *s == CheckoutState::AwaitingPayment)
        .await
        .unwrap();
    let control = loop {
        if let Some(control) = widget.take_control() {
            break control;
        }
        tokio::task::yield_now().await;
    };
    control.dismiss();

    let (flow, ctx, outcome) = task.await.unwrap();
    assert_eq!(outcome, CheckoutOutcome::Abandoned);
    assert_eq!(flow.state(), CheckoutState::Idle);
    assert_eq!(ctx.cart.cart.item_count(), 3);
    assert_eq!(gateway.verify_call_count(), 0);

    // The pending order is still there, unpaid.
    let pending = gateway.order(&OrderId::new("ORD-0001")).unwrap();
    assert_eq!(pending.status, OrderStatus::PaymentPending);
}

#[tokio::test]
async fn verification_rejection_keeps_the_cart_and_does_not_retry() {
    init_tracing();
    let (mut flow, gateway, _widget) = setup();
    gateway.set_fail_on_verify(true);
    let mut ctx = signed_in_ctx();

    let outcome = flow.run(&mut ctx).await;

    assert_eq!(
        outcome,
        CheckoutOutcome::Failed {
            reason: "Invalid payment signature".to_string()
        }
    );
    assert_eq!(flow.state(), CheckoutState::Failed);
    assert_eq!(ctx.cart.cart.item_count(), 3);
    assert_eq!(gateway.verify_call_count(), 1);
}

#[tokio::test]
async fn a_fresh_attempt_after_dismissal_succeeds() {
    init_tracing();
    let (flow, gateway, widget) = setup();
    widget.set_script(WidgetScript::Manual);
    let ctx = signed_in_ctx();

    let mut watcher = flow.watch_state();
    let task = tokio::spawn(async move {
        let mut flow = flow;
        let mut ctx = ctx;
        let outcome = flow.run(&mut ctx).await;
        (flow, ctx, outcome)
    });
    watcher
        .wait_for(|s| *s == CheckoutState::AwaitingPayment)
        .await
        .unwrap();
    let control = loop {
        if let Some(control) = widget.take_control() {
            break control;
        }
        tokio::task::yield_now().await;
    };
    control.dismiss();
    let (mut flow, mut ctx, outcome) = task.await.unwrap();
    assert_eq!(outcome, CheckoutOutcome::Abandoned);

    widget.set_script(WidgetScript::Confirm);
    let second = flow.run(&mut ctx).await;

    assert!(matches!(second, CheckoutOutcome::Completed { .. }));
    assert!(ctx.cart.cart.is_empty());
    assert_eq!(gateway.order_count(), 2);
}
