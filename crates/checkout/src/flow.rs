//! Checkout flow orchestration.

use std::time::Instant;

use common::Route;
use session::SessionContext;
use tokio::sync::watch;

use crate::order::{Order, OrderItemRequest};
use crate::ports::orders::{OrdersGateway, VerifyPaymentRequest};
use crate::ports::widget::{PaymentWidget, WidgetOutcome, WidgetPrefill, WidgetRequest};
use crate::state::CheckoutState;

/// How a checkout attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Payment verified and the order confirmed. The cart has been cleared.
    Completed { order: Order },

    /// Nobody is signed in. The shopper should sign in and come back to
    /// `resume_from`.
    SignInRequired { resume_from: Route },

    /// The account has no deliverable address yet.
    AddressRequired,

    /// The shopper closed the widget without paying. The pending order and
    /// the cart are both still there.
    Abandoned,

    /// The attempt failed. `reason` is the message the shopper reads.
    Failed { reason: String },
}

/// Drives one checkout attempt at a time against the orders backend and the
/// payment widget.
///
/// The flow walks load widget → create order → await payment → verify, and
/// publishes each [`CheckoutState`] it enters on a watch channel so the
/// surface can render the attempt live. Running takes `&mut self`, so a
/// second attempt cannot start while one is in flight.
pub struct CheckoutFlow<O, W>
where
    O: OrdersGateway,
    W: PaymentWidget,
{
    orders: O,
    widget: W,
    state: watch::Sender<CheckoutState>,
}

impl<O, W> CheckoutFlow<O, W>
where
    O: OrdersGateway,
    W: PaymentWidget,
{
    /// Creates a new checkout flow in the idle state.
    pub fn new(orders: O, widget: W) -> Self {
        Self {
            orders,
            widget,
            state: watch::Sender::new(CheckoutState::Idle),
        }
    }

    /// The state the flow is in right now.
    pub fn state(&self) -> CheckoutState {
        *self.state.borrow()
    }

    /// Subscribes to state changes for the lifetime of the flow.
    pub fn watch_state(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    fn set_state(&self, state: CheckoutState) {
        tracing::debug!(%state, "checkout state");
        self.state.send_replace(state);
    }

    /// Runs one checkout attempt for the session's cart.
    ///
    /// The sign-in and address gates run first and end the attempt without
    /// touching the backend. After a successful verification the cart is
    /// cleared; on any failure or dismissal it is left exactly as it was.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn run(&mut self, ctx: &mut SessionContext) -> CheckoutOutcome {
        metrics::counter!("checkout_attempts_total").increment(1);
        let attempt_start = Instant::now();

        if self.state().is_terminal() {
            self.set_state(CheckoutState::Idle);
        }

        // 1. Gates: signed in, with somewhere to ship to.
        let Some(user) = ctx.current_user() else {
            tracing::info!("checkout needs sign-in");
            return CheckoutOutcome::SignInRequired {
                resume_from: Route::Cart,
            };
        };
        if !user.has_delivery_address() {
            tracing::info!("checkout needs a delivery address");
            return CheckoutOutcome::AddressRequired;
        }
        let prefill = WidgetPrefill {
            name: user.name.clone(),
            email: user.email.clone(),
            contact: user.phone.clone().unwrap_or_default(),
        };

        // 2. Make sure the widget can open.
        self.set_state(CheckoutState::LoadingWidget);
        if let Err(e) = self.widget.ensure_loaded().await {
            return self.fail(attempt_start, e.to_string());
        }

        // 3. Create the order and its payment order.
        self.set_state(CheckoutState::CreatingOrder);
        let items: Vec<OrderItemRequest> = ctx
            .cart
            .cart
            .order_items()
            .into_iter()
            .map(|(product_id, quantity)| OrderItemRequest::new(product_id, quantity))
            .collect();
        let session = match self.orders.create_checkout(items).await {
            Ok(session) => session,
            Err(e) => return self.fail(attempt_start, e.to_string()),
        };

        // 4. Open the widget and wait for the shopper.
        self.set_state(CheckoutState::AwaitingPayment);
        let request = WidgetRequest::new(&session.key_id, &session.widget_order, prefill);
        let handle = self.widget.open(request).await;
        let confirmation = match handle.outcome().await {
            WidgetOutcome::Confirmed(confirmation) => confirmation,
            WidgetOutcome::Dismissed => {
                self.set_state(CheckoutState::Idle);
                metrics::counter!("checkout_abandoned").increment(1);
                metrics::histogram!("checkout_duration_seconds")
                    .record(attempt_start.elapsed().as_secs_f64());
                tracing::info!(order_id = %session.order.id, "checkout abandoned at the widget");
                return CheckoutOutcome::Abandoned;
            }
        };

        // 5. Verify the payment proof.
        self.set_state(CheckoutState::Verifying);
        let verify = VerifyPaymentRequest {
            order_id: session.order.id.clone(),
            widget_order_id: confirmation.widget_order_id,
            widget_payment_id: confirmation.widget_payment_id,
            widget_signature: confirmation.widget_signature,
        };
        let order = match self.orders.verify_payment(verify).await {
            Ok(order) => order,
            Err(e) => return self.fail(attempt_start, e.to_string()),
        };

        // 6. Paid. The cart is spent.
        ctx.cart.cart.clear();
        self.set_state(CheckoutState::Succeeded);
        let duration = attempt_start.elapsed().as_secs_f64();
        metrics::histogram!("checkout_duration_seconds").record(duration);
        metrics::counter!("checkout_completed").increment(1);
        tracing::info!(order_id = %order.id, duration, "checkout completed");

        CheckoutOutcome::Completed { order }
    }

    fn fail(&self, attempt_start: Instant, reason: String) -> CheckoutOutcome {
        self.set_state(CheckoutState::Failed);
        metrics::counter!("checkout_failed").increment(1);
        metrics::histogram!("checkout_duration_seconds")
            .record(attempt_start.elapsed().as_secs_f64());
        tracing::warn!(%reason, "checkout failed");
        CheckoutOutcome::Failed { reason }
    }
}
