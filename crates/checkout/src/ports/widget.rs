//! Payment widget trait and scripted in-memory implementation.
//!
//! The widget is the gateway's own UI: checkout opens it and then waits.
//! The shopper either pays, which produces a [`PaymentConfirmation`], or
//! closes the widget, which produces nothing at all. That one-shot,
//! maybe-never reply is modelled as a channel: the widget holds the sending
//! half and checkout awaits the [`PaymentHandle`].

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::Money;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::error::{CheckoutError, Result};
use crate::ports::orders::WidgetOrder;

/// Store name shown in the widget header.
pub const CHECKOUT_DISPLAY_NAME: &str = "RatnaMayuri";

/// Line shown under the store name.
pub const CHECKOUT_DESCRIPTION: &str = "Secure checkout";

/// Brand colour the widget is themed with.
pub const DEFAULT_THEME_COLOR: &str = "#c79b4b";

/// Shopper details the widget pre-fills so nobody types their email twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Everything the widget needs to open a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetRequest {
    pub key_id: String,
    pub order_id: String,
    pub amount: Money,
    pub currency: String,
    pub prefill: WidgetPrefill,
    pub display_name: String,
    pub description: String,
    pub theme_color: String,
}

impl WidgetRequest {
    /// Builds a request for a payment order with the storefront's branding.
    pub fn new(key_id: impl Into<String>, order: &WidgetOrder, prefill: WidgetPrefill) -> Self {
        Self {
            key_id: key_id.into(),
            order_id: order.id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            prefill,
            display_name: CHECKOUT_DISPLAY_NAME.to_string(),
            description: CHECKOUT_DESCRIPTION.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
        }
    }
}

/// Proof of payment the widget hands back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub widget_order_id: String,
    pub widget_payment_id: String,
    pub widget_signature: String,
}

/// How a widget interaction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutcome {
    /// The shopper paid and the widget produced its proof.
    Confirmed(PaymentConfirmation),

    /// The widget closed without a payment.
    Dismissed,
}

/// Awaits the widget's reply. The reply may never come; the handle resolves
/// to [`WidgetOutcome::Dismissed`] once the widget gives up its sender.
#[derive(Debug)]
pub struct PaymentHandle {
    rx: oneshot::Receiver<PaymentConfirmation>,
}

impl PaymentHandle {
    /// Waits for the interaction to end.
    pub async fn outcome(self) -> WidgetOutcome {
        match self.rx.await {
            Ok(confirmation) => WidgetOutcome::Confirmed(confirmation),
            Err(_) => WidgetOutcome::Dismissed,
        }
    }
}

/// The widget's side of an open payment. Dropping it without confirming
/// counts as a dismissal.
#[derive(Debug)]
pub struct PaymentControl {
    tx: oneshot::Sender<PaymentConfirmation>,
}

impl PaymentControl {
    /// Completes the payment with the given proof.
    pub fn confirm(self, confirmation: PaymentConfirmation) {
        let _ = self.tx.send(confirmation);
    }

    /// Closes the widget without paying.
    pub fn dismiss(self) {
        drop(self.tx);
    }
}

/// Creates a linked control/handle pair for one widget interaction.
pub fn payment_channel() -> (PaymentControl, PaymentHandle) {
    let (tx, rx) = oneshot::channel();
    (PaymentControl { tx }, PaymentHandle { rx })
}

/// Trait for the payment widget checkout opens.
#[async_trait]
pub trait PaymentWidget: Send + Sync {
    /// Makes sure the widget can open, loading it if needed.
    async fn ensure_loaded(&self) -> Result<()>;

    /// Opens the widget for a payment and returns the handle to await.
    async fn open(&self, request: WidgetRequest) -> PaymentHandle;
}

/// What the scripted widget does when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetScript {
    /// Confirm immediately with generated payment ids.
    #[default]
    Confirm,

    /// Close immediately without paying.
    Dismiss,

    /// Stay open until the test drives it through
    /// [`ScriptedWidget::take_control`].
    Manual,
}

#[derive(Debug, Default)]
struct ScriptedWidgetState {
    script: WidgetScript,
    fail_on_load: bool,
    open_count: u32,
    next_id: u32,
    last_request: Option<WidgetRequest>,
    pending: Option<PaymentControl>,
}

/// In-memory payment widget for testing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedWidget {
    state: Arc<RwLock<ScriptedWidgetState>>,
}

impl ScriptedWidget {
    /// Creates a widget that confirms every payment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes what happens when the widget opens.
    pub fn set_script(&self, script: WidgetScript) {
        self.state.write().unwrap().script = script;
    }

    /// Configures the widget script to fail to load.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.state.write().unwrap().fail_on_load = fail;
    }

    /// Returns how many times the widget was opened.
    pub fn open_count(&self) -> u32 {
        self.state.read().unwrap().open_count
    }

    /// Returns the request the widget was last opened with.
    pub fn last_request(&self) -> Option<WidgetRequest> {
        self.state.read().unwrap().last_request.clone()
    }

    /// Takes the control for the currently open manual interaction.
    pub fn take_control(&self) -> Option<PaymentControl> {
        self.state.write().unwrap().pending.take()
    }
}

#[async_trait]
impl PaymentWidget for ScriptedWidget {
    async fn ensure_loaded(&self) -> Result<()> {
        if self.state.read().unwrap().fail_on_load {
            return Err(CheckoutError::WidgetUnavailable);
        }
        Ok(())
    }

    async fn open(&self, request: WidgetRequest) -> PaymentHandle {
        let (control, handle) = payment_channel();
        let order_id = request.order_id.clone();

        let mut state = self.state.write().unwrap();
        state.open_count += 1;
        state.last_request = Some(request);

        match state.script {
            WidgetScript::Confirm => {
                state.next_id += 1;
                control.confirm(PaymentConfirmation {
                    widget_order_id: order_id,
                    widget_payment_id: format!("pay_{:06}", state.next_id),
                    widget_signature: format!("sig_{:06}", state.next_id),
                });
            }
            WidgetScript::Dismiss => control.dismiss(),
            WidgetScript::Manual => state.pending = Some(control),
        }

        handle
    }
}

#[cfg(test)]
mod tests {
    use futures_util::FutureExt;

    use super::*;

    fn request() -> WidgetRequest {
        WidgetRequest::new(
            "key_test_0001",
            &WidgetOrder {
                id: "wo_000001".to_string(),
                amount: Money::from_rupees(4299),
                currency: "INR".to_string(),
            },
            WidgetPrefill {
                name: "Meera Iyer".to_string(),
                email: "meera@example.com".to_string(),
                contact: "9876543210".to_string(),
            },
        )
    }

    #[test]
    fn test_request_carries_the_storefront_branding() {
        let request = request();
        assert_eq!(request.display_name, "RatnaMayuri");
        assert_eq!(request.description, "Secure checkout");
        assert_eq!(request.theme_color, "#c79b4b");
        assert_eq!(request.order_id, "wo_000001");
        assert_eq!(request.amount, Money::from_rupees(4299));
    }

    #[tokio::test]
    async fn test_confirm_script_pays_immediately() {
        let widget = ScriptedWidget::new();

        let handle = widget.open(request()).await;
        let outcome = handle.outcome().await;

        match outcome {
            WidgetOutcome::Confirmed(confirmation) => {
                assert_eq!(confirmation.widget_order_id, "wo_000001");
                assert_eq!(confirmation.widget_payment_id, "pay_000001");
                assert_eq!(confirmation.widget_signature, "sig_000001");
            }
            WidgetOutcome::Dismissed => panic!("expected a confirmation"),
        }
        assert_eq!(widget.open_count(), 1);
    }

    #[tokio::test]
    async fn test_dismiss_script_closes_without_paying() {
        let widget = ScriptedWidget::new();
        widget.set_script(WidgetScript::Dismiss);

        let outcome = widget.open(request()).await.outcome().await;

        assert_eq!(outcome, WidgetOutcome::Dismissed);
    }

    #[tokio::test]
    async fn test_manual_script_waits_for_the_test() {
        let widget = ScriptedWidget::new();
        widget.set_script(WidgetScript::Manual);

        let handle = widget.open(request()).await;
        let mut outcome = std::pin::pin!(handle.outcome());
        assert!(outcome.as_mut().now_or_never().is_none());

        let control = widget.take_control().unwrap();
        control.confirm(PaymentConfirmation {
            widget_order_id: "wo_000001".to_string(),
            widget_payment_id: "pay_manual".to_string(),
            widget_signature: "sig_manual".to_string(),
        });

        match outcome.await {
            WidgetOutcome::Confirmed(confirmation) => {
                assert_eq!(confirmation.widget_payment_id, "pay_manual");
            }
            WidgetOutcome::Dismissed => panic!("expected a confirmation"),
        }
    }

    #[tokio::test]
    async fn test_dropping_the_control_dismisses() {
        let widget = ScriptedWidget::new();
        widget.set_script(WidgetScript::Manual);

        let handle = widget.open(request()).await;
        drop(widget.take_control().unwrap());

        assert_eq!(handle.outcome().await, WidgetOutcome::Dismissed);
    }

    #[tokio::test]
    async fn test_fail_on_load_surfaces_the_exact_message() {
        let widget = ScriptedWidget::new();
        widget.set_fail_on_load(true);

        let err = widget.ensure_loaded().await.unwrap_err();

        assert!(matches!(err, CheckoutError::WidgetUnavailable));
        assert_eq!(err.to_string(), "Payment gateway failed to load");
    }

    #[tokio::test]
    async fn test_payment_ids_are_sequential() {
        let widget = ScriptedWidget::new();

        let first = widget.open(request()).await.outcome().await;
        let second = widget.open(request()).await.outcome().await;

        let (WidgetOutcome::Confirmed(a), WidgetOutcome::Confirmed(b)) = (first, second) else {
            panic!("expected confirmations");
        };
        assert_eq!(a.widget_payment_id, "pay_000001");
        assert_eq!(b.widget_payment_id, "pay_000002");
    }
}
