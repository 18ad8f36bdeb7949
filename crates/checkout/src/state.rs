//! Checkout attempt state machine.

use serde::{Deserialize, Serialize};

/// The state of a checkout attempt in its lifecycle.
///
/// State transitions:
/// ```text
/// Idle ──► LoadingWidget ──► CreatingOrder ──► AwaitingPayment ──► Verifying ──► Succeeded
///                │                 │                  │                 │
///                │                 │                  └──► Idle         │
///                └─────────────────┴──────────────────────────► Failed ◄┘
/// ```
///
/// Dismissing the payment widget returns the attempt to `Idle`; every other
/// exit from an in-flight state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// No attempt in progress.
    #[default]
    Idle,

    /// Waiting for the payment widget script to become ready.
    LoadingWidget,

    /// Asking the backend to create the order and its payment order.
    CreatingOrder,

    /// The widget is open and the shopper is paying (or walking away).
    AwaitingPayment,

    /// The payment proof is being verified by the backend.
    Verifying,

    /// Payment verified and the order confirmed (terminal state).
    Succeeded,

    /// The attempt failed with a shopper-visible reason (terminal state).
    Failed,
}

impl CheckoutState {
    /// Returns true if a new attempt can start from this state.
    pub fn can_start(&self) -> bool {
        matches!(
            self,
            CheckoutState::Idle | CheckoutState::Succeeded | CheckoutState::Failed
        )
    }

    /// Returns true while an attempt is between start and outcome.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            CheckoutState::LoadingWidget
                | CheckoutState::CreatingOrder
                | CheckoutState::AwaitingPayment
                | CheckoutState::Verifying
        )
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Succeeded | CheckoutState::Failed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "Idle",
            CheckoutState::LoadingWidget => "LoadingWidget",
            CheckoutState::CreatingOrder => "CreatingOrder",
            CheckoutState::AwaitingPayment => "AwaitingPayment",
            CheckoutState::Verifying => "Verifying",
            CheckoutState::Succeeded => "Succeeded",
            CheckoutState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
