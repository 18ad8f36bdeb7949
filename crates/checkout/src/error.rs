use thiserror::Error;

/// Errors a checkout attempt can surface.
///
/// The Display text is exactly what the shopper reads, so the rejection
/// variants carry the backend's own message untouched.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The payment widget never became ready to open.
    #[error("Payment gateway failed to load")]
    WidgetUnavailable,

    /// The backend refused to create the order.
    #[error("{0}")]
    OrderRejected(String),

    /// The backend refused the payment proof.
    #[error("{0}")]
    VerificationRejected(String),
}

/// Result type for checkout operations.
pub type Result<T> = std::result::Result<T, CheckoutError>;
