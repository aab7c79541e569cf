//! Payment error types.

use thiserror::Error;

/// Errors returned by the payment processor.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The processor refused the payment.
    #[error("Payment declined: {0}")]
    Declined(String),

    /// The processor could not be reached or failed internally.
    #[error("Payment processor unavailable: {0}")]
    Unavailable(String),
}

/// Result type for payment operations.
pub type Result<T> = std::result::Result<T, PaymentError>;
