//! The payment contract consumed by the order orchestrator.

use async_trait::async_trait;
use common::{OrderId, TransactionId, UserId};

use crate::error::Result;
use crate::method::PaymentMethod;

/// Result of a successful authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResult {
    /// Identifier assigned by the processor; safe to store verbatim.
    pub transaction_id: TransactionId,
}

/// Trait for payment processing.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// Authorizes payment of an order by a user with the given method.
    ///
    /// Called exactly once per pay attempt; failures are not retried.
    async fn authorize(
        &self,
        order_id: OrderId,
        user_id: UserId,
        method: PaymentMethod,
    ) -> Result<PaymentResult>;
}
