//! In-memory payment processor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::{OrderId, TransactionId, UserId};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::client::{PaymentClient, PaymentResult};
use crate::error::{PaymentError, Result};
use crate::method::PaymentMethod;

/// A payment the processor has approved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub method: PaymentMethod,
    pub transaction_id: TransactionId,
}

/// In-memory payment processor.
///
/// Approves every request with a fresh UUID transaction id unless
/// configured to decline. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryPaymentProcessor {
    authorizations: Arc<RwLock<Vec<Authorization>>>,
    fail_on_authorize: Arc<AtomicBool>,
    latency_ms: Arc<AtomicU64>,
}

impl InMemoryPaymentProcessor {
    /// Creates a new processor with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a processor that takes `latency` to answer each request.
    pub fn with_latency(latency: Duration) -> Self {
        let processor = Self::default();
        processor.set_latency(latency);
        processor
    }

    /// Configures subsequent authorizations to be declined.
    pub fn set_fail_on_authorize(&self, fail: bool) {
        self.fail_on_authorize.store(fail, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(millis, Ordering::SeqCst);
    }

    /// Returns the configured latency, saturated at `u64::MAX` milliseconds.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms.load(Ordering::SeqCst))
    }

    /// Returns the number of approved authorizations.
    pub async fn authorization_count(&self) -> usize {
        self.authorizations.read().await.len()
    }

    /// Returns all approved authorizations for an order.
    pub async fn authorizations_for(&self, order_id: OrderId) -> Vec<Authorization> {
        self.authorizations
            .read()
            .await
            .iter()
            .filter(|a| a.order_id == order_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PaymentClient for InMemoryPaymentProcessor {
    #[tracing::instrument(skip(self))]
    async fn authorize(
        &self,
        order_id: OrderId,
        user_id: UserId,
        method: PaymentMethod,
    ) -> Result<PaymentResult> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if self.fail_on_authorize.load(Ordering::SeqCst) {
            return Err(PaymentError::Declined("payment declined".to_string()));
        }

        let transaction_id = TransactionId::from(Uuid::new_v4());
        self.authorizations.write().await.push(Authorization {
            order_id,
            user_id,
            method,
            transaction_id: transaction_id.clone(),
        });

        tracing::info!(%order_id, %user_id, %method, %transaction_id, "payment authorized");
        Ok(PaymentResult { transaction_id })
    }
}
