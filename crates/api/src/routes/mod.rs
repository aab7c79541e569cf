//! HTTP route handlers and the state they share.

pub mod ops;
pub mod orders;
pub mod parts;

use std::future::Future;
use std::time::Duration;

use catalog::InMemoryCatalog;
use ::orders::{InMemoryOrderStore, OrderService};
use payment::InMemoryPaymentProcessor;

use crate::error::ApiError;

/// The order service wired to the in-memory collaborators.
pub type Orders = OrderService<InMemoryOrderStore, InMemoryCatalog, InMemoryPaymentProcessor>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orders: Orders,
    pub catalog: InMemoryCatalog,
    pub payment: InMemoryPaymentProcessor,
    pub request_timeout: Duration,
}

/// Runs `work` under the request deadline.
///
/// When the deadline fires the future is dropped, which abandons any
/// outstanding catalog or payment call without touching stored orders.
pub(crate) async fn with_deadline<T, E>(
    timeout: Duration,
    work: impl Future<Output = Result<T, E>>,
) -> Result<T, ApiError>
where
    ApiError: From<E>,
{
    match tokio::time::timeout(timeout, work).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => {
            metrics::counter!("request_deadline_exceeded_total").increment(1);
            Err(ApiError::Timeout(format!(
                "request did not complete within {}ms",
                timeout.as_millis()
            )))
        }
    }
}
