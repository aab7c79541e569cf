//! Order orchestration: create, get, pay and cancel.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use catalog::CatalogClient;
use common::{Money, OrderId, PartId, TransactionId, UserId};
use payment::PaymentClient;

use crate::error::{OrderError, Result, StoreError};
use crate::method::PaymentMethod;
use crate::order::Order;
use crate::store::{OrderStore, VersionedOrder};

/// Identifier and price of a freshly created order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedOrder {
    pub order_id: OrderId,
    pub total_price: Money,
}

/// Drives orders through their lifecycle.
///
/// Remote calls to the catalog and the payment processor are never made
/// while a store lock is held. State is committed afterwards with a
/// compare-and-swap on the version read before the call, so a concurrent
/// writer is detected instead of overwritten.
///
/// Payments are additionally serialized per order: an attempt claims the
/// order id before reading it, and a second attempt on the same order is
/// refused with [`OrderError::PaymentInProgress`] without reaching the
/// processor. Together these guarantee at most one successful payment per
/// order.
///
/// Every operation is safe to abandon at any `.await` (for example when
/// the caller's deadline fires): nothing is written before the remote
/// result is known.
pub struct OrderService<S, C, P>
where
    S: OrderStore,
    C: CatalogClient,
    P: PaymentClient,
{
    store: S,
    catalog: C,
    payment: P,
    payments_in_flight: Arc<Mutex<HashSet<OrderId>>>,
}

impl<S, C, P> OrderService<S, C, P>
where
    S: OrderStore,
    C: CatalogClient,
    P: PaymentClient,
{
    /// Creates a new order service.
    pub fn new(store: S, catalog: C, payment: P) -> Self {
        Self {
            store,
            catalog,
            payment,
            payments_in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Creates an order for the given parts, priced from the catalog.
    ///
    /// Every requested id must resolve to its own catalog record, so a
    /// repeated id is rejected like an unknown one. An empty part list
    /// creates a zero-priced order without a catalog call.
    #[tracing::instrument(skip(self, part_ids), fields(parts = part_ids.len()))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        part_ids: Vec<PartId>,
    ) -> Result<CreatedOrder> {
        let parts = self.catalog.resolve_parts(&part_ids).await.map_err(|e| {
            metrics::counter!("order_dependency_failures_total", "dependency" => "catalog")
                .increment(1);
            tracing::error!(error = %e, "catalog lookup failed");
            OrderError::from(e)
        })?;

        if parts.len() != part_ids.len() {
            let found: HashSet<&PartId> = parts.iter().map(|p| &p.id).collect();
            let missing: Vec<PartId> = part_ids
                .iter()
                .filter(|id| !found.contains(id))
                .cloned()
                .collect();
            tracing::info!(?missing, "order rejected, parts not found");
            return Err(OrderError::PartsNotFound {
                requested: part_ids.len(),
                found: parts.len(),
                missing,
            });
        }

        let total_price: Money = parts.iter().map(|p| p.price).sum();
        let order = Order::new(user_id, part_ids, total_price);
        let order_id = order.id();
        self.store.insert(order).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(%order_id, %user_id, %total_price, "order created");

        Ok(CreatedOrder {
            order_id,
            total_price,
        })
    }

    /// Returns a copy of the order.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order> {
        Ok(self.load(order_id).await?.order)
    }

    /// Pays for an order and returns the processor's transaction id.
    ///
    /// Only `PendingPayment` orders can be paid. A failed payment leaves
    /// the order untouched. If the order is cancelled while the processor
    /// is answering, the cancellation wins and the authorized transaction
    /// is returned in [`OrderError::PaymentVoided`].
    #[tracing::instrument(skip(self))]
    pub async fn pay_order(
        &self,
        order_id: OrderId,
        method: PaymentMethod,
    ) -> Result<TransactionId> {
        let _claim = self.claim_payment(order_id)?;

        let current = self.load(order_id).await?;
        if let Err(e) = current.order.ensure_payable() {
            metrics::counter!("order_conflicts_total", "operation" => "pay").increment(1);
            return Err(e);
        }

        let user_id = current.order.user_id();
        let started = Instant::now();
        let result = self
            .payment
            .authorize(order_id, user_id, method.normalize())
            .await;
        metrics::histogram!("payment_authorize_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        let payment = result.map_err(|e| {
            metrics::counter!("order_dependency_failures_total", "dependency" => "payment")
                .increment(1);
            tracing::warn!(%order_id, error = %e, "payment failed");
            OrderError::from(e)
        })?;

        self.commit_payment(current, payment.transaction_id, method)
            .await
    }

    /// Cancels an order awaiting payment.
    ///
    /// Cancelling an already cancelled order succeeds without changes;
    /// cancelling a paid order is a conflict.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<()> {
        loop {
            let VersionedOrder { mut order, version } = self.load(order_id).await?;

            let changed = order.cancel().inspect_err(|_| {
                metrics::counter!("order_conflicts_total", "operation" => "cancel").increment(1);
            })?;
            if !changed {
                tracing::debug!(%order_id, "order already cancelled");
                return Ok(());
            }

            match self.store.update(order, version).await {
                Ok(_) => {
                    metrics::counter!("orders_cancelled_total").increment(1);
                    tracing::info!(%order_id, "order cancelled");
                    return Ok(());
                }
                Err(StoreError::VersionConflict { .. }) => {
                    tracing::debug!(%order_id, "order changed during cancel, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn load(&self, order_id: OrderId) -> Result<VersionedOrder> {
        self.store
            .get(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))
    }

    async fn commit_payment(
        &self,
        mut current: VersionedOrder,
        transaction_id: TransactionId,
        method: PaymentMethod,
    ) -> Result<TransactionId> {
        loop {
            let mut order = current.order;
            if order.pay(transaction_id.clone(), method.clone()).is_err() {
                metrics::counter!("order_conflicts_total", "operation" => "pay").increment(1);
                tracing::warn!(
                    order_id = %order.id(),
                    %transaction_id,
                    status = %order.status(),
                    "payment authorized for an order finalized concurrently"
                );
                return Err(OrderError::PaymentVoided {
                    order_id: order.id(),
                    transaction_id,
                    status: order.status(),
                });
            }

            let order_id = order.id();
            match self.store.update(order, current.version).await {
                Ok(_) => {
                    metrics::counter!("orders_paid_total").increment(1);
                    tracing::info!(%order_id, %transaction_id, %method, "order paid");
                    return Ok(transaction_id);
                }
                Err(StoreError::VersionConflict { .. }) => {
                    current = self.load(order_id).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn claim_payment(&self, order_id: OrderId) -> Result<PaymentClaim> {
        let mut in_flight = self
            .payments_in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !in_flight.insert(order_id) {
            metrics::counter!("order_conflicts_total", "operation" => "pay").increment(1);
            return Err(OrderError::PaymentInProgress(order_id));
        }

        Ok(PaymentClaim {
            order_id,
            in_flight: Arc::clone(&self.payments_in_flight),
        })
    }
}

/// Marks a payment attempt as in flight until dropped.
struct PaymentClaim {
    order_id: OrderId,
    in_flight: Arc<Mutex<HashSet<OrderId>>>,
}

impl Drop for PaymentClaim {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.order_id);
    }
}
