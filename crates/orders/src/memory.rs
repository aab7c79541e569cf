//! In-memory order store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::order::Order;
use crate::store::{OrderStore, Version, VersionedOrder};

/// Order store backed by a single readers-writer lock over the whole
/// table.
///
/// Reads run concurrently; inserts and updates are exclusive. The version
/// check and the write happen under the same write guard, so at most one
/// of several writers holding the same expected version succeeds.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, VersionedOrder>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<Version, StoreError> {
        let mut orders = self.orders.write().await;

        let order_id = order.id();
        if orders.contains_key(&order_id) {
            return Err(StoreError::Duplicate(order_id));
        }

        let version = Version::first();
        orders.insert(order_id, VersionedOrder { order, version });
        Ok(version)
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<VersionedOrder>, StoreError> {
        Ok(self.orders.read().await.get(&order_id).cloned())
    }

    async fn update(&self, order: Order, expected: Version) -> Result<Version, StoreError> {
        let mut orders = self.orders.write().await;

        let order_id = order.id();
        let stored = orders
            .get_mut(&order_id)
            .ok_or(StoreError::Missing(order_id))?;

        if stored.version != expected {
            return Err(StoreError::VersionConflict {
                order_id,
                expected,
                actual: stored.version,
            });
        }

        let version = expected.next();
        *stored = VersionedOrder { order, version };
        Ok(version)
    }

    async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use common::{Money, PartId, TransactionId, UserId};

    use super::*;
    use crate::method::PaymentMethod;
    use crate::order::OrderStatus;

    fn order() -> Order {
        Order::new(
            UserId::new(),
            vec![PartId::new("engine-001")],
            Money::from_units(2_500_000),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryOrderStore::new();
        let order = order();
        let order_id = order.id();

        let version = store.insert(order.clone()).await.unwrap();
        assert_eq!(version, Version::first());

        let stored = store.get(order_id).await.unwrap().unwrap();
        assert_eq!(stored.order, order);
        assert_eq!(stored.version, Version::first());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = InMemoryOrderStore::new();
        assert!(store.get(OrderId::new()).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = InMemoryOrderStore::new();
        let order = order();

        store.insert(order.clone()).await.unwrap();
        let result = store.insert(order).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let store = InMemoryOrderStore::new();
        let mut order = order();
        let order_id = order.id();
        let version = store.insert(order.clone()).await.unwrap();

        order.cancel().unwrap();
        let version = store.update(order, version).await.unwrap();
        assert_eq!(version, Version::new(2));

        let stored = store.get(order_id).await.unwrap().unwrap();
        assert_eq!(stored.order.status(), OrderStatus::Cancelled);
        assert_eq!(stored.version, version);
    }

    #[tokio::test]
    async fn test_stale_update_is_rejected() {
        let store = InMemoryOrderStore::new();
        let order = order();
        let order_id = order.id();
        let version = store.insert(order.clone()).await.unwrap();

        let mut cancelled = order.clone();
        cancelled.cancel().unwrap();
        store.update(cancelled, version).await.unwrap();

        let mut paid = order;
        paid.pay(TransactionId::new("tx-1"), PaymentMethod::Card)
            .unwrap();
        let result = store.update(paid, version).await;
        assert!(matches!(
            result,
            Err(StoreError::VersionConflict { expected, actual, .. })
                if expected == Version::first() && actual == Version::new(2)
        ));

        let stored = store.get(order_id).await.unwrap().unwrap();
        assert_eq!(stored.order.status(), OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_update_unknown_order() {
        let store = InMemoryOrderStore::new();
        let result = store.update(order(), Version::first()).await;
        assert!(matches!(result, Err(StoreError::Missing(_))));
    }

    #[tokio::test]
    async fn test_reads_return_copies() {
        let store = InMemoryOrderStore::new();
        let order = order();
        let order_id = order.id();
        store.insert(order).await.unwrap();

        let mut copy = store.get(order_id).await.unwrap().unwrap().order;
        copy.cancel().unwrap();

        let stored = store.get(order_id).await.unwrap().unwrap();
        assert_eq!(stored.order.status(), OrderStatus::PendingPayment);
    }
}
