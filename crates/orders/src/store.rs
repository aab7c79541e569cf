//! Order storage contract.

use async_trait::async_trait;
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::order::Order;

/// Version number of a stored order, used for optimistic concurrency
/// control.
///
/// An order is stored at [`Version::first`] and every successful update
/// bumps the version by one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The version an order gets when it is inserted.
    pub fn first() -> Self {
        Self(1)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A copy of a stored order together with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedOrder {
    pub order: Order,
    pub version: Version,
}

/// The authoritative `order id -> order` table.
///
/// Reads hand out copies, so callers never share a mutable order with the
/// store. Orders are never removed.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Stores a new order at [`Version::first`].
    async fn insert(&self, order: Order) -> Result<Version, StoreError>;

    /// Returns a copy of the order and its current version.
    async fn get(&self, order_id: OrderId) -> Result<Option<VersionedOrder>, StoreError>;

    /// Replaces the stored order if it is still at `expected`.
    ///
    /// Fails with [`StoreError::VersionConflict`] when another writer got
    /// there first, leaving the stored order untouched.
    async fn update(&self, order: Order, expected: Version) -> Result<Version, StoreError>;

    /// Returns the number of stored orders.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
