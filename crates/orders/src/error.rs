//! Order error types.

use catalog::CatalogError;
use common::{OrderId, PartId, TransactionId};
use payment::PaymentError;
use thiserror::Error;

use crate::order::OrderStatus;
use crate::store::Version;

/// Errors raised by an [`OrderStore`](crate::OrderStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// An order with this id is already stored.
    #[error("Order already exists: {0}")]
    Duplicate(OrderId),

    /// Update of an order that was never inserted.
    #[error("Order not stored: {0}")]
    Missing(OrderId),

    /// Another writer committed since the order was read.
    #[error("Version conflict for order {order_id}: expected {expected}, found {actual}")]
    VersionConflict {
        order_id: OrderId,
        expected: Version,
        actual: Version,
    },
}

/// Errors returned by order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The referenced order does not exist.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// Some requested parts are unknown to the catalog.
    #[error("Some parts were not found: requested {requested}, found {found}")]
    PartsNotFound {
        requested: usize,
        found: usize,
        missing: Vec<PartId>,
    },

    /// The order has left `PendingPayment` and cannot be paid.
    #[error("Order {order_id} is already {status}")]
    AlreadyFinalized {
        order_id: OrderId,
        status: OrderStatus,
    },

    /// The processor authorized a payment, but the order was finalized
    /// while it was answering. The transaction is not recorded on the order.
    #[error("Order {order_id} became {status} during payment; transaction {transaction_id} was not applied")]
    PaymentVoided {
        order_id: OrderId,
        transaction_id: TransactionId,
        status: OrderStatus,
    },

    /// Another payment attempt for this order has not finished yet.
    #[error("Payment for order {0} is already in progress")]
    PaymentInProgress(OrderId),

    /// Paid orders cannot be cancelled.
    #[error("Cannot cancel paid order {0}")]
    CannotCancelPaid(OrderId),

    /// The catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The payment processor failed or declined.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Coarse classification of an [`OrderError`], used by callers to pick a
/// response without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Conflict,
    /// A remote collaborator (catalog or payment processor) failed.
    DependencyFailure,
    /// A store invariant was violated.
    Internal,
}

impl OrderError {
    /// Returns the error's classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::PartsNotFound { .. } => ErrorKind::BadRequest,
            OrderError::AlreadyFinalized { .. }
            | OrderError::PaymentVoided { .. }
            | OrderError::PaymentInProgress(_)
            | OrderError::CannotCancelPaid(_) => ErrorKind::Conflict,
            OrderError::Catalog(_) | OrderError::Payment(_) => ErrorKind::DependencyFailure,
            OrderError::Store(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for order operations.
pub type Result<T> = std::result::Result<T, OrderError>;
