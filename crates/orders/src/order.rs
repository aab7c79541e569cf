//! The order entity and its state machine.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, PartId, TransactionId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::OrderError;
use crate::method::PaymentMethod;

/// The state of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// PendingPayment ──┬──► Paid
///                  └──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created and waiting for payment.
    #[default]
    PendingPayment,

    /// Payment succeeded (terminal state).
    Paid,

    /// Withdrawn before payment (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order can be paid in this state.
    pub fn can_pay(&self) -> bool {
        matches!(self, OrderStatus::PendingPayment)
    }

    /// Returns true if cancelling is allowed, including the idempotent
    /// cancel of an already cancelled order.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::PendingPayment | OrderStatus::Cancelled)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "PENDING_PAYMENT",
            OrderStatus::Paid => "PAID",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a successful payment leaves on the order.
///
/// Transaction id and method are recorded together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    pub transaction_id: TransactionId,
    pub method: PaymentMethod,
}

/// An order for a set of catalog parts.
///
/// Identity, buyer, parts and price are fixed at creation; only the status
/// and payment details change, and only through [`Order::pay`] and
/// [`Order::cancel`].
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    part_ids: Vec<PartId>,
    total_price: Money,
    status: OrderStatus,
    payment: Option<PaymentDetails>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order awaiting payment, with a fresh id.
    pub fn new(user_id: UserId, part_ids: Vec<PartId>, total_price: Money) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            user_id,
            part_ids,
            total_price,
            status: OrderStatus::PendingPayment,
            payment: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn part_ids(&self) -> &[PartId] {
        &self.part_ids
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment(&self) -> Option<&PaymentDetails> {
        self.payment.as_ref()
    }

    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.payment.as_ref().map(|p| &p.transaction_id)
    }

    pub fn payment_method(&self) -> Option<&PaymentMethod> {
        self.payment.as_ref().map(|p| &p.method)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Fails with `AlreadyFinalized` unless the order is awaiting payment.
    pub fn ensure_payable(&self) -> Result<(), OrderError> {
        if !self.status.can_pay() {
            return Err(OrderError::AlreadyFinalized {
                order_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Records a successful payment.
    pub fn pay(
        &mut self,
        transaction_id: TransactionId,
        method: PaymentMethod,
    ) -> Result<(), OrderError> {
        self.ensure_payable()?;

        self.status = OrderStatus::Paid;
        self.payment = Some(PaymentDetails {
            transaction_id,
            method,
        });
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Cancels the order.
    ///
    /// Returns `Ok(false)` when the order was already cancelled and nothing
    /// changed.
    pub fn cancel(&mut self) -> Result<bool, OrderError> {
        match self.status {
            OrderStatus::Paid => Err(OrderError::CannotCancelPaid(self.id)),
            OrderStatus::Cancelled => Ok(false),
            OrderStatus::PendingPayment => {
                self.status = OrderStatus::Cancelled;
                self.updated_at = Utc::now();
                Ok(true)
            }
        }
    }
}
