//! Payment client.
//!
//! A single operation: authorize a payment for an order and get back a
//! transaction identifier. The processor's own authorization rules are not
//! modelled; [`InMemoryPaymentProcessor`] approves everything unless told
//! to decline.

pub mod client;
pub mod error;
pub mod memory;
pub mod method;

pub use client::{PaymentClient, PaymentResult};
pub use error::{PaymentError, Result};
pub use memory::{Authorization, InMemoryPaymentProcessor};
pub use method::PaymentMethod;
