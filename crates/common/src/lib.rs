//! Shared identifiers and value objects used by the catalog, payment and
//! order crates.

pub mod money;
pub mod types;

pub use money::Money;
pub use types::{OrderId, PartId, TransactionId, UserId};
