//! Order store and orchestrator.
//!
//! Orders are created from catalog-verified parts, paid through an external
//! payment processor, or cancelled. The lifecycle is a small state machine:
//!
//! ```text
//! PendingPayment ──┬──► Paid
//!                  └──► Cancelled
//! ```
//!
//! There is no durable storage. Consistency under concurrent requests comes
//! from the [`OrderStore`] versioning contract and from never holding a
//! store lock across a remote call; see [`OrderService`].

pub mod error;
pub mod memory;
pub mod method;
pub mod order;
pub mod service;
pub mod store;

pub use error::{ErrorKind, OrderError, Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use method::PaymentMethod;
pub use order::{Order, OrderStatus, PaymentDetails};
pub use service::{CreatedOrder, OrderService};
pub use store::{OrderStore, Version, VersionedOrder};
