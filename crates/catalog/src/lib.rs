//! Catalog lookup client.
//!
//! The order orchestrator only needs one thing from the catalog: resolve a
//! set of part identifiers to priced records. This crate defines that
//! contract ([`CatalogClient`]), the part record it returns, the filter
//! search the catalog supports, and an in-memory catalog used by the
//! server binary and the tests.

pub mod client;
pub mod error;
pub mod filter;
pub mod memory;
pub mod part;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use filter::PartsFilter;
pub use memory::InMemoryCatalog;
pub use part::{Category, Dimensions, Manufacturer, MetadataValue, Part};
