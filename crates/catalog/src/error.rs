//! Catalog error types.

use common::PartId;
use thiserror::Error;

/// Errors returned by a catalog lookup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A single-part lookup found nothing.
    #[error("Part not found: {0}")]
    PartNotFound(PartId),

    /// The catalog could not serve the request.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
