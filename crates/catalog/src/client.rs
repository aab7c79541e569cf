//! The catalog contract consumed by the order orchestrator.

use async_trait::async_trait;
use common::PartId;

use crate::error::Result;
use crate::filter::PartsFilter;
use crate::part::Part;

/// Read-only access to the parts catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Returns a single part, or [`CatalogError::PartNotFound`](crate::CatalogError::PartNotFound).
    async fn get_part(&self, id: &PartId) -> Result<Part>;

    /// Returns every part matching the filter.
    async fn list_parts(&self, filter: &PartsFilter) -> Result<Vec<Part>>;

    /// Resolves part identifiers to records.
    ///
    /// Unknown identifiers are simply absent from the result; callers that
    /// need every part must compare the returned count with the requested
    /// count themselves. An empty id set resolves to nothing rather than
    /// to the whole catalog.
    async fn resolve_parts(&self, ids: &[PartId]) -> Result<Vec<Part>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.list_parts(&PartsFilter::by_ids(ids.iter().cloned()))
            .await
    }
}
