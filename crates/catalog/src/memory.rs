//! In-memory catalog implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::{Money, PartId};
use tokio::sync::RwLock;

use crate::client::CatalogClient;
use crate::error::{CatalogError, Result};
use crate::filter::PartsFilter;
use crate::part::{Category, Dimensions, Part};

/// In-memory catalog backed by a map of part records.
///
/// Clones share the same underlying data, so a test can keep a handle to
/// toggle failures after handing a clone to the orchestrator.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    parts: Arc<RwLock<HashMap<PartId, Part>>>,
    fail_on_lookup: Arc<AtomicBool>,
    latency_ms: Arc<AtomicU64>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the given parts.
    pub fn with_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        let parts = parts.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            parts: Arc::new(RwLock::new(parts)),
            ..Self::default()
        }
    }

    /// Creates a catalog holding the demo parts from [`demo_parts`].
    pub fn seeded() -> Self {
        Self::with_parts(demo_parts())
    }

    /// Adds or replaces a part.
    pub async fn insert_part(&self, part: Part) {
        self.parts.write().await.insert(part.id.clone(), part);
    }

    /// Returns the number of parts in the catalog.
    pub async fn part_count(&self) -> usize {
        self.parts.read().await.len()
    }

    /// Configures every subsequent lookup to fail with `Unavailable`.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.fail_on_lookup.store(fail, Ordering::SeqCst);
    }

    /// Delays every subsequent lookup, simulating a slow network hop.
    pub fn set_latency(&self, latency: Duration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.latency_ms.store(millis, Ordering::SeqCst);
    }

    /// Returns the configured latency, saturated at `u64::MAX` milliseconds.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms.load(Ordering::SeqCst))
    }

    /// Returns how many lookups (single or filtered) have been served.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    async fn begin_lookup(&self) -> Result<()> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if self.fail_on_lookup.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable(
                "catalog lookup failed".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalog {
    #[tracing::instrument(skip(self))]
    async fn get_part(&self, id: &PartId) -> Result<Part> {
        self.begin_lookup().await?;

        self.parts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::PartNotFound(id.clone()))
    }

    #[tracing::instrument(skip(self))]
    async fn list_parts(&self, filter: &PartsFilter) -> Result<Vec<Part>> {
        self.begin_lookup().await?;

        let parts = self.parts.read().await;
        let mut matched: Vec<Part> = parts
            .values()
            .filter(|part| filter.matches(part))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::debug!(matched = matched.len(), "catalog search served");
        Ok(matched)
    }
}

/// The demo parts the catalog is seeded with.
pub fn demo_parts() -> Vec<Part> {
    vec![
        Part::new(
            "engine-001",
            "Falcon 9 main engine",
            Category::Engine,
            Money::from_units(2_500_000),
        )
        .with_description("Reusable rocket engine")
        .with_stock(5)
        .with_dimensions(Dimensions {
            length: 320.5,
            width: 180.2,
            height: 210.7,
            weight: 4500.0,
        })
        .with_manufacturer("SpaceX", "USA", "https://www.spacex.com")
        .with_tags(["engine", "reusable", "space"])
        .with_metadata("material", "titanium")
        .with_metadata("thrust", 845.0),
        Part::new(
            "fuel-001",
            "LOX fuel tank",
            Category::Fuel,
            Money::from_units(1_800_000),
        )
        .with_description("Liquid oxygen tank")
        .with_stock(8)
        .with_dimensions(Dimensions {
            length: 850.0,
            width: 420.0,
            height: 420.0,
            weight: 3200.0,
        })
        .with_manufacturer("Roscosmos", "Russia", "https://www.roscosmos.ru")
        .with_tags(["fuel", "tank", "oxygen"])
        .with_metadata("capacity", 287.0)
        .with_metadata("pressure", 350_i64),
        Part::new(
            "porthole-001",
            "Station porthole",
            Category::Porthole,
            Money::from_units(950_000),
        )
        .with_description("Quartz porthole for orbital stations")
        .with_stock(3)
        .with_dimensions(Dimensions {
            length: 120.0,
            width: 120.0,
            height: 25.0,
            weight: 180.5,
        })
        .with_manufacturer("Boeing", "USA", "https://www.boeing.com")
        .with_tags(["porthole", "quartz", "view"])
        .with_metadata("thickness", 12.5)
        .with_metadata("protection", "IP68"),
        Part::new(
            "wing-001",
            "Shuttle wing",
            Category::Wing,
            Money::from_units(4_200_000),
        )
        .with_description("Heat-shielded wing for re-entry")
        .with_stock(2)
        .with_dimensions(Dimensions {
            length: 1850.0,
            width: 750.0,
            height: 350.0,
            weight: 12500.0,
        })
        .with_manufacturer("Airbus Defence", "Germany", "https://www.airbus.com")
        .with_tags(["wing", "heat-shield", "shuttle"])
        .with_metadata("material", "carbon fibre")
        .with_metadata("max_temperature", 1650.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_catalog_has_demo_parts() {
        let catalog = InMemoryCatalog::seeded();
        assert_eq!(catalog.part_count().await, 4);

        let engine = catalog.get_part(&PartId::new("engine-001")).await.unwrap();
        assert_eq!(engine.price, Money::from_units(2_500_000));
    }

    #[tokio::test]
    async fn test_get_missing_part() {
        let catalog = InMemoryCatalog::seeded();
        let result = catalog.get_part(&PartId::new("nope")).await;
        assert!(matches!(result, Err(CatalogError::PartNotFound(id)) if id.as_str() == "nope"));
    }

    #[tokio::test]
    async fn test_resolve_omits_unknown_ids() {
        let catalog = InMemoryCatalog::seeded();
        let ids = vec![PartId::new("fuel-001"), PartId::new("ghost-001")];

        let parts = catalog.resolve_parts(&ids).await.unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].id.as_str(), "fuel-001");
    }

    #[tokio::test]
    async fn test_resolve_empty_set_skips_lookup() {
        let catalog = InMemoryCatalog::seeded();
        let parts = catalog.resolve_parts(&[]).await.unwrap();
        assert!(parts.is_empty());
        assert_eq!(catalog.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_id() {
        let catalog = InMemoryCatalog::seeded();
        let parts = catalog.list_parts(&PartsFilter::new()).await.unwrap();
        let ids: Vec<&str> = parts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["engine-001", "fuel-001", "porthole-001", "wing-001"]);
    }

    #[tokio::test]
    async fn test_fail_on_lookup() {
        let catalog = InMemoryCatalog::seeded();
        catalog.set_fail_on_lookup(true);

        let result = catalog.list_parts(&PartsFilter::new()).await;
        assert!(matches!(result, Err(CatalogError::Unavailable(_))));
        assert_eq!(catalog.lookup_count(), 1);

        catalog.set_fail_on_lookup(false);
        assert!(catalog.list_parts(&PartsFilter::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_insert_part_is_visible_to_clones() {
        let catalog = InMemoryCatalog::new();
        let handle = catalog.clone();
        handle
            .insert_part(Part::new("bolt-001", "Bolt", Category::Unspecified, Money::from_cents(99)))
            .await;
        assert_eq!(catalog.part_count().await, 1);
    }

    #[test]
    fn test_latency_saturates() {
        let catalog = InMemoryCatalog::new();
        catalog.set_latency(Duration::from_millis(250));
        assert_eq!(catalog.latency(), Duration::from_millis(250));

        catalog.set_latency(Duration::MAX);
        assert_eq!(catalog.latency(), Duration::from_millis(u64::MAX));
    }
}
