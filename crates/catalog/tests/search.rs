//! Filter search against the seeded catalog.

use catalog::{CatalogClient, Category, InMemoryCatalog, PartsFilter};

fn ids(parts: &[catalog::Part]) -> Vec<&str> {
    parts.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn search_by_country() {
    let catalog = InMemoryCatalog::seeded();
    let filter = PartsFilter::new().with_manufacturer_countries(["USA"]);

    let parts = catalog.list_parts(&filter).await.unwrap();
    assert_eq!(ids(&parts), vec!["engine-001", "porthole-001"]);
}

#[tokio::test]
async fn search_by_category_and_country() {
    let catalog = InMemoryCatalog::seeded();
    let filter = PartsFilter::new()
        .with_categories([Category::Engine, Category::Wing])
        .with_manufacturer_countries(["Germany"]);

    let parts = catalog.list_parts(&filter).await.unwrap();
    assert_eq!(ids(&parts), vec!["wing-001"]);
}

#[tokio::test]
async fn search_by_tags() {
    let catalog = InMemoryCatalog::seeded();
    let filter = PartsFilter::new().with_tags(["oxygen", "quartz"]);

    let parts = catalog.list_parts(&filter).await.unwrap();
    assert_eq!(ids(&parts), vec!["fuel-001", "porthole-001"]);
}

#[tokio::test]
async fn search_with_no_match() {
    let catalog = InMemoryCatalog::seeded();
    let filter = PartsFilter::by_ids(["engine-001"]).with_tags(["wing"]);

    let parts = catalog.list_parts(&filter).await.unwrap();
    assert!(parts.is_empty());
}
