//! Filter criteria for catalog search.

use common::PartId;
use serde::{Deserialize, Serialize};

use crate::part::{Category, Part};

/// Search criteria for [`CatalogClient::list_parts`](crate::CatalogClient::list_parts).
///
/// Each non-empty field matches when the part's value is any of the listed
/// values; fields are combined with AND. An empty filter matches every part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartsFilter {
    pub ids: Vec<PartId>,
    pub names: Vec<String>,
    pub categories: Vec<Category>,
    pub manufacturer_countries: Vec<String>,
    pub tags: Vec<String>,
}

impl PartsFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter matching exactly the given ids.
    pub fn by_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PartId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_names<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_manufacturer_countries<I, T>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.manufacturer_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
            && self.names.is_empty()
            && self.categories.is_empty()
            && self.manufacturer_countries.is_empty()
            && self.tags.is_empty()
    }

    /// Returns true if the part satisfies every non-empty criterion.
    pub fn matches(&self, part: &Part) -> bool {
        if !self.ids.is_empty() && !self.ids.contains(&part.id) {
            return false;
        }

        if !self.names.is_empty() && !self.names.contains(&part.name) {
            return false;
        }

        if !self.categories.is_empty() && !self.categories.contains(&part.category) {
            return false;
        }

        if !self.manufacturer_countries.is_empty() {
            let Some(country) = part.manufacturer_country() else {
                return false;
            };
            if !self.manufacturer_countries.iter().any(|c| c == country) {
                return false;
            }
        }

        if !self.tags.is_empty() && !part.tags.iter().any(|tag| self.tags.contains(tag)) {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use common::Money;

    use super::*;

    fn engine() -> Part {
        Part::new("engine-001", "Main engine", Category::Engine, Money::from_units(100))
            .with_manufacturer("SpaceX", "USA", "https://www.spacex.com")
            .with_tags(["engine", "reusable"])
    }

    fn tank() -> Part {
        Part::new("fuel-001", "LOX tank", Category::Fuel, Money::from_units(50))
            .with_tags(["fuel", "tank"])
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = PartsFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&engine()));
        assert!(filter.matches(&tank()));
    }

    #[test]
    fn test_ids_match_any() {
        let filter = PartsFilter::by_ids(["fuel-001", "wing-001"]);
        assert!(!filter.matches(&engine()));
        assert!(filter.matches(&tank()));
    }

    #[test]
    fn test_fields_combine_with_and() {
        let filter = PartsFilter::by_ids(["engine-001"]).with_categories([Category::Fuel]);
        assert!(!filter.matches(&engine()));

        let filter = PartsFilter::by_ids(["engine-001"]).with_categories([Category::Engine]);
        assert!(filter.matches(&engine()));
    }

    #[test]
    fn test_names_match_exactly() {
        let filter = PartsFilter::new().with_names(["LOX tank"]);
        assert!(filter.matches(&tank()));
        assert!(!filter.matches(&engine()));
    }

    #[test]
    fn test_country_filter_skips_parts_without_manufacturer() {
        let filter = PartsFilter::new().with_manufacturer_countries(["USA"]);
        assert!(filter.matches(&engine()));
        assert!(!filter.matches(&tank()));
    }

    #[test]
    fn test_tags_match_if_any_tag_overlaps() {
        let filter = PartsFilter::new().with_tags(["tank", "porthole"]);
        assert!(filter.matches(&tank()));
        assert!(!filter.matches(&engine()));
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let filter: PartsFilter = serde_json::from_str(r#"{"categories":["ENGINE"]}"#).unwrap();
        assert!(filter.ids.is_empty());
        assert_eq!(filter.categories, vec![Category::Engine]);
    }
}
