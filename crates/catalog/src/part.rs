//! Part records as served by the catalog.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::{Money, PartId};
use serde::{Deserialize, Serialize};

/// Part category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Unspecified,
    Engine,
    Fuel,
    Porthole,
    Wing,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Unspecified => "UNSPECIFIED",
            Category::Engine => "ENGINE",
            Category::Fuel => "FUEL",
            Category::Porthole => "PORTHOLE",
            Category::Wing => "WING",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical dimensions in centimetres and kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub name: String,
    pub country: String,
    pub website: String,
}

/// Free-form metadata value attached to a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Int(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Double(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

/// A catalog part record.
///
/// The orchestrator only reads `id` and `price`; everything else is
/// carried for catalog search and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub stock_quantity: i64,
    pub category: Category,
    pub dimensions: Option<Dimensions>,
    pub manufacturer: Option<Manufacturer>,
    pub tags: Vec<String>,
    pub metadata: HashMap<String, MetadataValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Part {
    /// Creates a part with the given id, name, category and price.
    ///
    /// Optional attributes start empty; use the `with_*` methods to fill
    /// them in.
    pub fn new(
        id: impl Into<PartId>,
        name: impl Into<String>,
        category: Category,
        price: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            stock_quantity: 0,
            category,
            dimensions: None,
            manufacturer: None,
            tags: Vec::new(),
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stock(mut self, quantity: i64) -> Self {
        self.stock_quantity = quantity;
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_manufacturer(
        mut self,
        name: impl Into<String>,
        country: impl Into<String>,
        website: impl Into<String>,
    ) -> Self {
        self.manufacturer = Some(Manufacturer {
            name: name.into(),
            country: country.into(),
            website: website.into(),
        });
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

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns the manufacturer's country, if a manufacturer is recorded.
    pub fn manufacturer_country(&self) -> Option<&str> {
        self.manufacturer.as_ref().map(|m| m.country.as_str())
    }
}
