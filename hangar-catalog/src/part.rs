use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Part categories in the catalog
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
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
    /// Categories a real part can carry (everything but `Unspecified`)
    pub const ASSIGNABLE: [Category; 4] = [
        Category::Engine,
        Category::Fuel,
        Category::Porthole,
        Category::Wing,
    ];
}

/// Physical dimensions of a part
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

impl Dimensions {
    pub fn new(length: f64, width: f64, height: f64, weight: f64) -> Self {
        Self { length, width, height, weight }
    }

    fn is_valid(&self) -> bool {
        [self.length, self.width, self.height, self.weight]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manufacturer {
    pub name: String,
    pub country: String,
    pub website: String,
}

/// A typed metadata scalar. Exactly one kind is ever populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MetadataValue {
    StringValue(String),
    Int64Value(i64),
    DoubleValue(f64),
    BoolValue(bool),
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::StringValue(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::StringValue(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Int64Value(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::DoubleValue(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::BoolValue(value)
    }
}

/// Core part structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price in minor currency units
    pub price_minor: u64,
    #[serde(default)]
    pub stock_quantity: u64,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub manufacturer: Manufacturer,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, MetadataValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Part {
    pub fn new(name: impl Into<String>, price_minor: u64, category: Category) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            price_minor,
            stock_quantity: 0,
            category,
            dimensions: Dimensions::default(),
            manufacturer: Manufacturer::default(),
            tags: Vec::new(),
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: Manufacturer) -> Self {
        self.manufacturer = manufacturer;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check the invariants the type system can't express
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.dimensions.is_valid() {
            return Err(CatalogError::InvalidPart(format!(
                "part {} has negative or non-finite dimensions",
                self.uuid
            )));
        }
        Ok(())
    }
}

/// Catalog-related errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("part with uuid {0} is not found")]
    NotFound(Uuid),

    #[error("invalid part: {0}")]
    InvalidPart(String),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
