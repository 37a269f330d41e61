use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::part::{Category, Part};

/// Multi-criteria part query.
///
/// An empty list places no constraint on its field. Present constraints are
/// combined with AND. `tags` must equal the part's tag list exactly, in order;
/// every other field is a membership test.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartsFilter {
    pub uuids: Vec<Uuid>,
    pub names: Vec<String>,
    pub categories: Vec<Category>,
    pub manufacturer_countries: Vec<String>,
    pub tags: Vec<String>,
}

impl PartsFilter {
    /// Filter that matches exactly the given ids
    pub fn by_uuids<I>(uuids: I) -> Self
    where
        I: IntoIterator<Item = Uuid>,
    {
        Self {
            uuids: uuids.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.uuids.is_empty()
            && self.names.is_empty()
            && self.categories.is_empty()
            && self.manufacturer_countries.is_empty()
            && self.tags.is_empty()
    }

    pub fn matches(&self, part: &Part) -> bool {
        (self.uuids.is_empty() || self.uuids.contains(&part.uuid))
            && (self.names.is_empty() || self.names.contains(&part.name))
            && (self.categories.is_empty() || self.categories.contains(&part.category))
            && (self.manufacturer_countries.is_empty()
                || self.manufacturer_countries.contains(&part.manufacturer.country))
            && (self.tags.is_empty() || self.tags == part.tags)
    }
}
