use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::filter::PartsFilter;
use crate::part::{CatalogError, Part};

/// Read-only view of the parts inventory, as consumed by the order service
#[async_trait]
pub trait PartCatalog: Send + Sync {
    /// Exact lookup by id
    async fn get(&self, uuid: Uuid) -> Result<Part, CatalogError>;

    /// All parts satisfying the filter, in no particular order.
    /// Zero matches is an empty vector, not an error.
    async fn list(&self, filter: &PartsFilter) -> Result<Vec<Part>, CatalogError>;
}

/// In-memory parts catalog
#[derive(Default)]
pub struct InMemoryPartCatalog {
    parts: RwLock<HashMap<Uuid, Part>>,
}

impl InMemoryPartCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a part. Only used while seeding.
    pub async fn insert(&self, part: Part) -> Result<(), CatalogError> {
        part.validate()?;
        self.parts.write().await.insert(part.uuid, part);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.parts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.parts.read().await.is_empty()
    }
}

#[async_trait]
impl PartCatalog for InMemoryPartCatalog {
    async fn get(&self, uuid: Uuid) -> Result<Part, CatalogError> {
        self.parts
            .read()
            .await
            .get(&uuid)
            .cloned()
            .ok_or(CatalogError::NotFound(uuid))
    }

    async fn list(&self, filter: &PartsFilter) -> Result<Vec<Part>, CatalogError> {
        let parts = self.parts.read().await;

        if filter.is_empty() {
            return Ok(parts.values().cloned().collect());
        }

        // Point lookups instead of a full scan when the ids are known
        if !filter.uuids.is_empty() {
            let mut seen = HashSet::with_capacity(filter.uuids.len());
            let found = filter
                .uuids
                .iter()
                .filter(|uuid| seen.insert(**uuid))
                .filter_map(|uuid| parts.get(uuid))
                .filter(|part| filter.matches(part))
                .cloned()
                .collect();
            return Ok(found);
        }

        Ok(parts.values().filter(|part| filter.matches(part)).cloned().collect())
    }
}
