pub mod part;
pub mod filter;
pub mod catalog;

pub use part::{CatalogError, Category, Dimensions, Manufacturer, MetadataValue, Part};
pub use filter::PartsFilter;
pub use catalog::{InMemoryPartCatalog, PartCatalog};
