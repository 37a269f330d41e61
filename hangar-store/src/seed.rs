use std::path::Path;

use chrono::{Duration, Utc};
use hangar_catalog::{CatalogError, Category, Dimensions, InMemoryPartCatalog, Manufacturer, Part};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::app_config::CatalogConfig;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

const ADJECTIVES: &[&str] = &[
    "Titan", "Nova", "Aurora", "Quantum", "Solar", "Vector", "Stellar", "Polar", "Photon",
    "Comet",
];

const NOUNS: &[&str] = &[
    "Thruster", "Nozzle", "Tank", "Viewport", "Aileron", "Injector", "Manifold", "Strut",
    "Panel", "Valve",
];

const COMPANIES: &[&str] = &[
    "Orbital Works",
    "Kestrel Dynamics",
    "Helios Fabrication",
    "Blue Meridian",
    "Apex Propulsion",
    "Lumen Aerospace",
];

const COUNTRIES: &[&str] = &[
    "Norway", "Chile", "Japan", "Germany", "Kenya", "Canada", "Brazil", "India",
];

const TAGS: &[&str] = &[
    "lightweight",
    "carbon",
    "certified",
    "refurbished",
    "cryogenic",
    "shielded",
    "modular",
    "vacuum-rated",
];

const MATERIALS: &[&str] = &["titanium", "aluminium", "carbon-fibre", "ceramic"];

/// Build `count` fake parts with plausible values
pub fn generate_parts<R: Rng>(count: usize, rng: &mut R) -> Vec<Part> {
    (0..count).map(|_| fake_part(rng)).collect()
}

fn fake_part<R: Rng>(rng: &mut R) -> Part {
    let name = format!("{} {}", pick(rng, ADJECTIVES), pick(rng, NOUNS));
    let category = *Category::ASSIGNABLE.choose(rng).unwrap_or(&Category::Engine);
    let company = pick(rng, COMPANIES);

    let tag_count = rng.gen_range(1..=5);
    let tags: Vec<&str> = (0..tag_count).map(|_| pick(rng, TAGS)).collect();

    let created_at = Utc::now() - Duration::days(rng.gen_range(30..3650));
    let updated_at = created_at + Duration::days(rng.gen_range(0..30));

    let mut part = Part::new(name, rng.gen_range(1..=100_000), category)
        .with_dimensions(Dimensions::new(
            rng.gen_range(1.0..300.0),
            rng.gen_range(1.0..300.0),
            rng.gen_range(0.5..150.0),
            rng.gen_range(0.1..500.0),
        ))
        .with_manufacturer(Manufacturer {
            name: company.to_string(),
            country: pick(rng, COUNTRIES).to_string(),
            website: format!("https://{}.example", company.to_lowercase().replace(' ', "-")),
        })
        .with_tags(tags)
        .with_metadata("material", pick(rng, MATERIALS))
        .with_metadata("batch", rng.gen_range(1..10_000_i64))
        .with_metadata("flight_proven", rng.gen_bool(0.5));

    part.description = format!("{} for {:?} assemblies", part.name, category).to_lowercase();
    part.stock_quantity = rng.gen_range(1..=100);
    part.created_at = created_at;
    part.updated_at = updated_at;
    part
}

fn pick<R: Rng>(rng: &mut R, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Read a JSON array of parts
pub fn load_fixture(path: &Path) -> Result<Vec<Part>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Fill the catalog with generated parts plus the optional fixture file.
/// Returns the number of parts inserted.
pub async fn seed_catalog(
    catalog: &InMemoryPartCatalog,
    config: &CatalogConfig,
) -> Result<usize, SeedError> {
    let mut parts = generate_parts(config.seed_parts, &mut rand::thread_rng());

    if let Some(path) = &config.fixture_path {
        let fixture = load_fixture(path)?;
        tracing::info!("Loaded {} parts from {}", fixture.len(), path.display());
        parts.extend(fixture);
    }

    let count = parts.len();
    for part in parts {
        catalog.insert(part).await?;
    }

    tracing::info!("Seeded catalog with {} parts", count);
    Ok(count)
}
