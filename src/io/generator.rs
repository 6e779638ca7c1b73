//! Random world generation
//!
//! Places facilities uniformly on a square grid and prices every catalog item
//! in tenths of a unit. Pass a seeded `StdRng` for reproducible worlds.

use crate::domain::types::{Catalog, Facility, FacilityId, Price};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("coordinate range {min}..={max} is empty")]
    EmptyCoordinateRange { min: i32, max: i32 },
    #[error("price range {min}..={max} tenths is empty")]
    EmptyPriceRange { min: u64, max: u64 },
    #[error("maximum price of {0} tenths is too large")]
    PriceTooLarge(u64),
    #[error("at least one catalog item name is required")]
    NoItems,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub count: usize,
    pub min_coord: i32,
    pub max_coord: i32,
    pub items: Vec<String>,
    /// Inclusive price bounds in tenths (1 = 0.10)
    pub min_tenths: u64,
    pub max_tenths: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            count: 10,
            min_coord: -10,
            max_coord: 10,
            items: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            min_tenths: 1,
            max_tenths: 999,
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.min_coord > self.max_coord {
            return Err(GeneratorError::EmptyCoordinateRange {
                min: self.min_coord,
                max: self.max_coord,
            });
        }
        if self.min_tenths > self.max_tenths {
            return Err(GeneratorError::EmptyPriceRange {
                min: self.min_tenths,
                max: self.max_tenths,
            });
        }
        if self.max_tenths > u64::MAX / 10 {
            return Err(GeneratorError::PriceTooLarge(self.max_tenths));
        }
        if self.items.is_empty() {
            return Err(GeneratorError::NoItems);
        }
        Ok(())
    }
}

/// Configured seed, or a freshly drawn one logged at warn so it shows under
/// the default filter and the world can be rebuilt with `--seed`
pub fn resolve_seed(configured: Option<u64>) -> u64 {
    match configured {
        Some(seed) => seed,
        None => {
            let seed = rand::random();
            warn!(seed = %seed, "world_seed_drawn");
            seed
        }
    }
}

/// Generate `settings.count` facilities with ids "001", "002", ...
pub fn generate_facilities<R: Rng>(
    settings: &GeneratorSettings,
    rng: &mut R,
) -> Result<Vec<Facility>, GeneratorError> {
    settings.validate()?;

    let facilities = (1..=settings.count)
        .map(|n| {
            let catalog: Catalog = settings
                .items
                .iter()
                .map(|item| {
                    let tenths = rng.gen_range(settings.min_tenths..=settings.max_tenths);
                    (item.clone(), Price::from_tenths(tenths))
                })
                .collect();
            let x = rng.gen_range(settings.min_coord..=settings.max_coord);
            let y = rng.gen_range(settings.min_coord..=settings.max_coord);
            Facility::new(FacilityId::numbered(n), x, y, catalog)
        })
        .collect::<Vec<_>>();

    debug!(count = %facilities.len(), "facilities_generated");
    Ok(facilities)
}
