//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml
//!
//! A `[[facilities]]` list replaces random generation; without one the world
//! is generated from the `[world]` and `[generator]` sections.

use crate::domain::types::{Catalog, Facility, FacilityId};
use crate::io::generator::GeneratorSettings;
use crate::io::report::OutputFormat;
use anyhow::{bail, Context};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/dev.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Number of facilities to return
    #[serde(default = "default_k")]
    pub k: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { k: default_k() }
    }
}

fn default_k() -> i64 {
    3
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_min_coord")]
    pub min_coord: i32,
    #[serde(default = "default_max_coord")]
    pub max_coord: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { min_coord: default_min_coord(), max_coord: default_max_coord() }
    }
}

fn default_min_coord() -> i32 {
    -10
}

fn default_max_coord() -> i32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_facility_count")]
    pub count: usize,
    #[serde(default = "default_items")]
    pub items: Vec<String>,
    /// Lowest generated price in tenths (1 = 0.10)
    #[serde(default = "default_min_tenths")]
    pub min_tenths: u64,
    /// Highest generated price in tenths (999 = 99.90)
    #[serde(default = "default_max_tenths")]
    pub max_tenths: u64,
    /// Fixed RNG seed for reproducible worlds
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: default_facility_count(),
            items: default_items(),
            min_tenths: default_min_tenths(),
            max_tenths: default_max_tenths(),
            seed: None,
        }
    }
}

fn default_facility_count() -> usize {
    10
}

fn default_items() -> Vec<String> {
    vec!["A".to_string(), "B".to_string(), "C".to_string()]
}

fn default_min_tenths() -> u64 {
    1
}

fn default_max_tenths() -> u64 {
    999
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub show_coords: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FacilityConfig {
    pub id: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub facilities: Vec<FacilityConfig>,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    k: i64,
    generator: GeneratorSettings,
    seed: Option<u64>,
    output_format: OutputFormat,
    show_coords: bool,
    facilities: Vec<Facility>,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k: default_k(),
            generator: GeneratorSettings::default(),
            seed: None,
            output_format: OutputFormat::Text,
            show_coords: false,
            facilities: Vec::new(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Determine config file path from the CLI flag or environment
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        DEFAULT_CONFIG_PATH.to_string()
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str, source: &str) -> anyhow::Result<Self> {
        let toml_config: TomlConfig = toml::from_str(content)
            .with_context(|| format!("Failed to parse config file {}", source))?;

        let generator = GeneratorSettings {
            count: toml_config.generator.count,
            min_coord: toml_config.world.min_coord,
            max_coord: toml_config.world.max_coord,
            items: toml_config.generator.items,
            min_tenths: toml_config.generator.min_tenths,
            max_tenths: toml_config.generator.max_tenths,
        };
        generator
            .validate()
            .with_context(|| format!("Invalid [world]/[generator] settings in {}", source))?;

        let facilities = Self::build_facilities(toml_config.facilities)
            .with_context(|| format!("Invalid [[facilities]] in {}", source))?;

        Ok(Self {
            k: toml_config.query.k,
            generator,
            seed: toml_config.generator.seed,
            output_format: toml_config.report.format,
            show_coords: toml_config.report.show_coords,
            facilities,
            config_file: source.to_string(),
        })
    }

    fn build_facilities(entries: Vec<FacilityConfig>) -> anyhow::Result<Vec<Facility>> {
        let mut seen = FxHashSet::default();
        let mut facilities = Vec::with_capacity(entries.len());

        for entry in entries {
            let id = entry.id.trim().to_string();
            if id.is_empty() {
                bail!("facility at ({},{}) has an empty id", entry.x, entry.y);
            }
            if !seen.insert(id.clone()) {
                bail!("duplicate facility id {:?}", id);
            }
            if entry.catalog.is_empty() {
                warn!(facility_id = %id, "facility_has_empty_catalog");
            }
            facilities.push(Facility::new(FacilityId(id), entry.x, entry.y, entry.catalog));
        }

        Ok(facilities)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Load configuration from `path`, using defaults only when the file does
    /// not exist. A file that exists but fails to parse or validate is an error.
    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            warn!(config_file = %path, "config_file_missing_using_defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Load the configuration selected by the CLI flag, CONFIG_FILE or the default path
    ///
    /// A path given explicitly must exist; only the implicit default path may
    /// be absent.
    pub fn load(cli_path: Option<&str>) -> anyhow::Result<Self> {
        let explicit = cli_path.is_some() || env::var_os("CONFIG_FILE").is_some();
        let path = Self::resolve_config_path(cli_path);

        if explicit {
            Self::from_file(&path)
        } else {
            Self::load_from_path(&path)
        }
    }

    // Getters for all config fields
    pub fn k(&self) -> i64 {
        self.k
    }

    pub fn generator(&self) -> &GeneratorSettings {
        &self.generator
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn show_coords(&self) -> bool {
        self.show_coords
    }

    /// Statically configured facilities; empty means generate the world
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Command line overrides applied after loading
    pub fn with_k(mut self, k: i64) -> Self {
        self.k = k;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_show_coords(mut self, show: bool) -> Self {
        self.show_coords = show;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Price;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.k(), 3);
        assert_eq!(config.seed(), None);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(!config.show_coords());
        assert!(config.facilities().is_empty());
        assert_eq!(config.generator(), &GeneratorSettings::default());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml_str("", "inline").unwrap();
        assert_eq!(config.k(), 3);
        assert_eq!(config.generator().count, 10);
        assert_eq!(config.generator().min_coord, -10);
        assert_eq!(config.generator().max_coord, 10);
        assert_eq!(config.config_file(), "inline");
    }

    #[test]
    fn test_static_facilities() {
        let content = r#"
[[facilities]]
id = "north"
x = 0
y = 8
[facilities.catalog]
A = "4.50"
B = 2

[[facilities]]
id = "empty"
x = 1
y = 1
"#;
        let config = Config::from_toml_str(content, "inline").unwrap();
        let facilities = config.facilities();
        assert_eq!(facilities.len(), 2);
        assert_eq!(facilities[0].id().as_str(), "north");
        assert_eq!(facilities[0].y(), 8);
        assert_eq!(facilities[0].catalog()["A"], Price::from_cents(450));
        assert_eq!(facilities[0].catalog()["B"], Price::from_cents(200));
        assert!(facilities[1].catalog().is_empty());
    }

    #[test]
    fn test_duplicate_facility_ids_rejected() {
        let content = r#"
[[facilities]]
id = "001"
x = 0
y = 0

[[facilities]]
id = "001"
x = 3
y = 3
"#;
        let err = Config::from_toml_str(content, "inline").unwrap_err();
        assert!(format!("{:#}", err).contains("duplicate facility id"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let content = r#"
[[facilities]]
id = "001"
x = 0
y = 0
catalog = { A = "-1.00" }
"#;
        assert!(Config::from_toml_str(content, "inline").is_err());
    }

    #[test]
    fn test_inverted_world_rejected() {
        let content = "[world]\nmin_coord = 5\nmax_coord = -5\n";
        let err = Config::from_toml_str(content, "inline").unwrap_err();
        assert!(format!("{:#}", err).contains("coordinate range"));
    }

    #[test]
    fn test_report_section() {
        let content = "[report]\nformat = \"json\"\nshow_coords = true\n";
        let config = Config::from_toml_str(content, "inline").unwrap();
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.show_coords());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_k(5)
            .with_seed(99)
            .with_output_format(OutputFormat::Json)
            .with_show_coords(true);
        assert_eq!(config.k(), 5);
        assert_eq!(config.seed(), Some(99));
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.show_coords());
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let err = Config::load(Some("/nonexistent/central-fill.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }

    #[test]
    fn test_resolve_config_path_from_arg() {
        assert_eq!(Config::resolve_config_path(Some("config/demo.toml")), "config/demo.toml");
    }
}
