use aerodesk_catalog::{PairMatch, PricingConfig};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON fixture holding the `flights` and `tickets` collections
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RoutingConfig {
    #[serde(default)]
    pub pair_match: PairMatch,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `AERODESK__CATALOG__PATH=/tmp/catalog.json`
            .add_source(config::Environment::with_prefix("AERODESK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a single TOML document with no layering.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
