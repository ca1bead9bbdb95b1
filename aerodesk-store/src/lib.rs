pub mod app_config;
pub mod fixtures;

pub use app_config::Config;
pub use fixtures::{load_catalog, parse_catalog};

use aerodesk_catalog::CatalogError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Could not read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog has no {0} collection")]
    MissingCollection(&'static str),

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

pub type StoreResult<T> = Result<T, StoreError>;
