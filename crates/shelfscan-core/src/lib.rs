use thiserror::Error;

pub mod app_config;
pub mod catalog;
mod config;
pub mod products;
pub mod stores;
pub mod view;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, CatalogFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::Product;
pub use stores::{PriceFact, Store};
pub use view::{
    Candidate, CompareResult, CompareSummary, PriceRow, ProductSummary, Suggestion,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file: {0}")]
    FileParse(#[from] serde_yaml::Error),
    #[error("catalog validation failed: {0}")]
    Validation(String),
}
