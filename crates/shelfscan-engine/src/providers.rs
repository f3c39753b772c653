//! Collaborator interfaces the engine consumes.
//!
//! Implementations live outside the engine (seed-file snapshots in the
//! server, fixtures in tests). Futures are required to be `Send` so the
//! engine can be driven from multi-threaded executors.

use std::future::Future;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use shelfscan_core::Product;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("record not found")]
    NotFound,
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the product catalog, used to (re)build the alias index.
pub trait ProductCatalog: Send + Sync {
    /// Fetch the full catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unavailable`] when the backing store cannot
    /// be reached.
    fn all_products(&self)
        -> impl Future<Output = Result<Vec<Product>, ProviderError>> + Send;
}

/// One store's current price for a product, joined with store identity and
/// coordinates.
#[derive(Debug, Clone)]
pub struct PriceQuote {
    pub store_id: i64,
    pub store_name: String,
    pub chain: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: Decimal,
    pub currency: String,
    pub updated_at: DateTime<Utc>,
}

/// Read access to per-store prices.
pub trait PricingStore: Send + Sync {
    /// Fetch every store's quote for `product_id`. A known product with no
    /// prices is `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] when the product id is not in
    /// the catalog, [`ProviderError::Unavailable`] when the backing store
    /// cannot be reached.
    fn prices_for_product(
        &self,
        product_id: i64,
    ) -> impl Future<Output = Result<Vec<PriceQuote>, ProviderError>> + Send;
}
