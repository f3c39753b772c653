//! In-memory collaborator implementations over the validated seed catalog.
//!
//! These are snapshots, not a persistence layer: the whole catalog file is
//! held in memory and shared immutably across requests. Both the server and
//! the CLI build their engine on top of them.

use std::collections::HashMap;

use shelfscan_core::{CatalogFile, PriceFact, Product, Store};

use crate::providers::{PriceQuote, PricingStore, ProductCatalog, ProviderError};

/// Serves the product list the alias index is built from.
pub struct SeedCatalog {
    products: Vec<Product>,
}

impl SeedCatalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl ProductCatalog for SeedCatalog {
    async fn all_products(&self) -> Result<Vec<Product>, ProviderError> {
        Ok(self.products.clone())
    }
}

/// Serves per-store quotes by joining price facts against store rows.
pub struct SeedPricing {
    known_products: Vec<i64>,
    stores: HashMap<i64, Store>,
    facts: Vec<PriceFact>,
}

impl SeedPricing {
    #[must_use]
    pub fn new(products: &[Product], stores: Vec<Store>, facts: Vec<PriceFact>) -> Self {
        Self {
            known_products: products.iter().map(|p| p.id).collect(),
            stores: stores.into_iter().map(|s| (s.id, s)).collect(),
            facts,
        }
    }
}

impl PricingStore for SeedPricing {
    async fn prices_for_product(&self, product_id: i64) -> Result<Vec<PriceQuote>, ProviderError> {
        if !self.known_products.contains(&product_id) {
            return Err(ProviderError::NotFound);
        }
        Ok(self
            .facts
            .iter()
            .filter(|fact| fact.product_id == product_id)
            .filter_map(|fact| {
                let store = self.stores.get(&fact.store_id)?;
                Some(PriceQuote {
                    store_id: store.id,
                    store_name: store.name.clone(),
                    chain: store.chain.clone(),
                    latitude: store.latitude,
                    longitude: store.longitude,
                    price: fact.price,
                    currency: fact.currency.clone(),
                    updated_at: fact.updated_at,
                })
            })
            .collect())
    }
}

/// Split a loaded catalog file into the two collaborators.
#[must_use]
pub fn from_catalog_file(catalog: CatalogFile) -> (SeedCatalog, SeedPricing) {
    let pricing = SeedPricing::new(&catalog.products, catalog.stores, catalog.prices);
    (SeedCatalog::new(catalog.products), pricing)
}
