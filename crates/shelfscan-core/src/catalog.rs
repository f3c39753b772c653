use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::products::Product;
use crate::stores::{PriceFact, Store};
use crate::CatalogError;

/// The seed catalog: products, stores, and observed price facts.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<Product>,
    pub stores: Vec<Store>,
    #[serde(default)]
    pub prices: Vec<PriceFact>,
}

/// Load and validate the catalog from a YAML file.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CatalogFile = serde_yaml::from_str(&content)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), CatalogError> {
    let mut product_ids = HashSet::new();
    for product in &catalog.products {
        if product.name.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "product {} has an empty name",
                product.id
            )));
        }
        if !product_ids.insert(product.id) {
            return Err(CatalogError::Validation(format!(
                "duplicate product id: {}",
                product.id
            )));
        }
        if !product.has_valid_gtin() {
            return Err(CatalogError::Validation(format!(
                "product '{}' has malformed GTIN {:?}; must be 8, 12, 13 or 14 digits",
                product.name, product.gtin
            )));
        }
        if let Some(size_g) = product.size_g {
            if !size_g.is_finite() || size_g <= 0.0 {
                return Err(CatalogError::Validation(format!(
                    "product '{}' has invalid size_g {size_g}",
                    product.name
                )));
            }
        }
    }

    let mut store_ids = HashSet::new();
    for store in &catalog.stores {
        if store.name.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "store {} has an empty name",
                store.id
            )));
        }
        if !store_ids.insert(store.id) {
            return Err(CatalogError::Validation(format!(
                "duplicate store id: {}",
                store.id
            )));
        }
        if !store.latitude.is_finite() || store.latitude.abs() > 90.0 {
            return Err(CatalogError::Validation(format!(
                "store '{}' has latitude {} out of [-90, 90]",
                store.name, store.latitude
            )));
        }
        if !store.longitude.is_finite() || store.longitude.abs() > 180.0 {
            return Err(CatalogError::Validation(format!(
                "store '{}' has longitude {} out of [-180, 180]",
                store.name, store.longitude
            )));
        }
    }

    let mut seen_pairs = HashSet::new();
    for fact in &catalog.prices {
        if !product_ids.contains(&fact.product_id) {
            return Err(CatalogError::Validation(format!(
                "price fact references unknown product id {}",
                fact.product_id
            )));
        }
        if !store_ids.contains(&fact.store_id) {
            return Err(CatalogError::Validation(format!(
                "price fact references unknown store id {}",
                fact.store_id
            )));
        }
        if !seen_pairs.insert((fact.product_id, fact.store_id)) {
            return Err(CatalogError::Validation(format!(
                "duplicate price fact for product {} at store {}",
                fact.product_id, fact.store_id
            )));
        }
        if fact.price < Decimal::ZERO {
            return Err(CatalogError::Validation(format!(
                "negative price {} for product {} at store {}",
                fact.price, fact.product_id, fact.store_id
            )));
        }
        if fact.currency.len() != 3 || !fact.currency.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(CatalogError::Validation(format!(
                "price fact for product {} has malformed currency code {:?}",
                fact.product_id, fact.currency
            )));
        }
    }

    Ok(())
}
