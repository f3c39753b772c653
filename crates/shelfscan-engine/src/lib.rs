//! The identification-and-comparison engine.
//!
//! Given OCR-extracted text lines, [`Engine::identify_by_photo`] resolves
//! the most likely catalogued product; [`Engine::compare_prices`] ranks that
//! product's price across stores with savings against the cheapest option.
//! Catalog and pricing access go through the [`ProductCatalog`] and
//! [`PricingStore`] collaborator traits; the engine owns no persistent
//! state beyond its cached alias index.

mod compare;
mod engine;
mod error;
pub mod geo;
mod index;
mod matcher;
pub mod normalize;
mod providers;
pub mod quantity;
pub mod seed;

pub use engine::{Engine, EngineConfig};
pub use error::EngineError;
pub use index::{AliasIndex, IndexStats, IndexedProduct, SharedIndex};
pub use matcher::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MAX_SUGGESTIONS};
pub use providers::{PriceQuote, PricingStore, ProductCatalog, ProviderError};
