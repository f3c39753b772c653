//! The comparison orchestrator: the facade external callers talk to.

use std::collections::HashMap;
use std::sync::Arc;

use shelfscan_core::{AppConfig, Candidate, CompareResult, ProductSummary, Suggestion};

use crate::compare;
use crate::error::EngineError;
use crate::index::{AliasIndex, IndexStats, SharedIndex};
use crate::matcher::{self, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MAX_SUGGESTIONS};
use crate::normalize::normalize;
use crate::providers::{PricingStore, ProductCatalog, ProviderError};

const DEFAULT_SUGGEST_LIMIT: usize = 10;

/// Tunables for matching and suggestion behavior.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub confidence_threshold: f64,
    pub max_suggestions: usize,
    pub suggest_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            suggest_limit: DEFAULT_SUGGEST_LIMIT,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            confidence_threshold: config.confidence_threshold,
            max_suggestions: config.max_suggestions,
            suggest_limit: config.suggest_limit,
        }
    }
}

/// Stateless operations over an immutable alias index snapshot and
/// injected catalog/pricing collaborators. Safe to share across unlimited
/// concurrent requests; the only write path is [`Engine::rebuild_index`].
#[derive(Debug)]
pub struct Engine<C, P> {
    catalog: Arc<C>,
    pricing: Arc<P>,
    index: SharedIndex,
    config: EngineConfig,
}

impl<C, P> Engine<C, P>
where
    C: ProductCatalog,
    P: PricingStore,
{
    /// Create an engine with an empty index; call [`Engine::rebuild_index`]
    /// before serving traffic.
    pub fn new(catalog: Arc<C>, pricing: Arc<P>, config: EngineConfig) -> Self {
        Self {
            catalog,
            pricing,
            index: SharedIndex::default(),
            config,
        }
    }

    /// Refetch the catalog snapshot, build a fresh alias index, and publish
    /// it atomically. Rebuilds are serialized; readers keep the old index
    /// until the swap.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CatalogUnavailable`] if the catalog
    /// collaborator fails. No retry is attempted.
    pub async fn rebuild_index(&self) -> Result<IndexStats, EngineError> {
        let _guard = self.index.rebuild_lock().lock().await;
        let products = self
            .catalog
            .all_products()
            .await
            .map_err(|e| EngineError::CatalogUnavailable(e.to_string()))?;
        let next = AliasIndex::build(&products);
        let stats = next.stats();
        self.index.swap(next);
        tracing::info!(
            products = stats.products,
            aliases = stats.aliases,
            brands = stats.brands,
            "alias index rebuilt"
        );
        Ok(stats)
    }

    /// Identify the most likely product behind OCR-extracted `lines`.
    ///
    /// Never hard-fails: a poor match degrades to an unresolved candidate
    /// with suggestions.
    #[must_use]
    pub fn identify_by_photo(&self, lines: &[String]) -> Candidate {
        let index = self.index.load();
        let candidate = matcher::identify(
            &index,
            lines,
            self.config.confidence_threshold,
            self.config.max_suggestions,
        );
        tracing::debug!(
            score = candidate.score,
            product_id = candidate.product_id,
            "photo identification scored"
        );
        candidate
    }

    /// Compare `product_id` across stores, optionally computing distance
    /// from the shopper's `(lat, lng)`.
    ///
    /// # Errors
    ///
    /// [`EngineError::ProductNotFound`] for an unknown product,
    /// [`EngineError::InvalidInput`] for malformed coordinates,
    /// [`EngineError::PricingUnavailable`] when the pricing collaborator
    /// fails.
    pub async fn compare_prices(
        &self,
        product_id: i64,
        shopper: Option<(f64, f64)>,
    ) -> Result<CompareResult, EngineError> {
        let product = {
            let index = self.index.load();
            index
                .product(product_id)
                .map(|p| ProductSummary {
                    id: p.id,
                    name: p.name.clone(),
                })
                .ok_or(EngineError::ProductNotFound(product_id))?
        };

        let quotes = self
            .pricing
            .prices_for_product(product_id)
            .await
            .map_err(|e| match e {
                ProviderError::NotFound => EngineError::ProductNotFound(product_id),
                ProviderError::Unavailable(reason) => EngineError::PricingUnavailable(reason),
            })?;

        compare::rank_quotes(product, quotes, shopper)
    }

    /// Products whose alias contains the normalized `query` as a substring,
    /// shortest alias first (a shorter containing alias is a more specific
    /// match), then alphabetical, capped at the configured limit.
    #[must_use]
    pub fn suggest_products(&self, query: &str) -> Vec<Suggestion> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Vec::new();
        }
        let index = self.index.load();

        // Per product, keep the shortest alias containing the needle.
        let mut shortest: HashMap<i64, usize> = HashMap::new();
        for entry in index.entries() {
            if entry.alias.contains(&needle) {
                let len = entry.alias.len();
                shortest
                    .entry(entry.product_id)
                    .and_modify(|slot| {
                        if len < *slot {
                            *slot = len;
                        }
                    })
                    .or_insert(len);
            }
        }

        let mut ranked: Vec<(usize, i64, &str)> = shortest
            .iter()
            .filter_map(|(id, len)| index.product(*id).map(|p| (*len, *id, p.name.as_str())))
            .collect();
        ranked.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| a.2.cmp(b.2))
                .then_with(|| a.1.cmp(&b.1))
        });

        ranked
            .into_iter()
            .take(self.config.suggest_limit)
            .map(|(_, id, name)| Suggestion {
                product_id: id,
                name: name.to_string(),
            })
            .collect()
    }

    /// Counts for the currently published index.
    #[must_use]
    pub fn index_stats(&self) -> IndexStats {
        self.index.load().stats()
    }
}
