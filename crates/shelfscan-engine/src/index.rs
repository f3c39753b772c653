//! The alias index: an immutable lookup structure mapping normalized alias
//! text to candidate products, plus a length-ordered brand token list for
//! longest-match-first brand detection.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use shelfscan_core::Product;

use crate::normalize::normalize;

/// A product as the index knows it: display name plus normalized brand.
#[derive(Debug, Clone)]
pub struct IndexedProduct {
    pub id: i64,
    pub name: String,
    /// Normalized brand text, empty when the product carries no brand.
    pub brand: String,
}

/// One normalized alias string pointing back at its product.
#[derive(Debug, Clone)]
pub(crate) struct AliasEntry {
    pub alias: String,
    pub product_id: i64,
}

/// Counts reported after a build, for logs and the admin surface.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexStats {
    pub products: usize,
    pub aliases: usize,
    pub brands: usize,
}

/// Immutable once built; a rebuild produces a whole new instance.
#[derive(Debug, Default)]
pub struct AliasIndex {
    entries: Vec<AliasEntry>,
    products: HashMap<i64, IndexedProduct>,
    brand_tokens: Vec<String>,
}

impl AliasIndex {
    /// Build an index from a catalog snapshot.
    ///
    /// Every alias string is normalized and stored with a back-reference to
    /// its product; brand tokens are deduplicated and sorted by descending
    /// length (ties alphabetical) so that detection tries
    /// `"lewis road creamery"` before `"lewis road"`.
    #[must_use]
    pub fn build(products: &[Product]) -> Self {
        let mut entries = Vec::new();
        let mut indexed = HashMap::with_capacity(products.len());
        let mut seen_aliases = HashSet::new();
        let mut brands = HashSet::new();

        for product in products {
            let brand = normalize(&product.brand);
            if !brand.is_empty() {
                brands.insert(brand.clone());
            }
            indexed.insert(
                product.id,
                IndexedProduct {
                    id: product.id,
                    name: product.name.clone(),
                    brand,
                },
            );
            for alias in product.alias_strings() {
                let alias = normalize(&alias);
                if alias.is_empty() {
                    continue;
                }
                if seen_aliases.insert((product.id, alias.clone())) {
                    entries.push(AliasEntry {
                        alias,
                        product_id: product.id,
                    });
                }
            }
        }

        let mut brand_tokens: Vec<String> = brands.into_iter().collect();
        brand_tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            entries,
            products: indexed,
            brand_tokens,
        }
    }

    pub(crate) fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    #[must_use]
    pub fn product(&self, id: i64) -> Option<&IndexedProduct> {
        self.products.get(&id)
    }

    /// The longest brand token appearing in the (normalized) line, if any.
    #[must_use]
    pub fn detect_brand(&self, line: &str) -> Option<&str> {
        self.brand_tokens
            .iter()
            .find(|token| line.contains(token.as_str()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            products: self.products.len(),
            aliases: self.entries.len(),
            brands: self.brand_tokens.len(),
        }
    }
}

/// Atomically swappable handle to the current [`AliasIndex`].
///
/// Readers clone the inner `Arc` and never block each other; a rebuild
/// builds a complete new index elsewhere and swaps it in, so concurrent
/// readers observe either the fully-old or fully-new index. The rebuild
/// mutex serializes writers; rebuilds are never pipelined.
#[derive(Debug)]
pub struct SharedIndex {
    current: RwLock<Arc<AliasIndex>>,
    rebuild: tokio::sync::Mutex<()>,
}

impl SharedIndex {
    #[must_use]
    pub fn new(index: AliasIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
            rebuild: tokio::sync::Mutex::new(()),
        }
    }

    /// Snapshot of the current index.
    #[must_use]
    pub fn load(&self) -> Arc<AliasIndex> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish a freshly built index.
    pub fn swap(&self, index: AliasIndex) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(index);
    }

    /// Serializes rebuilds; hold the guard across fetch + build + swap.
    pub fn rebuild_lock(&self) -> &tokio::sync::Mutex<()> {
        &self.rebuild
    }
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new(AliasIndex::default())
    }
}
