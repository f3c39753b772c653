//! Per-request view records returned by the engine.
//!
//! These are transient compute objects, built fresh from catalog and price
//! snapshots on every call. Field names match the wire shapes consumed by
//! the API layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The outcome of attempting to identify a product from extracted text.
///
/// A low-confidence match is not an error: `product_id`/`product_name` are
/// simply absent and `suggestions` still carries the next-best products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Aggregate confidence in `[0, 1]`; `0.0` when no line matched anything.
    pub score: f64,
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    /// The input lines the match was computed from, unmodified.
    pub lines: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Candidate {
    /// An empty result for empty input: zero score, nothing resolved.
    #[must_use]
    pub fn unmatched(lines: Vec<String>) -> Self {
        Self {
            score: 0.0,
            product_id: None,
            product_name: None,
            lines,
            suggestions: Vec::new(),
        }
    }

    /// Returns `true` if the match cleared the confidence threshold.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.product_id.is_some()
    }
}

/// An alternate product offered alongside (or instead of) a resolved match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub product_id: i64,
    pub name: String,
}

/// One store's price for the compared product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRow {
    pub store_id: i64,
    pub store_name: String,
    pub chain: String,
    /// Great-circle distance from the shopper; `0.0` when no shopper
    /// coordinates were supplied.
    pub distance_km: f64,
    pub price: Decimal,
    pub currency: String,
    /// Set on every row whose price equals the minimum; ties all flag true.
    pub is_cheapest: bool,
    /// `price - cheapest`, rounded to two fractional digits; never negative.
    pub savings_vs_cheapest: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Identifying summary of the compared product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
}

/// Aggregates over the row list; both fields are null for a priceless
/// product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareSummary {
    pub cheapest: Option<Decimal>,
    pub max_savings: Option<Decimal>,
}

/// Full price comparison for one product, rows ordered cheapest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResult {
    pub product: ProductSummary,
    pub prices: Vec<PriceRow>,
    pub summary: CompareSummary,
}
