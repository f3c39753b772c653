use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A physical retail store carrying catalogued products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    /// Retail chain the store belongs to, e.g. `"PaknSave"`.
    pub chain: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// The observed price of one product at one store.
///
/// The catalog holds at most one fact per (product, store) pair; the most
/// recent observation replaces any older one upstream of this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceFact {
    pub product_id: i64,
    pub store_id: i64,
    /// Price with two fractional digits.
    pub price: Decimal,
    /// ISO 4217 currency code, e.g. `"NZD"`.
    pub currency: String,
    pub updated_at: DateTime<Utc>,
}
