use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed caller input, such as non-finite or out-of-range coordinates.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The product id is absent from the catalog snapshot. Distinct from
    /// "known product with no prices", which is a valid empty result.
    #[error("product {0} not found")]
    ProductNotFound(i64),

    /// The catalog collaborator failed or timed out. Propagated as-is; the
    /// engine issues no retries.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// The pricing collaborator failed or timed out. Propagated as-is; the
    /// engine issues no retries.
    #[error("pricing unavailable: {0}")]
    PricingUnavailable(String),
}
