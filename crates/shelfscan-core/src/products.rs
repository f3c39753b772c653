use serde::{Deserialize, Serialize};

/// A catalogued grocery item, the unit of identification and price
/// comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Brand display name, e.g. `"Anchor"` or `"Lewis Road Creamery"`.
    pub brand: String,
    /// Global Trade Item Number: 8, 12, 13 or 14 digits when present.
    pub gtin: Option<String>,
    /// Net weight in grams, when the product has a meaningful one.
    pub size_g: Option<f64>,
    /// Alternate display names this product is also sold under.
    #[serde(default)]
    pub alternate_names: Vec<String>,
}

impl Product {
    /// Every text string that should resolve to this product.
    ///
    /// The list always leads with the product name, followed by
    /// `"<brand> <name>"` and then each alternate name.
    #[must_use]
    pub fn alias_strings(&self) -> Vec<String> {
        let mut aliases = Vec::with_capacity(2 + self.alternate_names.len());
        aliases.push(self.name.clone());
        if !self.brand.trim().is_empty() {
            aliases.push(format!("{} {}", self.brand, self.name));
        }
        for alt in &self.alternate_names {
            if !alt.trim().is_empty() {
                aliases.push(alt.clone());
            }
        }
        aliases
    }

    /// Returns `true` if `gtin` is absent or a well-formed GTIN-8/12/13/14.
    #[must_use]
    pub fn has_valid_gtin(&self) -> bool {
        match &self.gtin {
            None => true,
            Some(gtin) => {
                matches!(gtin.len(), 8 | 12 | 13 | 14)
                    && gtin.bytes().all(|b| b.is_ascii_digit())
            }
        }
    }
}
