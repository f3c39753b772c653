//! Scores OCR-extracted text lines against the alias index and produces a
//! ranked identification result.

use std::collections::{HashMap, HashSet};

use shelfscan_core::{Candidate, Suggestion};

use crate::index::AliasIndex;
use crate::normalize::normalize;

/// Weight of substring containment between line and alias.
const WEIGHT_CONTAINMENT: f64 = 0.5;
/// Weight of the token overlap ratio (Jaccard) between line and alias.
const WEIGHT_TOKEN_OVERLAP: f64 = 0.3;
/// Weight of a detected brand token matching the candidate's brand.
const WEIGHT_BRAND: f64 = 0.2;

/// Minimum aggregate score for the top product to count as resolved.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.6;
/// Next-best products returned alongside the result.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

struct ProductScore {
    score: f64,
    /// Length of the alias behind the best score; shorter wins score ties.
    alias_len: usize,
}

/// Identify the most likely product behind `lines`.
///
/// Per (line, alias) pair where one contains the other, the score combines
/// containment, token overlap, and a brand bonus; each product keeps its
/// best single-line score. The top product resolves only at or above
/// `threshold`; below it the result carries suggestions alone.
pub(crate) fn identify(
    index: &AliasIndex,
    lines: &[String],
    threshold: f64,
    max_suggestions: usize,
) -> Candidate {
    let mut best: HashMap<i64, ProductScore> = HashMap::new();

    for line in lines {
        let line_norm = normalize(line);
        if line_norm.is_empty() {
            continue;
        }
        let line_tokens: HashSet<&str> = line_norm.split_whitespace().collect();
        let line_brand = index.detect_brand(&line_norm);

        for entry in index.entries() {
            // Aliases normally appear inside the line; the reverse direction
            // catches OCR fragments shorter than the alias.
            let contained = line_norm.contains(entry.alias.as_str())
                || entry.alias.contains(line_norm.as_str());
            if !contained {
                continue;
            }

            let alias_tokens: HashSet<&str> = entry.alias.split_whitespace().collect();
            let intersection = line_tokens.intersection(&alias_tokens).count();
            let union = line_tokens.union(&alias_tokens).count();
            #[allow(clippy::cast_precision_loss)]
            let overlap = if union == 0 {
                0.0
            } else {
                intersection as f64 / union as f64
            };

            let mut score = WEIGHT_CONTAINMENT + WEIGHT_TOKEN_OVERLAP * overlap;
            if let (Some(brand), Some(product)) = (line_brand, index.product(entry.product_id)) {
                if !product.brand.is_empty() && product.brand == brand {
                    score += WEIGHT_BRAND;
                }
            }

            let alias_len = entry.alias.len();
            best.entry(entry.product_id)
                .and_modify(|slot| {
                    if score > slot.score || (score == slot.score && alias_len < slot.alias_len) {
                        slot.score = score;
                        slot.alias_len = alias_len;
                    }
                })
                .or_insert(ProductScore { score, alias_len });
        }
    }

    let mut ranked: Vec<(i64, f64, usize, &str)> = best
        .iter()
        .filter_map(|(id, slot)| {
            index
                .product(*id)
                .map(|p| (*id, slot.score, slot.alias_len, p.name.as_str()))
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| a.2.cmp(&b.2))
            .then_with(|| a.3.cmp(b.3))
            .then_with(|| a.0.cmp(&b.0))
    });

    let top_score = ranked.first().map_or(0.0, |top| top.1);
    let resolved = ranked
        .first()
        .filter(|top| top.1 >= threshold)
        .map(|top| (top.0, top.3.to_string()));

    let resolved_id = resolved.as_ref().map(|(id, _)| *id);
    let suggestions: Vec<Suggestion> = ranked
        .iter()
        .filter(|(id, ..)| Some(*id) != resolved_id)
        .take(max_suggestions)
        .map(|(id, _, _, name)| Suggestion {
            product_id: *id,
            name: (*name).to_string(),
        })
        .collect();

    Candidate {
        score: top_score,
        product_id: resolved_id,
        product_name: resolved.map(|(_, name)| name),
        lines: lines.to_vec(),
        suggestions,
    }
}
