//! Gram-weight extraction from free text.
//!
//! A deterministic helper kept outside the matching hot path: product names
//! and shelf labels often carry a net weight (`"Butter 500g"`,
//! `"Flour 1.5kg"`) that callers may want without re-parsing text
//! themselves.

/// Units tried in order; the multiplier converts the parsed value to grams.
/// `kg` precedes `g` so `"1.5kg"` is never read as 1.5 grams.
const UNITS: &[(&str, f64)] = &[
    ("kg", 1000.0),
    ("grams", 1.0),
    ("gram", 1.0),
    ("g", 1.0),
];

/// Extract a gram weight from free text, e.g. `"500g"` → `500.0`,
/// `"1.5 kg"` → `1500.0`. Returns `None` when no weight is present.
#[must_use]
pub fn parse_quantity_grams(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();
    for &(unit, multiplier) in UNITS {
        if let Some(value) = parse_value_with_unit(&lower, unit) {
            return Some(value * multiplier);
        }
    }
    None
}

/// Scans for a number (integer or decimal) followed by optional spaces and
/// `unit`, where the unit ends at a word boundary. Input must be
/// pre-lowercased.
fn parse_value_with_unit(lower: &str, unit: &str) -> Option<f64> {
    let bytes = lower.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        if bytes[i].is_ascii_digit()
            || (bytes[i] == b'.' && i + 1 < len && bytes[i + 1].is_ascii_digit())
        {
            let num_start = i;
            let mut has_dot = false;
            while i < len && (bytes[i].is_ascii_digit() || (bytes[i] == b'.' && !has_dot)) {
                if bytes[i] == b'.' {
                    has_dot = true;
                }
                i += 1;
            }
            let num_str = &lower[num_start..i];

            let mut j = i;
            while j < len && bytes[j] == b' ' {
                j += 1;
            }

            if lower[j..].starts_with(unit) {
                let after_unit = j + unit.len();
                let bounded = after_unit >= len || !bytes[after_unit].is_ascii_alphabetic();
                if bounded {
                    if let Ok(v) = num_str.parse::<f64>() {
                        return Some(v);
                    }
                }
            }
        } else {
            i += 1;
        }
    }
    None
}
