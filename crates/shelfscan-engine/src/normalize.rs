//! Text normalization shared by alias building, matching, and suggestion
//! lookup. Every piece of text is pushed through the same pipe so that
//! comparisons are always like-for-like.

/// Lowercase, strip punctuation, collapse whitespace runs to single spaces.
///
/// `"Lewis-Road  CREAMERY!"` → `"lewis road creamery"`.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lc in c.to_lowercase() {
                out.push(lc);
            }
        } else {
            pending_space = true;
        }
    }
    out
}

/// Whitespace-split tokens of the normalized form.
#[must_use]
pub fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}
