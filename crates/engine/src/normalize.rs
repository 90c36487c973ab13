//! Text canonicalization.
//!
//! Two strengths share the same base (lowercase, collapse whitespace, trim):
//! Light keeps punctuation so exact substrings like error codes survive a
//! "contains" check; Loose strips everything outside `[a-z0-9\s]` for token
//! comparisons. Both are total and idempotent; derived strings are never
//! persisted, they are recomputed per comparison.

/// Lowercase, collapse whitespace runs to single spaces, trim.
#[must_use]
pub fn normalize_light(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, strip characters outside `[a-z0-9\s]`, collapse whitespace, trim.
#[must_use]
pub fn normalize_loose(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
