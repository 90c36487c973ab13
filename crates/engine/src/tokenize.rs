//! Word-unit extraction on top of loose normalization.
//!
//! Tokens shorter than the configured minimum are dropped: articles and
//! prepositions dilute overlap scores without adding discriminative value.

use std::collections::HashSet;

use crate::normalize::normalize_loose;

/// Ordered tokens of `text` after loose normalization, duplicates kept.
#[must_use]
pub fn tokenize(text: &str, min_token_len: usize) -> Vec<String> {
    normalize_loose(text)
        .split(' ')
        .filter(|t| !t.is_empty() && t.len() >= min_token_len)
        .map(str::to_string)
        .collect()
}

/// Token set of `text`, duplicates collapsed, for overlap scoring.
#[must_use]
pub fn token_set(text: &str, min_token_len: usize) -> HashSet<String> {
    tokenize(text, min_token_len).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_tokens_are_filtered() {
        assert_eq!(
            tokenize("409 AD error in the directory", 3),
            vec!["409", "error", "the", "directory"]
        );
    }

    #[test]
    fn punctuation_does_not_leak_into_tokens() {
        assert_eq!(
            tokenize("Check UPN-uniqueness, now!", 3),
            vec!["check", "upnuniqueness", "now"]
        );
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(tokenize("", 3).is_empty());
        assert!(tokenize("a an of", 3).is_empty());
        assert!(token_set("?!", 3).is_empty());
    }

    #[test]
    fn set_collapses_duplicates() {
        let set = token_set("check check CHECK queue", 3);
        assert_eq!(set.len(), 2);
        assert!(set.contains("check"));
        assert!(set.contains("queue"));
    }
}
