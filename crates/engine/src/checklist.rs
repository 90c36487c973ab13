//! Checklist differencing.
//!
//! Decides which standard checks remain unconfirmed given the free text a
//! user typed about what they already did. Two-stage coverage test per item:
//! verbatim repetition is caught by loose substring containment, paraphrase
//! by token overlap against a supermajority threshold.

use triage_catalog::ChecklistDiff;

use crate::normalize::normalize_loose;
use crate::profile::MatchProfile;
use crate::score::coverage_ratio;
use crate::tokenize::token_set;

/// Split raw claimed-checks text into one item per non-empty line, with
/// common bullet markers and numeric enumerators stripped.
#[must_use]
pub fn split_claimed_items(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .collect()
}

fn strip_bullet(line: &str) -> String {
    let trimmed = line.trim().trim_start_matches(['-', '*', '•']).trim_start();
    let without_enumerator = match trimmed.split_once(['.', ')']) {
        Some((head, rest))
            if !head.is_empty() && head.chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.trim_start()
        }
        _ => trimmed,
    };
    without_enumerator.trim().to_string()
}

/// Standard items not covered by the already-split claimed items.
///
/// Original order of `standard_items` is preserved; blank standard items are
/// never reported missing. Coverage order among claimed items is irrelevant.
#[must_use]
pub fn compute_missing(
    profile: &MatchProfile,
    standard_items: &[String],
    claimed_items: &[String],
) -> ChecklistDiff {
    let rules = profile.tokens();
    let coverage_threshold = profile.thresholds().coverage_ratio;

    let claimed_joined = claimed_items.join(" ");
    let claimed_loose = normalize_loose(&claimed_joined);
    let claimed_tokens = token_set(&claimed_joined, rules.min_token_len);

    let missing_items = standard_items
        .iter()
        .filter(|item| {
            let item_loose = normalize_loose(item);
            if item_loose.is_empty() {
                return false;
            }
            if claimed_loose.contains(&item_loose) {
                return false;
            }
            let item_tokens = token_set(item, rules.min_token_len);
            if item_tokens.is_empty() {
                // Too short to overlap; the substring test was its only chance.
                return true;
            }
            coverage_ratio(&item_tokens, &claimed_tokens) < coverage_threshold
        })
        .cloned()
        .collect();

    ChecklistDiff { missing_items }
}

/// Convenience over raw free text: line-splits, then diffs.
#[must_use]
pub fn diff_checklist(
    profile: &MatchProfile,
    standard_items: &[String],
    claimed_text: &str,
) -> ChecklistDiff {
    compute_missing(profile, standard_items, &split_claimed_items(claimed_text))
}
