//! Similarity scoring.
//!
//! Two interchangeable strategies, selected by caller need: a weighted
//! substring score for query-vs-record matching, and Jaccard token overlap
//! for near-duplicate detection and checklist coverage.

use std::collections::HashSet;

use triage_catalog::IssueRecord;

use crate::normalize::normalize_light;
use crate::profile::{MatchProfile, TokenRules};
use crate::tokenize::token_set;

/// Weighted substring score between a free-text query and one record.
///
/// Points are awarded from three kinds of evidence:
/// - the light-normalized query appearing verbatim inside a field, weighted
///   per field (description highest);
/// - each query token (loose, length-filtered) found anywhere in the
///   record's combined token set;
/// - a short-query bonus when a code-like query (for example `409`) appears
///   in the description or checklist text.
///
/// Zero means "no evidence of relation"; an empty query scores zero against
/// everything.
#[must_use]
pub fn weighted_match_score(profile: &MatchProfile, query: &str, record: &IssueRecord) -> f32 {
    let query_light = normalize_light(query);
    if query_light.is_empty() {
        return 0.0;
    }

    let weights = profile.weights();
    let rules = profile.tokens();

    let description = normalize_light(&record.description);
    let application = normalize_light(&record.application);
    let root_cause = normalize_light(&record.root_cause);
    let checklist = normalize_light(&record.checklist_text());

    let mut score = 0.0;
    if description.contains(&query_light) {
        score += weights.description;
    }
    if application.contains(&query_light) {
        score += weights.application;
    }
    if root_cause.contains(&query_light) {
        score += weights.root_cause;
    }
    if checklist.contains(&query_light) {
        score += weights.checklist;
    }

    // Partial evidence: users rarely type a field verbatim, so every query
    // token found anywhere in the record counts once.
    let record_tokens = token_set(&record.combined_text(), rules.min_token_len);
    for token in token_set(&query_light, rules.min_token_len) {
        if record_tokens.contains(&token) {
            score += weights.token_hit;
        }
    }

    // A bare error code like "409" still deserves a nudge.
    if query_light.len() <= rules.short_query_max_len
        && (description.contains(&query_light) || checklist.contains(&query_light))
    {
        score += weights.short_query_bonus;
    }

    score
}

/// Jaccard token overlap between two texts, in [0, 1].
///
/// Symmetric; zero when either side tokenizes to nothing.
#[must_use]
pub fn jaccard_score(a: &str, b: &str, rules: &TokenRules) -> f32 {
    jaccard_sets(
        &token_set(a, rules.min_token_len),
        &token_set(b, rules.min_token_len),
    )
}

pub(crate) fn jaccard_sets(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f32 / union as f32
}

/// Fraction of `item` tokens present in `claimed`, in [0, 1].
pub(crate) fn coverage_ratio(item: &HashSet<String>, claimed: &HashSet<String>) -> f32 {
    if item.is_empty() {
        return 0.0;
    }
    let hits = item.iter().filter(|token| claimed.contains(*token)).count();
    hits as f32 / item.len() as f32
}
