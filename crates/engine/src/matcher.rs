//! Query-to-catalog matching and near-duplicate detection.
//!
//! The catalog arrives ordered newest-first from the persistence
//! collaborator; ties deliberately resolve to the first record in that
//! order, so callers may rely on recency as the tie-break.

use std::cmp::Ordering;

use triage_catalog::{DuplicateReport, IssueRecord, MatchResult, Suggestion};

use crate::normalize::{normalize_light, normalize_loose};
use crate::profile::MatchProfile;
use crate::score::{jaccard_sets, weighted_match_score};
use crate::tokenize::token_set;

/// Rank every catalog record against `query` and return the best match, or
/// none when the top score stays below the profile's minimum.
#[must_use]
pub fn find_best_match(
    profile: &MatchProfile,
    query: &str,
    catalog: &[IssueRecord],
) -> MatchResult {
    if normalize_light(query).is_empty() || catalog.is_empty() {
        return MatchResult::none();
    }

    let mut best_idx = None;
    let mut best_score = 0.0_f32;
    for (idx, record) in catalog.iter().enumerate() {
        let score = weighted_match_score(profile, query, record);
        // Strictly greater: the first record in catalog order wins ties.
        if score > best_score {
            best_score = score;
            best_idx = Some(idx);
        }
    }

    match best_idx {
        Some(idx) if best_score >= profile.thresholds().min_match_score => {
            log::debug!(
                "matched '{}' to issue {} (score {:.1})",
                query,
                catalog[idx].id,
                best_score
            );
            MatchResult {
                issue: Some(catalog[idx].clone()),
                score: best_score,
            }
        }
        Some(idx) => {
            log::debug!(
                "best candidate {} scored {:.1}, below minimum {:.1}; reporting no match",
                catalog[idx].id,
                best_score,
                profile.thresholds().min_match_score
            );
            MatchResult::none()
        }
        None => MatchResult::none(),
    }
}

/// Advisory near-duplicate check for a drafted description.
///
/// A loose-normalized exact equality wins outright and suppresses
/// suggestions; otherwise descriptions with Jaccard overlap at or above the
/// profile threshold are returned, best first, capped.
#[must_use]
pub fn find_similar(
    profile: &MatchProfile,
    description: &str,
    catalog: &[IssueRecord],
) -> DuplicateReport {
    let candidate_loose = normalize_loose(description);
    if candidate_loose.is_empty() || catalog.is_empty() {
        return DuplicateReport::default();
    }

    if let Some(record) = catalog
        .iter()
        .find(|record| normalize_loose(&record.description) == candidate_loose)
    {
        return DuplicateReport {
            exact: Some(record.clone()),
            suggestions: Vec::new(),
        };
    }

    let rules = profile.tokens();
    let threshold = profile.thresholds().duplicate_similarity;
    let candidate_tokens = token_set(description, rules.min_token_len);

    let mut suggestions: Vec<Suggestion> = catalog
        .iter()
        .filter_map(|record| {
            let score = jaccard_sets(
                &candidate_tokens,
                &token_set(&record.description, rules.min_token_len),
            );
            (score >= threshold).then(|| Suggestion {
                issue: record.clone(),
                score,
            })
        })
        .collect();

    // Stable sort keeps catalog order among equal scores.
    suggestions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    suggestions.truncate(profile.max_suggestions());

    log::debug!(
        "duplicate check for '{}': {} suggestion(s)",
        description,
        suggestions.len()
    );
    DuplicateReport {
        exact: None,
        suggestions,
    }
}

/// Light-substring list filter across all text fields, catalog order kept.
/// An empty query returns the whole catalog.
#[must_use]
pub fn filter_issues<'c>(query: &str, catalog: &'c [IssueRecord]) -> Vec<&'c IssueRecord> {
    let needle = normalize_light(query);
    if needle.is_empty() {
        return catalog.iter().collect();
    }
    catalog
        .iter()
        .filter(|record| normalize_light(&record.combined_text()).contains(&needle))
        .collect()
}
