//! Issue-matching and checklist-comparison engine.
//!
//! Pure, synchronous, catalog-in results-out: callers hand every operation a
//! read-only snapshot of the issue catalog and get ephemeral values back.
//! Nothing here caches, persists, or talks to the network.

mod checklist;
mod error;
mod matcher;
mod normalize;
mod profile;
mod score;
mod tokenize;

pub use checklist::{compute_missing, diff_checklist, split_claimed_items};
pub use error::{EngineError, Result};
pub use matcher::{filter_issues, find_best_match, find_similar};
pub use normalize::{normalize_light, normalize_loose};
pub use profile::{FieldWeights, MatchProfile, Thresholds, TokenRules, PROFILE_SCHEMA_VERSION};
pub use score::{jaccard_score, weighted_match_score};
pub use tokenize::{token_set, tokenize};

use triage_catalog::{ChecklistDiff, DuplicateReport, IssueRecord, MatchResult};

/// Facade binding the pure operations to one profile.
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    profile: MatchProfile,
}

impl TriageEngine {
    #[must_use]
    pub fn new(profile: MatchProfile) -> Self {
        Self { profile }
    }

    #[must_use]
    pub fn profile(&self) -> &MatchProfile {
        &self.profile
    }

    /// Best catalog match for a free-text problem description.
    #[must_use]
    pub fn match_issue(&self, query: &str, catalog: &[IssueRecord]) -> MatchResult {
        matcher::find_best_match(&self.profile, query, catalog)
    }

    /// Advisory near-duplicate report for a drafted description.
    #[must_use]
    pub fn find_duplicates(&self, description: &str, catalog: &[IssueRecord]) -> DuplicateReport {
        matcher::find_similar(&self.profile, description, catalog)
    }

    /// Standard checklist items not covered by raw claimed-checks text.
    #[must_use]
    pub fn diff_checklist(&self, standard_items: &[String], claimed_text: &str) -> ChecklistDiff {
        checklist::diff_checklist(&self.profile, standard_items, claimed_text)
    }

    /// Substring list filter across all record fields, catalog order kept.
    #[must_use]
    pub fn filter_issues<'c>(
        &self,
        query: &str,
        catalog: &'c [IssueRecord],
    ) -> Vec<&'c IssueRecord> {
        matcher::filter_issues(query, catalog)
    }
}
