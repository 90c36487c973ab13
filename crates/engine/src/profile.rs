//! Matching profiles.
//!
//! Every tunable the engine consults lives here: field weights for the
//! substring scorer, similarity thresholds, token rules, and the suggestion
//! cap. The observed source constants are reasonable defaults, not
//! load-bearing business rules, so they ship as data: built-in profiles are
//! compiled in from `profiles/*.json` and external files can override them.

use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, Result};

const BUILTIN_DEFAULT: &str = include_str!("../../../profiles/default.json");
const BUILTIN_STRICT: &str = include_str!("../../../profiles/strict.json");

pub const PROFILE_SCHEMA_VERSION: u32 = 1;

/// Points awarded by the weighted substring scorer.
///
/// Description is the primary identifying text and weighs highest;
/// application and root cause carry medium weight; checklist text lowest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldWeights {
    pub description: f32,
    pub application: f32,
    pub root_cause: f32,
    pub checklist: f32,
    /// Awarded once per query token found anywhere in the record.
    pub token_hit: f32,
    /// Extra point for short codes (error numbers) found in description or
    /// checklist text.
    pub short_query_bonus: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            description: 5.0,
            application: 2.0,
            root_cause: 2.0,
            checklist: 1.0,
            token_hit: 1.0,
            short_query_bonus: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Minimum weighted score for `find_best_match` to report a match.
    /// The default (2.0) demands at least two weighted hits so a single
    /// coincidental word overlap never produces a false match.
    pub min_match_score: f32,
    /// Minimum Jaccard overlap for a near-duplicate suggestion, in [0, 1].
    pub duplicate_similarity: f32,
    /// Fraction of a checklist item's tokens that must appear in the claimed
    /// text for the item to count as covered, in [0, 1].
    pub coverage_ratio: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_match_score: 2.0,
            duplicate_similarity: 0.45,
            coverage_ratio: 0.55,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenRules {
    /// Tokens shorter than this are discarded before overlap scoring.
    pub min_token_len: usize,
    /// Queries at most this long (after light normalization) qualify for the
    /// short-query bonus.
    pub short_query_max_len: usize,
}

impl Default for TokenRules {
    fn default() -> Self {
        Self {
            min_token_len: 3,
            short_query_max_len: 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchProfile {
    name: String,
    description: Option<String>,
    weights: FieldWeights,
    thresholds: Thresholds,
    tokens: TokenRules,
    max_suggestions: usize,
}

impl Default for MatchProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: None,
            weights: FieldWeights::default(),
            thresholds: Thresholds::default(),
            tokens: TokenRules::default(),
            max_suggestions: 3,
        }
    }
}

impl MatchProfile {
    /// Resolve a profile by built-in name or filesystem path.
    pub fn resolve(selector: &str) -> Result<Self> {
        match selector {
            "default" => Self::from_bytes("default", BUILTIN_DEFAULT.as_bytes()),
            "strict" => Self::from_bytes("strict", BUILTIN_STRICT.as_bytes()),
            other => {
                let path = Path::new(other);
                if path.is_file() {
                    Self::from_path(path)
                } else {
                    Err(EngineError::UnknownProfile(other.to_string()))
                }
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom")
            .to_string();
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&name, &bytes)
    }

    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self> {
        let raw: RawProfile = serde_json::from_slice(bytes)?;
        Self::from_raw(name, raw)
    }

    fn from_raw(name: &str, raw: RawProfile) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != PROFILE_SCHEMA_VERSION {
                return Err(EngineError::InvalidProfile {
                    name: name.to_string(),
                    reason: format!(
                        "schema_version {schema_version} is not supported (expected {PROFILE_SCHEMA_VERSION})"
                    ),
                });
            }
        }

        let defaults = Self::default();
        let weights = raw.weights.unwrap_or_default();
        let thresholds = raw.thresholds.unwrap_or_default();
        let tokens = raw.tokens.unwrap_or_default();
        let suggestions = raw.suggestions.unwrap_or_default();

        let profile = Self {
            name: raw.name.unwrap_or_else(|| name.to_string()),
            description: raw.description,
            weights: FieldWeights {
                description: weights.description.unwrap_or(defaults.weights.description),
                application: weights.application.unwrap_or(defaults.weights.application),
                root_cause: weights.root_cause.unwrap_or(defaults.weights.root_cause),
                checklist: weights.checklist.unwrap_or(defaults.weights.checklist),
                token_hit: weights.token_hit.unwrap_or(defaults.weights.token_hit),
                short_query_bonus: weights
                    .short_query_bonus
                    .unwrap_or(defaults.weights.short_query_bonus),
            },
            thresholds: Thresholds {
                min_match_score: thresholds
                    .min_match_score
                    .unwrap_or(defaults.thresholds.min_match_score),
                duplicate_similarity: thresholds
                    .duplicate_similarity
                    .unwrap_or(defaults.thresholds.duplicate_similarity),
                coverage_ratio: thresholds
                    .coverage_ratio
                    .unwrap_or(defaults.thresholds.coverage_ratio),
            },
            tokens: TokenRules {
                min_token_len: tokens.min_token_len.unwrap_or(defaults.tokens.min_token_len),
                short_query_max_len: tokens
                    .short_query_max_len
                    .unwrap_or(defaults.tokens.short_query_max_len),
            },
            max_suggestions: suggestions.max_suggestions.unwrap_or(defaults.max_suggestions),
        };

        profile.validate(name)?;
        Ok(profile)
    }

    fn validate(&self, name: &str) -> Result<()> {
        let invalid = |reason: String| EngineError::InvalidProfile {
            name: name.to_string(),
            reason,
        };

        for (label, value) in [
            ("weights.description", self.weights.description),
            ("weights.application", self.weights.application),
            ("weights.root_cause", self.weights.root_cause),
            ("weights.checklist", self.weights.checklist),
            ("weights.token_hit", self.weights.token_hit),
            ("weights.short_query_bonus", self.weights.short_query_bonus),
            ("thresholds.min_match_score", self.thresholds.min_match_score),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{label} must be a finite non-negative number")));
            }
        }

        for (label, value) in [
            ("thresholds.duplicate_similarity", self.thresholds.duplicate_similarity),
            ("thresholds.coverage_ratio", self.thresholds.coverage_ratio),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{label} must be within [0, 1]")));
            }
        }

        if self.tokens.min_token_len == 0 {
            return Err(invalid("tokens.min_token_len must be at least 1".to_string()));
        }
        if self.max_suggestions == 0 {
            return Err(invalid("suggestions.max_suggestions must be at least 1".to_string()));
        }

        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn weights(&self) -> &FieldWeights {
        &self.weights
    }

    #[must_use]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenRules {
        &self.tokens
    }

    #[must_use]
    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawProfile {
    #[serde(default)]
    schema_version: Option<u32>,
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    weights: Option<RawWeights>,
    #[serde(default)]
    thresholds: Option<RawThresholds>,
    #[serde(default)]
    tokens: Option<RawTokenRules>,
    #[serde(default)]
    suggestions: Option<RawSuggestions>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawWeights {
    description: Option<f32>,
    application: Option<f32>,
    root_cause: Option<f32>,
    checklist: Option<f32>,
    token_hit: Option<f32>,
    short_query_bonus: Option<f32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawThresholds {
    min_match_score: Option<f32>,
    duplicate_similarity: Option<f32>,
    coverage_ratio: Option<f32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawTokenRules {
    min_token_len: Option<usize>,
    short_query_max_len: Option<usize>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawSuggestions {
    max_suggestions: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_default_matches_compiled_defaults() {
        let profile = MatchProfile::resolve("default").unwrap();
        let compiled = MatchProfile::default();
        assert_eq!(profile.weights(), compiled.weights());
        assert_eq!(profile.thresholds(), compiled.thresholds());
        assert_eq!(profile.tokens(), compiled.tokens());
        assert_eq!(profile.max_suggestions(), compiled.max_suggestions());
    }

    #[test]
    fn builtin_strict_raises_thresholds() {
        let strict = MatchProfile::resolve("strict").unwrap();
        assert!(strict.thresholds().min_match_score > 2.0);
        assert!(strict.thresholds().duplicate_similarity > 0.45);
        assert_eq!(strict.max_suggestions(), 2);
        // Unspecified sections fall back to the compiled defaults.
        assert_eq!(strict.tokens(), MatchProfile::default().tokens());
    }

    #[test]
    fn unknown_profile_name_is_rejected() {
        let err = MatchProfile::resolve("no-such-profile").unwrap_err();
        assert!(matches!(err, EngineError::UnknownProfile(_)));
    }

    #[test]
    fn out_of_range_ratio_is_rejected() {
        let err = MatchProfile::from_bytes(
            "test",
            br#"{"thresholds": {"coverage_ratio": 1.5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidProfile { .. }));
    }

    #[test]
    fn unsupported_schema_version_is_rejected() {
        let err = MatchProfile::from_bytes("test", br#"{"schema_version": 9}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidProfile { .. }));
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let profile = MatchProfile::from_bytes(
            "test",
            br#"{"weights": {"description": 7.5}}"#,
        )
        .unwrap();
        assert_eq!(profile.weights().description, 7.5);
        assert_eq!(profile.weights().application, 2.0);
        assert_eq!(profile.thresholds().min_match_score, 2.0);
    }
}
