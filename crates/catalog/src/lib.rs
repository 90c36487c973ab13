//! Shared data model for the issue catalog.
//!
//! The catalog itself is owned by an external persistence collaborator; this
//! crate defines the one canonical record shape the engine consumes, plus the
//! ephemeral result values the engine produces. Historical catalog exports
//! drifted on field names (`issueDescription` vs `description`, `checklist`
//! vs `checklistItems`) and occasionally carry non-string checklist entries;
//! deserialization absorbs both so the engine never sees a malformed record.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// One troubleshooting entry as supplied by the external catalog.
///
/// Immutable from the engine's perspective: every field is read-only during a
/// match or diff call. Missing text fields deserialize to empty strings; a
/// record with no usable text simply never scores above zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    /// Externally assigned unique id.
    #[serde(default)]
    pub id: String,
    /// Primary identifying text of the issue.
    #[serde(default, alias = "issueDescription")]
    pub description: String,
    /// Owning application or system.
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub root_cause: String,
    /// Standard checks, in display order. Order carries no matching weight.
    #[serde(default, alias = "checklist", deserialize_with = "lenient_strings")]
    pub checklist_items: Vec<String>,
    #[serde(default)]
    pub solution: String,
}

impl IssueRecord {
    /// Checklist entries joined into one haystack for containment scoring.
    #[must_use]
    pub fn checklist_text(&self) -> String {
        self.checklist_items.join(" ")
    }

    /// Every text field joined, used by list filtering and token scoring.
    #[must_use]
    pub fn combined_text(&self) -> String {
        let mut parts = vec![
            self.description.as_str(),
            self.application.as_str(),
            self.root_cause.as_str(),
        ];
        parts.extend(self.checklist_items.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Accept checklist arrays where some snapshots stored numbers (ticket ids)
/// alongside strings. Strings and numbers are kept, anything else is dropped.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

/// Outcome of matching a free-text query against the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MatchResult {
    /// Best-scoring record, absent when nothing cleared the threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueRecord>,
    pub score: f32,
}

impl MatchResult {
    #[must_use]
    pub fn none() -> Self {
        Self {
            issue: None,
            score: 0.0,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.issue.is_some()
    }
}

/// A near-duplicate candidate surfaced while drafting a new catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Suggestion {
    pub issue: IssueRecord,
    /// Jaccard token overlap against the drafted description, in [0, 1].
    pub score: f32,
}

/// Advisory duplicate report: never blocks a save, only warns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct DuplicateReport {
    /// Record whose description is identical after loose normalization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<IssueRecord>,
    /// Near matches ranked by descending overlap, capped by the profile.
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

impl DuplicateReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_none() && self.suggestions.is_empty()
    }
}

/// Standard checklist items not covered by the user's claimed checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ChecklistDiff {
    /// Subset of the standard checklist, original order preserved.
    pub missing_items: Vec<String>,
}

impl ChecklistDiff {
    #[must_use]
    pub fn all_covered(&self) -> bool {
        self.missing_items.is_empty()
    }
}
