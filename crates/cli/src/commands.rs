//! Command implementations and their JSON output shapes.

use anyhow::Result;
use serde::Serialize;
use triage_catalog::{DuplicateReport, IssueRecord, MatchResult};
use triage_engine::TriageEngine;

use crate::find_issue;

#[derive(Debug, Serialize)]
pub struct MatchOutput {
    pub query: String,
    pub matched: bool,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Debug, Serialize)]
pub struct DuplicatesOutput {
    pub description: String,
    #[serde(flatten)]
    pub report: DuplicateReport,
}

#[derive(Debug, Serialize)]
pub struct ChecklistOutput {
    pub issue_id: String,
    pub standard_items: Vec<String>,
    pub claimed_items: Vec<String>,
    pub missing_items: Vec<String>,
    pub all_covered: bool,
}

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub total: usize,
    pub shown: usize,
    pub issues: Vec<IssueRecord>,
}

pub fn run_match(engine: &TriageEngine, query: &str, catalog: &[IssueRecord]) -> MatchOutput {
    let result = engine.match_issue(query, catalog);
    MatchOutput {
        query: query.to_string(),
        matched: result.is_match(),
        result,
    }
}

pub fn run_duplicates(
    engine: &TriageEngine,
    description: &str,
    catalog: &[IssueRecord],
) -> DuplicatesOutput {
    DuplicatesOutput {
        description: description.to_string(),
        report: engine.find_duplicates(description, catalog),
    }
}

pub fn run_checklist(
    engine: &TriageEngine,
    issue_id: &str,
    claimed_text: &str,
    catalog: &[IssueRecord],
) -> Result<ChecklistOutput> {
    let issue = find_issue(catalog, issue_id)?;
    let diff = engine.diff_checklist(&issue.checklist_items, claimed_text);
    Ok(ChecklistOutput {
        issue_id: issue.id.clone(),
        standard_items: issue.checklist_items.clone(),
        claimed_items: triage_engine::split_claimed_items(claimed_text),
        all_covered: diff.all_covered(),
        missing_items: diff.missing_items,
    })
}

pub fn run_list(engine: &TriageEngine, query: &str, catalog: &[IssueRecord]) -> ListOutput {
    let issues: Vec<IssueRecord> = engine
        .filter_issues(query, catalog)
        .into_iter()
        .cloned()
        .collect();
    ListOutput {
        total: catalog.len(),
        shown: issues.len(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<IssueRecord> {
        vec![IssueRecord {
            id: "1".into(),
            description: "409 duplicate user error in Active Directory".into(),
            application: "Active Directory".into(),
            checklist_items: vec![
                "Check UPN uniqueness".into(),
                "Check mail attribute conflict".into(),
            ],
            ..IssueRecord::default()
        }]
    }

    #[test]
    fn match_output_serializes_without_issue_key_when_unmatched() {
        let engine = TriageEngine::default();
        let out = run_match(&engine, "zzz_no_such_thing_987", &catalog());
        assert!(!out.matched);
        let json = serde_json::to_string(&out).unwrap();
        assert!(!json.contains("\"issue\""));
    }

    #[test]
    fn checklist_command_reports_missing_and_claimed() {
        let engine = TriageEngine::default();
        let out = run_checklist(
            &engine,
            "1",
            "I have checked the following:\n- UPN uniqueness",
            &catalog(),
        )
        .unwrap();
        assert!(!out.all_covered);
        assert_eq!(out.missing_items, vec!["Check mail attribute conflict"]);
        assert_eq!(out.claimed_items.len(), 2);
    }

    #[test]
    fn list_command_counts_both_totals() {
        let engine = TriageEngine::default();
        let out = run_list(&engine, "okta", &catalog());
        assert_eq!(out.total, 1);
        assert_eq!(out.shown, 0);
    }
}
