//! Guided troubleshooting flow.
//!
//! A thin orchestrator over the engine: match the user's problem text, diff
//! their claimed checks against the matched issue's checklist, then assemble
//! an escalation hand-off prompt. The session is an explicit immutable value
//! the caller threads through each step; transitions consume the old state
//! and return the new one, and nothing reverses automatically. `reset` is
//! always available.

mod prompt;

use serde::Serialize;
use thiserror::Error;
use triage_catalog::IssueRecord;
use triage_engine::TriageEngine;

pub type Result<T> = std::result::Result<T, FlowError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlowError {
    #[error("cannot {action} while the session is in the `{from}` stage")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

/// One guided session, from first query to escalation hand-off.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum TriageSession {
    Start,
    /// A catalog entry cleared the match threshold.
    Matched {
        query: String,
        issue: IssueRecord,
        score: f32,
    },
    /// Nothing in the catalog explains the query; terminal apart from reset.
    Unmatched { query: String },
    /// Every standard check is covered by the user's claims.
    ComplianceChecked {
        query: String,
        issue: IssueRecord,
        claimed: Vec<String>,
    },
    /// Some standard checks remain unconfirmed.
    GapsFound {
        query: String,
        issue: IssueRecord,
        claimed: Vec<String>,
        missing: Vec<String>,
    },
    /// Terminal: the hand-off text is assembled and ready to present.
    EscalationPromptReady { prompt: String },
}

impl Default for TriageSession {
    fn default() -> Self {
        Self::Start
    }
}

impl TriageSession {
    #[must_use]
    pub fn start() -> Self {
        Self::Start
    }

    /// Stage label used in errors, logs, and serialized output.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Matched { .. } => "matched",
            Self::Unmatched { .. } => "unmatched",
            Self::ComplianceChecked { .. } => "compliance_checked",
            Self::GapsFound { .. } => "gaps_found",
            Self::EscalationPromptReady { .. } => "escalation_prompt_ready",
        }
    }

    /// Match the user's problem text against the catalog. Valid from `Start`.
    pub fn submit_query(
        self,
        engine: &TriageEngine,
        query: &str,
        catalog: &[IssueRecord],
    ) -> Result<Self> {
        if !matches!(self, Self::Start) {
            return Err(self.invalid("submit a query"));
        }

        let result = engine.match_issue(query, catalog);
        log::debug!(
            "session query '{}' resolved to stage {}",
            query,
            if result.is_match() { "matched" } else { "unmatched" }
        );
        Ok(match result.issue {
            Some(issue) => Self::Matched {
                query: query.to_string(),
                issue,
                score: result.score,
            },
            None => Self::Unmatched {
                query: query.to_string(),
            },
        })
    }

    /// Diff the user's claimed checks against the matched issue's checklist.
    /// Valid from `Matched`.
    pub fn submit_claims(self, engine: &TriageEngine, claimed_text: &str) -> Result<Self> {
        let (query, issue) = match self {
            Self::Matched { query, issue, .. } => (query, issue),
            other => return Err(other.invalid("submit claimed checks")),
        };

        let claimed = triage_engine::split_claimed_items(claimed_text);
        let diff = engine.diff_checklist(&issue.checklist_items, claimed_text);
        Ok(if diff.all_covered() {
            Self::ComplianceChecked {
                query,
                issue,
                claimed,
            }
        } else {
            Self::GapsFound {
                query,
                issue,
                claimed,
                missing: diff.missing_items,
            }
        })
    }

    /// Assemble the escalation hand-off prompt. Valid from either compliance
    /// outcome.
    pub fn request_escalation(self) -> Result<Self> {
        match self {
            Self::ComplianceChecked {
                query,
                issue,
                claimed,
            } => Ok(Self::EscalationPromptReady {
                prompt: prompt::render_escalation_prompt(&query, &issue, &claimed, &[]),
            }),
            Self::GapsFound {
                query,
                issue,
                claimed,
                missing,
            } => Ok(Self::EscalationPromptReady {
                prompt: prompt::render_escalation_prompt(&query, &issue, &claimed, &missing),
            }),
            other => Err(other.invalid("request escalation")),
        }
    }

    /// Explicit return to `Start`, allowed from any stage.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::Start
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            from: self.stage(),
            action,
        }
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
            root_cause: "UPN collision".into(),
            checklist_items: vec![
                "Check UPN uniqueness".into(),
                "Check mail attribute conflict".into(),
            ],
            solution: "Rename the conflicting object".into(),
        }]
    }

    #[test]
    fn full_flow_reaches_escalation_with_gaps() {
        let engine = TriageEngine::default();
        let session = TriageSession::start()
            .submit_query(&engine, "409 AD error", &catalog())
            .unwrap();
        assert_eq!(session.stage(), "matched");

        let session = session
            .submit_claims(&engine, "I have checked the following:\n- UPN uniqueness")
            .unwrap();
        let TriageSession::GapsFound { ref missing, .. } = session else {
            panic!("expected gaps, got {}", session.stage());
        };
        assert_eq!(missing, &vec!["Check mail attribute conflict".to_string()]);

        let session = session.request_escalation().unwrap();
        let TriageSession::EscalationPromptReady { prompt } = session else {
            panic!("expected escalation prompt");
        };
        assert!(prompt.contains("Check mail attribute conflict"));
    }

    #[test]
    fn covering_every_check_reaches_the_all_checked_branch() {
        let engine = TriageEngine::default();
        let session = TriageSession::start()
            .submit_query(&engine, "409 AD error", &catalog())
            .unwrap()
            .submit_claims(
                &engine,
                "Check UPN uniqueness\nCheck mail attribute conflict",
            )
            .unwrap();
        assert_eq!(session.stage(), "compliance_checked");

        let session = session.request_escalation().unwrap();
        let TriageSession::EscalationPromptReady { prompt } = session else {
            panic!("expected escalation prompt");
        };
        assert!(prompt.contains("All standard checks are confirmed."));
    }

    #[test]
    fn unknown_query_lands_in_unmatched() {
        let engine = TriageEngine::default();
        let session = TriageSession::start()
            .submit_query(&engine, "zzz_no_such_thing_987", &catalog())
            .unwrap();
        assert_eq!(session.stage(), "unmatched");

        // No claims, no escalation from here; only reset.
        let err = session.clone().submit_claims(&engine, "anything").unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition {
                from: "unmatched",
                action: "submit claimed checks"
            }
        );
        let err = session.clone().request_escalation().unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition {
                from: "unmatched",
                action: "request escalation"
            }
        );
        assert_eq!(session.reset(), TriageSession::Start);
    }

    #[test]
    fn transitions_are_not_reversible_without_reset() {
        let engine = TriageEngine::default();
        let session = TriageSession::start()
            .submit_query(&engine, "409 AD error", &catalog())
            .unwrap();

        let err = session
            .clone()
            .submit_query(&engine, "another query", &catalog())
            .unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition {
                from: "matched",
                action: "submit a query"
            }
        );

        // Reset is available from every stage.
        assert_eq!(session.reset(), TriageSession::Start);
    }

    #[test]
    fn escalation_stage_is_terminal() {
        let engine = TriageEngine::default();
        let session = TriageSession::start()
            .submit_query(&engine, "409 AD error", &catalog())
            .unwrap()
            .submit_claims(&engine, "")
            .unwrap()
            .request_escalation()
            .unwrap();

        let err = session.clone().request_escalation().unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition {
                from: "escalation_prompt_ready",
                action: "request escalation"
            }
        );
        assert_eq!(session.reset(), TriageSession::Start);
    }
}
