//! Interactive guided flow: match, compare checks, assemble escalation.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input};
use triage_catalog::IssueRecord;
use triage_engine::TriageEngine;
use triage_flow::TriageSession;

pub fn run(engine: &TriageEngine, catalog: &[IssueRecord]) -> Result<()> {
    loop {
        let session = TriageSession::start();
        let query: String = Input::new()
            .with_prompt("Describe the issue")
            .interact_text()?;

        let session = session.submit_query(engine, &query, catalog)?;
        if let TriageSession::Matched { issue, score, .. } = &session {
            print_issue(issue, *score);
        }
        match session {
            TriageSession::Unmatched { .. } => {
                println!(
                    "{}",
                    style("No matching catalog issue found. Try adding the system name (e.g. \"409 Active Directory\").")
                        .yellow()
                );
            }
            matched @ TriageSession::Matched { .. } => run_compliance(engine, matched)?,
            _ => unreachable!("submit_query only yields matched or unmatched"),
        }

        let again = Confirm::new()
            .with_prompt("Start over with a new issue?")
            .default(false)
            .interact()?;
        if !again {
            return Ok(());
        }
    }
}

fn run_compliance(engine: &TriageEngine, session: TriageSession) -> Result<()> {
    let claimed: String = Input::new()
        .with_prompt("Which checks have you already done? (separate with ';', empty for none)")
        .allow_empty(true)
        .interact_text()?;
    let claimed_text = claimed.replace(';', "\n");

    let session = session.submit_claims(engine, &claimed_text)?;
    match &session {
        TriageSession::ComplianceChecked { .. } => {
            println!("{}", style("All standard checks are covered.").green());
        }
        TriageSession::GapsFound { missing, .. } => {
            println!("{}", style("Still unconfirmed:").red());
            for item in missing {
                println!("  - {item}");
            }
        }
        _ => unreachable!("submit_claims only yields a compliance outcome"),
    }

    let escalate = Confirm::new()
        .with_prompt("Assemble an escalation prompt?")
        .default(false)
        .interact()?;
    if escalate {
        let session = session.request_escalation()?;
        if let TriageSession::EscalationPromptReady { prompt } = &session {
            println!("\n{prompt}");
        }
    }
    Ok(())
}

fn print_issue(issue: &IssueRecord, score: f32) {
    println!(
        "\n{} {} {}",
        style("Matched:").cyan().bold(),
        style(&issue.description).bold(),
        style(format!("(score {score:.1})")).dim()
    );
    if !issue.application.is_empty() {
        println!("  Application: {}", issue.application);
    }
    if !issue.root_cause.is_empty() {
        println!("  Root cause: {}", issue.root_cause);
    }
    if !issue.checklist_items.is_empty() {
        println!("  Standard checklist:");
        for item in &issue.checklist_items {
            println!("    - {item}");
        }
    }
    if !issue.solution.is_empty() {
        println!("  Solution: {}", issue.solution);
    }
}
