//! Escalation prompt rendering.
//!
//! Assembles the hand-off text deterministically from the session's inputs.
//! Dispatching it anywhere (an inference endpoint, a ticket system) is the
//! caller's business.

use triage_catalog::IssueRecord;

pub(crate) fn render_escalation_prompt(
    query: &str,
    issue: &IssueRecord,
    claimed: &[String],
    missing: &[String],
) -> String {
    let mut md = String::new();
    md.push_str("# Troubleshooting escalation\n\n");

    md.push_str("## Reported issue\n\n");
    md.push_str(query.trim());
    md.push_str("\n\n");

    md.push_str("## Matched catalog entry\n\n");
    md.push_str(&format!("- Description: {}\n", field_or_na(&issue.description)));
    md.push_str(&format!("- Application: {}\n", field_or_na(&issue.application)));
    md.push_str(&format!("- Root cause: {}\n", field_or_na(&issue.root_cause)));
    md.push_str(&format!("- Solution: {}\n\n", field_or_na(&issue.solution)));

    md.push_str("## Standard checklist\n\n");
    push_bullets(&mut md, &issue.checklist_items, "No checklist recorded.");

    md.push_str("## Checks the user reports having done\n\n");
    push_bullets(&mut md, claimed, "None reported.");

    md.push_str("## Checks still unconfirmed\n\n");
    push_bullets(&mut md, missing, "All standard checks are confirmed.");

    md
}

fn field_or_na(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "n/a"
    } else {
        trimmed
    }
}

fn push_bullets(md: &mut String, items: &[String], empty_note: &str) {
    if items.is_empty() {
        md.push_str(empty_note);
        md.push('\n');
    } else {
        for item in items {
            md.push_str(&format!("- {item}\n"));
        }
    }
    md.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> IssueRecord {
        IssueRecord {
            id: "1".into(),
            description: "409 duplicate user error in Active Directory".into(),
            application: "Active Directory".into(),
            root_cause: "UPN collision".into(),
            checklist_items: vec!["Check UPN uniqueness".into()],
            solution: "Rename the conflicting object".into(),
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let claimed = vec!["UPN uniqueness".to_string()];
        let missing: Vec<String> = Vec::new();
        let a = render_escalation_prompt("409 AD error", &issue(), &claimed, &missing);
        let b = render_escalation_prompt("409 AD error", &issue(), &claimed, &missing);
        assert_eq!(a, b);
    }

    #[test]
    fn prompt_contains_every_section() {
        let claimed = vec!["UPN uniqueness".to_string()];
        let missing = vec!["Check mail attribute conflict".to_string()];
        let prompt = render_escalation_prompt("409 AD error", &issue(), &claimed, &missing);

        assert!(prompt.contains("## Reported issue"));
        assert!(prompt.contains("409 AD error"));
        assert!(prompt.contains("- Root cause: UPN collision"));
        assert!(prompt.contains("- Check UPN uniqueness"));
        assert!(prompt.contains("- Check mail attribute conflict"));
    }

    #[test]
    fn empty_sections_render_placeholders() {
        let prompt = render_escalation_prompt("409", &issue(), &[], &[]);
        assert!(prompt.contains("None reported."));
        assert!(prompt.contains("All standard checks are confirmed."));
    }
}
