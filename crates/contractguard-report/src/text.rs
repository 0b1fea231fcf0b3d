//! Flat plain-text reports for download
//!
//! Sections are separated by 60-character rule lines and titled in capitals.
//! Empty sections are left out entirely.

use contractguard_domain::{
    AnalysisResult, Beneficiary, ComparisonResult, CounterProposal, Flag, Recommendation,
    RiskScore,
};
use std::fmt::Write;

/// Width of rule lines
pub const RULE_WIDTH: usize = 60;

/// Suggested file name for a downloaded analysis report
pub const REPORT_FILENAME: &str = "contract-analysis-report.txt";

const DISCLAIMER: &str = "This report was generated automatically and is not legal advice. \
For important contracts, consult a qualified attorney before signing.";

/// Risk score and recommendation recovered from a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportHeader {
    /// Risk score line
    pub risk_score: RiskScore,
    /// Recommendation line
    pub recommendation: Recommendation,
}

/// Render an analysis as a plain-text report
pub fn analysis_report(analysis: &AnalysisResult) -> String {
    let mut out = String::new();
    title(&mut out, "CONTRACT ANALYSIS REPORT");

    let _ = writeln!(out, "RISK SCORE: {}/{}", analysis.risk_score, RiskScore::MAX);
    let _ = writeln!(out, "RECOMMENDATION: {}", analysis.recommendation);
    let contract_type = match analysis.contract_type_detected.trim() {
        "" => "Not specified",
        t => t,
    };
    let _ = writeln!(out, "CONTRACT TYPE: {}", contract_type);
    if let Some(meta) = &analysis.analysis_metadata {
        let _ = writeln!(out, "GENERATED: {}", meta.timestamp);
    }

    section(&mut out, "SUMMARY");
    let _ = writeln!(out, "{}", analysis.overall_summary);

    flag_section(&mut out, "RED FLAGS", &analysis.red_flags);
    flag_section(&mut out, "YELLOW FLAGS", &analysis.yellow_flags);
    list_section(&mut out, "MISSING PROTECTIONS", &analysis.missing_protections);
    list_section(&mut out, "POSITIVE ASPECTS", &analysis.positive_aspects);
    numbered_section(
        &mut out,
        "KEY QUESTIONS BEFORE SIGNING",
        &analysis.key_questions_before_signing,
    );
    list_section(&mut out, "NEGOTIATION TIPS", &analysis.negotiation_tips);

    disclaimer(&mut out);
    out
}

/// Render a comparison as a plain-text report
pub fn comparison_report(comparison: &ComparisonResult) -> String {
    let mut out = String::new();
    title(&mut out, "CONTRACT COMPARISON REPORT");

    let _ = writeln!(out, "VERDICT: {}", comparison.overall_verdict);
    let _ = writeln!(
        out,
        "CHANGES: {} total, {} in your favor, {} favoring the other party, {} neutral",
        comparison.total_changes,
        comparison.changes_favoring_user,
        comparison.changes_favoring_other,
        comparison.neutral_changes
    );
    if let Some(meta) = &comparison.comparison_metadata {
        let _ = writeln!(out, "YOUR SIDE: {}", meta.user_side);
    }

    section(&mut out, "SUMMARY");
    let _ = writeln!(out, "{}", comparison.summary);
    if !comparison.verdict_explanation.is_empty() {
        let _ = writeln!(out, "\n{}", comparison.verdict_explanation);
    }

    for (heading, who) in [
        ("CHANGES IN YOUR FAVOR", Beneficiary::User),
        ("CHANGES FAVORING THE OTHER PARTY", Beneficiary::OtherParty),
        ("NEUTRAL CHANGES", Beneficiary::Neutral),
    ] {
        let changes: Vec<_> = comparison.changes_for(who).collect();
        if changes.is_empty() {
            continue;
        }
        section(&mut out, &format!("{} ({})", heading, changes.len()));
        for (idx, change) in changes.iter().enumerate() {
            let _ = writeln!(out, "\n{}. {}", idx + 1, change.section);
            if let Some(kind) = &change.change_type {
                let _ = writeln!(out, "   Type: {}", kind);
            }
            if !change.original_text.is_empty() {
                let _ = writeln!(out, "   Before: \"{}\"", change.original_text);
            }
            if !change.revised_text.is_empty() {
                let _ = writeln!(out, "   After: \"{}\"", change.revised_text);
            }
            if !change.explanation.is_empty() {
                let _ = writeln!(out, "   {}", change.explanation);
            }
        }
    }

    list_section(&mut out, "CONCERNS ADDRESSED", &comparison.addressed_concerns);
    list_section(&mut out, "CONCERNS IGNORED", &comparison.ignored_concerns);
    list_section(&mut out, "NEW ISSUES", &comparison.new_issues);
    if !comparison.recommendation.is_empty() {
        section(&mut out, "RECOMMENDATION");
        let _ = writeln!(out, "{}", comparison.recommendation);
    }
    numbered_section(&mut out, "NEXT STEPS", &comparison.next_steps);

    disclaimer(&mut out);
    out
}

/// Render a counter-proposal as a plain-text report
pub fn counter_proposal_report(proposal: &CounterProposal) -> String {
    let mut out = String::new();
    title(&mut out, "COUNTER-PROPOSAL PACKAGE");

    if let Some(meta) = &proposal.proposal_metadata {
        let _ = writeln!(out, "PREPARED FOR: {}", meta.generated_for);
        let _ = writeln!(out, "RED FLAGS ADDRESSED: {}", meta.red_flags_addressed);
    }

    if !proposal.revised_clauses.is_empty() {
        section(
            &mut out,
            &format!("REVISED CLAUSES ({})", proposal.revised_clauses.len()),
        );
        for (idx, clause) in proposal.revised_clauses.iter().enumerate() {
            let priority = clause
                .priority
                .as_deref()
                .map(|p| format!(" [{}]", p.to_uppercase()))
                .unwrap_or_default();
            let _ = writeln!(out, "\n{}. {}{}", idx + 1, clause.issue, priority);
            if !clause.original_clause.is_empty() {
                let _ = writeln!(out, "   Original: \"{}\"", clause.original_clause);
            }
            let _ = writeln!(out, "   Proposed: \"{}\"", clause.revised_clause);
            if !clause.justification.is_empty() {
                let _ = writeln!(out, "   Why: {}", clause.justification);
            }
            if !clause.legal_basis.is_empty() {
                let _ = writeln!(out, "   Basis: {}", clause.legal_basis);
            }
        }
    }

    section(&mut out, "EMAIL");
    let email = &proposal.email_template;
    let _ = writeln!(out, "Subject: {}\n", email.subject);
    if let Some(greeting) = &email.greeting {
        let _ = writeln!(out, "{}\n", greeting);
    }
    let _ = writeln!(out, "{}", email.body);

    if !proposal.talking_points.is_empty() {
        section(&mut out, "TALKING POINTS");
        for (idx, point) in proposal.talking_points.iter().enumerate() {
            let _ = writeln!(out, "\n{}. {}", idx + 1, point.issue);
            let _ = writeln!(out, "   Position: {}", point.your_position);
            let _ = writeln!(out, "   Argument: {}", point.key_argument);
            if let Some(evidence) = &point.supporting_evidence {
                let _ = writeln!(out, "   Evidence: {}", evidence);
            }
            if let Some(reply) = &point.response_to_objections {
                let _ = writeln!(out, "   If they object: {}", reply);
            }
        }
    }

    if !proposal.compromise_options.is_empty() {
        section(&mut out, "COMPROMISE OPTIONS");
        for option in &proposal.compromise_options {
            let _ = writeln!(out, "\n- If they say: \"{}\"", option.if_they_say);
            let _ = writeln!(out, "  You respond: \"{}\"", option.you_respond);
            let _ = writeln!(out, "  Middle ground: {}", option.middle_ground);
        }
    }

    if let Some(strategy) = &proposal.negotiation_strategy {
        section(&mut out, "NEGOTIATION STRATEGY");
        let _ = writeln!(out, "Approach: {}", strategy.approach);
        for principle in &strategy.key_principles {
            let _ = writeln!(out, "- {}", principle);
        }
        if !strategy.when_to_walk_away.is_empty() {
            let _ = writeln!(out, "Walk away if: {}", strategy.when_to_walk_away);
        }
    }

    if let Some(odds) = &proposal.success_probability {
        section(&mut out, "SUCCESS PROBABILITY");
        let _ = writeln!(out, "{}: {}", odds.overall_estimate.to_uppercase(), odds.reasoning);
    }

    disclaimer(&mut out);
    out
}

/// Recover the risk score and recommendation from a rendered analysis report
pub fn parse_report_header(report: &str) -> Option<ReportHeader> {
    let mut risk_score = None;
    let mut recommendation = None;

    for line in report.lines() {
        if let Some(rest) = line.strip_prefix("RISK SCORE:") {
            risk_score = RiskScore::parse(rest);
        } else if let Some(rest) = line.strip_prefix("RECOMMENDATION:") {
            recommendation = Recommendation::parse(rest);
        }
        if risk_score.is_some() && recommendation.is_some() {
            break;
        }
    }

    Some(ReportHeader {
        risk_score: risk_score?,
        recommendation: recommendation?,
    })
}

fn title(out: &mut String, name: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "CONTRACTGUARD AI - {}", name);
    let _ = writeln!(out, "{}\n", rule);
}

fn section(out: &mut String, heading: &str) {
    let rule = "-".repeat(RULE_WIDTH);
    let _ = writeln!(out, "\n{}\n{}\n{}", rule, heading, rule);
}

fn flag_section(out: &mut String, heading: &str, flags: &[Flag]) {
    if flags.is_empty() {
        return;
    }
    section(out, &format!("{} ({})", heading, flags.len()));

    for (idx, flag) in flags.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {} [{}]", idx + 1, flag.category, flag.severity);
        if let Some(clause) = &flag.clause_text {
            let _ = writeln!(out, "   Clause: \"{}\"", clause);
        }
        if let Some(location) = &flag.location {
            let _ = writeln!(out, "   Location: {}", location);
        }
        let _ = writeln!(out, "   Why it matters: {}", flag.explanation);
        if let Some(impact) = &flag.impact {
            let _ = writeln!(out, "   Impact: {}", impact);
        }
        if let Some(suggestion) = &flag.suggestion {
            let _ = writeln!(out, "   Suggestion: {}", suggestion);
        }
        if !flag.questions_to_ask.is_empty() {
            let _ = writeln!(out, "   Questions to ask:");
            for question in &flag.questions_to_ask {
                let _ = writeln!(out, "     - {}", question);
            }
        }
        if let Some(insights) = &flag.community_insights {
            let _ = writeln!(out, "   Community: {}", insights.warning_message);
        }
    }
}

fn list_section(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    section(out, heading);
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
}

fn numbered_section(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    section(out, heading);
    for (idx, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", idx + 1, item);
    }
}

fn disclaimer(out: &mut String) {
    section(out, "DISCLAIMER");
    let _ = writeln!(out, "{}", DISCLAIMER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use contractguard_domain::{Change, EmailTemplate, RevisedClause, Severity, Verdict};
    use proptest::prelude::*;

    fn sample_analysis() -> AnalysisResult {
        let mut analysis = AnalysisResult::new(
            RiskScore::new(8),
            Recommendation::Negotiate,
            "The lease favors the landlord.",
        );
        analysis.contract_type_detected = "rental".to_string();
        analysis.red_flags = vec![Flag::new("Automatic Renewal", Severity::High, "Renews silently")
            .with_clause("shall automatically renew")];
        analysis.negotiation_tips = vec!["Ask for opt-in renewal".to_string()];
        analysis
    }

    #[test]
    fn test_header_lines_come_first() {
        let report = analysis_report(&sample_analysis());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=".repeat(RULE_WIDTH));
        assert_eq!(lines[4], "RISK SCORE: 8/10");
        assert_eq!(lines[5], "RECOMMENDATION: NEGOTIATE");
        assert_eq!(lines[6], "CONTRACT TYPE: rental");
    }

    #[test]
    fn test_sections_and_omissions() {
        let report = analysis_report(&sample_analysis());

        assert!(report.contains("\nSUMMARY\n"));
        assert!(report.contains("RED FLAGS (1)"));
        assert!(report.contains("   Clause: \"shall automatically renew\""));
        assert!(report.contains("NEGOTIATION TIPS"));
        assert!(report.contains("DISCLAIMER"));
        assert!(!report.contains("YELLOW FLAGS"));
        assert!(!report.contains("POSITIVE ASPECTS"));
    }

    #[test]
    fn test_rules_are_sixty_wide() {
        let report = analysis_report(&sample_analysis());
        let rules: Vec<&str> = report
            .lines()
            .filter(|l| l.len() > 1 && (l.chars().all(|c| c == '-') || l.chars().all(|c| c == '=')))
            .collect();
        assert!(rules.len() >= 6);
        for line in rules {
            assert_eq!(line.chars().count(), RULE_WIDTH);
        }
    }

    #[test]
    fn test_header_parse_rejects_other_text() {
        assert_eq!(parse_report_header("hello"), None);
        assert_eq!(parse_report_header("RISK SCORE: 5/10\n"), None);
    }

    #[test]
    fn test_comparison_report_groups_changes() {
        let mut comparison = ComparisonResult {
            summary: "Deposit fixed.".to_string(),
            overall_verdict: Verdict::NegotiateMore,
            verdict_explanation: String::new(),
            total_changes: 0,
            changes_favoring_user: 0,
            changes_favoring_other: 0,
            neutral_changes: 0,
            changes: vec![Change {
                section: "Security Deposit".to_string(),
                change_type: Some("modified".to_string()),
                original_text: "non-refundable".to_string(),
                revised_text: "refundable within 30 days".to_string(),
                who_benefits: Beneficiary::User,
                benefit_level: None,
                explanation: "You get your deposit back.".to_string(),
                impact: None,
            }],
            addressed_concerns: vec!["Deposit".to_string()],
            ignored_concerns: Vec::new(),
            new_issues: Vec::new(),
            recommendation: String::new(),
            next_steps: Vec::new(),
            comparison_metadata: None,
        };
        comparison.retally();

        let report = comparison_report(&comparison);
        assert!(report.contains("VERDICT: NEGOTIATE_MORE"));
        assert!(report.contains("CHANGES IN YOUR FAVOR (1)"));
        assert!(!report.contains("NEUTRAL CHANGES"));
        assert!(report.contains("CONCERNS ADDRESSED"));
    }

    #[test]
    fn test_counter_proposal_report() {
        let proposal = CounterProposal {
            revised_clauses: vec![RevisedClause {
                issue: "Late Fee".to_string(),
                original_clause: "$150".to_string(),
                revised_clause: "$50 after a 5-day grace period".to_string(),
                justification: String::new(),
                legal_basis: String::new(),
                priority: Some("high".to_string()),
            }],
            email_template: EmailTemplate {
                subject: "Lease amendments".to_string(),
                greeting: None,
                body: "Hello, please consider these changes.".to_string(),
                tone: None,
            },
            talking_points: Vec::new(),
            compromise_options: Vec::new(),
            negotiation_strategy: None,
            success_probability: None,
            proposal_metadata: None,
        };

        let report = counter_proposal_report(&proposal);
        assert!(report.contains("1. Late Fee [HIGH]"));
        assert!(report.contains("Subject: Lease amendments"));
        assert!(!report.contains("TALKING POINTS"));
    }

    proptest! {
        #[test]
        fn prop_header_round_trip(score in -5i64..20, rec in 0usize..4) {
            let recommendation = [
                Recommendation::Sign,
                Recommendation::Negotiate,
                Recommendation::Reject,
                Recommendation::Review,
            ][rec];
            let analysis = AnalysisResult::new(RiskScore::new(score), recommendation, "summary");

            let header = parse_report_header(&analysis_report(&analysis)).unwrap();
            prop_assert_eq!(header.risk_score, analysis.risk_score);
            prop_assert_eq!(header.recommendation, recommendation);
        }
    }
}
