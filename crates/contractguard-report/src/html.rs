//! Self-contained HTML views
//!
//! Every interpolated string goes through [`escape`]; oracle output is
//! untrusted text.

use crate::gauge::RiskGauge;
use contractguard_domain::{
    AnalysisResult, Beneficiary, CommunityInsights, ComparisonResult, CounterProposal, Flag,
    Severity,
};
use std::fmt::Write;

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render an analysis: risk gauge, flags grouped by severity, lists
pub fn analysis_html(analysis: &AnalysisResult) -> String {
    let gauge = RiskGauge::new(analysis.risk_score);
    let mut out = String::new();

    let _ = writeln!(out, r#"<section class="cg-analysis">"#);
    let _ = writeln!(
        out,
        r#"<div class="cg-gauge" data-level="{level}"><div class="cg-gauge-fill" style="width:{pct}%;background:{color}"></div></div>"#,
        level = gauge.label(),
        pct = gauge.percent(),
        color = gauge.color()
    );
    let _ = writeln!(
        out,
        r#"<p class="cg-score" style="color:{}">Risk score <strong>{}/10</strong> ({})</p>"#,
        gauge.color(),
        gauge.score(),
        gauge.label()
    );
    let _ = writeln!(
        out,
        r#"<p class="cg-recommendation">Recommendation: <strong>{}</strong></p>"#,
        analysis.recommendation
    );
    if !analysis.contract_type_detected.is_empty() {
        let _ = writeln!(
            out,
            r#"<p class="cg-type">Contract type: {}</p>"#,
            escape(&analysis.contract_type_detected)
        );
    }
    let _ = writeln!(
        out,
        r#"<p class="cg-summary">{}</p>"#,
        escape(&analysis.overall_summary)
    );

    for severity in Severity::ALL {
        let flags = analysis.flags_with_severity(severity);
        if flags.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            r#"<div class="cg-flags cg-{}"><h3>{} severity ({})</h3>"#,
            severity.as_str().to_lowercase(),
            severity,
            flags.len()
        );
        for flag in flags {
            flag_html(&mut out, flag);
        }
        let _ = writeln!(out, "</div>");
    }

    list_html(&mut out, "Missing protections", &analysis.missing_protections);
    list_html(&mut out, "Positive aspects", &analysis.positive_aspects);
    list_html(
        &mut out,
        "Key questions before signing",
        &analysis.key_questions_before_signing,
    );
    list_html(&mut out, "Negotiation tips", &analysis.negotiation_tips);

    let _ = writeln!(out, "</section>");
    out
}

/// Render a comparison with changes grouped by who benefits
pub fn comparison_html(comparison: &ComparisonResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, r#"<section class="cg-comparison">"#);
    let _ = writeln!(
        out,
        r#"<p class="cg-verdict" data-verdict="{0}">Verdict: <strong>{0}</strong></p>"#,
        comparison.overall_verdict
    );
    let _ = writeln!(out, "<p>{}</p>", escape(&comparison.summary));
    if !comparison.verdict_explanation.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", escape(&comparison.verdict_explanation));
    }
    let _ = writeln!(
        out,
        r#"<ul class="cg-tally"><li>In your favor: {}</li><li>Favoring the other party: {}</li><li>Neutral: {}</li></ul>"#,
        comparison.changes_favoring_user, comparison.changes_favoring_other, comparison.neutral_changes
    );

    for (heading, who) in [
        ("In your favor", Beneficiary::User),
        ("Favoring the other party", Beneficiary::OtherParty),
        ("Neutral", Beneficiary::Neutral),
    ] {
        let mut changes = comparison.changes_for(who).peekable();
        if changes.peek().is_none() {
            continue;
        }
        let _ = writeln!(
            out,
            r#"<div class="cg-changes cg-{}"><h3>{}</h3>"#,
            who.as_str(),
            heading
        );
        for change in changes {
            let _ = writeln!(out, r#"<article class="cg-change">"#);
            let _ = writeln!(out, "<h4>{}</h4>", escape(&change.section));
            if !change.original_text.is_empty() {
                let _ = writeln!(out, "<del>{}</del>", escape(&change.original_text));
            }
            if !change.revised_text.is_empty() {
                let _ = writeln!(out, "<ins>{}</ins>", escape(&change.revised_text));
            }
            let _ = writeln!(out, "<p>{}</p>", escape(&change.explanation));
            let _ = writeln!(out, "</article>");
        }
        let _ = writeln!(out, "</div>");
    }

    list_html(&mut out, "Concerns addressed", &comparison.addressed_concerns);
    list_html(&mut out, "Concerns ignored", &comparison.ignored_concerns);
    list_html(&mut out, "New issues", &comparison.new_issues);
    if !comparison.recommendation.is_empty() {
        let _ = writeln!(
            out,
            r#"<p class="cg-advice">{}</p>"#,
            escape(&comparison.recommendation)
        );
    }
    list_html(&mut out, "Next steps", &comparison.next_steps);

    let _ = writeln!(out, "</section>");
    out
}

/// Render a counter-proposal: clauses, email, talking points
pub fn counter_proposal_html(proposal: &CounterProposal) -> String {
    let mut out = String::new();

    let _ = writeln!(out, r#"<section class="cg-proposal">"#);

    if !proposal.revised_clauses.is_empty() {
        let _ = writeln!(out, "<h3>Revised clauses</h3>");
        for clause in &proposal.revised_clauses {
            let _ = writeln!(out, r#"<article class="cg-clause">"#);
            let _ = writeln!(out, "<h4>{}</h4>", escape(&clause.issue));
            if !clause.original_clause.is_empty() {
                let _ = writeln!(out, "<del>{}</del>", escape(&clause.original_clause));
            }
            let _ = writeln!(out, "<ins>{}</ins>", escape(&clause.revised_clause));
            if !clause.justification.is_empty() {
                let _ = writeln!(out, "<p>{}</p>", escape(&clause.justification));
            }
            if !clause.legal_basis.is_empty() {
                let _ = writeln!(out, r#"<p class="cg-basis">{}</p>"#, escape(&clause.legal_basis));
            }
            let _ = writeln!(out, "</article>");
        }
    }

    let email = &proposal.email_template;
    let _ = writeln!(out, r#"<div class="cg-email"><h3>Email</h3>"#);
    let _ = writeln!(out, "<p><strong>Subject:</strong> {}</p>", escape(&email.subject));
    if let Some(greeting) = &email.greeting {
        let _ = writeln!(out, "<p>{}</p>", escape(greeting));
    }
    let _ = writeln!(out, "<pre>{}</pre>", escape(&email.body));
    let _ = writeln!(out, "</div>");

    if !proposal.talking_points.is_empty() {
        let _ = writeln!(out, "<h3>Talking points</h3><ol>");
        for point in &proposal.talking_points {
            let _ = writeln!(
                out,
                "<li><strong>{}</strong>: {} <em>{}</em></li>",
                escape(&point.issue),
                escape(&point.your_position),
                escape(&point.key_argument)
            );
        }
        let _ = writeln!(out, "</ol>");
    }

    let _ = writeln!(out, "</section>");
    out
}

fn flag_html(out: &mut String, flag: &Flag) {
    let _ = writeln!(out, r#"<article class="cg-flag">"#);
    let _ = writeln!(out, "<h4>{}</h4>", escape(&flag.category));
    if let Some(clause) = &flag.clause_text {
        let _ = writeln!(out, "<blockquote>{}</blockquote>", escape(clause));
    }
    let _ = writeln!(out, "<p>{}</p>", escape(&flag.explanation));
    if let Some(impact) = &flag.impact {
        let _ = writeln!(out, r#"<p class="cg-impact">{}</p>"#, escape(impact));
    }
    if let Some(suggestion) = &flag.suggestion {
        let _ = writeln!(out, r#"<p class="cg-suggestion">{}</p>"#, escape(suggestion));
    }
    if !flag.questions_to_ask.is_empty() {
        let _ = writeln!(out, "<ul>");
        for question in &flag.questions_to_ask {
            let _ = writeln!(out, "<li>{}</li>", escape(question));
        }
        let _ = writeln!(out, "</ul>");
    }
    if let Some(insights) = &flag.community_insights {
        insights_html(out, insights);
    }
    let _ = writeln!(out, "</article>");
}

fn insights_html(out: &mut String, insights: &CommunityInsights) {
    let _ = writeln!(out, r#"<details class="cg-community">"#);
    let _ = writeln!(out, "<summary>{}</summary>", escape(&insights.warning_message));
    let _ = writeln!(
        out,
        "<p>{:.0}% negotiated successfully, typically within {} days.</p>",
        insights.success_rate * 100.0,
        insights.avg_time_to_resolve_days
    );
    for story in &insights.success_stories {
        let _ = writeln!(out, "<blockquote>{}</blockquote>", escape(story));
    }
    if !insights.tips.is_empty() {
        let _ = writeln!(out, "<ul>");
        for tip in &insights.tips {
            let _ = writeln!(out, "<li>{}</li>", escape(tip));
        }
        let _ = writeln!(out, "</ul>");
    }
    let _ = writeln!(out, "</details>");
}

fn list_html(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "<h3>{}</h3><ul>", heading);
    for item in items {
        let _ = writeln!(out, "<li>{}</li>", escape(item));
    }
    let _ = writeln!(out, "</ul>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use contractguard_domain::{Recommendation, RiskScore};

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }

    #[test]
    fn test_oracle_text_is_escaped() {
        let mut analysis = AnalysisResult::new(
            RiskScore::new(3),
            Recommendation::Sign,
            "<img src=x onerror=alert(1)>",
        );
        analysis.red_flags = vec![Flag::new("<b>Fees</b>", Severity::High, "x")];

        let html = analysis_html(&analysis);
        assert!(!html.contains("<img"));
        assert!(!html.contains("<b>Fees"));
        assert!(html.contains("&lt;img"));
    }

    #[test]
    fn test_gauge_and_grouping() {
        let mut analysis = AnalysisResult::new(RiskScore::new(11), Recommendation::Reject, "Bad");
        analysis.red_flags = vec![Flag::new("Arbitration", Severity::High, "x")];
        analysis.yellow_flags = vec![Flag::new("Vague", Severity::Medium, "y")];

        let html = analysis_html(&analysis);
        assert!(html.contains("width:100%;background:#ef4444"));
        assert!(html.contains("HIGH severity (1)"));
        assert!(html.contains("MEDIUM severity (1)"));
        assert!(!html.contains("LOW severity"));
    }

    #[test]
    fn test_insights_are_collapsible() {
        let mut flag = Flag::new("Automatic Renewal", Severity::High, "x");
        flag.community_insights = Some(CommunityInsights {
            warning_message: "HIGH RISK: 3,421 users reported similar issues.".to_string(),
            success_rate: 0.65,
            avg_financial_impact: 850,
            reports: 3421,
            avg_time_to_resolve_days: 5,
            success_stories: vec!["Got a 90-day notice period".to_string()],
            tips: Vec::new(),
        });
        let mut analysis = AnalysisResult::new(RiskScore::new(7), Recommendation::Negotiate, "x");
        analysis.red_flags = vec![flag];

        let html = analysis_html(&analysis);
        assert!(html.contains(r#"<details class="cg-community">"#));
        assert!(html.contains("<summary>HIGH RISK: 3,421 users"));
        assert!(html.contains("65% negotiated successfully"));
    }
}
