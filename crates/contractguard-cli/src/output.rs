//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::client::SampleInfo;
use crate::error::Result;
use colored::*;
use contractguard_domain::{
    AnalysisResult, Beneficiary, CommunityStats, ComparisonResult, CounterProposal, Flag, Verdict,
};
use contractguard_report::{counter_proposal_report, RiskGauge, RiskLevel};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const CELL_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis result.
    pub fn analysis(&self, analysis: &AnalysisResult) -> Result<String> {
        if self.format == CliFormat::Json {
            return json(analysis);
        }

        let gauge = RiskGauge::new(analysis.risk_score);
        let mut lines = vec![
            self.level_colored(
                &format!("Risk score: {}/10 ({})", gauge.score(), gauge.label()),
                gauge.level(),
            ),
            format!("Recommendation: {}", self.bold(analysis.recommendation.as_str())),
        ];
        if !analysis.contract_type_detected.is_empty() {
            lines.push(format!("Contract type: {}", analysis.contract_type_detected));
        }
        lines.push(String::new());
        lines.push(analysis.overall_summary.clone());

        if !analysis.red_flags.is_empty() {
            lines.push(String::new());
            lines.push(self.colorize(
                &format!("RED FLAGS ({})", analysis.red_flags.len()),
                "red",
            ));
            lines.push(flag_table(&analysis.red_flags));
        }
        if !analysis.yellow_flags.is_empty() {
            lines.push(String::new());
            lines.push(self.colorize(
                &format!("YELLOW FLAGS ({})", analysis.yellow_flags.len()),
                "yellow",
            ));
            lines.push(flag_table(&analysis.yellow_flags));
        }

        push_list(&mut lines, "Missing protections", &analysis.missing_protections);
        push_list(&mut lines, "Negotiation tips", &analysis.negotiation_tips);

        Ok(lines.join("\n"))
    }

    /// Format a comparison result.
    pub fn comparison(&self, comparison: &ComparisonResult) -> Result<String> {
        if self.format == CliFormat::Json {
            return json(comparison);
        }

        let verdict_color = match comparison.overall_verdict {
            Verdict::Accept => "green",
            Verdict::NegotiateMore => "yellow",
            Verdict::Reject => "red",
        };
        let mut lines = vec![
            self.colorize(
                &format!("Verdict: {}", comparison.overall_verdict),
                verdict_color,
            ),
            comparison.summary.clone(),
            format!(
                "Changes: {} total, {} in your favor, {} favoring the other party, {} neutral",
                comparison.total_changes,
                comparison.changes_favoring_user,
                comparison.changes_favoring_other,
                comparison.neutral_changes
            ),
        ];

        if comparison.changes.is_empty() {
            lines.push(self.colorize("No changes found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Section", "Benefits", "Explanation"]);
            for change in &comparison.changes {
                let who = match change.who_benefits {
                    Beneficiary::User => "you",
                    Beneficiary::OtherParty => "other party",
                    Beneficiary::Neutral => "neutral",
                };
                builder.push_record([
                    truncate(&change.section, 30),
                    who.to_string(),
                    truncate(&change.explanation, CELL_WIDTH),
                ]);
            }
            lines.push(table(builder));
        }

        push_list(&mut lines, "New issues", &comparison.new_issues);
        if !comparison.recommendation.is_empty() {
            lines.push(String::new());
            lines.push(comparison.recommendation.clone());
        }

        Ok(lines.join("\n"))
    }

    /// Format a counter-proposal.
    pub fn counter_proposal(&self, proposal: &CounterProposal) -> Result<String> {
        if self.format == CliFormat::Json {
            return json(proposal);
        }
        Ok(counter_proposal_report(proposal))
    }

    /// Format community statistics.
    pub fn stats(&self, stats: &CommunityStats) -> Result<String> {
        if self.format == CliFormat::Json {
            return json(stats);
        }

        let mut lines = vec![
            format!("Contracts analyzed: {}", stats.total_contracts_analyzed),
            format!(
                "Successful negotiations: {}",
                stats.total_successful_negotiations
            ),
            format!("Money saved: ${}", stats.total_money_saved),
            format!(
                "Success rate: {:.0}%",
                stats.overall_success_rate * 100.0
            ),
            format!("Active users: {}", stats.active_users),
        ];

        let mut builder = Builder::default();
        builder.push_record(["Issue", "Reports", "Severity", "Avg impact", "Success"]);
        for issue in &stats.top_issues {
            builder.push_record([
                issue.issue.clone(),
                issue.reports.to_string(),
                issue.severity.clone(),
                format!("${}", issue.avg_impact),
                format!("{:.0}%", issue.success_rate * 100.0),
            ]);
        }
        lines.push(table(builder));

        Ok(lines.join("\n"))
    }

    /// Format the sample listing.
    pub fn samples(&self, samples: &[SampleInfo]) -> Result<String> {
        if self.format == CliFormat::Json {
            return json(samples);
        }
        if samples.is_empty() {
            return Ok(self.colorize("No samples found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Type", "Name", "Description"]);
        for sample in samples {
            builder.push_record([
                sample.id.as_str(),
                sample.contract_type.as_str(),
                sample.name.as_str(),
                sample.description.as_str(),
            ]);
        }
        Ok(table(builder))
    }

    /// Format one sample with its text.
    pub fn sample(&self, sample: &SampleInfo) -> Result<String> {
        if self.format == CliFormat::Json {
            return json(sample);
        }
        Ok(format!(
            "{}\n{}\n\n{}",
            self.bold(&sample.name),
            sample.description,
            sample.text.as_deref().unwrap_or_default()
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    fn level_colored(&self, text: &str, level: RiskLevel) -> String {
        let color = match level {
            RiskLevel::Low => "green",
            RiskLevel::Moderate => "yellow",
            RiskLevel::High => "red",
        };
        self.colorize(text, color)
    }

    fn bold(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn flag_table(flags: &[Flag]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Severity", "Category", "Explanation", "Community"]);
    for flag in flags {
        let community = flag
            .community_insights
            .as_ref()
            .map(|c| {
                format!(
                    "{} reports, {:.0}% negotiated",
                    c.reports,
                    c.success_rate * 100.0
                )
            })
            .unwrap_or_default();
        builder.push_record([
            flag.severity.as_str().to_string(),
            flag.category.clone(),
            truncate(&flag.explanation, CELL_WIDTH),
            community,
        ]);
    }
    table(builder)
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{}:", heading));
    lines.extend(items.iter().map(|item| format!("  - {}", item)));
}

/// Shorten text to `max` characters, marking the cut
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contractguard_domain::{Recommendation, RiskScore, Severity};

    fn create_test_analysis() -> AnalysisResult {
        let mut analysis = AnalysisResult::new(
            RiskScore::new(8),
            Recommendation::Negotiate,
            "Several one-sided clauses.",
        );
        analysis.red_flags = vec![Flag::new(
            "Automatic Renewal",
            Severity::High,
            "Renews for a year unless you give 120 days notice.",
        )];
        analysis.negotiation_tips = vec!["Ask for 30 days notice".to_string()];
        analysis
    }

    #[test]
    fn test_text_analysis() {
        let formatter = Formatter::new(CliFormat::Text, false);
        let output = formatter.analysis(&create_test_analysis()).unwrap();
        assert!(output.starts_with("Risk score: 8/10 (HIGH)"));
        assert!(output.contains("Recommendation: NEGOTIATE"));
        assert!(output.contains("RED FLAGS (1)"));
        assert!(output.contains("Automatic Renewal"));
        assert!(output.contains("  - Ask for 30 days notice"));
        assert!(!output.contains("YELLOW FLAGS"));
    }

    #[test]
    fn test_json_analysis() {
        let formatter = Formatter::new(CliFormat::Json, false);
        let output = formatter.analysis(&create_test_analysis()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["risk_score"], 8);
        assert_eq!(value["recommendation"], "NEGOTIATE");
    }

    #[test]
    fn test_empty_samples() {
        let formatter = Formatter::new(CliFormat::Text, false);
        let output = formatter.samples(&[]).unwrap();
        assert!(output.contains("No samples found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(CliFormat::Text, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("déjà vu déjà vu", 6), "déj...");
    }
}
