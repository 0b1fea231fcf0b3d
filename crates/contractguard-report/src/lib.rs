//! ContractGuard Report
//!
//! Renders analysis, comparison and counter-proposal results as a
//! downloadable plain-text report or an HTML fragment. Rendering is pure;
//! nothing here touches the network or the filesystem.

mod error;
mod gauge;
mod html;
mod text;

pub use error::ReportError;
pub use gauge::{RiskGauge, RiskLevel};
pub use html::{analysis_html, comparison_html, counter_proposal_html, escape};
pub use text::{
    analysis_report, comparison_report, counter_proposal_report, parse_report_header,
    ReportHeader, REPORT_FILENAME, RULE_WIDTH,
};

use contractguard_domain::{AnalysisResult, ComparisonResult, CounterProposal};
use serde::Deserialize;
use std::str::FromStr;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Html,
}

impl ReportFormat {
    /// MIME type of the rendered output
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text/plain; charset=utf-8",
            ReportFormat::Html => "text/html; charset=utf-8",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" | "txt" => Ok(ReportFormat::Text),
            "html" => Ok(ReportFormat::Html),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Any result that can be rendered
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum ReportSubject {
    Analysis(AnalysisResult),
    Comparison(ComparisonResult),
    CounterProposal(CounterProposal),
}

/// Render a result in the requested format
pub fn render(subject: &ReportSubject, format: ReportFormat) -> String {
    match (subject, format) {
        (ReportSubject::Analysis(a), ReportFormat::Text) => analysis_report(a),
        (ReportSubject::Analysis(a), ReportFormat::Html) => analysis_html(a),
        (ReportSubject::Comparison(c), ReportFormat::Text) => comparison_report(c),
        (ReportSubject::Comparison(c), ReportFormat::Html) => comparison_html(c),
        (ReportSubject::CounterProposal(p), ReportFormat::Text) => counter_proposal_report(p),
        (ReportSubject::CounterProposal(p), ReportFormat::Html) => counter_proposal_html(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("HTML".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert_eq!("text".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert_eq!("".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert_eq!(
            "pdf".parse::<ReportFormat>(),
            Err(ReportError::UnknownFormat("pdf".to_string()))
        );
    }

    #[test]
    fn test_render_tagged_subject() {
        let subject: ReportSubject = serde_json::from_str(
            r#"{"kind": "analysis", "result": {
                "risk_score": 8,
                "recommendation": "NEGOTIATE",
                "overall_summary": "Several one-sided clauses."
            }}"#,
        )
        .unwrap();

        let text = render(&subject, ReportFormat::Text);
        let header = parse_report_header(&text).unwrap();
        assert_eq!(header.risk_score.value(), 8);

        let html = render(&subject, ReportFormat::Html);
        assert!(html.contains("8/10"));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result = serde_json::from_str::<ReportSubject>(r#"{"kind": "memo", "result": {}}"#);
        assert!(result.is_err());
    }
}
