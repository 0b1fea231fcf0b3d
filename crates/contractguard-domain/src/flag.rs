//! Flag module - individual contract concerns

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// How serious a flagged clause is
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Critical concern
    High,
    /// Concerning but negotiable
    #[default]
    Medium,
    /// Minor
    Low,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }

    /// Parse a severity (case-insensitive, `CRITICAL` counts as `HIGH`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" | "CRITICAL" => Some(Severity::High),
            "MEDIUM" | "MODERATE" => Some(Severity::Medium),
            "LOW" => Some(Severity::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Severity::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown severity: {:?}", raw)))
    }
}

/// A single identified contract concern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    /// Concern category (e.g. "Automatic Renewal")
    #[serde(default)]
    pub category: String,

    /// Severity of the concern
    #[serde(default)]
    pub severity: Severity,

    /// Exact quote of the problematic clause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_text: Option<String>,

    /// Section or page reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Plain-language explanation of the risk
    #[serde(default)]
    pub explanation: String,

    /// What could happen because of this clause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,

    /// What should be clarified (yellow flags)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Follow-up questions for the other party
    #[serde(default)]
    pub questions_to_ask: Vec<String>,

    /// Crowd-sourced outcomes for similar clauses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_insights: Option<CommunityInsights>,
}

impl Flag {
    /// Create a flag with the given category, severity and explanation
    pub fn new(
        category: impl Into<String>,
        severity: Severity,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            severity,
            clause_text: None,
            location: None,
            explanation: explanation.into(),
            impact: None,
            suggestion: None,
            questions_to_ask: Vec::new(),
            community_insights: None,
        }
    }

    /// Attach the quoted clause
    pub fn with_clause(mut self, clause: impl Into<String>) -> Self {
        self.clause_text = Some(clause.into());
        self
    }
}

/// Community-reported outcomes attached to a red flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityInsights {
    /// Ready-to-display warning line
    pub warning_message: String,

    /// Share of users who negotiated this clause successfully, in [0, 1]
    #[serde(alias = "success_rate_negotiating")]
    pub success_rate: f64,

    /// Average financial impact in dollars
    #[serde(default)]
    pub avg_financial_impact: u64,

    /// Number of community reports
    #[serde(default)]
    pub reports: u64,

    /// Average days until the issue was resolved
    #[serde(default)]
    pub avg_time_to_resolve_days: u32,

    /// Short success stories
    #[serde(default)]
    pub success_stories: Vec<String>,

    /// Negotiation tips
    #[serde(default)]
    pub tips: Vec<String>,
}
