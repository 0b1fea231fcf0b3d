//! Analysis module - the result of analyzing a single contract

use crate::flag::{Flag, Severity};
use crate::risk::{Recommendation, RiskScore};
use serde::{Deserialize, Serialize};

/// Structured analysis of one contract
///
/// Required on the wire: `risk_score`, `recommendation`, `overall_summary`.
/// Every list-valued field defaults to empty so consumers never need to
/// distinguish "absent" from "none found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Risk score, 0-10
    pub risk_score: RiskScore,

    /// Signing recommendation
    pub recommendation: Recommendation,

    /// Two or three sentence summary of the main concerns
    pub overall_summary: String,

    /// Contract type as classified by the oracle (rental, employment, ...)
    #[serde(default)]
    pub contract_type_detected: String,

    /// Critical concerns
    #[serde(default)]
    pub red_flags: Vec<Flag>,

    /// Moderate concerns
    #[serde(default)]
    pub yellow_flags: Vec<Flag>,

    /// Standard protections that are absent
    #[serde(default)]
    pub missing_protections: Vec<String>,

    /// Good clauses that are present
    #[serde(default)]
    pub positive_aspects: Vec<String>,

    /// Questions to settle before signing
    #[serde(default)]
    pub key_questions_before_signing: Vec<String>,

    /// Concrete things to negotiate
    #[serde(default)]
    pub negotiation_tips: Vec<String>,

    /// Whether red flags were enriched with community insights
    #[serde(default)]
    pub community_enhanced: bool,

    /// Provenance of this result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_metadata: Option<AnalysisMetadata>,
}

/// Metadata stamped on an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Oracle model name
    pub model: String,

    /// RFC 3339 timestamp of the analysis
    pub timestamp: String,

    /// Red plus yellow flag count
    pub total_flags: usize,
}

impl AnalysisResult {
    /// Create a result with the required fields and empty lists
    pub fn new(
        risk_score: RiskScore,
        recommendation: Recommendation,
        overall_summary: impl Into<String>,
    ) -> Self {
        Self {
            risk_score,
            recommendation,
            overall_summary: overall_summary.into(),
            contract_type_detected: String::new(),
            red_flags: Vec::new(),
            yellow_flags: Vec::new(),
            missing_protections: Vec::new(),
            positive_aspects: Vec::new(),
            key_questions_before_signing: Vec::new(),
            negotiation_tips: Vec::new(),
            community_enhanced: false,
            analysis_metadata: None,
        }
    }

    /// Total number of red and yellow flags
    pub fn total_flags(&self) -> usize {
        self.red_flags.len() + self.yellow_flags.len()
    }

    /// All flags (red first, then yellow) with the given severity
    pub fn flags_with_severity(&self, severity: Severity) -> Vec<&Flag> {
        self.red_flags
            .iter()
            .chain(self.yellow_flags.iter())
            .filter(|f| f.severity == severity)
            .collect()
    }
}
