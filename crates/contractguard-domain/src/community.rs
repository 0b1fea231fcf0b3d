//! Community statistics returned by the stats endpoint

use serde::{Deserialize, Serialize};

/// Aggregate counters over the community issue database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityStats {
    /// Sum of community reports
    pub total_contracts_analyzed: u64,
    /// Reports that ended in a successful negotiation
    pub total_successful_negotiations: u64,
    /// Estimated dollars saved
    pub total_money_saved: u64,
    /// Successful negotiations over reports, two decimals
    pub overall_success_rate: f64,
    /// Most reported issues, descending
    pub top_issues: Vec<TopIssue>,
    /// Active users (static figure)
    pub active_users: u64,
    /// Average response time in hours (static figure)
    pub avg_response_time_hours: f64,
}

/// One entry in the top-issues list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopIssue {
    /// Title-cased issue name
    pub issue: String,
    /// Report count
    pub reports: u64,
    /// CRITICAL, HIGH or MEDIUM
    pub severity: String,
    /// Average financial impact in dollars
    pub avg_impact: u64,
    /// Negotiation success rate
    pub success_rate: f64,
}
