//! Community red-flag database
//!
//! A fixed, in-process table of crowd-reported contract problems and how
//! negotiating them turned out. Red flags from the oracle are matched against
//! it by category name.

use contractguard_domain::{CommunityInsights, CommunityStats, TopIssue};

/// Static figure reported by the stats endpoint
pub const ACTIVE_USERS: u64 = 14_523;

/// Static figure reported by the stats endpoint
pub const AVG_RESPONSE_TIME_HOURS: f64 = 0.5;

const TOP_ISSUES: usize = 5;
const STORIES_PER_INSIGHT: usize = 2;
const MIN_KEYWORD_LEN: usize = 4;

/// Community-assigned severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Rarely negotiable, large losses
    Critical,
    /// Common and costly
    High,
    /// Annoying, usually negotiable
    Medium,
}

impl IssueSeverity {
    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Critical => "CRITICAL",
            IssueSeverity::High => "HIGH",
            IssueSeverity::Medium => "MEDIUM",
        }
    }

    fn warning_level(&self) -> &'static str {
        match self {
            IssueSeverity::Critical => "CRITICAL ALERT",
            IssueSeverity::High => "HIGH RISK",
            IssueSeverity::Medium => "CAUTION",
        }
    }
}

/// One community-reported issue
#[derive(Debug, Clone, PartialEq)]
pub struct CommunityIssue {
    /// Lower-case lookup key
    pub key: &'static str,
    /// Number of reports
    pub reports: u64,
    /// Community severity
    pub severity: IssueSeverity,
    /// Average financial impact in dollars
    pub avg_financial_impact: u64,
    /// Share of reporters who negotiated the clause away
    pub success_rate: f64,
    /// Contract types where the issue shows up
    pub common_in: &'static [&'static str],
    /// Reporters who negotiated successfully
    pub negotiated_successfully: u64,
    /// Average days to resolution
    pub avg_time_to_resolve_days: u32,
    /// Negotiation tips
    pub tips: &'static [&'static str],
    /// Success stories, best first
    pub success_stories: &'static [&'static str],
}

impl CommunityIssue {
    /// Ready-to-display warning line
    ///
    /// ```
    /// use contractguard_analyzer::community::find_issue;
    ///
    /// let issue = find_issue("Waiver of Legal Rights").unwrap();
    /// assert_eq!(
    ///     issue.warning_message(),
    ///     "CRITICAL ALERT: 4,156 users reported similar issues. \
    ///      42% successfully negotiated this clause. Average impact: $2,500."
    /// );
    /// ```
    pub fn warning_message(&self) -> String {
        let pct = (self.success_rate * 100.0).round() as u32;
        let mut warning = format!(
            "{}: {} users reported similar issues. {}% successfully negotiated this clause.",
            self.severity.warning_level(),
            group_thousands(self.reports),
            pct
        );
        if self.avg_financial_impact > 0 {
            warning.push_str(&format!(
                " Average impact: ${}.",
                group_thousands(self.avg_financial_impact)
            ));
        }
        warning
    }

    /// Insight attached to a matching red flag
    pub fn insights(&self) -> CommunityInsights {
        CommunityInsights {
            warning_message: self.warning_message(),
            success_rate: self.success_rate,
            avg_financial_impact: self.avg_financial_impact,
            reports: self.reports,
            avg_time_to_resolve_days: self.avg_time_to_resolve_days,
            success_stories: self
                .success_stories
                .iter()
                .take(STORIES_PER_INSIGHT)
                .map(|s| s.to_string())
                .collect(),
            tips: self.tips.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The community database, in lookup order
pub static COMMUNITY_ISSUES: [CommunityIssue; 8] = [
    CommunityIssue {
        key: "non-refundable security deposit",
        reports: 2847,
        severity: IssueSeverity::High,
        avg_financial_impact: 1200,
        success_rate: 0.73,
        common_in: &["rental", "lease"],
        negotiated_successfully: 2079,
        avg_time_to_resolve_days: 7,
        tips: &[
            "Security deposits must be refundable in most states",
            "Cite local tenant law on deposit returns",
            "Offer a slightly larger deposit in exchange for making it refundable",
            "Get the refund conditions confirmed in writing",
        ],
        success_stories: &[
            "Changed 'non-refundable' to 'refundable within 30 days' and saved $1,200",
            "Landlord agreed after seeing the state law and returned the full $1,500",
            "Negotiated a $2,000 non-refundable fee down to a $1,000 refundable deposit",
        ],
    },
    CommunityIssue {
        key: "automatic renewal",
        reports: 3421,
        severity: IssueSeverity::High,
        avg_financial_impact: 850,
        success_rate: 0.65,
        common_in: &["rental", "subscription", "service"],
        negotiated_successfully: 2224,
        avg_time_to_resolve_days: 5,
        tips: &[
            "Ask for a 60-90 day notice period before renewal",
            "Request an email reminder well ahead of the renewal date",
            "Negotiate opt-in renewal instead of opt-out",
            "Get the notification method confirmed in writing",
        ],
        success_stories: &[
            "Got a 90-day notice period and avoided a $10,200 renewal",
            "Added an email reminder clause so the date could not slip by",
            "Made renewal opt-in and kept full control",
        ],
    },
    CommunityIssue {
        key: "unlimited landlord entry",
        reports: 1923,
        severity: IssueSeverity::High,
        avg_financial_impact: 0,
        success_rate: 0.81,
        common_in: &["rental"],
        negotiated_successfully: 1557,
        avg_time_to_resolve_days: 3,
        tips: &[
            "Most states require 24-48 hours notice before entry",
            "Limit entry to reasonable hours such as 9am-6pm on weekdays",
            "Keep an emergency-only exception for immediate entry",
            "Require written notice by email or text",
        ],
        success_stories: &[
            "Added a 48-hour notice requirement and ended surprise visits",
            "Limited entry to weekday business hours",
            "Required notice by email, which created a paper trail",
        ],
    },
    CommunityIssue {
        key: "waiver of legal rights",
        reports: 4156,
        severity: IssueSeverity::Critical,
        avg_financial_impact: 2500,
        success_rate: 0.42,
        common_in: &["employment", "service", "rental"],
        negotiated_successfully: 1745,
        avg_time_to_resolve_days: 14,
        tips: &[
            "Arbitration clauses are sometimes negotiable",
            "Some waivers are unenforceable; check local law",
            "Weigh whether the opportunity is worth giving up the right",
            "Consult a lawyer for high-stakes contracts",
        ],
        success_stories: &[
            "Company dropped the arbitration clause after pushback",
            "Limited arbitration to disputes under $10,000",
            "Added the option to choose arbitration or court",
        ],
    },
    CommunityIssue {
        key: "unlimited fee increases",
        reports: 2134,
        severity: IssueSeverity::High,
        avg_financial_impact: 1650,
        success_rate: 0.58,
        common_in: &["rental", "service"],
        negotiated_successfully: 1238,
        avg_time_to_resolve_days: 6,
        tips: &[
            "Ask for an annual cap on increases (3-5%)",
            "Tie increases to CPI or the local market rate",
            "Require 60-90 days notice for any increase",
            "Lock the first-year rate in writing",
        ],
        success_stories: &[
            "Capped increases at 5% a year and saved $2,400 over two years",
            "Got 90 days notice on increases, enough time to budget",
            "Tied increases to CPI, which was fair to both sides",
        ],
    },
    CommunityIssue {
        key: "excessive late fees",
        reports: 1876,
        severity: IssueSeverity::Medium,
        avg_financial_impact: 450,
        success_rate: 0.69,
        common_in: &["rental", "loan", "service"],
        negotiated_successfully: 1295,
        avg_time_to_resolve_days: 4,
        tips: &[
            "Late fees should be reasonable, around 5-10% of the payment",
            "Ask for a 3-5 day grace period",
            "Challenge any fee above the state limit",
            "Ask for a one-time forgiveness clause",
        ],
        success_stories: &[
            "Reduced a $150 late fee to $50",
            "Added a 5-day grace period",
            "Got a one-time forgiveness clause and saved $150",
        ],
    },
    CommunityIssue {
        key: "one-sided termination",
        reports: 2567,
        severity: IssueSeverity::High,
        avg_financial_impact: 3200,
        success_rate: 0.51,
        common_in: &["rental", "employment", "service"],
        negotiated_successfully: 1309,
        avg_time_to_resolve_days: 8,
        tips: &[
            "Ask for equal termination rights, such as 30 days for both parties",
            "Request a for-cause termination option",
            "Negotiate a smaller penalty for early termination",
            "Get a mutual termination clause",
        ],
        success_stories: &[
            "Made termination mutual with 30 days notice on both sides",
            "Added a job-loss clause that allows termination without penalty",
            "Cut the early termination penalty from three months to one",
        ],
    },
    CommunityIssue {
        key: "hidden maintenance fees",
        reports: 1654,
        severity: IssueSeverity::Medium,
        avg_financial_impact: 780,
        success_rate: 0.72,
        common_in: &["rental", "condo", "hoa"],
        negotiated_successfully: 1191,
        avg_time_to_resolve_days: 5,
        tips: &[
            "Ask for an itemized list of every fee before signing",
            "Ask exactly what 'maintenance' covers",
            "Get a cap on fee increases written into the contract",
            "Compare with similar properties in the area",
        ],
        success_stories: &[
            "Found $200 a month in hidden fees and negotiated it to $75",
            "Got a detailed breakdown and removed unnecessary charges",
            "Locked maintenance fees for two years and saved $960",
        ],
    },
];

/// Find the community issue matching a red-flag category
///
/// An exact (case-insensitive) key wins. Next, the first entry whose key
/// contains the category or is contained in it. Otherwise the entry sharing
/// the most key words of at least four letters with the category, earliest
/// entry on a tie.
pub fn find_issue(category: &str) -> Option<&'static CommunityIssue> {
    let category = category.trim().to_lowercase();
    if category.is_empty() {
        return None;
    }

    if let Some(issue) = COMMUNITY_ISSUES.iter().find(|i| i.key == category) {
        return Some(issue);
    }

    if let Some(issue) = COMMUNITY_ISSUES
        .iter()
        .find(|issue| issue.key.contains(category.as_str()) || category.contains(issue.key))
    {
        return Some(issue);
    }

    let mut best: Option<(&'static CommunityIssue, usize)> = None;
    for issue in COMMUNITY_ISSUES.iter() {
        let shared = shared_keywords(issue.key, &category);
        if shared > 0 && best.is_none_or(|(_, most)| shared > most) {
            best = Some((issue, shared));
        }
    }
    best.map(|(issue, _)| issue)
}

fn shared_keywords(key: &str, category: &str) -> usize {
    key.split_whitespace()
        .filter(|word| word.len() >= MIN_KEYWORD_LEN)
        .filter(|word| category.contains(word))
        .count()
}

/// Community insight for a red-flag category, if any
pub fn insights_for(category: &str) -> Option<CommunityInsights> {
    find_issue(category).map(CommunityIssue::insights)
}

/// Aggregate counters over the whole database
pub fn aggregated_stats() -> CommunityStats {
    let total_reports: u64 = COMMUNITY_ISSUES.iter().map(|i| i.reports).sum();
    let total_successful: u64 = COMMUNITY_ISSUES
        .iter()
        .map(|i| i.negotiated_successfully)
        .sum();
    let money_saved: f64 = COMMUNITY_ISSUES
        .iter()
        .map(|i| i.reports as f64 * i.avg_financial_impact as f64 * i.success_rate)
        .sum();

    let overall_success_rate = if total_reports == 0 {
        0.0
    } else {
        round2(total_successful as f64 / total_reports as f64)
    };

    let mut top: Vec<&CommunityIssue> = COMMUNITY_ISSUES.iter().collect();
    top.sort_by(|a, b| b.reports.cmp(&a.reports));
    let top_issues = top
        .into_iter()
        .take(TOP_ISSUES)
        .map(|issue| TopIssue {
            issue: title_case(issue.key),
            reports: issue.reports,
            severity: issue.severity.as_str().to_string(),
            avg_impact: issue.avg_financial_impact,
            success_rate: issue.success_rate,
        })
        .collect();

    CommunityStats {
        total_contracts_analyzed: total_reports,
        total_successful_negotiations: total_successful,
        total_money_saved: money_saved.trunc() as u64,
        overall_success_rate,
        top_issues,
        active_users: ACTIVE_USERS,
        avg_response_time_hours: AVG_RESPONSE_TIME_HOURS,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 1234567 -> "1,234,567"
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Upper-case the first letter of every alphabetic run
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
