//! Counter-proposal module - negotiation package built from an analysis

use serde::{Deserialize, Serialize};

/// Who the counter-proposal is written for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Name used to sign the email
    #[serde(default = "default_user_name")]
    pub user_name: String,

    /// Name of the counterparty
    #[serde(default = "default_other_party_name")]
    pub other_party_name: String,

    /// Role of the user (tenant, employee, buyer, ...)
    #[serde(default = "default_user_role")]
    pub user_role: String,

    /// Contract type override; falls back to the detected type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
}

fn default_user_name() -> String {
    "Your Name".to_string()
}

fn default_other_party_name() -> String {
    "Other Party".to_string()
}

fn default_user_role() -> String {
    "tenant".to_string()
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            other_party_name: default_other_party_name(),
            user_role: default_user_role(),
            contract_type: None,
        }
    }
}

/// Fair replacement for one problematic clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisedClause {
    /// Issue being addressed
    #[serde(default)]
    pub issue: String,
    /// The clause as written
    #[serde(default)]
    pub original_clause: String,
    /// Proposed replacement
    #[serde(default)]
    pub revised_clause: String,
    /// Why the change is reasonable
    #[serde(default)]
    pub justification: String,
    /// Laws, standards or common practice backing the change
    #[serde(default)]
    pub legal_basis: String,
    /// high, medium or low
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Ready-to-send negotiation email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    /// Subject line
    pub subject: String,
    /// Salutation line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    /// Email body
    pub body: String,
    /// Tone descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

impl EmailTemplate {
    /// Replace name placeholders in the greeting and body
    pub fn personalize(&mut self, user: &UserInfo) {
        let fill = |text: &str| {
            text.replace("[Your Name]", &user.user_name)
                .replace("[Other Party Name]", &user.other_party_name)
                .replace("[Other Party]", &user.other_party_name)
        };
        self.body = fill(&self.body);
        if let Some(greeting) = self.greeting.as_mut() {
            *greeting = fill(greeting);
        }
    }
}

/// Argument to make during negotiation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalkingPoint {
    /// Issue under discussion
    #[serde(default)]
    pub issue: String,
    /// What the user asks for
    #[serde(default)]
    pub your_position: String,
    /// Strongest argument
    #[serde(default)]
    pub key_argument: String,
    /// Citations, market standards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supporting_evidence: Option<String>,
    /// How to answer pushback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_to_objections: Option<String>,
}

/// Fallback position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompromiseOption {
    /// Anticipated objection
    #[serde(default)]
    pub if_they_say: String,
    /// Suggested reply
    #[serde(default)]
    pub you_respond: String,
    /// Acceptable middle ground
    #[serde(default)]
    pub middle_ground: String,
    /// high, medium or low
    #[serde(default)]
    pub likelihood_of_success: String,
}

/// Overall negotiation approach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationStrategy {
    /// collaborative, firm or flexible
    #[serde(default)]
    pub approach: String,
    /// Guiding principles
    #[serde(default)]
    pub key_principles: Vec<String>,
    /// Pitfalls
    #[serde(default)]
    pub things_to_avoid: Vec<String>,
    /// Suggested timeline
    #[serde(default)]
    pub timeline: String,
    /// When to decline the contract
    #[serde(default)]
    pub when_to_walk_away: String,
}

/// Estimated chance the negotiation succeeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessProbability {
    /// high, medium or low
    #[serde(default)]
    pub overall_estimate: String,
    /// Reasoning behind the estimate
    #[serde(default)]
    pub reasoning: String,
    /// Factors helping the user
    #[serde(default)]
    pub factors_in_your_favor: Vec<String>,
    /// Factors working against the user
    #[serde(default)]
    pub challenges: Vec<String>,
}

/// Metadata stamped on a counter-proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalMetadata {
    /// User name the package was generated for
    pub generated_for: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    /// Number of red flags sent to the oracle
    pub red_flags_addressed: usize,
}

/// Complete negotiation package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterProposal {
    /// Replacement clauses in priority order
    pub revised_clauses: Vec<RevisedClause>,
    /// Email to send to the counterparty
    pub email_template: EmailTemplate,
    /// Arguments for a conversation
    #[serde(default)]
    pub talking_points: Vec<TalkingPoint>,
    /// Fallback positions
    #[serde(default)]
    pub compromise_options: Vec<CompromiseOption>,
    /// Overall approach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiation_strategy: Option<NegotiationStrategy>,
    /// Estimated odds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_probability: Option<SuccessProbability>,
    /// Request context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal_metadata: Option<ProposalMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_defaults() {
        let info: UserInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info, UserInfo::default());
        assert_eq!(info.user_name, "Your Name");
        assert_eq!(info.other_party_name, "Other Party");
        assert_eq!(info.user_role, "tenant");
    }

    #[test]
    fn test_personalize_replaces_placeholders() {
        let mut email = EmailTemplate {
            subject: "Proposed Amendments".to_string(),
            greeting: Some("Dear [Other Party Name],".to_string()),
            body: "Hello [Other Party], ... Regards, [Your Name]".to_string(),
            tone: None,
        };
        let user = UserInfo {
            user_name: "Sam".to_string(),
            other_party_name: "Acme Rentals".to_string(),
            ..UserInfo::default()
        };

        email.personalize(&user);
        assert_eq!(email.greeting.as_deref(), Some("Dear Acme Rentals,"));
        assert_eq!(email.body, "Hello Acme Rentals, ... Regards, Sam");
    }

    #[test]
    fn test_proposal_requires_email() {
        let json = r#"{"revised_clauses": []}"#;
        assert!(serde_json::from_str::<CounterProposal>(json).is_err());
    }
}
