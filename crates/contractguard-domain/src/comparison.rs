//! Comparison module - diff of an original and a revised contract

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Verdict on a revised contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The revision is acceptable
    Accept,
    /// Better, but keep negotiating
    NegotiateMore,
    /// The revision is worse or still unacceptable
    Reject,
}

impl Verdict {
    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accept => "ACCEPT",
            Verdict::NegotiateMore => "NEGOTIATE_MORE",
            Verdict::Reject => "REJECT",
        }
    }

    /// Parse a verdict (case-insensitive; spaces, dashes and bare `NEGOTIATE` tolerated)
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "ACCEPT" => Some(Verdict::Accept),
            "NEGOTIATE_MORE" | "NEGOTIATE" => Some(Verdict::NegotiateMore),
            "REJECT" => Some(Verdict::Reject),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Verdict::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown verdict: {:?}", raw)))
    }
}

/// Which party a change favors
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Beneficiary {
    /// The person asking for the comparison
    User,
    /// The counterparty
    OtherParty,
    /// Neither side, or unclear
    #[default]
    Neutral,
}

impl Beneficiary {
    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Beneficiary::User => "user",
            Beneficiary::OtherParty => "other_party",
            Beneficiary::Neutral => "neutral",
        }
    }

    /// Parse a beneficiary
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "user" | "you" => Some(Beneficiary::User),
            "other_party" | "other" | "counterparty" => Some(Beneficiary::OtherParty),
            "neutral" | "unclear" | "both" => Some(Beneficiary::Neutral),
            _ => None,
        }
    }

    /// Parse the oracle's answer, which may name the user's side literally
    ///
    /// The oracle is told the user is e.g. a "tenant", so it often answers
    /// `"tenant"` instead of `"user"`. Anything unrecognized is neutral.
    pub fn parse_for_side(s: &str, user_side: &str) -> Self {
        if !user_side.trim().is_empty() && s.trim().eq_ignore_ascii_case(user_side.trim()) {
            return Beneficiary::User;
        }
        Self::parse(s).unwrap_or(Beneficiary::Neutral)
    }
}

impl fmt::Display for Beneficiary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Beneficiary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Beneficiary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Beneficiary::parse(&raw).unwrap_or(Beneficiary::Neutral))
    }
}

/// One clause-level change between versions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// Section heading or reference
    #[serde(default)]
    pub section: String,

    /// added, removed or modified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_type: Option<String>,

    /// Quote from the original (empty for additions)
    #[serde(default)]
    pub original_text: String,

    /// Quote from the revision (empty for removals)
    #[serde(default)]
    pub revised_text: String,

    /// Who the change favors
    #[serde(default)]
    pub who_benefits: Beneficiary,

    /// major or minor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefit_level: Option<String>,

    /// What changed and why it matters
    #[serde(default)]
    pub explanation: String,

    /// positive, negative or neutral
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

/// Structured diff of two contract versions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Overview of the revision
    pub summary: String,

    /// Accept / negotiate more / reject
    pub overall_verdict: Verdict,

    /// Why the verdict was reached
    #[serde(default)]
    pub verdict_explanation: String,

    /// Number of changes
    #[serde(default)]
    pub total_changes: usize,

    /// Changes favoring the user
    #[serde(default)]
    pub changes_favoring_user: usize,

    /// Changes favoring the other party
    #[serde(default)]
    pub changes_favoring_other: usize,

    /// Neutral changes
    #[serde(default)]
    pub neutral_changes: usize,

    /// Clause-level changes in document order
    #[serde(default)]
    pub changes: Vec<Change>,

    /// Original concerns fixed by the revision
    #[serde(default)]
    pub addressed_concerns: Vec<String>,

    /// Original concerns still present
    #[serde(default)]
    pub ignored_concerns: Vec<String>,

    /// Problems introduced by the revision
    #[serde(default)]
    pub new_issues: Vec<String>,

    /// Free-text advice on what to do next
    #[serde(default)]
    pub recommendation: String,

    /// Concrete next steps
    #[serde(default)]
    pub next_steps: Vec<String>,

    /// Request context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_metadata: Option<ComparisonMetadata>,
}

/// Metadata stamped on a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetadata {
    /// Side the user is on (tenant, employee, ...)
    pub user_side: String,

    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl ComparisonResult {
    /// Recompute the change tallies from `changes`
    ///
    /// The oracle's own counts are not trusted; the list is authoritative.
    pub fn retally(&mut self) {
        let count = |who: Beneficiary| self.changes.iter().filter(|c| c.who_benefits == who).count();
        let (user, other, neutral) = (
            count(Beneficiary::User),
            count(Beneficiary::OtherParty),
            count(Beneficiary::Neutral),
        );
        self.total_changes = self.changes.len();
        self.changes_favoring_user = user;
        self.changes_favoring_other = other;
        self.neutral_changes = neutral;
    }

    /// Changes favoring the given party, in order
    pub fn changes_for(&self, who: Beneficiary) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(move |c| c.who_benefits == who)
    }
}
