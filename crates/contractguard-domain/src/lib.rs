//! ContractGuard Domain Layer
//!
//! Result types exchanged with the analysis oracle and the HTTP surface.
//!
//! ## Key Concepts
//!
//! - **AnalysisResult**: risk score, recommendation and red/yellow flags for one contract
//! - **Flag**: a single identified contract concern (red = critical, yellow = moderate)
//! - **ComparisonResult**: clause-level diff between an original and a revised contract
//! - **CounterProposal**: revised clauses, email template and talking points
//! - **Oracle**: the external LLM behind the [`traits::LlmProvider`] boundary
//!
//! Every entity is a transient request/response value. Nothing here is
//! persisted and nothing carries identity across requests.
//!
//! Scalar fields coming from the oracle are parsed leniently here (a risk
//! score of `"7"` or `7.4` is accepted, `AVOID` means `REJECT`) so that the
//! rest of the workspace only ever sees the closed enums.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod community;
pub mod comparison;
pub mod flag;
pub mod proposal;
pub mod risk;
pub mod traits;

// Re-exports for convenience
pub use analysis::{AnalysisMetadata, AnalysisResult};
pub use community::{CommunityStats, TopIssue};
pub use comparison::{Beneficiary, Change, ComparisonMetadata, ComparisonResult, Verdict};
pub use flag::{CommunityInsights, Flag, Severity};
pub use proposal::{
    CompromiseOption, CounterProposal, EmailTemplate, NegotiationStrategy, ProposalMetadata,
    RevisedClause, SuccessProbability, TalkingPoint, UserInfo,
};
pub use risk::{Recommendation, RiskScore};
pub use traits::{LlmError, LlmProvider};
