//! Error types for the ContractAnalyzer

use contractguard_documents::DocumentError;
use contractguard_domain::LlmError;
use thiserror::Error;

/// Errors that can occur while analyzing, comparing or negotiating
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The request itself is unusable (text too short, too long, missing)
    #[error("{0}")]
    InvalidRequest(String),

    /// The uploaded document could not be turned into text
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The oracle answered, but not with a usable analysis
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    /// The oracle answered, but not with a usable comparison
    #[error("Comparison failed: {0}")]
    ComparisonFailed(String),

    /// The oracle answered, but not with a usable counter-proposal
    #[error("Counter-proposal failed: {0}")]
    CounterProposalFailed(String),

    /// The oracle could not be reached or refused the call
    #[error("Network error: {0}")]
    Network(LlmError),
}

/// Which oracle-backed operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Analysis,
    Comparison,
    CounterProposal,
}

impl Operation {
    /// Wrap a reason in this operation's failure variant
    pub(crate) fn failed(self, reason: impl Into<String>) -> AnalyzerError {
        let reason = reason.into();
        match self {
            Operation::Analysis => AnalyzerError::AnalysisFailed(reason),
            Operation::Comparison => AnalyzerError::ComparisonFailed(reason),
            Operation::CounterProposal => AnalyzerError::CounterProposalFailed(reason),
        }
    }

    /// Classify an oracle error
    ///
    /// Transport problems are network errors; a reachable oracle that
    /// returns nothing usable is a failure of the operation itself.
    pub(crate) fn from_llm(self, err: LlmError) -> AnalyzerError {
        if err.is_network() {
            AnalyzerError::Network(err)
        } else {
            self.failed(err.to_string())
        }
    }
}
