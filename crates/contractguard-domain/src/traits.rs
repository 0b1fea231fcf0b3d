//! Trait definitions for external interactions
//!
//! The oracle (an external LLM) is the only collaborator the domain talks to.
//! Implementations live in `contractguard-llm`.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while calling the oracle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not complete in time
    #[error("Oracle request timed out")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Non-success HTTP status from the oracle
    #[error("Oracle rejected the request (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Invalid response from the oracle
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No API key configured
    #[error("Oracle API key is not configured")]
    MissingCredential,
}

impl LlmError {
    /// Whether this error means the oracle could not be reached or refused service
    ///
    /// These surface to users as network errors rather than analysis failures.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            LlmError::Communication(_)
                | LlmError::Timeout
                | LlmError::RateLimitExceeded
                | LlmError::Rejected { .. }
                | LlmError::ModelNotAvailable(_)
        )
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (contractguard-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier, recorded in result metadata
    fn model_name(&self) -> &str;

    /// Generate a completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl LlmProvider for Echo {
        fn model_name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            Ok(prompt.to_string())
        }
    }

    #[tokio::test]
    async fn test_provider_is_object_safe() {
        let provider: Box<dyn LlmProvider> = Box::new(Echo);
        assert_eq!(provider.model_name(), "echo");
        assert_eq!(provider.generate("hi").await.unwrap(), "hi");
    }

    #[test]
    fn test_network_classification() {
        assert!(LlmError::Timeout.is_network());
        assert!(LlmError::Communication("refused".into()).is_network());
        assert!(LlmError::Rejected { status: 500, message: "x".into() }.is_network());
        assert!(!LlmError::InvalidResponse("empty".into()).is_network());
        assert!(!LlmError::MissingCredential.is_network());
    }
}
