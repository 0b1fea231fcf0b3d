//! ContractGuard LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `contractguard-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use contractguard_llm::MockProvider;
//! use contractguard_domain::LlmProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use contractguard_domain::LlmProvider;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub use contractguard_domain::LlmError;
pub use gemini::GeminiProvider;

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// A response registered with [`MockProvider::add_response`] is returned
/// for every prompt that *contains* the given fragment; the first matching
/// fragment wins. Everything else gets the default response.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, Result<String, LlmError>)>>>,
    call_count: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// Respond with `response` whenever the prompt contains `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.entries().push((fragment.into(), Ok(response.into())));
    }

    /// Fail with `error` whenever the prompt contains `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>, error: LlmError) {
        self.entries().push((fragment.into(), Err(error)));
    }

    /// Sleep before answering (for timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, Vec<(String, Result<String, LlmError>)>> {
        self.responses.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn model_name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let matched = self
            .entries()
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map(|(_, outcome)| outcome.clone());

        matched.unwrap_or_else(|| Ok(self.default_response.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_fragment_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("ORIGINAL CONTRACT", "comparison");
        provider.add_response("RED FLAGS TO ADDRESS", "proposal");

        assert_eq!(
            provider.generate("...ORIGINAL CONTRACT:\nabc").await.unwrap(),
            "comparison"
        );
        assert_eq!(
            provider.generate("**RED FLAGS TO ADDRESS:**").await.unwrap(),
            "proposal"
        );
        assert_eq!(provider.generate("unknown").await.unwrap(), "Default mock response");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt", LlmError::Timeout);

        let result = provider.generate("a bad prompt here").await;
        assert_eq!(result.unwrap_err(), LlmError::Timeout);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_count() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
