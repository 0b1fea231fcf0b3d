//! Gemini Provider Implementation
//!
//! Talks to Google's `generateContent` REST API. The provider asks for a
//! JSON response MIME type; the analyzer still tolerates fenced output.
//!
//! Requests are never retried: a failed call surfaces to the user as-is.
//!
//! # Examples
//!
//! ```no_run
//! use contractguard_llm::GeminiProvider;
//!
//! let provider = GeminiProvider::new("my-api-key", "gemini-2.0-flash-exp").unwrap();
//! ```

use async_trait::async_trait;
use contractguard_domain::{LlmError, LlmProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Default timeout for oracle requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the default endpoint and timeout
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Communication` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(api_key, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new Gemini provider with a request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: 0.2,
            client,
        })
    }

    /// Point the provider at a different API base (proxies, tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::MissingCredential);
        }

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json",
            },
        };

        debug!("Sending {} char prompt to {}", prompt.len(), self.model);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::Communication(format!("Failed to read response: {}", e))
            }
        })?;

        if !status.is_success() {
            warn!("Oracle returned HTTP {}", status);
            return Err(status_error(status.as_u16(), &text, &self.model));
        }

        parse_generate_response(&text)
    }
}

/// Map a non-success HTTP status to an error
fn status_error(status: u16, body: &str, model: &str) -> LlmError {
    match status {
        429 => LlmError::RateLimitExceeded,
        404 => LlmError::ModelNotAvailable(model.to_string()),
        _ => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            LlmError::Rejected { status, message }
        }
    }
}

/// Pull the generated text out of a `generateContent` response body
fn parse_generate_response(body: &str) -> Result<String, LlmError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(LlmError::InvalidResponse(format!("Prompt blocked: {}", reason)));
    }

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No candidates returned".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(LlmError::InvalidResponse(format!(
            "Empty completion (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}
