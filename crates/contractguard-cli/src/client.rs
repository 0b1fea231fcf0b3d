//! HTTP client for the ContractGuard server API.

use crate::error::{CliError, Result, FALLBACK_MESSAGE};
use crate::validate::CheckedFile;
use contractguard_domain::{
    AnalysisResult, CommunityStats, ComparisonResult, CounterProposal, UserInfo,
};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Bundled sample listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleInfo {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Contract type hint
    #[serde(rename = "type")]
    pub contract_type: String,
    /// Full text, only present when fetching one sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Client for the server's JSON API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for a server URL (e.g., http://localhost:8080)
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The server URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a checked file for analysis
    pub async fn analyze_file(
        &self,
        file: &CheckedFile,
        bytes: Vec<u8>,
        contract_type: Option<&str>,
    ) -> Result<AnalysisResult> {
        let part = Part::bytes(bytes)
            .file_name(file.filename.clone())
            .mime_str(file.kind.mime())?;
        let mut form = Form::new().part("file", part);
        if let Some(contract_type) = contract_type {
            form = form.text("type", contract_type.to_string());
        }

        self.send(self.http.post(self.url("/api/analyze")).multipart(form))
            .await
    }

    /// Analyze contract text
    pub async fn analyze_text(
        &self,
        text: &str,
        contract_type: Option<&str>,
    ) -> Result<AnalysisResult> {
        let body = json!({ "text": text, "type": contract_type });
        self.send(self.http.post(self.url("/api/analyze")).json(&body))
            .await
    }

    /// Compare two contract texts
    pub async fn compare(
        &self,
        original: &str,
        revised: &str,
        user_side: &str,
    ) -> Result<ComparisonResult> {
        let body = json!({ "original": original, "revised": revised, "user_side": user_side });
        self.send(self.http.post(self.url("/api/compare")).json(&body))
            .await
    }

    /// Generate a counter-proposal from a prior analysis
    pub async fn counter_proposal(
        &self,
        analysis: &Value,
        user_info: &UserInfo,
    ) -> Result<CounterProposal> {
        let body = json!({ "analysis": analysis, "user_info": user_info });
        self.send(self.http.post(self.url("/api/counter-proposal")).json(&body))
            .await
    }

    /// Fetch community statistics
    pub async fn community_stats(&self) -> Result<CommunityStats> {
        self.send(self.http.get(self.url("/api/community-stats")))
            .await
    }

    /// List bundled samples
    pub async fn samples(&self) -> Result<Vec<SampleInfo>> {
        self.send(self.http.get(self.url("/api/sample-contracts")))
            .await
    }

    /// Fetch one sample including its text
    pub async fn sample(&self, id: &str) -> Result<SampleInfo> {
        let path = format!("/api/sample-contracts/{}", id);
        self.send(self.http.get(self.url(&path))).await
    }

    /// Send a request and decode the JSON answer or the `{error, message}` body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CliError::Server {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pick the most specific message out of an error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.url("/health"), "http://localhost:8080/health");
    }

    #[test]
    fn test_error_message_prefers_message() {
        let body = r#"{"error": "Failed to analyze contract", "message": "risk_score missing"}"#;
        assert_eq!(error_message(body), "risk_score missing");
    }

    #[test]
    fn test_error_message_falls_back_to_error() {
        assert_eq!(error_message(r#"{"error": "Endpoint not found"}"#), "Endpoint not found");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message("<html>502 Bad Gateway</html>"), "Analysis failed");
        assert_eq!(error_message(r#"{"message": ""}"#), "Analysis failed");
    }

    #[test]
    fn test_sample_info_parsing() {
        let json = r#"{"id": "nda-good", "name": "Fair NDA", "description": "Balanced", "type": "nda"}"#;
        let sample: SampleInfo = serde_json::from_str(json).unwrap();
        assert_eq!(sample.contract_type, "nda");
        assert!(sample.text.is_none());
    }
}
