//! Integration tests for the HTTP API

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use contractguard_analyzer::{find_sample, AnalyzerConfig, ContractAnalyzer};
use contractguard_documents::TextExtractor;
use contractguard_domain::{AnalysisResult, CommunityStats, ComparisonResult, CounterProposal, LlmError};
use contractguard_llm::MockProvider;
use contractguard_server::handlers::{
    create_router, AppState, ErrorResponse, HealthCheckResponse, MULTIPART_ALLOWANCE_BYTES,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

const BOUNDARY: &str = "contractguard-test-boundary";

const ANALYSIS: &str = r#"{
    "risk_score": 9,
    "recommendation": "AVOID",
    "overall_summary": "This lease strongly favors the landlord.",
    "contract_type_detected": "rental",
    "red_flags": [
        {"category": "Automatic Renewal", "severity": "HIGH", "explanation": "Locked in for another year."},
        {"category": "Mandatory Arbitration", "explanation": "No court access."}
    ],
    "yellow_flags": [],
    "negotiation_tips": ["Ask for a 30-day notice period"]
}"#;

const PROPOSAL: &str = r#"{
    "revised_clauses": [
        {
            "issue": "Automatic Renewal",
            "original_clause": "automatically renew",
            "revised_clause": "renew only upon written agreement of both parties",
            "justification": "Mutual consent"
        }
    ],
    "email_template": {
        "subject": "Proposed lease changes",
        "body": "Dear [Other Party Name],\n\nThank you.\n\n[Your Name]"
    },
    "talking_points": []
}"#;

/// Helper to create a router around a mock oracle
fn create_test_app(mock: &MockProvider) -> Router {
    create_app_with_limit(mock, 16 * 1024 * 1024)
}

fn create_app_with_limit(mock: &MockProvider, max_upload_bytes: usize) -> Router {
    let analyzer = ContractAnalyzer::new(Arc::new(mock.clone()), AnalyzerConfig::default())
        .with_extractor(TextExtractor::new(max_upload_bytes));
    create_router(AppState::new(analyzer))
}

fn sample_text(id: &str) -> &'static str {
    find_sample(id).map(|s| s.text).unwrap_or_default()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(filename: &str, content_type: &str, contents: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"type\"\r\n\r\nrental\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
             Content-Type: {ct}\r\n\r\n",
            b = BOUNDARY,
            f = filename,
            ct = content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn error_body(response: axum::response::Response) -> ErrorResponse {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app(&MockProvider::new(ANALYSIS));

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthCheckResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "ContractGuard AI");
}

#[tokio::test]
async fn test_analyze_json_text() {
    let mock = MockProvider::new(ANALYSIS);
    let app = create_test_app(&mock);

    let request = json_request(
        "POST",
        "/api/analyze",
        json!({"text": sample_text("rental-bad"), "type": "rental"}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let analysis: AnalysisResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(analysis.risk_score.value(), 9);
    assert_eq!(analysis.recommendation.as_str(), "REJECT");
    assert_eq!(analysis.analysis_metadata.unwrap().total_flags, 2);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_analyze_short_text_rejected() {
    let mock = MockProvider::new(ANALYSIS);
    let app = create_test_app(&mock);

    let request = json_request("POST", "/api/analyze", json!({"text": "Sign here."}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response).await;
    assert!(error.message.unwrap().contains("too short"));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_without_body_rejected() {
    let app = create_test_app(&MockProvider::new(ANALYSIS));

    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("hello"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_text_upload() {
    let mock = MockProvider::new(ANALYSIS);
    let app = create_test_app(&mock);

    let request = multipart_request("lease.txt", "text/plain", sample_text("rental-bad").as_bytes());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_unsupported_upload_is_415() {
    let mock = MockProvider::new(ANALYSIS);
    let app = create_test_app(&mock);

    let request = multipart_request("lease.png", "image/png", &[0x89, b'P', b'N', b'G']);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let error = error_body(response).await;
    assert_eq!(error.error, "Unsupported file type");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let mock = MockProvider::new(ANALYSIS);
    let app = create_app_with_limit(&mock, 1024);

    let big = "x".repeat(4096);
    let request = multipart_request("lease.txt", "text/plain", big.as_bytes());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let error = error_body(response).await;
    assert_eq!(error.error, "File too large");
    assert_eq!(error.message.unwrap(), "Please upload files smaller than 1KB");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_body_over_framing_allowance_is_413() {
    let mock = MockProvider::new(ANALYSIS);
    let app = create_app_with_limit(&mock, 1024);

    let big = "x".repeat(1024 + MULTIPART_ALLOWANCE_BYTES);
    let request = multipart_request("lease.txt", "text/plain", big.as_bytes());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let error = error_body(response).await;
    assert_eq!(error.message.unwrap(), "Please upload files smaller than 1KB");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_file_at_exact_limit_is_accepted() {
    let mock = MockProvider::new(ANALYSIS);
    let app = create_app_with_limit(&mock, 1024);

    let text: String = "The tenant shall pay rent monthly. "
        .repeat(40)
        .chars()
        .take(1024)
        .collect();
    assert_eq!(text.len(), 1024);
    let request = multipart_request("lease.txt", "text/plain", text.as_bytes());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_malformed_oracle_answer_is_502() {
    let mock = MockProvider::new(r#"{"recommendation": "SIGN", "overall_summary": "fine"}"#);
    let app = create_test_app(&mock);

    let request = json_request("POST", "/api/analyze", json!({"text": sample_text("nda-good")}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error = error_body(response).await;
    assert_eq!(error.error, "Failed to analyze contract");
    assert!(error.message.unwrap().contains("risk_score"));
}

#[tokio::test]
async fn test_unreachable_oracle_is_503() {
    let mut mock = MockProvider::new(ANALYSIS);
    mock.add_error("", LlmError::Communication("connection refused".to_string()));
    let app = create_test_app(&mock);

    let request = json_request("POST", "/api/analyze", json!({"text": sample_text("nda-good")}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_compare_identical_skips_oracle() {
    let mock = MockProvider::new("not used");
    let app = create_test_app(&mock);

    let text = sample_text("employment-medium");
    let request = json_request(
        "POST",
        "/api/compare",
        json!({"original": text, "revised": text, "user_side": "employee"}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let comparison: ComparisonResult = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(comparison.changes.is_empty());
    assert_eq!(comparison.overall_verdict.as_str(), "NEGOTIATE_MORE");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_compare_missing_revision() {
    let app = create_test_app(&MockProvider::new("not used"));

    let request = json_request(
        "POST",
        "/api/compare",
        json!({"original": sample_text("nda-good")}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_counter_proposal() {
    let mock = MockProvider::new(PROPOSAL);
    let app = create_test_app(&mock);

    let analysis: Value = serde_json::from_str(ANALYSIS).unwrap();
    let request = json_request(
        "POST",
        "/api/counter-proposal",
        json!({
            "analysis": analysis,
            "user_info": {"user_name": "Jordan Lee", "other_party_name": "Acme Properties"}
        }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let proposal: CounterProposal = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(proposal.email_template.body.contains("Dear Acme Properties"));
    assert!(proposal.email_template.body.contains("Jordan Lee"));
    assert_eq!(proposal.proposal_metadata.unwrap().red_flags_addressed, 2);
}

#[tokio::test]
async fn test_counter_proposal_requires_analysis() {
    let mock = MockProvider::new(PROPOSAL);
    let app = create_test_app(&mock);

    let request = json_request("POST", "/api/counter-proposal", json!({"user_info": {}}));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = error_body(response).await;
    assert_eq!(error.message.unwrap(), "Analysis results required");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_community_stats() {
    let app = create_test_app(&MockProvider::new("not used"));

    let request = Request::builder()
        .uri("/api/community-stats")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stats: CommunityStats = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(stats.total_contracts_analyzed, 20578);
    assert_eq!(stats.active_users, 14523);
    assert_eq!(stats.top_issues.len(), 5);
}

#[tokio::test]
async fn test_sample_contracts() {
    let app = create_test_app(&MockProvider::new("not used"));

    let list = app
        .clone()
        .oneshot(Request::builder().uri("/api/sample-contracts").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(list.status(), StatusCode::OK);
    let samples: Vec<Value> = serde_json::from_slice(&body_bytes(list).await).unwrap();
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0]["id"], "rental-bad");
    assert_eq!(samples[0]["type"], "rental");
    assert!(samples[0].get("text").is_none());

    let one = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/sample-contracts/nda-good")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(one.status(), StatusCode::OK);
    let sample: Value = serde_json::from_slice(&body_bytes(one).await).unwrap();
    assert!(sample["text"].as_str().unwrap().len() > 100);

    let missing = app
        .oneshot(
            Request::builder()
                .uri("/api/sample-contracts/lease-from-hell")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_text_report_download() {
    let app = create_test_app(&MockProvider::new("not used"));

    let analysis: Value = serde_json::from_str(ANALYSIS).unwrap();
    let request = json_request(
        "POST",
        "/api/report?format=text",
        json!({"kind": "analysis", "result": analysis}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"contract-analysis-report.txt\""
    );
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("RISK SCORE: 9/10"));
    assert!(text.contains("RECOMMENDATION: REJECT"));
}

#[tokio::test]
async fn test_html_report() {
    let app = create_test_app(&MockProvider::new("not used"));

    let analysis: Value = serde_json::from_str(ANALYSIS).unwrap();
    let request = json_request(
        "POST",
        "/api/report?format=html",
        json!({"kind": "analysis", "result": analysis}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("width:90%"));
}

#[tokio::test]
async fn test_report_unknown_format() {
    let app = create_test_app(&MockProvider::new("not used"));

    let analysis: Value = serde_json::from_str(ANALYSIS).unwrap();
    let request = json_request(
        "POST",
        "/api/report?format=pdf",
        json!({"kind": "analysis", "result": analysis}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_endpoint() {
    let app = create_test_app(&MockProvider::new("not used"));

    let request = Request::builder()
        .uri("/api/does-not-exist")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = error_body(response).await;
    assert_eq!(error.error, "Endpoint not found");
    assert!(error.message.is_none());
}
