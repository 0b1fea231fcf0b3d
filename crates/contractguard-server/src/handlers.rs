//! HTTP request handlers for the ContractGuard API.
//!
//! Every handler is a thin shell around [`ContractAnalyzer`]: decode the
//! request, call one analyzer operation, encode the result. Errors from any
//! layer become a JSON `{error, message}` body in [`AppError`].

use crate::config::upload_limit_label;
use axum::{
    extract::{
        multipart::MultipartError, rejection::JsonRejection, DefaultBodyLimit, FromRequest,
        Multipart, Path, Query, Request, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use contractguard_analyzer::{
    community, find_sample, samples, AnalyzerError, ContractAnalyzer, SampleContract,
    SampleSummary,
};
use contractguard_documents::{DocumentError, Upload};
use contractguard_domain::{
    AnalysisResult, CommunityStats, ComparisonResult, CounterProposal, UserInfo,
};
use contractguard_report::{render, ReportError, ReportFormat, ReportSubject, REPORT_FILENAME};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Service name reported by `/health`
pub const SERVICE_NAME: &str = "ContractGuard AI";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The one analyzer every request goes through
    pub analyzer: Arc<ContractAnalyzer>,
}

impl AppState {
    /// Wrap an analyzer
    pub fn new(analyzer: ContractAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }

    fn limit_label(&self) -> String {
        upload_limit_label(self.analyzer.max_upload_bytes())
    }

    /// Classify a body rejection; the only one users can act on is size
    fn rejection(&self, status: StatusCode, detail: String) -> AppError {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(self.limit_label())
        } else {
            AppError::BadRequest(detail)
        }
    }

    fn json_rejection(&self, rejection: JsonRejection) -> AppError {
        self.rejection(rejection.status(), rejection.body_text())
    }

    fn multipart_error(&self, err: MultipartError) -> AppError {
        self.rejection(err.status(), err.body_text())
    }
}

/// Text analysis request
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Contract text
    #[serde(default)]
    pub text: String,
    /// Optional contract type hint (rental, employment, ...)
    #[serde(default, rename = "type")]
    pub contract_type: Option<String>,
}

/// Comparison request
#[derive(Debug, Default, Deserialize)]
pub struct CompareRequest {
    /// Text the user was first offered
    #[serde(default)]
    pub original: String,
    /// Text the other party sent back
    #[serde(default)]
    pub revised: String,
    /// Side the user is on; defaults to tenant
    #[serde(default)]
    pub user_side: String,
}

/// Counter-proposal request
#[derive(Debug, Deserialize)]
pub struct CounterProposalRequest {
    /// A prior analysis result
    #[serde(default)]
    pub analysis: Option<AnalysisResult>,
    /// Names and role for the email
    #[serde(default)]
    pub user_info: UserInfo,
}

/// Report download query
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// `text` (default) or `html`
    #[serde(default)]
    pub format: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Service name
    pub service: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error title
    pub error: String,
    /// Details for the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// What to try next
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Analyzer, document or oracle failure
    Analyzer(AnalyzerError),
    /// Report rendering failure
    Report(ReportError),
    /// Malformed or incomplete request
    BadRequest(String),
    /// Body over the upload limit; carries the limit label
    PayloadTooLarge(String),
    /// Unknown resource
    NotFound(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Analyzer(e) => analyzer_status(e),
            AppError::Report(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn analyzer_status(err: &AnalyzerError) -> StatusCode {
    match err {
        AnalyzerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        AnalyzerError::Document(DocumentError::UnsupportedFormat(_)) => {
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        }
        AnalyzerError::Document(DocumentError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
        AnalyzerError::Document(DocumentError::Extraction { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AnalyzerError::AnalysisFailed(_)
        | AnalyzerError::ComparisonFailed(_)
        | AnalyzerError::CounterProposalFailed(_) => StatusCode::BAD_GATEWAY,
        AnalyzerError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn analyzer_title(err: &AnalyzerError) -> &'static str {
    match err {
        AnalyzerError::InvalidRequest(_) => "Invalid request",
        AnalyzerError::Document(DocumentError::UnsupportedFormat(_)) => "Unsupported file type",
        AnalyzerError::Document(DocumentError::TooLarge { .. }) => "File too large",
        AnalyzerError::Document(DocumentError::Extraction { .. }) => "Failed to extract text",
        AnalyzerError::AnalysisFailed(_) => "Failed to analyze contract",
        AnalyzerError::ComparisonFailed(_) => "Failed to compare contracts",
        AnalyzerError::CounterProposalFailed(_) => "Failed to generate counter-proposal",
        AnalyzerError::Network(_) => "Analysis service unavailable",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Analyzer(e) => ErrorResponse {
                error: analyzer_title(&e).to_string(),
                message: Some(e.to_string()),
                suggestion: None,
            },
            AppError::Report(e) => ErrorResponse {
                error: "Invalid report request".to_string(),
                message: Some(e.to_string()),
                suggestion: None,
            },
            AppError::BadRequest(msg) => ErrorResponse {
                error: "Invalid request".to_string(),
                message: Some(msg),
                suggestion: None,
            },
            AppError::PayloadTooLarge(limit) => ErrorResponse {
                error: "File too large".to_string(),
                message: Some(format!("Please upload files smaller than {}", limit)),
                suggestion: Some(
                    "Try compressing your PDF or splitting large documents".to_string(),
                ),
            },
            AppError::NotFound(what) => ErrorResponse {
                error: what,
                message: None,
                suggestion: None,
            },
            AppError::Internal(msg) => ErrorResponse {
                error: "Internal server error".to_string(),
                message: Some(msg),
                suggestion: None,
            },
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %body.error, message = ?body.message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %body.error, message = ?body.message, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

impl From<AnalyzerError> for AppError {
    fn from(e: AnalyzerError) -> Self {
        match e {
            AnalyzerError::Document(DocumentError::TooLarge { limit, .. }) => {
                AppError::PayloadTooLarge(upload_limit_label(limit))
            }
            other => AppError::Analyzer(other),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(e: ReportError) -> Self {
        AppError::Report(e)
    }
}

/// POST /api/analyze - Analyze an uploaded file or a JSON text body
async fn analyze_contract(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<AnalysisResult>, AppError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let analysis = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|r| state.rejection(r.status(), r.body_text()))?;
        let (upload, contract_type) = read_upload(&state, multipart).await?;
        info!(bytes = upload.bytes.len(), filename = ?upload.filename, "Analyzing uploaded contract");
        state
            .analyzer
            .analyze_document(upload, contract_type.as_deref())
            .await?
    } else if content_type.starts_with("application/json") {
        let Json(payload) = Json::<AnalyzeRequest>::from_request(request, &state)
            .await
            .map_err(|r| state.json_rejection(r))?;
        let contract_type = payload
            .contract_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        state.analyzer.analyze(&payload.text, contract_type).await?
    } else {
        return Err(AppError::BadRequest(
            "No contract provided. Please upload a file or provide text.".to_string(),
        ));
    };

    Ok(Json(analysis))
}

/// Pull the `file` and optional `type` fields out of a form
async fn read_upload(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(Upload, Option<String>), AppError> {
    let mut upload = None;
    let mut contract_type = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| state.multipart_error(e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let declared = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| state.multipart_error(e))?;
                if filename.is_empty() {
                    return Err(AppError::BadRequest("No file selected".to_string()));
                }
                let mut file = Upload::new(bytes.to_vec()).with_filename(filename);
                if let Some(declared) = declared {
                    file = file.with_content_type(declared);
                }
                upload = Some(file);
            }
            "type" => {
                let value = field.text().await.map_err(|e| state.multipart_error(e))?;
                let value = value.trim();
                if !value.is_empty() {
                    contract_type = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| {
        AppError::BadRequest(
            "No contract provided. Please upload a file or provide text.".to_string(),
        )
    })?;
    Ok((upload, contract_type))
}

/// POST /api/compare - Compare an original contract with a revision
async fn compare_contracts(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<ComparisonResult>, AppError> {
    let Json(request) = payload.map_err(|r| state.json_rejection(r))?;

    let comparison = state
        .analyzer
        .compare(&request.original, &request.revised, &request.user_side)
        .await?;

    Ok(Json(comparison))
}

/// POST /api/counter-proposal - Negotiation package from a prior analysis
async fn create_counter_proposal(
    State(state): State<AppState>,
    payload: Result<Json<CounterProposalRequest>, JsonRejection>,
) -> Result<Json<CounterProposal>, AppError> {
    let Json(request) = payload.map_err(|r| state.json_rejection(r))?;
    let analysis = request
        .analysis
        .ok_or_else(|| AppError::BadRequest("Analysis results required".to_string()))?;

    let proposal = state
        .analyzer
        .counter_proposal(&analysis, &request.user_info)
        .await?;

    Ok(Json(proposal))
}

/// GET /api/community-stats - Aggregate counters from the community database
async fn community_stats() -> Json<CommunityStats> {
    Json(community::aggregated_stats())
}

/// GET /api/sample-contracts - Bundled samples without their text
async fn list_samples() -> Json<Vec<SampleSummary>> {
    Json(samples().iter().map(SampleContract::summary).collect())
}

/// GET /api/sample-contracts/:id - One sample including its text
async fn get_sample(Path(id): Path<String>) -> Result<Json<&'static SampleContract>, AppError> {
    find_sample(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Sample contract not found: {}", id)))
}

/// POST /api/report - Render a result as a text download or HTML
async fn download_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    payload: Result<Json<ReportSubject>, JsonRejection>,
) -> Result<Response, AppError> {
    let format: ReportFormat = query.format.as_deref().unwrap_or_default().parse()?;
    let Json(subject) = payload.map_err(|r| state.json_rejection(r))?;

    let body = render(&subject, format);
    let mut response = ([(header::CONTENT_TYPE, format.content_type())], body).into_response();
    if format == ReportFormat::Text {
        let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", REPORT_FILENAME))
            .map_err(|e| AppError::Internal(e.to_string()))?;
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, disposition);
    }
    Ok(response)
}

/// GET /health - Liveness
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

/// Room for multipart boundaries and part headers on top of the file itself
pub const MULTIPART_ALLOWANCE_BYTES: usize = 64 * 1024;

/// Create the axum router with all routes
///
/// The body limit leaves [`MULTIPART_ALLOWANCE_BYTES`] of framing room, so a
/// file of exactly `max_upload_bytes` is accepted; the file size itself is
/// enforced by the extractor.
pub fn create_router(state: AppState) -> AxumRouter {
    let body_limit = state
        .analyzer
        .max_upload_bytes()
        .saturating_add(MULTIPART_ALLOWANCE_BYTES);

    AxumRouter::new()
        .route("/api/analyze", post(analyze_contract))
        .route("/api/compare", post(compare_contracts))
        .route("/api/counter-proposal", post(create_counter_proposal))
        .route("/api/community-stats", get(community_stats))
        .route("/api/sample-contracts", get(list_samples))
        .route("/api/sample-contracts/:id", get(get_sample))
        .route("/api/report", post(download_report))
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
