//! ContractGuard Server
//!
//! HTTP surface for contract analysis, comparison and counter-proposals.
//! One [`ContractAnalyzer`](contractguard_analyzer::ContractAnalyzer) is
//! built at startup and shared by every request.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use contractguard_analyzer::ContractAnalyzer;
use contractguard_documents::TextExtractor;
use contractguard_domain::LlmError;
use contractguard_llm::GeminiProvider;
use handlers::{create_router, AppState};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The oracle client could not be built
    #[error("Oracle client error: {0}")]
    Oracle(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Initialize the global tracing subscriber from `RUST_LOG`
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the shared state: oracle client, extractor limit, analyzer
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let llm = GeminiProvider::with_timeout(
        config.oracle.api_key.clone(),
        config.oracle.model.clone(),
        Duration::from_secs(config.oracle.timeout_secs),
    )?
    .with_endpoint(config.oracle.endpoint.clone());

    let analyzer = ContractAnalyzer::new(Arc::new(llm), config.analyzer.clone())
        .with_extractor(TextExtractor::new(config.max_upload_bytes));

    Ok(AppState::new(analyzer))
}

/// Start the HTTP server
///
/// Builds the analyzer from configuration and serves until the process
/// exits.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting ContractGuard server");
    info!("Bind address: {}", config.bind_addr());
    info!("Oracle model: {}", config.oracle.model);
    info!("Upload limit: {}", config.upload_limit_label());

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state_from_test_config() {
        let mut config = ServerConfig::default_test_config();
        config.max_upload_bytes = 1024;

        let state = build_state(&config).unwrap();
        assert_eq!(state.analyzer.max_upload_bytes(), 1024);
        assert_eq!(state.analyzer.model_name(), "gemini-2.0-flash-exp");
    }
}
