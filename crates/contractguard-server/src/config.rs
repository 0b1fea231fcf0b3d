//! Configuration file parsing for the server.
//!
//! Loads settings from a TOML file (bind address, upload limit, oracle
//! credentials, analyzer limits) and applies environment overrides on top.

use contractguard_analyzer::AnalyzerConfig;
use contractguard_documents::DEFAULT_MAX_UPLOAD_BYTES;
use contractguard_llm::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the oracle API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable overriding the bind port
pub const PORT_VAR: &str = "PORT";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// Request body limit in bytes; also the document size limit
    pub max_upload_bytes: usize,

    /// Oracle connection settings
    pub oracle: OracleConfig,

    /// Analyzer limits
    pub analyzer: AnalyzerConfig,
}

/// Oracle connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// API base URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// API key; usually supplied through `GEMINI_API_KEY`
    pub api_key: String,

    /// HTTP timeout for one oracle call
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            bind_port: 8080,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            oracle: OracleConfig::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse TOML, then apply environment overrides
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.with_overrides(|var| std::env::var(var).ok())?.validated()
    }

    /// Defaults plus environment overrides, for running without a file
    pub fn from_env() -> Result<Self, ConfigError> {
        ServerConfig::default()
            .with_overrides(|var| std::env::var(var).ok())?
            .validated()
    }

    /// Apply `GEMINI_API_KEY` and `PORT` from a variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            self.oracle.api_key = key;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.bind_port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{} is not a port: {}", PORT_VAR, port)))?;
        }
        Ok(self)
    }

    /// Check required fields and limits
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.oracle.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField("api_key".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        self.analyzer.validate().map_err(ConfigError::Invalid)?;
        Ok(self)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            oracle: OracleConfig {
                api_key: "test-key-do-not-use-in-production".to_string(),
                ..OracleConfig::default()
            },
            ..ServerConfig::default()
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Upload limit as shown to users, e.g. "16MB"
    pub fn upload_limit_label(&self) -> String {
        upload_limit_label(self.max_upload_bytes)
    }
}

/// Render a byte limit in whole megabytes when it divides evenly
pub fn upload_limit_label(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= 1024 && bytes % 1024 == 0 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{} bytes", bytes)
    }
}
