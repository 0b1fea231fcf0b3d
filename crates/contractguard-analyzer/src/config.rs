//! Configuration for the ContractAnalyzer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the ContractAnalyzer
///
/// Every field has a default, so a partial `[analyzer]` table is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum contract text length (characters, after trimming)
    pub min_text_length: usize,

    /// Maximum contract text length (characters)
    pub max_text_length: usize,

    /// Maximum time for a single oracle call (seconds)
    pub oracle_timeout_secs: u64,

    /// Characters of each version sent to the oracle when comparing
    pub comparison_excerpt_chars: usize,

    /// Red flags included in a counter-proposal prompt
    pub counter_proposal_flag_limit: usize,
}

impl AnalyzerConfig {
    /// Get the oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.min_text_length > self.max_text_length {
            return Err("min_text_length cannot exceed max_text_length".to_string());
        }
        if self.oracle_timeout_secs == 0 {
            return Err("oracle_timeout_secs must be greater than 0".to_string());
        }
        if self.comparison_excerpt_chars == 0 {
            return Err("comparison_excerpt_chars must be greater than 0".to_string());
        }
        if self.counter_proposal_flag_limit == 0 {
            return Err("counter_proposal_flag_limit must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_text_length: 100,
            max_text_length: 100_000,
            oracle_timeout_secs: 120,
            comparison_excerpt_chars: 3_000,
            counter_proposal_flag_limit: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.oracle_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_invalid_max_text_length() {
        let config = AnalyzerConfig {
            max_text_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_above_max_is_invalid() {
        let config = AnalyzerConfig {
            min_text_length: 500,
            max_text_length: 400,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = AnalyzerConfig {
            oracle_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AnalyzerConfig::from_toml("oracle_timeout_secs = 30").unwrap();
        assert_eq!(config.oracle_timeout_secs, 30);
        assert_eq!(config.min_text_length, 100);
        assert_eq!(config.counter_proposal_flag_limit, 5);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalyzerConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = AnalyzerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
