//! ContractGuard Analyzer
//!
//! Turns contract text into structured results by way of the oracle.
//!
//! # Overview
//!
//! The analyzer owns everything between "here is some text" and "here is a
//! validated result": prompt construction, the bounded oracle call, JSON
//! validation with default-fill, and enrichment of red flags with
//! community-reported outcomes.
//!
//! ```text
//! Upload → TextExtractor → PromptBuilder → LlmProvider → parser → AnalysisResult
//! ```
//!
//! # Operations
//!
//! - **Analyze**: one contract → [`AnalysisResult`](contractguard_domain::AnalysisResult)
//! - **Compare**: original + revision → [`ComparisonResult`](contractguard_domain::ComparisonResult)
//! - **Counter-propose**: prior analysis + user info → [`CounterProposal`](contractguard_domain::CounterProposal)
//!
//! Nothing is retried. A malformed oracle answer fails the operation; there
//! are no partial results.
//!
//! # Example Usage
//!
//! ```no_run
//! use contractguard_analyzer::{AnalyzerConfig, ContractAnalyzer};
//! use contractguard_llm::GeminiProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = GeminiProvider::new("api-key", "gemini-2.0-flash-exp")?;
//! let analyzer = ContractAnalyzer::new(Arc::new(llm), AnalyzerConfig::default());
//!
//! let text = std::fs::read_to_string("lease.txt")?;
//! let analysis = analyzer.analyze(&text, Some("rental")).await?;
//!
//! println!("Risk: {}/10, {}", analysis.risk_score, analysis.recommendation);
//! for flag in &analysis.red_flags {
//!     println!("- {}: {}", flag.category, flag.explanation);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;

pub mod community;
pub mod parser;
pub mod prompt;
pub mod samples;

pub use analyzer::{ContractAnalyzer, DEFAULT_USER_SIDE};
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use parser::ParseError;
pub use samples::{find_sample, samples, SampleContract, SampleSummary};
