//! Core ContractAnalyzer implementation

use crate::community;
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Operation};
use crate::parser::{parse_analysis, parse_comparison, parse_counter_proposal};
use crate::prompt::{comparison_prompt, counter_proposal_prompt, PromptBuilder};
use chrono::{SecondsFormat, Utc};
use contractguard_documents::{validate_text, TextExtractor, Upload};
use contractguard_domain::{
    AnalysisMetadata, AnalysisResult, ComparisonMetadata, ComparisonResult, CounterProposal,
    LlmError, LlmProvider, ProposalMetadata, UserInfo, Verdict,
};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

const RESPONSE_EXCERPT_CHARS: usize = 500;

/// Side assumed when a comparison request names none
pub const DEFAULT_USER_SIDE: &str = "tenant";

/// Drives the oracle for analysis, comparison and counter-proposals
///
/// Stateless apart from configuration; one instance is shared by every
/// request.
pub struct ContractAnalyzer {
    llm: Arc<dyn LlmProvider>,
    extractor: TextExtractor,
    config: AnalyzerConfig,
}

impl ContractAnalyzer {
    /// Create a new analyzer
    pub fn new(llm: Arc<dyn LlmProvider>, config: AnalyzerConfig) -> Self {
        Self {
            llm,
            extractor: TextExtractor::default(),
            config,
        }
    }

    /// Use a different document extractor (upload size limit)
    pub fn with_extractor(mut self, extractor: TextExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Upload limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.extractor.max_bytes()
    }

    /// Oracle model name
    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Check a contract text against the length limits
    pub fn check_text(&self, text: &str) -> Result<(), AnalyzerError> {
        let chars = text.trim().chars().count();
        if chars < self.config.min_text_length {
            return Err(AnalyzerError::InvalidRequest(
                "Contract text is too short. Please provide a complete contract.".to_string(),
            ));
        }
        if chars > self.config.max_text_length {
            return Err(AnalyzerError::InvalidRequest(format!(
                "Contract text is too long: {} characters (max: {})",
                chars, self.config.max_text_length
            )));
        }
        if !validate_text(text, self.config.min_text_length) {
            return Err(AnalyzerError::InvalidRequest(
                "Could not read the contract text. Please upload a text-based document.".to_string(),
            ));
        }
        Ok(())
    }

    /// Extract text from an uploaded file and analyze it
    ///
    /// Format detection happens before anything else, so an unsupported
    /// upload never reaches the oracle.
    pub async fn analyze_document(
        &self,
        upload: Upload,
        contract_type: Option<&str>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let extractor = self.extractor.clone();
        let text = tokio::task::spawn_blocking(move || extractor.extract(&upload))
            .await
            .map_err(|e| AnalyzerError::AnalysisFailed(format!("extraction task failed: {}", e)))??;

        self.analyze(&text, contract_type).await
    }

    /// Analyze a contract text
    pub async fn analyze(
        &self,
        text: &str,
        contract_type: Option<&str>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        self.check_text(text)?;
        info!("Analyzing contract of length: {} characters", text.chars().count());

        let prompt = PromptBuilder::new(text)
            .with_contract_type(contract_type)
            .build();
        let response = self.call_oracle(&prompt, Operation::Analysis).await?;

        let mut analysis = parse_analysis(&response).map_err(|e| {
            log_bad_response("analysis", &e, &response);
            Operation::Analysis.failed(e.to_string())
        })?;

        enrich_with_community_data(&mut analysis);
        analysis.analysis_metadata = Some(AnalysisMetadata {
            model: self.model_name().to_string(),
            timestamp: timestamp(),
            total_flags: analysis.total_flags(),
        });

        info!(
            "Analysis complete. Risk score: {}, recommendation: {}",
            analysis.risk_score, analysis.recommendation
        );
        Ok(analysis)
    }

    /// Compare an original and a revised contract from `user_side`'s point of view
    pub async fn compare(
        &self,
        original: &str,
        revised: &str,
        user_side: &str,
    ) -> Result<ComparisonResult, AnalyzerError> {
        if original.trim().is_empty() || revised.trim().is_empty() {
            return Err(AnalyzerError::InvalidRequest(
                "Both original and revised contracts required".to_string(),
            ));
        }
        for text in [original, revised] {
            self.check_text(text).map_err(|_| {
                AnalyzerError::InvalidRequest(
                    "Contracts too short or too long. Please provide complete contract text."
                        .to_string(),
                )
            })?;
        }

        let user_side = match user_side.trim() {
            "" => DEFAULT_USER_SIDE,
            side => side,
        };
        info!("Comparing contracts for {}", user_side);

        let mut comparison = if normalize_whitespace(original) == normalize_whitespace(revised) {
            info!("Contract versions are identical, skipping oracle");
            identical_comparison()
        } else {
            let prompt = comparison_prompt(
                original,
                revised,
                user_side,
                self.config.comparison_excerpt_chars,
            );
            let response = self.call_oracle(&prompt, Operation::Comparison).await?;
            parse_comparison(&response, user_side).map_err(|e| {
                log_bad_response("comparison", &e, &response);
                Operation::Comparison.failed(e.to_string())
            })?
        };

        comparison.comparison_metadata = Some(ComparisonMetadata {
            user_side: user_side.to_string(),
            timestamp: timestamp(),
        });

        info!(
            "Comparison complete. Verdict: {} ({} changes)",
            comparison.overall_verdict, comparison.total_changes
        );
        Ok(comparison)
    }

    /// Build a negotiation package for the red flags of a prior analysis
    pub async fn counter_proposal(
        &self,
        analysis: &AnalysisResult,
        user: &UserInfo,
    ) -> Result<CounterProposal, AnalyzerError> {
        let flags: Vec<_> = analysis
            .red_flags
            .iter()
            .take(self.config.counter_proposal_flag_limit)
            .cloned()
            .collect();

        let contract_type = user
            .contract_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or_else(|| Some(analysis.contract_type_detected.trim()).filter(|t| !t.is_empty()))
            .unwrap_or("contract");

        info!(
            "Generating counter-proposal for {} ({} red flags)",
            user.user_role,
            flags.len()
        );

        let prompt = counter_proposal_prompt(&flags, contract_type, &user.user_role)
            .map_err(|e| Operation::CounterProposal.failed(e.to_string()))?;
        let response = self.call_oracle(&prompt, Operation::CounterProposal).await?;

        let mut proposal = parse_counter_proposal(&response).map_err(|e| {
            log_bad_response("counter-proposal", &e, &response);
            Operation::CounterProposal.failed(e.to_string())
        })?;

        proposal.email_template.personalize(user);
        proposal.proposal_metadata = Some(ProposalMetadata {
            generated_for: user.user_name.clone(),
            timestamp: timestamp(),
            red_flags_addressed: flags.len(),
        });

        info!(
            "Counter-proposal generated with {} revised clauses",
            proposal.revised_clauses.len()
        );
        Ok(proposal)
    }

    /// Call the oracle, bounded by the configured timeout
    async fn call_oracle(&self, prompt: &str, op: Operation) -> Result<String, AnalyzerError> {
        debug!("Prompt length: {} chars", prompt.len());

        let response = timeout(self.config.oracle_timeout(), self.llm.generate(prompt))
            .await
            .map_err(|_| {
                warn!("Oracle call timed out after {}s", self.config.oracle_timeout_secs);
                AnalyzerError::Network(LlmError::Timeout)
            })?
            .map_err(|e| {
                error!("Oracle call failed: {}", e);
                op.from_llm(e)
            })?;

        debug!("Oracle response length: {} chars", response.len());
        Ok(response)
    }
}

/// Attach community insights to every red flag with a matching category
fn enrich_with_community_data(analysis: &mut AnalysisResult) {
    for flag in analysis.red_flags.iter_mut() {
        if let Some(insights) = community::insights_for(&flag.category) {
            debug!("Community match for '{}'", flag.category);
            flag.community_insights = Some(insights);
        }
    }
    analysis.community_enhanced = true;
}

fn identical_comparison() -> ComparisonResult {
    ComparisonResult {
        summary: "The two versions are identical. No clauses were added, removed or modified."
            .to_string(),
        overall_verdict: Verdict::NegotiateMore,
        verdict_explanation:
            "Nothing changed, so none of the concerns in the original have been addressed."
                .to_string(),
        total_changes: 0,
        changes_favoring_user: 0,
        changes_favoring_other: 0,
        neutral_changes: 0,
        changes: Vec::new(),
        addressed_concerns: Vec::new(),
        ignored_concerns: Vec::new(),
        new_issues: Vec::new(),
        recommendation: "Ask the other party for a revised draft before comparing again."
            .to_string(),
        next_steps: vec!["Send your requested changes to the other party".to_string()],
        comparison_metadata: None,
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn log_bad_response(what: &str, err: &impl std::fmt::Display, response: &str) {
    let excerpt: String = response.chars().take(RESPONSE_EXCERPT_CHARS).collect();
    error!("Failed to parse {} response: {}", what, err);
    error!("Response text: {}...", excerpt);
}
