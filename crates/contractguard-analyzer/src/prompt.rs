//! Oracle prompt engineering
//!
//! The JSON shapes requested here are the contract with the oracle; the
//! parser in [`crate::parser`] validates answers against the same field names.

use contractguard_domain::Flag;

/// The ten red-flag categories the oracle is asked to look for
pub const RED_FLAG_CATEGORIES: [&str; 10] = [
    "Hidden or excessive fees",
    "One-sided termination rights (they can terminate easily, you cannot)",
    "Automatic renewal clauses without clear opt-out",
    "Unreasonable liability waivers or indemnification",
    "Waiver of legal rights (arbitration clauses, class action waivers)",
    "Excessive penalties or damages",
    "Unfair modification rights",
    "Lack of termination rights for the consumer",
    "Unreasonable restrictions on the consumer",
    "Missing standard consumer protections",
];

/// Concerning but non-critical patterns
pub const YELLOW_FLAG_CATEGORIES: [&str; 6] = [
    "Vague or ambiguous language",
    "Missing definitions for key terms",
    "Unusual or non-standard clauses",
    "Overly complex legal language",
    "Short notice periods",
    "Restricted dispute resolution options",
];

/// Builds the single-contract analysis prompt
pub struct PromptBuilder<'a> {
    text: &'a str,
    contract_type: Option<&'a str>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder for the given contract text
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            contract_type: None,
        }
    }

    /// Declare the contract type instead of letting the oracle classify it
    pub fn with_contract_type(mut self, contract_type: Option<&'a str>) -> Self {
        self.contract_type = contract_type.map(str::trim).filter(|t| !t.is_empty());
        self
    }

    /// Build the complete analysis prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ANALYST_ROLE);
        prompt.push_str("\n\n");

        if let Some(contract_type) = self.contract_type {
            prompt.push_str(&format!("Contract Type: {}\n\n", contract_type.to_uppercase()));
        }

        prompt.push_str("**CRITICAL RED FLAGS TO LOOK FOR:**\n");
        push_numbered(&mut prompt, &RED_FLAG_CATEGORIES);
        prompt.push_str("\n**YELLOW FLAGS (concerning but not critical):**\n");
        push_numbered(&mut prompt, &YELLOW_FLAG_CATEGORIES);
        prompt.push('\n');

        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(ANALYSIS_SCHEMA);
        prompt.push_str("\n\nCONTRACT TEXT:\n---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");
        prompt.push_str(JSON_ONLY);

        prompt
    }
}

/// Build the two-version comparison prompt
///
/// Each version is cut to `excerpt_chars` characters.
pub fn comparison_prompt(original: &str, revised: &str, user_side: &str, excerpt_chars: usize) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are a contract comparison expert helping a {}.\n\n",
        user_side
    ));
    prompt.push_str("Compare the two versions of the contract below.\n\n");
    prompt.push_str("**ANALYSIS REQUIREMENTS:**\n");
    prompt.push_str("1. Identify every clause that was added, removed or modified\n");
    prompt.push_str(&format!(
        "2. For each change decide who benefits: the {} (answer \"user\"), the other party (\"other_party\") or neither (\"neutral\")\n",
        user_side
    ));
    prompt.push_str("3. List concerns from the original that the revision fixes\n");
    prompt.push_str("4. List new problems the revision introduces\n");
    prompt.push_str("5. List major problems that remain unfixed\n");
    prompt.push_str(&format!(
        "6. Give an overall verdict: should the {} accept this revision?\n\n",
        user_side
    ));

    prompt.push_str("ORIGINAL CONTRACT:\n---\n");
    prompt.push_str(&excerpt(original, excerpt_chars));
    prompt.push_str("\n---\n\nREVISED CONTRACT:\n---\n");
    prompt.push_str(&excerpt(revised, excerpt_chars));
    prompt.push_str("\n---\n\n");

    prompt.push_str(COMPARISON_SCHEMA);
    prompt.push_str("\n\n");
    prompt.push_str(JSON_ONLY);

    prompt
}

/// Build the counter-proposal prompt from already-selected red flags
pub fn counter_proposal_prompt(
    red_flags: &[Flag],
    contract_type: &str,
    user_role: &str,
) -> Result<String, serde_json::Error> {
    let flags_json = serde_json::to_string_pretty(red_flags)?;

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "You are a professional contract negotiation consultant helping a {}.\n\n",
        user_role
    ));
    prompt.push_str("Create a counter-proposal package that addresses the red flags below.\n\n");
    prompt.push_str("**RED FLAGS TO ADDRESS:**\n");
    prompt.push_str(&flags_json);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("**CONTRACT TYPE:** {}\n", contract_type));
    prompt.push_str(&format!("**USER ROLE:** {}\n\n", user_role));
    prompt.push_str(COUNTER_PROPOSAL_INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(COUNTER_PROPOSAL_SCHEMA);
    prompt.push_str("\n\n");
    prompt.push_str(JSON_ONLY);

    Ok(prompt)
}

/// First `max_chars` characters of `text`, marked when cut
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

fn push_numbered(prompt: &mut String, items: &[&str]) {
    for (idx, item) in items.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", idx + 1, item));
    }
}

const ANALYST_ROLE: &str = "You are an expert legal analyst specializing in consumer contract protection.
Your goal is to help ordinary people understand contracts and spot problems before they sign.";

const ANALYSIS_INSTRUCTIONS: &str = r#"**ANALYSIS INSTRUCTIONS:**
1. Read the entire contract
2. Identify ALL red flags and yellow flags
3. For each flag, quote the EXACT problematic clause
4. Explain the risk in plain English (8th-grade reading level)
5. Suggest specific questions to ask before signing
6. Give an overall risk score from 0 to 10 (10 = extremely risky)
7. Give a clear recommendation: SIGN, NEGOTIATE, or REJECT
8. If the contract is fair, say so clearly"#;

const ANALYSIS_SCHEMA: &str = r#"**OUTPUT FORMAT:**
Return a JSON object with this EXACT structure:
{
  "risk_score": 7,
  "recommendation": "SIGN | NEGOTIATE | REJECT",
  "overall_summary": "Main concerns in 2-3 sentences",
  "contract_type_detected": "rental | employment | nda | service | other",
  "red_flags": [
    {
      "category": "Hidden Fees",
      "severity": "HIGH",
      "clause_text": "Exact quote from the contract",
      "location": "Section or page reference",
      "explanation": "Why this is a problem, in plain English",
      "impact": "What could happen to you because of this clause",
      "questions_to_ask": ["Question 1", "Question 2"]
    }
  ],
  "yellow_flags": [
    {
      "category": "Vague Language",
      "severity": "MEDIUM",
      "clause_text": "Exact quote",
      "location": "Section or page reference",
      "explanation": "Why this is concerning",
      "suggestion": "What should be clarified"
    }
  ],
  "missing_protections": ["Standard protection that is absent"],
  "positive_aspects": ["Good clause that IS present"],
  "key_questions_before_signing": ["Question 1", "Question 2", "Question 3"],
  "negotiation_tips": ["Specific thing to negotiate"]
}"#;

const COMPARISON_SCHEMA: &str = r#"Return a JSON object with this structure:
{
  "summary": "2-3 sentence overview of the revision",
  "overall_verdict": "ACCEPT | NEGOTIATE_MORE | REJECT",
  "verdict_explanation": "Why to accept, keep negotiating or reject",
  "changes": [
    {
      "section": "Section 3.2 - Security Deposit",
      "change_type": "added | removed | modified",
      "original_text": "Quote from the original (empty if added)",
      "revised_text": "Quote from the revision (empty if removed)",
      "who_benefits": "user | other_party | neutral",
      "benefit_level": "major | minor",
      "explanation": "What changed and why it matters",
      "impact": "positive | negative | neutral"
    }
  ],
  "addressed_concerns": ["Concern from the original that is now fixed"],
  "ignored_concerns": ["Concern that is still present"],
  "new_issues": ["Problem introduced by the revision"],
  "recommendation": "2-3 sentences of advice on what to do next",
  "next_steps": ["Concrete next step"]
}"#;

const COUNTER_PROPOSAL_INSTRUCTIONS: &str = r#"Generate a complete negotiation package with:
1. REVISED CLAUSES: fair, professionally worded replacements for each problematic clause
2. EMAIL TEMPLATE: a ready-to-send email; use [Your Name] and [Other Party Name] as placeholders
3. TALKING POINTS: arguments with legal or practical backing
4. COMPROMISE OPTIONS: fallback positions if the other party resists"#;

const COUNTER_PROPOSAL_SCHEMA: &str = r#"Return a JSON object with this structure:
{
  "revised_clauses": [
    {
      "issue": "Security Deposit",
      "original_clause": "The problematic clause text",
      "revised_clause": "Fair replacement clause",
      "justification": "Why the change is reasonable",
      "legal_basis": "Relevant laws, industry standards or common practice",
      "priority": "high | medium | low"
    }
  ],
  "email_template": {
    "subject": "Contract Review - Proposed Amendments",
    "greeting": "Dear [Other Party Name],",
    "body": "Professional, friendly email body",
    "tone": "professional_friendly"
  },
  "talking_points": [
    {
      "issue": "Security Deposit Refundability",
      "your_position": "What you are asking for",
      "key_argument": "Strongest argument",
      "supporting_evidence": "Law, market standard or fairness principle",
      "response_to_objections": "How to answer pushback"
    }
  ],
  "compromise_options": [
    {
      "if_they_say": "We can't change our standard contract",
      "you_respond": "Suggested reply",
      "middle_ground": "Acceptable compromise",
      "likelihood_of_success": "high | medium | low"
    }
  ],
  "negotiation_strategy": {
    "approach": "collaborative | firm | flexible",
    "key_principles": ["Principle"],
    "things_to_avoid": ["Pitfall"],
    "timeline": "Suggested timeline",
    "when_to_walk_away": "Conditions for declining the contract"
  },
  "success_probability": {
    "overall_estimate": "high | medium | low",
    "reasoning": "Why",
    "factors_in_your_favor": ["Factor"],
    "challenges": ["Challenge"]
  }
}"#;

const JSON_ONLY: &str = "Return ONLY the JSON object, with no text before or after it.";

#[cfg(test)]
mod tests {
    use super::*;
    use contractguard_domain::Severity;

    #[test]
    fn test_analysis_prompt_contains_text_and_categories() {
        let prompt = PromptBuilder::new("Tenant shall pay rent.").build();
        assert!(prompt.contains("Tenant shall pay rent."));
        for category in RED_FLAG_CATEGORIES {
            assert!(prompt.contains(category));
        }
        assert!(prompt.contains("\"risk_score\""));
        assert!(!prompt.contains("Contract Type:"));
    }

    #[test]
    fn test_declared_type_is_uppercased() {
        let prompt = PromptBuilder::new("text")
            .with_contract_type(Some("rental"))
            .build();
        assert!(prompt.contains("Contract Type: RENTAL"));
    }

    #[test]
    fn test_blank_type_is_ignored() {
        let prompt = PromptBuilder::new("text").with_contract_type(Some("  ")).build();
        assert!(!prompt.contains("Contract Type:"));
    }

    #[test]
    fn test_comparison_prompt_excerpts_each_version() {
        let original = "a".repeat(50);
        let revised = "b".repeat(10);
        let prompt = comparison_prompt(&original, &revised, "landlord", 20);

        assert!(prompt.contains(&format!("{}...", "a".repeat(20))));
        assert!(!prompt.contains(&"a".repeat(21)));
        assert!(prompt.contains(&"b".repeat(10)));
        assert!(prompt.contains("helping a landlord"));
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("ééééé", 2), "éé...");
        assert_eq!(excerpt("short", 10), "short");
    }

    #[test]
    fn test_counter_proposal_prompt_embeds_flags() {
        let flags = vec![Flag::new("Automatic Renewal", Severity::High, "Renews silently")];
        let prompt = counter_proposal_prompt(&flags, "rental", "tenant").unwrap();
        assert!(prompt.contains("Automatic Renewal"));
        assert!(prompt.contains("**CONTRACT TYPE:** rental"));
        assert!(prompt.contains("[Your Name]"));
    }
}
