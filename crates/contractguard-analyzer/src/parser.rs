//! Validation of oracle answers
//!
//! This is the one place oracle JSON is checked. Answers are normalized at
//! the `serde_json::Value` level (nulls dropped, required fields checked,
//! missing defaults filled in) and then deserialized into the domain types,
//! whose scalar parsing is lenient on its own.

use contractguard_domain::{
    AnalysisResult, Beneficiary, ComparisonResult, CounterProposal, Severity,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Why an oracle answer was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Not JSON, or not a JSON object
    #[error("response is not a JSON object: {0}")]
    NotJson(String),

    /// A required field is absent or null
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A field is present but has the wrong shape
    #[error("invalid response: {0}")]
    Schema(String),
}

const ANALYSIS_REQUIRED: [&str; 3] = ["risk_score", "recommendation", "overall_summary"];
const ANALYSIS_TEXT_LISTS: [&str; 4] = [
    "missing_protections",
    "positive_aspects",
    "key_questions_before_signing",
    "negotiation_tips",
];
const ANALYSIS_TEXT: [&str; 2] = ["overall_summary", "contract_type_detected"];
const FLAG_TEXT: [&str; 5] = ["clause_text", "location", "explanation", "impact", "suggestion"];
const COMPARISON_REQUIRED: [&str; 2] = ["summary", "overall_verdict"];
const COMPARISON_TEXT_LISTS: [&str; 4] = [
    "addressed_concerns",
    "ignored_concerns",
    "new_issues",
    "next_steps",
];
const COMPARISON_TEXT: [&str; 3] = ["summary", "verdict_explanation", "recommendation"];
const CHANGE_TEXT: [&str; 7] = [
    "section",
    "change_type",
    "original_text",
    "revised_text",
    "benefit_level",
    "explanation",
    "impact",
];
const EMAIL_TEXT: [&str; 4] = ["subject", "greeting", "body", "tone"];
const CLAUSE_TEXT: [&str; 6] = [
    "issue",
    "original_clause",
    "revised_clause",
    "justification",
    "legal_basis",
    "priority",
];
const TALKING_POINT_TEXT: [&str; 5] = [
    "issue",
    "your_position",
    "key_argument",
    "supporting_evidence",
    "response_to_objections",
];
const COMPROMISE_TEXT: [&str; 4] = ["if_they_say", "you_respond", "middle_ground", "likelihood_of_success"];

/// Parse an analysis answer
pub fn parse_analysis(response: &str) -> Result<AnalysisResult, ParseError> {
    let mut obj = parse_object(response)?;
    normalize_text_fields(&mut obj, &ANALYSIS_TEXT);
    require(&obj, &ANALYSIS_REQUIRED)?;

    normalize_flags(&mut obj, "red_flags", Severity::High);
    normalize_flags(&mut obj, "yellow_flags", Severity::Medium);
    for key in ANALYSIS_TEXT_LISTS {
        normalize_text_list(&mut obj, key);
    }

    deserialize(obj)
}

/// Parse a comparison answer
///
/// `who_benefits` is resolved against `user_side`, and the tallies are
/// recomputed from the change list.
pub fn parse_comparison(response: &str, user_side: &str) -> Result<ComparisonResult, ParseError> {
    let mut obj = parse_object(response)?;
    normalize_text_fields(&mut obj, &COMPARISON_TEXT);
    require(&obj, &COMPARISON_REQUIRED)?;

    for change in entries_mut(&mut obj, "changes") {
        normalize_text_fields(change, &CHANGE_TEXT);
        let who = change
            .get("who_benefits")
            .and_then(Value::as_str)
            .map(|s| Beneficiary::parse_for_side(s, user_side))
            .unwrap_or_default();
        change.insert("who_benefits".to_string(), Value::from(who.as_str()));
    }
    for key in COMPARISON_TEXT_LISTS {
        normalize_text_list(&mut obj, key);
    }

    let mut result: ComparisonResult = deserialize(obj)?;
    result.retally();
    Ok(result)
}

/// Parse a counter-proposal answer
pub fn parse_counter_proposal(response: &str) -> Result<CounterProposal, ParseError> {
    let mut obj = parse_object(response)?;
    require(&obj, &["revised_clauses", "email_template"])?;

    let email = obj
        .get_mut("email_template")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ParseError::Schema("email_template is not an object".to_string()))?;
    normalize_text_fields(email, &EMAIL_TEXT);
    if !email.contains_key("subject") {
        return Err(ParseError::MissingField("email_template.subject"));
    }
    if !email.contains_key("body") {
        return Err(ParseError::MissingField("email_template.body"));
    }

    if !obj.get("revised_clauses").is_some_and(Value::is_array) {
        return Err(ParseError::Schema("revised_clauses is not a list".to_string()));
    }
    for (key, fields) in [
        ("revised_clauses", &CLAUSE_TEXT[..]),
        ("talking_points", &TALKING_POINT_TEXT[..]),
        ("compromise_options", &COMPROMISE_TEXT[..]),
    ] {
        for entry in entries_mut(&mut obj, key) {
            normalize_text_fields(entry, fields);
        }
    }
    normalize_section(
        &mut obj,
        "negotiation_strategy",
        &["approach", "timeline", "when_to_walk_away"],
        &["key_principles", "things_to_avoid"],
    );
    normalize_section(
        &mut obj,
        "success_probability",
        &["overall_estimate", "reasoning"],
        &["factors_in_your_favor", "challenges"],
    );

    deserialize(obj)
}

/// Extract JSON from response, handling markdown code fences
pub fn extract_json(response: &str) -> &str {
    let mut text = response.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // drop the info string (```json)
        let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
        // anything after the closing fence is commentary
        text = match body.find("```") {
            Some(end) => &body[..end],
            None => body,
        };
        text = text.trim();
    }

    // prose around the object
    if !(text.starts_with('{') && text.ends_with('}')) {
        if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
            if start < end {
                return &text[start..=end];
            }
        }
    }

    text
}

/// Remove null object members and null array elements, recursively
pub fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

fn parse_object(response: &str) -> Result<Map<String, Value>, ParseError> {
    let mut value: Value = serde_json::from_str(extract_json(response))
        .map_err(|e| ParseError::NotJson(e.to_string()))?;
    strip_nulls(&mut value);

    match value {
        Value::Object(obj) => Ok(obj),
        other => Err(ParseError::NotJson(format!("expected an object, got {}", kind_of(&other)))),
    }
}

fn require(obj: &Map<String, Value>, fields: &[&'static str]) -> Result<(), ParseError> {
    match fields.iter().find(|f| !obj.contains_key(**f)) {
        Some(missing) => Err(ParseError::MissingField(*missing)),
        None => Ok(()),
    }
}

fn deserialize<T: DeserializeOwned>(obj: Map<String, Value>) -> Result<T, ParseError> {
    serde_json::from_value(Value::Object(obj)).map_err(|e| ParseError::Schema(e.to_string()))
}

/// Keep only the object elements of a list field
///
/// A field that is not a list is dropped so the serde default applies.
fn retain_objects(obj: &mut Map<String, Value>, key: &str) {
    match obj.get_mut(key) {
        Some(Value::Array(items)) => {
            let before = items.len();
            items.retain(Value::is_object);
            if items.len() != before {
                warn!("Dropped {} malformed entries from '{}'", before - items.len(), key);
            }
        }
        Some(_) => {
            warn!("Ignoring '{}': expected a list", key);
            obj.remove(key);
        }
        None => {}
    }
}

/// The object entries of a list field, for in-place normalization
fn entries_mut<'a>(
    obj: &'a mut Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a mut Map<String, Value>> {
    retain_objects(obj, key);
    obj.get_mut(key)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object_mut)
}

fn normalize_flags(obj: &mut Map<String, Value>, key: &str, fallback: Severity) {
    for flag in entries_mut(obj, key) {
        normalize_text_fields(flag, &FLAG_TEXT);

        let category_ok = flag
            .get("category")
            .and_then(Value::as_str)
            .is_some_and(|c| !c.trim().is_empty());
        if !category_ok {
            flag.insert("category".to_string(), Value::from("Uncategorized"));
        }

        let severity = flag
            .get("severity")
            .and_then(Value::as_str)
            .and_then(Severity::parse)
            .unwrap_or(fallback);
        flag.insert("severity".to_string(), Value::from(severity.as_str()));

        normalize_text_list(flag, "questions_to_ask");
    }
}

/// Coerce a list-of-strings field: a bare string becomes a one-element
/// list, non-string elements are dropped, anything else is removed
fn normalize_text_list(obj: &mut Map<String, Value>, key: &str) {
    match obj.remove(key) {
        Some(Value::Array(mut items)) => {
            items.retain(Value::is_string);
            obj.insert(key.to_string(), Value::Array(items));
        }
        Some(single @ Value::String(_)) => {
            obj.insert(key.to_string(), Value::Array(vec![single]));
        }
        Some(_) => warn!("Ignoring '{}': expected a list of strings", key),
        None => {}
    }
}

/// Coerce free-text fields: numbers and booleans become strings, a list of
/// strings is joined with spaces, anything else is removed so the serde
/// default applies
fn normalize_text_fields(obj: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        let Some(value) = obj.remove(*key) else {
            continue;
        };
        let text = match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            }
            Value::Null | Value::Object(_) => None,
        };
        match text {
            Some(text) => {
                obj.insert(key.to_string(), Value::String(text));
            }
            None => warn!("Ignoring '{}': expected text", key),
        }
    }
}

/// Normalize an optional nested object, dropping it when it is not an object
fn normalize_section(obj: &mut Map<String, Value>, key: &str, text: &[&str], lists: &[&str]) {
    match obj.get_mut(key) {
        Some(Value::Object(section)) => {
            normalize_text_fields(section, text);
            for list in lists {
                normalize_text_list(section, list);
            }
        }
        Some(_) => {
            warn!("Ignoring '{}': expected an object", key);
            obj.remove(key);
        }
        None => {}
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
