//! Verdict decoding for raw model output.
//!
//! The model is instructed to return a bare JSON object, but real output
//! frequently arrives wrapped in prose or markdown code fences. The
//! extraction here is a best-effort heuristic against those wrappers,
//! not a contract with the remote service.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured classification result for one feature record.
/// Produced exactly once per record; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub is_geo_compliance_needed: bool,
    pub reasoning: String,
    #[serde(default)]
    pub relevant_regulation: String,
}

/// Raw model output that did not decode into a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    /// Raw response text, kept for manual follow-up.
    pub raw: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncate on char boundaries; model output is arbitrary UTF-8.
        let shown: String = self.raw.chars().take(200).collect();
        write!(f, "{} (raw: {})", self.message, shown)
    }
}

impl std::error::Error for ParseError {}

/// Decode raw completion text into a [`ComplianceVerdict`].
///
/// `relevant_regulation` and `reasoning` default to the empty string
/// when absent. `is_geo_compliance_needed` is mandatory: missing or
/// non-boolean values fail, since that field is the whole point.
pub fn parse_verdict(raw: &str) -> Result<ComplianceVerdict, ParseError> {
    let candidate = extract_json(raw);

    let value: Value = serde_json::from_str(candidate).map_err(|e| ParseError {
        message: format!("response is not valid JSON: {}", e),
        raw: raw.to_string(),
    })?;

    let obj = value.as_object().ok_or_else(|| ParseError {
        message: "response JSON is not an object".to_string(),
        raw: raw.to_string(),
    })?;

    let is_geo_compliance_needed = obj
        .get("is_geo_compliance_needed")
        .and_then(Value::as_bool)
        .ok_or_else(|| ParseError {
            message: "missing or non-boolean is_geo_compliance_needed".to_string(),
            raw: raw.to_string(),
        })?;

    let reasoning = obj
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let relevant_regulation = obj
        .get("relevant_regulation")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    Ok(ComplianceVerdict {
        is_geo_compliance_needed,
        reasoning,
        relevant_regulation,
    })
}

/// Best-effort extraction of a JSON object from wrapped model output.
///
/// Tolerated wrappers, tried in order: none (bare object), markdown code
/// fences (with or without a `json` language tag), and surrounding prose
/// (first `{` to last `}`).
fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return trimmed;
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            let inner = after[..end].trim();
            if !inner.is_empty() {
                return inner;
            }
        }
    }

    if let (Some(open), Some(close)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if open < close {
            return trimmed[open..=close].trim();
        }
    }

    trimmed
}
