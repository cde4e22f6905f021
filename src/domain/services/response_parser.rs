use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::RecommendationError;

use super::prompt_builder::NO_PRODUCTS_SENTINEL;

/// What the model's free-text answer boils down to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    NoProductsAvailable,
    /// IDs in the order the model listed them. May be empty.
    ProductIds(Vec<String>),
}

fn quoted_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"["'](\d+)["']"#).expect("static pattern is valid"))
}

/// Interpret the raw text returned by the model.
///
/// 1. The sentinel anywhere in the text wins.
/// 2. Otherwise the text must be a JSON array (a Markdown code fence around it
///    is tolerated).
/// 3. Failing that, every quoted run of digits is taken as an ID, which
///    recovers arrays the model wrapped in prose.
///
/// Returns [`RecommendationError::UnparsableResponse`] only when neither stage
/// produces an array.
pub fn parse_response(text: &str) -> Result<ParsedResponse, RecommendationError> {
    let cleaned = text.trim();

    if cleaned.contains(NO_PRODUCTS_SENTINEL) {
        return Ok(ParsedResponse::NoProductsAvailable);
    }

    if let Some(ids) = parse_strict(strip_code_fence(cleaned)) {
        return Ok(ParsedResponse::ProductIds(ids));
    }

    let ids = scan_quoted_ids(cleaned);
    if ids.is_empty() {
        return Err(RecommendationError::unparsable(cleaned));
    }

    Ok(ParsedResponse::ProductIds(ids))
}

fn strip_code_fence(text: &str) -> &str {
    text.trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

fn parse_strict(text: &str) -> Option<Vec<String>> {
    let values: Vec<Value> = serde_json::from_str(text).ok()?;

    Some(
        values
            .into_iter()
            .filter_map(|value| match value {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) if n.is_u64() => Some(n.to_string()),
                _ => None,
            })
            .filter(|id| !id.is_empty())
            .collect(),
    )
}

fn scan_quoted_ids(text: &str) -> Vec<String> {
    quoted_id_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
