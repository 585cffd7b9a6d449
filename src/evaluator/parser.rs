// src/evaluator/parser.rs — Evaluation payload extraction
//
// LLM-backed scorers wrap their JSON in markdown fences, prose, or cut
// it off mid-object when they hit a token limit. This module recovers a
// parseable object from such responses before handing it to serde.

use tracing::debug;

use crate::core::types::RawEvaluation;
use crate::infra::errors::TestgenError;

/// Extract a `RawEvaluation` from a raw scorer response.
pub fn parse_evaluation(response: &str) -> Result<RawEvaluation, TestgenError> {
    let cleaned = clean_json_response(response)?;
    let raw = serde_json::from_str(&cleaned)?;
    Ok(raw)
}

/// Strip markdown fences and surrounding prose, keeping the outermost
/// `{...}` span, then repair unbalanced delimiters from truncation.
fn clean_json_response(response: &str) -> Result<String, TestgenError> {
    if response.trim().is_empty() {
        return Err(TestgenError::EmptyResponse);
    }

    let mut cleaned = response.replace("```json", "").replace("```", "");
    cleaned = cleaned.trim().to_string();

    let start = cleaned.find('{');
    let end = cleaned.rfind('}');
    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            cleaned = cleaned[s..=e].to_string();
        }
        (Some(s), _) => {
            // Opening brace but no closing one: truncated mid-object
            cleaned = cleaned[s..].to_string();
        }
        _ => return Err(TestgenError::EmptyResponse),
    }

    Ok(balance_delimiters(&cleaned))
}

/// Append the closing brackets/braces a truncated payload is missing.
/// Naive count, ignores delimiters inside string literals; good enough
/// for tail truncation, which is the failure mode seen in practice.
fn balance_delimiters(json: &str) -> String {
    let open_braces = json.matches('{').count();
    let close_braces = json.matches('}').count();
    let open_brackets = json.matches('[').count();
    let close_brackets = json.matches(']').count();

    if open_braces == close_braces && open_brackets == close_brackets {
        return json.to_string();
    }

    debug!(
        open_braces,
        close_braces, open_brackets, close_brackets, "repairing truncated payload"
    );

    let mut repaired = json.trim_end().trim_end_matches(',').to_string();
    for _ in close_brackets..open_brackets {
        repaired.push(']');
    }
    for _ in close_braces..open_braces {
        repaired.push('}');
    }
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_payload() {
        let raw = parse_evaluation(r#"{"totalScore": 85.0}"#).unwrap();
        assert_eq!(raw.total_score, Some(85.0));
    }

    #[test]
    fn test_fenced_payload() {
        let response = "```json\n{\"totalScore\": 72, \"scoreMethod\": \"LLM\"}\n```";
        let raw = parse_evaluation(response).unwrap();
        assert_eq!(raw.total_score, Some(72.0));
        assert_eq!(raw.score_method.as_deref(), Some("LLM"));
    }

    #[test]
    fn test_prose_around_payload() {
        let response = "Here is the evaluation:\n{\"totalScore\": 64}\nHope this helps!";
        let raw = parse_evaluation(response).unwrap();
        assert_eq!(raw.total_score, Some(64.0));
    }

    #[test]
    fn test_truncated_payload_is_repaired() {
        // Cut off inside the strengths array, trailing comma and all
        let response = r#"{"totalScore": 70, "strengths": ["good coverage","#;
        let raw = parse_evaluation(response).unwrap();
        assert_eq!(raw.total_score, Some(70.0));
        assert_eq!(raw.strengths, vec!["good coverage".to_string()]);
    }

    #[test]
    fn test_empty_response_is_an_error() {
        assert!(matches!(
            parse_evaluation(""),
            Err(TestgenError::EmptyResponse)
        ));
        assert!(matches!(
            parse_evaluation("   \n  "),
            Err(TestgenError::EmptyResponse)
        ));
    }

    #[test]
    fn test_no_object_is_an_error() {
        assert!(matches!(
            parse_evaluation("no json here"),
            Err(TestgenError::EmptyResponse)
        ));
    }

    #[test]
    fn test_balanced_payload_untouched() {
        let json = r#"{"a": [1, 2]}"#;
        assert_eq!(balance_delimiters(json), json);
    }
}
